#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use rndm_core::database::ports::{EntriesRepository, InteractionsRepository};
use rndm_core::search::MediaSearchPort;
use rndm_core::{AppUnitOfWork, Result, StorageError};
use rndm_model::{
    CommentId, EntryId, FeedCursor, FeedEntry, FeedFilter, FeedPage,
    LikeState, MAX_PAGE_SIZE, MediaComment, MediaEntry, MediaType,
    NewMediaEntry, OwnerStats, SearchResult, UserId,
};
use rndm_server::{AppState, Config, create_app};

#[derive(Default)]
struct StoreInner {
    entries: Vec<MediaEntry>,
    likes: HashSet<(Uuid, Uuid)>,
    comments: Vec<MediaComment>,
    seq: i64,
}

/// In-memory stand-in for both storage ports, mirroring the Postgres
/// semantics the handlers rely on: visibility filtering, keyset pagination,
/// compound-predicate deletes, and batched enrichment.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strictly increasing, microsecond-precision timestamps keep the feed
    /// ordering deterministic even for back-to-back writes.
    fn next_timestamp(inner: &mut StoreInner) -> DateTime<Utc> {
        inner.seq += 1;
        DateTime::<Utc>::from_timestamp_micros(
            1_700_000_000_000_000 + inner.seq,
        )
        .unwrap()
    }

    fn entry_exists(inner: &StoreInner, entry: EntryId) -> bool {
        inner.entries.iter().any(|e| e.id == entry)
    }
}

#[async_trait]
impl EntriesRepository for InMemoryStore {
    async fn create(&self, entry: &NewMediaEntry) -> Result<MediaEntry> {
        let mut inner = self.inner.lock().unwrap();
        let created_at = Self::next_timestamp(&mut inner);
        let stored = MediaEntry {
            id: EntryId::new(),
            user_id: entry.user_id,
            media_type: entry.media_type,
            title: entry.title.clone(),
            creator: entry.creator.clone(),
            cover_url: entry.cover_url.clone(),
            comment: entry.comment.clone(),
            is_public: entry.is_public,
            created_at,
        };
        inner.entries.push(stored.clone());
        Ok(stored)
    }

    async fn feed(
        &self,
        filter: &FeedFilter,
        viewer: Option<UserId>,
    ) -> Result<FeedPage> {
        let inner = self.inner.lock().unwrap();
        let limit = filter.limit.clamp(1, MAX_PAGE_SIZE) as usize;

        let mut rows: Vec<&MediaEntry> = inner
            .entries
            .iter()
            .filter(|e| e.is_public)
            .filter(|e| filter.owner.is_none_or(|owner| e.user_id == owner))
            .collect();
        rows.sort_by(|a, b| {
            (b.created_at, b.id.to_uuid()).cmp(&(a.created_at, a.id.to_uuid()))
        });
        if let Some(cursor) = &filter.cursor {
            rows.retain(|e| {
                (e.created_at, e.id.to_uuid())
                    < (cursor.created_at, cursor.id.to_uuid())
            });
        }

        let has_more = rows.len() > limit;
        rows.truncate(limit);

        let next_cursor = if has_more {
            rows.last()
                .map(|last| FeedCursor::new(last.created_at, last.id).encode())
        } else {
            None
        };

        let entries = rows
            .into_iter()
            .map(|e| FeedEntry {
                likes_count: inner
                    .likes
                    .iter()
                    .filter(|(entry, _)| *entry == e.id.to_uuid())
                    .count() as i64,
                comments_count: inner
                    .comments
                    .iter()
                    .filter(|c| c.entry_id == e.id)
                    .count() as i64,
                is_liked: viewer.map(|v| {
                    inner.likes.contains(&(e.id.to_uuid(), v.to_uuid()))
                }),
                entry: e.clone(),
            })
            .collect();

        Ok(FeedPage {
            entries,
            next_cursor,
        })
    }

    async fn list_for_owner(
        &self,
        owner: UserId,
        media_type: Option<MediaType>,
    ) -> Result<Vec<MediaEntry>> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<MediaEntry> = inner
            .entries
            .iter()
            .filter(|e| e.user_id == owner)
            .filter(|e| media_type.is_none_or(|t| e.media_type == t))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            (b.created_at, b.id.to_uuid()).cmp(&(a.created_at, a.id.to_uuid()))
        });
        Ok(rows)
    }

    async fn delete(&self, id: EntryId, owner: UserId) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .entries
            .retain(|e| !(e.id == id && e.user_id == owner));
        Ok(())
    }

    async fn stats_for_owner(&self, owner: UserId) -> Result<OwnerStats> {
        let inner = self.inner.lock().unwrap();
        let mut stats = OwnerStats::default();
        for entry in inner.entries.iter().filter(|e| e.user_id == owner) {
            match entry.media_type {
                MediaType::Movie => stats.movies += 1,
                MediaType::Book => stats.books += 1,
                MediaType::Music => stats.music += 1,
            }
            stats.total += 1;
        }
        Ok(stats)
    }
}

#[async_trait]
impl InteractionsRepository for InMemoryStore {
    async fn toggle_like(
        &self,
        entry: EntryId,
        user: UserId,
    ) -> Result<LikeState> {
        let mut inner = self.inner.lock().unwrap();
        if !Self::entry_exists(&inner, entry) {
            return Err(StorageError::NotFound(format!(
                "Entry {} does not exist",
                entry
            )));
        }
        let key = (entry.to_uuid(), user.to_uuid());
        if inner.likes.remove(&key) {
            Ok(LikeState::Unliked)
        } else {
            inner.likes.insert(key);
            Ok(LikeState::Liked)
        }
    }

    async fn comments(&self, entry: EntryId) -> Result<Vec<MediaComment>> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<MediaComment> = inner
            .comments
            .iter()
            .filter(|c| c.entry_id == entry)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            (a.created_at, a.id.to_uuid()).cmp(&(b.created_at, b.id.to_uuid()))
        });
        Ok(rows)
    }

    async fn add_comment(
        &self,
        entry: EntryId,
        author: UserId,
        content: &str,
    ) -> Result<MediaComment> {
        let mut inner = self.inner.lock().unwrap();
        if !Self::entry_exists(&inner, entry) {
            return Err(StorageError::NotFound(format!(
                "Entry {} does not exist",
                entry
            )));
        }
        let created_at = Self::next_timestamp(&mut inner);
        let comment = MediaComment {
            id: CommentId::new(),
            entry_id: entry,
            user_id: author,
            content: content.to_string(),
            created_at,
        };
        inner.comments.push(comment.clone());
        Ok(comment)
    }

    async fn delete_comment(
        &self,
        id: CommentId,
        author: UserId,
    ) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .comments
            .retain(|c| !(c.id == id && c.user_id == author));
        Ok(())
    }
}

/// Canned search port; records the queries it was asked for.
#[derive(Clone, Default)]
pub struct FakeSearch {
    pub results: Vec<SearchResult>,
    pub calls: Arc<Mutex<Vec<(MediaType, String)>>>,
}

impl FakeSearch {
    pub fn with_results(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            calls: Arc::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl MediaSearchPort for FakeSearch {
    async fn search(
        &self,
        media_type: MediaType,
        query: &str,
    ) -> Vec<SearchResult> {
        self.calls
            .lock()
            .unwrap()
            .push((media_type, query.to_string()));
        self.results.clone()
    }
}

pub fn test_state(
    store: &InMemoryStore,
    search: Arc<dyn MediaSearchPort>,
) -> AppState {
    AppState {
        unit_of_work: Arc::new(AppUnitOfWork {
            entries: Arc::new(store.clone()),
            interactions: Arc::new(store.clone()),
        }),
        search,
        config: Arc::new(Config::default()),
    }
}

pub fn test_server(store: &InMemoryStore) -> TestServer {
    let state = test_state(store, Arc::new(FakeSearch::default()));
    TestServer::new(create_app(state)).unwrap()
}

pub fn test_server_with_search(
    store: &InMemoryStore,
    search: Arc<dyn MediaSearchPort>,
) -> TestServer {
    TestServer::new(create_app(test_state(store, search))).unwrap()
}
