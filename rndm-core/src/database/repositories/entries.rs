use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, error, info};
use uuid::Uuid;

use rndm_model::{
    EntryId, FeedCursor, FeedEntry, FeedFilter, FeedPage, MAX_PAGE_SIZE,
    MediaEntry, MediaType, NewMediaEntry, OwnerStats, UserId,
};

use crate::database::ports::entries::EntriesRepository;
use crate::error::{Result, StorageError};

const ENTRY_COLUMNS: &str =
    "id, user_id, media_type, title, creator, cover_url, comment, is_public, created_at";

#[derive(Debug, sqlx::FromRow)]
struct EntryRow {
    id: Uuid,
    user_id: Uuid,
    media_type: i16,
    title: String,
    creator: String,
    cover_url: String,
    comment: String,
    is_public: bool,
    created_at: DateTime<Utc>,
}

impl From<EntryRow> for MediaEntry {
    fn from(row: EntryRow) -> Self {
        MediaEntry {
            id: EntryId(row.id),
            user_id: UserId(row.user_id),
            media_type: MediaType::from(row.media_type),
            title: row.title,
            creator: row.creator,
            cover_url: row.cover_url,
            comment: row.comment,
            is_public: row.is_public,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL-backed implementation of the `EntriesRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresEntriesRepository {
    pool: PgPool,
}

impl PostgresEntriesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Like counts for the given entry id set, one grouped query.
    async fn like_counts(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, i64>> {
        let rows: Vec<(Uuid, i64)> = sqlx::query_as(
            "SELECT entry_id, COUNT(*) FROM media_likes WHERE entry_id = ANY($1) GROUP BY entry_id",
        )
        .bind(ids)
        .fetch_all(self.pool())
        .await
        .map_err(|e| {
            StorageError::Internal(format!("Failed to count likes: {}", e))
        })?;

        Ok(rows.into_iter().collect())
    }

    /// Comment counts for the given entry id set, one grouped query.
    async fn comment_counts(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, i64>> {
        let rows: Vec<(Uuid, i64)> = sqlx::query_as(
            "SELECT entry_id, COUNT(*) FROM media_comments WHERE entry_id = ANY($1) GROUP BY entry_id",
        )
        .bind(ids)
        .fetch_all(self.pool())
        .await
        .map_err(|e| {
            StorageError::Internal(format!("Failed to count comments: {}", e))
        })?;

        Ok(rows.into_iter().collect())
    }

    /// The subset of the given entry ids the viewer has liked.
    async fn liked_by(
        &self,
        ids: &[Uuid],
        viewer: UserId,
    ) -> Result<HashSet<Uuid>> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT entry_id FROM media_likes WHERE user_id = $1 AND entry_id = ANY($2)",
        )
        .bind(viewer.to_uuid())
        .bind(ids)
        .fetch_all(self.pool())
        .await
        .map_err(|e| {
            StorageError::Internal(format!(
                "Failed to load viewer likes: {}",
                e
            ))
        })?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}

#[async_trait]
impl EntriesRepository for PostgresEntriesRepository {
    async fn create(&self, entry: &NewMediaEntry) -> Result<MediaEntry> {
        let row: EntryRow = sqlx::query_as(
            "INSERT INTO media_entries (user_id, media_type, title, creator, cover_url, comment, is_public) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, user_id, media_type, title, creator, cover_url, comment, is_public, created_at",
        )
        .bind(entry.user_id.to_uuid())
        .bind(i16::from(entry.media_type))
        .bind(&entry.title)
        .bind(&entry.creator)
        .bind(&entry.cover_url)
        .bind(&entry.comment)
        .bind(entry.is_public)
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create media entry");
            if let Some(db_err) = e.as_database_error() {
                if matches!(
                    db_err.kind(),
                    sqlx::error::ErrorKind::CheckViolation
                ) {
                    return StorageError::Conflict(
                        "Entry rejected by a storage constraint".to_string(),
                    );
                }
            }
            StorageError::Internal(format!("Failed to create entry: {}", e))
        })?;

        info!("Created media entry {} for user {}", row.id, entry.user_id);
        Ok(row.into())
    }

    async fn feed(
        &self,
        filter: &FeedFilter,
        viewer: Option<UserId>,
    ) -> Result<FeedPage> {
        let limit = filter.limit.clamp(1, MAX_PAGE_SIZE) as i64;

        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {ENTRY_COLUMNS} FROM media_entries WHERE is_public = TRUE"
        ));
        if let Some(owner) = filter.owner {
            query.push(" AND user_id = ");
            query.push_bind(owner.to_uuid());
        }
        if let Some(cursor) = &filter.cursor {
            // Keyset predicate: strictly older than the cursor position in
            // (created_at, id) descending order.
            query.push(" AND (created_at, id) < (");
            query.push_bind(cursor.created_at);
            query.push(", ");
            query.push_bind(cursor.id.to_uuid());
            query.push(")");
        }
        query.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        // One extra row tells us whether another page exists.
        query.push_bind(limit + 1);

        let mut rows: Vec<EntryRow> = query
            .build_query_as()
            .fetch_all(self.pool())
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to load feed page");
                StorageError::Internal(format!("Failed to load feed: {}", e))
            })?;

        let has_more = rows.len() as i64 > limit;
        rows.truncate(limit as usize);

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let (likes, comments, liked) = if ids.is_empty() {
            (HashMap::new(), HashMap::new(), HashSet::new())
        } else {
            let likes = self.like_counts(&ids).await?;
            let comments = self.comment_counts(&ids).await?;
            let liked = match viewer {
                Some(viewer) => self.liked_by(&ids, viewer).await?,
                None => HashSet::new(),
            };
            (likes, comments, liked)
        };

        let next_cursor = if has_more {
            rows.last().map(|last| {
                FeedCursor::new(last.created_at, EntryId(last.id)).encode()
            })
        } else {
            None
        };

        let entries = rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                FeedEntry {
                    likes_count: likes.get(&id).copied().unwrap_or(0),
                    comments_count: comments.get(&id).copied().unwrap_or(0),
                    is_liked: viewer.map(|_| liked.contains(&id)),
                    entry: row.into(),
                }
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
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {ENTRY_COLUMNS} FROM media_entries WHERE user_id = "
        ));
        query.push_bind(owner.to_uuid());
        if let Some(media_type) = media_type {
            query.push(" AND media_type = ");
            query.push_bind(i16::from(media_type));
        }
        query.push(" ORDER BY created_at DESC, id DESC");

        let rows: Vec<EntryRow> = query
            .build_query_as()
            .fetch_all(self.pool())
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to list entries for owner");
                StorageError::Internal(format!(
                    "Failed to list entries: {}",
                    e
                ))
            })?;

        Ok(rows.into_iter().map(MediaEntry::from).collect())
    }

    async fn delete(&self, id: EntryId, owner: UserId) -> Result<()> {
        let result = sqlx::query(
            "DELETE FROM media_entries WHERE id = $1 AND user_id = $2",
        )
        .bind(id.to_uuid())
        .bind(owner.to_uuid())
        .execute(self.pool())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to delete media entry");
            StorageError::Internal(format!("Failed to delete entry: {}", e))
        })?;

        if result.rows_affected() == 0 {
            // Missing row or foreign owner; both are silent no-ops.
            debug!("Delete matched no entry for id {} owner {}", id, owner);
        } else {
            info!("Deleted media entry {} for user {}", id, owner);
        }

        Ok(())
    }

    async fn stats_for_owner(&self, owner: UserId) -> Result<OwnerStats> {
        let rows: Vec<(i16, i64)> = sqlx::query_as(
            "SELECT media_type, COUNT(*) FROM media_entries WHERE user_id = $1 GROUP BY media_type",
        )
        .bind(owner.to_uuid())
        .fetch_all(self.pool())
        .await
        .map_err(|e| {
            StorageError::Internal(format!("Failed to load stats: {}", e))
        })?;

        let mut stats = OwnerStats::default();
        for (media_type, count) in rows {
            match MediaType::from(media_type) {
                MediaType::Movie => stats.movies = count,
                MediaType::Book => stats.books = count,
                MediaType::Music => stats.music = count,
            }
            stats.total += count;
        }

        Ok(stats)
    }
}
