use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use rndm_core::ApiResponse;
use rndm_model::{
    DEFAULT_PAGE_SIZE, EntryId, FeedCursor, FeedFilter, FeedPage, MediaEntry,
    MediaType, NewMediaEntry, OwnerStats, UserId,
};

use crate::{
    identity::{Identity, MaybeIdentity},
    infra::{
        app_state::AppState,
        errors::{AppError, AppResult},
    },
};

#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub media_type: MediaType,
    pub title: String,
    pub creator: String,
    #[serde(default)]
    pub cover_url: String,
    #[serde(default)]
    pub comment: String,
    pub is_public: bool,
}

pub async fn create_entry_handler(
    State(state): State<AppState>,
    Identity(user): Identity,
    Json(request): Json<CreateEntryRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<MediaEntry>>)> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::bad_request("Title must not be empty"));
    }
    let creator = request.creator.trim();
    if creator.is_empty() {
        return Err(AppError::bad_request("Creator must not be empty"));
    }

    let entry = state
        .unit_of_work
        .entries
        .create(&NewMediaEntry {
            user_id: user,
            media_type: request.media_type,
            title: title.to_string(),
            creator: creator.to_string(),
            cover_url: request.cover_url,
            comment: request.comment,
            is_public: request.is_public,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(entry))))
}

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub owner: Option<Uuid>,
    pub cursor: Option<String>,
    pub limit: Option<u32>,
}

/// Public feed, newest first, keyset-paginated. A supplied viewer identity
/// turns on the per-entry `is_liked` flag.
pub async fn feed_handler(
    State(state): State<AppState>,
    MaybeIdentity(viewer): MaybeIdentity,
    Query(query): Query<FeedQuery>,
) -> AppResult<Json<ApiResponse<FeedPage>>> {
    let cursor = query
        .cursor
        .as_deref()
        .map(FeedCursor::decode)
        .transpose()?;

    let filter = FeedFilter {
        owner: query.owner.map(UserId),
        cursor,
        limit: query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    };

    let page = state.unit_of_work.entries.feed(&filter, viewer).await?;
    Ok(Json(ApiResponse::success(page)))
}

#[derive(Debug, Deserialize)]
pub struct ListEntriesQuery {
    pub media_type: Option<MediaType>,
}

/// The identified owner's entries, newest first, optionally narrowed to one
/// media type. Serves the per-category pages and the profile.
pub async fn list_entries_handler(
    State(state): State<AppState>,
    Identity(user): Identity,
    Query(query): Query<ListEntriesQuery>,
) -> AppResult<Json<ApiResponse<Vec<MediaEntry>>>> {
    let entries = state
        .unit_of_work
        .entries
        .list_for_owner(user, query.media_type)
        .await?;
    Ok(Json(ApiResponse::success(entries)))
}

/// Ownership-scoped delete. Responds 204 whether or not a row matched; a
/// mismatched owner is indistinguishable from a missing entry.
pub async fn delete_entry_handler(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state
        .unit_of_work
        .entries
        .delete(EntryId(id), user)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn profile_stats_handler(
    State(state): State<AppState>,
    Identity(user): Identity,
) -> AppResult<Json<ApiResponse<OwnerStats>>> {
    let stats = state.unit_of_work.entries.stats_for_owner(user).await?;
    Ok(Json(ApiResponse::success(stats)))
}
