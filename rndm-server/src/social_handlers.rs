use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rndm_core::ApiResponse;
use rndm_model::{CommentId, EntryId, LikeState, MediaComment};

use crate::{
    identity::Identity,
    infra::{
        app_state::AppState,
        errors::{AppError, AppResult},
    },
};

#[derive(Debug, Serialize)]
pub struct LikeToggleResponse {
    pub state: LikeState,
    pub liked: bool,
}

/// Flip the caller's like on an entry; reports the state after the flip.
pub async fn toggle_like_handler(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(entry_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<LikeToggleResponse>>> {
    let like_state = state
        .unit_of_work
        .interactions
        .toggle_like(EntryId(entry_id), user)
        .await?;

    Ok(Json(ApiResponse::success(LikeToggleResponse {
        state: like_state,
        liked: like_state.is_liked(),
    })))
}

pub async fn list_comments_handler(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<MediaComment>>>> {
    let comments = state
        .unit_of_work
        .interactions
        .comments(EntryId(entry_id))
        .await?;
    Ok(Json(ApiResponse::success(comments)))
}

#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub content: String,
}

pub async fn add_comment_handler(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(entry_id): Path<Uuid>,
    Json(request): Json<AddCommentRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<MediaComment>>)> {
    let content = request.content.trim();
    if content.is_empty() {
        return Err(AppError::bad_request("Comment must not be empty"));
    }

    let comment = state
        .unit_of_work
        .interactions
        .add_comment(EntryId(entry_id), user, content)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(comment))))
}

/// Ownership-scoped comment delete, mirroring entry deletion: 204 whether
/// or not a row matched.
pub async fn delete_comment_handler(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(comment_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state
        .unit_of_work
        .interactions
        .delete_comment(CommentId(comment_id), user)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
