use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use rndm_core::ApiResponse;
use rndm_model::{MediaType, SearchResult};

use crate::infra::{app_state::AppState, errors::AppResult};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub media_type: MediaType,
    pub query: String,
}

/// Free-text media lookup. Upstream failures surface as an empty result
/// list; a blank query short-circuits without an upstream call.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<Vec<SearchResult>>>> {
    let query = params.query.trim();
    if query.is_empty() {
        return Ok(Json(ApiResponse::success(Vec::new())));
    }

    let results = state.search.search(params.media_type, query).await;
    Ok(Json(ApiResponse::success(results)))
}
