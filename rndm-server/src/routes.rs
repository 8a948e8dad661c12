use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
};
use serde_json::{Value, json};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

use rndm_model::UserId;

use crate::{
    entry_handlers::{
        create_entry_handler, delete_entry_handler, feed_handler,
        list_entries_handler, profile_stats_handler,
    },
    infra::app_state::AppState,
    search_handlers::search_handler,
    social_handlers::{
        add_comment_handler, delete_comment_handler, list_comments_handler,
        toggle_like_handler,
    },
};

pub fn create_app(state: AppState) -> Router {
    let cors_layer = build_cors_layer(&state);

    Router::new()
        .route("/ping", get(ping_handler))
        .route("/health", get(health_handler))
        .nest("/api/v1", api_router())
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/feed", get(feed_handler))
        .route(
            "/entries",
            post(create_entry_handler).get(list_entries_handler),
        )
        .route("/entries/{id}", delete(delete_entry_handler))
        .route("/entries/{id}/like", post(toggle_like_handler))
        .route(
            "/entries/{id}/comments",
            get(list_comments_handler).post(add_comment_handler),
        )
        .route("/comments/{id}", delete(delete_comment_handler))
        .route("/search", get(search_handler))
        .route("/profile/stats", get(profile_stats_handler))
}

fn build_cors_layer(state: &AppState) -> CorsLayer {
    let origins = &state.config.cors.allowed_origins;
    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<axum::http::HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn ping_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "RNDM server is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<Value>, StatusCode> {
    // A stats query for the nil user exercises the database path without
    // touching real rows.
    match state
        .unit_of_work
        .entries
        .stats_for_owner(UserId::nil())
        .await
    {
        Ok(_) => Ok(Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "version": env!("CARGO_PKG_VERSION"),
            "checks": {
                "database": { "status": "healthy" }
            }
        }))),
        Err(err) => {
            error!(error = %err, "Health check failed");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
