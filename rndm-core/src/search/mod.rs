//! Free-text media lookup against three independent upstream services,
//! normalized into one result shape.

mod adapter;
mod google_books;
mod itunes;
mod tmdb;

pub use adapter::SearchAdapter;

use async_trait::async_trait;
use serde::Deserialize;

use rndm_model::{MediaType, SearchResult};

/// Cover asset served when an upstream result carries no artwork.
pub const PLACEHOLDER_COVER: &str = "/placeholder.svg?height=200&width=150";

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Outbound port for free-text media lookup.
///
/// Implementations fail soft: an upstream failure surfaces to the caller as
/// an empty result list, never as an error.
#[async_trait]
pub trait MediaSearchPort: Send + Sync {
    async fn search(&self, media_type: MediaType, query: &str) -> Vec<SearchResult>;
}

/// Upstream endpoints and knobs for the production adapter. Base URLs are
/// overridable so deployments and tests can point elsewhere.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub google_books_base_url: String,
    pub itunes_base_url: String,
    pub request_timeout_secs: u64,
    pub result_limit: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            tmdb_api_key: String::new(),
            tmdb_base_url: "https://api.themoviedb.org/3".to_string(),
            google_books_base_url: "https://www.googleapis.com/books/v1"
                .to_string(),
            itunes_base_url: "https://itunes.apple.com".to_string(),
            request_timeout_secs: 10,
            result_limit: 5,
        }
    }
}
