use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use rndm_model::{MediaType, SearchResult};

use super::{MediaSearchPort, SearchError, SearchSettings, google_books, itunes, tmdb};

/// Production search adapter: dispatches on the media-type discriminator to
/// one of the three upstream lookup paths over a shared HTTP client.
#[derive(Debug, Clone)]
pub struct SearchAdapter {
    client: reqwest::Client,
    settings: SearchSettings,
}

impl SearchAdapter {
    pub fn new(settings: SearchSettings) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self { client, settings })
    }
}

#[async_trait]
impl MediaSearchPort for SearchAdapter {
    async fn search(&self, media_type: MediaType, query: &str) -> Vec<SearchResult> {
        let outcome = match media_type {
            MediaType::Movie => {
                tmdb::search(&self.client, &self.settings, query).await
            }
            MediaType::Book => {
                google_books::search(&self.client, &self.settings, query).await
            }
            MediaType::Music => {
                itunes::search(&self.client, &self.settings, query).await
            }
        };

        match outcome {
            Ok(results) => results,
            Err(err) => {
                warn!(
                    media_type = %media_type,
                    error = %err,
                    "Media search failed; returning no results"
                );
                Vec::new()
            }
        }
    }
}
