use serde::Deserialize;

use rndm_model::SearchResult;

use super::{PLACEHOLDER_COVER, SearchError, SearchSettings};

const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

#[derive(Debug, Deserialize)]
struct MultiSearchResponse {
    #[serde(default)]
    results: Vec<MultiSearchHit>,
}

#[derive(Debug, Deserialize)]
struct MultiSearchHit {
    id: i64,
    #[serde(default)]
    media_type: String,
    title: Option<String>,
    name: Option<String>,
    release_date: Option<String>,
    poster_path: Option<String>,
}

/// Movie/TV lookup via the TMDB multi-search endpoint.
pub(super) async fn search(
    client: &reqwest::Client,
    settings: &SearchSettings,
    query: &str,
) -> Result<Vec<SearchResult>, SearchError> {
    let url = format!("{}/search/multi", settings.tmdb_base_url);
    let body = client
        .get(&url)
        .query(&[
            ("api_key", settings.tmdb_api_key.as_str()),
            ("query", query),
            ("include_adult", "false"),
        ])
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let response: MultiSearchResponse = serde_json::from_str(&body)
        .map_err(|e| SearchError::Parse(e.to_string()))?;

    Ok(normalize(response))
}

fn normalize(response: MultiSearchResponse) -> Vec<SearchResult> {
    response
        .results
        .into_iter()
        .filter(|hit| hit.media_type == "movie" || hit.media_type == "tv")
        .map(|hit| {
            let title = hit.title.or(hit.name).unwrap_or_default();
            // Movies carry the release year as the creator column; TV shows
            // get a fixed label, matching what the entry form displays.
            let creator = if hit.media_type == "movie" {
                hit.release_date
                    .as_deref()
                    .and_then(|date| date.split('-').next())
                    .filter(|year| !year.is_empty())
                    .unwrap_or("Unknown")
                    .to_string()
            } else {
                "TV Series".to_string()
            };
            let cover_url = hit
                .poster_path
                .map(|path| format!("{TMDB_IMAGE_BASE}{path}"))
                .unwrap_or_else(|| PLACEHOLDER_COVER.to_string());

            SearchResult {
                id: hit.id.to_string(),
                title,
                creator,
                cover_url,
            }
        })
        .collect()
}
