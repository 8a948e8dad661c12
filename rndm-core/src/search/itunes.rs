use serde::Deserialize;

use rndm_model::SearchResult;

use super::{PLACEHOLDER_COVER, SearchError, SearchSettings};

#[derive(Debug, Deserialize)]
struct AlbumSearchResponse {
    #[serde(default)]
    results: Vec<Album>,
}

#[derive(Debug, Deserialize)]
struct Album {
    #[serde(rename = "collectionId")]
    collection_id: i64,
    #[serde(rename = "collectionName", default)]
    collection_name: String,
    #[serde(rename = "artistName", default)]
    artist_name: String,
    #[serde(rename = "artworkUrl100")]
    artwork_url: Option<String>,
}

/// Album lookup via the iTunes search endpoint.
pub(super) async fn search(
    client: &reqwest::Client,
    settings: &SearchSettings,
    query: &str,
) -> Result<Vec<SearchResult>, SearchError> {
    let url = format!("{}/search", settings.itunes_base_url);
    let body = client
        .get(&url)
        .query(&[
            ("term", query),
            ("entity", "album"),
            ("limit", &settings.result_limit.to_string()),
        ])
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let response: AlbumSearchResponse = serde_json::from_str(&body)
        .map_err(|e| SearchError::Parse(e.to_string()))?;

    Ok(normalize(response))
}

fn normalize(response: AlbumSearchResponse) -> Vec<SearchResult> {
    response
        .results
        .into_iter()
        .map(|album| SearchResult {
            id: album.collection_id.to_string(),
            title: album.collection_name,
            creator: album.artist_name,
            cover_url: album
                .artwork_url
                .unwrap_or_else(|| PLACEHOLDER_COVER.to_string()),
        })
        .collect()
}
