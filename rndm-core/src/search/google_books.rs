use serde::Deserialize;

use rndm_model::SearchResult;

use super::{PLACEHOLDER_COVER, SearchError, SearchSettings};

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    items: Option<Vec<Volume>>,
}

#[derive(Debug, Deserialize)]
struct Volume {
    id: String,
    #[serde(rename = "volumeInfo", default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
struct VolumeInfo {
    #[serde(default)]
    title: String,
    authors: Option<Vec<String>>,
    #[serde(rename = "imageLinks")]
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

/// Book lookup via the Google Books volumes endpoint.
pub(super) async fn search(
    client: &reqwest::Client,
    settings: &SearchSettings,
    query: &str,
) -> Result<Vec<SearchResult>, SearchError> {
    let url = format!("{}/volumes", settings.google_books_base_url);
    let body = client
        .get(&url)
        .query(&[
            ("q", query),
            ("maxResults", &settings.result_limit.to_string()),
        ])
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let response: VolumesResponse = serde_json::from_str(&body)
        .map_err(|e| SearchError::Parse(e.to_string()))?;

    Ok(normalize(response))
}

fn normalize(response: VolumesResponse) -> Vec<SearchResult> {
    response
        .items
        .unwrap_or_default()
        .into_iter()
        .map(|volume| {
            let creator = volume
                .volume_info
                .authors
                .and_then(|authors| authors.into_iter().next())
                .unwrap_or_else(|| "Unknown Author".to_string());
            let cover_url = volume
                .volume_info
                .image_links
                .and_then(|links| links.thumbnail)
                .unwrap_or_else(|| PLACEHOLDER_COVER.to_string());

            SearchResult {
                id: volume.id,
                title: volume.volume_info.title,
                creator,
                cover_url,
            }
        })
        .collect()
}
