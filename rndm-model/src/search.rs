/// Normalized result shape shared by all three upstream lookup paths.
///
/// `id` is the upstream identifier rendered as text; `creator` carries the
/// director/author/artist depending on the media type, with type-specific
/// fallback labels when the upstream omits it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub creator: String,
    pub cover_url: String,
}
