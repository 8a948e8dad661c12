use chrono::{DateTime, Utc};

use crate::ids::{EntryId, UserId};
use crate::media_type::MediaType;

/// A user's logged media experience as stored.
///
/// `media_type` is immutable after creation; there is no update operation
/// for entries, only create and delete.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaEntry {
    pub id: EntryId,
    pub user_id: UserId,
    pub media_type: MediaType,
    pub title: String,
    pub creator: String,
    pub cover_url: String,
    pub comment: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

/// Candidate entry submitted for creation. Identifier and creation
/// timestamp are assigned by storage.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewMediaEntry {
    pub user_id: UserId,
    pub media_type: MediaType,
    pub title: String,
    pub creator: String,
    pub cover_url: String,
    pub comment: String,
    pub is_public: bool,
}

/// An entry enriched with read-time derived fields.
///
/// The counters and the viewer flag are computed per read; they are never
/// stored on the base row. `is_liked` is absent when no viewer identity was
/// supplied for the read.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeedEntry {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub entry: MediaEntry,
    pub likes_count: i64,
    pub comments_count: i64,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub is_liked: Option<bool>,
}
