use chrono::{DateTime, Utc};

use crate::ids::{CommentId, EntryId, UserId};

/// A comment attached to a media entry. Listed oldest-first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaComment {
    pub id: CommentId,
    pub entry_id: EntryId,
    pub user_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Outcome of a like toggle: the state the (entry, user) pair is in after
/// the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LikeState {
    Liked,
    Unliked,
}

impl LikeState {
    pub fn is_liked(&self) -> bool {
        matches!(self, LikeState::Liked)
    }
}
