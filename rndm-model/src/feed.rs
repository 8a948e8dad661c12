use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entry::FeedEntry;
use crate::error::{ModelError, Result};
use crate::ids::{EntryId, UserId};

/// Page size applied when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Hard upper bound on a single feed page.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Keyset position in the feed's `(created_at, id)` descending order.
///
/// Serialized as an opaque token so callers cannot depend on its shape.
/// Timestamps travel as microseconds, which matches Postgres `timestamptz`
/// precision, so a round-tripped cursor compares equal to the row it came
/// from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedCursor {
    pub created_at: DateTime<Utc>,
    pub id: EntryId,
}

impl FeedCursor {
    pub fn new(created_at: DateTime<Utc>, id: EntryId) -> Self {
        Self { created_at, id }
    }

    /// Encode as an opaque URL-safe token.
    pub fn encode(&self) -> String {
        let raw = format!("{}:{}", self.created_at.timestamp_micros(), self.id);
        URL_SAFE_NO_PAD.encode(raw)
    }

    /// Decode a token produced by [`FeedCursor::encode`].
    pub fn decode(token: &str) -> Result<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|e| ModelError::InvalidCursor(e.to_string()))?;
        let raw = String::from_utf8(bytes)
            .map_err(|e| ModelError::InvalidCursor(e.to_string()))?;
        let (micros, id) = raw
            .split_once(':')
            .ok_or_else(|| ModelError::InvalidCursor("missing separator".to_string()))?;
        let micros: i64 = micros
            .parse()
            .map_err(|_| ModelError::InvalidCursor("bad timestamp".to_string()))?;
        let created_at = DateTime::<Utc>::from_timestamp_micros(micros)
            .ok_or_else(|| ModelError::InvalidCursor("timestamp out of range".to_string()))?;
        let id = Uuid::parse_str(id)
            .map_err(|e| ModelError::InvalidCursor(e.to_string()))?;
        Ok(Self {
            created_at,
            id: EntryId(id),
        })
    }
}

/// Filter for a feed read. Visibility is fixed to public; the owner filter
/// narrows the feed to one user's public entries.
#[derive(Debug, Clone, Default)]
pub struct FeedFilter {
    pub owner: Option<UserId>,
    pub cursor: Option<FeedCursor>,
    pub limit: u32,
}

/// One page of the feed plus the token for the next, older page.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeedPage {
    pub entries: Vec<FeedEntry>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub next_cursor: Option<String>,
}
