use async_trait::async_trait;

use rndm_model::{
    EntryId, FeedFilter, FeedPage, MediaEntry, MediaType, NewMediaEntry,
    OwnerStats, UserId,
};

use crate::error::Result;

/// Storage port for the media entry collection.
#[async_trait]
pub trait EntriesRepository: Send + Sync {
    /// Persist a candidate entry and return the stored record including the
    /// generated identifier and creation timestamp.
    async fn create(&self, entry: &NewMediaEntry) -> Result<MediaEntry>;

    /// One page of the public feed, newest first. Entries are enriched with
    /// like and comment counts; when `viewer` is supplied the viewer's
    /// liked flag is populated as well.
    async fn feed(
        &self,
        filter: &FeedFilter,
        viewer: Option<UserId>,
    ) -> Result<FeedPage>;

    /// Raw rows for a single owner, newest first, optionally narrowed to
    /// one media type. No enrichment.
    async fn list_for_owner(
        &self,
        owner: UserId,
        media_type: Option<MediaType>,
    ) -> Result<Vec<MediaEntry>>;

    /// Delete an entry scoped by both identifier and owner. Matching zero
    /// rows is a silent no-op; only storage failures are errors.
    async fn delete(&self, id: EntryId, owner: UserId) -> Result<()>;

    /// Per-media-type entry counts for an owner.
    async fn stats_for_owner(&self, owner: UserId) -> Result<OwnerStats>;
}
