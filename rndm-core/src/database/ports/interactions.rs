use async_trait::async_trait;

use rndm_model::{CommentId, EntryId, LikeState, MediaComment, UserId};

use crate::error::Result;

/// Storage port for likes and comments, each scoped to an entry and a user.
#[async_trait]
pub trait InteractionsRepository: Send + Sync {
    /// Flip the user's like state on an entry and report the state the pair
    /// is in afterwards. Safe under concurrent duplicate invocation; the
    /// schema's pair primary key backstops the check-then-act sequence.
    async fn toggle_like(
        &self,
        entry: EntryId,
        user: UserId,
    ) -> Result<LikeState>;

    /// All comments for an entry, oldest first.
    async fn comments(&self, entry: EntryId) -> Result<Vec<MediaComment>>;

    /// Persist a comment and return the stored record including the
    /// generated identifier and timestamp. Content validation is the
    /// caller's contract, not enforced here.
    async fn add_comment(
        &self,
        entry: EntryId,
        author: UserId,
        content: &str,
    ) -> Result<MediaComment>;

    /// Delete a comment scoped by both identifier and author. Matching zero
    /// rows is a silent no-op.
    async fn delete_comment(&self, id: CommentId, author: UserId) -> Result<()>;
}
