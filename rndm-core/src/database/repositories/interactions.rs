use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, error, info};
use uuid::Uuid;

use rndm_model::{CommentId, EntryId, LikeState, MediaComment, UserId};

use crate::database::ports::interactions::InteractionsRepository;
use crate::error::{Result, StorageError};

#[derive(Debug, sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    entry_id: Uuid,
    user_id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
}

impl From<CommentRow> for MediaComment {
    fn from(row: CommentRow) -> Self {
        MediaComment {
            id: CommentId(row.id),
            entry_id: EntryId(row.entry_id),
            user_id: UserId(row.user_id),
            content: row.content,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL-backed implementation of the `InteractionsRepository` port.
#[derive(Clone, Debug)]
pub struct PostgresInteractionsRepository {
    pool: PgPool,
}

impl PostgresInteractionsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl InteractionsRepository for PostgresInteractionsRepository {
    async fn toggle_like(
        &self,
        entry: EntryId,
        user: UserId,
    ) -> Result<LikeState> {
        let existing: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM media_likes WHERE entry_id = $1 AND user_id = $2)",
        )
        .bind(entry.to_uuid())
        .bind(user.to_uuid())
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            StorageError::Internal(format!("Failed to check like: {}", e))
        })?;

        if existing {
            sqlx::query(
                "DELETE FROM media_likes WHERE entry_id = $1 AND user_id = $2",
            )
            .bind(entry.to_uuid())
            .bind(user.to_uuid())
            .execute(self.pool())
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to remove like");
                StorageError::Internal(format!("Failed to remove like: {}", e))
            })?;

            debug!("User {} unliked entry {}", user, entry);
            return Ok(LikeState::Unliked);
        }

        // The pair primary key absorbs a lost race between the check above
        // and this insert.
        sqlx::query(
            "INSERT INTO media_likes (entry_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(entry.to_uuid())
        .bind(user.to_uuid())
        .execute(self.pool())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to add like");
            if let Some(db_err) = e.as_database_error() {
                if matches!(
                    db_err.kind(),
                    sqlx::error::ErrorKind::ForeignKeyViolation
                ) {
                    return StorageError::NotFound(format!(
                        "Entry {} does not exist",
                        entry
                    ));
                }
            }
            StorageError::Internal(format!("Failed to add like: {}", e))
        })?;

        debug!("User {} liked entry {}", user, entry);
        Ok(LikeState::Liked)
    }

    async fn comments(&self, entry: EntryId) -> Result<Vec<MediaComment>> {
        let rows: Vec<CommentRow> = sqlx::query_as(
            "SELECT id, entry_id, user_id, content, created_at \
             FROM media_comments WHERE entry_id = $1 \
             ORDER BY created_at ASC, id ASC",
        )
        .bind(entry.to_uuid())
        .fetch_all(self.pool())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to list comments");
            StorageError::Internal(format!("Failed to list comments: {}", e))
        })?;

        Ok(rows.into_iter().map(MediaComment::from).collect())
    }

    async fn add_comment(
        &self,
        entry: EntryId,
        author: UserId,
        content: &str,
    ) -> Result<MediaComment> {
        let row: CommentRow = sqlx::query_as(
            "INSERT INTO media_comments (entry_id, user_id, content) \
             VALUES ($1, $2, $3) \
             RETURNING id, entry_id, user_id, content, created_at",
        )
        .bind(entry.to_uuid())
        .bind(author.to_uuid())
        .bind(content)
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to add comment");
            if let Some(db_err) = e.as_database_error() {
                if matches!(
                    db_err.kind(),
                    sqlx::error::ErrorKind::ForeignKeyViolation
                ) {
                    return StorageError::NotFound(format!(
                        "Entry {} does not exist",
                        entry
                    ));
                }
            }
            StorageError::Internal(format!("Failed to add comment: {}", e))
        })?;

        info!("User {} commented on entry {}", author, entry);
        Ok(row.into())
    }

    async fn delete_comment(
        &self,
        id: CommentId,
        author: UserId,
    ) -> Result<()> {
        let result = sqlx::query(
            "DELETE FROM media_comments WHERE id = $1 AND user_id = $2",
        )
        .bind(id.to_uuid())
        .bind(author.to_uuid())
        .execute(self.pool())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to delete comment");
            StorageError::Internal(format!(
                "Failed to delete comment: {}",
                e
            ))
        })?;

        if result.rows_affected() == 0 {
            debug!(
                "Delete matched no comment for id {} author {}",
                id, author
            );
        }

        Ok(())
    }
}
