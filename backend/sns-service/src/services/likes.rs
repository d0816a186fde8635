/// Like service - idempotent likes with a denormalized counter
use crate::db::{like_repo, new_id, post_repo};
use crate::error::{AppError, Result};
use crate::models::Like;
use crate::SERVICE_NAME;
use chrono::Utc;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct LikeService {
    pool: SqlitePool,
}

impl LikeService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Like a post on behalf of `username`
    ///
    /// Liking twice is not an error: the existing like comes back unchanged and
    /// the counter is left alone. Returns (Like, was_created).
    pub async fn like_post(&self, post_id: &str, username: &str) -> Result<(Like, bool)> {
        let mut tx = db_pool::begin_with_metrics(&self.pool, SERVICE_NAME).await?;

        let created =
            like_repo::insert_like_if_absent(&mut *tx, &new_id(), post_id, username, Utc::now())
                .await?;

        if created {
            post_repo::increment_likes_count(&mut *tx, post_id).await?;
        }

        // Nothing inserted and nothing found means the post is missing.
        let like = like_repo::find_like(&mut *tx, post_id, username)
            .await?
            .ok_or(AppError::NotFound)?;

        tx.commit().await?;

        if created {
            tracing::info!(post_id = %post_id, username = %username, "Post liked");
        } else {
            tracing::debug!(post_id = %post_id, username = %username, "Post already liked");
        }

        Ok((like, created))
    }

    /// Unlike a post
    ///
    /// The request carries no caller identity, so there is no like to pick:
    /// this only checks that the post exists and never touches likes or
    /// `likes_count`.
    pub async fn unlike_post(&self, post_id: &str) -> Result<()> {
        if !post_repo::post_exists(&self.pool, post_id).await? {
            return Err(AppError::NotFound);
        }

        tracing::debug!(post_id = %post_id, "Unlike without caller identity; no like removed");
        Ok(())
    }
}
