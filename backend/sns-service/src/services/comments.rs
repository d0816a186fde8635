/// Comment service - handles comment creation, retrieval, and management
///
/// A comment is only ever addressed through its own post: asking for it under
/// a different post id is reported as not found.
use crate::db::{comment_repo, new_id, post_repo};
use crate::error::{AppError, Result};
use crate::models::Comment;
use crate::SERVICE_NAME;
use chrono::Utc;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct CommentService {
    pool: SqlitePool,
}

impl CommentService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get comments for a post in insertion order
    pub async fn list_comments(&self, post_id: &str) -> Result<Vec<Comment>> {
        if !post_repo::post_exists(&self.pool, post_id).await? {
            return Err(AppError::NotFound);
        }

        let comments = comment_repo::list_comments_by_post(&self.pool, post_id).await?;
        tracing::debug!(post_id = %post_id, count = comments.len(), "Listed comments");
        Ok(comments)
    }

    /// Get a single comment of a post
    pub async fn get_comment(&self, post_id: &str, comment_id: &str) -> Result<Comment> {
        // The foreign key guarantees a matching comment implies a live post.
        comment_repo::find_comment_for_post(&self.pool, post_id, comment_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Create a new comment and bump the post's comment counter
    pub async fn create_comment(
        &self,
        post_id: &str,
        username: &str,
        content: &str,
    ) -> Result<Comment> {
        let mut tx = db_pool::begin_with_metrics(&self.pool, SERVICE_NAME).await?;

        // Counter first: the write lock is taken before anything is read, and
        // a missing post shows up as zero affected rows.
        if !post_repo::increment_comments_count(&mut *tx, post_id).await? {
            return Err(AppError::NotFound);
        }

        let comment =
            comment_repo::insert_comment(&mut *tx, &new_id(), post_id, username, content, Utc::now())
                .await?;

        tx.commit().await?;

        tracing::info!(post_id = %post_id, comment_id = %comment.id, "Comment created");
        Ok(comment)
    }

    /// Overwrite username and content of a comment
    pub async fn update_comment(
        &self,
        post_id: &str,
        comment_id: &str,
        username: &str,
        content: &str,
    ) -> Result<Comment> {
        let comment = comment_repo::update_comment(
            &self.pool,
            post_id,
            comment_id,
            username,
            content,
            Utc::now(),
        )
        .await?
        .ok_or(AppError::NotFound)?;

        tracing::info!(post_id = %post_id, comment_id = %comment_id, "Comment updated");
        Ok(comment)
    }

    /// Delete a comment and drop the post's comment counter
    pub async fn delete_comment(&self, post_id: &str, comment_id: &str) -> Result<()> {
        let mut tx = db_pool::begin_with_metrics(&self.pool, SERVICE_NAME).await?;

        if !comment_repo::delete_comment(&mut *tx, post_id, comment_id).await? {
            return Err(AppError::NotFound);
        }

        post_repo::decrement_comments_count(&mut *tx, post_id).await?;

        tx.commit().await?;

        tracing::info!(post_id = %post_id, comment_id = %comment_id, "Comment deleted");
        Ok(())
    }
}
