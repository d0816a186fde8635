/// Post service - handles post creation, retrieval, update and cascade deletion
use crate::db::{comment_repo, like_repo, new_id, post_repo};
use crate::error::{AppError, Result};
use crate::models::Post;
use crate::SERVICE_NAME;
use chrono::Utc;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct PostService {
    pool: SqlitePool,
}

impl PostService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All posts in insertion order
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        let posts = post_repo::list_posts(&self.pool).await?;
        tracing::debug!(count = posts.len(), "Listed posts");
        Ok(posts)
    }

    /// Get a post by ID
    pub async fn get_post(&self, post_id: &str) -> Result<Post> {
        post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Create a new post with zeroed counters
    pub async fn create_post(&self, username: &str, content: &str) -> Result<Post> {
        let mut tx = db_pool::begin_with_metrics(&self.pool, SERVICE_NAME).await?;

        let post = post_repo::insert_post(&mut *tx, &new_id(), username, content, Utc::now())
            .await?;

        tx.commit().await?;

        tracing::info!(post_id = %post.id, username = %post.username, "Post created");
        Ok(post)
    }

    /// Overwrite username and content
    pub async fn update_post(&self, post_id: &str, username: &str, content: &str) -> Result<Post> {
        let post = post_repo::update_post(&self.pool, post_id, username, content, Utc::now())
            .await?
            .ok_or(AppError::NotFound)?;

        tracing::info!(post_id = %post.id, "Post updated");
        Ok(post)
    }

    /// Delete a post together with all of its likes and comments
    ///
    /// Either everything goes or nothing does.
    pub async fn delete_post(&self, post_id: &str) -> Result<()> {
        let mut tx = db_pool::begin_with_metrics(&self.pool, SERVICE_NAME).await?;

        let likes_removed = like_repo::delete_likes_by_post(&mut *tx, post_id).await?;
        let comments_removed = comment_repo::delete_comments_by_post(&mut *tx, post_id).await?;

        if !post_repo::delete_post(&mut *tx, post_id).await? {
            // Nothing to cascade from; dropping `tx` rolls back.
            return Err(AppError::NotFound);
        }

        tx.commit().await?;

        tracing::info!(
            post_id = %post_id,
            likes_removed,
            comments_removed,
            "Post deleted"
        );
        Ok(())
    }
}
