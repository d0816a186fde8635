use crate::models::Post;
use chrono::{DateTime, Utc};
use sqlx::SqliteExecutor;

/// Insert a new post with both counters at zero
pub async fn insert_post<'e, E>(
    executor: E,
    post_id: &str,
    username: &str,
    content: &str,
    now: DateTime<Utc>,
) -> Result<Post, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (id, username, content, created_at, updated_at, likes_count, comments_count)
        VALUES (?1, ?2, ?3, ?4, ?4, 0, 0)
        RETURNING id, username, content, created_at, updated_at, likes_count, comments_count
        "#,
    )
    .bind(post_id)
    .bind(username)
    .bind(content)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(post)
}

/// Find a post by ID
pub async fn find_post_by_id<'e, E>(executor: E, post_id: &str) -> Result<Option<Post>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, username, content, created_at, updated_at, likes_count, comments_count
        FROM posts
        WHERE id = ?1
        "#,
    )
    .bind(post_id)
    .fetch_optional(executor)
    .await?;

    Ok(post)
}

/// All posts in insertion order
pub async fn list_posts<'e, E>(executor: E) -> Result<Vec<Post>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, username, content, created_at, updated_at, likes_count, comments_count
        FROM posts
        ORDER BY rowid ASC
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(posts)
}

pub async fn post_exists<'e, E>(executor: E, post_id: &str) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM posts WHERE id = ?1)")
        .bind(post_id)
        .fetch_one(executor)
        .await?;

    Ok(exists != 0)
}

/// Overwrite username/content and refresh `updated_at`
///
/// Returns `None` when the post does not exist.
pub async fn update_post<'e, E>(
    executor: E,
    post_id: &str,
    username: &str,
    content: &str,
    now: DateTime<Utc>,
) -> Result<Option<Post>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET username = ?2, content = ?3, updated_at = ?4
        WHERE id = ?1
        RETURNING id, username, content, created_at, updated_at, likes_count, comments_count
        "#,
    )
    .bind(post_id)
    .bind(username)
    .bind(content)
    .bind(now)
    .fetch_optional(executor)
    .await?;

    Ok(post)
}

/// Delete the post row itself; children must already be gone
pub async fn delete_post<'e, E>(executor: E, post_id: &str) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM posts WHERE id = ?1")
        .bind(post_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Returns false when the post does not exist
pub async fn increment_comments_count<'e, E>(executor: E, post_id: &str) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("UPDATE posts SET comments_count = comments_count + 1 WHERE id = ?1")
        .bind(post_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Never drops below zero
pub async fn decrement_comments_count<'e, E>(executor: E, post_id: &str) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        "UPDATE posts SET comments_count = MAX(comments_count - 1, 0) WHERE id = ?1",
    )
    .bind(post_id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn increment_likes_count<'e, E>(executor: E, post_id: &str) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("UPDATE posts SET likes_count = likes_count + 1 WHERE id = ?1")
        .bind(post_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}
