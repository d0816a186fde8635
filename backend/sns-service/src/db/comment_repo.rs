use crate::models::Comment;
use chrono::{DateTime, Utc};
use sqlx::SqliteExecutor;

/// Create a new comment on a post
pub async fn insert_comment<'e, E>(
    executor: E,
    comment_id: &str,
    post_id: &str,
    username: &str,
    content: &str,
    now: DateTime<Utc>,
) -> Result<Comment, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (id, post_id, username, content, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?5)
        RETURNING id, post_id, username, content, created_at, updated_at
        "#,
    )
    .bind(comment_id)
    .bind(post_id)
    .bind(username)
    .bind(content)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(comment)
}

/// Get a comment only if it belongs to `post_id`
pub async fn find_comment_for_post<'e, E>(
    executor: E,
    post_id: &str,
    comment_id: &str,
) -> Result<Option<Comment>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, username, content, created_at, updated_at
        FROM comments
        WHERE id = ?1 AND post_id = ?2
        "#,
    )
    .bind(comment_id)
    .bind(post_id)
    .fetch_optional(executor)
    .await?;

    Ok(comment)
}

/// Get all comments for a post in insertion order
pub async fn list_comments_by_post<'e, E>(
    executor: E,
    post_id: &str,
) -> Result<Vec<Comment>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, username, content, created_at, updated_at
        FROM comments
        WHERE post_id = ?1
        ORDER BY rowid ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(executor)
    .await?;

    Ok(comments)
}

/// Update comment username/content
///
/// Returns `None` when no comment with this id belongs to `post_id`.
pub async fn update_comment<'e, E>(
    executor: E,
    post_id: &str,
    comment_id: &str,
    username: &str,
    content: &str,
    now: DateTime<Utc>,
) -> Result<Option<Comment>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        UPDATE comments
        SET username = ?3, content = ?4, updated_at = ?5
        WHERE id = ?1 AND post_id = ?2
        RETURNING id, post_id, username, content, created_at, updated_at
        "#,
    )
    .bind(comment_id)
    .bind(post_id)
    .bind(username)
    .bind(content)
    .bind(now)
    .fetch_optional(executor)
    .await?;

    Ok(comment)
}

pub async fn delete_comment<'e, E>(
    executor: E,
    post_id: &str,
    comment_id: &str,
) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM comments WHERE id = ?1 AND post_id = ?2")
        .bind(comment_id)
        .bind(post_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove every comment of a post, returning how many went
pub async fn delete_comments_by_post<'e, E>(executor: E, post_id: &str) -> Result<u64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM comments WHERE post_id = ?1")
        .bind(post_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

/// Count comments for a post
pub async fn count_comments_by_post<'e, E>(executor: E, post_id: &str) -> Result<i64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = ?1")
        .bind(post_id)
        .fetch_one(executor)
        .await?;

    Ok(count)
}
