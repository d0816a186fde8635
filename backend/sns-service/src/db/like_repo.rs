use crate::models::Like;
use chrono::{DateTime, Utc};
use sqlx::SqliteExecutor;

/// Insert a like unless `(post_id, username)` already has one or the post is gone
///
/// Returns true only when a new row was written. Relies on the unique index,
/// so concurrent duplicate likes cannot both succeed.
pub async fn insert_like_if_absent<'e, E>(
    executor: E,
    like_id: &str,
    post_id: &str,
    username: &str,
    now: DateTime<Utc>,
) -> Result<bool, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO likes (id, post_id, username, liked_at)
        SELECT ?1, ?2, ?3, ?4
        WHERE EXISTS (SELECT 1 FROM posts WHERE id = ?2)
        ON CONFLICT (post_id, username) DO NOTHING
        "#,
    )
    .bind(like_id)
    .bind(post_id)
    .bind(username)
    .bind(now)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Find the like a username left on a post
pub async fn find_like<'e, E>(
    executor: E,
    post_id: &str,
    username: &str,
) -> Result<Option<Like>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let like = sqlx::query_as::<_, Like>(
        r#"
        SELECT id, post_id, username, liked_at
        FROM likes
        WHERE post_id = ?1 AND username = ?2
        "#,
    )
    .bind(post_id)
    .bind(username)
    .fetch_optional(executor)
    .await?;

    Ok(like)
}

/// Remove every like of a post, returning how many went
pub async fn delete_likes_by_post<'e, E>(executor: E, post_id: &str) -> Result<u64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM likes WHERE post_id = ?1")
        .bind(post_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

/// Count total likes for a post
pub async fn count_likes_by_post<'e, E>(executor: E, post_id: &str) -> Result<i64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = ?1")
        .bind(post_id)
        .fetch_one(executor)
        .await?;

    Ok(count)
}
