/// Database access layer
///
/// This module provides:
/// - Store initialization (pool + embedded schema)
/// - Repository functions for posts, comments and likes
///
/// Repository functions accept any SQLite executor, so callers choose between
/// the shared pool and an open transaction.
use anyhow::Context;
use db_pool::DbConfig;
use sqlx::migrate::Migrator;
use sqlx::SqlitePool;

pub mod comment_repo;
pub mod like_repo;
pub mod post_repo;

/// Schema for posts, comments and likes, embedded at compile time
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open the pool described by `config` and make sure the schema exists
pub async fn init_store(config: DbConfig) -> anyhow::Result<SqlitePool> {
    config.log_config();

    let pool = db_pool::create_pool(config)
        .await
        .context("Failed to create database pool")?;

    db_pool::migrate(&pool, &MIGRATOR)
        .await
        .context("Failed to apply database schema")?;

    Ok(pool)
}

/// Fresh identifier for a new row
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
