#![allow(dead_code)]

use db_pool::DbConfig;
use sqlx::SqlitePool;

/// Fresh in-memory store with the schema applied
pub async fn memory_store() -> SqlitePool {
    sns_service::db::init_store(DbConfig::in_memory("sns-service-test"))
        .await
        .expect("init in-memory store")
}

/// File-backed store that allows several connections at once
pub async fn file_store(dir: &tempfile::TempDir, max_connections: u32) -> SqlitePool {
    let config = DbConfig {
        service_name: "sns-service-test".to_string(),
        database_url: format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("sns_test.db").display()
        ),
        max_connections,
        ..DbConfig::default()
    };

    sns_service::db::init_store(config)
        .await
        .expect("init file store")
}

/// Build the service under test around `$pool`
#[macro_export]
macro_rules! test_app {
    ($pool:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($pool.clone()))
                .configure(sns_service::handlers::configure_routes),
        )
        .await
    };
}
