//! Database connection pool management
//!
//! Builds the SQLite pool every service shares for the lifetime of the
//! process, applies embedded migrations and keeps pool gauges up to date.

pub mod env_utils;
mod metrics;

use metrics::update_pool_metrics;
pub use metrics::begin_with_metrics;

use env_utils::parse_env_or_error;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info};

/// Default store location, matching the service's on-disk database name
pub const DEFAULT_DATABASE_URL: &str = "sqlite://sns_api.db?mode=rwc";

/// Database connection pool configuration
#[derive(Clone)]
pub struct DbConfig {
    /// Service name for metrics labeling
    pub service_name: String,
    /// SQLite connection URL (`sqlite://path.db` or `sqlite::memory:`)
    pub database_url: String,
    /// Maximum number of connections
    pub max_connections: u32,
    /// Minimum number of connections
    pub min_connections: u32,
    /// Time allowed for the startup verification query
    pub connect_timeout_secs: u64,
    /// Connection acquisition timeout (get connection from pool)
    pub acquire_timeout_secs: u64,
    /// Connection idle timeout
    pub idle_timeout_secs: u64,
    /// Connection maximum lifetime
    pub max_lifetime_secs: u64,
    /// How long a writer waits on a locked database before failing
    pub busy_timeout_ms: u64,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("service_name", &self.service_name)
            .field("database_url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .field("idle_timeout_secs", &self.idle_timeout_secs)
            .field("max_lifetime_secs", &self.max_lifetime_secs)
            .field("busy_timeout_ms", &self.busy_timeout_ms)
            .finish()
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            service_name: String::from("unknown"),
            database_url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 5,
            acquire_timeout_secs: 10,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
            busy_timeout_ms: 5_000,
        }
    }
}

impl DbConfig {
    /// Create a new DbConfig from environment variables
    ///
    /// `DATABASE_URL` falls back to the on-disk default. Every tuning knob
    /// falls back to its default when unset but is rejected when set to
    /// something that does not parse.
    pub fn from_env(service_name: &str) -> Result<Self, String> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let defaults = Self::default();

        let config = Self {
            service_name: service_name.to_string(),
            database_url,
            max_connections: parse_env_or_error("DB_MAX_CONNECTIONS", defaults.max_connections)?,
            min_connections: parse_env_or_error("DB_MIN_CONNECTIONS", defaults.min_connections)?,
            connect_timeout_secs: parse_env_or_error(
                "DB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            acquire_timeout_secs: parse_env_or_error(
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout_secs,
            )?,
            idle_timeout_secs: parse_env_or_error(
                "DB_IDLE_TIMEOUT_SECS",
                defaults.idle_timeout_secs,
            )?,
            max_lifetime_secs: parse_env_or_error(
                "DB_MAX_LIFETIME_SECS",
                defaults.max_lifetime_secs,
            )?,
            busy_timeout_ms: parse_env_or_error("DB_BUSY_TIMEOUT_MS", defaults.busy_timeout_ms)?,
        };

        if config.min_connections > config.max_connections {
            return Err(format!(
                "DB_MIN_CONNECTIONS ({}) exceeds DB_MAX_CONNECTIONS ({})",
                config.min_connections, config.max_connections
            ));
        }

        Ok(config)
    }

    /// Private in-memory database, mostly useful for tests
    pub fn in_memory(service_name: &str) -> Self {
        Self {
            service_name: service_name.to_string(),
            database_url: "sqlite::memory:".to_string(),
            ..Self::default()
        }
    }

    /// An in-memory database lives exactly as long as its connection
    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }

    /// Log pool configuration details
    pub fn log_config(&self) {
        info!(
            "Database Pool Configuration: \
             max_connections={}, min_connections={}, \
             connect_timeout={}s, acquire_timeout={}s, idle_timeout={}s, max_lifetime={}s, \
             busy_timeout={}ms, in_memory={}",
            self.max_connections,
            self.min_connections,
            self.connect_timeout_secs,
            self.acquire_timeout_secs,
            self.idle_timeout_secs,
            self.max_lifetime_secs,
            self.busy_timeout_ms,
            self.is_in_memory()
        );
    }
}

/// Create a SQLite connection pool with automatic metrics monitoring
pub async fn create_pool(config: DbConfig) -> Result<SqlitePool, sqlx::Error> {
    debug!(
        "Creating database pool: service={}, max={}, min={}, \
         acquire_timeout={}s, verify_timeout={}s, idle_timeout={}s",
        config.service_name,
        config.max_connections,
        config.min_connections,
        config.acquire_timeout_secs,
        config.connect_timeout_secs,
        config.idle_timeout_secs
    );

    let connect_options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms));

    let pool_options = SqlitePoolOptions::new()
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .test_before_acquire(true);

    // Every new connection to `:memory:` opens a fresh, empty database, so the
    // pool is pinned to one connection that is never recycled.
    let pool_options = if config.is_in_memory() {
        pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        pool_options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
    };

    let pool = pool_options.connect_with(connect_options).await?;

    // Verify connection with connect timeout
    match tokio::time::timeout(
        Duration::from_secs(config.connect_timeout_secs),
        sqlx::query("SELECT 1").execute(&pool),
    )
    .await
    {
        Ok(Ok(_)) => {
            info!(
                service = %config.service_name,
                "Database pool created and verified successfully"
            );

            update_pool_metrics(&pool, &config.service_name);

            if !config.is_in_memory() {
                let pool_clone = pool.clone();
                let service = config.service_name.clone();
                tokio::spawn(async move {
                    let mut interval = tokio::time::interval(Duration::from_secs(30));
                    loop {
                        interval.tick().await;
                        if pool_clone.is_closed() {
                            debug!(service = %service, "Pool closed, stopping metrics updater");
                            break;
                        }
                        update_pool_metrics(&pool_clone, &service);
                    }
                });
            }

            Ok(pool)
        }
        Ok(Err(e)) => {
            error!(
                service = %config.service_name,
                error = %e,
                "Database connection verification failed"
            );
            Err(e)
        }
        Err(_) => {
            error!(
                service = %config.service_name,
                timeout_secs = config.connect_timeout_secs,
                "Database connection verification timeout"
            );
            Err(sqlx::Error::Io(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "Database verification timeout",
            )))
        }
    }
}

/// Apply a service's embedded migrations
pub async fn migrate(pool: &SqlitePool, migrator: &Migrator) -> Result<(), MigrateError> {
    debug!(
        migrations = migrator.iter().count(),
        "Running database migrations"
    );

    migrator.run(pool).await?;

    info!("Database migrations completed successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear_db_env() {
        for key in [
            "DATABASE_URL",
            "DB_MAX_CONNECTIONS",
            "DB_MIN_CONNECTIONS",
            "DB_CONNECT_TIMEOUT_SECS",
            "DB_ACQUIRE_TIMEOUT_SECS",
            "DB_IDLE_TIMEOUT_SECS",
            "DB_MAX_LIFETIME_SECS",
            "DB_BUSY_TIMEOUT_MS",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_debug_redacts_url() {
        let config = DbConfig {
            database_url: "sqlite:///secret/location.db".to_string(),
            ..DbConfig::default()
        };

        let rendered = format!("{:?}", config);
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    #[serial_test::serial]
    fn test_config_from_env_default_url() {
        clear_db_env();

        let config = DbConfig::from_env("sns-service").unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert!(!config.is_in_memory());
    }

    #[test]
    #[serial_test::serial]
    fn test_config_from_env_defaults() {
        clear_db_env();
        std::env::set_var("DATABASE_URL", "sqlite://test.db");

        let config = DbConfig::from_env("sns-service").unwrap();
        assert_eq!(config.service_name, "sns-service");
        assert_eq!(config.database_url, "sqlite://test.db");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.busy_timeout_ms, 5_000);

        clear_db_env();
    }

    #[test]
    #[serial_test::serial]
    fn test_config_from_env_rejects_garbage() {
        clear_db_env();
        std::env::set_var("DATABASE_URL", "sqlite://test.db");
        std::env::set_var("DB_MAX_CONNECTIONS", "lots");

        let err = DbConfig::from_env("sns-service").unwrap_err();
        assert!(err.contains("DB_MAX_CONNECTIONS"));

        clear_db_env();
    }

    #[test]
    #[serial_test::serial]
    fn test_config_from_env_rejects_bad_timeouts() {
        for key in [
            "DB_MIN_CONNECTIONS",
            "DB_CONNECT_TIMEOUT_SECS",
            "DB_ACQUIRE_TIMEOUT_SECS",
            "DB_IDLE_TIMEOUT_SECS",
            "DB_MAX_LIFETIME_SECS",
            "DB_BUSY_TIMEOUT_MS",
        ] {
            clear_db_env();
            std::env::set_var(key, "soon");

            let err = DbConfig::from_env("sns-service").unwrap_err();
            assert!(err.contains(key), "{key}: {err}");
        }

        clear_db_env();
    }

    #[test]
    #[serial_test::serial]
    fn test_config_from_env_rejects_min_above_max() {
        clear_db_env();
        std::env::set_var("DB_MAX_CONNECTIONS", "2");
        std::env::set_var("DB_MIN_CONNECTIONS", "5");

        let err = DbConfig::from_env("sns-service").unwrap_err();
        assert!(err.contains("DB_MIN_CONNECTIONS"));

        clear_db_env();
    }

    #[test]
    fn test_in_memory_detection() {
        assert!(DbConfig::in_memory("t").is_in_memory());
        assert!(DbConfig {
            database_url: "sqlite:file:shared?mode=memory&cache=shared".to_string(),
            ..DbConfig::default()
        }
        .is_in_memory());
        assert!(!DbConfig {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            ..DbConfig::default()
        }
        .is_in_memory());
    }

    #[tokio::test]
    async fn test_in_memory_pool_keeps_state() {
        let pool = create_pool(DbConfig::in_memory("db-pool-test")).await.unwrap();

        sqlx::query("CREATE TABLE t (v INTEGER)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO t (v) VALUES (1)")
            .execute(&pool)
            .await
            .unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM t")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(pool.size(), 1);
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let pool = create_pool(DbConfig::in_memory("db-pool-test")).await.unwrap();

        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(enabled, 1);
    }
}
