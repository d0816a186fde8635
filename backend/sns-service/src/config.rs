/// Configuration management for SNS Service
///
/// Loads configuration from environment variables (after an optional `.env`
/// file has been read by the binary).
use db_pool::env_utils::{parse_env_optional, parse_env_or_error};
use db_pool::DbConfig;
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Pool configuration (`DATABASE_URL`, `DB_*`); kept out of serialized
    /// output because it carries the database location
    #[serde(skip)]
    pub database: DbConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
    /// HTTP worker count; actix picks one per core when unset
    pub workers: Option<usize>,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins, `*` for any
    pub allowed_origins: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Ok(Config {
            app: AppConfig {
                env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                host: std::env::var("SNS_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or_error("SNS_SERVICE_PORT", 8000)?,
                workers: parse_workers()?,
            },
            cors: CorsConfig {
                allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "*".to_string()),
            },
            database: DbConfig::from_env(crate::SERVICE_NAME)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}

fn parse_workers() -> Result<Option<usize>, String> {
    match parse_env_optional::<usize>("HTTP_WORKERS")? {
        Some(0) => Err("HTTP_WORKERS must be at least 1".to_string()),
        workers => Ok(workers),
    }
}

impl CorsConfig {
    /// Individual origins, or `None` when every origin is allowed
    pub fn origins(&self) -> Option<Vec<&str>> {
        let origins: Vec<&str> = self
            .allowed_origins
            .split(',')
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .collect();

        if origins.is_empty() || origins.contains(&"*") {
            None
        } else {
            Some(origins)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear_env() {
        for key in [
            "APP_ENV",
            "SNS_SERVICE_HOST",
            "SNS_SERVICE_PORT",
            "HTTP_WORKERS",
            "CORS_ALLOWED_ORIGINS",
            "DATABASE_URL",
            "DB_MAX_CONNECTIONS",
            "DB_MIN_CONNECTIONS",
            "DB_BUSY_TIMEOUT_MS",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial_test::serial]
    fn test_default_values() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert_eq!(config.app.env, "development");
        assert_eq!(config.app.host, "0.0.0.0");
        assert_eq!(config.app.port, 8000);
        assert_eq!(config.app.workers, None);
        assert_eq!(config.cors.allowed_origins, "*");
        assert_eq!(config.database.service_name, crate::SERVICE_NAME);
        assert_eq!(config.database.database_url, db_pool::DEFAULT_DATABASE_URL);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.busy_timeout_ms, 5_000);
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
    }

    #[test]
    #[serial_test::serial]
    fn test_overrides() {
        clear_env();
        std::env::set_var("SNS_SERVICE_PORT", "9090");
        std::env::set_var("HTTP_WORKERS", "2");
        std::env::set_var("DATABASE_URL", "sqlite::memory:");
        std::env::set_var("DB_MAX_CONNECTIONS", "4");

        let config = Config::from_env().unwrap();
        assert_eq!(config.app.port, 9090);
        assert_eq!(config.app.workers, Some(2));
        assert_eq!(config.database.database_url, "sqlite::memory:");
        assert_eq!(config.database.max_connections, 4);

        clear_env();
    }

    #[test]
    #[serial_test::serial]
    fn test_invalid_port_is_an_error() {
        clear_env();
        std::env::set_var("SNS_SERVICE_PORT", "http");

        let err = Config::from_env().unwrap_err();
        assert!(err.contains("SNS_SERVICE_PORT"));

        clear_env();
    }

    #[test]
    #[serial_test::serial]
    fn test_invalid_workers_is_an_error() {
        for value in ["four", "0"] {
            clear_env();
            std::env::set_var("HTTP_WORKERS", value);

            let err = Config::from_env().unwrap_err();
            assert!(err.contains("HTTP_WORKERS"), "{value}: {err}");
        }

        clear_env();
    }

    #[test]
    #[serial_test::serial]
    fn test_invalid_pool_setting_is_an_error() {
        clear_env();
        std::env::set_var("DB_BUSY_TIMEOUT_MS", "soon");

        let err = Config::from_env().unwrap_err();
        assert!(err.contains("DB_BUSY_TIMEOUT_MS"));

        clear_env();
    }

    #[test]
    fn test_serialized_config_omits_database() {
        let mut config = Config {
            app: AppConfig {
                env: "test".to_string(),
                host: "127.0.0.1".to_string(),
                port: 8000,
                workers: None,
            },
            cors: CorsConfig {
                allowed_origins: "*".to_string(),
            },
            database: DbConfig::in_memory(crate::SERVICE_NAME),
        };
        config.database.database_url = "sqlite:///srv/private/sns.db".to_string();

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("private"));
    }

    #[test]
    fn test_cors_origins() {
        let any = CorsConfig {
            allowed_origins: "*".to_string(),
        };
        assert!(any.origins().is_none());

        let list = CorsConfig {
            allowed_origins: "http://a.test, http://b.test,".to_string(),
        };
        assert_eq!(
            list.origins(),
            Some(vec!["http://a.test", "http://b.test"])
        );
    }
}
