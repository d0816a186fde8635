//! Environment variable parsing utilities
//!
//! Small helpers shared by the pool and service configuration so nothing
//! needs to `unwrap()` an environment lookup.

use std::fmt::Display;
use std::str::FromStr;

/// Parse an environment variable, defaulting only when it is unset
///
/// # Example
/// ```ignore
/// let port: u16 = parse_env_or_error("SNS_SERVICE_PORT", 8000)?;
/// ```
pub fn parse_env_or_error<T>(key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse()
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(default),
    }
}

/// Parse an optional environment variable
///
/// Unset yields `Ok(None)`; a value that does not parse is an error.
pub fn parse_env_optional<T>(key: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(None),
    }
}
