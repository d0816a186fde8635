//! Simple social media service: posts, comments and likes over HTTP/JSON.
//!
//! Every post carries denormalized `likes_count` and `comments_count`
//! counters that are updated in the same transaction as the child rows.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod openapi;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};

/// Name used for pool metrics and health responses
pub const SERVICE_NAME: &str = "sns-service";
