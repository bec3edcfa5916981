/// Feed Service Library
///
/// A minimal social feed: authenticated identities post short emoji-only
/// messages, any visitor reads the chronological feed. Posts persist in
/// PostgreSQL; author display metadata lives in an external identity
/// directory and is joined in at read time by the feed assembler.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: post, author and feed read-model structures
/// - `services`: write path (`PostService`) and feed assembly (`FeedService`)
/// - `db`: post store trait and Postgres implementation
/// - `directory`: identity directory trait and HTTP client
/// - `validation`: content policy checks for post bodies
/// - `rate_limit`: per-identity posting limits (Redis or in-process)
/// - `middleware`: caller identity extraction, request timing
/// - `error`: error types and HTTP mapping
/// - `config`: configuration management
/// - `metrics`: Prometheus collectors
pub mod config;
pub mod db;
pub mod directory;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod rate_limit;
pub mod services;
pub mod validation;

pub use config::Config;
pub use error::{AppError, Result};
