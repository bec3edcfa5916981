/// Configuration management for feed-service
///
/// Loads configuration from environment variables with development
/// defaults. Policy values the core depends on (content bounds, rate-limit
/// window, page sizes, directory timeout) all live here so tests can
/// construct tight variants directly.
use serde::{Deserialize, Serialize};

use crate::rate_limit::RateLimitConfig;
use crate::validation::ContentPolicy;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Rate-limit store (Redis) configuration
    pub cache: CacheConfig,
    /// Identity directory endpoint
    pub directory: DirectoryConfig,
    /// Post content policy
    pub content: ContentPolicy,
    /// Posting rate limits
    pub rate_limit: RateLimitConfig,
    /// Feed read settings
    pub feed: FeedConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Redis URL
    pub url: String,
}

/// Identity directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Base URL of the directory service
    pub base_url: String,
    /// Per-request timeout; past this, authors degrade to missing
    pub timeout_ms: u64,
}

/// Feed read settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Page size when the caller does not pass `limit`
    pub default_limit: usize,
    /// Hard cap on `limit`
    pub max_limit: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("FEED_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("FEED_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            cors: {
                let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if app_env.eq_ignore_ascii_case("production") => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => "http://localhost:3000".to_string(),
                };

                if app_env.eq_ignore_ascii_case("production") && allowed_origins.trim() == "*" {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/feed".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            cache: CacheConfig {
                url: std::env::var("REDIS_URL")
                    .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            },
            directory: DirectoryConfig {
                base_url: std::env::var("DIRECTORY_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:8083".to_string()),
                timeout_ms: std::env::var("DIRECTORY_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(800),
            },
            content: ContentPolicy {
                max_chars: std::env::var("CONTENT_MAX_CHARS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(280),
                ..ContentPolicy::default()
            },
            rate_limit: RateLimitConfig {
                max_posts: std::env::var("RATE_LIMIT_MAX_POSTS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1),
                window_seconds: std::env::var("RATE_LIMIT_WINDOW_SECONDS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60),
            },
            feed: FeedConfig {
                default_limit: std::env::var("FEED_DEFAULT_LIMIT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(50),
                max_limit: std::env::var("FEED_MAX_LIMIT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(100),
            },
        })
    }
}
