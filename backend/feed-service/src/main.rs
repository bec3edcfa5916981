use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use redis::aio::ConnectionManager;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feed_service::config::Config;
use feed_service::db::PgPostStore;
use feed_service::directory::HttpIdentityDirectory;
use feed_service::handlers::{self, feed::FeedHandlerState, health::HealthState};
use feed_service::middleware::RequestTimingMiddleware;
use feed_service::rate_limit::RedisRateLimiter;
use feed_service::services::{FeedService, PostService};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting feed-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Database pool + schema
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&config.database.url)
        .await
        .context("failed to connect to PostgreSQL")?;

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .context("failed to run migrations")?;
    tracing::info!("Connected to PostgreSQL, schema up to date");

    // Redis connection for the shared rate-limit counters
    let redis_client =
        redis::Client::open(config.cache.url.clone()).context("invalid Redis URL")?;
    let redis_manager = ConnectionManager::new(redis_client)
        .await
        .context("failed to connect to Redis")?;
    tracing::info!("Connected to Redis");

    // Wire the core behind its seams
    let store = Arc::new(PgPostStore::new(db_pool.clone()));
    let directory = Arc::new(
        HttpIdentityDirectory::new(&config.directory)
            .context("failed to build directory client")?,
    );
    let limiter = Arc::new(RedisRateLimiter::new(
        redis_manager.clone(),
        config.rate_limit.clone(),
    ));

    let post_service = Arc::new(PostService::new(
        store.clone(),
        limiter,
        config.content.clone(),
    ));
    let feed_service = Arc::new(FeedService::new(store, directory));

    let post_service_data = web::Data::new(post_service);
    let feed_state = web::Data::new(FeedHandlerState {
        feed: feed_service,
        default_limit: config.feed.default_limit,
        max_limit: config.feed.max_limit,
    });
    let health_state = web::Data::new(HealthState::new(db_pool, redis_manager));

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let allowed_origins = config.cors.allowed_origins.clone();
    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .max_age(3600);
        if allowed_origins.trim() == "*" {
            // rejected by Config::from_env in production
            cors = cors.allow_any_origin();
        } else {
            for origin in allowed_origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
            {
                cors = cors.allowed_origin(origin);
            }
        }

        App::new()
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(RequestTimingMiddleware)
            .app_data(post_service_data.clone())
            .app_data(feed_state.clone())
            .app_data(health_state.clone())
            .configure(handlers::configure)
    })
    .bind(&bind_address)
    .with_context(|| format!("failed to bind {bind_address}"))?
    .run()
    .await?;

    Ok(())
}
