/// HTTP request handlers.
pub mod feed;
pub mod health;
pub mod posts;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/feed", web::get().to(feed::get_feed))
            .route("/posts", web::post().to(posts::create_post))
            .route("/health", web::get().to(health::health_summary))
            .route("/health/ready", web::get().to(health::readiness))
            .route("/health/live", web::get().to(health::liveness)),
    )
    .route("/metrics", web::get().to(health::metrics));
}
