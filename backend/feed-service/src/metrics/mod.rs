use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter,
    IntCounterVec,
};

lazy_static! {
    /// Posts accepted and persisted.
    pub static ref POSTS_CREATED_TOTAL: IntCounter = register_int_counter!(
        "posts_created_total",
        "Posts accepted and persisted"
    )
    .expect("failed to register posts_created_total");

    /// Posts rejected before persistence, segmented by reason.
    pub static ref POSTS_REJECTED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "posts_rejected_total",
        "Posts rejected before persistence segmented by reason",
        &["reason"]
    )
    .expect("failed to register posts_rejected_total");

    /// Feed reads served.
    pub static ref FEED_REQUESTS_TOTAL: IntCounter = register_int_counter!(
        "feed_requests_total",
        "Feed reads served"
    )
    .expect("failed to register feed_requests_total");

    /// End-to-end feed assembly duration (store listing plus enrichment).
    pub static ref FEED_REQUEST_DURATION_SECONDS: Histogram = register_histogram!(
        "feed_request_duration_seconds",
        "Feed assembly duration in seconds"
    )
    .expect("failed to register feed_request_duration_seconds");

    /// Feed entries served without a resolved author.
    pub static ref DIRECTORY_MISSES_TOTAL: IntCounter = register_int_counter!(
        "directory_misses_total",
        "Feed entries served without a resolved author"
    )
    .expect("failed to register directory_misses_total");

    /// Directory batch lookups that failed outright (timeout, HTTP error).
    pub static ref DIRECTORY_ERRORS_TOTAL: IntCounter = register_int_counter!(
        "directory_errors_total",
        "Identity directory batch lookups that failed outright"
    )
    .expect("failed to register directory_errors_total");
}
