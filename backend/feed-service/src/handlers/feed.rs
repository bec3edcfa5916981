/// Feed handler - HTTP endpoint for the read path
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::Result;
use crate::models::FeedResponse;
use crate::services::FeedService;

#[derive(Debug, Deserialize)]
pub struct FeedQueryParams {
    pub limit: Option<usize>,
}

pub struct FeedHandlerState {
    pub feed: Arc<FeedService>,
    pub default_limit: usize,
    pub max_limit: usize,
}

/// Return the enriched feed, newest first. Readable by any visitor.
pub async fn get_feed(
    query: web::Query<FeedQueryParams>,
    state: web::Data<FeedHandlerState>,
) -> Result<HttpResponse> {
    let limit = query
        .limit
        .unwrap_or(state.default_limit)
        .clamp(1, state.max_limit);

    let entries = state.feed.get_feed(limit).await?;
    Ok(HttpResponse::Ok().json(FeedResponse { entries }))
}
