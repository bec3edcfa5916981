/// Post handlers - HTTP endpoints for the write path
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::UserId;
use crate::services::PostService;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
}

/// Create a new post authored by the calling identity.
pub async fn create_post(
    service: web::Data<Arc<PostService>>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let post = service.submit_post(user_id.0, &req.content).await?;
    Ok(HttpResponse::Created().json(post))
}
