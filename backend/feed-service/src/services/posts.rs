/// Post service - the write path.
///
/// `submit_post` runs validate, then rate-limit, then append, in that
/// order: a malformed post never consumes a rate-limit slot, and a
/// throttled post never reaches the store.
use std::sync::Arc;
use uuid::Uuid;

use crate::db::PostStore;
use crate::error::{AppError, Result};
use crate::metrics;
use crate::models::Post;
use crate::rate_limit::{Admission, RateLimiter};
use crate::validation::ContentPolicy;

pub struct PostService {
    store: Arc<dyn PostStore>,
    limiter: Arc<dyn RateLimiter>,
    policy: ContentPolicy,
}

impl PostService {
    pub fn new(
        store: Arc<dyn PostStore>,
        limiter: Arc<dyn RateLimiter>,
        policy: ContentPolicy,
    ) -> Self {
        Self {
            store,
            limiter,
            policy,
        }
    }

    /// Create a new post authored by `author_id`.
    pub async fn submit_post(&self, author_id: Uuid, raw_content: &str) -> Result<Post> {
        let content = self.policy.validate(raw_content).map_err(|err| {
            metrics::POSTS_REJECTED_TOTAL
                .with_label_values(&["validation"])
                .inc();
            AppError::Validation(err)
        })?;

        if let Admission::Rejected { retry_after } = self.limiter.try_admit(author_id).await {
            metrics::POSTS_REJECTED_TOTAL
                .with_label_values(&["rate_limited"])
                .inc();
            tracing::info!(
                %author_id,
                retry_after_secs = retry_after.as_secs(),
                "post rejected by rate limiter"
            );
            return Err(AppError::RateLimited {
                // round sub-second remainders up so the caller never
                // retries before the window actually resets
                retry_after_seconds: retry_after.as_secs().max(1),
            });
        }

        let post = self.store.append(author_id, content.as_str()).await?;
        metrics::POSTS_CREATED_TOTAL.inc();
        tracing::debug!(post_id = %post.id, %author_id, "post created");

        Ok(post)
    }
}
