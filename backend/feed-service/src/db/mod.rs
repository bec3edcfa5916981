/// Post persistence.
///
/// The core consumes the `PostStore` trait; `PgPostStore` is the Postgres
/// implementation. Posts are append-only: there is no update or delete.
pub mod post_repo;

pub use post_repo::PgPostStore;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Post;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Transient backend failure; the caller may retry with backoff.
    #[error("post store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Persist a new post. The store assigns `id` and `created_at`.
    ///
    /// No idempotency key: a duplicate submission producing two posts is an
    /// accepted low-severity outcome.
    async fn append(&self, author_id: Uuid, content: &str) -> Result<Post, StoreError>;

    /// Return up to `limit` posts, newest first, with a deterministic
    /// tie-break so repeated calls against a quiescent store agree.
    async fn list_recent(&self, limit: i64) -> Result<Vec<Post>, StoreError>;
}
