/// Identity directory lookups.
///
/// The directory is an external, independently-failing system. Lookups are
/// batched, best-effort, and bounded: entries are simply missing for ids
/// the directory does not know or failed to resolve in time. Callers must
/// treat a missing entry as a normal state.
pub mod http;

pub use http::HttpIdentityDirectory;

use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::AuthorSummary;

#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Resolve a batch of identity ids to author summaries.
    ///
    /// Implementations deduplicate the ids before querying and never fail
    /// the whole batch for one bad id; partial results are expected.
    async fn resolve_batch(&self, ids: &[Uuid]) -> HashMap<Uuid, AuthorSummary>;
}
