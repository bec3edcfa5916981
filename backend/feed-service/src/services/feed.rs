/// Feed assembly - the read path.
///
/// The post store and the identity directory are separate systems with no
/// native join, so enrichment is an explicit batch-resolve-then-zip: fetch
/// the ordered posts, collect the distinct author ids, resolve them in one
/// directory call, and zip the summaries back in preserving post order.
/// A post whose author fails to resolve is served without attribution,
/// never dropped.
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::PostStore;
use crate::directory::IdentityDirectory;
use crate::error::Result;
use crate::metrics;
use crate::models::{FeedEntry, Post};

pub struct FeedService {
    store: Arc<dyn PostStore>,
    directory: Arc<dyn IdentityDirectory>,
}

impl FeedService {
    pub fn new(store: Arc<dyn PostStore>, directory: Arc<dyn IdentityDirectory>) -> Self {
        Self { store, directory }
    }

    /// Return up to `limit` enriched feed entries, newest first.
    pub async fn get_feed(&self, limit: usize) -> Result<Vec<FeedEntry>> {
        let timer = metrics::FEED_REQUEST_DURATION_SECONDS.start_timer();

        let posts = self.store.list_recent(limit as i64).await?;
        let entries = self.enrich(posts).await;

        timer.observe_duration();
        metrics::FEED_REQUESTS_TOTAL.inc();

        Ok(entries)
    }

    /// One directory batch call per feed request, regardless of feed size.
    async fn enrich(&self, posts: Vec<Post>) -> Vec<FeedEntry> {
        let ids = distinct_author_ids(&posts);
        let authors = if ids.is_empty() {
            HashMap::new()
        } else {
            self.directory.resolve_batch(&ids).await
        };

        posts
            .into_iter()
            .map(|post| {
                let author = authors.get(&post.author_id).cloned();
                if author.is_none() {
                    metrics::DIRECTORY_MISSES_TOTAL.inc();
                    tracing::debug!(
                        post_id = %post.id,
                        author_id = %post.author_id,
                        "author unresolved, serving post without attribution"
                    );
                }
                FeedEntry { author, post }
            })
            .collect()
    }
}

fn distinct_author_ids(posts: &[Post]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    posts
        .iter()
        .map(|post| post.author_id)
        .filter(|id| seen.insert(*id))
        .collect()
}
