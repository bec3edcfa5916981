//! Test doubles for the service seams.
//!
//! The mocks count batch/append calls so tests can verify the assembler
//! issues exactly one directory lookup per request and that rejected
//! writes never reach the store.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use feed_service::db::{PostStore, StoreError};
use feed_service::directory::IdentityDirectory;
use feed_service::models::{AuthorSummary, Post};
use feed_service::rate_limit::{Admission, RateLimiter};

/// Build a post created `secs_ago` seconds in the past.
pub fn post(author_id: Uuid, content: &str, secs_ago: i64) -> Post {
    Post {
        id: Uuid::new_v4(),
        author_id,
        content: content.to_owned(),
        created_at: Utc::now() - Duration::seconds(secs_ago),
    }
}

/// In-memory post store keeping posts newest first.
pub struct MockPostStore {
    posts: Mutex<Vec<Post>>,
    unavailable: AtomicBool,
    appends: AtomicUsize,
}

impl MockPostStore {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts: Mutex::new(posts),
            unavailable: AtomicBool::new(false),
            appends: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Simulate a transient backend outage.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn append_count(&self) -> usize {
        self.appends.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PostStore for MockPostStore {
    async fn append(&self, author_id: Uuid, content: &str) -> Result<Post, StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".into()));
        }

        let created = Post {
            id: Uuid::new_v4(),
            author_id,
            content: content.to_owned(),
            created_at: Utc::now(),
        };
        self.posts.lock().unwrap().insert(0, created.clone());
        self.appends.fetch_add(1, Ordering::SeqCst);
        Ok(created)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Post>, StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".into()));
        }

        let posts = self.posts.lock().unwrap();
        Ok(posts.iter().take(limit as usize).cloned().collect())
    }
}

/// Directory double with call counting for N+1 verification.
pub struct MockDirectory {
    users: HashMap<Uuid, AuthorSummary>,
    unavailable: AtomicBool,
    batch_calls: AtomicUsize,
    last_batch: Mutex<Vec<Uuid>>,
}

impl MockDirectory {
    pub fn new(users: Vec<(Uuid, &str)>) -> Self {
        let users = users
            .into_iter()
            .map(|(id, name)| {
                (
                    id,
                    AuthorSummary {
                        id,
                        display_name: name.to_owned(),
                        avatar_url: Some(format!("https://cdn.example/avatars/{id}.png")),
                    },
                )
            })
            .collect();

        Self {
            users,
            unavailable: AtomicBool::new(false),
            batch_calls: AtomicUsize::new(0),
            last_batch: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Simulate a directory outage: lookups degrade to an empty result,
    /// mirroring the HTTP client's behavior.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn batch_call_count(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    pub fn last_batch(&self) -> Vec<Uuid> {
        self.last_batch.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityDirectory for MockDirectory {
    async fn resolve_batch(&self, ids: &[Uuid]) -> HashMap<Uuid, AuthorSummary> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_batch.lock().unwrap() = ids.to_vec();

        if self.unavailable.load(Ordering::SeqCst) {
            return HashMap::new();
        }

        ids.iter()
            .filter_map(|id| self.users.get(id).map(|summary| (*id, summary.clone())))
            .collect()
    }
}

/// Limiter returning a fixed admission, counting how often it was asked.
pub struct StubLimiter {
    admission: Admission,
    calls: AtomicUsize,
}

impl StubLimiter {
    pub fn admitting() -> Self {
        Self {
            admission: Admission::Admitted,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn rejecting(retry_after: std::time::Duration) -> Self {
        Self {
            admission: Admission::Rejected { retry_after },
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateLimiter for StubLimiter {
    async fn try_admit(&self, _identity_id: Uuid) -> Admission {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.admission
    }
}
