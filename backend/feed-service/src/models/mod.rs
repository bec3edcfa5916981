/// Data models for feed-service
///
/// - `Post`: immutable emoji post row, owned by the post store
/// - `AuthorSummary`: directory-derived author view, never persisted here
/// - `FeedEntry`: denormalized read-model pairing the two
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted post. `id` and `created_at` are assigned by the store at
/// insertion; `content` has already passed validation when this exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Display metadata for a posting identity, resolved from the external
/// identity directory. Absence of a summary is a normal state, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub id: Uuid,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// One feed row: the post plus its author when the directory resolved one.
/// Constructed fresh per read request; ordering follows the post ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEntry {
    pub post: Post,
    pub author: Option<AuthorSummary>,
}

/// Top-level payload for `GET /api/v1/feed`.
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedResponse {
    pub entries: Vec<FeedEntry>,
}
