use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use uuid::Uuid;

use super::IdentityDirectory;
use crate::config::DirectoryConfig;
use crate::metrics;
use crate::models::AuthorSummary;

#[derive(Debug, Serialize)]
struct BatchRequest<'a> {
    ids: &'a [Uuid],
}

#[derive(Debug, Deserialize)]
struct BatchResponse {
    users: Vec<DirectoryUser>,
}

/// Wire shape of one directory record.
#[derive(Debug, Deserialize)]
struct DirectoryUser {
    id: Uuid,
    username: String,
    display_name: Option<String>,
    avatar_url: Option<String>,
}

impl From<DirectoryUser> for AuthorSummary {
    fn from(user: DirectoryUser) -> Self {
        AuthorSummary {
            id: user.id,
            display_name: user.display_name.unwrap_or(user.username),
            avatar_url: user.avatar_url,
        }
    }
}

/// HTTP client for the identity directory's batch endpoint.
///
/// Every call is one request; the timeout is enforced by the underlying
/// client so a stalled directory slows a feed read by at most
/// `timeout_ms`, after which authors degrade to missing.
pub struct HttpIdentityDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl HttpIdentityDirectory {
    pub fn new(config: &DirectoryConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    async fn fetch_batch(&self, ids: &[Uuid]) -> Result<Vec<DirectoryUser>, reqwest::Error> {
        let url = format!("{}/api/v1/users/batch", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&BatchRequest { ids })
            .send()
            .await?
            .error_for_status()?;

        let body: BatchResponse = response.json().await?;
        Ok(body.users)
    }
}

#[async_trait]
impl IdentityDirectory for HttpIdentityDirectory {
    async fn resolve_batch(&self, ids: &[Uuid]) -> HashMap<Uuid, AuthorSummary> {
        let mut seen = HashSet::new();
        let distinct: Vec<Uuid> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();
        if distinct.is_empty() {
            return HashMap::new();
        }

        match self.fetch_batch(&distinct).await {
            Ok(users) => users
                .into_iter()
                .map(|user| (user.id, AuthorSummary::from(user)))
                .collect(),
            Err(err) => {
                metrics::DIRECTORY_ERRORS_TOTAL.inc();
                tracing::warn!(
                    requested = distinct.len(),
                    "identity directory batch lookup failed, serving feed without authors: {}",
                    err
                );
                HashMap::new()
            }
        }
    }
}
