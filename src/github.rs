use crate::error::{FinderError, Result};
use crate::query::SearchRequest;
use crate::types::SearchResponse;
use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, warn};

pub const API_BASE_URL: &str = "https://api.github.com";

/// Anything that can answer a repository search.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search_repositories(&self, request: &SearchRequest) -> Result<SearchResponse>;
}

/// Anonymous client for the public search API. No retries, no backoff.
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    api_base: String,
}

impl GitHubClient {
    pub fn new(api_base: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("github-repo-finder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GitHubClient {
            client,
            api_base: api_base.into(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    async fn make_request(&self, url: &str) -> Result<Response> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let rate_limit_remaining = response
            .headers()
            .get("X-RateLimit-Remaining")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u32>().ok());

        let error_text = response.text().await.unwrap_or_default();

        match (status, rate_limit_remaining) {
            (reqwest::StatusCode::FORBIDDEN, Some(0))
            | (reqwest::StatusCode::TOO_MANY_REQUESTS, _) => {
                warn!(%status, "Search API rate limit exhausted");
                Err(FinderError::RateLimitExceeded(format!(
                    "API rate limit exceeded ({}): {}",
                    status, error_text
                )))
            }
            (status, _) => Err(FinderError::ApiError(format!(
                "API request failed with status {}: {}",
                status, error_text
            ))),
        }
    }
}

#[async_trait]
impl SearchBackend for GitHubClient {
    async fn search_repositories(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let url = request.url(&self.api_base)?;
        debug!(%url, "Searching repositories");

        let response = self.make_request(url.as_str()).await?;
        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;

        debug!(
            total_count = parsed.total_count,
            items = parsed.items.len(),
            "Search response received"
        );
        Ok(parsed)
    }
}
