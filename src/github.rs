use crate::config::FinderConfig;
use crate::error::{FinderError, Result};
use crate::types::SearchPage;
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const SEARCH_REPOSITORIES_PATH: &str = "search/repositories";
const API_VERSION: &str = "2022-11-28";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Capability to run one repository search against the hosting platform.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, query: &str, per_page: u32, page: u32) -> Result<SearchPage>;
}

pub struct GitHubClient {
    client: Client,
    search_url: Url,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(config: &FinderConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("random-repo-finder/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(GitHubClient {
            client,
            search_url: config.api_base_url.join(SEARCH_REPOSITORIES_PATH)?,
            token: config.github_token.clone(),
        })
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    async fn make_request(&self, query: &str, per_page: u32, page: u32) -> Result<Response> {
        let mut request = self
            .client
            .get(self.search_url.clone())
            .query(&[
                ("q", query.to_string()),
                ("per_page", per_page.to_string()),
                ("page", page.to_string()),
            ])
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        let rate_limit_remaining = response
            .headers()
            .get("X-RateLimit-Remaining")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse::<u32>().ok());

        if let Some(remaining) = rate_limit_remaining {
            if remaining < 3 {
                warn!(remaining, "GitHub search rate limit nearly exhausted");
            }
        }

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "GitHub search request failed");
        Err(FinderError::Upstream {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl SearchClient for GitHubClient {
    async fn search(&self, query: &str, per_page: u32, page: u32) -> Result<SearchPage> {
        debug!(query, per_page, page, "Searching GitHub repositories");
        let response = self.make_request(query, per_page, page).await?;
        let bytes = response.bytes().await?;
        let search_page: SearchPage = serde_json::from_slice(&bytes)?;
        debug!(
            items = search_page.items.len(),
            total_count = ?search_page.total_count,
            "GitHub search page received"
        );
        Ok(search_page)
    }
}
