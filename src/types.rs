use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// GitHub search API response structures

/// A repository as returned by the search API.
///
/// Only the fields the finder displays are typed; everything else the API
/// sends for the item is kept in `extra` so the record round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub stargazers_count: u64,
    pub language: Option<String>,
    pub forks_count: u64,
    pub updated_at: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of `GET /search/repositories`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub incomplete_results: bool,
    #[serde(default)]
    pub items: Vec<RepositorySummary>,
}

/// Success body of the discovery endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomRepoResponse {
    pub repo: RepositorySummary,
}
