#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, Request, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use random_repo_finder::app::{create_router, AppState};
use random_repo_finder::config::{parse_base_url, FinderConfig};
use random_repo_finder::error::{FinderError, Result};
use random_repo_finder::github::SearchClient;
use random_repo_finder::types::{RepositorySummary, SearchPage};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub fn sample_repo(full_name: &str) -> RepositorySummary {
    serde_json::from_value(sample_repo_json(full_name)).expect("valid sample repo")
}

pub fn sample_repo_json(full_name: &str) -> Value {
    json!({
        "full_name": full_name,
        "html_url": format!("https://github.com/{}", full_name),
        "description": format!("The {} project", full_name),
        "stargazers_count": 1500,
        "language": "Rust",
        "forks_count": 42,
        "updated_at": "2023-03-05T00:00:00Z"
    })
}

/// What the stub search client answers with.
#[derive(Debug, Clone)]
pub enum StubResponse {
    Items(Vec<RepositorySummary>),
    Upstream(u16, String),
    Malformed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSearch {
    pub query: String,
    pub per_page: u32,
    pub page: u32,
}

pub struct StubSearchClient {
    response: StubResponse,
    pub calls: Mutex<Vec<RecordedSearch>>,
}

impl StubSearchClient {
    pub fn new(response: StubResponse) -> Arc<Self> {
        Arc::new(Self {
            response,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn with_items(names: &[&str]) -> Arc<Self> {
        Self::new(StubResponse::Items(names.iter().map(|n| sample_repo(n)).collect()))
    }

    pub fn recorded(&self) -> Vec<RecordedSearch> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchClient for StubSearchClient {
    async fn search(&self, query: &str, per_page: u32, page: u32) -> Result<SearchPage> {
        self.calls.lock().unwrap().push(RecordedSearch {
            query: query.to_string(),
            per_page,
            page,
        });

        match &self.response {
            StubResponse::Items(items) => Ok(SearchPage {
                total_count: Some(items.len() as u64),
                incomplete_results: false,
                items: items.clone(),
            }),
            StubResponse::Upstream(status, body) => Err(FinderError::Upstream {
                status: *status,
                body: body.clone(),
            }),
            StubResponse::Malformed => {
                Err(serde_json::from_str::<SearchPage>("{not json").unwrap_err().into())
            }
        }
    }
}

pub fn test_config() -> FinderConfig {
    FinderConfig::new(parse_base_url("http://127.0.0.1:9/").unwrap(), None)
}

pub fn test_app(client: Arc<StubSearchClient>) -> Router {
    create_router(AppState::new(test_config(), client))
}

/// Issue a GET against the router and return status plus raw body.
pub async fn send_get(router: Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send_get(router, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

/// A request the stub upstream received.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub params: HashMap<String, String>,
    pub authorization: Option<String>,
    pub accept: Option<String>,
}

#[derive(Clone)]
struct UpstreamState {
    status: StatusCode,
    body: String,
    requests: Arc<Mutex<Vec<UpstreamRequest>>>,
}

/// A local stand-in for the search API, listening on an ephemeral port.
pub struct StubUpstream {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<UpstreamRequest>>>,
}

impl StubUpstream {
    pub async fn start(status: u16, body: impl Into<String>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = UpstreamState {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.into(),
            requests: requests.clone(),
        };

        let router = Router::new()
            .route("/search/repositories", get(search_repositories))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/", addr),
            requests,
        }
    }

    pub async fn with_items(items: Vec<Value>) -> Self {
        let body = json!({
            "total_count": items.len(),
            "incomplete_results": false,
            "items": items,
        });
        Self::start(200, body.to_string()).await
    }

    pub fn config(&self, token: Option<&str>) -> FinderConfig {
        FinderConfig::new(
            parse_base_url(&self.base_url).unwrap(),
            token.map(str::to_string),
        )
    }

    pub fn received(&self) -> Vec<UpstreamRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn search_repositories(
    State(state): State<UpstreamState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(UpstreamRequest {
        params,
        authorization: header("authorization"),
        accept: header("accept"),
    });

    (state.status, state.body.clone())
}
