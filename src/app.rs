use crate::config::FinderConfig;
use crate::discovery::{Discovery, RandomParams, SearchFilters};
use crate::error::{FinderError, Result};
use crate::github::{GitHubClient, SearchClient};
use crate::health;
use crate::types::RandomRepoResponse;
use crate::ui::{self, FinderState};
use axum::{
    extract::{RawQuery, State},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared, read-only state for every request.
#[derive(Clone)]
pub struct AppState {
    pub discovery: Discovery,
    pub config: Arc<FinderConfig>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: FinderConfig, client: Arc<dyn SearchClient>) -> Self {
        Self {
            discovery: Discovery::new(client),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// State backed by the real GitHub search client.
    pub fn from_config(config: FinderConfig) -> Result<Self> {
        let client = GitHubClient::new(&config)?;
        Ok(Self::new(config, Arc::new(client)))
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/finder/result", get(finder_result))
        .route("/api/random", get(random_repository))
        .merge(health::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to the configured address and serve until Ctrl+C.
pub async fn serve(state: AppState) -> Result<()> {
    let addr = state.config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Random repository finder listening on http://{}", addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// `GET /api/random`
async fn random_repository(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> std::result::Result<Json<RandomRepoResponse>, FinderError> {
    let filters = SearchFilters::try_from(RandomParams::from_query(query.as_deref()))?;

    match state.discovery.random_repository(&filters).await {
        Ok(repo) => Ok(Json(RandomRepoResponse { repo })),
        Err(e) => {
            match &e {
                FinderError::NoResults => info!(query = %filters.query(), "No repositories matched"),
                other => warn!("Random repository lookup failed: {}", other),
            }
            Err(e)
        }
    }
}

/// `GET /finder/result`: the result slot fragment. Every failure renders the idle state.
async fn finder_result(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    let params = RandomParams::from_query(query.as_deref());
    Html(discover_state(&state, params).await.0.render())
}

/// `GET /`: the finder page, with a result when the form was submitted without script.
async fn index_page(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    let params = RandomParams::from_query(query.as_deref());
    if params.language.is_none() && params.stars.is_none() {
        return Html(ui::render_page(
            &SearchFilters::new(ui::DEFAULT_LANGUAGE, 0),
            &FinderState::Idle,
        ));
    }

    let (finder_state, filters) = discover_state(&state, params).await;
    Html(ui::render_page(&filters, &finder_state))
}

async fn discover_state(state: &AppState, params: RandomParams) -> (FinderState, SearchFilters) {
    let fallback_language = params.language.clone().unwrap_or_default();
    let filters = match SearchFilters::try_from(params) {
        Ok(filters) => filters,
        Err(e) => {
            warn!("Rejected finder filters: {}", e);
            return (FinderState::Failed, SearchFilters::new(fallback_language, 0));
        }
    };

    let outcome = state.discovery.random_repository(&filters).await;
    if let Err(e) = &outcome {
        warn!("Finder lookup failed: {}", e);
    }
    (FinderState::from_outcome(outcome), filters)
}
