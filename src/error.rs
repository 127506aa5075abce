use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("GitHub API error: {status}")]
    Upstream { status: u16, body: String },

    #[error("No results")]
    NoResults,

    #[error("Invalid stars value: {0}")]
    InvalidStars(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FinderError {
    /// HTTP status the discovery endpoint answers with for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            FinderError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            FinderError::NoResults => StatusCode::NOT_FOUND,
            FinderError::InvalidStars(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for FinderError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            FinderError::Upstream { body, .. } => json!({
                "error": self.to_string(),
                "details": body,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;
