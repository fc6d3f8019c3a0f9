// Error types for cosmos-index
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Client initialization failed: {0}")]
    ClientInit(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Remote(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),
}

impl IndexError {
    /// Treat any failure raised by a remote call as a remote rejection.
    ///
    /// Input errors keep their own status; everything else keeps its text
    /// but is reported to the caller as a bad request.
    pub fn into_remote(self) -> Self {
        match self {
            IndexError::Remote(_) | IndexError::InvalidRequest(_) => self,
            other => IndexError::Remote(other.to_string()),
        }
    }

    /// HTTP status reported to callers for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            IndexError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            IndexError::Remote(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Every adapter error is rendered as {"detail": "..."} at this single point
impl IntoResponse for IndexError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected ({}): {}", status.as_u16(), self);
        }

        let body = json!({ "detail": self.to_string() });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, IndexError>;
