//! Axum-based HTTP server implementation for the cosmos-index facade.
//!
//! Every route is a thin adapter: it validates the request, buffers any
//! uploaded files, makes exactly one call on the shared [`IndexApi`] handle
//! and returns the platform's JSON verbatim. Failures are rendered by
//! `IntoResponse for IndexError`.
//!
//! # Components
//!
//! - `handlers`: One adapter per index operation, plus health and metrics.
//! - `uploads`: In-memory buffering of multipart forms.
//! - `middleware`: Request ID propagation and request metrics.
//! - `routes`: The router configuration that ties everything together.
//!
//! [`IndexApi`]: crate::cosmos::IndexApi
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;
mod uploads;

pub use handlers::{HealthCheck, HealthResponse, HealthStatus};
pub use routes::{create_router, AppState};
