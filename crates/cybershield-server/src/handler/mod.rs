//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use cybershield_server::handler::routes;
//! use cybershield_server::service::ServiceState;
//!
//! # fn example(state: ServiceState) {
//! let app: axum::Router = routes().with_state(state);
//! # let _ = app;
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod accounts;
mod analysis;
mod error;
mod monitors;
pub mod request;
pub mod response;
mod vault;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub(crate) use crate::handler::response::ErrorResponse;
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with every route mounted under `/api`.
fn api_routes() -> Router<ServiceState> {
    Router::new()
        .merge(analysis::routes())
        .merge(accounts::routes())
        .merge(vault::routes())
}

/// Returns a [`Router`] with all routes.
///
/// Application routes live under `/api`, the health check at `/health`.
/// Unknown paths answer `404` with the standard error body.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .nest("/api", api_routes())
        .merge(monitors::routes())
        .fallback(handler)
}
