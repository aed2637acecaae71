//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - Security: CORS, response headers, body limits
//! - Observability: request IDs and request tracing
//! - Recovery: panics, timeouts and service errors
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use axum::Router;
//! use cybershield_server::middleware::{
//!     CorsConfig, RecoveryConfig, RouterObservabilityExt, RouterRecoveryExt,
//!     RouterSecurityExt,
//! };
//!
//! let app: Router = Router::new()
//!     .with_security(&CorsConfig::default())
//!     .with_observability()
//!     .with_recovery(&RecoveryConfig::default());
//! ```

mod observability;
mod recovery;
mod security;

pub use observability::RouterObservabilityExt;
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{CorsConfig, RouterSecurityExt};
