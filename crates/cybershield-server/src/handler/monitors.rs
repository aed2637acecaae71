//! Health check handler.
//!
//! The check always answers `200`; `is_healthy` reports whether Postgres
//! answered a ping in time.

use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::routing::get;
use cybershield_postgres::PgClient;

use super::response::MonitorStatus;
use crate::extract::Json;
use crate::handler::Result;
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "cybershield_server::handler::monitors";

/// Upper bound on the database ping.
const PING_TIMEOUT: Duration = Duration::from_secs(5);

#[tracing::instrument(skip_all)]
async fn health_status(State(pg_client): State<PgClient>) -> Result<Json<MonitorStatus>> {
    let is_healthy = match tokio::time::timeout(PING_TIMEOUT, pg_client.ping()).await {
        Ok(Ok(())) => true,
        Ok(Err(error)) => {
            tracing::warn!(target: TRACING_TARGET, error = %error, "database ping failed");
            false
        }
        Err(_) => {
            tracing::warn!(target: TRACING_TARGET, "database ping timed out");
            false
        }
    };

    tracing::debug!(
        target: TRACING_TARGET,
        is_healthy = is_healthy,
        "health status response prepared"
    );

    Ok(Json(MonitorStatus::new(is_healthy)))
}

/// Returns a [`Router`] with all health monitoring routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health_status))
}
