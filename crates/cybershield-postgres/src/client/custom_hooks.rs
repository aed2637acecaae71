//! Connection setup and pool hooks.

use std::time::{Duration, Instant};

use deadpool::managed::{HookResult, Metrics};
use diesel::ConnectionResult;
use diesel_async::pooled_connection::{PoolError, PoolableConnection};
use diesel_async::{AsyncConnection, AsyncPgConnection};
use futures::FutureExt;
use futures::future::BoxFuture;

use super::pg_config::mask_url;
use crate::TRACING_TARGET_CONNECTION;

/// Opens a fresh connection for the pool manager.
///
/// The database URL only ever reaches the logs with its password masked.
pub fn setup_callback<C>(addr: &str) -> BoxFuture<'_, ConnectionResult<C>>
where
    C: AsyncConnection + 'static,
{
    async move {
        let start = Instant::now();
        let result = C::establish(addr).await;
        log_establish(addr, start.elapsed(), result.as_ref().err());
        result
    }
    .boxed()
}

fn log_establish(addr: &str, elapsed: Duration, error: Option<&diesel::ConnectionError>) {
    let addr = mask_url(addr);
    let elapsed_ms = elapsed.as_millis();

    match error {
        None => tracing::debug!(
            target: TRACING_TARGET_CONNECTION,
            %addr,
            elapsed_ms,
            "Opened database connection"
        ),
        Some(error) => tracing::error!(
            target: TRACING_TARGET_CONNECTION,
            %addr,
            elapsed_ms,
            %error,
            "Could not open database connection"
        ),
    }
}

/// Flags connections the server dropped while they sat idle in the pool.
///
/// The pool still recycles them; the next query surfaces the failure as a
/// connection error.
pub fn pre_recycle(conn: &mut AsyncPgConnection, metrics: &Metrics) -> HookResult<PoolError> {
    if conn.is_broken() {
        tracing::warn!(
            target: TRACING_TARGET_CONNECTION,
            age_secs = metrics.age().as_secs(),
            reuses = metrics.recycle_count,
            "Idle database connection went bad"
        );
    }

    Ok(())
}
