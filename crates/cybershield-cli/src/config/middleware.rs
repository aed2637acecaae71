//! HTTP middleware configuration.

use std::time::Duration;

use anyhow::ensure;
use clap::Args;
use cybershield_server::middleware::{CorsConfig, RecoveryConfig};

use crate::TRACING_TARGET_CONFIG;

/// CORS and request timeout settings.
#[derive(Debug, Clone, Default, Args)]
#[must_use = "config does nothing unless you use it"]
pub struct MiddlewareConfig {
    #[clap(flatten)]
    pub cors: CorsConfig,

    #[clap(flatten)]
    pub recovery: RecoveryConfig,
}

impl MiddlewareConfig {
    /// Checks the request timeout against the slowest analysis.
    ///
    /// The request timeout must outlast `pipeline_timeout` so that a slow
    /// model is reported by the analysis pipeline rather than cut off here.
    pub fn validate(&self, pipeline_timeout: Duration) -> anyhow::Result<()> {
        let request_timeout = self.recovery.request_timeout();

        ensure!(
            !request_timeout.is_zero(),
            "request timeout must be at least 1 second"
        );
        ensure!(
            request_timeout > pipeline_timeout,
            "request timeout {}s must exceed the article fetch and model timeouts combined ({}s)",
            request_timeout.as_secs(),
            pipeline_timeout.as_secs()
        );

        Ok(())
    }

    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            cors_any_origin = self.cors.allows_any_origin(),
            cors_origins = ?self.cors.allowed_origins,
            request_timeout_secs = self.recovery.request_timeout,
            "Middleware configuration"
        );
    }
}
