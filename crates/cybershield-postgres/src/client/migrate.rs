//! Embedded migration runner.

use std::time::{Duration, Instant};

use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::MigrationHarness;
use tokio::task::spawn_blocking;

use crate::{MIGRATIONS, PgClient, PgError, PgResult, TRACING_TARGET_MIGRATION};

/// Outcome of applying pending migrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationResult {
    pub duration: Duration,
    /// Versions applied by this run, oldest first.
    pub processed_versions: Vec<String>,
}

impl MigrationResult {
    /// Returns whether nothing had to be applied.
    #[inline]
    pub fn is_no_op(&self) -> bool {
        self.processed_versions.is_empty()
    }
}

/// Migration support for [`PgClient`].
pub trait PgClientMigrationExt {
    /// Applies every pending embedded migration. Safe to call repeatedly.
    fn run_pending_migrations(&self) -> impl Future<Output = PgResult<MigrationResult>> + Send;
}

impl PgClientMigrationExt for PgClient {
    #[tracing::instrument(skip(self), target = TRACING_TARGET_MIGRATION)]
    async fn run_pending_migrations(&self) -> PgResult<MigrationResult> {
        tracing::info!(target: TRACING_TARGET_MIGRATION, "Applying pending migrations");

        let start = Instant::now();
        let conn = self.get_pooled_connection().await?;
        let mut conn: AsyncConnectionWrapper<_> = conn.into();

        let versions = spawn_blocking(move || {
            conn.run_pending_migrations(MIGRATIONS).map(|versions| {
                versions
                    .into_iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
            })
        })
        .await
        .map_err(|err| PgError::Migration(err.into()))?
        .map_err(|err| {
            tracing::error!(
                target: TRACING_TARGET_MIGRATION,
                error = %err,
                "Database migration failed"
            );
            PgError::Migration(err)
        })?;

        let duration = start.elapsed();
        tracing::info!(
            target: TRACING_TARGET_MIGRATION,
            elapsed_ms = duration.as_millis(),
            migrations_count = versions.len(),
            "Database migrations applied"
        );

        Ok(MigrationResult {
            duration,
            processed_versions: versions,
        })
    }
}
