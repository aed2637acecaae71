//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── server: ServerConfig          # Host, port, shutdown
//! ├── middleware: MiddlewareConfig  # CORS, request timeout
//! ├── service: ServiceConfig        # Postgres, vault key, password policy
//! └── provider: ProviderConfig      # Gemini, article fetcher, model timeout
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.

mod middleware;
mod provider;
mod server;

use std::process;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use cybershield_server::service::ServiceConfig;
pub use middleware::MiddlewareConfig;
pub use provider::ProviderConfig;
pub use server::ServerConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Output format of the log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "cybershield")]
#[command(about = "CyberShield security-awareness backend")]
#[command(version)]
pub struct Cli {
    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration (CORS, timeouts).
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Database and vault configuration.
    #[clap(flatten)]
    pub service: ServiceConfig,

    /// Model provider and article fetcher configuration.
    #[clap(flatten)]
    pub provider: ProviderConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with `RUST_LOG` filtering, `info` by default.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let registry = tracing_subscriber::registry().with(filter);

        match self.log_format {
            LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
            LogFormat::Json => registry
                .with(tracing_subscriber::fmt::layer().json())
                .init(),
        }
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.service
            .validate()
            .context("invalid service configuration")?;
        self.provider
            .validate()
            .context("invalid provider configuration")?;
        self.middleware
            .validate(self.provider.pipeline_timeout())
            .context("invalid middleware configuration")?;
        Ok(())
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            dotenv = cfg!(feature = "dotenv"),
            "Build information"
        );

        self.server.log();
        self.middleware.log();
        self.provider.log();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            postgres_url = %self.service.postgres.database_url_masked(),
            postgres_max_connections = self.service.postgres.postgres_max_connections,
            min_password_strength = self.service.min_password_strength,
            "Service configuration"
        );
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    const MASTER_KEY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

    fn parse_with_timeouts(request: &str, model: &str) -> anyhow::Result<Cli> {
        let cli = Cli::try_parse_from([
            "cybershield",
            "--postgres-url",
            "postgresql://db/cybershield",
            "--vault-master-key",
            MASTER_KEY,
            "--gemini-api-key",
            "test-key",
            "--request-timeout",
            request,
            "--model-timeout",
            model,
        ])?;
        Ok(cli)
    }

    #[test]
    fn default_timeouts_validate() -> anyhow::Result<()> {
        let cli = parse_with_timeouts("60", "30")?;
        cli.validate()?;
        Ok(())
    }

    #[test]
    fn request_timeout_shorter_than_model_is_rejected() -> anyhow::Result<()> {
        let cli = parse_with_timeouts("20", "30")?;
        let error = cli.validate().err().map(|e| format!("{e:#}"));
        assert!(error.is_some_and(|e| e.contains("request timeout 20s")));
        Ok(())
    }

    #[test]
    fn zero_request_timeout_is_rejected() -> anyhow::Result<()> {
        let cli = parse_with_timeouts("0", "30")?;
        assert!(cli.validate().is_err());
        Ok(())
    }

    #[test]
    fn parses_full_command_line() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from([
            "cybershield",
            "--postgres-url",
            "postgresql://db/cybershield",
            "--vault-master-key",
            "00",
            "--gemini-api-key",
            "test-key",
            "--log-format",
            "json",
            "--port",
            "8080",
        ])?;

        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.server.port, 8080);
        assert_eq!(cli.provider.gemini_api_key, "test-key");
        Ok(())
    }
}
