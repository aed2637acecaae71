#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for model gateway calls.
pub const TRACING_TARGET_GATEWAY: &str = "cybershield_core::gateway";

/// Tracing target for schema validation.
pub const TRACING_TARGET_SCHEMA: &str = "cybershield_core::schema";

/// Tracing target for the analysis orchestrator.
pub const TRACING_TARGET_ORCHESTRATOR: &str = "cybershield_core::orchestrator";

mod error;
mod fetch;
mod orchestrator;
mod prompt;
mod sanitize;

pub mod analysis;
pub mod gateway;
pub mod schema;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;

#[doc(hidden)]
pub mod prelude;

pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::fetch::ArticleFetcher;
pub use crate::orchestrator::{Analyzer, AnalyzerConfig};
pub use crate::prompt::Prompt;
pub use crate::sanitize::sanitize;
