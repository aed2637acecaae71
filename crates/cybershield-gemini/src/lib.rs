#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for Gemini client operations.
pub const TRACING_TARGET: &str = "cybershield_gemini::client";

mod client;
mod config;
mod error;
mod types;

pub use crate::client::GeminiClient;
pub use crate::config::{GeminiConfig, GeminiConfigBuilder};
pub use crate::error::{Error, Result};
