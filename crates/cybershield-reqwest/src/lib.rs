#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for article fetches.
pub const TRACING_TARGET: &str = "cybershield_reqwest::article";

mod article;
mod config;
mod error;

pub use crate::article::{HttpArticleFetcher, extract_paragraph_text, parse_article};
pub use crate::config::{DEFAULT_MAX_BODY_BYTES, FetcherConfig};
pub use crate::error::{Error, Result};
