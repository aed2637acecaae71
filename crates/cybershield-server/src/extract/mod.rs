//! Request extractors whose rejections render as handler [`Error`]s.
//!
//! - [`Json`] - JSON bodies with `400` responses for malformed input
//! - [`Path`] - path parameters with `400` responses for bad values
//!
//! [`Error`]: crate::handler::Error

pub mod reject;

pub(crate) use crate::extract::reject::MAX_JSON_PAYLOAD_SIZE;
pub use crate::extract::reject::{Json, Path};
