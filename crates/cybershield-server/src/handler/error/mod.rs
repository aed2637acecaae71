//! [`Error`], [`ErrorKind`] and [`Result`].

mod analysis_error;
mod crypto_error;
mod http_error;
mod pg_account;
mod pg_error;
mod pg_vault;

pub use http_error::{Error, ErrorKind, Result};
