//! Response types for HTTP handlers.

mod accounts;
mod error_response;
mod messages;
mod monitors;
mod vault;

pub use accounts::*;
pub(crate) use error_response::ErrorResponse;
pub use messages::*;
pub use monitors::*;
pub use vault::*;
