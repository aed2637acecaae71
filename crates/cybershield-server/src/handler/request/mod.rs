//! Request bodies accepted by the handlers.
//!
//! Every field defaults to empty when absent so that handlers can answer
//! missing input with their own `400` message.

mod accounts;
mod analysis;
mod vault;

pub use self::accounts::{LoginAccount, RegisterAccount};
pub use self::analysis::{AnalyzeEmail, AnalyzePassword, CheckNews, CheckUrl};
pub use self::vault::{DeletePassword, StorePassword};
