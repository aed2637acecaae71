//! Plain confirmation responses.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Confirmation body carrying a single human-readable message.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: Cow<'static, str>,
}

impl Message {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
