//! Analysis kinds, requests, results and the orchestrator error.

mod error;
mod request;
mod result;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoStaticStr};

pub use self::error::{ApplicationError, InputError};
pub use self::request::{
    AnalysisRequest, EmailCheckInput, NewsCheckInput, PasswordAnalysisInput, UrlCheckInput,
};
pub use self::result::{
    AnalysisResult, EmailCheckResult, EmailFindings, EmailVerdict, GeneratedPasswords,
    NewsCheckResult, NewsFindings, NewsVerdict, PasswordAnalysisResult, PasswordScores,
    UrlCheckResult, UrlChecks, UrlVerdict,
};

/// One of the supported triage or generation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumIter, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AnalysisKind {
    PasswordGeneration,
    PasswordAnalysis,
    UrlCheck,
    EmailCheck,
    NewsCheck,
}

impl AnalysisKind {
    /// Returns `true` if the analysis needs article text fetched before
    /// the prompt can be built.
    #[inline]
    pub const fn requires_article(self) -> bool {
        matches!(self, Self::NewsCheck)
    }
}
