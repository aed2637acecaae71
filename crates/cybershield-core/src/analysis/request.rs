//! Untrusted request payloads, one variant per analysis kind.

use serde::{Deserialize, Serialize};

use super::{AnalysisKind, InputError};

/// Username used for password analysis when the caller does not supply one.
pub const DEFAULT_USERNAME: &str = "user";

/// Website used for password analysis when the caller does not supply one.
pub const DEFAULT_WEBSITE: &str = "example.com";

/// Fields of a password analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordAnalysisInput {
    pub password: String,
    pub username: String,
    pub website: String,
}

impl PasswordAnalysisInput {
    /// Creates an input for `password` with the default username and website.
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            username: DEFAULT_USERNAME.to_owned(),
            website: DEFAULT_WEBSITE.to_owned(),
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.website = website.into();
        self
    }
}

/// Fields of a URL check request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlCheckInput {
    pub url: String,
}

/// Fields of an email check request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailCheckInput {
    pub from_email: String,
    pub email_content: String,
}

/// Fields of a news check request.
///
/// The article body is not part of the request; it is fetched from `url`
/// by the orchestrator before the prompt is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsCheckInput {
    pub url: String,
    pub title: Option<String>,
    pub source: Option<String>,
    pub author: Option<String>,
}

/// Tagged union over every analysis an HTTP caller can request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisRequest {
    PasswordGeneration,
    PasswordAnalysis(PasswordAnalysisInput),
    UrlCheck(UrlCheckInput),
    EmailCheck(EmailCheckInput),
    NewsCheck(NewsCheckInput),
}

impl AnalysisRequest {
    /// Returns the kind of this request.
    pub fn kind(&self) -> AnalysisKind {
        match self {
            Self::PasswordGeneration => AnalysisKind::PasswordGeneration,
            Self::PasswordAnalysis(_) => AnalysisKind::PasswordAnalysis,
            Self::UrlCheck(_) => AnalysisKind::UrlCheck,
            Self::EmailCheck(_) => AnalysisKind::EmailCheck,
            Self::NewsCheck(_) => AnalysisKind::NewsCheck,
        }
    }

    /// Returns the article location for requests that read one.
    pub fn article_url(&self) -> Option<&str> {
        match self {
            Self::NewsCheck(input) => Some(&input.url),
            _ => None,
        }
    }

    /// Checks that every required field is present and non-blank.
    ///
    /// Optional fields and defaulted fields are never rejected.
    pub fn validate(&self) -> Result<(), InputError> {
        match self {
            Self::PasswordGeneration => Ok(()),
            Self::PasswordAnalysis(input) => require("password", &input.password),
            Self::UrlCheck(input) => require("url", &input.url),
            Self::EmailCheck(input) => {
                require("from_email", &input.from_email)?;
                require("email_content", &input.email_content)
            }
            Self::NewsCheck(input) => require("url", &input.url),
        }
    }
}

fn require(field: &'static str, value: &str) -> Result<(), InputError> {
    if value.trim().is_empty() {
        return Err(InputError::MissingField { field });
    }
    Ok(())
}
