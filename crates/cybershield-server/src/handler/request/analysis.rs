//! Analysis request bodies.

use cybershield_core::analysis::{
    AnalysisRequest, EmailCheckInput, NewsCheckInput, PasswordAnalysisInput, UrlCheckInput,
};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/analyze-password`.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzePassword {
    pub password: String,
    /// Defaults to `user` when absent or blank.
    pub username: Option<String>,
    /// Defaults to `example.com` when absent or blank.
    pub website: Option<String>,
}

impl From<AnalyzePassword> for AnalysisRequest {
    fn from(body: AnalyzePassword) -> Self {
        let mut input = PasswordAnalysisInput::new(body.password);
        if let Some(username) = non_blank(body.username) {
            input = input.with_username(username);
        }
        if let Some(website) = non_blank(body.website) {
            input = input.with_website(website);
        }
        AnalysisRequest::PasswordAnalysis(input)
    }
}

/// Body of `POST /api/check-url`.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckUrl {
    pub url: String,
}

impl From<CheckUrl> for AnalysisRequest {
    fn from(body: CheckUrl) -> Self {
        AnalysisRequest::UrlCheck(UrlCheckInput { url: body.url })
    }
}

/// Body of `POST /api/analyze-email`.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeEmail {
    pub from_email: String,
    pub email_content: String,
}

impl From<AnalyzeEmail> for AnalysisRequest {
    fn from(body: AnalyzeEmail) -> Self {
        AnalysisRequest::EmailCheck(EmailCheckInput {
            from_email: body.from_email,
            email_content: body.email_content,
        })
    }
}

/// Body of `POST /api/check-news`.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckNews {
    pub url: String,
    pub title: Option<String>,
    pub source: Option<String>,
    pub author: Option<String>,
}

impl From<CheckNews> for AnalysisRequest {
    fn from(body: CheckNews) -> Self {
        AnalysisRequest::NewsCheck(NewsCheckInput {
            url: body.url,
            title: non_blank(body.title),
            source: non_blank(body.source),
            author: non_blank(body.author),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_analysis_fills_defaults() {
        let body = AnalyzePassword {
            password: "hunter2".into(),
            username: Some("  ".into()),
            website: None,
        };

        let AnalysisRequest::PasswordAnalysis(input) = AnalysisRequest::from(body) else {
            panic!("expected password analysis");
        };
        assert_eq!(input.username, "user");
        assert_eq!(input.website, "example.com");
    }

    #[test]
    fn missing_fields_deserialize_as_empty() -> anyhow::Result<()> {
        let body: AnalyzeEmail = serde_json::from_str(r#"{"from_email": "a@b.c"}"#)?;
        assert_eq!(body.email_content, "");
        Ok(())
    }

    #[test]
    fn news_metadata_is_optional() -> anyhow::Result<()> {
        let body: CheckNews =
            serde_json::from_str(r#"{"url": "https://news.example.org/a", "title": ""}"#)?;

        let AnalysisRequest::NewsCheck(input) = AnalysisRequest::from(body) else {
            panic!("expected news check");
        };
        assert_eq!(input.title, None);
        assert_eq!(input.author, None);
        Ok(())
    }
}
