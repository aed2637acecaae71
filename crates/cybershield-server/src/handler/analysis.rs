//! Model-backed analysis handlers.
//!
//! Each route converts its body into an [`AnalysisRequest`] and hands it to
//! the [`Analyzer`]. The validated result is returned as the response body
//! with no envelope.

use axum::Router;
use axum::extract::State;
use axum::routing::post;
use cybershield_core::Analyzer;
use cybershield_core::analysis::{AnalysisKind, AnalysisRequest, AnalysisResult};

use super::request::{AnalyzeEmail, AnalyzePassword, CheckNews, CheckUrl};
use crate::extract::Json;
use crate::handler::{Error, Result};
use crate::service::ServiceState;

/// Tracing target for analysis operations.
const TRACING_TARGET: &str = "cybershield_server::handler::analysis";

/// Client-facing text for a request missing its required input.
fn missing_input_message(kind: AnalysisKind) -> &'static str {
    match kind {
        AnalysisKind::PasswordGeneration => "Invalid request",
        AnalysisKind::PasswordAnalysis => "Password not provided",
        AnalysisKind::UrlCheck | AnalysisKind::NewsCheck => "URL is required",
        AnalysisKind::EmailCheck => "Sender email and content are required",
    }
}

async fn run_analysis(
    analyzer: &Analyzer,
    request: AnalysisRequest,
) -> Result<Json<AnalysisResult>> {
    let kind = request.kind();
    tracing::debug!(target: TRACING_TARGET, kind = %kind, "analysis requested");

    match analyzer.run(&request).await {
        Ok(result) => Ok(Json(result)),
        Err(error) if error.is_input_error() => {
            tracing::debug!(target: TRACING_TARGET, kind = %kind, error = %error, "rejected input");
            Err(Error::from(error).with_message(missing_input_message(kind)))
        }
        Err(error) => Err(error.into()),
    }
}

#[tracing::instrument(skip_all)]
async fn generate_passwords(State(analyzer): State<Analyzer>) -> Result<Json<AnalysisResult>> {
    run_analysis(&analyzer, AnalysisRequest::PasswordGeneration).await
}

#[tracing::instrument(skip_all)]
async fn analyze_password(
    State(analyzer): State<Analyzer>,
    request: Option<Json<AnalyzePassword>>,
) -> Result<Json<AnalysisResult>> {
    let Json(request) = request.unwrap_or_default();
    run_analysis(&analyzer, request.into()).await
}

#[tracing::instrument(skip_all)]
async fn check_url(
    State(analyzer): State<Analyzer>,
    request: Option<Json<CheckUrl>>,
) -> Result<Json<AnalysisResult>> {
    let Json(request) = request.unwrap_or_default();
    run_analysis(&analyzer, request.into()).await
}

#[tracing::instrument(skip_all)]
async fn analyze_email(
    State(analyzer): State<Analyzer>,
    request: Option<Json<AnalyzeEmail>>,
) -> Result<Json<AnalysisResult>> {
    let Json(request) = request.unwrap_or_default();
    run_analysis(&analyzer, request.into()).await
}

#[tracing::instrument(skip_all)]
async fn check_news(
    State(analyzer): State<Analyzer>,
    request: Option<Json<CheckNews>>,
) -> Result<Json<AnalysisResult>> {
    let Json(request) = request.unwrap_or_default();
    run_analysis(&analyzer, request.into()).await
}

/// Returns a [`Router`] with all analysis routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/generate-passwords", post(generate_passwords))
        .route("/analyze-password", post(analyze_password))
        .route("/check-url", post(check_url))
        .route("/analyze-email", post(analyze_email))
        .route("/check-news", post(check_news))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use cybershield_core::Error as CoreError;
    use cybershield_core::mock::{MockFetcher, MockProvider};
    use serde_json::{Value, json};

    use crate::handler::test::create_test_server;

    const GENERATED: &str =
        r#"{"passwords": ["q7R!mZ2@xLp9#vTe", "H4$nW8k^Yb1&uQzs", "3fJ*pX6!tR9@cMwa"]}"#;

    const PASSWORD_SCORES: &str = r#"```json
{"analysis": {"Length": 4, "Variety": 3, "Entropy": 4, "DictionaryResistance": 5,
 "Repetition": 5, "PersonalInfo": 2, "BreachMatch": 3}}
```"#;

    const URL_VERDICT: &str = r#"{"verdict": "Suspicious", "summary": "Lookalike domain.",
        "checks": {"https_usage": "Valid certificate.", "domain_reputation": "Registered last week.",
        "phishing_indicators": "Login form on a payment lookalike.", "malware_scan": "Nothing found.",
        "typosquatting_risk": "High: paypa1 imitates paypal."}}"#;

    const EMAIL_VERDICT: &str = r#"{"verdict": "Phishing", "score": 97,
        "summary": "Credential harvesting attempt.",
        "analysis": {"sender_address": "Lookalike domain.", "subject_and_tone": "Urgent.",
        "content_and_grammar": "Generic greeting.", "links_and_attachments": "Masked link.",
        "malicious_intent": "Asks for the account password."}}"#;

    const NEWS_VERDICT: &str = r#"{"verdict": "Not Verified", "confidence": 40,
        "summary": "Single anonymous source.",
        "details": {"source_reliability": "Unknown outlet.", "author_credibility": "No byline.",
        "claim_verification": "No corroboration found.",
        "bias_and_language_analysis": "Sensational wording."}}"#;

    #[tokio::test]
    async fn generate_passwords_returns_three() -> anyhow::Result<()> {
        let provider = MockProvider::new().with_response(GENERATED);
        let server = create_test_server(provider.clone(), MockFetcher::new())?;

        let response = server.post("/api/generate-passwords").await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["passwords"].as_array().map(Vec::len), Some(3));
        assert_eq!(provider.call_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn analyze_password_strips_fences() -> anyhow::Result<()> {
        let provider = MockProvider::new().with_response(PASSWORD_SCORES);
        let server = create_test_server(provider.clone(), MockFetcher::new())?;

        let response = server
            .post("/api/analyze-password")
            .json(&json!({"password": "Tr0ub4dor&3"}))
            .await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["analysis"]["DictionaryResistance"], 5);

        let prompts = provider.prompts();
        assert!(prompts[0].contains("Tr0ub4dor&3"));
        assert!(prompts[0].contains("example.com"));
        Ok(())
    }

    #[tokio::test]
    async fn analyze_password_requires_password() -> anyhow::Result<()> {
        let provider = MockProvider::new().with_response(PASSWORD_SCORES);
        let server = create_test_server(provider.clone(), MockFetcher::new())?;

        let response = server
            .post("/api/analyze-password")
            .json(&json!({"username": "alice"}))
            .await;
        response.assert_status_bad_request();

        let body = response.json::<Value>();
        assert_eq!(body["error"], "Password not provided");
        assert_eq!(provider.call_count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn check_url_without_body_is_bad_request() -> anyhow::Result<()> {
        let provider = MockProvider::new().with_response(URL_VERDICT);
        let server = create_test_server(provider.clone(), MockFetcher::new())?;

        let response = server.post("/api/check-url").await;
        response.assert_status_bad_request();

        let body = response.json::<Value>();
        assert_eq!(body["error"], "URL is required");
        assert_eq!(provider.call_count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn check_url_returns_verdict() -> anyhow::Result<()> {
        let provider = MockProvider::new().with_response(URL_VERDICT);
        let server = create_test_server(provider, MockFetcher::new())?;

        let response = server
            .post("/api/check-url")
            .json(&json!({"url": "https://paypa1.com/login"}))
            .await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["verdict"], "Suspicious");
        assert!(body["checks"]["typosquatting_risk"].is_string());
        Ok(())
    }

    #[tokio::test]
    async fn analyze_email_returns_verdict() -> anyhow::Result<()> {
        let provider = MockProvider::new().with_response(EMAIL_VERDICT);
        let server = create_test_server(provider, MockFetcher::new())?;

        let response = server
            .post("/api/analyze-email")
            .json(&json!({
                "from_email": "security@paypa1.com",
                "email_content": "Your account is locked. Verify now."
            }))
            .await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["verdict"], "Phishing");
        assert_eq!(body["score"], 97);
        Ok(())
    }

    #[tokio::test]
    async fn analyze_email_requires_both_fields() -> anyhow::Result<()> {
        let provider = MockProvider::new().with_response(EMAIL_VERDICT);
        let server = create_test_server(provider.clone(), MockFetcher::new())?;

        let response = server
            .post("/api/analyze-email")
            .json(&json!({"from_email": "security@paypa1.com", "email_content": "  "}))
            .await;
        response.assert_status_bad_request();

        let body = response.json::<Value>();
        assert_eq!(body["error"], "Sender email and content are required");
        assert_eq!(provider.call_count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn check_news_fetches_article_first() -> anyhow::Result<()> {
        let provider = MockProvider::new().with_response(NEWS_VERDICT);
        let fetcher = MockFetcher::new().with_article("Officials confirmed nothing.");
        let server = create_test_server(provider.clone(), fetcher.clone())?;

        let response = server
            .post("/api/check-news")
            .json(&json!({"url": "https://news.example.org/story", "author": "J. Doe"}))
            .await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["verdict"], "Not Verified");
        assert_eq!(body["confidence"], 40);
        assert_eq!(fetcher.call_count(), 1);
        assert!(provider.prompts()[0].contains("Officials confirmed nothing."));
        Ok(())
    }

    #[tokio::test]
    async fn check_news_without_article_skips_model() -> anyhow::Result<()> {
        let provider = MockProvider::new().with_response(NEWS_VERDICT);
        let fetcher = MockFetcher::new().with_error(CoreError::network_error);
        let server = create_test_server(provider.clone(), fetcher)?;

        let response = server
            .post("/api/check-news")
            .json(&json!({"url": "https://news.example.org/story"}))
            .await;
        response.assert_status_internal_server_error();

        let body = response.json::<Value>();
        assert_eq!(
            body["error"],
            "Failed to fetch or parse article content from the URL."
        );
        assert_eq!(provider.call_count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn provider_failure_is_internal_error() -> anyhow::Result<()> {
        let provider = MockProvider::new().with_error(CoreError::rate_limited);
        let server = create_test_server(provider, MockFetcher::new())?;

        let response = server.post("/api/generate-passwords").await;
        response.assert_status_internal_server_error();

        let body = response.json::<Value>();
        let message = body["error"].as_str().unwrap_or_default();
        assert!(message.starts_with("An error occurred with the AI model"));
        Ok(())
    }

    #[tokio::test]
    async fn malformed_model_output_is_rejected_whole() -> anyhow::Result<()> {
        let provider = MockProvider::new().with_response(r#"{"verdict": "Safe"}"#);
        let server = create_test_server(provider, MockFetcher::new())?;

        let response = server
            .post("/api/check-url")
            .json(&json!({"url": "https://example.com"}))
            .await;
        response.assert_status_internal_server_error();

        let body = response.json::<Value>();
        let message = body["error"].as_str().unwrap_or_default();
        assert!(message.starts_with("The AI model returned an invalid response"));
        assert!(body.get("verdict").is_none());
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn slow_model_fails_closed() -> anyhow::Result<()> {
        let provider = MockProvider::new()
            .with_response(GENERATED)
            .with_delay(Duration::from_secs(60));
        let server = create_test_server(provider, MockFetcher::new())?;

        let response = server.post("/api/generate-passwords").await;
        response.assert_status_internal_server_error();

        let body = response.json::<Value>();
        assert!(body.get("passwords").is_none());
        Ok(())
    }
}
