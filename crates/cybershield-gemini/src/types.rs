//! Wire types for the `generateContent` endpoint.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

impl<'a> GenerateContentRequest<'a> {
    /// Single user turn carrying `text`.
    pub fn new(text: &'a str, temperature: Option<f32>) -> Self {
        Self {
            contents: [Content {
                role: "user",
                parts: [Part { text }],
            }],
            generation_config: temperature.map(|temperature| GenerationConfig { temperature }),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UsageMetadata {
    pub prompt_token_count: Option<u32>,
    pub candidates_token_count: Option<u32>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    pub fn into_text(self) -> Result<String> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(match self.prompt_feedback.and_then(|f| f.block_reason) {
                Some(reason) => Error::Blocked { reason },
                None => Error::EmptyResponse,
            });
        };

        let text: String = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if !text.is_empty() {
            return Ok(text);
        }

        match candidate.finish_reason.as_deref() {
            Some(reason @ ("SAFETY" | "BLOCKLIST" | "PROHIBITED_CONTENT" | "SPII")) => {
                Err(Error::Blocked {
                    reason: reason.to_owned(),
                })
            }
            _ => Err(Error::EmptyResponse),
        }
    }
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorDetail {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).expect("valid response shape")
    }

    #[test]
    fn request_serializes_single_user_turn() -> anyhow::Result<()> {
        let body = serde_json::to_value(GenerateContentRequest::new("hello", None))?;
        assert_eq!(
            body,
            json!({"contents": [{"role": "user", "parts": [{"text": "hello"}]}]})
        );

        let body = serde_json::to_value(GenerateContentRequest::new("hello", Some(0.5)))?;
        assert_eq!(body["generationConfig"]["temperature"], json!(0.5));
        Ok(())
    }

    #[test]
    fn text_parts_are_concatenated() -> anyhow::Result<()> {
        let response = parse(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "```json\n{\"a\""}, {"text": ": 1}\n```"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 7}
        }));

        assert_eq!(response.into_text()?, "```json\n{\"a\": 1}\n```");
        Ok(())
    }

    #[test]
    fn only_first_candidate_is_used() -> anyhow::Result<()> {
        let response = parse(json!({
            "candidates": [
                {"content": {"parts": [{"text": "first"}]}},
                {"content": {"parts": [{"text": "second"}]}}
            ]
        }));

        assert_eq!(response.into_text()?, "first");
        Ok(())
    }

    #[test]
    fn blocked_prompt_is_reported() {
        let response = parse(json!({"promptFeedback": {"blockReason": "SAFETY"}}));
        assert!(matches!(
            response.into_text(),
            Err(Error::Blocked { reason }) if reason == "SAFETY"
        ));
    }

    #[test]
    fn missing_text_is_empty_response() {
        let response = parse(json!({}));
        assert!(matches!(response.into_text(), Err(Error::EmptyResponse)));

        let response = parse(json!({"candidates": [{"finishReason": "MAX_TOKENS"}]}));
        assert!(matches!(response.into_text(), Err(Error::EmptyResponse)));

        let response = parse(json!({"candidates": [{"finishReason": "SAFETY"}]}));
        assert!(matches!(response.into_text(), Err(Error::Blocked { .. })));
    }

    #[test]
    fn error_envelope_parses() -> anyhow::Result<()> {
        let body: ApiErrorBody = serde_json::from_value(json!({
            "error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}
        }))?;
        assert_eq!(body.error.message, "API key not valid.");
        Ok(())
    }
}
