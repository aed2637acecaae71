//! Typed analysis results.
//!
//! Values of these types are only produced by the schema validator from
//! model output that satisfied the contract for the matching kind.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantNames};

use super::AnalysisKind;

/// Three freshly generated passwords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPasswords {
    pub passwords: Vec<String>,
}

/// Seven password-strength scores, each between 1 and 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PasswordScores {
    pub length: u8,
    pub variety: u8,
    pub entropy: u8,
    pub dictionary_resistance: u8,
    pub repetition: u8,
    pub personal_info: u8,
    pub breach_match: u8,
}

impl PasswordScores {
    /// Returns every score in criteria order.
    pub fn as_array(&self) -> [u8; 7] {
        [
            self.length,
            self.variety,
            self.entropy,
            self.dictionary_resistance,
            self.repetition,
            self.personal_info,
            self.breach_match,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordAnalysisResult {
    pub analysis: PasswordScores,
}

/// Final verdict of a URL check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumString, VariantNames)]
pub enum UrlVerdict {
    Safe,
    Suspicious,
    Malicious,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlChecks {
    pub https_usage: String,
    pub domain_reputation: String,
    pub phishing_indicators: String,
    pub malware_scan: String,
    pub typosquatting_risk: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlCheckResult {
    pub verdict: UrlVerdict,
    pub summary: String,
    pub checks: UrlChecks,
}

/// Final verdict of an email check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumString, VariantNames)]
pub enum EmailVerdict {
    Safe,
    Suspicious,
    Phishing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailFindings {
    pub sender_address: String,
    pub subject_and_tone: String,
    pub content_and_grammar: String,
    pub links_and_attachments: String,
    pub malicious_intent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailCheckResult {
    pub verdict: EmailVerdict,
    /// Risk score from 0 (safe) to 100 (definitely phishing).
    pub score: u8,
    pub summary: String,
    pub analysis: EmailFindings,
}

/// Final verdict of a news check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumString, VariantNames)]
pub enum NewsVerdict {
    #[serde(rename = "Likely True")]
    #[strum(serialize = "Likely True")]
    LikelyTrue,
    #[serde(rename = "Likely Fake")]
    #[strum(serialize = "Likely Fake")]
    LikelyFake,
    #[serde(rename = "Not Verified")]
    #[strum(serialize = "Not Verified")]
    NotVerified,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsFindings {
    pub source_reliability: String,
    pub author_credibility: String,
    pub claim_verification: String,
    pub bias_and_language_analysis: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsCheckResult {
    pub verdict: NewsVerdict,
    /// Confidence in the verdict, from 0 to 100.
    pub confidence: u8,
    pub summary: String,
    pub details: NewsFindings,
}

/// Tagged union mirroring [`AnalysisRequest`].
///
/// Serializes without a tag so the HTTP body is exactly the result object.
///
/// [`AnalysisRequest`]: super::AnalysisRequest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    PasswordGeneration(GeneratedPasswords),
    PasswordAnalysis(PasswordAnalysisResult),
    UrlCheck(UrlCheckResult),
    EmailCheck(EmailCheckResult),
    NewsCheck(NewsCheckResult),
}

impl AnalysisResult {
    /// Returns the kind this result belongs to.
    pub fn kind(&self) -> AnalysisKind {
        match self {
            Self::PasswordGeneration(_) => AnalysisKind::PasswordGeneration,
            Self::PasswordAnalysis(_) => AnalysisKind::PasswordAnalysis,
            Self::UrlCheck(_) => AnalysisKind::UrlCheck,
            Self::EmailCheck(_) => AnalysisKind::EmailCheck,
            Self::NewsCheck(_) => AnalysisKind::NewsCheck,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn news_verdicts_use_spaced_names() {
        assert_eq!(NewsVerdict::LikelyFake.to_string(), "Likely Fake");
        assert_eq!(
            serde_json::to_value(NewsVerdict::NotVerified).unwrap(),
            json!("Not Verified")
        );
        assert_eq!(
            NewsVerdict::VARIANTS,
            ["Likely True", "Likely Fake", "Not Verified"]
        );
    }

    #[test]
    fn password_scores_use_criteria_names() {
        let scores = PasswordScores {
            length: 5,
            variety: 4,
            entropy: 3,
            dictionary_resistance: 2,
            repetition: 1,
            personal_info: 5,
            breach_match: 5,
        };
        let value = serde_json::to_value(scores).unwrap();
        assert_eq!(value["DictionaryResistance"], 2);
        assert_eq!(value["PersonalInfo"], 5);
        assert_eq!(scores.as_array(), [5, 4, 3, 2, 1, 5, 5]);
    }

    #[test]
    fn results_serialize_without_tag() {
        let result = AnalysisResult::PasswordGeneration(GeneratedPasswords {
            passwords: vec!["a".into(), "b".into(), "c".into()],
        });
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "passwords": ["a", "b", "c"] })
        );
        assert_eq!(result.kind(), AnalysisKind::PasswordGeneration);
    }
}
