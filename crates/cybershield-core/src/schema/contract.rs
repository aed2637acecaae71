//! Static field contracts, one per analysis kind.
//!
//! A contract lists every field a model response must carry, in the order
//! they are checked, together with the type or closed value set each field
//! must satisfy. The same table drives both validation and the schema
//! section of every prompt.

use std::fmt::Write as _;

use strum::VariantNames;

use crate::analysis::{AnalysisKind, EmailVerdict, NewsVerdict, UrlVerdict};

/// Number of passwords a generation response must contain.
pub const GENERATED_PASSWORD_COUNT: usize = 3;

/// Shortest acceptable generated password, in characters.
pub const GENERATED_PASSWORD_MIN_CHARS: usize = 14;

/// Longest acceptable generated password, in characters.
pub const GENERATED_PASSWORD_MAX_CHARS: usize = 18;

/// Special characters the model is asked to use in generated passwords.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*";

/// Criteria names of a password analysis, in prompt order.
pub const PASSWORD_CRITERIA: &[&str] = &[
    "Length",
    "Variety",
    "Entropy",
    "DictionaryResistance",
    "Repetition",
    "PersonalInfo",
    "BreachMatch",
];

/// Keys of the `checks` object of a URL check.
pub const URL_CHECK_KEYS: &[&str] = &[
    "https_usage",
    "domain_reputation",
    "phishing_indicators",
    "malware_scan",
    "typosquatting_risk",
];

/// Keys of the `analysis` object of an email check.
pub const EMAIL_CHECK_KEYS: &[&str] = &[
    "sender_address",
    "subject_and_tone",
    "content_and_grammar",
    "links_and_attachments",
    "malicious_intent",
];

/// Keys of the `details` object of a news check.
pub const NEWS_CHECK_KEYS: &[&str] = &[
    "source_reliability",
    "author_credibility",
    "claim_verification",
    "bias_and_language_analysis",
];

/// Expected type of a single response field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Any JSON string.
    Text,
    /// A JSON integer in `min..=max`. Floats and numeric strings are rejected.
    Integer { min: i64, max: i64 },
    /// A JSON string that is exactly one of the listed values.
    OneOf(&'static [&'static str]),
    /// An array of exactly `count` strings, each `min_chars..=max_chars`
    /// characters long and mixing lowercase, uppercase, digits and symbols.
    PasswordList {
        count: usize,
        min_chars: usize,
        max_chars: usize,
    },
    /// An object with a string value for every listed key.
    TextMap(&'static [&'static str]),
    /// An object with an integer in `min..=max` for every listed key.
    ScoreMap {
        keys: &'static [&'static str],
        min: i64,
        max: i64,
    },
}

impl FieldType {
    /// Human-readable description used in prompts.
    pub fn describe(&self) -> String {
        match self {
            Self::Text => "a string".to_owned(),
            Self::Integer { min, max } => format!("an integer from {min} to {max}"),
            Self::OneOf(values) => format!("exactly one of {}", quoted_list(values)),
            Self::PasswordList {
                count,
                min_chars,
                max_chars,
            } => format!(
                "an array of exactly {count} strings, each {min_chars} to {max_chars} characters \
                 long and containing uppercase letters, lowercase letters, numbers and special \
                 characters"
            ),
            Self::TextMap(keys) => {
                format!("an object with a string value for each of {}", quoted_list(keys))
            }
            Self::ScoreMap { keys, min, max } => format!(
                "an object with an integer from {min} to {max} for each of {}",
                quoted_list(keys)
            ),
        }
    }
}

/// A required field of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldContract {
    pub name: &'static str,
    pub field_type: FieldType,
}

impl FieldContract {
    const fn new(name: &'static str, field_type: FieldType) -> Self {
        Self { name, field_type }
    }
}

/// Shape contract a model response must satisfy for one analysis kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contract {
    pub kind: AnalysisKind,
    pub fields: &'static [FieldContract],
    /// A response that satisfies this contract, shown to the model.
    pub example: &'static str,
}

impl Contract {
    /// Returns the contract for `kind`.
    pub fn for_kind(kind: AnalysisKind) -> &'static Contract {
        match kind {
            AnalysisKind::PasswordGeneration => &PASSWORD_GENERATION,
            AnalysisKind::PasswordAnalysis => &PASSWORD_ANALYSIS,
            AnalysisKind::UrlCheck => &URL_CHECK,
            AnalysisKind::EmailCheck => &EMAIL_CHECK,
            AnalysisKind::NewsCheck => &NEWS_CHECK,
        }
    }

    /// Returns the contract of a single field, if the contract has it.
    pub fn field(&self, name: &str) -> Option<&FieldContract> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Renders the schema description embedded in prompts.
    pub fn describe(&self) -> String {
        let mut out = String::from("A single JSON object with these keys:\n");
        for field in self.fields {
            let _ = writeln!(out, "- \"{}\": {}", field.name, field.field_type.describe());
        }
        out
    }
}

static PASSWORD_GENERATION: Contract = Contract {
    kind: AnalysisKind::PasswordGeneration,
    fields: &[FieldContract::new(
        "passwords",
        FieldType::PasswordList {
            count: GENERATED_PASSWORD_COUNT,
            min_chars: GENERATED_PASSWORD_MIN_CHARS,
            max_chars: GENERATED_PASSWORD_MAX_CHARS,
        },
    )],
    example: r#"{"passwords": ["q7R!mZ2@xLp9#vTe", "H4$nW8k^Yb1&uQzs", "3fJ*pX6!tR9@cMwa"]}"#,
};

static PASSWORD_ANALYSIS: Contract = Contract {
    kind: AnalysisKind::PasswordAnalysis,
    fields: &[FieldContract::new(
        "analysis",
        FieldType::ScoreMap {
            keys: PASSWORD_CRITERIA,
            min: 1,
            max: 5,
        },
    )],
    example: r#"{"analysis": {"Length": 5, "Variety": 5, "Entropy": 4, "DictionaryResistance": 5, "Repetition": 4, "PersonalInfo": 5, "BreachMatch": 5}}"#,
};

static URL_CHECK: Contract = Contract {
    kind: AnalysisKind::UrlCheck,
    fields: &[
        FieldContract::new("verdict", FieldType::OneOf(UrlVerdict::VARIANTS)),
        FieldContract::new("summary", FieldType::Text),
        FieldContract::new("checks", FieldType::TextMap(URL_CHECK_KEYS)),
    ],
    example: r#"{
  "verdict": "Safe", "summary": "This URL appears to be safe.",
  "checks": { "https_usage": "Yes", "domain_reputation": "Good", "phishing_indicators": "No obvious signs of phishing detected.", "malware_scan": "No malware detected in simulated scan.", "typosquatting_risk": "Low" }
}"#,
};

static EMAIL_CHECK: Contract = Contract {
    kind: AnalysisKind::EmailCheck,
    fields: &[
        FieldContract::new("verdict", FieldType::OneOf(EmailVerdict::VARIANTS)),
        FieldContract::new("score", FieldType::Integer { min: 0, max: 100 }),
        FieldContract::new("summary", FieldType::Text),
        FieldContract::new("analysis", FieldType::TextMap(EMAIL_CHECK_KEYS)),
    ],
    example: r#"{
  "verdict": "Phishing", "score": 95, "summary": "This email is a classic phishing attempt, impersonating a known brand to steal credentials.",
  "analysis": { "sender_address": "Warning: The sender domain is suspicious.", "subject_and_tone": "High Risk: The subject uses urgent language.", "content_and_grammar": "Suspicious: The email has grammatical errors.", "links_and_attachments": "Critical: The link directs to a malicious domain.", "malicious_intent": "Confirmed: The email asks for credentials." }
}"#,
};

static NEWS_CHECK: Contract = Contract {
    kind: AnalysisKind::NewsCheck,
    fields: &[
        FieldContract::new("verdict", FieldType::OneOf(NewsVerdict::VARIANTS)),
        FieldContract::new("confidence", FieldType::Integer { min: 0, max: 100 }),
        FieldContract::new("summary", FieldType::Text),
        FieldContract::new("details", FieldType::TextMap(NEWS_CHECK_KEYS)),
    ],
    example: r#"{
  "verdict": "Likely Fake", "confidence": 94, "summary": "The claims are not supported by credible outlets and the source is unreliable.",
  "details": { "source_reliability": "Poor: The source is a known conspiracy site.", "author_credibility": "Questionable: The author writes biased articles.", "claim_verification": "Failed: No reputable sources corroborate the claims.", "bias_and_language_analysis": "High: The title is inflammatory." }
}"#,
};

fn quoted_list(values: &[&str]) -> String {
    values
        .iter()
        .map(|value| format!("\"{value}\""))
        .collect::<Vec<_>>()
        .join(", ")
}
