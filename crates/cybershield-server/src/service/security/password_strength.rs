//! Account password strength evaluation using zxcvbn.

use serde::{Deserialize, Serialize};
use zxcvbn::zxcvbn;

use crate::handler::{ErrorKind, Result};

const TRACING_TARGET: &str = "cybershield_server::service::password_strength";

/// Default minimum zxcvbn score accepted at registration.
pub const DEFAULT_MIN_SCORE: u8 = 2;

/// Highest score zxcvbn produces.
const MAX_SCORE: u8 = 4;

/// Rejects account passwords below a minimum zxcvbn score.
#[derive(Debug, Clone, Copy)]
pub struct PasswordStrength {
    min_score: u8,
}

/// Outcome of a single evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordStrengthResult {
    /// Score from 0 (weakest) to 4 (strongest).
    pub score: u8,
    /// Estimated guesses needed to crack the password.
    pub guesses: u64,
    pub warning: Option<String>,
    pub suggestions: Vec<String>,
}

impl PasswordStrength {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an evaluator with a custom minimum, clamped to 0..=4.
    #[inline]
    pub fn with_min_score(min_score: u8) -> Self {
        Self {
            min_score: min_score.min(MAX_SCORE),
        }
    }

    #[inline]
    pub fn min_score(&self) -> u8 {
        self.min_score
    }

    /// Scores `password`, penalising the given user-specific words.
    pub fn evaluate(&self, password: &str, user_inputs: &[&str]) -> PasswordStrengthResult {
        let entropy = zxcvbn(password, user_inputs);

        let (warning, suggestions) = match entropy.feedback() {
            Some(feedback) => (
                feedback.warning().map(|w| w.to_string()),
                feedback.suggestions().iter().map(|s| s.to_string()).collect(),
            ),
            None => (None, Vec::new()),
        };

        PasswordStrengthResult {
            score: entropy.score().into(),
            guesses: entropy.guesses(),
            warning,
            suggestions,
        }
    }

    /// Fails with `400` when `password` scores below the minimum.
    ///
    /// The zxcvbn warning becomes the error context and the suggestions
    /// are appended to it.
    pub fn validate_password(&self, password: &str, user_inputs: &[&str]) -> Result<()> {
        let result = self.evaluate(password, user_inputs);

        if result.score >= self.min_score {
            tracing::debug!(
                target: TRACING_TARGET,
                score = result.score,
                "password strength accepted"
            );
            return Ok(());
        }

        tracing::debug!(
            target: TRACING_TARGET,
            score = result.score,
            min_score = self.min_score,
            "password strength rejected"
        );

        let mut error = ErrorKind::BadRequest
            .with_message("Password is too weak")
            .with_resource("password");

        let hints: Vec<String> = result
            .warning
            .into_iter()
            .chain(result.suggestions)
            .collect();
        if !hints.is_empty() {
            error = error.with_context(hints.join(" "));
        }

        Err(error)
    }
}

impl Default for PasswordStrength {
    fn default() -> Self {
        Self::with_min_score(DEFAULT_MIN_SCORE)
    }
}
