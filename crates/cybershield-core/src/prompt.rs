//! Deterministic prompt construction.
//!
//! Every prompt restates the caller's fields verbatim inside quotes (or
//! between `---` markers for free-form bodies), lists the criteria for its
//! kind, describes the output schema from the contract table, shows one
//! worked example and asks for the JSON object alone.

use std::fmt::Write as _;

use derive_more::{Display, Into};

use crate::analysis::{
    AnalysisKind, AnalysisRequest, EmailCheckInput, NewsCheckInput, PasswordAnalysisInput,
    UrlCheckInput,
};
use crate::schema::{
    Contract, GENERATED_PASSWORD_COUNT, GENERATED_PASSWORD_MAX_CHARS,
    GENERATED_PASSWORD_MIN_CHARS, PASSWORD_SYMBOLS,
};

/// Placeholder for optional news metadata the caller left out.
const NOT_PROVIDED: &str = "Not provided";

/// Fully rendered instruction text sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Into)]
pub struct Prompt(String);

impl Prompt {
    /// Renders the prompt for `request`.
    ///
    /// `article` is the fetched article body for news checks and is ignored
    /// for every other kind.
    pub fn build(request: &AnalysisRequest, article: Option<&str>) -> Self {
        let body = match request {
            AnalysisRequest::PasswordGeneration => password_generation(),
            AnalysisRequest::PasswordAnalysis(input) => password_analysis(input),
            AnalysisRequest::UrlCheck(input) => url_check(input),
            AnalysisRequest::EmailCheck(input) => email_check(input),
            AnalysisRequest::NewsCheck(input) => news_check(input, article.unwrap_or_default()),
        };

        Self(with_output_contract(body, request.kind()))
    }

    /// Returns the prompt text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the prompt length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for Prompt {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

fn password_generation() -> String {
    format!(
        "Generate {GENERATED_PASSWORD_COUNT} unique, strong, and random passwords.\n\
         Each password should be between {GENERATED_PASSWORD_MIN_CHARS} and \
         {GENERATED_PASSWORD_MAX_CHARS} characters long.\n\
         Include a mix of uppercase letters, lowercase letters, numbers, and special \
         characters ({PASSWORD_SYMBOLS}).\n"
    )
}

fn password_analysis(input: &PasswordAnalysisInput) -> String {
    let PasswordAnalysisInput {
        password,
        username,
        website,
    } = input;

    format!(
        "Analyze the following password based on 7 security criteria. \
         The user's username is \"{username}\" and the website is \"{website}\".\n\
         Password to analyze: \"{password}\"\n\
         Criteria:\n\
         1. Length: Score from 1 (very short) to 5 (very long, >16 chars).\n\
         2. Variety: Score based on the mix of lowercase, uppercase, numbers, and special \
         characters. 1 (one type) to 5 (all four types).\n\
         3. Entropy: Score based on randomness. Penalize sequences like 'abc' or '123'. \
         1 (predictable) to 5 (highly random).\n\
         4. DictionaryResistance: Score based on resistance to dictionary attacks. Penalize \
         common words or names. 1 (common word) to 5 (no dictionary words).\n\
         5. Repetition: Score based on lack of repeating characters. 1 (highly repetitive) \
         to 5 (no significant repetition).\n\
         6. PersonalInfo: Score based on avoiding personal info. If the password contains \
         \"{username}\" or parts of \"{website}\", score 1. Otherwise, score 5.\n\
         7. BreachMatch: Simulate a check against known data breaches. If the password is a \
         common example like \"password123\", score 1. Otherwise, score 5.\n\
         Put the seven scores in a single key \"analysis\".\n"
    )
}

fn url_check(input: &UrlCheckInput) -> String {
    let UrlCheckInput { url } = input;

    format!(
        "Act as a cybersecurity analyst. Analyze the following URL for potential threats: \"{url}\"\n\
         Evaluate it based on these criteria:\n\
         1. Phishing Indicators: Look for signs of brand impersonation or misleading subdomains.\n\
         2. Malware Scan: Simulate a check against known malware distribution domains.\n\
         3. Domain Reputation: Assess the domain's general reputation.\n\
         4. HTTPS Usage: Check if the URL uses a secure HTTPS connection.\n\
         5. Typosquatting Risk: Analyze if the domain name is a common misspelling of a \
         popular website.\n\
         Based on your analysis, provide a final verdict: \"Safe\", \"Suspicious\", or \
         \"Malicious\".\n\
         Provide a brief, clear summary for each point.\n"
    )
}

fn email_check(input: &EmailCheckInput) -> String {
    let EmailCheckInput {
        from_email,
        email_content,
    } = input;

    format!(
        "Act as a senior cybersecurity analyst specializing in phishing detection. Analyze \
         the provided email.\n\
         Sender Address: \"{from_email}\"\n\
         Email Content: --- {email_content} ---\n\
         Evaluate the email based on these criteria:\n\
         1. Sender Address Analysis: Does the 'From' address look legitimate?\n\
         2. Subject & Tone Analysis: Does the subject line create a false sense of urgency \
         or fear?\n\
         3. Content & Grammar: Check for poor grammar, spelling mistakes, and generic greetings.\n\
         4. Links & Attachments: Analyze any links mentioned. Do they point to a suspicious \
         domain?\n\
         5. Malicious Intent: Does the email ask for personal information, login credentials, \
         or financial details?\n\
         Provide a final verdict: \"Safe\", \"Suspicious\", or \"Phishing\".\n\
         Provide a risk score from 0 (Safe) to 100 (Definitely Phishing).\n"
    )
}

fn news_check(input: &NewsCheckInput, article: &str) -> String {
    let url = &input.url;
    let title = or_not_provided(input.title.as_deref());
    let source = or_not_provided(input.source.as_deref());
    let author = or_not_provided(input.author.as_deref());

    format!(
        "Act as a professional fact-checker. Analyze the following article for authenticity \
         using the provided metadata and scraped text.\n\
         Provided Metadata:\n\
         - Article URL: \"{url}\"\n\
         - Title: \"{title}\"\n\
         - Source Website: \"{source}\"\n\
         - Author: \"{author}\"\n\
         Scraped Article Text: --- {article} ---\n\
         Perform the following checks:\n\
         1. Source Reliability: Based on the Source Website (\"{source}\") and URL, assess its \
         reliability.\n\
         2. Author Credibility: Based on the Author (\"{author}\"), assess their credibility.\n\
         3. Claim Verification: Cross-verify the main claims against information from \
         established news sources (e.g., Reuters, Associated Press).\n\
         4. Bias and Language Analysis: Analyze the Title (\"{title}\") and text for biased or \
         sensationalist language.\n\
         Provide a final verdict: \"Likely True\", \"Likely Fake\", or \"Not Verified\".\n\
         Provide a confidence score from 0 to 100.\n\
         Provide a concise, one-sentence summary for your verdict.\n"
    )
}

fn or_not_provided(value: Option<&str>) -> &str {
    value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(NOT_PROVIDED)
}

fn with_output_contract(mut body: String, kind: AnalysisKind) -> String {
    let contract = Contract::for_kind(kind);
    let _ = write!(
        body,
        "Output schema:\n{}Example:\n{}\n\
         Return ONLY a valid JSON object matching the schema above, with no explanation, \
         no surrounding prose and no markdown code fences.",
        contract.describe(),
        contract.example,
    );
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_request() -> AnalysisRequest {
        AnalysisRequest::EmailCheck(EmailCheckInput {
            from_email: "security@paypa1.com".into(),
            email_content: "Urgent! Verify your account now or it will be suspended. Click here."
                .into(),
        })
    }

    #[test]
    fn prompts_are_deterministic() {
        let request = email_request();
        assert_eq!(Prompt::build(&request, None), Prompt::build(&request, None));
    }

    #[test]
    fn user_fields_are_quoted_verbatim() {
        let request = AnalysisRequest::PasswordAnalysis(
            PasswordAnalysisInput::new("Tr0ub4dor&3 \"quoted\"")
                .with_username("alice")
                .with_website("bank.example"),
        );
        let prompt = Prompt::build(&request, None);
        assert!(prompt.as_str().contains("Password to analyze: \"Tr0ub4dor&3 \"quoted\"\""));
        assert!(prompt.as_str().contains("username is \"alice\""));
        assert!(prompt.as_str().contains("website is \"bank.example\""));
    }

    #[test]
    fn email_body_is_delimited() {
        let prompt = Prompt::build(&email_request(), None);
        assert!(prompt.as_str().contains(
            "Email Content: --- Urgent! Verify your account now or it will be suspended. \
             Click here. ---"
        ));
        assert!(prompt.as_str().contains("Sender Address: \"security@paypa1.com\""));
    }

    #[test]
    fn every_prompt_carries_schema_example_and_instruction() {
        let requests = [
            AnalysisRequest::PasswordGeneration,
            AnalysisRequest::UrlCheck(UrlCheckInput {
                url: "http://paypa1.com/login".into(),
            }),
            email_request(),
        ];
        for request in requests {
            let prompt = Prompt::build(&request, None);
            let contract = Contract::for_kind(request.kind());
            assert!(prompt.as_str().contains(&contract.describe()));
            assert!(prompt.as_str().contains(contract.example));
            assert!(prompt.as_str().ends_with("no markdown code fences."));
        }
    }

    #[test]
    fn news_metadata_defaults_to_not_provided() {
        let request = AnalysisRequest::NewsCheck(NewsCheckInput {
            url: "https://news.example.org/story".into(),
            title: Some("Moon made of cheese".into()),
            source: Some("   ".into()),
            author: None,
        });
        let prompt = Prompt::build(&request, Some("Scientists were surprised."));
        let text = prompt.as_str();
        assert!(text.contains("- Title: \"Moon made of cheese\""));
        assert!(text.contains("- Source Website: \"Not provided\""));
        assert!(text.contains("- Author: \"Not provided\""));
        assert!(text.contains("Scraped Article Text: --- Scientists were surprised. ---"));
    }

    #[test]
    fn generation_prompt_states_the_length_bounds() {
        let prompt = Prompt::build(&AnalysisRequest::PasswordGeneration, None);
        assert!(prompt.as_str().contains("between 14 and 18 characters"));
        assert!(prompt.as_str().contains("(!@#$%^&*)"));
    }
}
