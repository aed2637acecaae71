//! Retrieval of article text for news checks.

use crate::error::Result;

/// Fetches the readable text of an article.
///
/// Implementations decide how the page is retrieved and reduced to text.
/// An error or an empty string both mean "no article"; callers do not
/// distinguish between them.
#[async_trait::async_trait]
pub trait ArticleFetcher: Send + Sync {
    /// Returns the article text found at `url`.
    async fn fetch(&self, url: &str) -> Result<String>;
}
