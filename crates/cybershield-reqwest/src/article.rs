//! Article fetcher backed by reqwest and scraper.

use std::sync::{Arc, LazyLock};
use std::time::Instant;

use cybershield_core::ArticleFetcher;
use reqwest::{Client, Response};
use scraper::{Html, Selector};
use url::Url;

use crate::TRACING_TARGET;
use crate::config::FetcherConfig;
use crate::error::{Error, Result};

static PARAGRAPH: LazyLock<Option<Selector>> = LazyLock::new(|| Selector::parse("p").ok());

/// Joins the text of every `<p>` element with single spaces and keeps at
/// most `max_chars` characters.
///
/// Returns an empty string when the page has no paragraphs.
pub fn extract_paragraph_text(html: &str, max_chars: usize) -> String {
    let Some(selector) = PARAGRAPH.as_ref() else {
        return String::new();
    };

    let document = Html::parse_document(html);
    let joined = document
        .select(selector)
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ");

    match joined.char_indices().nth(max_chars) {
        Some((cut, _)) => joined[..cut].to_owned(),
        None => joined,
    }
}

/// Parses `html` on the blocking pool and extracts its paragraph text.
pub async fn parse_article(html: String, max_chars: usize) -> Result<String> {
    let text =
        tokio::task::spawn_blocking(move || extract_paragraph_text(&html, max_chars)).await?;
    Ok(text)
}

/// Response bytes collected up to a fixed limit.
#[derive(Debug)]
struct CappedBody {
    bytes: Vec<u8>,
    limit: usize,
}

impl CappedBody {
    fn new(limit: usize) -> Self {
        Self {
            bytes: Vec::new(),
            limit,
        }
    }

    /// Appends what still fits and returns `true` once the limit is reached.
    fn push(&mut self, chunk: &[u8]) -> bool {
        let room = self.limit.saturating_sub(self.bytes.len());
        let take = room.min(chunk.len());
        self.bytes.extend_from_slice(&chunk[..take]);
        self.bytes.len() >= self.limit
    }

    fn into_html(self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Reads at most `limit` bytes of the body and drops the rest unread.
async fn read_capped(mut response: Response, limit: usize) -> Result<String> {
    let mut body = CappedBody::new(limit);
    while let Some(chunk) = response.chunk().await? {
        if body.push(&chunk) {
            tracing::debug!(target: TRACING_TARGET, limit, "Article body truncated");
            break;
        }
    }
    Ok(body.into_html())
}

struct HttpArticleFetcherInner {
    http: Client,
    config: FetcherConfig,
}

impl std::fmt::Debug for HttpArticleFetcherInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpArticleFetcherInner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Downloads news articles and reduces them to paragraph text.
#[derive(Clone, Debug)]
pub struct HttpArticleFetcher {
    inner: Arc<HttpArticleFetcherInner>,
}

impl HttpArticleFetcher {
    /// Creates a fetcher with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: FetcherConfig) -> Result<Self> {
        tracing::debug!(
            target: TRACING_TARGET,
            timeout_ms = config.timeout().as_millis(),
            max_chars = config.max_chars,
            "Creating article fetcher"
        );

        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            inner: Arc::new(HttpArticleFetcherInner { http, config }),
        })
    }

    /// Creates a fetcher with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(FetcherConfig::default())
    }

    /// Gets the fetcher configuration.
    pub fn config(&self) -> &FetcherConfig {
        &self.inner.config
    }

    /// Downloads `url` and returns its paragraph text.
    pub async fn fetch_article(&self, url: &str) -> Result<String> {
        let url = Url::parse(url.trim()).map_err(|e| Error::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!(
                "unsupported scheme {}",
                url.scheme()
            )));
        }

        let started_at = Instant::now();
        let response = self.inner.http.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status));
        }

        let html = read_capped(response, self.inner.config.max_body_bytes).await?;
        let html_len = html.len();
        let text = parse_article(html, self.inner.config.max_chars).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            host = url.host_str(),
            status = status.as_u16(),
            html_len,
            text_len = text.len(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Article fetched"
        );

        Ok(text)
    }
}

#[async_trait::async_trait]
impl ArticleFetcher for HttpArticleFetcher {
    async fn fetch(&self, url: &str) -> cybershield_core::Result<String> {
        match self.fetch_article(url).await {
            Ok(text) => Ok(text),
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Article fetch failed"
                );
                Err(error.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use cybershield_core::ErrorKind;

    use super::*;

    #[test]
    fn paragraphs_are_joined_with_spaces() {
        let html = r#"
            <html><head><title>Ignored</title></head>
            <body>
                <h1>Headline</h1>
                <p>First paragraph.</p>
                <div><p>Second <b>bold</b> paragraph.</p></div>
                <script>var ignored = true;</script>
            </body></html>
        "#;

        assert_eq!(
            extract_paragraph_text(html, 4000),
            "First paragraph. Second bold paragraph."
        );
    }

    #[test]
    fn page_without_paragraphs_is_empty() {
        let html = "<html><body><div>No paragraphs here</div></body></html>";
        assert_eq!(extract_paragraph_text(html, 4000), "");
    }

    #[test]
    fn text_is_truncated_by_characters() {
        let html = format!("<p>{}</p>", "é".repeat(50));
        let text = extract_paragraph_text(&html, 10);
        assert_eq!(text.chars().count(), 10);
        assert_eq!(text, "é".repeat(10));
    }

    #[test]
    fn capped_body_stops_at_limit() {
        let mut body = CappedBody::new(8);
        assert!(!body.push(b"<p>ab"));
        assert!(body.push(b"cdefgh"));
        assert_eq!(body.into_html(), "<p>abcde");
    }

    #[test]
    fn capped_body_keeps_short_pages_whole() {
        let mut body = CappedBody::new(1024);
        assert!(!body.push(b"<p>short</p>"));
        assert_eq!(body.into_html(), "<p>short</p>");
    }

    #[tokio::test]
    async fn parsing_runs_off_the_async_worker() -> anyhow::Result<()> {
        let html = "<p>Breaking.</p><p>More soon.</p>".to_owned();
        assert_eq!(parse_article(html, 4000).await?, "Breaking. More soon.");
        Ok(())
    }

    #[tokio::test]
    async fn non_http_urls_are_rejected() -> anyhow::Result<()> {
        let fetcher = HttpArticleFetcher::with_defaults()?;

        let result = fetcher.fetch_article("file:///etc/passwd").await;
        assert!(matches!(result, Err(Error::InvalidUrl(_))));

        let error = fetcher.fetch("not a url").await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
        Ok(())
    }
}
