//! Scripted model providers and article fetchers for tests.
//!
//! Only available with the `test-utils` feature:
//!
//! ```toml
//! [dev-dependencies]
//! cybershield-core = { workspace = true, features = ["test-utils"] }
//! ```

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::fetch::ArticleFetcher;
use crate::gateway::ModelProvider;
use crate::prompt::Prompt;

type ErrorFactory = Arc<dyn Fn() -> Error + Send + Sync>;

/// Scripted reply shared by the mocks.
#[derive(Clone)]
enum Reply {
    Text(String),
    Error(ErrorFactory),
}

impl Reply {
    fn produce(&self) -> Result<String> {
        match self {
            Self::Text(text) => Ok(text.clone()),
            Self::Error(factory) => Err(factory()),
        }
    }
}

impl Default for Reply {
    fn default() -> Self {
        Self::Text("{}".to_owned())
    }
}

impl fmt::Debug for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Error(_) => f.write_str("Error"),
        }
    }
}

/// Model provider returning a fixed reply after an optional delay.
///
/// Clones share the call counter and the record of received prompts.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    reply: Reply,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Creates a provider answering `{}`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers every prompt with `text`.
    pub fn with_response(mut self, text: impl Into<String>) -> Self {
        self.reply = Reply::Text(text.into());
        self
    }

    /// Fails every call with an error built by `factory`.
    pub fn with_error<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Error + Send + Sync + 'static,
    {
        self.reply = Reply::Error(Arc::new(factory));
        self
    }

    /// Sleeps for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `generate` calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl ModelProvider for MockProvider {
    fn model_name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, prompt: &Prompt) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.as_str().to_owned());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.reply.produce()
    }
}

/// Article fetcher returning a fixed article.
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    reply: Reply,
    calls: Arc<AtomicUsize>,
}

impl MockFetcher {
    /// Creates a fetcher returning `{}` as article text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `text` for every URL.
    pub fn with_article(mut self, text: impl Into<String>) -> Self {
        self.reply = Reply::Text(text.into());
        self
    }

    /// Fails every fetch with an error built by `factory`.
    pub fn with_error<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Error + Send + Sync + 'static,
    {
        self.reply = Reply::Error(Arc::new(factory));
        self
    }

    /// Number of `fetch` calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ArticleFetcher for MockFetcher {
    async fn fetch(&self, _url: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.produce()
    }
}
