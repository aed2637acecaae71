//! Convenient re-exports for common use.

pub use crate::analysis::{AnalysisKind, AnalysisRequest, AnalysisResult, ApplicationError};
pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::fetch::ArticleFetcher;
pub use crate::gateway::{ModelGateway, ModelProvider, RawModelOutput};
pub use crate::orchestrator::{Analyzer, AnalyzerConfig};
pub use crate::prompt::Prompt;
