use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::LanguageModel;
use crate::resume::segmenter::SegmenterConfig;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Read-only after startup; each request builds its own resume and job records.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no API key is configured.
    pub llm: Option<Arc<dyn LanguageModel>>,
    pub config: Config,
    pub segmenter: Arc<SegmenterConfig>,
}

impl AppState {
    pub fn require_llm(&self) -> Result<&dyn LanguageModel, AppError> {
        self.llm.as_deref().ok_or(AppError::LlmUnavailable)
    }
}
