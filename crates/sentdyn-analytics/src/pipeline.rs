use std::path::Path;

use sentdyn_core::{AnalysisRequest, AnalysisResult, AppConfig, Engine, MAX_KEYWORD_TOP_N};

use crate::entities::EntityModel;
use crate::error::AnalysisError;
use crate::{keywords, normalize, sentiment, stopwords};

/// Runs the full analysis for one request.
///
/// Holds only read-only resources (the entity model behind an `Arc`), so a
/// single analyzer can be shared across threads and requests.
#[derive(Debug, Clone)]
pub struct Analyzer {
    entities: EntityModel,
    top_n: usize,
}

impl Analyzer {
    #[must_use]
    pub fn new(entities: EntityModel) -> Self {
        tracing::debug!(stopwords = stopwords::len(), "stopword set ready");
        Self {
            entities,
            top_n: keywords::DEFAULT_TOP_N,
        }
    }

    /// Analyzer with the model at `path`, or the bundled model when `None`.
    #[must_use]
    pub fn load(path: Option<&Path>) -> Self {
        Self::new(EntityModel::load(path))
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::load(config.ner_model_path.as_deref()).with_top_n(config.keyword_top_n)
    }

    /// Keyword list length, clamped to `1..=MAX_KEYWORD_TOP_N`.
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n.clamp(1, MAX_KEYWORD_TOP_N);
        self
    }

    #[must_use]
    pub fn top_n(&self) -> usize {
        self.top_n
    }

    #[must_use]
    pub fn is_model_loaded(&self) -> bool {
        self.entities.is_loaded()
    }

    #[must_use]
    pub fn entity_model(&self) -> &EntityModel {
        &self.entities
    }

    /// Analyze one request.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::EmptyInput`] if the text is empty after trimming.
    /// - [`AnalysisError::ModelUnavailable`] if the entity model failed to load.
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let text = request.text();
        let tokens = normalize::normalize(text)?;
        tracing::debug!(tokens = tokens.len(), "normalized");

        let sentiment = sentiment::score(request.engine(), text);
        tracing::debug!(
            engine = %request.engine(),
            label = %sentiment.label(),
            polarity = sentiment.polarity(),
            "scored sentiment"
        );

        let keywords = keywords::extract(&tokens, self.top_n);
        tracing::debug!(keywords = keywords.len(), "extracted keywords");

        let entities = self.entities.extract(text)?;
        tracing::debug!(
            categories = entities.len(),
            mentions = entities.values().map(Vec::len).sum::<usize>(),
            "extracted entities"
        );

        Ok(AnalysisResult {
            sentiment,
            keywords,
            entities,
        })
    }

    /// Parse `engine` and analyze `text` with it.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::UnsupportedEngine`] for an unknown engine
    /// name, otherwise as [`Analyzer::analyze`].
    pub fn analyze_text(&self, text: &str, engine: &str) -> Result<AnalysisResult, AnalysisError> {
        let engine: Engine = engine.parse()?;
        self.analyze(&AnalysisRequest::new(text, engine))
    }
}
