//! Named-entity extraction.
//!
//! A [`TaggerModel`] resource (gazetteers plus cue vocabularies) is loaded
//! once and compiled into an [`EntityTagger`]. [`EntityModel`] holds the
//! outcome of that load: either a shared tagger or the reason it failed, so
//! callers can keep serving sentiment and keywords while reporting entity
//! extraction as unavailable.

mod model;
mod tagger;
mod tokens;

pub use model::{load_model, parse_model, NativeLabel, TaggerModel, BUNDLED_MODEL};
pub use tagger::EntityTagger;

use std::path::Path;
use std::sync::Arc;

use sentdyn_core::{EntityGroups, EntityMention};

use crate::error::AnalysisError;

/// Load state of the entity tagger.
#[derive(Debug, Clone)]
pub enum EntityModel {
    Loaded(Arc<EntityTagger>),
    Unavailable { reason: String },
}

impl EntityModel {
    /// Load the model at `path`, or the bundled model when `path` is `None`.
    /// Load failures are captured, not returned.
    #[must_use]
    pub fn load(path: Option<&Path>) -> Self {
        let result = match path {
            Some(path) => load_model(path),
            None => TaggerModel::bundled(),
        };
        match result {
            Ok(model) => {
                let tagger = EntityTagger::compile(&model);
                tracing::info!(
                    model = tagger.name(),
                    version = tagger.version(),
                    gazetteer_entries = tagger.gazetteer_len(),
                    "entity model loaded"
                );
                EntityModel::Loaded(Arc::new(tagger))
            }
            Err(e) => {
                tracing::error!(
                    path = ?path,
                    error = %e,
                    "entity model failed to load; entity extraction disabled"
                );
                EntityModel::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    #[must_use]
    pub fn bundled() -> Self {
        Self::load(None)
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, EntityModel::Loaded(_))
    }

    /// Extract entities from raw text, grouped by category.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::ModelUnavailable`] when the model failed to load.
    pub fn extract(&self, text: &str) -> Result<EntityGroups, AnalysisError> {
        match self {
            EntityModel::Loaded(tagger) => Ok(group(tagger.recognize(text))),
            EntityModel::Unavailable { reason } => Err(AnalysisError::ModelUnavailable {
                reason: reason.clone(),
            }),
        }
    }
}

/// Group mentions by category, keeping order of appearance within each
/// group. Categories with no mentions are absent.
#[must_use]
pub fn group(mentions: Vec<EntityMention>) -> EntityGroups {
    let mut groups = EntityGroups::new();
    for mention in mentions {
        groups.entry(mention.category).or_default().push(mention);
    }
    groups
}
