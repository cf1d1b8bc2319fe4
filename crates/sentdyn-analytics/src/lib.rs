//! Text analytics pipeline for Sentiment Dynamics.
//!
//! [`Analyzer`] is the single entry point: it normalizes text for keyword
//! ranking, scores sentiment with the requested engine, and extracts named
//! entities with a tagger model loaded once at startup.

pub mod entities;
pub mod error;
pub mod keywords;
pub mod normalize;
pub mod pipeline;
pub mod sentiment;
pub mod stopwords;

pub use entities::{EntityModel, EntityTagger};
pub use error::{AnalysisError, ModelError};
pub use pipeline::Analyzer;
pub use sentiment::SentimentEngine;
