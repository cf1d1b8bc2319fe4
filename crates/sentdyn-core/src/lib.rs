//! Shared types and configuration for Sentiment Dynamics.
//!
//! Holds the request/result data model that the analytics pipeline produces
//! and the outer surfaces (CLI, HTTP service) render, plus env-driven
//! application configuration.

pub mod analysis;
pub mod app_config;
pub mod config;

pub use analysis::{
    AnalysisRequest, AnalysisResult, Engine, EntityCategory, EntityGroups, EntityMention,
    IntensityBreakdown, KeywordEntry, SentimentLabel, SentimentResult, NEUTRAL_THRESHOLD,
};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, MAX_KEYWORD_TOP_N};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// An engine name outside the two recognized strategies.
    #[error("unsupported sentiment engine: '{0}'")]
    UnsupportedEngine(String),
}
