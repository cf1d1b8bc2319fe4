use std::net::SocketAddr;
use std::path::PathBuf;

use crate::Engine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// External tagger model. `None` means the bundled English model.
    pub ner_model_path: Option<PathBuf>,
    pub default_engine: Engine,
    pub keyword_top_n: usize,
    pub request_timeout_secs: u64,
    pub max_body_bytes: usize,
    pub rate_limit_per_minute: usize,
}
