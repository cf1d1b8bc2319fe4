use crate::app_config::{AppConfig, Environment};
use crate::{ConfigError, Engine};

/// Upper bound on the keyword list length.
pub const MAX_KEYWORD_TOP_N: usize = 10;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the real environment so tests
/// can drive them with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("SENTDYN_ENV", "development"))?;

    let bind_addr = or_default("SENTDYN_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("SENTDYN_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("SENTDYN_LOG_LEVEL", "info");

    let ner_model_path = lookup("SENTDYN_NER_MODEL_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let default_engine = or_default("SENTDYN_DEFAULT_ENGINE", "lexicon_grammar")
        .parse::<Engine>()
        .map_err(|e| invalid("SENTDYN_DEFAULT_ENGINE", e.to_string()))?;

    let keyword_top_n = parse_usize("SENTDYN_KEYWORD_TOP_N", "10")?;
    if !(1..=MAX_KEYWORD_TOP_N).contains(&keyword_top_n) {
        return Err(invalid(
            "SENTDYN_KEYWORD_TOP_N",
            format!("must be between 1 and {MAX_KEYWORD_TOP_N}, got {keyword_top_n}"),
        ));
    }

    let request_timeout_secs = parse_u64("SENTDYN_REQUEST_TIMEOUT_SECS", "10")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "SENTDYN_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let max_body_bytes = parse_usize("SENTDYN_MAX_BODY_BYTES", "262144")?;
    let rate_limit_per_minute = parse_usize("SENTDYN_RATE_LIMIT_PER_MINUTE", "120")?;
    for (var, value) in [
        ("SENTDYN_MAX_BODY_BYTES", max_body_bytes),
        ("SENTDYN_RATE_LIMIT_PER_MINUTE", rate_limit_per_minute),
    ] {
        if value == 0 {
            return Err(invalid(var, "must be greater than zero".to_string()));
        }
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        ner_model_path,
        default_engine,
        keyword_top_n,
        request_timeout_secs,
        max_body_bytes,
        rate_limit_per_minute,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SENTDYN_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
