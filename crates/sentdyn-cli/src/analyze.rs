//! `analyze` and `engines` command handlers.
//!
//! Input comes from `--text`, `--file`, or stdin, in that order of
//! precedence. Flags override the env-driven [`AppConfig`] defaults.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use sentdyn_analytics::Analyzer;
use sentdyn_core::{AnalysisRequest, AnalysisResult, AppConfig, Engine, MAX_KEYWORD_TOP_N};
use tokio::io::AsyncReadExt;

/// Arguments for `analyze`.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Text to analyze
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Sentiment engine: lexicon_grammar (alias textblob) or social_lexicon (alias vader)
    #[arg(long, short, value_parser = parse_engine)]
    pub engine: Option<Engine>,

    /// Number of keywords to report (1-10)
    #[arg(long, value_parser = parse_top_n)]
    pub top_n: Option<usize>,

    /// Entity model file (defaults to SENTDYN_NER_MODEL_PATH, then the bundled model)
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

fn parse_engine(raw: &str) -> Result<Engine, String> {
    raw.parse::<Engine>().map_err(|e| e.to_string())
}

fn parse_top_n(raw: &str) -> Result<usize, String> {
    let n: usize = raw.parse().map_err(|e| format!("{e}"))?;
    if (1..=MAX_KEYWORD_TOP_N).contains(&n) {
        Ok(n)
    } else {
        Err(format!("must be between 1 and {MAX_KEYWORD_TOP_N}"))
    }
}

/// Run one analysis and print the result as JSON on stdout.
///
/// # Errors
///
/// Returns an error if the input cannot be read or the analysis fails
/// (empty input, unavailable entity model).
pub(crate) async fn run_analyze(config: &AppConfig, args: AnalyzeArgs) -> anyhow::Result<()> {
    let text = read_input(args.text, args.file.as_deref()).await?;
    let engine = args.engine.unwrap_or(config.default_engine);
    let model_path = args.model.as_deref().or(config.ner_model_path.as_deref());

    let analyzer =
        Analyzer::load(model_path).with_top_n(args.top_n.unwrap_or(config.keyword_top_n));
    tracing::debug!(
        %engine,
        top_n = analyzer.top_n(),
        model_loaded = analyzer.is_model_loaded(),
        "analyzer ready"
    );

    let result = analyzer.analyze(&AnalysisRequest::new(text, engine))?;
    println!("{}", render(&result, args.pretty)?);
    Ok(())
}

/// Text from `--text`, else `--file`, else stdin.
pub(crate) async fn read_input(
    text: Option<String>,
    file: Option<&Path>,
) -> anyhow::Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut buf = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buf)
        .await
        .context("failed to read text from stdin")?;
    Ok(buf)
}

/// Serialize a result as compact or pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub(crate) fn render(result: &AnalysisResult, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}

/// One line per engine: name and description.
pub(crate) fn engines_listing() -> String {
    let mut out = String::new();
    for engine in Engine::ALL {
        let _ = writeln!(out, "{:<18}{}", engine.as_str(), engine.description());
    }
    out
}
