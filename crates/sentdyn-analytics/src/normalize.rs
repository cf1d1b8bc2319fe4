//! Tokenization and case folding for keyword extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::AnalysisError;

/// Runs of letters and digits, with internal apostrophes kept in the token.
static WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}\p{N}]+)*").expect("valid word regex")
});

/// Split `raw` into lowercase word tokens, discarding punctuation.
///
/// Stopwords are kept; filtering is the keyword extractor's job. Typographic
/// apostrophes are folded to `'` so `don’t` and `don't` produce one token.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyInput`] if `raw` is empty after trimming.
pub fn normalize(raw: &str) -> Result<Vec<String>, AnalysisError> {
    if raw.trim().is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    Ok(WORD_RE
        .find_iter(raw)
        .map(|m| m.as_str().to_lowercase().replace('’', "'"))
        .collect())
}
