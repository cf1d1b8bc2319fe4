//! Sentiment scoring strategies.
//!
//! Two independent engines share the [`SentimentEngine`] contract. Callers pick
//! one per request through [`Engine`]; neither engine depends on the other.

mod lexicon_grammar;
mod social;

pub use lexicon_grammar::LexiconGrammarEngine;
pub use social::SocialLexiconEngine;

use sentdyn_core::{Engine, SentimentResult};

/// Scores raw (un-normalized) text.
///
/// Implementations are pure: the same text always yields the same result,
/// and text with no recognized words scores `0.0` / neutral.
pub trait SentimentEngine {
    fn score(&self, text: &str) -> SentimentResult;
}

/// Score `text` with the strategy selected by `engine`.
#[must_use]
pub fn score(engine: Engine, text: &str) -> SentimentResult {
    match engine {
        Engine::LexiconGrammar => LexiconGrammarEngine.score(text),
        Engine::SocialLexicon => SocialLexiconEngine.score(text),
    }
}
