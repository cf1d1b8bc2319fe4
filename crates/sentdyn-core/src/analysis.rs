//! Request and result types for one text analysis.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Scores whose magnitude stays within this band are labelled neutral.
pub const NEUTRAL_THRESHOLD: f32 = 0.05;

/// Sentiment scoring strategy selected per request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Engine {
    /// Word-level valence averaged across the text, adjusted for negation and
    /// intensifiers. Produces polarity and subjectivity.
    #[default]
    LexiconGrammar,
    /// Valence lexicon tuned for informal text (caps, punctuation, emoticons).
    /// Produces a compound score.
    SocialLexicon,
}

impl Engine {
    pub const ALL: [Engine; 2] = [Engine::LexiconGrammar, Engine::SocialLexicon];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Engine::LexiconGrammar => "lexicon_grammar",
            Engine::SocialLexicon => "social_lexicon",
        }
    }

    /// One-line description suitable for listings.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Engine::LexiconGrammar => {
                "lexicon + grammar modifiers; reports polarity and subjectivity"
            }
            Engine::SocialLexicon => {
                "social-text valence lexicon; reports a compound score and intensity breakdown"
            }
        }
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Engine {
    type Err = CoreError;

    /// Accepts the canonical names plus the `textblob` / `vader` aliases,
    /// case-insensitively. Hyphens are treated as underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        match key.as_str() {
            "lexicon_grammar" | "lexicon" | "textblob" => Ok(Engine::LexiconGrammar),
            "social_lexicon" | "social" | "vader" => Ok(Engine::SocialLexicon),
            _ => Err(CoreError::UnsupportedEngine(s.to_string())),
        }
    }
}

/// One text submission. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    text: String,
    engine: Engine,
}

impl AnalysisRequest {
    #[must_use]
    pub fn new(text: impl Into<String>, engine: Engine) -> Self {
        Self {
            text: text.into(),
            engine,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn engine(&self) -> Engine {
        self.engine
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Label rule for polarity: strictly beyond the neutral band.
    #[must_use]
    pub fn from_polarity(polarity: f32) -> Self {
        if polarity > NEUTRAL_THRESHOLD {
            SentimentLabel::Positive
        } else if polarity < -NEUTRAL_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    /// Label rule for compound scores: the band edges count as polar.
    #[must_use]
    pub fn from_compound(compound: f32) -> Self {
        if compound >= NEUTRAL_THRESHOLD {
            SentimentLabel::Positive
        } else if compound <= -NEUTRAL_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "POSITIVE"),
            SentimentLabel::Negative => write!(f, "NEGATIVE"),
            SentimentLabel::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Share of positive, negative and neutral valence in a text, alongside the
/// normalized compound score. Proportions sum to 1.0; text without tokens
/// is entirely neutral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntensityBreakdown {
    pub positive: f32,
    pub negative: f32,
    pub neutral: f32,
    pub compound: f32,
}

/// Output of either sentiment engine.
///
/// Fields are private so the label can only come from the score it
/// describes: build values with [`SentimentResult::lexicon_grammar`] or
/// [`SentimentResult::social`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentResult {
    label: SentimentLabel,
    polarity: f32,
    subjectivity: Option<f32>,
    compound: Option<f32>,
    engine: Engine,
    breakdown: Option<IntensityBreakdown>,
}

impl SentimentResult {
    /// Result of the lexicon+grammar engine. Inputs are clamped to their
    /// ranges (`[-1, 1]` and `[0, 1]`).
    #[must_use]
    pub fn lexicon_grammar(polarity: f32, subjectivity: f32) -> Self {
        let polarity = polarity.clamp(-1.0, 1.0);
        Self {
            label: SentimentLabel::from_polarity(polarity),
            polarity,
            subjectivity: Some(subjectivity.clamp(0.0, 1.0)),
            compound: None,
            engine: Engine::LexiconGrammar,
            breakdown: None,
        }
    }

    /// Result of the social-lexicon engine. Polarity mirrors the compound
    /// score so gauges can read one field regardless of engine.
    #[must_use]
    pub fn social(breakdown: IntensityBreakdown) -> Self {
        let compound = breakdown.compound.clamp(-1.0, 1.0);
        Self {
            label: SentimentLabel::from_compound(compound),
            polarity: compound,
            subjectivity: None,
            compound: Some(compound),
            engine: Engine::SocialLexicon,
            breakdown: Some(IntensityBreakdown {
                compound,
                ..breakdown
            }),
        }
    }

    #[must_use]
    pub fn label(&self) -> SentimentLabel {
        self.label
    }

    #[must_use]
    pub fn polarity(&self) -> f32 {
        self.polarity
    }

    #[must_use]
    pub fn subjectivity(&self) -> Option<f32> {
        self.subjectivity
    }

    #[must_use]
    pub fn compound(&self) -> Option<f32> {
        self.compound
    }

    #[must_use]
    pub fn engine(&self) -> Engine {
        self.engine
    }

    #[must_use]
    pub fn breakdown(&self) -> Option<&IntensityBreakdown> {
        self.breakdown.as_ref()
    }
}

/// A ranked keyword: lowercased term and its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordEntry {
    pub term: String,
    pub count: usize,
}

/// Output category for a recognized entity.
///
/// Declaration order is the order categories are listed in results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityCategory {
    Person,
    Org,
    Location,
    Date,
    Other,
}

impl EntityCategory {
    /// Map a tagger-native label onto an output category.
    ///
    /// Labels outside the four primary categories are kept under
    /// [`EntityCategory::Other`] rather than dropped.
    #[must_use]
    pub fn from_model_label(label: &str) -> Self {
        match label {
            "PERSON" | "PER" => EntityCategory::Person,
            "ORG" => EntityCategory::Org,
            "GPE" | "LOC" | "FAC" => EntityCategory::Location,
            "DATE" | "TIME" => EntityCategory::Date,
            _ => EntityCategory::Other,
        }
    }
}

impl std::fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityCategory::Person => "PERSON",
            EntityCategory::Org => "ORG",
            EntityCategory::Location => "LOCATION",
            EntityCategory::Date => "DATE",
            EntityCategory::Other => "OTHER",
        };
        f.write_str(name)
    }
}

/// One occurrence of a named entity in the submitted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityMention {
    /// Surface form exactly as it appears in the input.
    pub text: String,
    pub category: EntityCategory,
    /// The tagger's native label (e.g. `GPE` for a city under `LOCATION`).
    pub label: String,
    /// Byte offset of the first character in the input.
    pub start: usize,
    /// Byte offset one past the last character in the input.
    pub end: usize,
}

/// Mentions grouped by category, each group in order of appearance.
pub type EntityGroups = BTreeMap<EntityCategory, Vec<EntityMention>>;

/// Everything produced for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub sentiment: SentimentResult,
    pub keywords: Vec<KeywordEntry>,
    pub entities: EntityGroups,
}

#[cfg(test)]
#[path = "analysis_test.rs"]
mod tests;
