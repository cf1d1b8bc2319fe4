//! Lexicon + grammar scorer: averaged word valence with negation and
//! intensifier handling. Reports polarity and subjectivity.

use std::sync::LazyLock;

use regex::Regex;
use sentdyn_core::SentimentResult;

use super::SentimentEngine;

/// `(word, polarity, subjectivity)`. Polarity in `[-1.0, 1.0]`,
/// subjectivity in `[0.0, 1.0]`. Keys are lowercase single words.
pub(crate) const LEXICON: &[(&str, f32, f32)] = &[
    // Positive
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("excellent", 1.0, 1.0),
    ("amazing", 0.6, 0.9),
    ("wonderful", 1.0, 1.0),
    ("awesome", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("superb", 1.0, 1.0),
    ("outstanding", 0.5, 0.67),
    ("brilliant", 0.9, 1.0),
    ("perfect", 1.0, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("nice", 0.6, 1.0),
    ("lovely", 0.5, 0.75),
    ("beautiful", 0.85, 1.0),
    ("love", 0.5, 0.6),
    ("loved", 0.7, 0.8),
    ("loves", 0.5, 0.6),
    ("happy", 0.8, 1.0),
    ("glad", 0.5, 1.0),
    ("pleased", 0.5, 1.0),
    ("satisfied", 0.5, 1.0),
    ("enjoy", 0.4, 0.5),
    ("enjoyed", 0.4, 0.5),
    ("fun", 0.3, 0.2),
    ("interesting", 0.5, 0.5),
    ("impressive", 1.0, 1.0),
    ("delicious", 1.0, 1.0),
    ("friendly", 0.375, 0.5),
    ("helpful", 0.5, 0.5),
    ("easy", 0.433, 0.833),
    ("comfortable", 0.4, 0.7),
    ("reliable", 0.5, 0.6),
    ("successful", 0.75, 0.95),
    ("positive", 0.227, 0.545),
    ("cool", 0.35, 0.65),
    ("recommend", 0.3, 0.4),
    ("fast", 0.2, 0.6),
    // Negative
    ("bad", -0.7, 0.667),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("worst", -1.0, 1.0),
    ("worse", -0.4, 0.6),
    ("poor", -0.4, 0.6),
    ("hate", -0.8, 0.9),
    ("hated", -0.9, 0.7),
    ("sad", -0.5, 1.0),
    ("angry", -0.5, 1.0),
    ("unhappy", -0.6, 0.9),
    ("disappointing", -0.6, 0.7),
    ("disappointed", -0.75, 0.75),
    ("boring", -1.0, 1.0),
    ("ugly", -0.7, 1.0),
    ("wrong", -0.5, 0.9),
    ("broken", -0.4, 0.4),
    ("slow", -0.3, 0.39),
    ("expensive", -0.5, 0.7),
    ("useless", -0.5, 0.2),
    ("annoying", -0.8, 0.9),
    ("rude", -0.3, 0.6),
    ("dirty", -0.6, 0.8),
    ("difficult", -0.5, 1.0),
    ("painful", -0.7, 0.9),
    ("dangerous", -0.6, 0.9),
    ("stupid", -0.8, 1.0),
    ("mediocre", -0.3, 0.6),
    ("negative", -0.3, 0.4),
    ("frustrating", -0.4, 0.7),
    ("unacceptable", -0.7, 0.8),
    ("sick", -0.7, 0.9),
    ("failed", -0.5, 0.3),
    ("failure", -0.3, 0.3),
];

/// Multipliers applied to the next sentiment word.
const INTENSIFIERS: &[(&str, f32)] = &[
    ("very", 1.3),
    ("really", 1.2),
    ("extremely", 1.5),
    ("incredibly", 1.4),
    ("absolutely", 1.5),
    ("totally", 1.3),
    ("highly", 1.4),
    ("super", 1.4),
    ("so", 1.2),
    ("too", 1.2),
    ("quite", 1.1),
    ("rather", 0.9),
    ("fairly", 0.8),
    ("somewhat", 0.7),
    ("kinda", 0.7),
    ("slightly", 0.6),
    ("barely", 0.4),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "cannot", "without", "hardly",
];

/// Negated words flip and lose half their strength.
const NEGATION_FACTOR: f32 = -0.5;

/// Pending modifiers lapse after this many intervening non-sentiment words.
const MODIFIER_WINDOW: usize = 3;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}\p{N}]+)*|[.!?;]").expect("valid token regex")
});

fn lookup(word: &str) -> Option<(f32, f32)> {
    LEXICON
        .iter()
        .find(|(w, _, _)| *w == word)
        .map(|&(_, polarity, subjectivity)| (polarity, subjectivity))
}

fn intensity_of(word: &str) -> Option<f32> {
    INTENSIFIERS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|&(_, factor)| factor)
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't")
}

fn is_boundary(token: &str) -> bool {
    matches!(token, "." | "!" | "?" | ";")
}

/// Modifiers seen since the last sentiment word.
#[derive(Debug, Clone, Copy)]
struct Pending {
    intensity: f32,
    negated: bool,
    gap: usize,
}

impl Pending {
    const NONE: Pending = Pending {
        intensity: 1.0,
        negated: false,
        gap: 0,
    };

    fn is_active(self) -> bool {
        self.negated || (self.intensity - 1.0).abs() > f32::EPSILON
    }
}

/// Per-word assessments `(polarity, subjectivity)` in order of appearance.
fn assessments(text: &str) -> Vec<(f32, f32)> {
    let mut out = Vec::new();
    let mut pending = Pending::NONE;

    for m in TOKEN_RE.find_iter(text) {
        let token = m.as_str().to_lowercase().replace('’', "'");

        if is_boundary(&token) {
            pending = Pending::NONE;
            continue;
        }
        if let Some(factor) = intensity_of(&token) {
            pending.intensity *= factor;
            pending.gap = 0;
            continue;
        }
        if is_negation(&token) {
            pending.negated = !pending.negated;
            pending.gap = 0;
            continue;
        }

        if let Some((polarity, subjectivity)) = lookup(&token) {
            let mut polarity = polarity * pending.intensity;
            if pending.negated {
                polarity *= NEGATION_FACTOR;
            }
            let subjectivity = (subjectivity * pending.intensity).min(1.0);
            out.push((polarity.clamp(-1.0, 1.0), subjectivity));
            pending = Pending::NONE;
        } else if pending.is_active() {
            pending.gap += 1;
            if pending.gap > MODIFIER_WINDOW {
                pending = Pending::NONE;
            }
        }
    }

    out
}

/// Averages lexicon assessments across the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconGrammarEngine;

impl SentimentEngine for LexiconGrammarEngine {
    fn score(&self, text: &str) -> SentimentResult {
        let found = assessments(text);
        if found.is_empty() {
            return SentimentResult::lexicon_grammar(0.0, 0.0);
        }

        #[allow(clippy::cast_precision_loss)]
        let n = found.len() as f32;
        let polarity = found.iter().map(|(p, _)| p).sum::<f32>() / n;
        let subjectivity = found.iter().map(|(_, s)| s).sum::<f32>() / n;

        tracing::trace!(assessments = found.len(), polarity, subjectivity, "lexicon+grammar scored");
        SentimentResult::lexicon_grammar(polarity, subjectivity)
    }
}

#[cfg(test)]
mod tests {
    use sentdyn_core::SentimentLabel;

    use super::*;

    fn score(text: &str) -> SentimentResult {
        LexiconGrammarEngine.score(text)
    }

    #[test]
    fn empty_string_is_neutral() {
        let result = score("");
        assert_eq!(result.label(), SentimentLabel::Neutral);
        assert_eq!(result.polarity(), 0.0);
        assert_eq!(result.subjectivity(), Some(0.0));
    }

    #[test]
    fn unknown_text_is_neutral() {
        let result = score("The meeting is at 3pm.");
        assert_eq!(result.label(), SentimentLabel::Neutral);
        assert_eq!(result.polarity(), 0.0);
    }

    #[test]
    fn positive_text_is_positive() {
        let result = score("I love this product! It's amazing!");
        assert_eq!(result.label(), SentimentLabel::Positive);
        assert!(result.polarity() > 0.0);
    }

    #[test]
    fn negative_text_is_negative() {
        let result = score("I hate this. It's terrible and awful.");
        assert_eq!(result.label(), SentimentLabel::Negative);
        assert!(result.polarity() < 0.0);
    }

    #[test]
    fn subjectivity_within_range() {
        let subjectivity = score("I think this is wonderful!").subjectivity().unwrap();
        assert!((0.0..=1.0).contains(&subjectivity));
        assert!(subjectivity > 0.5, "got {subjectivity}");
    }

    #[test]
    fn polarity_is_mean_of_assessments() {
        // good 0.7, bad -0.7
        let result = score("good and bad");
        assert!(result.polarity().abs() < 1e-6, "got {}", result.polarity());
        assert_eq!(result.label(), SentimentLabel::Neutral);
    }

    #[test]
    fn negation_flips_and_halves() {
        // good 0.7 * -0.5
        let result = score("This is not good");
        assert!((result.polarity() + 0.35).abs() < 1e-6, "got {}", result.polarity());
        assert_eq!(result.label(), SentimentLabel::Negative);
    }

    #[test]
    fn contraction_negates() {
        let result = score("It isn't good");
        assert!(result.polarity() < 0.0, "got {}", result.polarity());
    }

    #[test]
    fn intensifier_scales_polarity() {
        let plain = score("good").polarity();
        let boosted = score("very good").polarity();
        assert!((boosted - plain * 1.3).abs() < 1e-6, "got {boosted}");
    }

    #[test]
    fn diminisher_weakens_polarity() {
        let plain = score("bad").polarity();
        let weak = score("slightly bad").polarity();
        assert!(weak > plain && weak < 0.0, "got {weak}");
    }

    #[test]
    fn negated_intensifier_combines() {
        // good 0.7 * 1.3 * -0.5
        let result = score("not very good");
        assert!((result.polarity() + 0.455).abs() < 1e-5, "got {}", result.polarity());
    }

    #[test]
    fn modifier_reaches_across_short_gap() {
        let result = score("not a good idea");
        assert!(result.polarity() < 0.0, "got {}", result.polarity());
    }

    #[test]
    fn modifier_lapses_after_window() {
        let result = score("not that we ever really thought it good");
        // "really" resets the gap but keeps the negation pending; four plain
        // words after the last modifier would clear it.
        assert!(result.polarity() < 0.0, "got {}", result.polarity());

        let lapsed = score("never one two three four good");
        assert!(lapsed.polarity() > 0.0, "got {}", lapsed.polarity());
    }

    #[test]
    fn sentence_boundary_clears_modifiers() {
        let result = score("Not really. Good.");
        assert!(result.polarity() > 0.0, "got {}", result.polarity());
    }

    #[test]
    fn polarity_is_clamped() {
        let result = score("absolutely extremely excellent");
        assert_eq!(result.polarity(), 1.0);
        assert_eq!(result.subjectivity(), Some(1.0));
    }

    #[test]
    fn case_is_ignored_for_lookup() {
        assert_eq!(score("GREAT").polarity(), score("great").polarity());
    }
}
