//! Social-text valence scorer.
//!
//! Word and emoticon valences on a `-4..4` scale, adjusted for emphasis
//! (ALL CAPS, boosters, exclamation marks), negation and contrastive "but",
//! then squashed into a compound score in `[-1, 1]`.

use sentdyn_core::{IntensityBreakdown, SentimentResult};

use super::SentimentEngine;

/// Valence per lowercase token. Emoticons are matched before punctuation
/// stripping.
pub(crate) const LEXICON: &[(&str, f32)] = &[
    // Positive
    ("love", 3.2),
    ("loved", 2.9),
    ("loving", 2.9),
    ("good", 1.9),
    ("great", 3.1),
    ("excellent", 2.7),
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("wonderful", 2.7),
    ("fantastic", 2.6),
    ("superb", 3.1),
    ("perfect", 2.7),
    ("beautiful", 2.9),
    ("brilliant", 2.8),
    ("best", 3.2),
    ("better", 1.9),
    ("nice", 1.8),
    ("happy", 2.7),
    ("glad", 2.0),
    ("pleased", 1.9),
    ("satisfied", 1.8),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("fun", 2.3),
    ("exciting", 2.2),
    ("excited", 1.9),
    ("proud", 2.1),
    ("delicious", 2.7),
    ("friendly", 2.2),
    ("helpful", 1.8),
    ("kind", 2.4),
    ("sweet", 2.0),
    ("smile", 1.5),
    ("hope", 1.9),
    ("thanks", 1.9),
    ("thank", 1.5),
    ("appreciate", 1.7),
    ("recommend", 1.5),
    ("success", 2.7),
    ("successful", 2.8),
    ("win", 2.8),
    ("won", 2.7),
    ("positive", 2.6),
    ("safe", 1.9),
    ("easy", 1.9),
    ("support", 1.7),
    ("cool", 1.3),
    ("wow", 2.8),
    ("yay", 2.4),
    ("lol", 1.8),
    ("lmao", 2.0),
    ("haha", 2.0),
    ("xd", 1.5),
    (":)", 2.0),
    (":-)", 1.9),
    (":d", 2.3),
    (";)", 0.9),
    (":p", 1.3),
    ("<3", 1.9),
    // Negative
    ("bad", -2.5),
    ("terrible", -2.1),
    ("awful", -2.0),
    ("horrible", -2.5),
    ("worst", -3.1),
    ("worse", -2.1),
    ("poor", -2.1),
    ("hate", -2.7),
    ("hated", -3.2),
    ("sad", -2.1),
    ("angry", -2.3),
    ("unhappy", -1.8),
    ("disappointing", -2.2),
    ("disappointed", -1.9),
    ("boring", -1.3),
    ("ugly", -3.1),
    ("wrong", -2.1),
    ("broken", -1.7),
    ("useless", -1.8),
    ("annoying", -1.7),
    ("rude", -2.0),
    ("dirty", -1.9),
    ("difficult", -1.5),
    ("pain", -2.3),
    ("painful", -2.4),
    ("dangerous", -2.1),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("problem", -1.7),
    ("stupid", -2.4),
    ("mediocre", -1.0),
    ("negative", -2.7),
    ("frustrating", -1.9),
    ("frustrated", -2.1),
    ("unacceptable", -2.0),
    ("sick", -2.3),
    ("scam", -2.4),
    ("waste", -1.8),
    ("suck", -1.9),
    ("sucks", -1.5),
    ("cry", -2.1),
    ("crying", -2.1),
    ("lose", -1.7),
    ("lost", -1.3),
    ("fear", -2.2),
    ("afraid", -2.2),
    ("worried", -1.2),
    ("ugh", -1.8),
    ("wtf", -2.8),
    (":(", -1.9),
    (":-(", -1.9),
    (":'(", -2.2),
    (":/", -1.4),
];

/// Empirical increment for booster words.
const B_INCR: f32 = 0.293;
/// Empirical decrement for dampener words.
const B_DECR: f32 = -0.293;
/// Extra valence for an ALL-CAPS sentiment word in mixed-case text.
const C_INCR: f32 = 0.733;
/// Scalar applied to negated valence.
const N_SCALAR: f32 = -0.74;
/// Normalization constant for the compound score.
const ALPHA: f32 = 15.0;

const BOOSTERS: &[(&str, f32)] = &[
    ("absolutely", B_INCR),
    ("amazingly", B_INCR),
    ("completely", B_INCR),
    ("deeply", B_INCR),
    ("especially", B_INCR),
    ("extremely", B_INCR),
    ("fully", B_INCR),
    ("greatly", B_INCR),
    ("highly", B_INCR),
    ("hugely", B_INCR),
    ("incredibly", B_INCR),
    ("intensely", B_INCR),
    ("most", B_INCR),
    ("particularly", B_INCR),
    ("purely", B_INCR),
    ("really", B_INCR),
    ("so", B_INCR),
    ("super", B_INCR),
    ("totally", B_INCR),
    ("tremendously", B_INCR),
    ("truly", B_INCR),
    ("very", B_INCR),
    ("barely", B_DECR),
    ("hardly", B_DECR),
    ("kinda", B_DECR),
    ("less", B_DECR),
    ("little", B_DECR),
    ("marginally", B_DECR),
    ("occasionally", B_DECR),
    ("partly", B_DECR),
    ("scarcely", B_DECR),
    ("slightly", B_DECR),
    ("somewhat", B_DECR),
];

const NEGATIONS: &[&str] = &[
    "not", "never", "no", "nor", "neither", "none", "nope", "nothing", "nowhere", "without",
    "rarely", "seldom", "cannot", "aint", "arent", "cant", "couldnt", "didnt", "doesnt", "dont",
    "hadnt", "hasnt", "havent", "isnt", "mightnt", "mustnt", "neednt", "shant", "shouldnt",
    "wasnt", "werent", "wont", "wouldnt",
];

/// Preceding-token decay for boosters two and three positions back.
const BOOSTER_DECAY: [f32; 3] = [1.0, 0.95, 0.9];

fn valence_of(word: &str) -> Option<f32> {
    LEXICON.iter().find(|(w, _)| *w == word).map(|&(_, v)| v)
}

fn booster_of(word: &str) -> Option<f32> {
    BOOSTERS.iter().find(|(w, _)| *w == word).map(|&(_, v)| v)
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.contains("n't")
}

/// `true` when the token has cased letters and all of them are uppercase.
fn is_all_caps(token: &str) -> bool {
    let mut cased = token.chars().filter(|c| c.is_alphabetic()).peekable();
    cased.peek().is_some() && cased.all(char::is_uppercase)
}

/// Text tokens with surrounding punctuation removed, except for tokens that
/// are themselves lexicon entries (emoticons).
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter_map(|raw| {
            if valence_of(&raw.to_lowercase()).is_some() {
                return Some(raw.to_string());
            }
            let stripped = raw.trim_matches(|c: char| !c.is_alphanumeric());
            (!stripped.is_empty()).then(|| stripped.replace('’', "'"))
        })
        .collect()
}

/// A booster preceding a sentiment word, signed to follow the word's valence.
fn booster_scalar(word: &str, valence: f32, caps_differential: bool) -> f32 {
    let Some(mut scalar) = booster_of(&word.to_lowercase()) else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if caps_differential && is_all_caps(word) {
        scalar += if valence > 0.0 { C_INCR } else { -C_INCR };
    }
    scalar
}

/// Valence of each token after local adjustments.
fn token_valences(tokens: &[String]) -> Vec<f32> {
    let caps_count = tokens.iter().filter(|t| is_all_caps(t)).count();
    let caps_differential = caps_count > 0 && caps_count < tokens.len();
    let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();

    let mut valences = Vec::with_capacity(tokens.len());
    for (i, word) in lowered.iter().enumerate() {
        if booster_of(word).is_some() {
            valences.push(0.0);
            continue;
        }
        let Some(mut valence) = valence_of(word) else {
            valences.push(0.0);
            continue;
        };

        if caps_differential && is_all_caps(&tokens[i]) {
            valence += if valence > 0.0 { C_INCR } else { -C_INCR };
        }

        for (back, decay) in BOOSTER_DECAY.iter().enumerate() {
            let Some(j) = i.checked_sub(back + 1) else {
                break;
            };
            if valence_of(&lowered[j]).is_some() {
                continue;
            }
            valence += booster_scalar(&tokens[j], valence, caps_differential) * decay;
            if is_negation(&lowered[j]) {
                valence *= N_SCALAR;
            }
        }

        valences.push(valence);
    }

    apply_but(&lowered, &mut valences);
    valences
}

/// Contrastive "but": soften what precedes it and stress what follows.
fn apply_but(lowered: &[String], valences: &mut [f32]) {
    let Some(pivot) = lowered.iter().position(|w| w == "but") else {
        return;
    };
    for (i, valence) in valences.iter_mut().enumerate() {
        if i < pivot {
            *valence *= 0.5;
        } else if i > pivot {
            *valence *= 1.5;
        }
    }
}

/// Emphasis from exclamation marks and repeated question marks.
fn punctuation_emphasis(text: &str) -> f32 {
    let exclamations = text.matches('!').count().min(4);
    let questions = text.matches('?').count();

    #[allow(clippy::cast_precision_loss)]
    let mut emphasis = exclamations as f32 * 0.292;
    if questions > 1 {
        #[allow(clippy::cast_precision_loss)]
        let amp = if questions <= 3 {
            questions as f32 * 0.18
        } else {
            0.96
        };
        emphasis += amp;
    }
    emphasis
}

fn normalize_score(score: f32) -> f32 {
    (score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round_to(value: f32, places: i32) -> f32 {
    let factor = 10_f32.powi(places);
    (value * factor).round() / factor
}

fn breakdown(text: &str) -> IntensityBreakdown {
    let tokens = tokenize(text);
    let valences = token_valences(&tokens);
    if valences.is_empty() {
        return IntensityBreakdown {
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
            compound: 0.0,
        };
    }

    let emphasis = punctuation_emphasis(text);
    let mut sum: f32 = valences.iter().sum();
    if sum > 0.0 {
        sum += emphasis;
    } else if sum < 0.0 {
        sum -= emphasis;
    }
    let compound = normalize_score(sum);

    let mut pos_sum = 0.0_f32;
    let mut neg_sum = 0.0_f32;
    let mut neutral_count = 0.0_f32;
    for &v in &valences {
        if v > 0.0 {
            pos_sum += v + 1.0;
        } else if v < 0.0 {
            neg_sum += v - 1.0;
        } else {
            neutral_count += 1.0;
        }
    }
    if pos_sum > neg_sum.abs() {
        pos_sum += emphasis;
    } else if pos_sum < neg_sum.abs() {
        neg_sum -= emphasis;
    }

    let total = pos_sum + neg_sum.abs() + neutral_count;
    IntensityBreakdown {
        positive: round_to((pos_sum / total).abs(), 3),
        negative: round_to((neg_sum / total).abs(), 3),
        neutral: round_to((neutral_count / total).abs(), 3),
        compound: round_to(compound, 4),
    }
}

/// Valence-lexicon scorer tuned for informal text.
#[derive(Debug, Clone, Copy, Default)]
pub struct SocialLexiconEngine;

impl SentimentEngine for SocialLexiconEngine {
    fn score(&self, text: &str) -> SentimentResult {
        let scores = breakdown(text);
        tracing::trace!(
            compound = scores.compound,
            positive = scores.positive,
            negative = scores.negative,
            "social lexicon scored"
        );
        SentimentResult::social(scores)
    }
}

#[cfg(test)]
mod tests {
    use sentdyn_core::SentimentLabel;

    use super::*;

    fn score(text: &str) -> SentimentResult {
        SocialLexiconEngine.score(text)
    }

    fn compound(text: &str) -> f32 {
        score(text).compound().expect("compound present")
    }

    #[test]
    fn empty_text_is_neutral() {
        let result = score("");
        assert_eq!(result.label(), SentimentLabel::Neutral);
        assert_eq!(result.compound(), Some(0.0));
        assert_eq!(result.breakdown().map(|b| b.neutral), Some(1.0));
    }

    #[test]
    fn unknown_text_is_neutral() {
        let result = score("The meeting is scheduled.");
        assert_eq!(result.label(), SentimentLabel::Neutral);
        assert!(compound("The meeting is scheduled.").abs() < 0.05);
    }

    #[test]
    fn positive_text_is_positive() {
        let result = score("I love this product! It's amazing!");
        assert_eq!(result.label(), SentimentLabel::Positive);
        assert!(result.polarity() >= 0.05);
    }

    #[test]
    fn negative_text_is_negative() {
        let result = score("I hate this. It's terrible and awful.");
        assert_eq!(result.label(), SentimentLabel::Negative);
        assert!(result.polarity() <= -0.05);
    }

    #[test]
    fn terrible_service_compound() {
        // terrible -2.1 -> -2.1 / sqrt(4.41 + 15)
        let c = compound("Terrible service, I am never returning.");
        assert!((c + 0.4767).abs() < 1e-3, "got {c}");
    }

    #[test]
    fn subjectivity_is_absent() {
        assert!(score("This is a test.").subjectivity().is_none());
    }

    #[test]
    fn breakdown_proportions_sum_to_one() {
        let b = *score("I love it but the service was bad").breakdown().unwrap();
        let total = b.positive + b.negative + b.neutral;
        assert!((total - 1.0).abs() < 0.01, "got {total}");
        assert!(b.positive > 0.0 && b.negative > 0.0);
    }

    #[test]
    fn exclamations_add_emphasis() {
        assert!(compound("good!!!") > compound("good"));
    }

    #[test]
    fn exclamation_emphasis_caps_at_four() {
        assert_eq!(compound("good!!!!"), compound("good!!!!!!!!"));
    }

    #[test]
    fn caps_emphasis_in_mixed_case_text() {
        assert!(compound("this is GREAT") > compound("this is great"));
    }

    #[test]
    fn all_caps_text_gets_no_caps_bonus() {
        assert_eq!(compound("THIS IS GREAT"), compound("this is great"));
    }

    #[test]
    fn booster_increases_intensity() {
        assert!(compound("very good") > compound("good"));
        assert!(compound("very bad") < compound("bad"));
    }

    #[test]
    fn dampener_decreases_intensity() {
        assert!(compound("slightly good") < compound("good"));
    }

    #[test]
    fn negation_flips_valence() {
        assert!(compound("not good") < 0.0);
        assert!(compound("isn't good") < 0.0);
        assert!(compound("never really good") < 0.0);
    }

    #[test]
    fn negation_out_of_range_is_ignored() {
        assert!(compound("not one two three good") > 0.0);
    }

    #[test]
    fn but_shifts_weight_to_second_clause() {
        assert!(compound("the food was good but the service was terrible") < 0.0);
    }

    #[test]
    fn emoticons_are_scored() {
        assert!(compound("see you tomorrow :)") > 0.0);
        assert!(compound("missed the bus :(") < 0.0);
        assert!(compound("<3") > 0.0);
    }

    #[test]
    fn compound_is_bounded() {
        let c = compound("LOVE LOVE LOVE amazing awesome best great wonderful!!!!");
        assert!((-1.0..=1.0).contains(&c));
    }
}
