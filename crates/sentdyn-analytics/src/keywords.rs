//! Ranked keyword frequencies.

use std::collections::HashMap;

use sentdyn_core::KeywordEntry;

use crate::stopwords::is_stopword;

/// Default length of the keyword list.
pub const DEFAULT_TOP_N: usize = 10;

/// Tokens shorter than this many characters are treated as noise.
pub const MIN_TERM_CHARS: usize = 2;

/// Count non-stopword tokens and return the `top_n` most frequent.
///
/// `tokens` are expected to be normalized (lowercased) already. Entries are
/// ordered by descending count; ties keep the order in which the terms first
/// appeared. Returns an empty list when every token is filtered out.
#[must_use]
pub fn extract(tokens: &[String], top_n: usize) -> Vec<KeywordEntry> {
    // `entries` preserves first-occurrence order; `index` maps term -> slot.
    let mut entries: Vec<KeywordEntry> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for token in tokens {
        if token.chars().count() < MIN_TERM_CHARS || is_stopword(token) {
            continue;
        }
        match index.get(token.as_str()) {
            Some(&slot) => entries[slot].count += 1,
            None => {
                index.insert(token.as_str(), entries.len());
                entries.push(KeywordEntry {
                    term: token.clone(),
                    count: 1,
                });
            }
        }
    }

    // `sort_by` is stable, so equal counts stay in first-occurrence order.
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(top_n);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    fn terms(entries: &[KeywordEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.term.as_str()).collect()
    }

    #[test]
    fn counts_words_correctly() {
        let result = extract(&tokens(&["hello", "hello", "hello", "world", "world"]), 10);
        assert_eq!(
            result,
            vec![
                KeywordEntry {
                    term: "hello".to_string(),
                    count: 3
                },
                KeywordEntry {
                    term: "world".to_string(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn excludes_stopwords() {
        let result = extract(
            &tokens(&["the", "quick", "brown", "fox", "jumps", "over", "the", "lazy", "dog"]),
            10,
        );
        assert_eq!(terms(&result), vec!["quick", "brown", "fox", "jumps", "lazy", "dog"]);
    }

    #[test]
    fn excludes_single_character_tokens() {
        let result = extract(&tokens(&["a", "b", "c", "5", "hello", "world"]), 10);
        assert_eq!(terms(&result), vec!["hello", "world"]);
    }

    #[test]
    fn ties_break_by_first_occurrence() {
        let result = extract(
            &tokens(&["zeta", "alpha", "mid", "alpha", "zeta", "omega"]),
            10,
        );
        assert_eq!(terms(&result), vec!["zeta", "alpha", "mid", "omega"]);
        assert_eq!(result[0].count, 2);
        assert_eq!(result[1].count, 2);
    }

    #[test]
    fn truncates_to_top_n() {
        let words = [
            "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
            "eleven", "twelve",
        ];
        let result = extract(&tokens(&words), 5);
        assert_eq!(terms(&result), vec!["one", "two", "three", "four", "five"]);
    }

    #[test]
    fn default_top_n_caps_at_ten() {
        let words: Vec<String> = (0..25).map(|i| format!("term{i}")).collect();
        let result = extract(&words, DEFAULT_TOP_N);
        assert_eq!(result.len(), 10);
    }

    #[test]
    fn all_filtered_yields_empty() {
        let result = extract(&tokens(&["the", "a", "of", "i"]), 10);
        assert!(result.is_empty());
    }

    #[test]
    fn counts_sum_to_kept_tokens() {
        let input = tokens(&["data", "is", "data", "and", "more", "data", "science", "x"]);
        let result = extract(&input, 10);
        let total: usize = result.iter().map(|e| e.count).sum();
        // data x3 + science x1; "is", "and", "more" are stopwords, "x" is too short
        assert_eq!(total, 4);
    }

    #[test]
    fn multibyte_single_character_is_too_short() {
        let result = extract(&tokens(&["é", "éé"]), 10);
        assert_eq!(terms(&result), vec!["éé"]);
    }
}
