use std::sync::LazyLock;

use regex::Regex;

/// Numbers (with separators and an optional letter suffix such as `5th` or
/// `3pm`), words with internal apostrophes, ampersands or hyphens, or any
/// single other non-space character.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\p{N}+(?:[.,:]\p{N}+)*\p{L}*|[\p{L}\p{N}]+(?:['’&-][\p{L}\p{N}]+)*|\S")
        .expect("valid token regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Word,
    Number,
    Symbol,
}

/// A token borrowed from the input, with byte offsets into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'t> {
    pub text: &'t str,
    pub start: usize,
    pub end: usize,
    pub kind: TokenKind,
}

impl<'t> Token<'t> {
    fn new(text: &'t str, start: usize) -> Self {
        let kind = match text.chars().next() {
            Some(c) if c.is_numeric() => TokenKind::Number,
            Some(c) if c.is_alphanumeric() => TokenKind::Word,
            _ => TokenKind::Symbol,
        };
        Self {
            text,
            start,
            end: start + text.len(),
            kind,
        }
    }

    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    pub fn is_capitalized(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_uppercase)
    }

    pub fn is_all_caps(&self) -> bool {
        let mut letters = self.text.chars().filter(|c| c.is_alphabetic()).peekable();
        letters.peek().is_some() && letters.all(char::is_uppercase)
    }

    /// Digits part of a number token, without separators or letter suffix.
    pub fn digits(&self) -> Option<&'t str> {
        if self.kind != TokenKind::Number {
            return None;
        }
        let end = self
            .text
            .find(|c: char| !c.is_numeric())
            .unwrap_or(self.text.len());
        Some(&self.text[..end])
    }

    /// Integer value of a plain or suffixed number (`12`, `5th`, `3pm`).
    /// `None` for separated numbers like `1,000` or `2.5`.
    pub fn integer(&self) -> Option<u32> {
        let digits = self.digits()?;
        let rest = &self.text[digits.len()..];
        if rest.starts_with(['.', ',', ':']) {
            return None;
        }
        digits.parse().ok()
    }

    /// Lowercase letter suffix of a number token (`th` in `5th`).
    pub fn number_suffix(&self) -> Option<String> {
        if self.kind != TokenKind::Number {
            return None;
        }
        let start = self.text.find(char::is_alphabetic)?;
        Some(self.text[start..].to_lowercase())
    }

    /// A number with no letter suffix (`42`, `1,000`, `2.5`).
    pub fn is_bare_number(&self) -> bool {
        self.kind == TokenKind::Number && !self.text.contains(char::is_alphabetic)
    }

    pub fn ends_sentence(&self) -> bool {
        matches!(self.text, "." | "!" | "?")
    }
}

/// Split `text` into tokens. Possessive `'s` is split off its word so
/// "Apple's" yields `Apple` and `'s`.
pub(crate) fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    for m in TOKEN_RE.find_iter(text) {
        let word = m.as_str();
        let possessive = ["'s", "’s", "'S", "’S"]
            .iter()
            .find(|suffix| word.len() > suffix.len() && word.ends_with(*suffix));
        match possessive {
            Some(suffix) => {
                let split = word.len() - suffix.len();
                tokens.push(Token::new(&word[..split], m.start()));
                tokens.push(Token::new(&word[split..], m.start() + split));
            }
            None => tokens.push(Token::new(word, m.start())),
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<&str> {
        tokenize(input).iter().map(|t| t.text).collect()
    }

    #[test]
    fn splits_words_numbers_and_punctuation() {
        assert_eq!(
            texts("Apple released it in London on 5 May."),
            vec!["Apple", "released", "it", "in", "London", "on", "5", "May", "."]
        );
    }

    #[test]
    fn offsets_slice_back_to_token_text() {
        let input = "Visit São Paulo, then Zürich!";
        for token in tokenize(input) {
            assert_eq!(&input[token.start..token.end], token.text);
        }
    }

    #[test]
    fn possessive_is_split_off() {
        assert_eq!(texts("Apple's shares"), vec!["Apple", "'s", "shares"]);
    }

    #[test]
    fn internal_punctuation_stays_in_word() {
        assert_eq!(
            texts("O'Neill joined AT&T and Coca-Cola"),
            vec!["O'Neill", "joined", "AT&T", "and", "Coca-Cola"]
        );
    }

    #[test]
    fn numbers_keep_separators_and_suffix() {
        let tokens = tokenize("$1,200.50 on the 5th at 3pm, 10:30");
        let numbers: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Number)
            .map(|t| t.text)
            .collect();
        assert_eq!(numbers, vec!["1,200.50", "5th", "3pm", "10:30"]);
        assert_eq!(tokens[0].kind, TokenKind::Symbol);
    }

    #[test]
    fn integer_reads_plain_and_suffixed_numbers() {
        let tokens = tokenize("12 5th 3pm 1,000 2.5");
        let values: Vec<_> = tokens.iter().map(Token::integer).collect();
        assert_eq!(values, vec![Some(12), Some(5), Some(3), None, None]);
        assert_eq!(tokens[1].number_suffix().as_deref(), Some("th"));
        assert!(tokens[3].is_bare_number());
        assert!(!tokens[2].is_bare_number());
    }

    #[test]
    fn capitalization_checks() {
        let tokens = tokenize("London NASA iPhone");
        assert!(tokens[0].is_capitalized() && !tokens[0].is_all_caps());
        assert!(tokens[1].is_all_caps());
        assert!(!tokens[2].is_capitalized());
    }
}
