//! Gazetteer-and-cue tagger producing BIO tags over tokens.
//!
//! Three passes run in order, each only touching tokens no earlier pass
//! tagged: gazetteer lookup (longest entry wins), calendar and numeric
//! patterns, then classification of remaining capitalized runs.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use sentdyn_core::{EntityCategory, EntityMention};

use super::model::{NativeLabel, TaggerModel};
use super::tokens::{tokenize, Token, TokenKind};
use crate::stopwords;

const ORDINAL_SUFFIXES: &[&str] = &["st", "nd", "rd", "th"];
const YEAR_RANGE: Range<u32> = 1800..2101;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tag {
    Out,
    Begin(NativeLabel),
    Inside(NativeLabel),
}

#[derive(Debug, Default)]
struct NameSets {
    first_names: HashSet<String>,
    person_titles: HashSet<String>,
    org_suffixes: HashSet<String>,
    location_suffixes: HashSet<String>,
    location_cues: HashSet<String>,
    connectors: HashSet<String>,
}

#[derive(Debug, Default)]
struct CalendarSets {
    months: HashSet<String>,
    ambiguous_months: HashSet<String>,
    weekdays: HashSet<String>,
    relative_days: HashSet<String>,
    relative_modifiers: HashSet<String>,
    periods: HashSet<String>,
    durations: HashSet<String>,
    time_words: HashSet<String>,
    meridiems: HashSet<String>,
}

#[derive(Debug, Default)]
struct NumberSets {
    cardinals: HashSet<String>,
    ordinals: HashSet<String>,
    scales: HashSet<String>,
    currency_symbols: HashSet<String>,
    currency_words: HashSet<String>,
    percent_words: HashSet<String>,
}

/// A compiled [`TaggerModel`], ready to tag text. Immutable and shareable
/// across threads.
#[derive(Debug)]
pub struct EntityTagger {
    name: String,
    version: u32,
    gazetteer: HashMap<String, NativeLabel>,
    max_entry_tokens: usize,
    names: NameSets,
    calendar: CalendarSets,
    numbers: NumberSets,
}

fn exact(list: &[String]) -> HashSet<String> {
    list.iter().map(|s| s.trim().to_string()).collect()
}

fn lowered(list: &[String]) -> HashSet<String> {
    list.iter().map(|s| s.trim().to_lowercase()).collect()
}

/// Gazetteer key: the entry's token texts joined by single spaces, so
/// entries match regardless of how the input spaces its punctuation.
fn join_texts(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(|t| t.text).collect::<Vec<_>>().join(" ")
}

impl EntityTagger {
    #[must_use]
    pub fn compile(model: &TaggerModel) -> Self {
        let mut gazetteer = HashMap::new();
        let mut max_entry_tokens = 0;
        for (&label, entries) in &model.gazetteer {
            for entry in entries {
                let tokens = tokenize(entry);
                if tokens.is_empty() {
                    continue;
                }
                max_entry_tokens = max_entry_tokens.max(tokens.len());
                gazetteer.insert(join_texts(&tokens), label);
            }
        }

        let names = &model.names;
        let calendar = &model.calendar;
        let numbers = &model.numbers;
        Self {
            name: model.name.clone(),
            version: model.version,
            gazetteer,
            max_entry_tokens,
            names: NameSets {
                first_names: exact(&names.first_names),
                person_titles: exact(&names.person_titles),
                org_suffixes: exact(&names.org_suffixes),
                location_suffixes: exact(&names.location_suffixes),
                location_cues: lowered(&names.location_cues),
                connectors: lowered(&names.connectors),
            },
            calendar: CalendarSets {
                months: exact(&calendar.months),
                ambiguous_months: exact(&calendar.ambiguous_months),
                weekdays: exact(&calendar.weekdays),
                relative_days: lowered(&calendar.relative_days),
                relative_modifiers: lowered(&calendar.relative_modifiers),
                periods: lowered(&calendar.periods),
                durations: lowered(&calendar.durations),
                time_words: lowered(&calendar.time_words),
                meridiems: lowered(&calendar.meridiems),
            },
            numbers: NumberSets {
                cardinals: lowered(&numbers.cardinals),
                ordinals: lowered(&numbers.ordinals),
                scales: lowered(&numbers.scales),
                currency_symbols: exact(&numbers.currency_symbols),
                currency_words: lowered(&numbers.currency_words),
                percent_words: lowered(&numbers.percent_words),
            },
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Number of distinct gazetteer keys after compilation.
    #[must_use]
    pub fn gazetteer_len(&self) -> usize {
        self.gazetteer.len()
    }

    /// Tag `text` and return its mentions in order of appearance. Offsets
    /// are byte offsets into `text`.
    #[must_use]
    pub fn recognize(&self, text: &str) -> Vec<EntityMention> {
        let tokens = tokenize(text);
        let tags = self.tag(&tokens);
        decode(&tags)
            .into_iter()
            .map(|(first, last, label)| {
                let start = tokens[first].start;
                let end = tokens[last - 1].end;
                EntityMention {
                    text: text[start..end].to_string(),
                    category: EntityCategory::from_model_label(label.as_str()),
                    label: label.as_str().to_string(),
                    start,
                    end,
                }
            })
            .collect()
    }

    pub(crate) fn tag(&self, tokens: &[Token<'_>]) -> Vec<Tag> {
        let mut tags = vec![Tag::Out; tokens.len()];
        self.tag_gazetteer(tokens, &mut tags);
        self.tag_patterns(tokens, &mut tags);
        self.tag_proper_nouns(tokens, &mut tags);
        tags
    }

    fn tag_gazetteer(&self, tokens: &[Token<'_>], tags: &mut [Tag]) {
        let mut i = 0;
        while i < tokens.len() {
            let longest = self.max_entry_tokens.min(tokens.len() - i);
            let hit = (1..=longest).rev().find_map(|len| {
                self.gazetteer
                    .get(&join_texts(&tokens[i..i + len]))
                    .map(|&label| (len, label))
            });
            match hit {
                Some((len, label)) if is_free(tags, i..i + len) => {
                    mark(tags, i, len, label);
                    i += len;
                }
                _ => i += 1,
            }
        }
    }

    fn tag_patterns(&self, tokens: &[Token<'_>], tags: &mut [Tag]) {
        let mut i = 0;
        while i < tokens.len() {
            if tags[i] != Tag::Out || is_heart_emoticon(tokens, i) {
                i += 1;
                continue;
            }
            let hit = self
                .match_date(tokens, i)
                .or_else(|| self.match_time(tokens, i))
                .or_else(|| self.match_money(tokens, i))
                .or_else(|| self.match_percent(tokens, i))
                .or_else(|| self.match_ordinal(tokens, i))
                .or_else(|| self.match_cardinal(tokens, i));
            match hit {
                Some((len, label)) if is_free(tags, i..i + len) => {
                    mark(tags, i, len, label);
                    i += len;
                }
                _ => i += 1,
            }
        }
    }

    fn tag_proper_nouns(&self, tokens: &[Token<'_>], tags: &mut [Tag]) {
        let free_name = |tags: &[Tag], k: usize| tags[k] == Tag::Out && self.is_name_token(&tokens[k]);

        let mut i = 0;
        while i < tokens.len() {
            if !free_name(tags, i) {
                i += 1;
                continue;
            }
            let start = i;
            let mut end = i + 1;
            loop {
                if end < tokens.len() && free_name(tags, end) {
                    end += 1;
                } else if end + 1 < tokens.len()
                    && tags[end] == Tag::Out
                    && self.names.connectors.contains(&tokens[end].lower())
                    && free_name(tags, end + 1)
                {
                    end += 2;
                } else {
                    break;
                }
            }
            if let Some((first, last, label)) = self.classify_run(tokens, start, end) {
                mark(tags, first, last - first, label);
            }
            i = end;
        }
    }

    fn is_name_token(&self, token: &Token<'_>) -> bool {
        token.kind == TokenKind::Word
            && token.is_capitalized()
            && token.text.chars().count() > 1
            && !stopwords::is_stopword(&token.lower())
            && !self.calendar.months.contains(token.text)
            && !self.calendar.weekdays.contains(token.text)
    }

    /// Decide the label of the capitalized run `tokens[start..end]`. May
    /// narrow the span (a leading title is not part of the name).
    fn classify_run(
        &self,
        tokens: &[Token<'_>],
        start: usize,
        end: usize,
    ) -> Option<(usize, usize, NativeLabel)> {
        let run = &tokens[start..end];
        let names = &self.names;
        let multi = run.len() > 1;

        if run.iter().all(Token::is_all_caps) {
            return None;
        }
        if multi && run.iter().any(|t| names.org_suffixes.contains(t.text)) {
            return Some((start, end, NativeLabel::Org));
        }
        if self.follows_title(tokens, start) {
            return Some((start, end, NativeLabel::Person));
        }
        if multi && names.person_titles.contains(run[0].text) {
            let first = (start + 1..end)
                .find(|&k| !names.connectors.contains(&tokens[k].lower()))?;
            return Some((first, end, NativeLabel::Person));
        }
        if multi && names.location_suffixes.contains(run[run.len() - 1].text) {
            return Some((start, end, NativeLabel::Loc));
        }
        if multi && run.iter().any(|t| names.location_suffixes.contains(t.text)) {
            return Some((start, end, NativeLabel::Loc));
        }
        if names.first_names.contains(run[0].text) {
            return Some((start, end, NativeLabel::Person));
        }
        if start > 0 && names.location_cues.contains(&tokens[start - 1].lower()) {
            return Some((start, end, NativeLabel::Gpe));
        }
        if multi && !starts_sentence(tokens, start) {
            return Some((start, end, NativeLabel::Person));
        }
        None
    }

    /// `Dr Smith` / `Dr. Smith`: the token before the run is a title,
    /// possibly followed by its abbreviation period.
    fn follows_title(&self, tokens: &[Token<'_>], start: usize) -> bool {
        let titles = &self.names.person_titles;
        match start {
            0 => false,
            1 => titles.contains(tokens[0].text),
            _ => {
                titles.contains(tokens[start - 1].text)
                    || (tokens[start - 1].text == "." && titles.contains(tokens[start - 2].text))
            }
        }
    }

    fn is_month(&self, token: &Token<'_>) -> bool {
        self.calendar.months.contains(token.text)
    }

    fn is_count(&self, token: &Token<'_>) -> bool {
        (token.is_bare_number() && token.integer().is_some())
            || self.numbers.cardinals.contains(&token.lower())
    }

    fn match_date(&self, tokens: &[Token<'_>], i: usize) -> Option<(usize, NativeLabel)> {
        let at = |k: usize| tokens.get(i + k);
        let token = &tokens[i];
        let calendar = &self.calendar;
        let date = |len: usize| Some((len, NativeLabel::Date));

        // 5 May, 5th of May 2024, 31st of March, 2024
        if is_day(token) {
            let month_at = if at(1).is_some_and(|t| t.lower() == "of") { 2 } else { 1 };
            if at(month_at).is_some_and(|t| self.is_month(t)) {
                let len = month_at + 1;
                if at(len).is_some_and(|t| t.text == ",") && at(len + 1).is_some_and(is_year) {
                    return date(len + 2);
                }
                return if at(len).is_some_and(is_year) {
                    date(len + 1)
                } else {
                    date(len)
                };
            }
        }

        // May 5, May 5 2024, March 15, 2024, May 2024, September
        if self.is_month(token) {
            if at(1).is_some_and(is_day) {
                if at(2).is_some_and(|t| t.text == ",") && at(3).is_some_and(is_year) {
                    return date(4);
                }
                if at(2).is_some_and(is_year) {
                    return date(3);
                }
                return date(2);
            }
            if at(1).is_some_and(is_year) {
                return date(2);
            }
            if calendar.ambiguous_months.contains(token.text) {
                return None;
            }
            return date(1);
        }

        // three weeks ago
        if self.is_count(token)
            && at(1).is_some_and(|t| calendar.durations.contains(&t.lower()))
            && at(2).is_some_and(|t| t.lower() == "ago")
        {
            return date(3);
        }

        // last week, next Friday
        if calendar.relative_modifiers.contains(&token.lower()) {
            if at(1).is_some_and(|t| {
                calendar.periods.contains(&t.lower()) || calendar.weekdays.contains(t.text)
            }) {
                return date(2);
            }
            return None;
        }

        if calendar.relative_days.contains(&token.lower())
            || calendar.weekdays.contains(token.text)
        {
            return date(1);
        }

        if token.is_bare_number() && token.digits().is_some_and(|d| d.len() == 4) {
            if let Some(year) = token.integer().filter(|y| YEAR_RANGE.contains(y)) {
                tracing::trace!(year, "standalone year");
                return date(1);
            }
        }

        None
    }

    fn match_time(&self, tokens: &[Token<'_>], i: usize) -> Option<(usize, NativeLabel)> {
        let token = &tokens[i];
        let calendar = &self.calendar;

        if token.kind != TokenKind::Number {
            return calendar
                .time_words
                .contains(&token.lower())
                .then_some((1, NativeLabel::Time));
        }
        if !is_clock_hour(token) {
            return None;
        }
        // 3pm, 10:30am
        if token
            .number_suffix()
            .is_some_and(|s| calendar.meridiems.contains(&s))
        {
            return Some((1, NativeLabel::Time));
        }
        if token.is_bare_number() {
            // 3 pm
            if tokens
                .get(i + 1)
                .is_some_and(|t| calendar.meridiems.contains(&t.lower()))
            {
                return Some((2, NativeLabel::Time));
            }
            // 10:30
            if token.text.contains(':') {
                return Some((1, NativeLabel::Time));
            }
        }
        None
    }

    fn match_money(&self, tokens: &[Token<'_>], i: usize) -> Option<(usize, NativeLabel)> {
        let at = |k: usize| tokens.get(i + k);
        let token = &tokens[i];
        let numbers = &self.numbers;
        let is_scale = |t: &Token<'_>| numbers.scales.contains(&t.lower());

        // $5, $5m, $3.2 billion
        if numbers.currency_symbols.contains(token.text) {
            let amount = at(1).filter(|t| {
                t.kind == TokenKind::Number
                    && t.number_suffix().is_none_or(|s| numbers.scales.contains(&s))
            })?;
            let len = if amount.is_bare_number() && at(2).is_some_and(is_scale) {
                3
            } else {
                2
            };
            return Some((len, NativeLabel::Money));
        }

        // 40 dollars, 3 million euros
        if token.is_bare_number() {
            let mut len = 1;
            if at(len).is_some_and(is_scale) {
                len += 1;
            }
            if at(len).is_some_and(|t| numbers.currency_words.contains(&t.lower())) {
                return Some((len + 1, NativeLabel::Money));
            }
        }
        None
    }

    fn match_percent(&self, tokens: &[Token<'_>], i: usize) -> Option<(usize, NativeLabel)> {
        let token = &tokens[i];
        (token.is_bare_number()
            && tokens
                .get(i + 1)
                .is_some_and(|t| self.numbers.percent_words.contains(&t.lower())))
        .then_some((2, NativeLabel::Percent))
    }

    fn match_ordinal(&self, tokens: &[Token<'_>], i: usize) -> Option<(usize, NativeLabel)> {
        let token = &tokens[i];
        let suffixed = token
            .number_suffix()
            .is_some_and(|s| ORDINAL_SUFFIXES.contains(&s.as_str()));
        (suffixed || self.numbers.ordinals.contains(&token.lower()))
            .then_some((1, NativeLabel::Ordinal))
    }

    fn match_cardinal(&self, tokens: &[Token<'_>], i: usize) -> Option<(usize, NativeLabel)> {
        let numbers = &self.numbers;
        let token = &tokens[i];
        if !token.is_bare_number() && !numbers.cardinals.contains(&token.lower()) {
            return None;
        }
        // two hundred thousand
        let extra = tokens[i + 1..]
            .iter()
            .take_while(|t| {
                let lower = t.lower();
                numbers.cardinals.contains(&lower) || numbers.scales.contains(&lower)
            })
            .count();
        Some((1 + extra, NativeLabel::Cardinal))
    }
}

fn is_day(token: &Token<'_>) -> bool {
    let suffix_ok = token
        .number_suffix()
        .is_none_or(|s| ORDINAL_SUFFIXES.contains(&s.as_str()));
    suffix_ok
        && token.digits().is_some_and(|d| d.len() <= 2)
        && token.integer().is_some_and(|d| (1..=31).contains(&d))
}

fn is_year(token: &Token<'_>) -> bool {
    token.is_bare_number()
        && token.digits().is_some_and(|d| d.len() == 4)
        && token.integer().is_some_and(|y| YEAR_RANGE.contains(&y))
}

fn is_clock_hour(token: &Token<'_>) -> bool {
    token
        .digits()
        .and_then(|d| d.parse::<u32>().ok())
        .is_some_and(|h| h <= 24)
}

/// `<3`: a number glued to a preceding `<` is a heart, not a quantity.
fn is_heart_emoticon(tokens: &[Token<'_>], index: usize) -> bool {
    index > 0
        && tokens[index].kind == TokenKind::Number
        && tokens[index - 1].text == "<"
        && tokens[index - 1].end == tokens[index].start
}

/// True when no word precedes `index` in its sentence. Opening quotes and
/// brackets are skipped.
fn starts_sentence(tokens: &[Token<'_>], index: usize) -> bool {
    tokens[..index]
        .iter()
        .rev()
        .find(|t| !matches!(t.text, "\"" | "“" | "'" | "‘" | "(" | "["))
        .is_none_or(Token::ends_sentence)
}

fn is_free(tags: &[Tag], range: Range<usize>) -> bool {
    tags[range].iter().all(|t| *t == Tag::Out)
}

fn mark(tags: &mut [Tag], start: usize, len: usize, label: NativeLabel) {
    tags[start] = Tag::Begin(label);
    for tag in &mut tags[start + 1..start + len] {
        *tag = Tag::Inside(label);
    }
}

/// Collapse BIO tags into `(first, last_exclusive, label)` token spans. An
/// `Inside` tag that does not continue an open span of the same label starts
/// a new one.
pub(crate) fn decode(tags: &[Tag]) -> Vec<(usize, usize, NativeLabel)> {
    let mut spans = Vec::new();
    let mut open: Option<(usize, NativeLabel)> = None;

    for (i, &tag) in tags.iter().enumerate() {
        match tag {
            Tag::Inside(label) if open.is_some_and(|(_, l)| l == label) => {}
            Tag::Begin(label) | Tag::Inside(label) => {
                if let Some((start, l)) = open.take() {
                    spans.push((start, i, l));
                }
                open = Some((i, label));
            }
            Tag::Out => {
                if let Some((start, l)) = open.take() {
                    spans.push((start, i, l));
                }
            }
        }
    }
    if let Some((start, l)) = open {
        spans.push((start, tags.len(), l));
    }
    spans
}

#[cfg(test)]
#[path = "tagger_test.rs"]
mod tests;
