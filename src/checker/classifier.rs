use crate::checker::dictionary::Dictionary;
use crate::checker::tokenizer::{split_sub_words, SplitStrategy};
use crate::parser::Token;
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;

lazy_static! {
    // Everything numeric the checker accepts without a dictionary lookup.
    static ref NUMBER: Regex = Regex::new(r"^[-+]?\d+(?:[.,]\d+)*%?$").unwrap();
    // Any digits with any suffix, so "3th" matches.
    static ref ORDINAL: Regex = Regex::new(r"(?i)^\d+(?:st|nd|rd|th)$").unwrap();
    static ref MEASUREMENT: Regex = Regex::new(
        r"(?i)^[-+]?\d+(?:\.\d+)?(?:s|ms|ns|us|µs|m|h|k|em|rem|px|pt|vh|vw|x|b|kb|mb|gb|tb|kib|mib|gib|fps|bit|bits|hz|khz|mhz|ghz|dpi|ppi)$"
    )
    .unwrap();
    static ref DIMENSIONS: Regex = Regex::new(r"(?i)^\d+x\d+(?:x\d+)?(?:px)?$").unwrap();
    static ref HEX_COLOR: Regex =
        Regex::new(r"(?i)^#(?:[0-9a-f]{3,4}|[0-9a-f]{6}|[0-9a-f]{8})$").unwrap();
}

const DERIVATION_PREFIXES: [&str; 2] = ["de", "re"];

/// Numbers, ordinals, units, dimensions and hex colours.
pub fn is_numeric(word: &str) -> bool {
    NUMBER.is_match(word)
        || ORDINAL.is_match(word)
        || MEASUREMENT.is_match(word)
        || DIMENSIONS.is_match(word)
        || HEX_COLOR.is_match(word)
}

/// Decides whether a token is an acceptable word.
pub struct Classifier<'a> {
    dictionary: &'a Dictionary,
}

impl<'a> Classifier<'a> {
    pub fn new(dictionary: &'a Dictionary) -> Self {
        Self { dictionary }
    }

    /// Dictionary membership, including possessives and acronym plurals.
    pub fn is_known(&self, word: &str) -> bool {
        let word = normalize_apostrophes(word);
        let word = word.as_ref();

        if self.dictionary.contains(word) {
            return true;
        }

        if let Some(stem) = word.strip_suffix("'s") {
            if !stem.is_empty() && self.dictionary.contains(stem) {
                return true;
            }
        }

        if let Some(stem) = word.strip_suffix('s') {
            let acronym = stem.chars().count() >= 2
                && stem.chars().any(char::is_uppercase)
                && !stem.chars().any(char::is_lowercase);
            if acronym && self.dictionary.contains_exact(stem) {
                return true;
            }
        }

        false
    }

    /// A single sub-word on its own: known or numeric.
    pub fn is_acceptable(&self, word: &str) -> bool {
        self.is_known(word) || is_numeric(word)
    }

    pub fn is_good_word(&self, word: &str) -> bool {
        if !word.chars().any(char::is_alphanumeric) {
            return true;
        }

        if self.is_acceptable(word) {
            return true;
        }

        if SplitStrategy::ALL
            .iter()
            .any(|&strategy| self.decomposes(word, strategy))
        {
            return true;
        }

        self.is_derived_form(word)
    }

    fn decomposes(&self, word: &str, strategy: SplitStrategy) -> bool {
        let parts = split_sub_words(word, strategy);
        !parts.is_empty() && parts.iter().all(|part| self.is_acceptable(&part.text))
    }

    /// `deserialising` from `serialising`, `rewrap` from `wrap`.
    fn is_derived_form(&self, word: &str) -> bool {
        let trimmed = word.trim_matches(|c: char| !c.is_alphanumeric());
        let lower = trimmed.to_lowercase();

        DERIVATION_PREFIXES.iter().any(|prefix| {
            lower
                .strip_prefix(prefix)
                .is_some_and(|rest| !rest.is_empty() && self.is_known(rest))
        })
    }

    /// Sub-words of a rejected word that fail on their own.
    ///
    /// Uses whichever strategy leaves the least failing text, preferring
    /// punctuation splitting on ties. Offsets are relative to `word`. A
    /// possessive `'s` is left out of the part so it survives replacement.
    pub fn failing_parts(&self, word: &str) -> Vec<Token> {
        let failing = SplitStrategy::ALL
            .iter()
            .map(|&strategy| {
                split_sub_words(word, strategy)
                    .into_iter()
                    .filter(|part| !self.is_acceptable(&part.text))
                    .collect::<Vec<_>>()
            })
            .filter(|parts| !parts.is_empty())
            .min_by_key(|parts| parts.iter().map(|p| p.source_length).sum::<usize>());

        failing
            .unwrap_or_else(|| vec![Token::new(word, 0, word.len())])
            .into_iter()
            .map(without_possessive)
            .collect()
    }
}

fn without_possessive(mut part: Token) -> Token {
    let stem_len = ["'s", "’s"]
        .iter()
        .find_map(|suffix| part.text.strip_suffix(suffix))
        .map(str::len);

    if let Some(len) = stem_len.filter(|&len| len > 0) {
        part.text.truncate(len);
        part.source_length = len;
        part.separator = None;
    }
    part
}

fn normalize_apostrophes(word: &str) -> Cow<'_, str> {
    if word.contains('’') {
        Cow::Owned(word.replace('’', "'"))
    } else {
        Cow::Borrowed(word)
    }
}
