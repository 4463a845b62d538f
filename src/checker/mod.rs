pub mod classifier;
pub mod dictionary;
pub mod rewriter;
pub mod suggestions;
pub mod tokenizer;

use crate::parser::{self, markdown, Token};
use crate::posts::Document;
use crate::UNRESOLVED_MARKER;
use classifier::Classifier;
use dictionary::Dictionary;
use regex::Regex;
use std::fmt;

/// A flagged token and the text proposed in its place.
///
/// `replacement` is `None` when some part of the token had no close match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub token: Token,
    pub replacement: Option<String>,
}

impl Suggestion {
    pub fn is_resolved(&self) -> bool {
        self.replacement.is_some()
    }
}

/// A suggestion placed in its document for reporting.
#[derive(Debug, Clone)]
pub struct Correction {
    pub suggestion: Suggestion,
    pub row: usize,
    pub column: usize,
    /// Source text of the flagged span, entities left encoded.
    pub original: String,
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {} => {}",
            self.row,
            self.column,
            self.original,
            self.suggestion
                .replacement
                .as_deref()
                .unwrap_or(UNRESOLVED_MARKER)
        )
    }
}

/// Outcome of proofreading one document.
#[derive(Debug, Clone)]
pub struct Report {
    pub document_id: u64,
    pub title: String,
    pub corrections: Vec<Correction>,
}

impl Report {
    pub fn flagged_count(&self) -> usize {
        self.corrections.len()
    }

    pub fn resolved_count(&self) -> usize {
        self.corrections
            .iter()
            .filter(|c| c.suggestion.is_resolved())
            .count()
    }

    /// The document body with every resolved suggestion applied.
    pub fn corrected_body(&self, body: &str) -> String {
        let suggestions: Vec<Suggestion> = self
            .corrections
            .iter()
            .map(|c| c.suggestion.clone())
            .collect();
        rewriter::apply(body, &suggestions)
    }
}

pub struct Proofreader<'a> {
    dictionary: &'a Dictionary,
    classifier: Classifier<'a>,
    ignore_patterns: Vec<Regex>,
}

impl<'a> Proofreader<'a> {
    pub fn new(dictionary: &'a Dictionary) -> Self {
        Self {
            dictionary,
            classifier: Classifier::new(dictionary),
            ignore_patterns: Vec::new(),
        }
    }

    /// Compile extra redaction patterns; invalid ones are reported and skipped.
    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Self {
        for pattern in patterns {
            match Regex::new(pattern) {
                Ok(re) => self.ignore_patterns.push(re),
                Err(e) => log::warn!("Invalid ignore pattern '{}': {}", pattern, e),
            }
        }
        self
    }

    /// Tokens of the prose in a Markdown body, offsets into `body`.
    pub fn tokenize(&self, body: &str) -> Vec<Token> {
        let normalized = markdown::normalize(body, &self.ignore_patterns);
        parser::tokenize(&normalized)
    }

    /// Suggestion for a token of `body`, or `None` when it reads as a good word.
    ///
    /// The replacement is built from the token's source text, so entities
    /// outside the corrected sub-words keep their encoding.
    pub fn check_token(&self, body: &str, token: &Token) -> Option<Suggestion> {
        if self.classifier.is_good_word(&token.text) {
            return None;
        }

        let raw = body.get(token.span()).unwrap_or(token.text.as_str());
        let mut replacement = raw.to_string();
        let mut resolved = true;
        for part in self.classifier.failing_parts(&token.text).iter().rev() {
            match suggestions::best_match(&part.text, self.dictionary) {
                Some(word) => {
                    let start = parser::source_offset(raw, part.source_index);
                    let end = parser::source_offset(raw, part.source_end());
                    replacement.replace_range(start..end, &word);
                }
                None => {
                    resolved = false;
                    break;
                }
            }
        }

        Some(Suggestion {
            token: token.clone(),
            replacement: resolved.then_some(replacement),
        })
    }

    pub fn suggestions(&self, body: &str) -> Vec<Suggestion> {
        self.tokenize(body)
            .iter()
            .filter_map(|token| self.check_token(body, token))
            .collect()
    }

    pub fn proofread(&self, document: &Document) -> Report {
        let body = &document.markdown_body;
        let corrections = self
            .suggestions(body)
            .into_iter()
            .map(|suggestion| {
                let (row, column) = parser::line_column(body, suggestion.token.source_index);
                let original = body
                    .get(suggestion.token.span())
                    .unwrap_or(suggestion.token.text.as_str())
                    .to_string();
                Correction {
                    suggestion,
                    row,
                    column,
                    original,
                }
            })
            .collect();

        log::debug!("proofread post {} ({})", document.id, document.title);

        Report {
            document_id: document.id,
            title: document.title.clone(),
            corrections,
        }
    }
}
