use crate::parser::Token;

/// How a token is decomposed into sub-words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitStrategy {
    /// Break on anything that is not alphanumeric or an apostrophe.
    Punctuation,
    /// As `Punctuation`, and also at camel case and letter/digit boundaries.
    CaseAware,
}

impl SplitStrategy {
    pub const ALL: [SplitStrategy; 2] = [SplitStrategy::Punctuation, SplitStrategy::CaseAware];
}

fn is_apostrophe(ch: char) -> bool {
    ch == '\'' || ch == '’'
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || is_apostrophe(ch)
}

/// Split a word into sub-words.
///
/// Returned tokens carry byte offsets relative to `word`, and the separator
/// character that followed them in `word` (`None` for case boundaries and
/// the end of the word). Apostrophes are trimmed from sub-word edges.
pub fn split_sub_words(word: &str, strategy: SplitStrategy) -> Vec<Token> {
    let mut result = Vec::new();
    let mut start: Option<usize> = None;

    for (i, ch) in word.char_indices() {
        if is_word_char(ch) {
            start.get_or_insert(i);
        } else if let Some(s) = start.take() {
            push_piece(&mut result, word, s, i, Some(ch), strategy);
        }
    }
    if let Some(s) = start {
        push_piece(&mut result, word, s, word.len(), None, strategy);
    }

    result
}

fn push_piece(
    out: &mut Vec<Token>,
    word: &str,
    start: usize,
    end: usize,
    separator: Option<char>,
    strategy: SplitStrategy,
) {
    let piece = &word[start..end];
    let trimmed = piece.trim_start_matches(is_apostrophe);
    let start = start + (piece.len() - trimmed.len());
    let trimmed = trimmed.trim_end_matches(is_apostrophe);
    if trimmed.is_empty() {
        return;
    }

    match strategy {
        SplitStrategy::Punctuation => out.push(Token {
            text: trimmed.to_string(),
            source_index: start,
            source_length: trimmed.len(),
            separator,
        }),
        SplitStrategy::CaseAware => {
            let bounds = case_boundaries(trimmed);
            let mut ends = bounds.iter().skip(1).copied().chain(std::iter::once(trimmed.len()));
            for &from in &bounds {
                let to = ends.next().unwrap_or(trimmed.len());
                let last = to == trimmed.len();
                out.push(Token {
                    text: trimmed[from..to].to_string(),
                    source_index: start + from,
                    source_length: to - from,
                    separator: if last { separator } else { None },
                });
            }
        }
    }
}

/// Byte offsets where case-aware sub-words start, always including 0.
///
/// `camelCase` -> camel|Case, `HTMLParser` -> HTML|Parser, `WTFs` stays whole,
/// `Application1` -> Application|1.
fn case_boundaries(piece: &str) -> Vec<usize> {
    let chars: Vec<(usize, char)> = piece.char_indices().collect();
    let mut bounds = vec![0];

    for i in 1..chars.len() {
        let (offset, cur) = chars[i];
        let prev = chars[i - 1].1;
        let next = chars.get(i + 1).map(|&(_, c)| c);

        let letter_digit = (prev.is_alphabetic() && cur.is_numeric())
            || (prev.is_numeric() && cur.is_alphabetic());
        let lower_upper = cur.is_uppercase() && (prev.is_lowercase() || prev.is_numeric());
        let acronym_end = cur.is_uppercase()
            && prev.is_uppercase()
            && next.is_some_and(char::is_lowercase)
            && !is_plural_suffix(&chars, i + 1);

        if letter_digit || lower_upper || acronym_end {
            bounds.push(offset);
        }
    }

    bounds
}

/// A lone `s` after an acronym (`APIs`, `APIsAre`) is a plural, not a new word.
fn is_plural_suffix(chars: &[(usize, char)], at: usize) -> bool {
    chars.get(at).map(|&(_, c)| c) == Some('s')
        && chars
            .get(at + 1)
            .map_or(true, |&(_, c)| !c.is_alphanumeric() || c.is_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(word: &str, strategy: SplitStrategy) -> Vec<String> {
        split_sub_words(word, strategy)
            .into_iter()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_punctuation_split() {
        assert_eq!(
            texts("spot-the-WTFs", SplitStrategy::Punctuation),
            vec!["spot", "the", "WTFs"]
        );
        assert_eq!(texts("snake_case", SplitStrategy::Punctuation), vec!["snake", "case"]);
        assert_eq!(texts("don't", SplitStrategy::Punctuation), vec!["don't"]);
        assert_eq!(texts("'quoted'", SplitStrategy::Punctuation), vec!["quoted"]);
        assert!(texts("---", SplitStrategy::Punctuation).is_empty());
    }

    #[test]
    fn test_case_aware_split() {
        assert_eq!(
            texts("ConsoleApplication1", SplitStrategy::CaseAware),
            vec!["Console", "Application", "1"]
        );
        assert_eq!(texts("camelCase", SplitStrategy::CaseAware), vec!["camel", "Case"]);
        assert_eq!(texts("HTMLParser", SplitStrategy::CaseAware), vec!["HTML", "Parser"]);
        assert_eq!(texts("WTFs", SplitStrategy::CaseAware), vec!["WTFs"]);
        assert_eq!(texts("APIsAreFun", SplitStrategy::CaseAware), vec!["APIs", "Are", "Fun"]);
        assert_eq!(texts("kebab-Case", SplitStrategy::CaseAware), vec!["kebab", "Case"]);
    }

    #[test]
    fn test_offsets_and_separators() {
        let parts = split_sub_words("'foo-barBaz'", SplitStrategy::CaseAware);
        let spans: Vec<_> = parts
            .iter()
            .map(|t| (t.text.as_str(), t.source_index, t.source_length, t.separator))
            .collect();
        assert_eq!(
            spans,
            vec![
                ("foo", 1, 3, Some('-')),
                ("bar", 5, 3, None),
                ("Baz", 8, 3, None),
            ]
        );
    }
}
