pub mod entities;
pub mod markdown;

use std::ops::Range;

/// Punctuation that ends a token in addition to whitespace.
const BREAK_CHARS: &[char] = &[
    '.', ',', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}', '"', '*', '_', '<', '>', '|', '=',
    '+', '~', '/', '\\', '`', '“', '”', '‘', '…', '–', '—',
];

/// A candidate word and where it came from in the source document.
///
/// `source_index` and `source_length` are byte offsets into the original
/// Markdown. When an HTML entity was decoded into `text`, the source span
/// still covers the encoded form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub source_index: usize,
    pub source_length: usize,
    /// Break character that ended this token, `None` at end of input.
    pub separator: Option<char>,
}

impl Token {
    pub fn new(text: impl Into<String>, source_index: usize, source_length: usize) -> Self {
        Self {
            text: text.into(),
            source_index,
            source_length,
            separator: None,
        }
    }

    pub fn source_end(&self) -> usize {
        self.source_index + self.source_length
    }

    pub fn span(&self) -> Range<usize> {
        self.source_index..self.source_end()
    }
}

pub fn is_break_char(ch: char) -> bool {
    ch.is_whitespace() || BREAK_CHARS.contains(&ch)
}

/// Split normalized Markdown into tokens.
///
/// Expects the output of [`markdown::normalize`], which has the same byte
/// length as the original document, so token offsets address the original.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut start = 0;
    let mut pos = 0;

    while let Some(ch) = text[pos..].chars().next() {
        if ch == '&' {
            if let Some((decoded, raw_len)) = entities::decode_at(&text[pos..]) {
                if is_break_char(decoded) {
                    flush(&mut tokens, &mut current, start, pos, Some(decoded));
                } else {
                    if current.is_empty() {
                        start = pos;
                    }
                    current.push(decoded);
                }
                pos += raw_len;
                continue;
            }
        }

        if is_break_char(ch) && !is_numeric_separator(text, pos, ch) {
            flush(&mut tokens, &mut current, start, pos, Some(ch));
        } else {
            if current.is_empty() {
                start = pos;
            }
            current.push(ch);
        }
        pos += ch.len_utf8();
    }

    flush(&mut tokens, &mut current, start, pos, None);
    tokens
}

fn flush(
    tokens: &mut Vec<Token>,
    current: &mut String,
    start: usize,
    end: usize,
    separator: Option<char>,
) {
    if current.is_empty() {
        return;
    }
    tokens.push(Token {
        text: std::mem::take(current),
        source_index: start,
        source_length: end - start,
        separator,
    });
}

/// Byte offset into `raw` of byte `decoded_offset` of its entity-decoded text.
///
/// `raw` is the source span of a single token, as [`tokenize`] decodes it.
pub fn source_offset(raw: &str, decoded_offset: usize) -> usize {
    let mut decoded = 0;
    let mut pos = 0;

    while decoded < decoded_offset {
        let rest = &raw[pos..];
        let (width, raw_len) = match entities::decode_at(rest) {
            Some((ch, raw_len)) => (ch.len_utf8(), raw_len),
            None => match rest.chars().next() {
                Some(ch) => (ch.len_utf8(), ch.len_utf8()),
                None => break,
            },
        };
        decoded += width;
        pos += raw_len;
    }

    pos
}

/// `.` or `,` between two digits belongs to the number (`1.5`, `1,000`).
fn is_numeric_separator(text: &str, pos: usize, ch: char) -> bool {
    if ch != '.' && ch != ',' {
        return false;
    }
    let before = text[..pos].chars().next_back();
    let after = text[pos + ch.len_utf8()..].chars().next();
    matches!((before, after), (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit())
}

/// 1-based row and column of a byte offset.
///
/// `\r\n` and a lone `\r` count as a single line ending; columns count chars.
pub fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let prefix = text.get(..offset).unwrap_or(text);
    let mut row = 1;
    let mut column = 1;
    let mut chars = prefix.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row += 1;
                column = 1;
            }
            '\n' => {
                row += 1;
                column = 1;
            }
            _ => column += 1,
        }
    }

    (row, column)
}
