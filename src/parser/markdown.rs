use lazy_static::lazy_static;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use regex::{Captures, Regex};
use std::ops::Range;

lazy_static! {
    static ref FENCED_CODE: Regex = Regex::new(r"(?s)```.*?(?:```|\z)").unwrap();
    static ref INLINE_CODE: Regex = Regex::new(r"`[^`\n]*`").unwrap();
    static ref IMAGE: Regex = Regex::new(r"!\[([^\]\n]*)\]\([^)\n]*\)").unwrap();
    static ref IMG_TAG: Regex = Regex::new(r"(?i)<img\b[^>]*>").unwrap();
    static ref IMG_ALT: Regex = Regex::new(r#"(?i)\balt\s*=\s*"([^"]*)""#).unwrap();
    static ref LINK: Regex =
        Regex::new(r#"\[([^\]\n]*)\]\(\s*([^)\s]*)(?:\s+"[^"\n]*")?\s*\)"#).unwrap();
    static ref AUTOLINK: Regex = Regex::new(r"<[A-Za-z][A-Za-z0-9+.-]*:[^>\s]*>").unwrap();
    static ref LINE_BREAK: Regex = Regex::new(r"(?i)<br\s*/?>").unwrap();
    static ref SCHEME: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://").unwrap();
}

/// Blank out everything in a Markdown document that is not prose.
///
/// Redacted characters become spaces (one per UTF-8 byte, line endings kept),
/// so the result has the same byte length and line layout as `content`.
/// Link and image text is kept where it stands, only the syntax around it is
/// blanked. Every match of `ignore_patterns` is blanked last.
pub fn normalize(content: &str, ignore_patterns: &[Regex]) -> String {
    let mut text = content.to_string();

    blank_matches(&mut text, &FENCED_CODE, whole_match);
    blank_indented_code(&mut text);
    blank_matches(&mut text, &INLINE_CODE, whole_match);
    blank_matches(&mut text, &IMAGE, |caps| keep_group(caps, 1));
    blank_matches(&mut text, &IMG_TAG, image_tag_ranges);
    blank_matches(&mut text, &LINK, link_ranges);
    blank_matches(&mut text, &AUTOLINK, whole_match);
    blank_matches(&mut text, &LINE_BREAK, whole_match);
    for pattern in ignore_patterns {
        blank_matches(&mut text, pattern, whole_match);
    }

    text
}

/// Reduce Markdown to its plain prose, used for mining corpus vocabulary.
pub fn plain_text(content: &str) -> String {
    let mut output = String::with_capacity(content.len());
    let mut in_code_block = false;

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                output.push('\n');
            }
            Event::Text(text) if !in_code_block => output.push_str(&text),
            Event::SoftBreak | Event::HardBreak => output.push('\n'),
            Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::Item)
            | Event::End(TagEnd::TableCell) => output.push('\n'),
            _ => {}
        }
    }

    output
}

fn whole_match(caps: &Captures<'_>) -> Vec<Range<usize>> {
    caps.get(0).map(|m| vec![m.range()]).unwrap_or_default()
}

/// Blank the whole match except capture group `group`.
fn keep_group(caps: &Captures<'_>, group: usize) -> Vec<Range<usize>> {
    let (Some(whole), Some(kept)) = (caps.get(0), caps.get(group)) else {
        return whole_match(caps);
    };
    vec![whole.start()..kept.start(), kept.end()..whole.end()]
}

fn link_ranges(caps: &Captures<'_>) -> Vec<Range<usize>> {
    let text = caps.get(1).map_or("", |m| m.as_str()).trim();
    let url = caps.get(2).map_or("", |m| m.as_str());
    let bare_url = SCHEME.replace(url, "");

    if text == url || text == bare_url {
        whole_match(caps)
    } else {
        keep_group(caps, 1)
    }
}

fn image_tag_ranges(caps: &Captures<'_>) -> Vec<Range<usize>> {
    let Some(tag) = caps.get(0) else {
        return Vec::new();
    };
    match IMG_ALT.captures(tag.as_str()).and_then(|alt| alt.get(1)) {
        Some(alt) => vec![
            tag.start()..tag.start() + alt.start(),
            tag.start() + alt.end()..tag.end(),
        ],
        None => vec![tag.range()],
    }
}

fn blank_matches<F>(text: &mut String, pattern: &Regex, ranges: F)
where
    F: Fn(&Captures<'_>) -> Vec<Range<usize>>,
{
    let spans: Vec<Range<usize>> = pattern
        .captures_iter(text.as_str())
        .flat_map(|caps| ranges(&caps))
        .collect();

    for span in spans {
        blank(text, span);
    }
}

/// Four-space or tab indented lines that open after a blank line, or
/// continue an indented block.
fn blank_indented_code(text: &mut String) {
    let mut spans = Vec::new();
    let mut offset = 0;
    let mut after_blank = true;
    let mut in_code = false;

    for line in text.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        if content.trim().is_empty() {
            after_blank = true;
        } else if (content.starts_with("    ") || content.starts_with('\t'))
            && (after_blank || in_code)
        {
            spans.push(offset..offset + content.len());
            in_code = true;
            after_blank = false;
        } else {
            in_code = false;
            after_blank = false;
        }
        offset += line.len();
    }

    for span in spans {
        blank(text, span);
    }
}

/// Replace a span with spaces, byte for byte, keeping line endings.
fn blank(text: &mut String, span: Range<usize>) {
    if span.is_empty() {
        return;
    }
    let replacement: String = text[span.clone()]
        .chars()
        .flat_map(|ch| {
            let fill = if ch == '\n' || ch == '\r' { ch } else { ' ' };
            std::iter::repeat(fill).take(if fill == ' ' { ch.len_utf8() } else { 1 })
        })
        .collect();
    text.replace_range(span, &replacement);
}
