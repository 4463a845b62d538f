use crate::checker::Suggestion;

/// Splice resolved suggestions into `text`.
///
/// Edits are applied from the highest offset down, so spans still waiting to
/// be applied keep addressing the original text. A span that overlaps one
/// already applied, runs past the end, or splits a character is a tokenizer
/// bug: it panics in debug builds and is logged and skipped otherwise.
pub fn apply(text: &str, suggestions: &[Suggestion]) -> String {
    let mut ordered: Vec<(&Suggestion, &str)> = suggestions
        .iter()
        .filter_map(|s| s.replacement.as_deref().map(|r| (s, r)))
        .collect();
    ordered.sort_by(|(a, _), (b, _)| b.token.source_index.cmp(&a.token.source_index));

    let mut output = text.to_string();
    let mut limit = text.len();

    for (suggestion, replacement) in ordered {
        let span = suggestion.token.span();
        let valid = span.end <= limit
            && text.is_char_boundary(span.start)
            && text.is_char_boundary(span.end);

        if !valid {
            debug_assert!(
                valid,
                "suggestion span {:?} for {:?} is out of bounds or overlaps",
                span, suggestion.token.text
            );
            log::warn!(
                "skipping suggestion for {:?} at {:?}: span is out of bounds or overlaps",
                suggestion.token.text,
                span
            );
            continue;
        }

        output.replace_range(span.clone(), replacement);
        limit = span.start;
    }

    output
}
