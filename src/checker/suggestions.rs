use crate::checker::dictionary::Dictionary;

/// Closest known word to `word`.
///
/// Words already in the dictionary come back unchanged. Otherwise every
/// case-insensitive entry is scored by edit distance; ties go to the word
/// seen most often in the corpus, then to the first in dictionary order.
/// The result takes the case of the first letter of `word`. Returns `None`
/// when the dictionary has nothing to offer.
pub fn best_match(word: &str, dictionary: &Dictionary) -> Option<String> {
    if dictionary.contains(word) {
        return Some(word.to_string());
    }

    let probe: Vec<char> = word.to_lowercase().chars().collect();
    let mut candidate_chars: Vec<char> = Vec::new();
    let mut row: Vec<usize> = Vec::new();
    let mut best: Option<(usize, u32, String)> = None;

    dictionary.for_each_folded(|candidate| {
        candidate_chars.clear();
        candidate_chars.extend(candidate.chars());

        if let Some((best_distance, _, _)) = &best {
            if candidate_chars.len().abs_diff(probe.len()) > *best_distance {
                return;
            }
        }

        let distance = edit_distance_chars(&probe, &candidate_chars, &mut row);
        let better = match &best {
            None => true,
            Some((best_distance, best_frequency, _)) => {
                distance < *best_distance
                    || (distance == *best_distance
                        && dictionary.frequency(candidate) > *best_frequency)
            }
        };

        if better {
            best = Some((distance, dictionary.frequency(candidate), candidate.to_string()));
        }
    });

    best.map(|(_, _, suggestion)| match_case(word, &suggestion))
}

/// Calculate Levenshtein distance between two strings
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    edit_distance_chars(&a, &b, &mut Vec::new())
}

fn edit_distance_chars(a: &[char], b: &[char], row: &mut Vec<usize>) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    row.clear();
    row.extend(0..=b.len());

    for (i, a_char) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;

        for (j, b_char) in b.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };
            let above = row[j + 1];

            row[j + 1] = std::cmp::min(
                std::cmp::min(
                    above + 1,  // deletion
                    row[j] + 1, // insertion
                ),
                diagonal + cost, // substitution
            );
            diagonal = above;
        }
    }

    row[b.len()]
}

/// Uppercase the first letter of `suggestion` if `original` starts uppercase,
/// lowercase it otherwise.
fn match_case(original: &str, suggestion: &str) -> String {
    let upper = original.chars().next().is_some_and(char::is_uppercase);
    let mut chars = suggestion.chars();

    match chars.next() {
        Some(first) if upper => first.to_uppercase().chain(chars).collect(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
