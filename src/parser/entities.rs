/// Longest span (in bytes, including `&` and `;`) considered as an entity.
const MAX_ENTITY_LEN: usize = 32;

/// Try to decode an HTML character entity at the start of `input`.
///
/// `input` must start with `&`. The look-ahead stops at the first whitespace
/// or `;`; only a span closed by `;` that names a known entity decodes.
/// Returns the decoded character and the byte length of the raw entity.
pub fn decode_at(input: &str) -> Option<(char, usize)> {
    if !input.starts_with('&') {
        return None;
    }

    for (i, ch) in input.char_indices().skip(1) {
        if i >= MAX_ENTITY_LEN || ch.is_whitespace() {
            return None;
        }
        if ch == ';' {
            let name = &input[1..i];
            return decode_name(name).map(|decoded| (decoded, i + 1));
        }
    }

    None
}

fn decode_name(name: &str) -> Option<char> {
    if let Some(numeric) = name.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }

    let decoded = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "shy" => '\u{ad}',
        "ndash" => '–',
        "mdash" => '—',
        "hellip" => '…',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "laquo" => '«',
        "raquo" => '»',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "deg" => '°',
        "times" => '×',
        "eacute" => 'é',
        "egrave" => 'è',
        "aacute" => 'á',
        "agrave" => 'à',
        "ouml" => 'ö',
        "uuml" => 'ü',
        "auml" => 'ä',
        "ccedil" => 'ç',
        _ => return None,
    };

    Some(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_entities() {
        assert_eq!(decode_at("&amp; rest"), Some(('&', 5)));
        assert_eq!(decode_at("&mdash;word"), Some(('—', 7)));
        assert_eq!(decode_at("&nbsp;"), Some(('\u{a0}', 6)));
    }

    #[test]
    fn test_numeric_entities() {
        assert_eq!(decode_at("&#39;s"), Some(('\'', 5)));
        assert_eq!(decode_at("&#x2019;"), Some(('’', 8)));
        assert_eq!(decode_at("&#xZZ;"), None);
    }

    #[test]
    fn test_not_an_entity() {
        assert_eq!(decode_at("& more"), None);
        assert_eq!(decode_at("&T and"), None);
        assert_eq!(decode_at("&bogus;"), None);
        assert_eq!(decode_at("plain"), None);
    }
}
