//! Quote-aware bracket balancing and parameter splitting.
//!
//! Item-key parameters (`[...]`) and function arguments (`(...)`) share one
//! rule: a double-quoted string hides brackets and commas, and `\"` inside a
//! quoted string does not close it. Scanning is a single forward pass over the
//! bytes with a depth counter and an "inside quotes" flag.

use crate::constants::PARAMS_INITIAL_CAPACITY;

/// Find the end of the bracketed region opened at `open_pos`.
///
/// `bytes[open_pos]` must be `open`. Returns the offset just past the matching
/// `close`, or `None` when the region is unbalanced or a quote is left open.
pub fn find_balanced_end(bytes: &[u8], open_pos: usize, open: u8, close: u8) -> Option<usize> {
    if bytes.get(open_pos) != Some(&open) {
        return None;
    }

    let mut depth = 0usize;
    let mut quoted = false;
    let mut index = open_pos;

    while let Some(&b) = bytes.get(index) {
        if quoted {
            match b {
                b'\\' if bytes.get(index + 1) == Some(&b'"') => index += 1,
                b'"' => quoted = false,
                _ => {}
            }
        } else if b == b'"' {
            quoted = true;
        } else if b == open {
            depth += 1;
        } else if b == close {
            depth -= 1;
            if depth == 0 {
                return Some(index + 1);
            }
        }
        index += 1;
    }

    None
}

/// Split `raw` on top-level commas into cleaned parameters.
///
/// Always yields at least one element: an empty `raw` is one empty parameter.
pub fn split_params(raw: &str, open: u8, close: u8) -> Vec<String> {
    let bytes = raw.as_bytes();
    let mut params = Vec::with_capacity(PARAMS_INITIAL_CAPACITY);
    let mut depth = 0usize;
    let mut quoted = false;
    let mut segment_start = 0;
    let mut index = 0;

    while let Some(&b) = bytes.get(index) {
        if quoted {
            match b {
                b'\\' if bytes.get(index + 1) == Some(&b'"') => index += 1,
                b'"' => quoted = false,
                _ => {}
            }
        } else if b == b'"' {
            quoted = true;
        } else if b == open {
            depth += 1;
        } else if b == close {
            depth = depth.saturating_sub(1);
        } else if b == b',' && depth == 0 {
            params.push(clean_param(&raw[segment_start..index]));
            segment_start = index + 1;
        }
        index += 1;
    }
    params.push(clean_param(&raw[segment_start..]));

    params
}

/// Trim a parameter and strip one pair of surrounding quotes.
pub fn clean_param(segment: &str) -> String {
    let trimmed = segment.trim();
    match unquote(trimmed) {
        Some(inner) => inner,
        None => trimmed.to_owned(),
    }
}

/// Strip the quotes of a fully quoted string and unescape `\"`.
///
/// Returns `None` when `text` is not a single quoted string.
pub fn unquote(text: &str) -> Option<String> {
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    if inner.ends_with('\\') {
        return None;
    }
    let bytes = inner.as_bytes();
    let mut index = 0;

    // The closing quote must be the only unescaped quote.
    while let Some(&b) = bytes.get(index) {
        match b {
            b'\\' if bytes.get(index + 1) == Some(&b'"') => index += 2,
            b'"' => return None,
            _ => index += 1,
        }
    }

    Some(inner.replace("\\\"", "\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("[a,b].f", 0, Some(5))]
    #[case("[a,[b,c]]", 0, Some(9))]
    #[case("[\"]\"]x", 0, Some(5))]
    #[case("[\"\\\"]\"]", 0, Some(7))]
    #[case("[a,b", 0, None)]
    #[case("[\"a]", 0, None)]
    #[case("a[b]", 0, None)]
    fn test_find_balanced_end(
        #[case] source: &str,
        #[case] open_pos: usize,
        #[case] expected: Option<usize>,
    ) {
        assert_eq!(
            find_balanced_end(source.as_bytes(), open_pos, b'[', b']'),
            expected
        );
    }

    #[test]
    fn test_split_respects_quotes() {
        assert_eq!(split_params("0, \"a,b\"", b'(', b')'), vec!["0", "a,b"]);
    }

    #[test]
    fn test_split_keeps_leading_empty_segment() {
        assert_eq!(split_params(", a, b", b'(', b')'), vec!["", "a", "b"]);
    }

    #[test]
    fn test_split_empty_raw_is_one_empty_param() {
        assert_eq!(split_params("", b'(', b')'), vec![""]);
    }

    #[test]
    fn test_split_ignores_nested_commas() {
        assert_eq!(split_params("a,[b,c]", b'[', b']'), vec!["a", "[b,c]"]);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"a\\\"b\"").as_deref(), Some("a\"b"));
        assert_eq!(unquote("\"a\" \"b\""), None);
        assert_eq!(unquote("plain"), None);
        assert_eq!(unquote("\""), None);
    }
}
