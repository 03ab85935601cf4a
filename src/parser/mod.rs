//! Position-based token parsers.
//!
//! Every parser is an immutable value probed with `parse(source, pos)`. A probe
//! either matches at exactly `pos` or fails without side effects, so callers
//! drive their own scan loop: advance by the match length on success, by one
//! character on failure. [`Matches`] packages that loop.

mod function_macro;
mod lld_macro;
mod macros;
mod set;
mod user_macro;

pub use function_macro::FunctionMacroParser;
pub use lld_macro::LldMacroParser;
pub use macros::{MacroParser, MacroParserOptions};
pub use set::SetParser;
pub use user_macro::UserMacroParser;

use crate::types::ParseResult;

/// A parser that recognizes one kind of token at a given byte offset.
pub trait TokenParser {
    /// Decoded token produced by a successful probe.
    type Token<'a>;

    /// Probe `source` at byte offset `pos`.
    ///
    /// `pos == source.len()` and offsets off a character boundary always fail.
    fn parse<'a>(&self, source: &'a str, pos: usize) -> ParseResult<'a, Self::Token<'a>>;

    /// Iterate over all non-overlapping matches in `source`, left to right.
    fn find_iter<'p, 'a>(&'p self, source: &'a str) -> Matches<'p, 'a, Self>
    where
        Self: Sized,
    {
        Matches {
            parser: self,
            source,
            pos: 0,
        }
    }
}

/// Iterator over successive matches of a [`TokenParser`].
#[derive(Debug)]
pub struct Matches<'p, 'a, P> {
    parser: &'p P,
    source: &'a str,
    pos: usize,
}

impl<'a, P: TokenParser> Iterator for Matches<'_, 'a, P> {
    type Item = ParseResult<'a, P::Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.source.len() {
            let result = self.parser.parse(self.source, self.pos);
            if result.is_success() && result.length > 0 {
                self.pos = result.end();
                return Some(result);
            }
            self.pos += char_len_at(self.source, self.pos);
        }
        None
    }
}

/// Byte length of the character starting at `pos`, or 1 past the end.
#[inline]
pub(crate) fn char_len_at(source: &str, pos: usize) -> usize {
    source
        .get(pos..)
        .and_then(|rest| rest.chars().next())
        .map_or(1, char::len_utf8)
}

/// End offset of a successful probe of `parser` at `pos`.
#[inline]
pub(crate) fn match_end<P: TokenParser>(parser: &P, source: &str, pos: usize) -> Option<usize> {
    let result = parser.parse(source, pos);
    result.is_success().then(|| result.end())
}

/// Slice of `source` from `pos`, or `None` at the end or off a char boundary.
#[inline]
pub(crate) fn remaining(source: &str, pos: usize) -> Option<&str> {
    source.get(pos..).filter(|rest| !rest.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MacroParserOptions;

    #[test]
    fn test_find_iter_collects_every_macro() {
        let parser = MacroParser::new(["HOST.HOST", "HOST.IP"], MacroParserOptions::default())
            .unwrap();
        let found: Vec<_> = parser
            .find_iter("{HOST.IP} at {HOST.HOST}, {HOST.DNS}")
            .map(|m| (m.start, m.matched))
            .collect();
        assert_eq!(found, vec![(0, "{HOST.IP}"), (13, "{HOST.HOST}")]);
    }

    #[test]
    fn test_find_iter_steps_over_multibyte_text() {
        let parser = SetParser::new(["or"]).unwrap();
        let found: Vec<_> = parser.find_iter("é or ü").map(|m| m.start).collect();
        assert_eq!(found, vec![3]);
    }

    #[test]
    fn test_remaining_rejects_end_and_split_chars() {
        assert_eq!(remaining("ab", 2), None);
        assert_eq!(remaining("é", 1), None);
        assert_eq!(remaining("ab", 1), Some("b"));
    }
}
