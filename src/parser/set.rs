//! Longest-match scanner over a fixed set of strings.

use super::{TokenParser, remaining};
use crate::error::ConfigError;
use crate::types::ParseResult;
use crate::validation::dedup_candidates;

/// Matches the longest candidate that starts at the probed position.
///
/// Matching is exact and case-sensitive. The token of a successful parse is
/// the index of the winning candidate in [`SetParser::candidates`].
///
/// # Examples
/// ```
/// use trigger_expression::{SetParser, TokenParser};
///
/// let parser = SetParser::new(["A", "AB"]).unwrap();
/// assert_eq!(parser.parse("ABC", 0).matched, "AB");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetParser {
    candidates: Vec<String>,
}

impl SetParser {
    /// Build a parser from candidate strings.
    ///
    /// Repeated candidates are dropped (the first one keeps its place). An
    /// empty set or an empty candidate is a configuration error.
    pub fn new<I, S>(candidates: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let candidates = dedup_candidates(candidates.into_iter().map(Into::into).collect())?;
        Ok(Self { candidates })
    }

    /// Build from a built-in table known to hold distinct, non-empty entries.
    pub(crate) fn from_static(candidates: &[&str]) -> Self {
        Self {
            candidates: candidates.iter().map(|&c| c.to_owned()).collect(),
        }
    }

    /// Candidates in declaration order, without duplicates.
    #[must_use]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }
}

impl TokenParser for SetParser {
    type Token<'a> = usize;

    fn parse<'a>(&self, source: &'a str, pos: usize) -> ParseResult<'a, usize> {
        let Some(rest) = remaining(source, pos) else {
            return ParseResult::fail(pos);
        };

        // Strictly longer wins, so the first declared candidate keeps a tie.
        let mut best: Option<(usize, usize)> = None;
        for (index, candidate) in self.candidates.iter().enumerate() {
            if rest.starts_with(candidate.as_str())
                && best.is_none_or(|(_, len)| candidate.len() > len)
            {
                best = Some((index, candidate.len()));
            }
        }

        match best {
            Some((index, len)) => ParseResult::success(source, pos, pos + len, index),
            None => ParseResult::fail(pos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParseCode;
    use rstest::rstest;

    fn operators() -> SetParser {
        SetParser::new(["<", "<=", "<>", "=", "and", "or"]).unwrap()
    }

    #[rstest]
    #[case("<=1", 0, "<=")]
    #[case("<>1", 0, "<>")]
    #[case("<1", 0, "<")]
    #[case("a and b", 2, "and")]
    #[case("x=or", 2, "or")]
    fn test_longest_match(#[case] source: &str, #[case] pos: usize, #[case] expected: &str) {
        let result = operators().parse(source, pos);
        assert!(result.is_success());
        assert_eq!(result.matched, expected);
        assert_eq!(result.length, expected.len());
        assert_eq!(result.start, pos);
    }

    #[test]
    fn test_longest_wins_regardless_of_order() {
        let parser = SetParser::new(["AB", "A"]).unwrap();
        let result = parser.parse("ABC", 0);
        assert_eq!(result.matched, "AB");
        assert_eq!(result.token(), Some(&0));
        assert_eq!(result.code, ParseCode::SuccessContinue);
    }

    #[test]
    fn test_success_at_end_of_source() {
        let result = operators().parse("a<>", 1);
        assert_eq!(result.code, ParseCode::Success);
    }

    #[rstest]
    #[case("", 0)]
    #[case("and", 3)]
    #[case("AND", 0)]
    #[case("an", 0)]
    #[case("x", 9)]
    fn test_no_match(#[case] source: &str, #[case] pos: usize) {
        let result = operators().parse(source, pos);
        assert_eq!(result.code, ParseCode::Fail);
        assert_eq!(result.matched, "");
        assert_eq!(result.length, 0);
    }

    #[test]
    fn test_duplicates_are_removed() {
        let parser = SetParser::new(["or", "and", "or"]).unwrap();
        assert_eq!(parser.candidates(), ["or", "and"]);
    }

    #[test]
    fn test_empty_configuration_rejected() {
        assert_eq!(
            SetParser::new(Vec::<&str>::new()),
            Err(ConfigError::EmptyCandidateSet)
        );
        assert_eq!(
            SetParser::new(["and", ""]),
            Err(ConfigError::EmptyCandidate { index: 1 })
        );
    }
}
