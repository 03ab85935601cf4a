//! `{#NAME}` low-level discovery macros.

use nom::{
    IResult, Parser, bytes::complete::take_while1, character::complete::char,
    sequence::delimited,
};

use super::{TokenParser, remaining};
use crate::types::{LldMacroToken, ParseResult};
use crate::validation::is_macro_name_char;

/// Recognizes `{#NAME}` where NAME is made of `A-Z`, `0-9`, `.` and `_`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LldMacroParser;

impl LldMacroParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn lld_macro(input: &str) -> IResult<&str, &str> {
    delimited(
        (char('{'), char('#')),
        take_while1(is_macro_name_char),
        char('}'),
    )
    .parse(input)
}

impl TokenParser for LldMacroParser {
    type Token<'a> = LldMacroToken<'a>;

    fn parse<'a>(&self, source: &'a str, pos: usize) -> ParseResult<'a, LldMacroToken<'a>> {
        let Some(rest) = remaining(source, pos) else {
            return ParseResult::fail(pos);
        };

        match lld_macro(rest) {
            Ok((tail, name)) => {
                let end = source.len() - tail.len();
                ParseResult::success(source, pos, end, LldMacroToken { name })
            }
            Err(_) => ParseResult::fail(pos),
        }
    }
}
