//! `{$NAME}` and `{$NAME:context}` user macros.

use nom::{IResult, Parser, bytes::complete::{tag, take_while1}, sequence::preceded};

use super::{TokenParser, remaining};
use crate::tokenization::unquote;
use crate::types::{ParseResult, UserMacroToken};
use crate::validation::is_macro_name_char;

/// Recognizes user macros with an optional context.
///
/// The context follows a `:` and is either a double-quoted string, which may
/// contain `}` and `\"`, or plain text running to the first `}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserMacroParser;

impl UserMacroParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn user_macro_name(input: &str) -> IResult<&str, &str> {
    preceded(tag("{$"), take_while1(is_macro_name_char)).parse(input)
}

/// Length of the context text before the closing brace, quotes included.
fn context_len(context: &str) -> Option<usize> {
    let bytes = context.as_bytes();
    let first = bytes.iter().position(|&b| b != b' ');

    let Some(quote_at) = first.filter(|&at| bytes.get(at) == Some(&b'"')) else {
        return context.find('}');
    };

    let mut index = quote_at + 1;
    while let Some(&b) = bytes.get(index) {
        match b {
            b'\\' if bytes.get(index + 1) == Some(&b'"') => index += 2,
            b'"' => {
                // Only spaces may sit between the closing quote and brace.
                let tail = bytes.get(index + 1..)?;
                let close = tail.iter().position(|&b| b != b' ')?;
                return (tail.get(close) == Some(&b'}')).then_some(index + 1 + close);
            }
            _ => index += 1,
        }
    }

    None
}

impl TokenParser for UserMacroParser {
    type Token<'a> = UserMacroToken<'a>;

    fn parse<'a>(&self, source: &'a str, pos: usize) -> ParseResult<'a, UserMacroToken<'a>> {
        let Some(rest) = remaining(source, pos) else {
            return ParseResult::fail(pos);
        };
        let Ok((tail, name)) = user_macro_name(rest) else {
            return ParseResult::fail(pos);
        };

        let name_end = source.len() - tail.len();
        if tail.starts_with('}') {
            let token = UserMacroToken {
                name,
                context: None,
            };
            return ParseResult::success(source, pos, name_end + 1, token);
        }

        let Some(context) = tail.strip_prefix(':') else {
            return ParseResult::fail(pos);
        };
        let Some(len) = context_len(context) else {
            return ParseResult::fail(pos);
        };

        let raw = context[..len].trim_matches(' ');
        let context = unquote(raw).unwrap_or_else(|| raw.to_owned());
        let token = UserMacroToken {
            name,
            context: Some(context),
        };
        ParseResult::success(source, pos, name_end + 1 + len + 1, token)
    }
}
