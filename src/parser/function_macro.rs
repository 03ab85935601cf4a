//! `{host:item_key.function(args)}` function macros.
//!
//! The grammar, left to right:
//!
//! ```text
//! FunctionMacro := '{' Host ':' ItemKey '.' FunctionName '(' RawArgs ')' '}'
//! ItemKey       := KeyChars [ '[' ArgList ']' ]
//! ```
//!
//! `ArgList` and `RawArgs` are balanced regions where double-quoted strings
//! hide brackets and commas. Without `[...]` parameters the item key and the
//! function name are separated by the last `.` before `(`, so
//! `agent.ping.nodata(5m)` splits into `agent.ping` and `nodata`.

use nom::{IResult, Parser, bytes::complete::take_while1};

use super::{TokenParser, remaining};
use crate::tokenization::{find_balanced_end, split_params};
use crate::types::{FunctionMacroToken, ParseResult};
use crate::validation::{
    is_function_name_char, is_host_char, is_item_key_char, is_valid_function_name,
};

/// Recognizes a whole function macro and decomposes it.
///
/// # Examples
/// ```
/// use trigger_expression::{FunctionMacroParser, TokenParser};
///
/// let result = FunctionMacroParser::new().parse("{host:vfs.fs.size[/,free].last(0)}", 0);
/// let token = result.token().unwrap();
/// assert_eq!(token.host, "host");
/// assert_eq!(token.item_key, "vfs.fs.size[/,free]");
/// assert_eq!(token.function_name, "last");
/// assert_eq!(token.function_param_list, ["0"]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FunctionMacroParser;

impl FunctionMacroParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn host(input: &str) -> IResult<&str, &str> {
    take_while1(is_host_char).parse(input)
}

fn key_chars(input: &str) -> IResult<&str, &str> {
    take_while1(is_item_key_char).parse(input)
}

fn function_name(input: &str) -> IResult<&str, &str> {
    take_while1(is_function_name_char).parse(input)
}

/// Byte offset of `tail` inside `source`, `tail` being a suffix of it.
#[inline]
fn offset_of(source: &str, tail: &str) -> usize {
    source.len() - tail.len()
}

/// Item key and function name with the offset of the opening `(`.
fn item_key_and_function(source: &str, key_start: usize) -> Option<(&str, &str, usize)> {
    let rest = source.get(key_start..)?;
    let (tail, key) = key_chars(rest).ok()?;
    let key_end = offset_of(source, tail);

    match tail.as_bytes().first()? {
        b'[' => {
            let params_end = find_balanced_end(source.as_bytes(), key_end, b'[', b']')?;
            let item_key = source.get(key_start..params_end)?;
            let after_dot = source.get(params_end..)?.strip_prefix('.')?;
            let (tail, name) = function_name(after_dot).ok()?;
            Some((item_key, name, offset_of(source, tail)))
        }
        b'(' => {
            let dot = key.rfind('.')?;
            let (item_key, name) = (&key[..dot], &key[dot + 1..]);
            if item_key.is_empty() || !is_valid_function_name(name) {
                return None;
            }
            Some((item_key, name, key_end))
        }
        _ => None,
    }
}

impl TokenParser for FunctionMacroParser {
    type Token<'a> = FunctionMacroToken<'a>;

    fn parse<'a>(&self, source: &'a str, pos: usize) -> ParseResult<'a, FunctionMacroToken<'a>> {
        match remaining(source, pos) {
            Some(rest) if rest.starts_with('{') => {}
            _ => return ParseResult::fail(pos),
        }

        match decompose(source, pos + 1) {
            Some((end, token)) => ParseResult::success(source, pos, end, token),
            None => ParseResult::fail(pos),
        }
    }
}

/// Parse everything after the opening brace; returns the match end and token.
fn decompose(source: &str, host_start: usize) -> Option<(usize, FunctionMacroToken<'_>)> {
    let (tail, host) = host(source.get(host_start..)?).ok()?;
    let key_start = offset_of(source, tail.strip_prefix(':')?);

    let (item_key, function_name, args_open) = item_key_and_function(source, key_start)?;
    let args_end = find_balanced_end(source.as_bytes(), args_open, b'(', b')')?;
    if source.as_bytes().get(args_end) != Some(&b'}') {
        return None;
    }

    let function_param_raw = source.get(args_open + 1..args_end - 1)?;
    let token = FunctionMacroToken {
        host,
        item_key,
        function_name,
        function_param_raw,
        function_param_list: split_params(function_param_raw, b'(', b')'),
    };
    Some((args_end + 1, token))
}
