//! `{NAME}` macros drawn from a fixed list of names.

use super::{SetParser, TokenParser, remaining};
use crate::constants::DEFAULT_TRIGGER_MACROS;
use crate::error::ConfigError;
use crate::types::{MacroToken, ParseResult};
use crate::validation::check_macro_names;

/// Construction options for [`MacroParser`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MacroParserOptions {
    /// Accept a reference digit `1..=9` before the closing brace, as in
    /// `{ITEM.VALUE2}`.
    pub allow_reference: bool,
}

/// Recognizes one macro such as `{HOST.HOST}` or, with references enabled,
/// `{HOST.HOST2}`.
///
/// The name is matched with longest-match discipline. Any deviation from
/// `'{' name [digit] '}'` fails the whole probe.
///
/// # Examples
/// ```
/// use trigger_expression::{MacroParser, MacroParserOptions, TokenParser};
///
/// let options = MacroParserOptions { allow_reference: true };
/// let parser = MacroParser::new(["HOST.HOST", "HOST.IP"], options).unwrap();
/// let result = parser.parse("{HOST.HOST2}", 0);
/// let token = result.token().unwrap();
/// assert_eq!((token.name, token.reference), ("HOST.HOST", 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroParser {
    names: SetParser,
    options: MacroParserOptions,
}

impl MacroParser {
    /// Build a parser for macro names given without braces.
    pub fn new<I, S>(names: I, options: MacroParserOptions) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = SetParser::new(names)?;
        check_macro_names(names.candidates())?;
        Ok(Self { names, options })
    }

    /// Parser for [`DEFAULT_TRIGGER_MACROS`] with references allowed.
    #[must_use]
    pub fn trigger_macros() -> Self {
        Self {
            names: SetParser::from_static(DEFAULT_TRIGGER_MACROS),
            options: MacroParserOptions {
                allow_reference: true,
            },
        }
    }

    #[must_use]
    pub fn options(&self) -> MacroParserOptions {
        self.options
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        self.names.candidates()
    }
}

impl TokenParser for MacroParser {
    type Token<'a> = MacroToken<'a>;

    fn parse<'a>(&self, source: &'a str, pos: usize) -> ParseResult<'a, MacroToken<'a>> {
        match remaining(source, pos) {
            Some(rest) if rest.starts_with('{') => {}
            _ => return ParseResult::fail(pos),
        }

        let name = self.names.parse(source, pos + 1);
        if !name.is_success() {
            return ParseResult::fail(pos);
        }

        let bytes = source.as_bytes();
        let mut end = name.end();
        let mut reference = 0;

        if self.options.allow_reference {
            if let Some(digit) = bytes.get(end).copied().filter(u8::is_ascii_digit) {
                // `0` is never a reference and is left for the brace check.
                if digit != b'0' {
                    reference = digit - b'0';
                    end += 1;
                }
            }
        }

        if bytes.get(end) != Some(&b'}') {
            return ParseResult::fail(pos);
        }

        let token = MacroToken {
            name: name.matched,
            reference,
        };
        ParseResult::success(source, pos, end + 1, token)
    }
}
