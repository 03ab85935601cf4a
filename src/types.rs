//! Core result and token types shared by all parsers.
//!
//! Every value here is transient: it is produced by a single `parse` call and
//! borrows from the scanned source where it can.

/// Outcome of a single `parse(source, pos)` probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseCode {
    /// The source does not match at the probed position.
    Fail,
    /// Matched, and the match runs to the end of the source.
    Success,
    /// Matched, and more source follows the match.
    SuccessContinue,
}

/// Result of probing a parser at one position.
///
/// `length == matched.len()` always holds, and a failed result has an empty
/// `matched` slice and no token. Offsets are in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult<'a, T> {
    pub code: ParseCode,
    pub matched: &'a str,
    pub length: usize,
    pub start: usize,
    token: Option<T>,
}

impl<'a, T> ParseResult<'a, T> {
    /// A failed probe at `start`.
    #[must_use]
    pub fn fail(start: usize) -> Self {
        Self {
            code: ParseCode::Fail,
            matched: "",
            length: 0,
            start,
            token: None,
        }
    }

    /// A successful probe covering `source[start..end]`.
    ///
    /// Picks [`ParseCode::SuccessContinue`] when `end` is short of the source
    /// end. Falls back to a failure if the range is not a valid slice.
    #[must_use]
    pub fn success(source: &'a str, start: usize, end: usize, token: T) -> Self {
        let Some(matched) = source.get(start..end) else {
            return Self::fail(start);
        };
        let code = if end < source.len() {
            ParseCode::SuccessContinue
        } else {
            ParseCode::Success
        };
        Self {
            code,
            matched,
            length: matched.len(),
            start,
            token: Some(token),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code != ParseCode::Fail
    }

    /// Offset of the first byte after the match.
    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    #[inline]
    #[must_use]
    pub fn token(&self) -> Option<&T> {
        self.token.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn into_token(self) -> Option<T> {
        self.token
    }
}

/// A recognized `{NAME}` or `{NAMEn}` macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacroToken<'a> {
    /// Macro name without braces, e.g. `HOST.HOST`.
    pub name: &'a str,
    /// Reference digit `1..=9`, or `0` when none was given.
    pub reference: u8,
}

/// A decomposed `{host:item_key.function_name(function_param_raw)}` macro.
///
/// The borrowed fields are slices of the source, so
/// `{host:item_key.function_name(function_param_raw)}` rebuilds the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionMacroToken<'a> {
    pub host: &'a str,
    pub item_key: &'a str,
    pub function_name: &'a str,
    pub function_param_raw: &'a str,
    /// Top-level arguments, trimmed, with surrounding quotes removed.
    pub function_param_list: Vec<String>,
}

impl FunctionMacroToken<'_> {
    /// Rebuild the macro text, optionally with a different host.
    #[must_use]
    pub fn to_macro_string(&self, host: Option<&str>) -> String {
        format!(
            "{{{}:{}.{}({})}}",
            host.unwrap_or(self.host),
            self.item_key,
            self.function_name,
            self.function_param_raw
        )
    }
}

/// A recognized `{#NAME}` low-level discovery macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LldMacroToken<'a> {
    /// Name without the `{#` prefix and `}` suffix.
    pub name: &'a str,
}

/// A recognized `{$NAME}` or `{$NAME:context}` user macro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMacroToken<'a> {
    pub name: &'a str,
    /// Context with surrounding quotes removed and `\"` unescaped.
    pub context: Option<String>,
}
