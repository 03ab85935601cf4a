//! Position-based scanners for trigger expressions and macro-bearing strings.
//!
//! This crate recognizes three kinds of tokens inside free-form text:
//! - Operator and keyword strings, with [`SetParser`]
//! - Curly-brace macros such as `{HOST.HOST}` or `{ITEM.VALUE2}`, with
//!   [`MacroParser`], plus `{#LLD}` and `{$USER}` macros
//! - Function macros such as `{host:item.key[params].function(args)}`, with
//!   [`FunctionMacroParser`]
//!
//! On top of them, [`TriggerExpressionConverter`] rewrites legacy operator
//! spellings and [`replace_host`] swaps hosts inside function macros.
//!
//! # Architecture
//!
//! Every parser is a probe: `parse(source, pos)` either matches at exactly
//! `pos` or fails. The caller owns the scan loop:
//! 1. **Probe**: call `parse` at the cursor
//! 2. **Advance**: on success skip the reported length, on failure one character
//! 3. **Splice**: use `start`/`length` to cut text around the match
//!
//! The implementation is organized into focused modules:
//! - `constants`: Default tables and capacity hints
//! - `types`: Parse results and token types
//! - `validation`: Character classes and configuration checks
//! - `tokenization`: Quote-aware bracket balancing and parameter splitting
//! - `parser`: The parsers and the [`TokenParser`] trait
//! - `converter`: Legacy operator rewriting
//! - `expression`: Host replacement
//!
//! # Known Limitations
//!
//! - **No diagnostics**: a malformed macro is reported as a plain failure, the
//!   same as text that never looked like a macro.
//! - **Surface only**: the parsers locate tokens; they do not evaluate the
//!   trigger calculation language or resolve macro values.
//! - **Greedy names**: the longest configured macro name wins even when a
//!   shorter one would have led to a closing brace.
//!
//! # Safety
//!
//! - `#![forbid(unsafe_code)]`: No unsafe code
//! - Offsets off a character boundary fail instead of panicking
//! - No global state: parsers are immutable and can be shared across threads
//! - Bracket and quote tracking is iterative, so nesting depth never grows
//!   the call stack

#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

// ============================================================================
// Module Organization
// ============================================================================

mod constants;
mod converter;
mod error;
mod expression;
mod parser;
mod tokenization;
mod types;
mod validation;

// ============================================================================
// Re-exports for Public API
// ============================================================================

pub use constants::DEFAULT_TRIGGER_MACROS;
pub use converter::{LegacyOperator, OperatorTable, Spacing, TriggerExpressionConverter};
pub use error::ConfigError;
pub use expression::replace_host;
pub use parser::{
    FunctionMacroParser, LldMacroParser, MacroParser, MacroParserOptions, Matches, SetParser,
    TokenParser, UserMacroParser,
};
pub use types::{
    FunctionMacroToken, LldMacroToken, MacroToken, ParseCode, ParseResult, UserMacroToken,
};
