//! Construction-time errors.
//!
//! Parsing never fails with an error: a non-matching position is reported as
//! [`ParseCode::Fail`](crate::ParseCode::Fail). The errors here signal an
//! invalid parser or converter configuration.

use thiserror::Error;

/// Invalid configuration supplied to a parser or converter constructor.
///
/// # Examples
/// ```
/// use trigger_expression::{ConfigError, SetParser};
///
/// let err = SetParser::new(Vec::<String>::new()).unwrap_err();
/// assert_eq!(err, ConfigError::EmptyCandidateSet);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("candidate set must contain at least one entry")]
    EmptyCandidateSet,
    #[error("candidate #{index} is an empty string")]
    EmptyCandidate { index: usize },
    #[error("macro name {name:?} must be given without braces")]
    BracedMacroName { name: String },
    #[error("legacy operator {symbol:?} has an empty replacement")]
    EmptyReplacement { symbol: char },
    #[error("legacy operator {symbol:?} is declared more than once")]
    DuplicateOperator { symbol: char },
    #[error("replacement for legacy operator {symbol:?} contains a legacy operator")]
    SelfReferentialReplacement { symbol: char },
}
