//! Default tables and capacity constants for the parsers and the converter.
//!
//! This module centralizes the built-in configuration so every parser and the
//! converter agree on the same defaults.

// ============================================================================
// Default Tables
// ============================================================================

/// Macro names skipped by the converter and by host replacement when no
/// custom macro list is supplied. Names are given without braces.
pub const DEFAULT_TRIGGER_MACROS: &[&str] = &["TRIGGER.VALUE"];

/// Legacy spelling of logical AND.
pub const LEGACY_AND: char = '&';

/// Legacy spelling of logical OR.
pub const LEGACY_OR: char = '|';

/// Legacy spelling of not-equal.
pub const LEGACY_NOT_EQUAL: char = '#';

// ============================================================================
// Memory Pre-Allocation Hints
// ============================================================================

/// Initial capacity hint for the converter's edit list.
///
/// Expressions rarely carry more than a handful of legacy operators.
pub const EDITS_INITIAL_CAPACITY: usize = 4;

/// Initial capacity hint for a split parameter list.
///
/// Most trigger functions take one to three arguments.
pub const PARAMS_INITIAL_CAPACITY: usize = 4;

/// Extra bytes reserved per edit when building converted output.
///
/// Covers the growth of `&` into ` and `.
pub const EDIT_GROWTH_HINT: usize = 4;
