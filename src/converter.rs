//! Legacy operator rewriting for trigger expressions.
//!
//! Old expressions spell logical AND as `&`, logical OR as `|` and not-equal
//! as `#`. The converter rewrites those characters to `and`, `or` and `<>`
//! but leaves every macro span untouched, since the same characters are
//! legal inside function arguments, `{#LLD}` macros and user macro contexts.

use std::borrow::Cow;

use log::{debug, trace};

use crate::constants::{
    EDIT_GROWTH_HINT, EDITS_INITIAL_CAPACITY, LEGACY_AND, LEGACY_NOT_EQUAL, LEGACY_OR,
};
use crate::error::ConfigError;
use crate::parser::{
    FunctionMacroParser, LldMacroParser, MacroParser, MacroParserOptions, UserMacroParser,
    char_len_at, match_end,
};

/// How a replacement is spliced into the surrounding text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    /// Keyword operator: at most one whitespace character is dropped on each
    /// side and the replacement is padded with single spaces.
    Word,
    /// Symbol operator: replaced in place.
    Symbol,
}

/// One legacy operator character and its modern spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyOperator {
    pub symbol: char,
    pub replacement: String,
    pub spacing: Spacing,
}

impl LegacyOperator {
    #[must_use]
    pub fn new(symbol: char, replacement: impl Into<String>, spacing: Spacing) -> Self {
        Self {
            symbol,
            replacement: replacement.into(),
            spacing,
        }
    }
}

/// Lookup table from legacy operator characters to replacements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorTable {
    operators: Vec<LegacyOperator>,
}

impl OperatorTable {
    /// Build a table, rejecting empty replacements, repeated symbols and
    /// replacements that spell a symbol of the same table.
    pub fn new<I>(operators: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = LegacyOperator>,
    {
        let mut table: Vec<LegacyOperator> = Vec::new();
        for operator in operators {
            if operator.replacement.is_empty() {
                return Err(ConfigError::EmptyReplacement {
                    symbol: operator.symbol,
                });
            }
            if table.iter().any(|known| known.symbol == operator.symbol) {
                return Err(ConfigError::DuplicateOperator {
                    symbol: operator.symbol,
                });
            }
            table.push(operator);
        }

        // A second pass would rewrite such a replacement again.
        let table = Self { operators: table };
        if let Some(operator) = table.iter().find(|o| table.occurs_in(&o.replacement)) {
            return Err(ConfigError::SelfReferentialReplacement {
                symbol: operator.symbol,
            });
        }
        Ok(table)
    }

    #[must_use]
    pub fn get(&self, symbol: char) -> Option<&LegacyOperator> {
        self.operators.iter().find(|operator| operator.symbol == symbol)
    }

    /// Whether `text` holds any legacy operator character at all.
    #[must_use]
    pub fn occurs_in(&self, text: &str) -> bool {
        text.chars().any(|c| self.get(c).is_some())
    }

    pub fn iter(&self) -> impl Iterator<Item = &LegacyOperator> {
        self.operators.iter()
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self {
            operators: vec![
                LegacyOperator::new(LEGACY_AND, "and", Spacing::Word),
                LegacyOperator::new(LEGACY_OR, "or", Spacing::Word),
                LegacyOperator::new(LEGACY_NOT_EQUAL, "<>", Spacing::Symbol),
            ],
        }
    }
}

/// A replacement of `expression[start..end]`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Edit {
    start: usize,
    end: usize,
    text: String,
}

/// Rewrites legacy operators outside macro spans.
///
/// # Examples
/// ```
/// use trigger_expression::TriggerExpressionConverter;
///
/// let converter = TriggerExpressionConverter::new();
/// assert_eq!(
///     converter.convert("{h:k.str(\"a&b\")}=1&{h:k.last()}#0"),
///     "{h:k.str(\"a&b\")}=1 and {h:k.last()}<>0"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerExpressionConverter {
    function_macro_parser: FunctionMacroParser,
    macro_parser: MacroParser,
    lld_macro_parser: LldMacroParser,
    user_macro_parser: UserMacroParser,
    operators: OperatorTable,
}

impl Default for TriggerExpressionConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerExpressionConverter {
    /// Converter for the default trigger macros and operator table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            function_macro_parser: FunctionMacroParser::new(),
            macro_parser: MacroParser::trigger_macros(),
            lld_macro_parser: LldMacroParser::new(),
            user_macro_parser: UserMacroParser::new(),
            operators: OperatorTable::default(),
        }
    }

    /// Converter skipping the given macro names (references allowed) and
    /// rewriting with `operators`.
    pub fn with_config<I, S>(macro_names: I, operators: OperatorTable) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = MacroParserOptions {
            allow_reference: true,
        };
        Ok(Self {
            macro_parser: MacroParser::new(macro_names, options)?,
            operators,
            ..Self::new()
        })
    }

    #[must_use]
    pub fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    /// Rewrite every legacy operator found outside a macro span.
    ///
    /// Returns the input unchanged (borrowed) when nothing needs rewriting,
    /// so converting an already converted expression is a no-op.
    #[must_use]
    pub fn convert<'a>(&self, expression: &'a str) -> Cow<'a, str> {
        if !self.operators.occurs_in(expression) {
            return Cow::Borrowed(expression);
        }

        let edits = self.collect_edits(expression);
        if edits.is_empty() {
            return Cow::Borrowed(expression);
        }
        debug!(
            "rewriting {} legacy operator(s) in trigger expression",
            edits.len()
        );

        let mut converted =
            String::with_capacity(expression.len() + edits.len() * EDIT_GROWTH_HINT);
        converted.push_str(expression);
        // Back to front, so pending offsets stay valid.
        for edit in edits.iter().rev() {
            converted.replace_range(edit.start..edit.end, &edit.text);
        }

        Cow::Owned(converted)
    }

    /// End of the macro span starting at `pos`, if any.
    fn macro_span_end(&self, expression: &str, pos: usize) -> Option<usize> {
        if expression.as_bytes().get(pos) != Some(&b'{') {
            return None;
        }
        match_end(&self.function_macro_parser, expression, pos)
            .or_else(|| match_end(&self.macro_parser, expression, pos))
            .or_else(|| match_end(&self.lld_macro_parser, expression, pos))
            .or_else(|| match_end(&self.user_macro_parser, expression, pos))
    }

    /// Scan left to right and record non-overlapping edits in ascending order.
    fn collect_edits(&self, expression: &str) -> Vec<Edit> {
        let bytes = expression.as_bytes();
        let mut edits = Vec::with_capacity(EDITS_INITIAL_CAPACITY);
        let mut last_edit_end = 0;
        let mut pos = 0;

        while pos < expression.len() {
            if let Some(end) = self.macro_span_end(expression, pos) {
                pos = end;
                continue;
            }

            let operator = expression
                .get(pos..)
                .and_then(|rest| rest.chars().next())
                .and_then(|c| self.operators.get(c));

            let Some(operator) = operator else {
                pos += char_len_at(expression, pos);
                continue;
            };

            let mut start = pos;
            let mut end = pos + operator.symbol.len_utf8();
            let text = match operator.spacing {
                Spacing::Word => {
                    if start > last_edit_end && is_space_at(bytes, start - 1) {
                        start -= 1;
                    }
                    if is_space_at(bytes, end) {
                        end += 1;
                    }
                    format!(" {} ", operator.replacement)
                }
                Spacing::Symbol => operator.replacement.clone(),
            };

            trace!(
                "legacy operator {:?} at byte {pos} becomes {text:?}",
                operator.symbol
            );
            edits.push(Edit { start, end, text });
            last_edit_end = end;
            pos = end;
        }

        edits
    }
}

#[inline]
fn is_space_at(bytes: &[u8], index: usize) -> bool {
    bytes.get(index).is_some_and(u8::is_ascii_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a&b", "a and b")]
    #[case("a & b", "a and b")]
    #[case("a  &  b", "a  and  b")]
    #[case("a|b", "a or b")]
    #[case("a#b", "a<>b")]
    #[case("a # b", "a <> b")]
    #[case("(a)&(b)|c", "(a) and (b) or c")]
    #[case("a& &b", "a and  and b")]
    #[case("a&&b", "a and  and b")]
    #[case("&a", " and a")]
    #[case("a\t&\nb", "a and b")]
    fn test_rewrites_bare_operators(#[case] expression: &str, #[case] expected: &str) {
        let converter = TriggerExpressionConverter::new();
        assert_eq!(converter.convert(expression), expected);
    }

    #[rstest]
    #[case("{h:k.str(\"a&b|c#d\")}=1")]
    #[case("{h:k[a#b].last(#3)}=0")]
    #[case("{h#1:k.last()}=0")]
    #[case("{#IFNAME}=1")]
    #[case("{$MACRO:\"a|b\"}=1")]
    #[case("{TRIGGER.VALUE}=1")]
    #[case("a and b")]
    #[case("")]
    fn test_leaves_expressions_without_bare_operators(#[case] expression: &str) {
        let converter = TriggerExpressionConverter::new();
        assert!(matches!(converter.convert(expression), Cow::Borrowed(_)));
    }

    #[test]
    fn test_rewrites_around_macros_only() {
        let converter = TriggerExpressionConverter::new();
        assert_eq!(
            converter.convert("{h:k.count(#5,\"a|b\")}>1|{#A}#{$B:\"&\"}&{TRIGGER.VALUE2}=1"),
            "{h:k.count(#5,\"a|b\")}>1 or {#A}<>{$B:\"&\"} and {TRIGGER.VALUE2}=1"
        );
    }

    #[test]
    fn test_malformed_macro_text_is_ordinary_text() {
        let converter = TriggerExpressionConverter::new();
        assert_eq!(converter.convert("{h:k.last(}&1"), "{h:k.last(} and 1");
        // Lowercase names are not LLD macros, so their `#` is rewritten too.
        assert_eq!(converter.convert("{#a}#1"), "{<>a}<>1");
    }

    #[rstest]
    #[case("a&b|c#d")]
    #[case("{h:k.str(\"&\")}&{h:k.str(\"|\")}")]
    #[case("{$M:\"#\"} # {#M}")]
    #[case("&&||##")]
    #[case("{h:k.last(}&{")]
    fn test_conversion_is_idempotent(#[case] expression: &str) {
        let converter = TriggerExpressionConverter::new();
        let once = converter.convert(expression).into_owned();
        assert_eq!(converter.convert(&once), once);
    }

    #[test]
    fn test_custom_table_and_macros() {
        let operators =
            OperatorTable::new([LegacyOperator::new('~', "not", Spacing::Word)]).unwrap();
        let converter =
            TriggerExpressionConverter::with_config(["ITEM.VALUE"], operators).unwrap();
        assert_eq!(converter.convert("~{ITEM.VALUE1}"), " not {ITEM.VALUE1}");
        assert_eq!(converter.convert("{ITEM.~}"), "{ITEM. not }");
        assert_eq!(converter.convert("a&b"), "a&b");
    }

    #[test]
    fn test_rewrites_multibyte_operator() {
        let operators =
            OperatorTable::new([LegacyOperator::new('≠', "<>", Spacing::Symbol)]).unwrap();
        let converter = TriggerExpressionConverter::with_config(["X"], operators).unwrap();
        assert_eq!(converter.convert("é≠ü"), "é<>ü");
    }

    #[test]
    fn test_rejects_invalid_operator_tables() {
        assert_eq!(
            OperatorTable::new([LegacyOperator::new('&', "", Spacing::Word)]),
            Err(ConfigError::EmptyReplacement { symbol: '&' })
        );
        assert_eq!(
            OperatorTable::new([
                LegacyOperator::new('&', "and", Spacing::Word),
                LegacyOperator::new('&', "&&", Spacing::Symbol),
            ]),
            Err(ConfigError::DuplicateOperator { symbol: '&' })
        );
        assert_eq!(
            OperatorTable::new([LegacyOperator::new('&', "&&", Spacing::Symbol)]),
            Err(ConfigError::SelfReferentialReplacement { symbol: '&' })
        );
        assert_eq!(
            OperatorTable::new([
                LegacyOperator::new('|', "or", Spacing::Word),
                LegacyOperator::new('!', "|not", Spacing::Word),
            ]),
            Err(ConfigError::SelfReferentialReplacement { symbol: '!' })
        );
        assert_eq!(
            TriggerExpressionConverter::with_config(Vec::<String>::new(), OperatorTable::default()),
            Err(ConfigError::EmptyCandidateSet)
        );
    }

    #[test]
    fn test_default_table_matches_legacy_spelling() {
        let symbols: Vec<_> = OperatorTable::default().iter().map(|o| o.symbol).collect();
        assert_eq!(symbols, ['&', '|', '#']);
    }
}
