//! Whole-expression rewrites built on the parsers.

use log::debug;

use crate::parser::{
    FunctionMacroParser, LldMacroParser, MacroParser, TokenParser, UserMacroParser, char_len_at,
    match_end,
};

/// Replace `src_host` with `dst_host` in every function macro of `expression`.
///
/// `{localhost:agent.ping.nodata(5m)}` becomes
/// `{localhost6:agent.ping.nodata(5m)}`. Other macros are skipped whole and
/// all remaining text is copied as is.
///
/// # Examples
/// ```
/// use trigger_expression::replace_host;
///
/// assert_eq!(
///     replace_host("{a:k.last()}>{b:k.last()}", "a", "c"),
///     "{c:k.last()}>{b:k.last()}"
/// );
/// ```
#[must_use]
pub fn replace_host(expression: &str, src_host: &str, dst_host: &str) -> String {
    let function_macro_parser = FunctionMacroParser::new();
    let macro_parser = MacroParser::trigger_macros();
    let lld_macro_parser = LldMacroParser::new();
    let user_macro_parser = UserMacroParser::new();

    let mut replaced = String::with_capacity(expression.len());
    let mut copied_up_to = 0;
    let mut replacements = 0usize;
    let mut pos = 0;

    while pos < expression.len() {
        let function_macro = function_macro_parser.parse(expression, pos);
        if let Some(token) = function_macro.token() {
            if token.host == src_host {
                replaced.push_str(&expression[copied_up_to..pos]);
                replaced.push_str(&token.to_macro_string(Some(dst_host)));
                copied_up_to = function_macro.end();
                replacements += 1;
            }
            pos = function_macro.end();
            continue;
        }

        let skipped = match_end(&user_macro_parser, expression, pos)
            .or_else(|| match_end(&macro_parser, expression, pos))
            .or_else(|| match_end(&lld_macro_parser, expression, pos));
        pos = skipped.unwrap_or_else(|| pos + char_len_at(expression, pos));
    }
    replaced.push_str(&expression[copied_up_to..]);

    if replacements > 0 {
        debug!("replaced host {src_host:?} with {dst_host:?} in {replacements} function macro(s)");
    }

    replaced
}
