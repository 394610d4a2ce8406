//! Thread-local parser pooling.
//!
//! Parsing a rule means parsing two fragments, and a rewrite parses the
//! source too, so every call reuses one parser per thread instead of
//! building a fresh one each time.

use crate::js::{JsParser, ParseError};
use std::cell::RefCell;

thread_local! {
    static JS_PARSER: RefCell<Option<JsParser>> = const { RefCell::new(None) };
}

/// Execute function with pooled parser instance.
///
/// On first call per thread, creates new parser. Subsequent calls reuse
/// the same parser instance.
///
/// # Example
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use jsreshape::pool::with_parser;
///
/// let program = with_parser(|parser| parser.parse("foo(1);"))??;
/// # Ok(())
/// # }
/// ```
pub fn with_parser<F, R>(f: F) -> Result<R, ParseError>
where
    F: FnOnce(&mut JsParser) -> R,
{
    JS_PARSER.with(|cell| {
        let mut slot = cell.borrow_mut();
        let parser = match slot.take() {
            Some(parser) => parser,
            None => JsParser::new()?,
        };
        let parser = slot.insert(parser);
        Ok(f(parser))
    })
}

/// Parse `source` with the pooled parser.
pub fn parse(source: &str) -> Result<crate::ast::NodeRef, ParseError> {
    with_parser(|parser| parser.parse(source))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reuses_parser_across_calls() {
        let first = parse("a;").unwrap();
        let second = parse("b; c;").unwrap();
        assert_eq!(first.list(crate::ast::Field::Body).len(), 1);
        assert_eq!(second.list(crate::ast::Field::Body).len(), 2);
    }

    #[test]
    fn parse_errors_pass_through() {
        assert!(matches!(parse("("), Err(ParseError::Syntax { .. })));
    }
}
