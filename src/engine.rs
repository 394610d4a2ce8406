//! Public operations.
//!
//! Every function here takes source text and returns text or data; trees
//! never escape unless asked for with [`parse`]. Rules and patterns go
//! through the thread-local [`crate::cache`], so calling [`rewrite`] in a
//! loop with the same rule compiles it once.

use crate::ast::NodeRef;
use crate::cache::{get_or_compile_pattern, get_or_compile_rule};
use crate::error::Result;
use crate::js::{validate_source, Diagnostic};
use crate::matcher::{MatchResult, Matcher};
use crate::pool;
use crate::print::{PrintOptions, Printer};
use crate::rewrite::rewrite_tree;
use crate::rule::Rule;
use tracing::debug;

/// Parse `source` into a tree.
pub fn parse(source: &str) -> Result<NodeRef> {
    Ok(pool::parse(source)?)
}

/// Every match of `pattern` in `source`, in document order.
///
/// Overlapping matches are all reported; a statement pattern matching at
/// index `i` comes before matches nested inside statement `i`.
pub fn search(source: &str, pattern: &str) -> Result<Vec<MatchResult>> {
    let pattern = get_or_compile_pattern(pattern)?;
    let root = parse(source)?;
    let matches = Matcher::new(&pattern).find_all(&root);
    debug!(matches = matches.len(), "search");
    Ok(matches)
}

/// Apply one rule to `source`.
///
/// When nothing matches the input is returned exactly as given, without
/// being reprinted.
pub fn rewrite(source: &str, rule: &str) -> Result<String> {
    let rule = get_or_compile_rule(rule)?;
    rewrite_with(source, &rule)
}

/// [`rewrite`] with an already compiled rule.
pub fn rewrite_with(source: &str, rule: &Rule) -> Result<String> {
    rewrite_tree_text(source, [rule])
}

/// Apply `rules` in order, each to the result of the previous one.
///
/// The source is parsed once and printed once; as with [`rewrite`], the
/// input comes back untouched when no rule applied anywhere.
pub fn rewrite_all<S: AsRef<str>>(source: &str, rules: &[S]) -> Result<String> {
    let compiled = rules
        .iter()
        .map(|rule| get_or_compile_rule(rule.as_ref()))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    rewrite_tree_text(source, compiled.iter().map(|rule| rule.as_ref()))
}

fn rewrite_tree_text<'r, I>(source: &str, rules: I) -> Result<String>
where
    I: IntoIterator<Item = &'r Rule>,
{
    let mut tree = parse(source)?;
    let (mut passes, mut applied) = (0, 0);
    for rule in rules {
        passes += 1;
        let pass = rewrite_tree(&tree, rule)?;
        applied += pass.applied;
        tree = pass.tree;
    }

    debug!(rules = passes, applied, "rewrite");
    if applied == 0 {
        return Ok(source.to_string());
    }
    Ok(Printer::new(PrintOptions::rewrite()).print(&tree))
}

/// Reprint `source` with `options`.
pub fn format(source: &str, options: &PrintOptions) -> Result<String> {
    let root = parse(source)?;
    Ok(Printer::new(options.clone()).print(&root))
}

/// Problems in `source`, syntax errors first. Never fails on bad input;
/// only a parser that cannot be created is an error.
pub fn validate(source: &str) -> Result<Vec<Diagnostic>> {
    let diagnostics = pool::with_parser(|parser| validate_source(parser, source))??;
    debug!(diagnostics = diagnostics.len(), "validate");
    Ok(diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::rule::CompileError;

    #[test]
    fn rewrite_renames_calls() {
        assert_eq!(
            rewrite("_.each(a, b);", "_.each(a, b) -> a.forEach(b)").unwrap(),
            "a.forEach(b);"
        );
    }

    #[test]
    fn no_match_is_verbatim() {
        let source = "foo( 1 ,2 )  // keep me\n";
        assert_eq!(rewrite(source, "bar(a) -> baz(a)").unwrap(), source);
    }

    #[test]
    fn rewrite_all_chains_rules() {
        let out = rewrite_all("foo(1);", &["foo(a) -> bar(a)", "bar(a) -> baz(a, a)"]).unwrap();
        assert_eq!(out, "baz(1, 1);");
    }

    #[test]
    fn bad_rules_surface_as_compile_errors() {
        assert!(matches!(
            rewrite("foo();", "foo()"),
            Err(Error::Compile(CompileError::MissingDelimiter))
        ));
    }

    #[test]
    fn search_reports_bindings() {
        let matches = search("go(1); go(2);", "go(a)").unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[1].bindings.get("a").unwrap().value().as_deref(), Some("2"));
    }

    #[test]
    fn validate_reports_instead_of_failing() {
        let diagnostics = validate("return 1;").unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].description, "Illegal return statement");
        assert!(validate("function f() { return 1; }").unwrap().is_empty());
    }

    #[test]
    fn format_uses_given_options() {
        let options = PrintOptions {
            quotes: crate::print::QuoteStyle::Double,
            ..PrintOptions::default()
        };
        assert_eq!(format("x = 'a';", &options).unwrap(), "x = \"a\";");
    }
}
