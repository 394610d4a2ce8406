//! Rewriting: template instantiation and splicing.
//!
//! A rewrite pass finds every match of a rule's pattern, keeps the
//! non-overlapping ones in document order, and applies them from last to
//! first. Earlier matches never sit inside later ones, so their paths stay
//! valid while later ones are spliced.

pub mod errors;
pub mod splice;
pub mod substitute;

pub use errors::StructuralError;
pub use splice::apply;
pub use substitute::{instantiate, Replacement};

use crate::ast::NodeRef;
use crate::matcher::{select_disjoint, Matcher};
use crate::rule::Rule;
use tracing::debug;

/// Outcome of one rewrite pass.
#[derive(Debug, Clone)]
pub struct Rewritten {
    /// The new tree; the input root itself when nothing was applied
    pub tree: NodeRef,
    /// Matches found, overlapping ones included
    pub found: usize,
    /// Matches actually replaced
    pub applied: usize,
}

/// Apply `rule` to every non-overlapping match in `root`.
pub fn rewrite_tree(root: &NodeRef, rule: &Rule) -> Result<Rewritten, StructuralError> {
    let matches = Matcher::new(rule.pattern()).find_all(root);
    let found = matches.len();
    let selected = select_disjoint(matches);

    let mut tree = root.clone();
    for m in selected.iter().rev() {
        let replacement = instantiate(rule.template(), &m.bindings)?;
        tree = apply(&tree, &m.span, replacement)?;
    }

    debug!(found, applied = selected.len(), "rewrite pass");
    Ok(Rewritten {
        tree,
        found,
        applied: selected.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::parse;
    use crate::print::{PrintOptions, Printer};
    use std::sync::Arc;

    fn run(rule: &str, source: &str) -> (String, Rewritten) {
        let rule = Rule::compile(rule).unwrap();
        let root = parse(source).unwrap();
        let out = rewrite_tree(&root, &rule).unwrap();
        (Printer::new(PrintOptions::rewrite()).print(&out.tree), out)
    }

    #[test]
    fn applies_all_disjoint_matches() {
        let (text, out) = run("foo(a) -> bar(a)", "foo(1); foo(2); baz(foo(3));");
        assert_eq!(text, "bar(1);\nbar(2);\nbaz(bar(3));");
        assert_eq!(out.applied, 3);
    }

    #[test]
    fn nested_matches_apply_outermost_only() {
        let (text, out) = run("foo(a) -> bar(a)", "foo(foo(1));");
        assert_eq!(text, "bar(foo(1));");
        assert_eq!((out.found, out.applied), (2, 1));
    }

    #[test]
    fn later_statement_splices_do_not_disturb_earlier_matches() {
        let (text, _) = run(
            "var a = c, b = d; -> var a = c; var b = d;",
            "var p = 1, q = 2; go(); var r = 3, s = 4;",
        );
        assert_eq!(
            text,
            "var p = 1;\nvar q = 2;\ngo();\nvar r = 3;\nvar s = 4;"
        );
    }

    #[test]
    fn no_match_returns_the_input_root() {
        let rule = Rule::compile("nothing(a) -> here(a)").unwrap();
        let root = parse("foo(1);").unwrap();
        let out = rewrite_tree(&root, &rule).unwrap();
        assert_eq!(out.applied, 0);
        assert!(Arc::ptr_eq(&out.tree, &root));
    }

    #[test]
    fn wildcard_consistency_decides_matches() {
        let (text, out) = run("a + a -> a * 2", "x + x; x + y;");
        assert_eq!(text, "x * 2;\nx + y;");
        assert_eq!(out.applied, 1);
    }

    #[test]
    fn substituted_operands_keep_their_grouping() {
        let (text, _) = run("a * 2 -> a + a", "(x - 1) * 2;");
        assert_eq!(text, "x - 1 + (x - 1);");
    }

    #[test]
    fn passes_over_one_tree_do_not_interfere() {
        let root = parse("foo(1);\nvar p = 1, q = 2;").unwrap();
        let printer = Printer::new(PrintOptions::rewrite());
        let before = printer.print(&root);

        let rename = Rule::compile("foo(a) -> bar(a)").unwrap();
        let split = Rule::compile("var a = c, b = d; -> var a = c; var b = d;").unwrap();
        let first = rewrite_tree(&root, &rename).unwrap();
        let second = rewrite_tree(&root, &split).unwrap();

        assert_eq!(printer.print(&first.tree), "bar(1);\nvar p = 1, q = 2;");
        assert_eq!(printer.print(&second.tree), "foo(1);\nvar p = 1;\nvar q = 2;");
        assert_eq!(printer.print(&root), before);

        // Untouched statements stay shared with the input.
        let body = root.list(crate::ast::Field::Body);
        assert!(Arc::ptr_eq(&first.tree.list(crate::ast::Field::Body)[1], &body[1]));
        assert!(Arc::ptr_eq(&second.tree.list(crate::ast::Field::Body)[0], &body[0]));
    }
}
