//! Pattern matching over a source tree.
//!
//! The [`Matcher`] walks the tree in document (pre-order) order and tries
//! the pattern at every eligible position:
//!
//! - expression patterns at every node of the pattern root's kind, or at
//!   every expression when the root is itself a wildcard;
//! - statement patterns at every index of every statement list, checked
//!   before descending into the statement at that index. A one-statement
//!   pattern is also tried at single-statement slots such as `if` branches.

pub mod unify;

pub use unify::{Binding, Bindings, Unifier};

use crate::ast::{Field, Node, NodeKind, NodeRef, Path, Slot};
use crate::rule::{Fragment, Pattern};
use serde::Serialize;
use std::ops::Range;
use tracing::trace;

/// Where a match sits in the source tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MatchSpan {
    /// A single node
    Node { path: Path },
    /// `len` consecutive statements of the list `parent.field`, from `start`
    Statements {
        parent: Path,
        field: Field,
        start: usize,
        len: usize,
    },
}

impl MatchSpan {
    /// Paths of the top-level nodes covered by the span.
    pub fn roots(&self) -> Vec<Path> {
        match self {
            MatchSpan::Node { path } => vec![path.clone()],
            MatchSpan::Statements {
                parent,
                field,
                start,
                len,
            } => (*start..start + len)
                .map(|i| parent.child(*field, Some(i)))
                .collect(),
        }
    }

    /// Whether the two spans share any node.
    pub fn overlaps(&self, other: &MatchSpan) -> bool {
        let theirs = other.roots();
        self.roots()
            .iter()
            .any(|a| theirs.iter().any(|b| a.starts_with(b) || b.starts_with(a)))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    /// Captured wildcards
    pub bindings: Bindings,
    /// Location of the matched node(s), usable by the splicer as is
    pub span: MatchSpan,
    /// Byte range of the matched source text
    pub range: Range<usize>,
}

pub struct Matcher<'p> {
    pattern: &'p Pattern,
}

impl<'p> Matcher<'p> {
    pub fn new(pattern: &'p Pattern) -> Self {
        Self { pattern }
    }

    /// Every match in document order, overlapping ones included.
    pub fn find_all(&self, root: &NodeRef) -> Vec<MatchResult> {
        let mut out = Vec::new();
        let mut tried = 0usize;
        self.visit(root, &Path::root(), None, &mut out, &mut tried);
        trace!(candidates = tried, matches = out.len(), "pattern scan");
        out
    }

    fn visit(
        &self,
        node: &NodeRef,
        path: &Path,
        owner: Option<(&Node, Field)>,
        out: &mut Vec<MatchResult>,
        tried: &mut usize,
    ) {
        if self.eligible(node, owner) {
            *tried += 1;
            if let Some(bindings) = self.try_node(node) {
                out.push(MatchResult {
                    bindings,
                    span: MatchSpan::Node { path: path.clone() },
                    range: node.span().start..node.span().end,
                });
            }
        }

        for (field, slot) in node.slots() {
            match slot {
                Slot::Node(child) => {
                    let child_path = path.child(*field, None);
                    self.visit(child, &child_path, Some((node.as_ref(), *field)), out, tried);
                }
                Slot::List(items) => {
                    let statements = node.kind().has_statement_list(*field);
                    for (i, item) in items.iter().enumerate() {
                        if statements {
                            *tried += 1;
                            self.try_run(items, i, path, *field, out);
                        }
                        let child_path = path.child(*field, Some(i));
                        self.visit(item, &child_path, Some((node.as_ref(), *field)), out, tried);
                    }
                }
                Slot::Absent | Slot::Scalar(_) => {}
            }
        }
    }

    /// Whether a single-node attempt makes sense at `node`.
    fn eligible(&self, node: &Node, owner: Option<(&Node, Field)>) -> bool {
        match self.pattern.fragment() {
            Fragment::Expression(root) => {
                if owner.is_some_and(|(parent, field)| declares_name(parent, field)) {
                    return false;
                }
                if self.pattern.wildcards().value_name(root).is_some() {
                    node.kind().is_expression() && node.kind() != NodeKind::Raw
                } else {
                    node.kind() == root.kind()
                }
            }
            Fragment::Statements(stmts) => {
                stmts.len() == 1
                    && owner.is_some_and(|(parent, field)| {
                        parent.kind().has_statement_slot(field)
                            && !parent.kind().has_statement_list(field)
                    })
            }
        }
    }

    fn try_node(&self, node: &NodeRef) -> Option<Bindings> {
        let root = self.pattern.fragment().nodes().first()?;
        let mut unifier = Unifier::new(self.pattern.wildcards());
        let matched = unifier.node(root, node);
        matched.then(|| unifier.into_bindings())
    }

    fn try_run(
        &self,
        items: &[NodeRef],
        start: usize,
        parent: &Path,
        field: Field,
        out: &mut Vec<MatchResult>,
    ) {
        let Fragment::Statements(pattern) = self.pattern.fragment() else {
            return;
        };
        let Some(run) = items.get(start..start + pattern.len()) else {
            return;
        };
        let mut unifier = Unifier::new(self.pattern.wildcards());
        if !unifier.sequence(pattern, run) {
            return;
        }
        let (Some(first), Some(last)) = (run.first(), run.last()) else {
            return;
        };
        out.push(MatchResult {
            bindings: unifier.into_bindings(),
            span: MatchSpan::Statements {
                parent: parent.clone(),
                field,
                start,
                len: run.len(),
            },
            range: first.span().start..last.span().end,
        });
    }
}

/// Slots that introduce a name rather than refer to a value: declarator
/// ids, function names and parameters, catch parameters and labels.
fn declares_name(parent: &Node, field: Field) -> bool {
    matches!(
        (parent.kind(), field),
        (NodeKind::VariableDeclarator, Field::Id)
            | (
                NodeKind::FunctionDeclaration | NodeKind::FunctionExpression,
                Field::Id | Field::Params
            )
            | (NodeKind::ArrowFunctionExpression, Field::Params)
            | (NodeKind::CatchClause, Field::Param)
            | (
                NodeKind::LabeledStatement | NodeKind::BreakStatement | NodeKind::ContinueStatement,
                Field::Label
            )
    ) || (parent.kind() == NodeKind::Property
        && field == Field::Key
        && !parent.flag(Field::Computed))
}

/// Keep the first of any overlapping matches, in document order.
pub fn select_disjoint(matches: Vec<MatchResult>) -> Vec<MatchResult> {
    let mut selected: Vec<MatchResult> = Vec::new();
    for candidate in matches {
        if selected
            .iter()
            .all(|kept| !kept.span.overlaps(&candidate.span))
        {
            selected.push(candidate);
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::parse;

    fn find(pattern: &str, source: &str) -> Vec<MatchResult> {
        let pattern = Pattern::compile(pattern).unwrap();
        let root = parse(source).unwrap();
        Matcher::new(&pattern).find_all(&root)
    }

    #[test]
    fn finds_expressions_in_document_order() {
        let matches = find("foo(a)", "foo(1); bar(foo(2)); foo(3);");
        let args: Vec<_> = matches
            .iter()
            .map(|m| m.bindings.get("a").unwrap().source())
            .collect();
        assert_eq!(args, vec!["1", "2", "3"]);
    }

    #[test]
    fn nested_matches_are_reported_outer_first() {
        let matches = find("foo(a)", "foo(foo(1));");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].range, 0..11);
        assert_eq!(matches[1].range, 4..10);
        assert_eq!(select_disjoint(matches).len(), 1);
    }

    #[test]
    fn statement_runs_match_inside_blocks() {
        let source = "function t() { var x = 1; var y = 2; go(); }";
        let matches = find("var a = b; var c = d;", source);
        assert_eq!(matches.len(), 1);
        match &matches[0].span {
            MatchSpan::Statements {
                field, start, len, ..
            } => {
                assert_eq!(*field, Field::Body);
                assert_eq!((*start, *len), (0, 2));
            }
            other => panic!("unexpected span {other:?}"),
        }
        assert_eq!(&source[matches[0].range.clone()], "var x = 1; var y = 2;");
    }

    #[test]
    fn statement_pattern_matches_search_example() {
        let source = "var param1 = 1, done = function() {}; call(param1, done);";
        let matches = find("call(a, b);", source);
        assert_eq!(matches.len(), 1);
        let bindings = &matches[0].bindings;
        assert_eq!(bindings.get("a").unwrap().name(), Some("param1"));
        assert_eq!(bindings.get("b").unwrap().name(), Some("done"));
    }

    #[test]
    fn single_statement_pattern_matches_branch_bodies() {
        let matches = find("go(a);", "if (x) go(1); else { go(2); }");
        assert_eq!(matches.len(), 2);
        assert!(matches!(matches[0].span, MatchSpan::Node { .. }));
        assert!(matches!(matches[1].span, MatchSpan::Statements { .. }));
    }

    #[test]
    fn wildcard_root_skips_declared_names() {
        let matches = find("a", "var x = y;");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].bindings.get("a").unwrap().name(), Some("y"));
    }

    #[test]
    fn overlapping_statement_runs_keep_the_first() {
        let matches = find("a; b;", "one; two; three;");
        assert_eq!(matches.len(), 2);
        let kept = select_disjoint(matches);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].range, 0..9);
    }
}
