//! Copy-on-write replacement of matched spans.
//!
//! Only the nodes on the path from the root to the edited slot are copied;
//! every other subtree is shared with the input tree by reference.

use crate::ast::{Field, Node, NodeRef, Slot, Step};
use crate::matcher::MatchSpan;
use crate::rewrite::errors::StructuralError;
use crate::rewrite::substitute::{check_name_slot, Replacement};

/// Replace the node(s) at `span` with `replacement`, returning a new root.
pub fn apply(
    root: &NodeRef,
    span: &MatchSpan,
    replacement: Replacement,
) -> Result<NodeRef, StructuralError> {
    match span {
        MatchSpan::Node { path } => {
            let Some((parent_path, last)) = path.split_last() else {
                return replacement.into_single(false);
            };
            let parent = parent_path
                .resolve(root)
                .ok_or(StructuralError::InvalidPath)?;
            let node = replacement.into_single(parent.kind().has_statement_slot(last.field))?;
            check_name_slot(parent, last.field, &node)?;
            rebuild(root, parent_path.steps(), last.field, |slot| {
                let child = slot
                    .child_mut(last.index)
                    .ok_or(StructuralError::InvalidPath)?;
                *child = node;
                Ok(())
            })
        }
        MatchSpan::Statements {
            parent,
            field,
            start,
            len,
        } => {
            let statements = replacement.into_statements();
            let (start, end) = (*start, start + len);
            rebuild(root, parent.steps(), *field, |slot| match slot {
                Slot::List(list) if end <= list.len() => {
                    let tail = list.split_off(end);
                    list.truncate(start);
                    list.extend(statements);
                    list.extend(tail);
                    Ok(())
                }
                _ => Err(StructuralError::InvalidPath),
            })
        }
    }
}

/// Copy `node` and every ancestor of the slot `field` reached by `steps`,
/// then run `edit` on that slot of the copy.
fn rebuild<F>(node: &Node, steps: &[Step], field: Field, edit: F) -> Result<NodeRef, StructuralError>
where
    F: FnOnce(&mut Slot) -> Result<(), StructuralError>,
{
    let mut copy = node.clone();
    match steps.split_first() {
        None => {
            let slot = copy.slot_mut(field).ok_or(StructuralError::InvalidPath)?;
            edit(slot)?;
        }
        Some((step, rest)) => {
            let child = copy
                .slot_mut(step.field)
                .and_then(|slot| slot.child_mut(step.index))
                .ok_or(StructuralError::InvalidPath)?;
            *child = rebuild(child, rest, field, edit)?;
        }
    }
    Ok(copy.into_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{NodeKind, Path};
    use crate::pool::parse;
    use crate::print::{PrintOptions, Printer};
    use std::sync::Arc;

    fn print(node: &NodeRef) -> String {
        Printer::new(PrintOptions::rewrite()).print(node)
    }

    fn call(name: &str) -> NodeRef {
        Node::new(NodeKind::CallExpression)
            .with(Field::Callee, Slot::Node(Node::identifier(name).into_ref()))
            .with(Field::Arguments, Slot::List(Vec::new()))
            .with(Field::Optional, Slot::flag(false))
            .into_ref()
    }

    #[test]
    fn swaps_a_single_node_and_shares_siblings() {
        let root = parse("a(); b(); c();").unwrap();
        let path = Path::root()
            .child(Field::Body, Some(1))
            .child(Field::Expression, None);
        let span = MatchSpan::Node { path };
        let new_root = apply(&root, &span, Replacement::Node(call("z"))).unwrap();

        assert_eq!(print(&new_root), "a();\nz();\nc();");
        assert_eq!(print(&root), "a();\nb();\nc();");
        let (old, new) = (root.list(Field::Body), new_root.list(Field::Body));
        assert!(Arc::ptr_eq(&old[0], &new[0]));
        assert!(Arc::ptr_eq(&old[2], &new[2]));
        assert!(!Arc::ptr_eq(&old[1], &new[1]));
    }

    #[test]
    fn splices_statement_runs_with_arity_change() {
        let root = parse("function t() { a(); b(); c(); }").unwrap();
        let block = Path::root()
            .child(Field::Body, Some(0))
            .child(Field::Body, None);
        let span = MatchSpan::Statements {
            parent: block,
            field: Field::Body,
            start: 1,
            len: 1,
        };
        let replacement = Replacement::Statements(vec![
            parse("x();").unwrap().list(Field::Body)[0].clone(),
            parse("y();").unwrap().list(Field::Body)[0].clone(),
        ]);
        let new_root = apply(&root, &span, replacement).unwrap();
        assert_eq!(
            print(&new_root),
            "function t() {\n    a();\n    x();\n    y();\n    c();\n}"
        );

        let collapse = MatchSpan::Statements {
            parent: Path::root(),
            field: Field::Body,
            start: 0,
            len: 1,
        };
        let emptied = apply(&root, &collapse, Replacement::Statements(Vec::new())).unwrap();
        assert!(emptied.list(Field::Body).is_empty());
    }

    #[test]
    fn expression_replacement_in_statement_list_is_wrapped() {
        let root = parse("a();").unwrap();
        let span = MatchSpan::Statements {
            parent: Path::root(),
            field: Field::Body,
            start: 0,
            len: 1,
        };
        let new_root = apply(&root, &span, Replacement::Node(call("b"))).unwrap();
        assert_eq!(
            new_root.list(Field::Body)[0].kind(),
            NodeKind::ExpressionStatement
        );
    }

    #[test]
    fn sequences_do_not_fit_expression_slots() {
        let root = parse("f(a);").unwrap();
        let path = Path::root()
            .child(Field::Body, Some(0))
            .child(Field::Expression, None);
        let two = Replacement::Statements(vec![
            parse("x();").unwrap().list(Field::Body)[0].clone(),
            parse("y();").unwrap().list(Field::Body)[0].clone(),
        ]);
        assert_eq!(
            apply(&root, &MatchSpan::Node { path }, two).unwrap_err(),
            StructuralError::ArityMismatch {
                expected: "one expression",
                found: 2
            }
        );
    }

    #[test]
    fn stale_paths_are_reported() {
        let root = parse("a();").unwrap();
        let path = Path::root().child(Field::Body, Some(5));
        assert_eq!(
            apply(&root, &MatchSpan::Node { path }, Replacement::Node(call("b"))).unwrap_err(),
            StructuralError::InvalidPath
        );
    }
}
