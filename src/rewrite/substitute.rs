//! Template instantiation.

use crate::ast::{Field, Node, NodeKind, NodeRef, Slot};
use crate::matcher::{Binding, Bindings};
use crate::rewrite::errors::StructuralError;
use crate::rule::{is_literal_callee, Fragment};

/// An instantiated template.
#[derive(Debug, Clone)]
pub enum Replacement {
    Node(NodeRef),
    Statements(Vec<NodeRef>),
}

impl Replacement {
    /// Fit into a single-node slot. An expression becomes an expression
    /// statement in a statement slot; a single expression statement gives
    /// up its expression in an expression slot.
    pub fn into_single(self, statement_slot: bool) -> Result<NodeRef, StructuralError> {
        match self {
            Replacement::Node(node) if statement_slot => Ok(as_statement(node)),
            Replacement::Node(node) => Ok(node),
            Replacement::Statements(mut stmts) if statement_slot => match stmts.len() {
                1 => Ok(stmts.remove(0)),
                found => Err(StructuralError::ArityMismatch {
                    expected: "one statement",
                    found,
                }),
            },
            Replacement::Statements(stmts) => match stmts.as_slice() {
                [only] if only.kind() == NodeKind::ExpressionStatement => only
                    .child(Field::Expression)
                    .cloned()
                    .ok_or(StructuralError::ArityMismatch {
                        expected: "one expression",
                        found: 1,
                    }),
                _ => Err(StructuralError::ArityMismatch {
                    expected: "one expression",
                    found: stmts.len(),
                }),
            },
        }
    }

    /// Fit into a statement list.
    pub fn into_statements(self) -> Vec<NodeRef> {
        match self {
            Replacement::Node(node) => vec![as_statement(node)],
            Replacement::Statements(stmts) => stmts,
        }
    }
}

fn as_statement(node: NodeRef) -> NodeRef {
    if node.kind().is_statement() && node.kind() != NodeKind::Raw {
        return node;
    }
    Node::new(NodeKind::ExpressionStatement)
        .with_span(node.span())
        .with(Field::Expression, Slot::Node(node))
        .into_ref()
}

enum Expansion {
    One(NodeRef),
    Many { name: String, nodes: Vec<NodeRef> },
}

/// Instantiate `template` with the captured `bindings`.
///
/// Value wildcards become the captured node itself (shared, not copied).
/// Rest wildcards, written either `...x` or `x`, expand in place inside
/// list slots and change the list's length.
pub fn instantiate(template: &Fragment, bindings: &Bindings) -> Result<Replacement, StructuralError> {
    match template {
        Fragment::Expression(root) => match expand(root, bindings)? {
            Expansion::One(node) => Ok(Replacement::Node(node)),
            Expansion::Many { name, .. } => Err(StructuralError::RestOutsideList { name }),
        },
        Fragment::Statements(stmts) => list(stmts, bindings).map(Replacement::Statements),
    }
}

fn expand(node: &NodeRef, bindings: &Bindings) -> Result<Expansion, StructuralError> {
    if let Some((name, binding)) = bound(node, bindings) {
        return Ok(match binding {
            Binding::Node(captured) => Expansion::One(captured.clone()),
            Binding::Rest(nodes) => Expansion::Many {
                name: name.to_string(),
                nodes: nodes.clone(),
            },
        });
    }
    if matches!(node.kind(), NodeKind::SpreadElement | NodeKind::RestElement) {
        if let Some((name, Binding::Rest(nodes))) = node
            .child(Field::Argument)
            .and_then(|arg| bound(arg, bindings))
        {
            return Ok(Expansion::Many {
                name: name.to_string(),
                nodes: nodes.clone(),
            });
        }
    }

    let mut copy = Node::new(node.kind()).with_span(node.span());
    for (field, slot) in node.slots() {
        let slot = match slot {
            Slot::Node(child) if is_literal_callee(node, *field, child) => Slot::Node(child.clone()),
            Slot::Node(child) => match expand(child, bindings)? {
                Expansion::One(child) => {
                    check_name_slot(node, *field, &child)?;
                    Slot::Node(child)
                }
                Expansion::Many { name, .. } => {
                    return Err(StructuralError::RestOutsideList { name })
                }
            },
            Slot::List(items) => {
                let items = list(items, bindings)?;
                for item in &items {
                    check_name_slot(node, *field, item)?;
                }
                Slot::List(items)
            }
            other => other.clone(),
        };
        copy = copy.with(*field, slot);
    }
    Ok(Expansion::One(copy.into_ref()))
}

fn list(items: &[NodeRef], bindings: &Bindings) -> Result<Vec<NodeRef>, StructuralError> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match expand(item, bindings)? {
            Expansion::One(node) => out.push(node),
            Expansion::Many { nodes, .. } => out.extend(nodes),
        }
    }
    Ok(out)
}

fn bound<'a>(node: &'a Node, bindings: &'a Bindings) -> Option<(&'a str, &'a Binding)> {
    let name = node.name()?;
    Some((name, bindings.get(name)?))
}

/// Identifier-only slots reject anything but an identifier; a
/// non-computed object key may also be a literal. Binding slots also take
/// defaults, rest elements and destructuring patterns.
pub(crate) fn check_name_slot(
    parent: &Node,
    field: Field,
    child: &Node,
) -> Result<(), StructuralError> {
    let kind = parent.kind();
    let fits = if kind.is_binding_slot(field) {
        matches!(
            child.kind(),
            NodeKind::Identifier
                | NodeKind::AssignmentPattern
                | NodeKind::RestElement
                | NodeKind::Raw
        )
    } else if kind.is_name_slot(field) {
        child.kind() == NodeKind::Identifier
            || parent.flag(Field::Computed)
            || (kind == NodeKind::Property && child.kind() == NodeKind::Literal)
    } else {
        true
    };
    if fits {
        return Ok(());
    }
    Err(StructuralError::NotAnIdentifier {
        kind,
        field,
        found: child.kind(),
    })
}
