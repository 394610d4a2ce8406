//! Wildcard classification.
//!
//! A pattern identifier made of one ASCII lowercase letter (`a` to `z`) is
//! a free variable. Written as `...x` at the end of a call argument list or
//! a parameter list it is a rest wildcard and captures the remaining
//! elements; anywhere else it captures exactly one node. Every other
//! identifier must match by name.
//!
//! The identifier directly called by a call or `new` expression is always
//! literal, so `f(...a) -> g(...a)` renames calls to `f` and nothing else.

use crate::ast::{Field, Node, NodeKind, NodeRef, Slot};
use crate::rule::errors::CompileError;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WildcardKind {
    /// Binds exactly one node
    Value,
    /// Binds the tail of a list
    Rest,
}

pub fn is_wildcard_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_lowercase())
}

/// Wildcards declared by a pattern, resolved once at compile time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WildcardSet {
    names: BTreeMap<String, WildcardKind>,
}

impl WildcardSet {
    /// Classify every wildcard occurring in `nodes`.
    pub fn collect(nodes: &[NodeRef]) -> Result<Self, CompileError> {
        let mut set = WildcardSet::default();
        for node in nodes {
            set.visit(node)?;
        }
        Ok(set)
    }

    pub fn get(&self, name: &str) -> Option<WildcardKind> {
        self.names.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, WildcardKind)> {
        self.names.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    /// Name of the value wildcard `node` stands for, if any.
    pub fn value_name<'n>(&self, node: &'n Node) -> Option<&'n str> {
        let name = node.name()?;
        (self.get(name) == Some(WildcardKind::Value)).then_some(name)
    }

    /// Name of the rest wildcard written as `...x` in `node`, if any.
    pub fn rest_name<'n>(&self, node: &'n Node) -> Option<&'n str> {
        let name = rest_marker(node)?;
        (self.get(name) == Some(WildcardKind::Rest)).then_some(name)
    }

    fn declare(&mut self, name: &str, kind: WildcardKind) -> Result<(), CompileError> {
        match self.names.get(name) {
            Some(existing) if *existing != kind => Err(CompileError::ConflictingWildcard {
                name: name.to_string(),
            }),
            Some(_) => Ok(()),
            None => {
                self.names.insert(name.to_string(), kind);
                Ok(())
            }
        }
    }

    fn visit(&mut self, node: &Node) -> Result<(), CompileError> {
        if let Some(name) = node.name().filter(|name| is_wildcard_name(name)) {
            return self.declare(name, WildcardKind::Value);
        }
        for (field, slot) in node.slots() {
            match slot {
                Slot::Node(child) if is_literal_callee(node, *field, child) => {}
                Slot::Node(child) => self.visit(child)?,
                Slot::List(items) if accepts_rest(node.kind(), *field) => {
                    for (i, item) in items.iter().enumerate() {
                        match rest_marker(item) {
                            Some(name) if i + 1 == items.len() => {
                                self.declare(name, WildcardKind::Rest)?
                            }
                            Some(name) => {
                                return Err(CompileError::RestNotLast {
                                    name: name.to_string(),
                                })
                            }
                            None => self.visit(item)?,
                        }
                    }
                }
                Slot::List(items) => {
                    for item in items {
                        self.visit(item)?;
                    }
                }
                Slot::Absent | Slot::Scalar(_) => {}
            }
        }
        Ok(())
    }
}

/// Whether `child`, held in `field` of `parent`, is an identifier naming
/// the function being called.
pub fn is_literal_callee(parent: &Node, field: Field, child: &Node) -> bool {
    matches!(
        parent.kind(),
        NodeKind::CallExpression | NodeKind::NewExpression
    ) && field == Field::Callee
        && child.kind() == NodeKind::Identifier
}

/// List slots where a trailing `...x` captures the remaining elements.
fn accepts_rest(kind: NodeKind, field: Field) -> bool {
    matches!(
        (kind, field),
        (NodeKind::CallExpression | NodeKind::NewExpression, Field::Arguments)
            | (
                NodeKind::FunctionDeclaration
                    | NodeKind::FunctionExpression
                    | NodeKind::ArrowFunctionExpression,
                Field::Params
            )
    )
}

/// `...x` where `x` has a wildcard name.
fn rest_marker(node: &Node) -> Option<&str> {
    if !matches!(node.kind(), NodeKind::SpreadElement | NodeKind::RestElement) {
        return None;
    }
    node.child(Field::Argument)?
        .name()
        .filter(|name| is_wildcard_name(name))
}

/// Every wildcard-shaped identifier anywhere under `nodes`, in first-seen
/// order.
pub fn referenced_names(nodes: &[NodeRef]) -> Vec<String> {
    fn collect(node: &Node, names: &mut Vec<String>) {
        if let Some(name) = node.name().filter(|name| is_wildcard_name(name)) {
            if !names.iter().any(|seen| seen == name) {
                names.push(name.to_string());
            }
            return;
        }
        for (field, slot) in node.slots() {
            match slot {
                Slot::Node(child) if is_literal_callee(node, *field, child) => {}
                Slot::Node(child) => collect(child, names),
                Slot::List(items) => items.iter().for_each(|item| collect(item, names)),
                Slot::Absent | Slot::Scalar(_) => {}
            }
        }
    }

    let mut names = Vec::new();
    for node in nodes {
        collect(node, &mut names);
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::parse;

    fn classify(source: &str) -> Result<WildcardSet, CompileError> {
        let program = parse(source).unwrap();
        WildcardSet::collect(program.list(Field::Body))
    }

    #[test]
    fn single_lowercase_letters_are_wildcards() {
        assert!(is_wildcard_name("a"));
        assert!(is_wildcard_name("z"));
        assert!(!is_wildcard_name("A"));
        assert!(!is_wildcard_name("_"));
        assert!(!is_wildcard_name("$"));
        assert!(!is_wildcard_name("ab"));
        assert!(!is_wildcard_name(""));
    }

    #[test]
    fn classifies_values_and_rests() {
        let set = classify("jade_mixins[a](x, ...b)").unwrap();
        assert_eq!(set.get("a"), Some(WildcardKind::Value));
        assert_eq!(set.get("x"), Some(WildcardKind::Value));
        assert_eq!(set.get("b"), Some(WildcardKind::Rest));
        assert!(!set.contains("jade_mixins"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn rest_parameters_are_rest_wildcards() {
        let set = classify("function f(a, ...r) {}").unwrap();
        assert_eq!(set.get("r"), Some(WildcardKind::Rest));
        assert_eq!(set.get("f"), Some(WildcardKind::Value));
    }

    #[test]
    fn spread_outside_argument_lists_is_a_value() {
        let set = classify("[...a]").unwrap();
        assert_eq!(set.get("a"), Some(WildcardKind::Value));
    }

    #[test]
    fn direct_callees_are_literal() {
        let set = classify("f(a) + new g(b)").unwrap();
        assert!(!set.contains("f"));
        assert!(!set.contains("g"));
        assert!(set.contains("a") && set.contains("b"));
        let set = classify("o.f(a)").unwrap();
        assert!(set.contains("o") && set.contains("f"));
    }

    #[test]
    fn rest_must_be_last() {
        assert_eq!(
            classify("f(...a, b)"),
            Err(CompileError::RestNotLast {
                name: "a".to_string()
            })
        );
    }

    #[test]
    fn conflicting_kinds_are_rejected() {
        assert_eq!(
            classify("f(a, ...a)"),
            Err(CompileError::ConflictingWildcard {
                name: "a".to_string()
            })
        );
    }

    #[test]
    fn referenced_names_dedupes_in_order() {
        let program = parse("g(b, a, b, longer)").unwrap();
        assert_eq!(referenced_names(program.list(Field::Body)), vec!["b", "a"]);
    }
}
