//! Structural unification of a pattern tree against a source subtree.

use crate::ast::{same_sequence, Field, Node, NodeKind, NodeRef, Scalar, Slot};
use crate::print::Printer;
use crate::rule::{is_literal_callee, WildcardSet};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// What a wildcard captured.
#[derive(Debug, Clone)]
pub enum Binding {
    /// A value wildcard's single node
    Node(NodeRef),
    /// A rest wildcard's list tail, possibly empty
    Rest(Vec<NodeRef>),
}

impl Binding {
    pub fn node(&self) -> Option<&NodeRef> {
        match self {
            Binding::Node(node) => Some(node),
            Binding::Rest(_) => None,
        }
    }

    pub fn nodes(&self) -> &[NodeRef] {
        match self {
            Binding::Node(node) => std::slice::from_ref(node),
            Binding::Rest(nodes) => nodes,
        }
    }

    /// Identifier name, when the binding is an identifier.
    pub fn name(&self) -> Option<&str> {
        self.node()?.name()
    }

    /// Literal value as text, when the binding is a literal. Strings come
    /// back decoded, without quotes.
    pub fn value(&self) -> Option<String> {
        let node = self.node()?;
        if node.kind() != NodeKind::Literal {
            return None;
        }
        node.scalar(Field::Value).map(Scalar::as_text)
    }

    /// Node kind name, or `"Rest"` for a sequence.
    pub fn kind(&self) -> &'static str {
        match self {
            Binding::Node(node) => node.kind().as_str(),
            Binding::Rest(_) => "Rest",
        }
    }

    /// The bound code, printed with default options. Sequences are joined
    /// with `, `.
    pub fn source(&self) -> String {
        let printer = Printer::default();
        self.nodes()
            .iter()
            .map(|node| printer.print(node))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn same_as(&self, other: &Binding) -> bool {
        match (self, other) {
            (Binding::Node(a), Binding::Node(b)) => a.same_structure(b),
            (Binding::Rest(a), Binding::Rest(b)) => same_sequence(a, b),
            _ => false,
        }
    }
}

impl Serialize for Binding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("kind", self.kind())?;
        if let Some(name) = self.name() {
            map.serialize_entry("name", name)?;
        }
        if let Some(value) = self.value() {
            map.serialize_entry("value", &value)?;
        }
        if let Binding::Rest(nodes) = self {
            map.serialize_entry("count", &nodes.len())?;
        }
        map.serialize_entry("source", &self.source())?;
        map.end()
    }
}

/// Wildcard name to captured content for one match.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Bindings(BTreeMap<String, Binding>);

impl Bindings {
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.0.iter().map(|(name, binding)| (name.as_str(), binding))
    }

    /// First use binds; later uses must agree with the first.
    fn bind(&mut self, name: &str, binding: Binding) -> bool {
        match self.0.entry(name.to_string()) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(binding);
                true
            }
            btree_map::Entry::Occupied(entry) => entry.get().same_as(&binding),
        }
    }
}

/// One unification attempt. Bindings accumulate across calls, so a fresh
/// unifier is needed per candidate.
pub struct Unifier<'w> {
    wildcards: &'w WildcardSet,
    bindings: Bindings,
}

impl<'w> Unifier<'w> {
    pub fn new(wildcards: &'w WildcardSet) -> Self {
        Self {
            wildcards,
            bindings: Bindings::default(),
        }
    }

    pub fn into_bindings(self) -> Bindings {
        self.bindings
    }

    pub fn node(&mut self, pattern: &Node, candidate: &NodeRef) -> bool {
        if let Some(name) = self.wildcards.value_name(pattern) {
            return self.bindings.bind(name, Binding::Node(candidate.clone()));
        }
        if pattern.kind() != candidate.kind() {
            return false;
        }
        // `{}` in a pattern stands for any block.
        if pattern.kind() == NodeKind::BlockStatement && pattern.list(Field::Body).is_empty() {
            return true;
        }
        pattern.slots().iter().all(|(field, slot)| {
            let theirs = candidate.slot(*field).unwrap_or(&Slot::Absent);
            match (slot, theirs) {
                (Slot::Node(p), Slot::Node(c)) if is_literal_callee(pattern, *field, p) => {
                    p.same_structure(c)
                }
                _ => self.slot(slot, theirs),
            }
        })
    }

    fn slot(&mut self, pattern: &Slot, candidate: &Slot) -> bool {
        match (pattern, candidate) {
            (Slot::Node(p), Slot::Node(c)) => self.node(p, c),
            (Slot::List(p), Slot::List(c)) => self.list(p, c),
            (Slot::Absent, Slot::Absent) => true,
            (Slot::Scalar(p), Slot::Scalar(c)) => p == c,
            _ => false,
        }
    }

    /// Positional unification; a trailing rest wildcard takes whatever is
    /// left after the fixed prefix.
    fn list(&mut self, pattern: &[NodeRef], candidate: &[NodeRef]) -> bool {
        let rest = pattern
            .split_last()
            .and_then(|(last, prefix)| Some((self.wildcards.rest_name(last)?, prefix)));
        match rest {
            Some((name, prefix)) => {
                candidate.len() >= prefix.len()
                    && self.sequence(prefix, &candidate[..prefix.len()])
                    && self
                        .bindings
                        .bind(name, Binding::Rest(candidate[prefix.len()..].to_vec()))
            }
            None => pattern.len() == candidate.len() && self.sequence(pattern, candidate),
        }
    }

    /// Element-wise unification of equal-length sequences.
    pub fn sequence(&mut self, pattern: &[NodeRef], candidate: &[NodeRef]) -> bool {
        pattern.len() == candidate.len()
            && pattern
                .iter()
                .zip(candidate)
                .all(|(p, c)| self.node(p, c))
    }
}
