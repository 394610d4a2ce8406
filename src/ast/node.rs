use crate::ast::kind::{Field, NodeKind};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::sync::Arc;

/// Shared handle to an immutable node. Rewrites build new parents around
/// untouched children instead of mutating them.
pub type NodeRef = Arc<Node>;

/// Source position of a node. Only the validator and diagnostics read it;
/// matching ignores it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
    /// 1-based line of `start`
    pub line: usize,
    /// 0-based column of `start`
    pub column: usize,
}

/// Leaf values stored directly in a slot.
#[derive(Debug, Clone)]
pub enum Scalar {
    /// Names, operators, declaration kinds and raw source text
    Text(String),
    /// Decoded string literal value
    Str(String),
    /// Numeric literal; equality uses `value` when both sides parsed
    Num { value: Option<f64>, raw: String },
    Bool(bool),
    Null,
    /// Regular expression literal, as written
    Regex(String),
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Text(a), Scalar::Text(b)) => a == b,
            (Scalar::Str(a), Scalar::Str(b)) => a == b,
            (
                Scalar::Num {
                    value: Some(a), ..
                },
                Scalar::Num {
                    value: Some(b), ..
                },
            ) => a == b,
            (Scalar::Num { raw: a, .. }, Scalar::Num { raw: b, .. }) => a == b,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::Regex(a), Scalar::Regex(b)) => a == b,
            _ => false,
        }
    }
}

impl Scalar {
    /// Textual rendering used by binding introspection.
    pub fn as_text(&self) -> String {
        match self {
            Scalar::Text(s) | Scalar::Str(s) | Scalar::Regex(s) => s.clone(),
            Scalar::Num { raw, .. } => raw.clone(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Null => "null".to_string(),
        }
    }
}

/// Content of one named child slot.
#[derive(Debug, Clone)]
pub enum Slot {
    Node(NodeRef),
    List(Vec<NodeRef>),
    Absent,
    Scalar(Scalar),
}

impl Slot {
    pub fn text(s: impl Into<String>) -> Self {
        Slot::Scalar(Scalar::Text(s.into()))
    }

    pub fn flag(b: bool) -> Self {
        Slot::Scalar(Scalar::Bool(b))
    }

    pub fn opt(node: Option<NodeRef>) -> Self {
        node.map_or(Slot::Absent, Slot::Node)
    }

    /// Mutable access to the child at `index` (`None` for a single-node slot).
    pub fn child_mut(&mut self, index: Option<usize>) -> Option<&mut NodeRef> {
        match (self, index) {
            (Slot::Node(node), None) => Some(node),
            (Slot::List(list), Some(i)) => list.get_mut(i),
            _ => None,
        }
    }

    fn same_structure(&self, other: &Slot) -> bool {
        match (self, other) {
            (Slot::Node(a), Slot::Node(b)) => a.same_structure(b),
            (Slot::List(a), Slot::List(b)) => same_sequence(a, b),
            (Slot::Absent, Slot::Absent) => true,
            (Slot::Scalar(a), Slot::Scalar(b)) => a == b,
            _ => false,
        }
    }
}

/// A syntax tree node: kind tag, ordered named slots and position.
#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    slots: Vec<(Field, Slot)>,
    span: Span,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            slots: Vec::new(),
            span: Span::default(),
        }
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Node::new(NodeKind::Identifier).with(Field::Name, Slot::text(name))
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Node::new(NodeKind::Raw).with(Field::Text, Slot::text(text))
    }

    /// Builder: append (or overwrite) a slot.
    pub fn with(mut self, field: Field, slot: Slot) -> Self {
        match self.slots.iter_mut().find(|(f, _)| *f == field) {
            Some((_, existing)) => *existing = slot,
            None => self.slots.push((field, slot)),
        }
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn into_ref(self) -> NodeRef {
        Arc::new(self)
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn slots(&self) -> &[(Field, Slot)] {
        &self.slots
    }

    pub fn slot(&self, field: Field) -> Option<&Slot> {
        self.slots.iter().find(|(f, _)| *f == field).map(|(_, s)| s)
    }

    pub fn slot_mut(&mut self, field: Field) -> Option<&mut Slot> {
        self.slots
            .iter_mut()
            .find(|(f, _)| *f == field)
            .map(|(_, s)| s)
    }

    /// Single child in `field`, if present.
    pub fn child(&self, field: Field) -> Option<&NodeRef> {
        match self.slot(field) {
            Some(Slot::Node(node)) => Some(node),
            _ => None,
        }
    }

    /// Children of a list slot; empty when the slot is missing.
    pub fn list(&self, field: Field) -> &[NodeRef] {
        match self.slot(field) {
            Some(Slot::List(list)) => list,
            _ => &[],
        }
    }

    pub fn scalar(&self, field: Field) -> Option<&Scalar> {
        match self.slot(field) {
            Some(Slot::Scalar(s)) => Some(s),
            _ => None,
        }
    }

    pub fn text(&self, field: Field) -> Option<&str> {
        match self.scalar(field) {
            Some(Scalar::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn flag(&self, field: Field) -> bool {
        matches!(self.scalar(field), Some(Scalar::Bool(true)))
    }

    /// Identifier name, for `Identifier` nodes.
    pub fn name(&self) -> Option<&str> {
        if self.kind == NodeKind::Identifier {
            self.text(Field::Name)
        } else {
            None
        }
    }

    /// Deep equality ignoring source positions.
    pub fn same_structure(&self, other: &Node) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        self.kind == other.kind
            && self.slots.len() == other.slots.len()
            && self.slots.iter().all(|(field, slot)| {
                other
                    .slot(*field)
                    .is_some_and(|theirs| slot.same_structure(theirs))
            })
    }
}

/// Element-wise [`Node::same_structure`] over two sequences.
pub fn same_sequence(a: &[NodeRef], b: &[NodeRef]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_structure(y))
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Text(s) | Scalar::Str(s) | Scalar::Regex(s) => serializer.serialize_str(s),
            Scalar::Num {
                value: Some(v), ..
            } => serializer.serialize_f64(*v),
            Scalar::Num { raw, .. } => serializer.serialize_str(raw),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Null => serializer.serialize_unit(),
        }
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Slot::Node(node) => node.serialize(serializer),
            Slot::List(list) => {
                let mut seq = serializer.serialize_seq(Some(list.len()))?;
                for node in list {
                    seq.serialize_element(node.as_ref())?;
                }
                seq.end()
            }
            Slot::Absent => serializer.serialize_unit(),
            Slot::Scalar(scalar) => scalar.serialize(serializer),
        }
    }
}

/// ESTree-shaped JSON: `{"type": ..., <field>: ..., "range": [start, end]}`.
impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len() + 2))?;
        map.serialize_entry("type", self.kind.as_str())?;
        for (field, slot) in &self.slots {
            map.serialize_entry(field.as_str(), slot)?;
        }
        map.serialize_entry("range", &[self.span.start, self.span.end])?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(callee: &str, args: &[&str]) -> NodeRef {
        Node::new(NodeKind::CallExpression)
            .with(Field::Callee, Slot::Node(Node::identifier(callee).into_ref()))
            .with(
                Field::Arguments,
                Slot::List(
                    args.iter()
                        .map(|a| Node::identifier(*a).into_ref())
                        .collect(),
                ),
            )
            .into_ref()
    }

    #[test]
    fn structure_ignores_spans() {
        let a = Node::identifier("x")
            .with_span(Span {
                start: 0,
                end: 1,
                line: 1,
                column: 0,
            })
            .into_ref();
        let b = Node::identifier("x")
            .with_span(Span {
                start: 10,
                end: 11,
                line: 3,
                column: 4,
            })
            .into_ref();
        assert!(a.same_structure(&b));
    }

    #[test]
    fn structure_compares_lists_and_names() {
        assert!(call("f", &["p", "q"]).same_structure(&call("f", &["p", "q"])));
        assert!(!call("f", &["p", "q"]).same_structure(&call("f", &["p"])));
        assert!(!call("f", &["p"]).same_structure(&call("g", &["p"])));
    }

    #[test]
    fn numbers_compare_by_value() {
        let hex = Scalar::Num {
            value: Some(16.0),
            raw: "0x10".into(),
        };
        let dec = Scalar::Num {
            value: Some(16.0),
            raw: "16".into(),
        };
        assert_eq!(hex, dec);
        assert_ne!(Scalar::Str("1".into()), dec);
    }

    #[test]
    fn with_overwrites_existing_slot() {
        let node = Node::identifier("a").with(Field::Name, Slot::text("b"));
        assert_eq!(node.name(), Some("b"));
        assert_eq!(node.slots().len(), 1);
    }

    #[test]
    fn serializes_estree_shape() {
        let json = serde_json::to_value(call("f", &["a"]).as_ref()).unwrap();
        assert_eq!(json["type"], "CallExpression");
        assert_eq!(json["callee"]["name"], "f");
        assert_eq!(json["arguments"][0]["type"], "Identifier");
    }
}
