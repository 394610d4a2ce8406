//! Operator precedence, lowest binding first.

use crate::ast::{Field, Node, NodeKind};

pub const SEQUENCE: u8 = 0;
pub const ASSIGNMENT: u8 = 1;
pub const CONDITIONAL: u8 = 2;
pub const LOGICAL_OR: u8 = 3;
pub const UNARY: u8 = 14;
pub const POSTFIX: u8 = 15;
pub const CALL: u8 = 16;
pub const NEW: u8 = 17;
pub const MEMBER: u8 = 19;
pub const PRIMARY: u8 = 20;

pub fn binary(op: &str) -> u8 {
    match op {
        "??" | "||" => LOGICAL_OR,
        "&&" => 4,
        "|" => 5,
        "^" => 6,
        "&" => 7,
        "==" | "!=" | "===" | "!==" => 8,
        "<" | ">" | "<=" | ">=" | "in" | "instanceof" => 9,
        "<<" | ">>" | ">>>" => 10,
        "+" | "-" => 11,
        "*" | "/" | "%" => 12,
        "**" => 13,
        _ => PRIMARY,
    }
}

/// Binding strength of an expression node.
pub fn of(node: &Node) -> u8 {
    match node.kind() {
        NodeKind::SequenceExpression => SEQUENCE,
        NodeKind::AssignmentExpression | NodeKind::YieldExpression => ASSIGNMENT,
        NodeKind::ConditionalExpression | NodeKind::ArrowFunctionExpression => CONDITIONAL,
        NodeKind::BinaryExpression | NodeKind::LogicalExpression => {
            binary(node.text(Field::Operator).unwrap_or_default())
        }
        NodeKind::UnaryExpression | NodeKind::AwaitExpression => UNARY,
        NodeKind::UpdateExpression if node.flag(Field::Prefix) => UNARY,
        NodeKind::UpdateExpression => POSTFIX,
        NodeKind::CallExpression => CALL,
        NodeKind::NewExpression => NEW,
        NodeKind::MemberExpression => MEMBER,
        _ => PRIMARY,
    }
}
