use serde::{Serialize, Serializer};
use std::fmt;

/// Syntactic node variants, named after their ESTree counterparts.
///
/// The set is closed: everything the lowering pass does not model lands in
/// [`NodeKind::Raw`], which carries its exact source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,

    // Statements
    ExpressionStatement,
    BlockStatement,
    EmptyStatement,
    DebuggerStatement,
    VariableDeclaration,
    VariableDeclarator,
    FunctionDeclaration,
    ReturnStatement,
    IfStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    WhileStatement,
    DoWhileStatement,
    BreakStatement,
    ContinueStatement,
    ThrowStatement,
    TryStatement,
    CatchClause,
    SwitchStatement,
    SwitchCase,
    LabeledStatement,

    // Expressions
    Identifier,
    Literal,
    ThisExpression,
    ArrayExpression,
    ObjectExpression,
    Property,
    FunctionExpression,
    ArrowFunctionExpression,
    SpreadElement,
    RestElement,
    AssignmentPattern,
    MemberExpression,
    CallExpression,
    NewExpression,
    UnaryExpression,
    UpdateExpression,
    BinaryExpression,
    LogicalExpression,
    AssignmentExpression,
    ConditionalExpression,
    SequenceExpression,
    AwaitExpression,
    YieldExpression,
    Elision,

    /// Unmodelled syntax, kept as source text.
    Raw,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Program => "Program",
            NodeKind::ExpressionStatement => "ExpressionStatement",
            NodeKind::BlockStatement => "BlockStatement",
            NodeKind::EmptyStatement => "EmptyStatement",
            NodeKind::DebuggerStatement => "DebuggerStatement",
            NodeKind::VariableDeclaration => "VariableDeclaration",
            NodeKind::VariableDeclarator => "VariableDeclarator",
            NodeKind::FunctionDeclaration => "FunctionDeclaration",
            NodeKind::ReturnStatement => "ReturnStatement",
            NodeKind::IfStatement => "IfStatement",
            NodeKind::ForStatement => "ForStatement",
            NodeKind::ForInStatement => "ForInStatement",
            NodeKind::ForOfStatement => "ForOfStatement",
            NodeKind::WhileStatement => "WhileStatement",
            NodeKind::DoWhileStatement => "DoWhileStatement",
            NodeKind::BreakStatement => "BreakStatement",
            NodeKind::ContinueStatement => "ContinueStatement",
            NodeKind::ThrowStatement => "ThrowStatement",
            NodeKind::TryStatement => "TryStatement",
            NodeKind::CatchClause => "CatchClause",
            NodeKind::SwitchStatement => "SwitchStatement",
            NodeKind::SwitchCase => "SwitchCase",
            NodeKind::LabeledStatement => "LabeledStatement",
            NodeKind::Identifier => "Identifier",
            NodeKind::Literal => "Literal",
            NodeKind::ThisExpression => "ThisExpression",
            NodeKind::ArrayExpression => "ArrayExpression",
            NodeKind::ObjectExpression => "ObjectExpression",
            NodeKind::Property => "Property",
            NodeKind::FunctionExpression => "FunctionExpression",
            NodeKind::ArrowFunctionExpression => "ArrowFunctionExpression",
            NodeKind::SpreadElement => "SpreadElement",
            NodeKind::RestElement => "RestElement",
            NodeKind::AssignmentPattern => "AssignmentPattern",
            NodeKind::MemberExpression => "MemberExpression",
            NodeKind::CallExpression => "CallExpression",
            NodeKind::NewExpression => "NewExpression",
            NodeKind::UnaryExpression => "UnaryExpression",
            NodeKind::UpdateExpression => "UpdateExpression",
            NodeKind::BinaryExpression => "BinaryExpression",
            NodeKind::LogicalExpression => "LogicalExpression",
            NodeKind::AssignmentExpression => "AssignmentExpression",
            NodeKind::ConditionalExpression => "ConditionalExpression",
            NodeKind::SequenceExpression => "SequenceExpression",
            NodeKind::AwaitExpression => "AwaitExpression",
            NodeKind::YieldExpression => "YieldExpression",
            NodeKind::Elision => "Elision",
            NodeKind::Raw => "Raw",
        }
    }

    /// Statement-level kinds. `Raw` counts as both a statement and an
    /// expression since it can stand in for either.
    pub fn is_statement(self) -> bool {
        matches!(
            self,
            NodeKind::ExpressionStatement
                | NodeKind::BlockStatement
                | NodeKind::EmptyStatement
                | NodeKind::DebuggerStatement
                | NodeKind::VariableDeclaration
                | NodeKind::FunctionDeclaration
                | NodeKind::ReturnStatement
                | NodeKind::IfStatement
                | NodeKind::ForStatement
                | NodeKind::ForInStatement
                | NodeKind::ForOfStatement
                | NodeKind::WhileStatement
                | NodeKind::DoWhileStatement
                | NodeKind::BreakStatement
                | NodeKind::ContinueStatement
                | NodeKind::ThrowStatement
                | NodeKind::TryStatement
                | NodeKind::SwitchStatement
                | NodeKind::LabeledStatement
                | NodeKind::Raw
        )
    }

    pub fn is_expression(self) -> bool {
        matches!(
            self,
            NodeKind::Identifier
                | NodeKind::Literal
                | NodeKind::ThisExpression
                | NodeKind::ArrayExpression
                | NodeKind::ObjectExpression
                | NodeKind::FunctionExpression
                | NodeKind::ArrowFunctionExpression
                | NodeKind::MemberExpression
                | NodeKind::CallExpression
                | NodeKind::NewExpression
                | NodeKind::UnaryExpression
                | NodeKind::UpdateExpression
                | NodeKind::BinaryExpression
                | NodeKind::LogicalExpression
                | NodeKind::AssignmentExpression
                | NodeKind::ConditionalExpression
                | NodeKind::SequenceExpression
                | NodeKind::AwaitExpression
                | NodeKind::YieldExpression
                | NodeKind::Raw
        )
    }

    /// Whether `field` of this kind holds a statement list that statement
    /// patterns may splice into.
    pub fn has_statement_list(self, field: Field) -> bool {
        matches!(
            (self, field),
            (NodeKind::Program, Field::Body)
                | (NodeKind::BlockStatement, Field::Body)
                | (NodeKind::SwitchCase, Field::Consequent)
        )
    }

    /// Whether `field` holds a single statement (`if` branches, loop and
    /// label bodies) or a statement list.
    pub fn has_statement_slot(self, field: Field) -> bool {
        self.has_statement_list(field)
            || matches!(
                (self, field),
                (NodeKind::IfStatement, Field::Consequent | Field::Alternate)
                    | (
                        NodeKind::ForStatement
                            | NodeKind::ForInStatement
                            | NodeKind::ForOfStatement
                            | NodeKind::WhileStatement
                            | NodeKind::DoWhileStatement
                            | NodeKind::LabeledStatement,
                        Field::Body
                    )
            )
    }

    /// Whether `field` may only ever hold an identifier. Member properties
    /// and object keys are only constrained when the node is not
    /// `computed`; callers check that flag.
    pub fn is_name_slot(self, field: Field) -> bool {
        matches!(
            (self, field),
            (NodeKind::FunctionDeclaration, Field::Id)
                | (NodeKind::FunctionExpression, Field::Id)
                | (NodeKind::LabeledStatement, Field::Label)
                | (NodeKind::BreakStatement, Field::Label)
                | (NodeKind::ContinueStatement, Field::Label)
                | (NodeKind::MemberExpression, Field::Property)
                | (NodeKind::Property, Field::Key)
        )
    }

    /// Whether `field` declares bindings: declarator ids, parameters and
    /// catch parameters. Besides identifiers these may hold defaults, rest
    /// elements and destructuring patterns.
    pub fn is_binding_slot(self, field: Field) -> bool {
        matches!(
            (self, field),
            (NodeKind::VariableDeclarator, Field::Id)
                | (
                    NodeKind::FunctionDeclaration
                        | NodeKind::FunctionExpression
                        | NodeKind::ArrowFunctionExpression,
                    Field::Params
                )
                | (NodeKind::CatchClause, Field::Param)
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named child slots. Serialized names follow ESTree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Alternate,
    Argument,
    Arguments,
    Async,
    Block,
    Body,
    Callee,
    Cases,
    Computed,
    Consequent,
    Declarations,
    Delegate,
    Discriminant,
    Elements,
    Expression,
    Expressions,
    Finalizer,
    Generator,
    Handler,
    Id,
    Init,
    Key,
    Kind,
    Label,
    Left,
    Method,
    Name,
    Object,
    Operator,
    Optional,
    Param,
    Params,
    Prefix,
    Properties,
    Property,
    Right,
    Shorthand,
    Test,
    Text,
    Update,
    Value,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Alternate => "alternate",
            Field::Argument => "argument",
            Field::Arguments => "arguments",
            Field::Async => "async",
            Field::Block => "block",
            Field::Body => "body",
            Field::Callee => "callee",
            Field::Cases => "cases",
            Field::Computed => "computed",
            Field::Consequent => "consequent",
            Field::Declarations => "declarations",
            Field::Delegate => "delegate",
            Field::Discriminant => "discriminant",
            Field::Elements => "elements",
            Field::Expression => "expression",
            Field::Expressions => "expressions",
            Field::Finalizer => "finalizer",
            Field::Generator => "generator",
            Field::Handler => "handler",
            Field::Id => "id",
            Field::Init => "init",
            Field::Key => "key",
            Field::Kind => "kind",
            Field::Label => "label",
            Field::Left => "left",
            Field::Method => "method",
            Field::Name => "name",
            Field::Object => "object",
            Field::Operator => "operator",
            Field::Optional => "optional",
            Field::Param => "param",
            Field::Params => "params",
            Field::Prefix => "prefix",
            Field::Properties => "properties",
            Field::Property => "property",
            Field::Right => "right",
            Field::Shorthand => "shorthand",
            Field::Test => "test",
            Field::Text => "raw",
            Field::Update => "update",
            Field::Value => "value",
        }
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statement_lists_are_limited_to_bodies() {
        assert!(NodeKind::Program.has_statement_list(Field::Body));
        assert!(NodeKind::BlockStatement.has_statement_list(Field::Body));
        assert!(NodeKind::SwitchCase.has_statement_list(Field::Consequent));
        assert!(!NodeKind::FunctionDeclaration.has_statement_list(Field::Body));
        assert!(!NodeKind::CallExpression.has_statement_list(Field::Arguments));
    }

    #[test]
    fn raw_is_both_statement_and_expression() {
        assert!(NodeKind::Raw.is_statement());
        assert!(NodeKind::Raw.is_expression());
        assert!(!NodeKind::Property.is_expression());
        assert!(!NodeKind::VariableDeclarator.is_statement());
    }

    #[test]
    fn single_statement_slots() {
        assert!(NodeKind::IfStatement.has_statement_slot(Field::Alternate));
        assert!(NodeKind::WhileStatement.has_statement_slot(Field::Body));
        assert!(NodeKind::Program.has_statement_slot(Field::Body));
        assert!(!NodeKind::IfStatement.has_statement_slot(Field::Test));
        assert!(!NodeKind::ArrowFunctionExpression.has_statement_slot(Field::Body));
    }
}
