//! Lowering from the tree-sitter concrete tree to [`crate::ast::Node`].
//!
//! The concrete tree keeps every token; the lowered tree keeps only what
//! matching and printing need. Parentheses and comments disappear,
//! string escapes are resolved, and any construct without a dedicated
//! [`NodeKind`] becomes a `Raw` node holding its source text.

use crate::ast::{Field, Node, NodeKind, NodeRef, Scalar, Slot, Span};
use tree_sitter::Node as TsNode;

/// Lower a parsed `program` node.
pub fn lower_program(root: TsNode<'_>, source: &str) -> NodeRef {
    Lowerer { source }.program(root)
}

struct Lowerer<'s> {
    source: &'s str,
}

impl<'s> Lowerer<'s> {
    fn text(&self, node: TsNode<'_>) -> &'s str {
        &self.source[node.byte_range()]
    }

    fn span(&self, node: TsNode<'_>) -> Span {
        let start = node.start_position();
        Span {
            start: node.start_byte(),
            end: node.end_byte(),
            line: start.row + 1,
            column: start.column,
        }
    }

    fn node(&self, kind: NodeKind, ts: TsNode<'_>) -> Node {
        Node::new(kind).with_span(self.span(ts))
    }

    fn raw(&self, ts: TsNode<'_>) -> NodeRef {
        Node::raw(self.text(ts)).with_span(self.span(ts)).into_ref()
    }

    fn program(&self, ts: TsNode<'_>) -> NodeRef {
        let body = named_children(ts)
            .into_iter()
            .map(|child| self.statement(child))
            .collect();
        self.node(NodeKind::Program, ts)
            .with(Field::Body, Slot::List(body))
            .into_ref()
    }

    fn statement(&self, ts: TsNode<'_>) -> NodeRef {
        match ts.kind() {
            "expression_statement" => match first_named(ts) {
                Some(expr) => self
                    .node(NodeKind::ExpressionStatement, ts)
                    .with(Field::Expression, Slot::Node(self.expression(expr)))
                    .into_ref(),
                None => self.raw(ts),
            },
            "variable_declaration" => self.declaration(ts, "var"),
            "lexical_declaration" => {
                let kind = ts
                    .child_by_field_name("kind")
                    .map(|k| self.text(k))
                    .unwrap_or("let");
                self.declaration(ts, kind)
            }
            "statement_block" => self.block(ts),
            "empty_statement" => self.node(NodeKind::EmptyStatement, ts).into_ref(),
            "debugger_statement" => self.node(NodeKind::DebuggerStatement, ts).into_ref(),
            "function_declaration" | "generator_function_declaration" => {
                self.function(ts, NodeKind::FunctionDeclaration)
            }
            "return_statement" => self
                .node(NodeKind::ReturnStatement, ts)
                .with(
                    Field::Argument,
                    Slot::opt(first_named(ts).map(|e| self.expression(e))),
                )
                .into_ref(),
            "throw_statement" => match first_named(ts) {
                Some(expr) => self
                    .node(NodeKind::ThrowStatement, ts)
                    .with(Field::Argument, Slot::Node(self.expression(expr)))
                    .into_ref(),
                None => self.raw(ts),
            },
            "if_statement" => self.if_statement(ts),
            "for_statement" => self.for_statement(ts),
            "for_in_statement" => self.for_in_statement(ts),
            "while_statement" => match (field(ts, "condition"), field(ts, "body")) {
                (Some(test), Some(body)) => self
                    .node(NodeKind::WhileStatement, ts)
                    .with(Field::Test, Slot::Node(self.expression(test)))
                    .with(Field::Body, Slot::Node(self.statement(body)))
                    .into_ref(),
                _ => self.raw(ts),
            },
            "do_statement" => match (field(ts, "body"), field(ts, "condition")) {
                (Some(body), Some(test)) => self
                    .node(NodeKind::DoWhileStatement, ts)
                    .with(Field::Body, Slot::Node(self.statement(body)))
                    .with(Field::Test, Slot::Node(self.expression(test)))
                    .into_ref(),
                _ => self.raw(ts),
            },
            "break_statement" => self.jump(ts, NodeKind::BreakStatement),
            "continue_statement" => self.jump(ts, NodeKind::ContinueStatement),
            "try_statement" => self.try_statement(ts),
            "switch_statement" => self.switch_statement(ts),
            "labeled_statement" => match (field(ts, "label"), field(ts, "body")) {
                (Some(label), Some(body)) => self
                    .node(NodeKind::LabeledStatement, ts)
                    .with(Field::Label, Slot::Node(self.identifier(label)))
                    .with(Field::Body, Slot::Node(self.statement(body)))
                    .into_ref(),
                _ => self.raw(ts),
            },
            _ => self.raw(ts),
        }
    }

    fn declaration(&self, ts: TsNode<'_>, kind: &str) -> NodeRef {
        let declarations = named_children(ts)
            .into_iter()
            .filter(|child| child.kind() == "variable_declarator")
            .map(|child| self.declarator(child))
            .collect();
        self.node(NodeKind::VariableDeclaration, ts)
            .with(Field::Kind, Slot::text(kind))
            .with(Field::Declarations, Slot::List(declarations))
            .into_ref()
    }

    fn declarator(&self, ts: TsNode<'_>) -> NodeRef {
        let id = match field(ts, "name") {
            Some(name) => self.expression(name),
            None => self.raw(ts),
        };
        self.node(NodeKind::VariableDeclarator, ts)
            .with(Field::Id, Slot::Node(id))
            .with(
                Field::Init,
                Slot::opt(field(ts, "value").map(|v| self.expression(v))),
            )
            .into_ref()
    }

    fn block(&self, ts: TsNode<'_>) -> NodeRef {
        let body = named_children(ts)
            .into_iter()
            .map(|child| self.statement(child))
            .collect();
        self.node(NodeKind::BlockStatement, ts)
            .with(Field::Body, Slot::List(body))
            .into_ref()
    }

    /// Function declarations, function expressions and object methods.
    fn function(&self, ts: TsNode<'_>, kind: NodeKind) -> NodeRef {
        let params = field(ts, "parameters")
            .map(|p| self.parameters(p))
            .unwrap_or_default();
        let body = match field(ts, "body") {
            Some(body) => self.block(body),
            None => return self.raw(ts),
        };
        // A method's name is the property key, not the function's own name.
        let id = match ts.kind() {
            "method_definition" => None,
            _ => field(ts, "name").map(|name| self.identifier(name)),
        };
        self.node(kind, ts)
            .with(Field::Id, Slot::opt(id))
            .with(Field::Params, Slot::List(params))
            .with(Field::Body, Slot::Node(body))
            .with(Field::Async, Slot::flag(has_token(ts, "async")))
            .with(
                Field::Generator,
                Slot::flag(ts.kind().starts_with("generator") || has_token(ts, "*")),
            )
            .into_ref()
    }

    fn parameters(&self, ts: TsNode<'_>) -> Vec<NodeRef> {
        named_children(ts)
            .into_iter()
            .map(|param| self.expression(param))
            .collect()
    }

    fn arrow(&self, ts: TsNode<'_>) -> NodeRef {
        let params = match field(ts, "parameter") {
            Some(single) => vec![self.expression(single)],
            None => field(ts, "parameters")
                .map(|p| self.parameters(p))
                .unwrap_or_default(),
        };
        let body = match field(ts, "body") {
            Some(body) if body.kind() == "statement_block" => self.block(body),
            Some(body) => self.expression(body),
            None => return self.raw(ts),
        };
        self.node(NodeKind::ArrowFunctionExpression, ts)
            .with(Field::Params, Slot::List(params))
            .with(Field::Body, Slot::Node(body))
            .with(Field::Async, Slot::flag(has_token(ts, "async")))
            .into_ref()
    }

    fn if_statement(&self, ts: TsNode<'_>) -> NodeRef {
        let (Some(test), Some(consequent)) = (field(ts, "condition"), field(ts, "consequence"))
        else {
            return self.raw(ts);
        };
        let alternate = field(ts, "alternative")
            .and_then(|clause| match clause.kind() {
                "else_clause" => first_named(clause),
                _ => Some(clause),
            })
            .map(|stmt| self.statement(stmt));
        self.node(NodeKind::IfStatement, ts)
            .with(Field::Test, Slot::Node(self.expression(test)))
            .with(Field::Consequent, Slot::Node(self.statement(consequent)))
            .with(Field::Alternate, Slot::opt(alternate))
            .into_ref()
    }

    fn for_statement(&self, ts: TsNode<'_>) -> NodeRef {
        let Some(body) = field(ts, "body") else {
            return self.raw(ts);
        };
        let init = field(ts, "initializer").and_then(|init| match init.kind() {
            "empty_statement" => None,
            "variable_declaration" => Some(self.declaration(init, "var")),
            "lexical_declaration" => {
                let kind = init
                    .child_by_field_name("kind")
                    .map(|k| self.text(k))
                    .unwrap_or("let");
                Some(self.declaration(init, kind))
            }
            "expression_statement" => first_named(init).map(|e| self.expression(e)),
            _ => Some(self.expression(init)),
        });
        let test = field(ts, "condition").and_then(|cond| match cond.kind() {
            "empty_statement" => None,
            "expression_statement" => first_named(cond).map(|e| self.expression(e)),
            _ => Some(self.expression(cond)),
        });
        let update = field(ts, "increment").map(|e| self.expression(e));
        self.node(NodeKind::ForStatement, ts)
            .with(Field::Init, Slot::opt(init))
            .with(Field::Test, Slot::opt(test))
            .with(Field::Update, Slot::opt(update))
            .with(Field::Body, Slot::Node(self.statement(body)))
            .into_ref()
    }

    fn for_in_statement(&self, ts: TsNode<'_>) -> NodeRef {
        let (Some(left), Some(right), Some(body)) =
            (field(ts, "left"), field(ts, "right"), field(ts, "body"))
        else {
            return self.raw(ts);
        };
        let left = match (ts.child_by_field_name("kind"), left.kind()) {
            (_, "variable_declaration") => self.declaration(left, "var"),
            (_, "lexical_declaration") => self.statement(left),
            (Some(kind), _) => {
                let declarator = self
                    .node(NodeKind::VariableDeclarator, left)
                    .with(Field::Id, Slot::Node(self.expression(left)))
                    .with(Field::Init, Slot::Absent)
                    .into_ref();
                self.node(NodeKind::VariableDeclaration, left)
                    .with(Field::Kind, Slot::text(self.text(kind)))
                    .with(Field::Declarations, Slot::List(vec![declarator]))
                    .into_ref()
            }
            (None, _) => self.expression(left),
        };
        let kind = match ts.child_by_field_name("operator").map(|op| self.text(op)) {
            Some("of") => NodeKind::ForOfStatement,
            _ => NodeKind::ForInStatement,
        };
        self.node(kind, ts)
            .with(Field::Left, Slot::Node(left))
            .with(Field::Right, Slot::Node(self.expression(right)))
            .with(Field::Body, Slot::Node(self.statement(body)))
            .into_ref()
    }

    fn jump(&self, ts: TsNode<'_>, kind: NodeKind) -> NodeRef {
        let label = field(ts, "label").map(|l| self.identifier(l));
        self.node(kind, ts)
            .with(Field::Label, Slot::opt(label))
            .into_ref()
    }

    fn try_statement(&self, ts: TsNode<'_>) -> NodeRef {
        let Some(block) = field(ts, "body") else {
            return self.raw(ts);
        };
        let handler = field(ts, "handler").and_then(|clause| {
            let body = field(clause, "body")?;
            let param = field(clause, "parameter").map(|p| self.expression(p));
            Some(
                self.node(NodeKind::CatchClause, clause)
                    .with(Field::Param, Slot::opt(param))
                    .with(Field::Body, Slot::Node(self.block(body)))
                    .into_ref(),
            )
        });
        let finalizer = field(ts, "finalizer")
            .and_then(|clause| field(clause, "body"))
            .map(|body| self.block(body));
        self.node(NodeKind::TryStatement, ts)
            .with(Field::Block, Slot::Node(self.block(block)))
            .with(Field::Handler, Slot::opt(handler))
            .with(Field::Finalizer, Slot::opt(finalizer))
            .into_ref()
    }

    fn switch_statement(&self, ts: TsNode<'_>) -> NodeRef {
        let (Some(value), Some(body)) = (field(ts, "value"), field(ts, "body")) else {
            return self.raw(ts);
        };
        let cases = named_children(body)
            .into_iter()
            .map(|case| {
                let test = match case.kind() {
                    "switch_case" => field(case, "value").map(|v| self.expression(v)),
                    _ => None,
                };
                let consequent = fields(case, "body")
                    .into_iter()
                    .map(|stmt| self.statement(stmt))
                    .collect();
                self.node(NodeKind::SwitchCase, case)
                    .with(Field::Test, Slot::opt(test))
                    .with(Field::Consequent, Slot::List(consequent))
                    .into_ref()
            })
            .collect();
        self.node(NodeKind::SwitchStatement, ts)
            .with(Field::Discriminant, Slot::Node(self.expression(value)))
            .with(Field::Cases, Slot::List(cases))
            .into_ref()
    }

    fn identifier(&self, ts: TsNode<'_>) -> NodeRef {
        Node::identifier(self.text(ts))
            .with_span(self.span(ts))
            .into_ref()
    }

    fn literal(&self, ts: TsNode<'_>, value: Scalar) -> NodeRef {
        self.node(NodeKind::Literal, ts)
            .with(Field::Value, Slot::Scalar(value))
            .into_ref()
    }

    fn expression(&self, ts: TsNode<'_>) -> NodeRef {
        match ts.kind() {
            "parenthesized_expression" => match first_named(ts) {
                Some(inner) => self.expression(inner),
                None => self.raw(ts),
            },
            "identifier"
            | "property_identifier"
            | "shorthand_property_identifier"
            | "shorthand_property_identifier_pattern"
            | "statement_identifier"
            | "private_property_identifier"
            | "undefined" => self.identifier(ts),
            "this" => self.node(NodeKind::ThisExpression, ts).into_ref(),
            "number" => {
                let raw = self.text(ts);
                self.literal(
                    ts,
                    Scalar::Num {
                        value: parse_number(raw),
                        raw: raw.to_string(),
                    },
                )
            }
            "string" => self.literal(ts, Scalar::Str(decode_string(self.text(ts)))),
            "true" => self.literal(ts, Scalar::Bool(true)),
            "false" => self.literal(ts, Scalar::Bool(false)),
            "null" => self.literal(ts, Scalar::Null),
            "regex" => self.literal(ts, Scalar::Regex(self.text(ts).to_string())),
            "array" => self.array(ts),
            "object" => self.object(ts),
            "function_expression" | "function" | "generator_function" => {
                self.function(ts, NodeKind::FunctionExpression)
            }
            "arrow_function" => self.arrow(ts),
            "call_expression" => self.call(ts),
            "new_expression" => match field(ts, "constructor") {
                Some(callee) => {
                    let args = field(ts, "arguments")
                        .map(|a| self.arguments(a))
                        .unwrap_or_default();
                    self.node(NodeKind::NewExpression, ts)
                        .with(Field::Callee, Slot::Node(self.expression(callee)))
                        .with(Field::Arguments, Slot::List(args))
                        .into_ref()
                }
                None => self.raw(ts),
            },
            "member_expression" => match (field(ts, "object"), field(ts, "property")) {
                (Some(object), Some(property)) => self
                    .node(NodeKind::MemberExpression, ts)
                    .with(Field::Object, Slot::Node(self.expression(object)))
                    .with(Field::Property, Slot::Node(self.identifier(property)))
                    .with(Field::Computed, Slot::flag(false))
                    .with(
                        Field::Optional,
                        Slot::flag(ts.child_by_field_name("optional_chain").is_some()),
                    )
                    .into_ref(),
                _ => self.raw(ts),
            },
            "subscript_expression" => match (field(ts, "object"), field(ts, "index")) {
                (Some(object), Some(index)) => self
                    .node(NodeKind::MemberExpression, ts)
                    .with(Field::Object, Slot::Node(self.expression(object)))
                    .with(Field::Property, Slot::Node(self.expression(index)))
                    .with(Field::Computed, Slot::flag(true))
                    .with(
                        Field::Optional,
                        Slot::flag(ts.child_by_field_name("optional_chain").is_some()),
                    )
                    .into_ref(),
                _ => self.raw(ts),
            },
            "unary_expression" => {
                match (ts.child_by_field_name("operator"), field(ts, "argument")) {
                    (Some(op), Some(arg)) => self
                        .node(NodeKind::UnaryExpression, ts)
                        .with(Field::Operator, Slot::text(self.text(op)))
                        .with(Field::Argument, Slot::Node(self.expression(arg)))
                        .into_ref(),
                    _ => self.raw(ts),
                }
            }
            "update_expression" => {
                match (ts.child_by_field_name("operator"), field(ts, "argument")) {
                    (Some(op), Some(arg)) => self
                        .node(NodeKind::UpdateExpression, ts)
                        .with(Field::Operator, Slot::text(self.text(op)))
                        .with(Field::Argument, Slot::Node(self.expression(arg)))
                        .with(Field::Prefix, Slot::flag(op.start_byte() < arg.start_byte()))
                        .into_ref(),
                    _ => self.raw(ts),
                }
            }
            "binary_expression" => {
                let op = ts.child_by_field_name("operator").map(|op| self.text(op));
                let kind = match op {
                    Some("&&" | "||" | "??") => NodeKind::LogicalExpression,
                    _ => NodeKind::BinaryExpression,
                };
                self.binary(ts, kind, op)
            }
            "assignment_expression" => self.binary(ts, NodeKind::AssignmentExpression, Some("=")),
            "augmented_assignment_expression" => {
                let op = ts.child_by_field_name("operator").map(|op| self.text(op));
                self.binary(ts, NodeKind::AssignmentExpression, op)
            }
            "ternary_expression" => match (
                field(ts, "condition"),
                field(ts, "consequence"),
                field(ts, "alternative"),
            ) {
                (Some(test), Some(consequent), Some(alternate)) => self
                    .node(NodeKind::ConditionalExpression, ts)
                    .with(Field::Test, Slot::Node(self.expression(test)))
                    .with(Field::Consequent, Slot::Node(self.expression(consequent)))
                    .with(Field::Alternate, Slot::Node(self.expression(alternate)))
                    .into_ref(),
                _ => self.raw(ts),
            },
            "sequence_expression" => {
                let mut expressions = Vec::new();
                self.flatten_sequence(ts, &mut expressions);
                self.node(NodeKind::SequenceExpression, ts)
                    .with(Field::Expressions, Slot::List(expressions))
                    .into_ref()
            }
            "await_expression" => match first_named(ts) {
                Some(arg) => self
                    .node(NodeKind::AwaitExpression, ts)
                    .with(Field::Argument, Slot::Node(self.expression(arg)))
                    .into_ref(),
                None => self.raw(ts),
            },
            "yield_expression" => self
                .node(NodeKind::YieldExpression, ts)
                .with(
                    Field::Argument,
                    Slot::opt(first_named(ts).map(|arg| self.expression(arg))),
                )
                .with(Field::Delegate, Slot::flag(has_token(ts, "*")))
                .into_ref(),
            "spread_element" => self.wrapper(ts, NodeKind::SpreadElement),
            "rest_pattern" => self.wrapper(ts, NodeKind::RestElement),
            "assignment_pattern" => match (field(ts, "left"), field(ts, "right")) {
                (Some(left), Some(right)) => self
                    .node(NodeKind::AssignmentPattern, ts)
                    .with(Field::Left, Slot::Node(self.expression(left)))
                    .with(Field::Right, Slot::Node(self.expression(right)))
                    .into_ref(),
                _ => self.raw(ts),
            },
            _ => self.raw(ts),
        }
    }

    fn wrapper(&self, ts: TsNode<'_>, kind: NodeKind) -> NodeRef {
        match first_named(ts) {
            Some(arg) => self
                .node(kind, ts)
                .with(Field::Argument, Slot::Node(self.expression(arg)))
                .into_ref(),
            None => self.raw(ts),
        }
    }

    fn binary(&self, ts: TsNode<'_>, kind: NodeKind, op: Option<&str>) -> NodeRef {
        match (op, field(ts, "left"), field(ts, "right")) {
            (Some(op), Some(left), Some(right)) => self
                .node(kind, ts)
                .with(Field::Operator, Slot::text(op))
                .with(Field::Left, Slot::Node(self.expression(left)))
                .with(Field::Right, Slot::Node(self.expression(right)))
                .into_ref(),
            _ => self.raw(ts),
        }
    }

    fn flatten_sequence(&self, ts: TsNode<'_>, out: &mut Vec<NodeRef>) {
        for child in named_children(ts) {
            if child.kind() == "sequence_expression" {
                self.flatten_sequence(child, out);
            } else {
                out.push(self.expression(child));
            }
        }
    }

    fn call(&self, ts: TsNode<'_>) -> NodeRef {
        let (Some(callee), Some(args)) = (field(ts, "function"), field(ts, "arguments")) else {
            return self.raw(ts);
        };
        // Tagged templates have no argument list to match against.
        if args.kind() != "arguments" {
            return self.raw(ts);
        }
        self.node(NodeKind::CallExpression, ts)
            .with(Field::Callee, Slot::Node(self.expression(callee)))
            .with(Field::Arguments, Slot::List(self.arguments(args)))
            .with(
                Field::Optional,
                Slot::flag(ts.child_by_field_name("optional_chain").is_some()),
            )
            .into_ref()
    }

    fn arguments(&self, ts: TsNode<'_>) -> Vec<NodeRef> {
        named_children(ts)
            .into_iter()
            .map(|arg| self.expression(arg))
            .collect()
    }

    fn array(&self, ts: TsNode<'_>) -> NodeRef {
        let mut elements = Vec::new();
        let mut expecting = true;
        let mut cursor = ts.walk();
        for child in ts.children(&mut cursor) {
            if child.is_extra() {
                continue;
            }
            match child.kind() {
                "[" | "]" => {}
                "," => {
                    if expecting {
                        elements.push(self.node(NodeKind::Elision, child).into_ref());
                    }
                    expecting = true;
                }
                _ if child.is_named() => {
                    elements.push(self.expression(child));
                    expecting = false;
                }
                _ => {}
            }
        }
        self.node(NodeKind::ArrayExpression, ts)
            .with(Field::Elements, Slot::List(elements))
            .into_ref()
    }

    fn object(&self, ts: TsNode<'_>) -> NodeRef {
        let properties = named_children(ts)
            .into_iter()
            .map(|member| match member.kind() {
                "pair" => match (field(member, "key"), field(member, "value")) {
                    (Some(key), Some(value)) => {
                        let (key, computed) = self.property_key(key);
                        self.property(member, key, self.expression(value), "init", computed)
                            .with(Field::Shorthand, Slot::flag(false))
                            .with(Field::Method, Slot::flag(false))
                            .into_ref()
                    }
                    _ => self.raw(member),
                },
                "shorthand_property_identifier" => {
                    let name = self.identifier(member);
                    self.property(member, name.clone(), name, "init", false)
                        .with(Field::Shorthand, Slot::flag(true))
                        .with(Field::Method, Slot::flag(false))
                        .into_ref()
                }
                "method_definition" => match field(member, "name") {
                    Some(name) => {
                        let (key, computed) = self.property_key(name);
                        let kind = if has_token(member, "get") {
                            "get"
                        } else if has_token(member, "set") {
                            "set"
                        } else {
                            "init"
                        };
                        let value = self.function(member, NodeKind::FunctionExpression);
                        self.property(member, key, value, kind, computed)
                            .with(Field::Shorthand, Slot::flag(false))
                            .with(Field::Method, Slot::flag(kind == "init"))
                            .into_ref()
                    }
                    None => self.raw(member),
                },
                "spread_element" => self.wrapper(member, NodeKind::SpreadElement),
                _ => self.raw(member),
            })
            .collect();
        self.node(NodeKind::ObjectExpression, ts)
            .with(Field::Properties, Slot::List(properties))
            .into_ref()
    }

    fn property(
        &self,
        ts: TsNode<'_>,
        key: NodeRef,
        value: NodeRef,
        kind: &str,
        computed: bool,
    ) -> Node {
        self.node(NodeKind::Property, ts)
            .with(Field::Key, Slot::Node(key))
            .with(Field::Value, Slot::Node(value))
            .with(Field::Kind, Slot::text(kind))
            .with(Field::Computed, Slot::flag(computed))
    }

    fn property_key(&self, ts: TsNode<'_>) -> (NodeRef, bool) {
        match ts.kind() {
            "computed_property_name" => match first_named(ts) {
                Some(inner) => (self.expression(inner), true),
                None => (self.raw(ts), true),
            },
            _ => (self.expression(ts), false),
        }
    }
}

/// Named, non-comment children.
fn named_children<'t>(node: TsNode<'t>) -> Vec<TsNode<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

fn first_named<'t>(node: TsNode<'t>) -> Option<TsNode<'t>> {
    named_children(node).into_iter().next()
}

/// First named child carrying `name` as its field. Some grammar fields also
/// cover punctuation, which is skipped.
fn field<'t>(node: TsNode<'t>, name: &str) -> Option<TsNode<'t>> {
    fields(node, name).into_iter().next()
}

fn fields<'t>(node: TsNode<'t>, name: &str) -> Vec<TsNode<'t>> {
    let mut cursor = node.walk();
    node.children_by_field_name(name, &mut cursor)
        .filter(|child| child.is_named() && !child.is_extra())
        .collect()
}

fn has_token(node: TsNode<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token);
    found
}

/// Numeric value of a JavaScript number literal; `None` for BigInt.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != '_').collect();
    if cleaned.ends_with('n') {
        return None;
    }
    let lower = cleaned.to_ascii_lowercase();
    let radix = match lower.get(..2) {
        Some("0x") => 16,
        Some("0o") => 8,
        Some("0b") => 2,
        _ => return cleaned.parse::<f64>().ok(),
    };
    u64::from_str_radix(&lower[2..], radix).ok().map(|v| v as f64)
}

/// Resolve the escapes of a quoted string literal.
pub(crate) fn decode_string(raw: &str) -> String {
    let inner = if raw.len() >= 2 {
        &raw[1..raw.len() - 1]
    } else {
        raw
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            break;
        };
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' if !chars.peek().is_some_and(|c| c.is_ascii_digit()) => out.push('\0'),
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                push_code_point(&mut out, &hex);
            }
            'u' if chars.peek() == Some(&'{') => {
                chars.next();
                let hex: String = chars.by_ref().take_while(|c| *c != '}').collect();
                push_code_point(&mut out, &hex);
            }
            'u' => {
                let hex: String = chars.by_ref().take(4).collect();
                push_code_point(&mut out, &hex);
            }
            // Line continuation
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn push_code_point(out: &mut String, hex: &str) {
    match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
        Some(c) => out.push(c),
        None => out.push(char::REPLACEMENT_CHARACTER),
    }
}
