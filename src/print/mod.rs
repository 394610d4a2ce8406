//! Pretty printer for lowered syntax trees.
//!
//! Output is a pure function of the tree and [`PrintOptions`]: comments and
//! original layout are not preserved, parentheses are re-derived from
//! operator precedence.

pub mod options;
pub mod precedence;

pub use options::{PrintOptions, QuoteStyle};

use crate::ast::{Field, Node, NodeKind, NodeRef, Scalar};
use precedence as prec;

pub struct Printer {
    options: PrintOptions,
}

impl Printer {
    pub fn new(options: PrintOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PrintOptions {
        &self.options
    }

    /// Print a program, a statement or an expression.
    pub fn print(&self, node: &Node) -> String {
        let mut writer = Writer {
            out: String::new(),
            options: &self.options,
            level: 0,
        };
        match node.kind() {
            NodeKind::Program => writer.program(node),
            kind if kind.is_statement() && kind != NodeKind::Raw => writer.statement(node),
            _ => writer.expression(node, prec::SEQUENCE),
        }
        writer.out
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintOptions::default())
    }
}

struct Writer<'o> {
    out: String,
    options: &'o PrintOptions,
    level: usize,
}

impl Writer<'_> {
    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        let indentation = self.options.indentation(self.level);
        self.out.push_str(&indentation);
    }

    fn program(&mut self, node: &Node) {
        for (i, stmt) in node.list(Field::Body).iter().enumerate() {
            if i > 0 {
                self.out.push('\n');
            }
            self.statement(stmt);
        }
    }

    fn block(&mut self, node: &Node) {
        self.push("{");
        self.level += 1;
        for stmt in node.list(Field::Body) {
            self.newline();
            self.statement(stmt);
        }
        self.level -= 1;
        self.newline();
        self.push("}");
    }

    /// Body of `if`/loops: blocks stay on the same line, anything else moves
    /// one level deeper on the next line.
    fn substatement(&mut self, node: &Node) {
        if node.kind() == NodeKind::BlockStatement {
            self.push(" ");
            self.block(node);
        } else {
            self.level += 1;
            self.newline();
            self.statement(node);
            self.level -= 1;
        }
    }

    fn statement(&mut self, node: &Node) {
        match node.kind() {
            NodeKind::ExpressionStatement => {
                let start = self.out.len();
                if let Some(expr) = node.child(Field::Expression) {
                    self.expression(expr, prec::SEQUENCE);
                }
                if starts_ambiguously(&self.out[start..]) {
                    self.out.insert(start, '(');
                    self.push(")");
                }
                self.push(";");
            }
            NodeKind::BlockStatement => self.block(node),
            NodeKind::EmptyStatement => self.push(";"),
            NodeKind::DebuggerStatement => self.push("debugger;"),
            NodeKind::VariableDeclaration => {
                self.declaration(node);
                self.push(";");
            }
            NodeKind::FunctionDeclaration => self.function(node, false),
            NodeKind::ReturnStatement => {
                self.push("return");
                if let Some(arg) = node.child(Field::Argument) {
                    self.push(" ");
                    self.expression(arg, prec::SEQUENCE);
                }
                self.push(";");
            }
            NodeKind::ThrowStatement => {
                self.push("throw ");
                if let Some(arg) = node.child(Field::Argument) {
                    self.expression(arg, prec::SEQUENCE);
                }
                self.push(";");
            }
            NodeKind::IfStatement => self.if_statement(node),
            NodeKind::ForStatement => {
                self.push("for (");
                if let Some(init) = node.child(Field::Init) {
                    self.for_head(init);
                }
                self.push(";");
                if let Some(test) = node.child(Field::Test) {
                    self.push(" ");
                    self.expression(test, prec::SEQUENCE);
                }
                self.push(";");
                if let Some(update) = node.child(Field::Update) {
                    self.push(" ");
                    self.expression(update, prec::SEQUENCE);
                }
                self.push(")");
                self.body(node);
            }
            NodeKind::ForInStatement | NodeKind::ForOfStatement => {
                self.push("for (");
                if let Some(left) = node.child(Field::Left) {
                    self.for_head(left);
                }
                self.push(if node.kind() == NodeKind::ForInStatement {
                    " in "
                } else {
                    " of "
                });
                if let Some(right) = node.child(Field::Right) {
                    self.expression(right, prec::SEQUENCE);
                }
                self.push(")");
                self.body(node);
            }
            NodeKind::WhileStatement => {
                self.push("while (");
                if let Some(test) = node.child(Field::Test) {
                    self.expression(test, prec::SEQUENCE);
                }
                self.push(")");
                self.body(node);
            }
            NodeKind::DoWhileStatement => {
                self.push("do");
                let body = node.child(Field::Body);
                if let Some(body) = body {
                    self.substatement(body);
                }
                if body.is_some_and(|b| b.kind() == NodeKind::BlockStatement) {
                    self.push(" ");
                } else {
                    self.newline();
                }
                self.push("while (");
                if let Some(test) = node.child(Field::Test) {
                    self.expression(test, prec::SEQUENCE);
                }
                self.push(");");
            }
            NodeKind::BreakStatement | NodeKind::ContinueStatement => {
                self.push(if node.kind() == NodeKind::BreakStatement {
                    "break"
                } else {
                    "continue"
                });
                if let Some(label) = node.child(Field::Label) {
                    self.push(" ");
                    self.expression(label, prec::PRIMARY);
                }
                self.push(";");
            }
            NodeKind::TryStatement => {
                self.push("try ");
                if let Some(block) = node.child(Field::Block) {
                    self.block(block);
                }
                if let Some(handler) = node.child(Field::Handler) {
                    self.push(" catch");
                    if let Some(param) = handler.child(Field::Param) {
                        self.push(" (");
                        self.expression(param, prec::ASSIGNMENT);
                        self.push(")");
                    }
                    if let Some(body) = handler.child(Field::Body) {
                        self.push(" ");
                        self.block(body);
                    }
                }
                if let Some(finalizer) = node.child(Field::Finalizer) {
                    self.push(" finally ");
                    self.block(finalizer);
                }
            }
            NodeKind::SwitchStatement => {
                self.push("switch (");
                if let Some(discriminant) = node.child(Field::Discriminant) {
                    self.expression(discriminant, prec::SEQUENCE);
                }
                self.push(") {");
                self.level += 1;
                for case in node.list(Field::Cases) {
                    self.newline();
                    match case.child(Field::Test) {
                        Some(test) => {
                            self.push("case ");
                            self.expression(test, prec::SEQUENCE);
                            self.push(":");
                        }
                        None => self.push("default:"),
                    }
                    self.level += 1;
                    for stmt in case.list(Field::Consequent) {
                        self.newline();
                        self.statement(stmt);
                    }
                    self.level -= 1;
                }
                self.level -= 1;
                self.newline();
                self.push("}");
            }
            NodeKind::LabeledStatement => {
                if let Some(label) = node.child(Field::Label) {
                    self.expression(label, prec::PRIMARY);
                }
                self.push(": ");
                if let Some(body) = node.child(Field::Body) {
                    self.statement(body);
                }
            }
            NodeKind::Raw => self.raw(node),
            // Expression-level nodes can reach statement position through a
            // wildcard bound in one context and used in another.
            kind if kind.is_expression() || kind == NodeKind::Property => {
                self.expression(node, prec::SEQUENCE);
                self.push(";");
            }
            _ => self.expression_inner(node, prec::PRIMARY),
        }
    }

    fn body(&mut self, node: &Node) {
        if let Some(body) = node.child(Field::Body) {
            self.substatement(body);
        }
    }

    fn if_statement(&mut self, node: &Node) {
        self.push("if (");
        if let Some(test) = node.child(Field::Test) {
            self.expression(test, prec::SEQUENCE);
        }
        self.push(")");
        let consequent = node.child(Field::Consequent);
        if let Some(consequent) = consequent {
            self.substatement(consequent);
        }
        if let Some(alternate) = node.child(Field::Alternate) {
            if consequent.is_some_and(|c| c.kind() == NodeKind::BlockStatement) {
                self.push(" else");
            } else {
                self.newline();
                self.push("else");
            }
            if alternate.kind() == NodeKind::IfStatement {
                self.push(" ");
                self.statement(alternate);
            } else {
                self.substatement(alternate);
            }
        }
    }

    /// Initializer of a `for` head: declarations print without `;`.
    fn for_head(&mut self, node: &Node) {
        if node.kind() == NodeKind::VariableDeclaration {
            self.declaration(node);
        } else {
            self.expression(node, prec::SEQUENCE);
        }
    }

    fn declaration(&mut self, node: &Node) {
        self.push(node.text(Field::Kind).unwrap_or("var"));
        self.push(" ");
        for (i, declarator) in node.list(Field::Declarations).iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            if declarator.kind() == NodeKind::VariableDeclarator {
                self.declarator(declarator);
            } else {
                self.expression(declarator, prec::ASSIGNMENT);
            }
        }
    }

    fn declarator(&mut self, node: &Node) {
        if let Some(id) = node.child(Field::Id) {
            self.expression(id, prec::ASSIGNMENT);
        }
        if let Some(init) = node.child(Field::Init) {
            self.push(" = ");
            self.expression(init, prec::ASSIGNMENT);
        }
    }

    fn function(&mut self, node: &Node, is_expression: bool) {
        if node.flag(Field::Async) {
            self.push("async ");
        }
        self.push("function");
        if node.flag(Field::Generator) {
            self.push("*");
        }
        match node.child(Field::Id) {
            Some(id) => {
                self.push(" ");
                self.expression(id, prec::PRIMARY);
            }
            None if is_expression && self.options.function_space => self.push(" "),
            None => {}
        }
        self.params(node);
        self.push(" ");
        if let Some(body) = node.child(Field::Body) {
            self.block(body);
        }
    }

    fn params(&mut self, node: &Node) {
        self.push("(");
        self.comma_list(node.list(Field::Params), prec::ASSIGNMENT);
        self.push(")");
    }

    fn comma_list(&mut self, items: &[NodeRef], min: u8) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.expression(item, min);
        }
    }

    fn expression(&mut self, node: &Node, min: u8) {
        let own = prec::of(node);
        let wrap = own < min;
        if wrap {
            self.push("(");
        }
        self.expression_inner(node, own);
        if wrap {
            self.push(")");
        }
    }

    fn expression_inner(&mut self, node: &Node, own: u8) {
        match node.kind() {
            NodeKind::Identifier => self.push(node.name().unwrap_or_default()),
            NodeKind::Literal => self.literal(node),
            NodeKind::ThisExpression => self.push("this"),
            NodeKind::ArrayExpression => {
                let elements = node.list(Field::Elements);
                self.push("[");
                self.comma_list(elements, prec::ASSIGNMENT);
                if elements
                    .last()
                    .is_some_and(|e| e.kind() == NodeKind::Elision)
                {
                    self.push(",");
                }
                self.push("]");
            }
            NodeKind::Elision => {}
            NodeKind::ObjectExpression => {
                let properties = node.list(Field::Properties);
                if properties.is_empty() {
                    self.push("{}");
                    return;
                }
                self.push("{");
                self.level += 1;
                for (i, property) in properties.iter().enumerate() {
                    self.newline();
                    self.expression(property, prec::ASSIGNMENT);
                    if i + 1 < properties.len() {
                        self.push(",");
                    }
                }
                self.level -= 1;
                self.newline();
                self.push("}");
            }
            NodeKind::Property => self.property(node),
            NodeKind::FunctionExpression => self.function(node, true),
            NodeKind::ArrowFunctionExpression => {
                if node.flag(Field::Async) {
                    self.push("async ");
                }
                match node.list(Field::Params) {
                    [single] if single.kind() == NodeKind::Identifier => {
                        self.expression(single, prec::PRIMARY)
                    }
                    _ => self.params(node),
                }
                self.push(" => ");
                match node.child(Field::Body) {
                    Some(body) if body.kind() == NodeKind::BlockStatement => self.block(body),
                    Some(body) if body.kind() == NodeKind::ObjectExpression => {
                        self.push("(");
                        self.expression(body, prec::ASSIGNMENT);
                        self.push(")");
                    }
                    Some(body) => self.expression(body, prec::ASSIGNMENT),
                    None => self.push("{}"),
                }
            }
            NodeKind::SpreadElement | NodeKind::RestElement => {
                self.push("...");
                if let Some(arg) = node.child(Field::Argument) {
                    self.expression(arg, prec::ASSIGNMENT);
                }
            }
            NodeKind::AssignmentPattern => {
                if let Some(left) = node.child(Field::Left) {
                    self.expression(left, prec::CALL);
                }
                self.push(" = ");
                if let Some(right) = node.child(Field::Right) {
                    self.expression(right, prec::ASSIGNMENT);
                }
            }
            NodeKind::MemberExpression => {
                if let Some(object) = node.child(Field::Object) {
                    if is_bare_integer(object) {
                        self.push("(");
                        self.expression(object, prec::CALL);
                        self.push(")");
                    } else {
                        self.expression(object, prec::CALL);
                    }
                }
                let optional = node.flag(Field::Optional);
                if let Some(property) = node.child(Field::Property) {
                    if node.flag(Field::Computed) {
                        self.push(if optional { "?.[" } else { "[" });
                        self.expression(property, prec::SEQUENCE);
                        self.push("]");
                    } else {
                        self.push(if optional { "?." } else { "." });
                        self.expression(property, prec::PRIMARY);
                    }
                }
            }
            NodeKind::CallExpression => {
                if let Some(callee) = node.child(Field::Callee) {
                    self.expression(callee, prec::CALL);
                }
                if node.flag(Field::Optional) {
                    self.push("?.");
                }
                self.push("(");
                self.comma_list(node.list(Field::Arguments), prec::ASSIGNMENT);
                self.push(")");
            }
            NodeKind::NewExpression => {
                self.push("new ");
                if let Some(callee) = node.child(Field::Callee) {
                    if contains_call(callee) {
                        self.push("(");
                        self.expression(callee, prec::SEQUENCE);
                        self.push(")");
                    } else {
                        self.expression(callee, prec::NEW);
                    }
                }
                self.push("(");
                self.comma_list(node.list(Field::Arguments), prec::ASSIGNMENT);
                self.push(")");
            }
            NodeKind::UnaryExpression => {
                let op = node.text(Field::Operator).unwrap_or_default();
                self.push(op);
                let word = op.chars().all(|c| c.is_ascii_alphabetic());
                if word {
                    self.push(" ");
                }
                if let Some(arg) = node.child(Field::Argument) {
                    let start = self.out.len();
                    self.expression(arg, prec::UNARY);
                    // `- -x` and `+ ++x` must not fuse into another operator.
                    let fuses = !word
                        && matches!(op, "+" | "-")
                        && self.out[start..].starts_with(op);
                    if fuses {
                        self.out.insert(start, ' ');
                    }
                }
            }
            NodeKind::UpdateExpression => {
                let op = node.text(Field::Operator).unwrap_or_default();
                if node.flag(Field::Prefix) {
                    self.push(op);
                    if let Some(arg) = node.child(Field::Argument) {
                        self.expression(arg, prec::UNARY);
                    }
                } else {
                    if let Some(arg) = node.child(Field::Argument) {
                        self.expression(arg, prec::POSTFIX);
                    }
                    self.push(op);
                }
            }
            NodeKind::BinaryExpression | NodeKind::LogicalExpression => {
                let op = node.text(Field::Operator).unwrap_or_default();
                // `**` groups to the right, everything else to the left.
                // A unary left operand of `**` is a syntax error without parens.
                let (left_min, right_min) = if op == "**" {
                    (prec::POSTFIX, own)
                } else {
                    (own, own + 1)
                };
                if let Some(left) = node.child(Field::Left) {
                    self.expression(left, operand_min(op, left, left_min));
                }
                self.push(" ");
                self.push(op);
                self.push(" ");
                if let Some(right) = node.child(Field::Right) {
                    self.expression(right, operand_min(op, right, right_min));
                }
            }
            NodeKind::AssignmentExpression => {
                if let Some(left) = node.child(Field::Left) {
                    self.expression(left, prec::CALL);
                }
                self.push(" ");
                self.push(node.text(Field::Operator).unwrap_or("="));
                self.push(" ");
                if let Some(right) = node.child(Field::Right) {
                    self.expression(right, prec::ASSIGNMENT);
                }
            }
            NodeKind::ConditionalExpression => {
                if let Some(test) = node.child(Field::Test) {
                    self.expression(test, prec::LOGICAL_OR);
                }
                self.push(" ? ");
                if let Some(consequent) = node.child(Field::Consequent) {
                    self.expression(consequent, prec::ASSIGNMENT);
                }
                self.push(" : ");
                if let Some(alternate) = node.child(Field::Alternate) {
                    self.expression(alternate, prec::ASSIGNMENT);
                }
            }
            NodeKind::SequenceExpression => {
                self.comma_list(node.list(Field::Expressions), prec::ASSIGNMENT)
            }
            NodeKind::AwaitExpression => {
                self.push("await ");
                if let Some(arg) = node.child(Field::Argument) {
                    self.expression(arg, prec::UNARY);
                }
            }
            NodeKind::YieldExpression => {
                self.push("yield");
                if node.flag(Field::Delegate) {
                    self.push("*");
                }
                if let Some(arg) = node.child(Field::Argument) {
                    self.push(" ");
                    self.expression(arg, prec::ASSIGNMENT);
                }
            }
            NodeKind::VariableDeclarator => self.declarator(node),
            NodeKind::Raw => self.raw(node),
            // A statement bound by a wildcard and reused in expression
            // position prints as itself.
            kind if kind.is_statement() => self.statement(node),
            _ => {}
        }
    }

    fn property(&mut self, node: &Node) {
        let kind = node.text(Field::Kind).unwrap_or("init");
        let value = node.child(Field::Value);
        // Shorthand survives only while the value is still the key's name.
        let key_name = node.child(Field::Key).and_then(|key| key.name());
        if let Some(value) = value.filter(|v| node.flag(Field::Shorthand) && v.name() == key_name)
        {
            self.expression(value, prec::ASSIGNMENT);
            return;
        }
        let method = node.flag(Field::Method) || kind != "init";
        match value {
            Some(function) if method && function.kind() == NodeKind::FunctionExpression => {
                if kind != "init" {
                    self.push(kind);
                    self.push(" ");
                }
                if function.flag(Field::Async) {
                    self.push("async ");
                }
                if function.flag(Field::Generator) {
                    self.push("*");
                }
                self.property_key(node);
                self.params(function);
                self.push(" ");
                if let Some(body) = function.child(Field::Body) {
                    self.block(body);
                }
            }
            _ => {
                self.property_key(node);
                self.push(": ");
                if let Some(value) = value {
                    self.expression(value, prec::ASSIGNMENT);
                }
            }
        }
    }

    fn property_key(&mut self, node: &Node) {
        let Some(key) = node.child(Field::Key) else {
            return;
        };
        if node.flag(Field::Computed) {
            self.push("[");
            self.expression(key, prec::ASSIGNMENT);
            self.push("]");
        } else {
            self.expression(key, prec::PRIMARY);
        }
    }

    fn literal(&mut self, node: &Node) {
        match node.scalar(Field::Value) {
            Some(Scalar::Str(value)) => {
                let quoted = quote(value, self.options.quotes);
                self.push(&quoted);
            }
            Some(Scalar::Num { raw, .. }) => self.push(raw),
            Some(Scalar::Bool(b)) => self.push(if *b { "true" } else { "false" }),
            Some(Scalar::Null) | None => self.push("null"),
            Some(Scalar::Regex(raw) | Scalar::Text(raw)) => self.push(raw),
        }
    }

    fn raw(&mut self, node: &Node) {
        self.push(node.text(Field::Text).unwrap_or_default());
    }
}

/// Expression statements may not begin with `{` or `function`.
fn starts_ambiguously(text: &str) -> bool {
    if text.starts_with('{') {
        return true;
    }
    ["function", "class"].iter().any(|keyword| {
        text.strip_prefix(keyword)
            .is_some_and(|rest| !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_' || c == '$'))
    })
}

fn is_bare_integer(node: &Node) -> bool {
    match node.scalar(Field::Value) {
        Some(Scalar::Num { raw, .. }) if node.kind() == NodeKind::Literal => {
            raw.chars().all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

/// Whether a `new` callee's member chain contains a call, which would
/// otherwise be taken as the `new` arguments.
fn contains_call(node: &Node) -> bool {
    match node.kind() {
        NodeKind::CallExpression => true,
        NodeKind::MemberExpression => node.child(Field::Object).is_some_and(|o| contains_call(o)),
        _ => false,
    }
}

/// `??` never mixes with `||` or `&&` without parentheses.
fn operand_min(op: &str, operand: &Node, min: u8) -> u8 {
    let inner = match operand.kind() {
        NodeKind::LogicalExpression => operand.text(Field::Operator).unwrap_or_default(),
        _ => return min,
    };
    let mixes = match op {
        "??" => matches!(inner, "||" | "&&"),
        "||" | "&&" => inner == "??",
        _ => false,
    };
    if mixes {
        prec::PRIMARY
    } else {
        min
    }
}

/// Quote a string value with the given style.
pub fn quote(value: &str, style: QuoteStyle) -> String {
    let q = style.char();
    let mut out = String::with_capacity(value.len() + 2);
    out.push(q);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\u{b}' => out.push_str("\\v"),
            '\0' => out.push_str("\\0"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c == q => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(q);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::parse;

    fn reprint(source: &str, options: PrintOptions) -> String {
        Printer::new(options).print(&parse(source).unwrap())
    }

    #[test]
    fn formats_function_expression_in_declaration() {
        let js = "var func = function(test){console.log( test );};";
        assert_eq!(
            reprint(js, PrintOptions::default()),
            "var func = function(test) {\n  console.log(test);\n};"
        );
    }

    #[test]
    fn rewrite_style_spaces_anonymous_functions() {
        assert_eq!(
            reprint("callMe(function(a, b) {})", PrintOptions::rewrite()),
            "callMe(function (a, b) {\n});"
        );
    }

    #[test]
    fn nested_blocks_indent() {
        assert_eq!(
            reprint(
                "function test() { var myA = 1; if (myA) { go(); } }",
                PrintOptions::rewrite()
            ),
            "function test() {\n    var myA = 1;\n    if (myA) {\n        go();\n    }\n}"
        );
    }

    #[test]
    fn strings_are_requoted() {
        assert_eq!(
            reprint(r#"x["my_key"]"#, PrintOptions::default()),
            "x['my_key'];"
        );
        let double = PrintOptions {
            quotes: QuoteStyle::Double,
            ..PrintOptions::default()
        };
        assert_eq!(reprint(r#"say('it\'s')"#, double), r#"say("it's");"#);
        assert_eq!(quote("it's", QuoteStyle::Single), r"'it\'s'");
    }

    #[test]
    fn parenthesizes_by_precedence() {
        assert_eq!(
            reprint("(a + b) * c; a + b * c; a - (b - c);", PrintOptions::default()),
            "(a + b) * c;\na + b * c;\na - (b - c);"
        );
        assert_eq!(reprint("(a, b) ? c : d", PrintOptions::default()), "(a, b) ? c : d;");
        assert_eq!(reprint("new (foo())()", PrintOptions::default()), "new (foo())();");
    }

    #[test]
    fn wraps_leading_function_expression_statement() {
        assert_eq!(
            reprint("(function () {})()", PrintOptions::default()),
            "(function() {\n}());"
        );
    }

    #[test]
    fn control_flow_layout() {
        assert_eq!(
            reprint("if (a) b(); else { c(); }", PrintOptions::default()),
            "if (a)\n  b();\nelse {\n  c();\n}"
        );
        assert_eq!(
            reprint("for (var i = 0; i < n; i++) {}", PrintOptions::default()),
            "for (var i = 0; i < n; i++) {\n}"
        );
        assert_eq!(
            reprint("switch (x) { case 1: y(); break; default: z(); }", PrintOptions::default()),
            "switch (x) {\n  case 1:\n    y();\n    break;\n  default:\n    z();\n}"
        );
    }

    #[test]
    fn objects_print_one_property_per_line() {
        assert_eq!(
            reprint("x = {a: 1, b, get c() { return 2; }}", PrintOptions::default()),
            "x = {\n  a: 1,\n  b,\n  get c() {\n    return 2;\n  }\n};"
        );
        assert_eq!(reprint("x = {}", PrintOptions::default()), "x = {};");
    }

    #[test]
    fn unary_operators_do_not_fuse() {
        assert_eq!(reprint("- -x; typeof y; !z", PrintOptions::default()), "- -x;\ntypeof y;\n!z;");
    }

    #[test]
    fn arrow_functions() {
        assert_eq!(
            reprint("f(a => a + 1, (b, c) => ({b}))", PrintOptions::default()),
            "f(a => a + 1, (b, c) => ({\n  b\n}));"
        );
    }

    #[test]
    fn exponent_keeps_unary_left_operand_grouped() {
        let options = PrintOptions::default;
        assert_eq!(reprint("x = (-1) ** 2;", options()), "x = (-1) ** 2;");
        assert_eq!(reprint("x = (++i) ** 2;", options()), "x = (++i) ** 2;");
        assert_eq!(reprint("x = i++ ** 2;", options()), "x = i++ ** 2;");
        assert_eq!(reprint("x = 2 ** -1;", options()), "x = 2 ** -1;");
        assert_eq!(
            reprint("async function f() { x = (await y) ** 2; }", options()),
            "async function f() {\n  x = (await y) ** 2;\n}"
        );
    }

    #[test]
    fn nullish_never_mixes_with_logical_operators() {
        let options = PrintOptions::default;
        assert_eq!(reprint("x = (a || b) ?? c;", options()), "x = (a || b) ?? c;");
        assert_eq!(reprint("x = a ?? (b && c);", options()), "x = a ?? (b && c);");
        assert_eq!(reprint("x = (a ?? b) || c;", options()), "x = (a ?? b) || c;");
        assert_eq!(reprint("x = a && (b ?? c);", options()), "x = a && (b ?? c);");
        assert_eq!(reprint("x = a ?? b ?? c;", options()), "x = a ?? b ?? c;");
    }
}
