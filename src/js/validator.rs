use crate::ast::{Field, Node, NodeKind, NodeRef, Slot};
use crate::js::errors::ParseError;
use crate::js::lower::lower_program;
use crate::js::parser::{syntax_issues, JsParser};
use serde::Serialize;

/// A problem in the input program. Diagnostics are data, not failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Byte offset
    pub index: usize,
    /// 1-based line
    pub line_number: usize,
    /// 1-based column
    pub column: usize,
    pub description: String,
}

/// Report syntax errors, or early errors when the syntax is clean.
///
/// Only parser initialization can fail; problems in `source` are always
/// returned as diagnostics.
pub fn validate_source(parser: &mut JsParser, source: &str) -> Result<Vec<Diagnostic>, ParseError> {
    let tree = parser.parse_tree(source)?;
    let issues = syntax_issues(&tree, source);
    if !issues.is_empty() {
        return Ok(issues
            .into_iter()
            .map(|issue| Diagnostic {
                index: issue.index,
                line_number: issue.line,
                column: issue.column,
                description: issue.message,
            })
            .collect());
    }

    let program = lower_program(tree.root_node(), source);
    Ok(early_errors(&program))
}

/// Context-dependent errors a parser for the full grammar would reject:
/// jumps and returns outside of what may contain them.
pub fn early_errors(program: &NodeRef) -> Vec<Diagnostic> {
    let mut checker = EarlyErrors::default();
    checker.visit(program);
    checker.diagnostics
}

#[derive(Default)]
struct EarlyErrors {
    diagnostics: Vec<Diagnostic>,
    in_function: bool,
    loop_depth: usize,
    switch_depth: usize,
    labels: Vec<String>,
}

impl EarlyErrors {
    fn report(&mut self, node: &Node, keyword: &str, description: String) {
        let span = node.span();
        self.diagnostics.push(Diagnostic {
            index: span.start + keyword.len(),
            line_number: span.line,
            column: span.column + keyword.len() + 1,
            description,
        });
    }

    fn visit(&mut self, node: &Node) {
        match node.kind() {
            NodeKind::FunctionDeclaration
            | NodeKind::FunctionExpression
            | NodeKind::ArrowFunctionExpression => {
                // A function body starts a fresh jump context.
                let saved = (
                    self.in_function,
                    self.loop_depth,
                    self.switch_depth,
                    std::mem::take(&mut self.labels),
                );
                self.in_function = true;
                self.loop_depth = 0;
                self.switch_depth = 0;
                self.visit_children(node);
                (self.in_function, self.loop_depth, self.switch_depth, self.labels) = saved;
            }
            NodeKind::ReturnStatement => {
                if !self.in_function {
                    self.report(node, "return", "Illegal return statement".to_string());
                }
                self.visit_children(node);
            }
            NodeKind::BreakStatement => match node.child(Field::Label).and_then(|l| l.name()) {
                Some(label) if !self.labels.iter().any(|l| l == label) => {
                    self.report(node, "break", format!("Undefined label '{label}'"));
                }
                None if self.loop_depth == 0 && self.switch_depth == 0 => {
                    self.report(node, "break", "Illegal break statement".to_string());
                }
                _ => {}
            },
            NodeKind::ContinueStatement => {
                match node.child(Field::Label).and_then(|l| l.name()) {
                    Some(label) if !self.labels.iter().any(|l| l == label) => {
                        self.report(node, "continue", format!("Undefined label '{label}'"));
                    }
                    _ if self.loop_depth == 0 => {
                        self.report(
                            node,
                            "continue",
                            "Illegal continue statement".to_string(),
                        );
                    }
                    _ => {}
                }
            }
            NodeKind::LabeledStatement => {
                let label = node
                    .child(Field::Label)
                    .and_then(|l| l.name())
                    .unwrap_or_default()
                    .to_string();
                self.labels.push(label);
                self.visit_children(node);
                self.labels.pop();
            }
            NodeKind::ForStatement
            | NodeKind::ForInStatement
            | NodeKind::ForOfStatement
            | NodeKind::WhileStatement
            | NodeKind::DoWhileStatement => {
                self.loop_depth += 1;
                self.visit_children(node);
                self.loop_depth -= 1;
            }
            NodeKind::SwitchStatement => {
                self.switch_depth += 1;
                self.visit_children(node);
                self.switch_depth -= 1;
            }
            _ => self.visit_children(node),
        }
    }

    fn visit_children(&mut self, node: &Node) {
        for (_, slot) in node.slots() {
            match slot {
                Slot::Node(child) => self.visit(child),
                Slot::List(list) => list.iter().for_each(|child| self.visit(child)),
                Slot::Absent | Slot::Scalar(_) => {}
            }
        }
    }
}
