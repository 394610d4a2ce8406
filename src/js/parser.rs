use crate::ast::NodeRef;
use crate::js::errors::ParseError;
use crate::js::lower::lower_program;
use ast_grep_language::{LanguageExt, SupportLang};
use tree_sitter::{Parser, Tree};

/// Tree-sitter parser for JavaScript, producing lowered syntax trees.
pub struct JsParser {
    parser: Parser,
}

impl JsParser {
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        // Get the tree-sitter Language from ast-grep-language
        let ts_lang = SupportLang::JavaScript.get_ts_language();
        parser
            .set_language(&ts_lang)
            .map_err(|_| ParseError::LanguageSet)?;

        Ok(Self { parser })
    }

    /// Parse source code into a concrete tree-sitter tree.
    pub fn parse_tree(&mut self, source: &str) -> Result<Tree, ParseError> {
        self.parser
            .parse(source, None)
            .ok_or(ParseError::ParseFailed)
    }

    /// Parse source code into a `Program` node.
    ///
    /// Fails at the first syntax problem tree-sitter reports.
    pub fn parse(&mut self, source: &str) -> Result<NodeRef, ParseError> {
        let tree = self.parse_tree(source)?;
        if let Some(issue) = syntax_issues(&tree, source).into_iter().next() {
            return Err(ParseError::Syntax {
                index: issue.index,
                line: issue.line,
                column: issue.column,
                message: issue.message,
            });
        }
        Ok(lower_program(tree.root_node(), source))
    }
}

/// A syntax problem found in the concrete tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxIssue {
    pub index: usize,
    /// 1-based
    pub line: usize,
    /// 1-based
    pub column: usize,
    pub message: String,
}

/// Collect ERROR and MISSING nodes in document order.
pub fn syntax_issues(tree: &Tree, source: &str) -> Vec<SyntaxIssue> {
    let root = tree.root_node();
    let mut issues = Vec::new();
    if root.has_error() {
        collect_issues(root, source, &mut issues);
    }
    issues
}

fn collect_issues(node: tree_sitter::Node<'_>, source: &str, issues: &mut Vec<SyntaxIssue>) {
    if node.is_error() || node.is_missing() {
        let at_end = node.start_byte() >= source.trim_end().len();
        let message = if at_end {
            "Unexpected end of input".to_string()
        } else if node.is_missing() {
            format!("Missing '{}'", node.kind())
        } else {
            let mut cursor = node.walk();
            while cursor.goto_first_child() {}
            let token = &source[cursor.node().byte_range()];
            format!("Unexpected token {}", token.trim())
        };
        let point = node.start_position();
        issues.push(SyntaxIssue {
            index: node.start_byte(),
            line: point.row + 1,
            column: point.column + 1,
            message,
        });
        return;
    }

    if !node.has_error() {
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_issues(child, source, issues);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Field, NodeKind};

    #[test]
    fn parse_valid_javascript() {
        let mut parser = JsParser::new().unwrap();
        let program = parser.parse("var a = 1; foo(a);").unwrap();

        assert_eq!(program.kind(), NodeKind::Program);
        assert_eq!(program.list(Field::Body).len(), 2);
    }

    #[test]
    fn parse_invalid_javascript() {
        let mut parser = JsParser::new().unwrap();
        let err = parser.parse("var = ;").unwrap_err();

        assert!(matches!(err, ParseError::Syntax { line: 1, .. }));
    }

    #[test]
    fn syntax_issues_empty_for_clean_source() {
        let mut parser = JsParser::new().unwrap();
        let source = "function f() { return 1; }";
        let tree = parser.parse_tree(source).unwrap();

        assert!(syntax_issues(&tree, source).is_empty());
    }

    #[test]
    fn unterminated_call_reports_issue() {
        let mut parser = JsParser::new().unwrap();
        let source = "foo(1, 2";
        let tree = parser.parse_tree(source).unwrap();

        assert!(!syntax_issues(&tree, source).is_empty());
    }
}
