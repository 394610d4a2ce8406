use crate::ast::{Field, NodeKind, NodeRef};
use crate::pool;
use crate::rule::errors::{CompileError, Side};
use crate::rule::wildcard::{referenced_names, WildcardSet};
use std::str::FromStr;
use tracing::debug;

const DELIMITER: &str = "->";

/// A parsed rule half.
#[derive(Debug, Clone)]
pub enum Fragment {
    /// A lone expression, matched wherever an expression of its kind occurs
    Expression(NodeRef),
    /// One or more statements, matched as a contiguous run
    Statements(Vec<NodeRef>),
}

impl Fragment {
    /// Parse `text` and decide its form from its own syntax: exactly one
    /// expression statement without a trailing `;` is an expression,
    /// anything else is a statement sequence.
    pub fn parse(text: &str, side: Side) -> Result<Self, CompileError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CompileError::EmptyFragment { side });
        }
        let program =
            pool::parse(trimmed).map_err(|source| CompileError::Fragment { side, source })?;
        let body = program.list(Field::Body);
        match body {
            [] => Err(CompileError::EmptyFragment { side }),
            [only]
                if only.kind() == NodeKind::ExpressionStatement && !trimmed.ends_with(';') =>
            {
                match only.child(Field::Expression) {
                    Some(expr) => Ok(Fragment::Expression(expr.clone())),
                    None => Ok(Fragment::Statements(body.to_vec())),
                }
            }
            _ => Ok(Fragment::Statements(body.to_vec())),
        }
    }

    pub fn nodes(&self) -> &[NodeRef] {
        match self {
            Fragment::Expression(node) => std::slice::from_ref(node),
            Fragment::Statements(nodes) => nodes,
        }
    }

    pub fn is_expression(&self) -> bool {
        matches!(self, Fragment::Expression(_))
    }
}

/// A compiled search pattern: its fragment plus the wildcards it declares.
#[derive(Debug, Clone)]
pub struct Pattern {
    fragment: Fragment,
    wildcards: WildcardSet,
}

impl Pattern {
    pub fn compile(text: &str) -> Result<Self, CompileError> {
        let fragment = Fragment::parse(text, Side::Pattern)?;
        let wildcards = WildcardSet::collect(fragment.nodes())?;
        Ok(Self {
            fragment,
            wildcards,
        })
    }

    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    pub fn wildcards(&self) -> &WildcardSet {
        &self.wildcards
    }
}

/// A compiled `pattern -> replacement` rule. Immutable and reusable across
/// any number of source trees.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Pattern,
    template: Fragment,
}

impl Rule {
    pub fn compile(text: &str) -> Result<Self, CompileError> {
        let (pattern_text, template_text) =
            split_rule(text).ok_or(CompileError::MissingDelimiter)?;
        let pattern = Pattern::compile(pattern_text)?;
        let template = Fragment::parse(template_text, Side::Template)?;

        if let Some(name) = referenced_names(template.nodes())
            .into_iter()
            .find(|name| !pattern.wildcards.contains(name))
        {
            return Err(CompileError::UndeclaredWildcard { name });
        }

        debug!(
            wildcards = pattern.wildcards.len(),
            expression = pattern.fragment.is_expression(),
            "compiled rule"
        );
        Ok(Self { pattern, template })
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn template(&self) -> &Fragment {
        &self.template
    }

    pub fn wildcards(&self) -> &WildcardSet {
        &self.pattern.wildcards
    }
}

impl FromStr for Rule {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rule::compile(s)
    }
}

/// Split rule text at the first `->` that is not inside a string,
/// template literal or comment.
pub fn split_rule(text: &str) -> Option<(&str, &str)> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'\'' | b'"' | b'`') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i += 1;
            }
            b'-' if bytes.get(i + 1) == Some(&b'>') => {
                return Some((&text[..i], &text[i + DELIMITER.len()..]));
            }
            _ => {}
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::WildcardKind;

    #[test]
    fn splits_at_first_delimiter_outside_strings() {
        assert_eq!(split_rule("a -> b"), Some(("a ", " b")));
        assert_eq!(
            split_rule("f('->', a) -> g(a)"),
            Some(("f('->', a) ", " g(a)"))
        );
        assert_eq!(
            split_rule("f(a) /* -> */ -> g(a)"),
            Some(("f(a) /* -> */ ", " g(a)"))
        );
        assert_eq!(split_rule("a - > b"), None);
    }

    #[test]
    fn detects_fragment_form() {
        assert!(Fragment::parse("_.each(a, b)", Side::Pattern)
            .unwrap()
            .is_expression());
        assert!(!Fragment::parse("call(a, b);", Side::Pattern)
            .unwrap()
            .is_expression());
        match Fragment::parse("var a = c; var b = d;", Side::Template).unwrap() {
            Fragment::Statements(stmts) => assert_eq!(stmts.len(), 2),
            Fragment::Expression(_) => panic!("expected statements"),
        }
    }

    #[test]
    fn compiles_rule_with_rest() {
        let rule = Rule::compile("jade_mixins[a](...b) -> templates[a](...b)").unwrap();
        assert_eq!(rule.wildcards().get("a"), Some(WildcardKind::Value));
        assert_eq!(rule.wildcards().get("b"), Some(WildcardKind::Rest));
        assert!(rule.template().is_expression());
    }

    #[test]
    fn reports_compile_errors() {
        assert_eq!(
            Rule::compile("foo(a)").unwrap_err(),
            CompileError::MissingDelimiter
        );
        assert_eq!(
            Rule::compile(" -> foo").unwrap_err(),
            CompileError::EmptyFragment {
                side: Side::Pattern
            }
        );
        assert_eq!(
            Rule::compile("foo(a) -> bar(a, z)").unwrap_err(),
            CompileError::UndeclaredWildcard {
                name: "z".to_string()
            }
        );
        assert!(matches!(
            Rule::compile("foo( -> bar").unwrap_err(),
            CompileError::Fragment {
                side: Side::Pattern,
                ..
            }
        ));
    }

    #[test]
    fn literal_identifiers_need_no_declaration() {
        let rule: Rule = "noop -> noop".parse().unwrap();
        assert!(rule.wildcards().is_empty());
    }
}
