use crate::print::PrintOptions;
use crate::rule::{CompileError, Rule};
use serde::Deserialize;
use std::fmt;

/// Contents of a `.jsreshape.toml` file.
///
/// ```toml
/// rules = [
///     "_.each(a, b) -> a.forEach(b)",
///     "var a = c, b = d; -> var a = c; var b = d;",
/// ]
///
/// [format]
/// indent = 4
/// quotes = "double"
/// ```
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Printer settings for `format`
    pub format: PrintOptions,
    /// Rules applied in order by `rewrite` when none is given explicitly
    pub rules: Vec<String>,
}

impl Config {
    /// Every rule must be non-empty and compile.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        for (index, rule) in self.rules.iter().enumerate() {
            if rule.trim().is_empty() {
                issues.push(ValidationIssue::EmptyRule { index });
                continue;
            }
            if let Err(source) = Rule::compile(rule) {
                issues.push(ValidationIssue::InvalidRule {
                    index,
                    rule: rule.clone(),
                    source,
                });
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone)]
pub enum ValidationIssue {
    EmptyRule {
        index: usize,
    },
    InvalidRule {
        index: usize,
        rule: String,
        source: CompileError,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyRule { index } => write!(f, "rules[{index}] is empty"),
            ValidationIssue::InvalidRule {
                index,
                rule,
                source,
            } => write!(f, "rules[{index}] '{rule}' does not compile: {source}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_every_bad_rule() {
        let config = Config {
            rules: vec![
                "foo(a) -> bar(a)".to_string(),
                "  ".to_string(),
                "foo(a)".to_string(),
            ],
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.issues.len(), 2);
        assert!(matches!(err.issues[0], ValidationIssue::EmptyRule { index: 1 }));
        assert!(matches!(
            err.issues[1],
            ValidationIssue::InvalidRule {
                index: 2,
                source: CompileError::MissingDelimiter,
                ..
            }
        ));
        assert!(err.to_string().contains("rules[2] 'foo(a)' does not compile"));
    }

    #[test]
    fn empty_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }
}
