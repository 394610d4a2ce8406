use serde::{Deserialize, Serialize};

/// String quote style for printed literals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    #[default]
    Single,
    Double,
}

impl QuoteStyle {
    pub fn char(self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }
}

/// Printer settings, read by key from configuration. Unknown keys are
/// ignored and missing keys keep their defaults.
///
/// | key              | effect                                                   |
/// |------------------|----------------------------------------------------------|
/// | `indent`         | spaces per indentation level (default 2)                 |
/// | `use_tabs`       | indent with one tab per level instead of spaces          |
/// | `quotes`         | `"single"` or `"double"` quotes around string literals   |
/// | `function_space` | print `function (` instead of `function(` for anonymous functions |
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PrintOptions {
    pub indent: usize,
    pub use_tabs: bool,
    pub quotes: QuoteStyle,
    pub function_space: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            use_tabs: false,
            quotes: QuoteStyle::Single,
            function_space: false,
        }
    }
}

impl PrintOptions {
    /// Style used when a rewritten tree is printed.
    pub fn rewrite() -> Self {
        Self {
            indent: 4,
            function_space: true,
            ..Self::default()
        }
    }

    /// Indentation text for `level` levels.
    pub fn indentation(&self, level: usize) -> String {
        if self.use_tabs {
            "\t".repeat(level)
        } else {
            " ".repeat(self.indent * level)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults_and_unknown_keys_are_ignored() {
        let options: PrintOptions =
            serde_json::from_str(r#"{"quotes": "double", "colour": "blue"}"#).unwrap();
        assert_eq!(options.quotes, QuoteStyle::Double);
        assert_eq!(options.indent, 2);
        assert!(!options.function_space);
    }

    #[test]
    fn indentation_honours_tabs() {
        let mut options = PrintOptions::rewrite();
        assert_eq!(options.indentation(2), "        ");
        options.use_tabs = true;
        assert_eq!(options.indentation(2), "\t\t");
    }
}
