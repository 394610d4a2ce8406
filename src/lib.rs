//! jsreshape: structural search and rewrite for JavaScript
//!
//! Rules are written as code: `"<pattern> -> <template>"`, where both sides
//! are JavaScript fragments. Single lowercase letters in the pattern are
//! wildcards; `...x` at the end of an argument or parameter list captures
//! the rest of that list.
//!
//! # Architecture
//!
//! Source text is parsed with tree-sitter and lowered into an immutable
//! [`ast`] tree. A [`rule::Rule`] holds the compiled pattern and template
//! together with the wildcards the pattern declares. The [`matcher`]
//! unifies the pattern against every eligible subtree, the [`rewrite`]
//! module instantiates the template and splices it in copy-on-write, and
//! [`print`] turns the new tree back into text.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> jsreshape::Result<()> {
//! let out = jsreshape::rewrite("_.each(items, log);", "_.each(a, b) -> a.forEach(b)")?;
//! assert_eq!(out, "items.forEach(log);");
//!
//! let found = jsreshape::search("call(first, second);", "call(a, b);")?;
//! assert_eq!(found[0].bindings.get("a").and_then(|b| b.name()), Some("first"));
//! # Ok(())
//! # }
//! ```

pub mod ast;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod js;
pub mod matcher;
pub mod pool;
pub mod print;
pub mod rewrite;
pub mod rule;

// Re-exports
pub use config::{Config, ConfigError};
pub use engine::{format, parse, rewrite, rewrite_all, rewrite_with, search, validate};
pub use error::{Error, Result};
pub use js::{Diagnostic, ParseError};
pub use matcher::{Binding, Bindings, MatchResult, MatchSpan};
pub use print::{PrintOptions, Printer, QuoteStyle};
pub use rewrite::StructuralError;
pub use rule::{CompileError, Rule};
