//! JavaScript front end built on tree-sitter.
//!
//! Parsing goes through the tree-sitter JavaScript grammar bundled with
//! ast-grep-language; the concrete tree is then lowered into the
//! [`crate::ast`] model that matching and printing work on.

pub mod errors;
pub mod lower;
pub mod parser;
pub mod validator;

pub use errors::ParseError;
pub use parser::{syntax_issues, JsParser, SyntaxIssue};
pub use validator::{early_errors, validate_source, Diagnostic};
