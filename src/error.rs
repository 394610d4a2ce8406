//! Crate-level error type.

use crate::config::ConfigError;
use crate::js::ParseError;
use crate::rewrite::StructuralError;
use crate::rule::CompileError;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any failure of a public operation.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed source text
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Malformed rule or pattern text
    #[error("invalid rule: {0}")]
    Compile(#[from] CompileError),

    /// A template that does not fit where its match was found
    #[error("cannot apply rule: {0}")]
    Structural(#[from] StructuralError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
