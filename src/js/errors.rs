use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("failed to set language for parser")]
    LanguageSet,

    #[error("failed to parse source code")]
    ParseFailed,

    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        /// Byte offset of the offending token
        index: usize,
        /// 1-based line
        line: usize,
        /// 1-based column
        column: usize,
        message: String,
    },
}
