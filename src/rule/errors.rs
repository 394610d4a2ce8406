use crate::js::ParseError;
use std::fmt;
use thiserror::Error;

/// Which half of a rule a fragment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Pattern,
    Template,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Pattern => f.write_str("pattern"),
            Side::Template => f.write_str("replacement"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("rule has no '->' delimiter")]
    MissingDelimiter,

    #[error("{side} fragment is empty")]
    EmptyFragment { side: Side },

    #[error("{side} fragment does not parse: {source}")]
    Fragment {
        side: Side,
        #[source]
        source: ParseError,
    },

    #[error("rest wildcard '...{name}' must be the last element of its list")]
    RestNotLast { name: String },

    #[error("wildcard '{name}' is used both as a value and as a rest wildcard")]
    ConflictingWildcard { name: String },

    #[error("replacement uses wildcard '{name}' which the pattern never binds")]
    UndeclaredWildcard { name: String },
}
