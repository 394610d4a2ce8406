use crate::ast::{Field, NodeKind};
use thiserror::Error;

/// A replacement that cannot be placed where its match was found.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("rest wildcard '{name}' expands to a sequence where a single node is required")]
    RestOutsideList { name: String },

    #[error("'{field}' of {kind} must be an identifier, found {found}")]
    NotAnIdentifier {
        kind: NodeKind,
        field: Field,
        found: NodeKind,
    },

    #[error("replacement yields {found} statements where {expected} is required")]
    ArityMismatch {
        expected: &'static str,
        found: usize,
    },

    #[error("match location does not exist in the tree")]
    InvalidPath,
}
