//! Syntax tree model shared by every stage.
//!
//! Nodes are tagged with a closed [`NodeKind`] and hold an ordered list of
//! named [`Slot`]s. Trees are immutable and shared through `Arc`; a rewrite
//! produces a new root that reuses every untouched subtree.

pub mod kind;
pub mod node;
pub mod path;

pub use kind::{Field, NodeKind};
pub use node::{same_sequence, Node, NodeRef, Scalar, Slot, Span};
pub use path::{Path, Step};
