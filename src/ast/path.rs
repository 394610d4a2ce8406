use crate::ast::kind::Field;
use crate::ast::node::{NodeRef, Slot};
use serde::Serialize;

/// One hop from a parent to a child: the slot, plus the position when the
/// slot holds a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    pub field: Field,
    pub index: Option<usize>,
}

/// Address of a node relative to a root, as a sequence of steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Path(Vec<Step>);

impl Path {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn steps(&self) -> &[Step] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn child(&self, field: Field, index: Option<usize>) -> Self {
        let mut steps = self.0.clone();
        steps.push(Step { field, index });
        Self(steps)
    }

    /// Parent path and the final step, or `None` for the root.
    pub fn split_last(&self) -> Option<(Path, Step)> {
        let (last, rest) = self.0.split_last()?;
        Some((Path(rest.to_vec()), *last))
    }

    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Follow the path from `root`.
    pub fn resolve<'a>(&self, root: &'a NodeRef) -> Option<&'a NodeRef> {
        let mut current = root;
        for step in &self.0 {
            current = match (current.slot(step.field)?, step.index) {
                (Slot::Node(node), None) => node,
                (Slot::List(list), Some(i)) => list.get(i)?,
                _ => return None,
            };
        }
        Some(current)
    }
}
