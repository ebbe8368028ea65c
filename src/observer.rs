//! Instrumentation hook for rebalancing.
//!
//! The node algorithms never print. Callers that want to see which rotations
//! an insert performed pass a [`RebalanceObserver`] to
//! [`AvlTree::insert_observed`](crate::AvlTree::insert_observed).

use std::fmt;

/// The restructuring applied to a subtree whose balance factor reached ±2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// Right child pivots up. Applied at balance +2 with a right-leaning or level right child.
    Left,
    /// Left child pivots up. Applied at balance -2 with a left-leaning or level left child.
    Right,
    /// Left child rotated left, then the node rotated right.
    LeftRight,
    /// Right child rotated right, then the node rotated left.
    RightLeft,
}

impl Rotation {
    pub fn is_double(self) -> bool {
        matches!(self, Rotation::LeftRight | Rotation::RightLeft)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rotation::Left => "left",
            Rotation::Right => "right",
            Rotation::LeftRight => "left-right",
            Rotation::RightLeft => "right-left",
        };
        f.write_str(name)
    }
}

/// Receives one callback per rebalancing step, in unwind order (deepest first).
pub trait RebalanceObserver {
    /// `key` is the key of the unbalanced node the rotation was applied at.
    fn rotated(&mut self, rotation: Rotation, key: &str) {
        let _ = (rotation, key);
    }
}

/// The silent observer used by [`AvlTree::insert`](crate::AvlTree::insert).
impl RebalanceObserver for () {}

impl<F: FnMut(Rotation, &str)> RebalanceObserver for F {
    fn rotated(&mut self, rotation: Rotation, key: &str) {
        self(rotation, key)
    }
}

/// Records every rotation it is told about.
#[derive(Clone, Debug, Default)]
pub struct RotationLog {
    events: Vec<(Rotation, String)>,
}

impl RotationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[(Rotation, String)] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl RebalanceObserver for RotationLog {
    fn rotated(&mut self, rotation: Rotation, key: &str) {
        self.events.push((rotation, key.to_owned()));
    }
}
