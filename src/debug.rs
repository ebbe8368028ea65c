//! Debug utilities: structure dumps and integrity verification.

use std::fmt::Write as _;

use thiserror::Error;

use crate::node::{Link, Node};
use crate::AvlTree;

/// A broken tree invariant, as reported by [`AvlTree::verify_integrity`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("key {key:?} is out of order relative to {neighbor:?}")]
    Unordered { key: String, neighbor: String },
    #[error("node {key:?} has balance {balance}")]
    Unbalanced { key: String, balance: i16 },
    #[error("node {key:?} caches height {cached} but its subtree is {actual} high")]
    StaleHeight { key: String, cached: u8, actual: u8 },
}

impl AvlTree {
    /// Renders the tree in indented prefix form, one `key[balance]` line per node.
    ///
    /// A node at depth `d > 0` is prefixed with `4 * (d - 1)` spaces and `+---`.
    /// Left subtrees are listed before right subtrees. An empty tree renders as
    /// the empty string.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        Self::dump_node(&self.root, 0, &mut out);
        out
    }

    fn dump_node(link: &Link, depth: usize, out: &mut String) {
        let Some(node) = link else {
            return;
        };
        if depth > 0 {
            out.push_str(&" ".repeat((depth - 1) * 4));
            out.push_str("+---");
        }
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}[{}]", node.key, node.balance());
        Self::dump_node(&node.left, depth + 1, out);
        Self::dump_node(&node.right, depth + 1, out);
    }

    /// Checks order, balance and cached heights of every node without trusting
    /// any cached height. Returns the first violation found.
    pub fn verify_integrity(&self) -> Result<(), IntegrityError> {
        Self::verify_node(&self.root, None, None).map(|_| ())
    }

    /// Returns the recomputed height of the subtree.
    fn verify_node(
        link: &Link,
        lower: Option<&str>,
        upper: Option<&str>,
    ) -> Result<u8, IntegrityError> {
        let Some(node) = link else {
            return Ok(0);
        };
        check_bound(node, lower, |bound| node.key.as_str() > bound)?;
        check_bound(node, upper, |bound| node.key.as_str() < bound)?;

        let lh = Self::verify_node(&node.left, lower, Some(node.key.as_str()))?;
        let rh = Self::verify_node(&node.right, Some(node.key.as_str()), upper)?;
        let actual = lh.max(rh) + 1;
        if node.height != actual {
            return Err(IntegrityError::StaleHeight {
                key: node.key.clone(),
                cached: node.height,
                actual,
            });
        }
        let balance = i16::from(rh) - i16::from(lh);
        if !(-1..=1).contains(&balance) {
            return Err(IntegrityError::Unbalanced {
                key: node.key.clone(),
                balance,
            });
        }
        Ok(actual)
    }
}

fn check_bound(
    node: &Node,
    bound: Option<&str>,
    holds: impl Fn(&str) -> bool,
) -> Result<(), IntegrityError> {
    match bound {
        Some(bound) if !holds(bound) => Err(IntegrityError::Unordered {
            key: node.key.clone(),
            neighbor: bound.to_owned(),
        }),
        _ => Ok(()),
    }
}
