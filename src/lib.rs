//! # avl-rs
//!
//! A height-balanced (AVL) binary search tree mapping string keys to string
//! payloads.
//!
//! Every node caches the height of its subtree. Inserts recompute heights on
//! the way back up from the insertion point and rotate wherever the two child
//! heights differ by two, so the tree never grows taller than about
//! `1.44 * log2(n)`.
//!
//! ## Example
//!
//! ```rust
//! use avl_rs::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! tree.insert("hello", "world");
//! tree.insert("avl", "tree");
//!
//! assert_eq!(tree.find("hello"), Some("world"));
//! assert_eq!(tree.find("missing"), None);
//!
//! let keys: Vec<&str> = tree.iter().map(|(k, _)| k).collect();
//! assert_eq!(keys, ["avl", "hello"]);
//! ```

mod debug;
mod node;
mod observer;

pub use debug::IntegrityError;
pub use observer::{RebalanceObserver, Rotation, RotationLog};

use node::{Link, Node};

/// An ordered map from `String` keys to `String` payloads.
///
/// Inserting an existing key replaces its payload. There is no removal.
#[derive(Clone)]
pub struct AvlTree {
    root: Link,
    count: usize,
}

impl AvlTree {
    pub fn new() -> Self {
        Self {
            root: None,
            count: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the root node; 0 for an empty tree, 1 for a single node.
    pub fn height(&self) -> usize {
        usize::from(node::height(&self.root))
    }

    pub fn find(&self, key: &str) -> Option<&str> {
        Node::find(&self.root, key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Inserts `key`, or replaces its payload if it is already present.
    ///
    /// Returns the replaced payload. Replacing never changes the tree's shape.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        payload: impl Into<String>,
    ) -> Option<String> {
        self.insert_observed(key, payload, &mut ())
    }

    /// Like [`insert`](Self::insert), reporting each rotation to `observer`.
    pub fn insert_observed<O: RebalanceObserver + ?Sized>(
        &mut self,
        key: impl Into<String>,
        payload: impl Into<String>,
        observer: &mut O,
    ) -> Option<String> {
        let (root, old) = Node::insert(self.root.take(), key.into(), payload.into(), observer);
        self.root = Some(root);
        if old.is_none() {
            self.count += 1;
        }
        old
    }

    /// Calls `visit` once per entry in ascending key order.
    pub fn traverse<F: FnMut(&str, &str)>(&self, mut visit: F) {
        Node::traverse(&self.root, &mut visit);
    }

    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(&self.root);
        iter
    }
}

impl Default for AvlTree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AvlTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a AvlTree {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, P: Into<String>> FromIterator<(K, P)> for AvlTree {
    fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Into<String>, P: Into<String>> Extend<(K, P)> for AvlTree {
    fn extend<I: IntoIterator<Item = (K, P)>>(&mut self, iter: I) {
        for (key, payload) in iter {
            self.insert(key, payload);
        }
    }
}

/// In-order iterator over `(key, payload)` pairs.
pub struct Iter<'a> {
    /// Nodes whose left subtree has been fully pushed but that were not yet yielded.
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn push_left_spine(&mut self, mut link: &'a Link) {
        while let Some(node) = link {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(&node.right);
        Some((node.key.as_str(), node.payload.as_str()))
    }
}


#[cfg(test)]
mod proptests;
