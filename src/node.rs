//! Tree nodes and the insertion/rebalancing algorithms.
//!
//! Every structural operation takes a subtree by value and hands back the
//! root that replaces it. Parents relink whatever comes back, so no node ever
//! holds a reference to its parent.

use std::cmp::Ordering;
use std::mem;

use crate::observer::{RebalanceObserver, Rotation};

/// An owning slot for a subtree. `None` is the empty subtree.
pub(crate) type Link = Option<Box<Node>>;

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) key: String,
    pub(crate) payload: String,
    pub(crate) left: Link,
    pub(crate) right: Link,
    /// `1 + max(height(left), height(right))`.
    pub(crate) height: u8,
}

/// Height of a possibly empty subtree.
#[inline]
pub(crate) fn height(link: &Link) -> u8 {
    link.as_ref().map_or(0, |n| n.height)
}

impl Node {
    fn leaf(key: String, payload: String) -> Box<Node> {
        Box::new(Node {
            key,
            payload,
            left: None,
            right: None,
            height: 1,
        })
    }

    /// `height(right) - height(left)`.
    #[inline]
    pub(crate) fn balance(&self) -> i16 {
        i16::from(height(&self.right)) - i16::from(height(&self.left))
    }

    #[inline]
    fn update_height(&mut self) {
        self.height = height(&self.left).max(height(&self.right)).saturating_add(1);
    }

    /// Inserts `key` into the subtree at `link` and returns the new subtree root,
    /// along with the payload that was replaced if `key` was already present.
    ///
    /// A replacement leaves the topology alone, so heights are not recomputed
    /// and no rotation happens anywhere on the path.
    pub(crate) fn insert<O: RebalanceObserver + ?Sized>(
        link: Link,
        key: String,
        payload: String,
        observer: &mut O,
    ) -> (Box<Node>, Option<String>) {
        let mut node = match link {
            None => return (Node::leaf(key, payload), None),
            Some(node) => node,
        };

        match key.as_str().cmp(node.key.as_str()) {
            Ordering::Equal => {
                let old = mem::replace(&mut node.payload, payload);
                return (node, Some(old));
            }
            Ordering::Less => {
                let (child, old) = Node::insert(node.left.take(), key, payload, observer);
                node.left = Some(child);
                if old.is_some() {
                    return (node, old);
                }
            }
            Ordering::Greater => {
                let (child, old) = Node::insert(node.right.take(), key, payload, observer);
                node.right = Some(child);
                if old.is_some() {
                    return (node, old);
                }
            }
        }

        node.update_height();
        (node.rebalance(observer), None)
    }

    pub(crate) fn find<'a>(mut link: &'a Link, key: &str) -> Option<&'a str> {
        while let Some(node) = link {
            link = match key.cmp(node.key.as_str()) {
                Ordering::Equal => return Some(node.payload.as_str()),
                Ordering::Less => &node.left,
                Ordering::Greater => &node.right,
            };
        }
        None
    }

    /// Restores the balance invariant at this node, assuming both children
    /// already satisfy it and the cached height is current.
    pub(crate) fn rebalance<O: RebalanceObserver + ?Sized>(
        self: Box<Self>,
        observer: &mut O,
    ) -> Box<Node> {
        let rotation = match self.balance() {
            -2 => {
                if self.left.as_ref().map_or(0, |l| l.balance()) > 0 {
                    Rotation::LeftRight
                } else {
                    Rotation::Right
                }
            }
            2 => {
                if self.right.as_ref().map_or(0, |r| r.balance()) < 0 {
                    Rotation::RightLeft
                } else {
                    Rotation::Left
                }
            }
            _ => return self,
        };

        log::trace!("rotate {} at {:?}", rotation, self.key);
        observer.rotated(rotation, &self.key);

        match rotation {
            Rotation::Left => self.rotate_left(),
            Rotation::Right => self.rotate_right(),
            Rotation::LeftRight => self.rotate_left_right(),
            Rotation::RightLeft => self.rotate_right_left(),
        }
    }

    /// Pivots the right child up. Without a right child this is a no-op.
    pub(crate) fn rotate_left(mut self: Box<Self>) -> Box<Node> {
        let Some(mut pivot) = self.right.take() else {
            return self;
        };
        self.right = pivot.left.take();
        // The demoted node must be fixed first: the pivot's height depends on it.
        self.update_height();
        pivot.left = Some(self);
        pivot.update_height();
        pivot
    }

    /// Pivots the left child up. Without a left child this is a no-op.
    pub(crate) fn rotate_right(mut self: Box<Self>) -> Box<Node> {
        let Some(mut pivot) = self.left.take() else {
            return self;
        };
        self.left = pivot.right.take();
        self.update_height();
        pivot.right = Some(self);
        pivot.update_height();
        pivot
    }

    pub(crate) fn rotate_left_right(mut self: Box<Self>) -> Box<Node> {
        self.left = self.left.take().map(Node::rotate_left);
        self.rotate_right()
    }

    pub(crate) fn rotate_right_left(mut self: Box<Self>) -> Box<Node> {
        self.right = self.right.take().map(Node::rotate_right);
        self.rotate_left()
    }

    /// In-order walk: left subtree, this node, right subtree.
    pub(crate) fn traverse<F: FnMut(&str, &str)>(link: &Link, visit: &mut F) {
        if let Some(node) = link {
            Node::traverse(&node.left, visit);
            visit(&node.key, &node.payload);
            Node::traverse(&node.right, visit);
        }
    }
}
