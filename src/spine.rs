//! The doubly-linked chain behind [`OrderQueue`](crate::OrderQueue).
//!
//! ```text
//!    highest                            lowest
//! |-------------|    |-------------|    |-------------|
//! | 1181.500000 | -> | 1181.250000 | -> | 1180.750000 |
//! |-------------|    |-------------|    |-------------|
//! ```
//!
//! `Spine` does no locking of its own; every method takes `&self`/`&mut self`
//! and the queue serializes access through its mutex.

use std::ptr::NonNull;

use crate::error::InvariantViolation;
use crate::key::OrderKey;
use crate::node::{Link, Node};
use crate::queue::{DuplicatePolicy, Edge};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Placement<K> {
    pub(crate) higher: Option<K>,
    pub(crate) lower: Option<K>,
}

pub(crate) struct Spine<K, P> {
    highest: Link<K, P>,
    lowest: Link<K, P>,
    len: usize,
}

// Every node reachable from the edges is exclusively owned by the spine.
unsafe impl<K: Send, P: Send> Send for Spine<K, P> {}

impl<K: OrderKey, P> Spine<K, P> {
    pub(crate) const fn new() -> Self {
        Self {
            highest: None,
            lowest: None,
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    // Last node strictly above `key`, or `None` when `key` goes on top.
    // Equal keys stop the scan so ties land above the existing ones.
    fn find_predecessor(&self, key: K) -> Link<K, P> {
        let highest = self.highest?;
        unsafe {
            if key >= (*highest.as_ptr()).key {
                return None;
            }
            let mut cursor = highest;
            while let Some(lower) = (*cursor.as_ptr()).lower {
                if key >= (*lower.as_ptr()).key {
                    break;
                }
                cursor = lower;
            }
            Some(cursor)
        }
    }

    pub(crate) fn link(
        &mut self,
        mut node: Box<Node<K, P>>,
        policy: DuplicatePolicy,
    ) -> Result<Placement<K>, Box<Node<K, P>>> {
        let key = node.key;
        let pre = self.find_predecessor(key);
        let post = match pre {
            Some(pre) => unsafe { (*pre.as_ptr()).lower },
            None => self.highest,
        };

        // the only node that can share the key is the one right below the
        // insertion point
        if policy == DuplicatePolicy::Reject {
            if let Some(post) = post {
                if unsafe { (*post.as_ptr()).key } == key {
                    return Err(node);
                }
            }
        }

        node.higher = pre;
        node.lower = post;
        let new = NonNull::from(Box::leak(node));

        unsafe {
            match pre {
                Some(pre) => (*pre.as_ptr()).lower = Some(new),
                None => self.highest = Some(new),
            }
            match post {
                Some(post) => (*post.as_ptr()).higher = Some(new),
                None => self.lowest = Some(new),
            }
        }
        self.len += 1;

        Ok(Placement {
            higher: pre.map(|n| unsafe { (*n.as_ptr()).key }),
            lower: post.map(|n| unsafe { (*n.as_ptr()).key }),
        })
    }

    pub(crate) fn unlink(&mut self, edge: Edge) -> Option<Box<Node<K, P>>> {
        let node = match edge {
            Edge::Highest => {
                let top = self.highest?;
                unsafe {
                    self.highest = (*top.as_ptr()).lower;
                    match self.highest {
                        Some(next) => (*next.as_ptr()).higher = None,
                        None => self.lowest = None,
                    }
                }
                top
            }
            Edge::Lowest => {
                let bottom = self.lowest?;
                unsafe {
                    self.lowest = (*bottom.as_ptr()).higher;
                    match self.lowest {
                        Some(next) => (*next.as_ptr()).lower = None,
                        None => self.highest = None,
                    }
                }
                bottom
            }
        };
        self.len -= 1;

        // SAFETY: every linked node was leaked from a Box in `link`, and this
        // one is no longer reachable from either edge.
        Some(unsafe { Box::from_raw(node.as_ptr()) })
    }

    pub(crate) fn edge_key(&self, edge: Edge) -> Option<K> {
        let node = match edge {
            Edge::Highest => self.highest?,
            Edge::Lowest => self.lowest?,
        };
        Some(unsafe { (*node.as_ptr()).key })
    }

    pub(crate) fn span(&self) -> K {
        match (self.edge_key(Edge::Highest), self.edge_key(Edge::Lowest)) {
            (Some(high), Some(low)) => K::span(high, low),
            _ => K::ZERO,
        }
    }

    pub(crate) fn check(&self) -> Result<(), InvariantViolation> {
        let count = self.len;
        let (Some(highest), Some(lowest)) = (self.highest, self.lowest) else {
            return match (self.highest, self.lowest, count) {
                (None, None, 0) => Ok(()),
                _ => Err(InvariantViolation::EdgeMismatch { count }),
            };
        };
        if count == 0 {
            return Err(InvariantViolation::EdgeMismatch { count });
        }
        if count == 1 && highest != lowest {
            return Err(InvariantViolation::SingletonEdges);
        }

        unsafe {
            if (*highest.as_ptr()).higher.is_some() || (*lowest.as_ptr()).lower.is_some() {
                return Err(InvariantViolation::EdgeLinkNotCleared);
            }

            let mut walked = 1;
            let mut cursor = highest;
            while let Some(lower) = (*cursor.as_ptr()).lower {
                // a cycle or a stray tail would otherwise walk forever
                if walked >= count {
                    return Err(InvariantViolation::LengthMismatch {
                        count,
                        walked: walked + 1,
                    });
                }
                if (*lower.as_ptr()).higher != Some(cursor) {
                    return Err(InvariantViolation::BrokenBackLink { position: walked });
                }
                if (*lower.as_ptr()).key > (*cursor.as_ptr()).key {
                    return Err(InvariantViolation::OutOfOrder { position: walked });
                }
                cursor = lower;
                walked += 1;
            }

            if walked != count {
                return Err(InvariantViolation::LengthMismatch { count, walked });
            }
            if cursor != lowest {
                return Err(InvariantViolation::TailMismatch);
            }
        }
        Ok(())
    }

    #[cfg(test)]
    fn keys_top_down(&self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.len);
        let mut cursor = self.highest;
        while let Some(node) = cursor {
            unsafe {
                keys.push((*node.as_ptr()).key);
                cursor = (*node.as_ptr()).lower;
            }
        }
        keys
    }
}

impl<K, P> Drop for Spine<K, P> {
    fn drop(&mut self) {
        let mut cursor = self.highest.take();
        self.lowest = None;
        while let Some(node) = cursor {
            let node = unsafe { Box::from_raw(node.as_ptr()) };
            cursor = node.lower;
        }
        self.len = 0;
    }
}
