use std::fmt;

use crossbeam_utils::CachePadded;
use tracing::{debug, trace};

use crate::error::{DuplicateKey, InvariantViolation};
use crate::key::OrderKey;
use crate::node::{Node, Orphan};
use crate::spine::{Placement, Spine};
use crate::sync::{AtomicUsize, Mutex, Ordering};

/// Which end of the queue to pop from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Edge {
    Lowest = 0,
    Highest = 1,
}

impl Edge {
    /// Maps the raw selector (`0` lowest, `1` highest). Anything else is `None`.
    pub const fn from_raw(which: i32) -> Option<Self> {
        match which {
            0 => Some(Edge::Lowest),
            1 => Some(Edge::Highest),
            _ => None,
        }
    }
}

/// What `insert` does when a linked node already carries the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DuplicatePolicy {
    // linked above the existing equal keys
    #[default]
    Allow,
    Reject,
}

impl DuplicatePolicy {
    /// `0` allows duplicates, any other value rejects them.
    pub const fn from_raw(reject: i32) -> Self {
        if reject == 0 {
            DuplicatePolicy::Allow
        } else {
            DuplicatePolicy::Reject
        }
    }
}

/// Numerically ordered queue with constant time access to both ends.
///
/// Entries are kept in descending key order on a doubly-linked spine. Every
/// mutation and `span` run under one exclusive lock; `count` reads a
/// lock-free mirror of the length and may be stale.
///
/// Insertion walks the spine from the highest edge, so it is linear in the
/// queue length. Popping either edge is O(1).
pub struct OrderQueue<K, P> {
    spine: Mutex<Spine<K, P>>,
    count: CachePadded<AtomicUsize>,
}

impl<K: OrderKey, P> OrderQueue<K, P> {
    pub fn new() -> Self {
        Self {
            spine: Mutex::new(Spine::new()),
            count: CachePadded::new(AtomicUsize::new(0)),
        }
    }

    /// Links `payload` under `key`. With [`DuplicatePolicy::Reject`] an
    /// already linked key fails the insert and hands the payload back.
    pub fn insert(
        &self,
        payload: P,
        key: K,
        policy: DuplicatePolicy,
    ) -> Result<(), DuplicateKey<K, P>> {
        let node = Node::boxed(key, payload);

        let linked = {
            let mut spine = self.spine.lock();
            let linked = spine.link(node, policy);
            self.count.store(spine.len(), Ordering::Relaxed);
            linked
        };

        match linked {
            Ok(Placement { higher, lower }) => {
                trace!(?key, ?higher, ?lower, "linked");
                Ok(())
            }
            Err(node) => {
                debug!(?key, "duplicate key rejected");
                let node = *node;
                Err(DuplicateKey {
                    key: node.key,
                    payload: node.payload,
                })
            }
        }
    }

    /// Removes the node at `edge`, or returns `None` if the queue is empty.
    pub fn pop(&self, edge: Edge) -> Option<Orphan<K, P>> {
        let node = {
            let mut spine = self.spine.lock();
            let node = spine.unlink(edge);
            self.count.store(spine.len(), Ordering::Relaxed);
            node
        }?;

        trace!(key = ?node.key, ?edge, "unlinked");
        Some(Orphan::from_unlinked(node))
    }

    /// [`pop`](Self::pop) with a raw edge selector. Values other than `0` and
    /// `1` return `None` and leave the queue alone.
    pub fn pop_raw(&self, which: i32) -> Option<Orphan<K, P>> {
        self.pop(Edge::from_raw(which)?)
    }

    /// Snapshot of the element count, read without the lock.
    #[inline]
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Highest key minus lowest key, or zero when empty.
    pub fn span(&self) -> K {
        self.spine.lock().span()
    }

    pub fn peek(&self, edge: Edge) -> Option<K> {
        self.spine.lock().edge_key(edge)
    }

    /// Walks the spine under the lock and reports the first broken invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.spine.lock().check()
    }
}

impl<K: OrderKey, P> Default for OrderQueue<K, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: OrderKey, P> fmt::Debug for OrderQueue<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spine = self.spine.lock();
        f.debug_struct("OrderQueue")
            .field("count", &spine.len())
            .field("highest", &spine.edge_key(Edge::Highest))
            .field("lowest", &spine.edge_key(Edge::Lowest))
            .finish()
    }
}
