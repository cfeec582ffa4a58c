use std::fmt;
use std::ptr::NonNull;

use crate::key::{OrderKey, SliceWriter};

pub(crate) type Link<K, P> = Option<NonNull<Node<K, P>>>;

// `higher` points toward the highest edge, `lower` toward the lowest.
pub(crate) struct Node<K, P> {
    pub(crate) key: K,
    pub(crate) payload: P,
    pub(crate) higher: Link<K, P>,
    pub(crate) lower: Link<K, P>,
}

impl<K, P> Node<K, P> {
    pub(crate) fn boxed(key: K, payload: P) -> Box<Self> {
        Box::new(Self {
            key,
            payload,
            higher: None,
            lower: None,
        })
    }
}

impl<K: fmt::Debug, P: fmt::Debug> fmt::Debug for Node<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("payload", &self.payload)
            .field("linked", &(self.higher.is_some() || self.lower.is_some()))
            .finish()
    }
}

/// A node that has been popped off the queue.
///
/// The queue keeps no reference to it; the holder owns both the node and its
/// payload. Hand it to [`release_orphan`] (or just drop it) when done.
pub struct Orphan<K, P> {
    node: Box<Node<K, P>>,
}

// The links of an orphan are always cleared, so the raw pointers inside the
// node never alias queue-owned memory.
unsafe impl<K: Send, P: Send> Send for Orphan<K, P> {}
unsafe impl<K: Sync, P: Sync> Sync for Orphan<K, P> {}

impl<K: OrderKey, P> Orphan<K, P> {
    pub(crate) fn from_unlinked(mut node: Box<Node<K, P>>) -> Self {
        node.higher = None;
        node.lower = None;
        Self { node }
    }

    #[inline]
    pub fn key(&self) -> K {
        self.node.key
    }

    #[inline]
    pub fn payload(&self) -> &P {
        &self.node.payload
    }

    #[inline]
    pub fn payload_mut(&mut self) -> &mut P {
        &mut self.node.payload
    }

    pub fn into_payload(self) -> P {
        let node = *self.node;
        node.payload
    }

    pub fn into_parts(self) -> (K, P) {
        let node = *self.node;
        (node.key, node.payload)
    }

    /// True when neither neighbor link survives.
    pub fn is_detached(&self) -> bool {
        self.node.higher.is_none() && self.node.lower.is_none()
    }

    /// Writes the textual key into `buf`, truncating at its end, and returns
    /// the number of bytes written.
    pub fn format_key(&self, buf: &mut [u8]) -> usize {
        let mut out = SliceWriter::new(buf);
        // SliceWriter never reports an error, it truncates
        let _ = self.node.key.write_key(&mut out);
        out.written()
    }

    /// Destroys the node and gives the payload back for teardown.
    pub fn release(self) -> P {
        self.into_payload()
    }
}

impl<K: fmt::Debug, P: fmt::Debug> fmt::Debug for Orphan<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orphan")
            .field("key", &self.node.key)
            .field("payload", &self.node.payload)
            .finish()
    }
}

/// Releases a node returned by `pop`. `None` is a no-op.
pub fn release_orphan<K, P>(orphan: Option<Orphan<K, P>>) {
    drop(orphan);
}
