use std::fmt;

use thiserror::Error;

/// Returned by `insert` under [`DuplicatePolicy::Reject`](crate::DuplicatePolicy)
/// when a linked node already carries the key. The payload comes back
/// untouched; nothing was linked.
#[derive(Error)]
#[error("key {key:?} is already queued")]
pub struct DuplicateKey<K, P> {
    pub key: K,
    pub payload: P,
}

impl<K, P> DuplicateKey<K, P> {
    pub fn into_payload(self) -> P {
        self.payload
    }
}

// payload left out so `P` needs no `Debug`
impl<K: fmt::Debug, P> fmt::Debug for DuplicateKey<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DuplicateKey")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// A broken spine, as reported by `OrderQueue::check_invariants`.
///
/// Positions count from the highest edge, starting at 0.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("edges disagree on emptiness (count {count})")]
    EdgeMismatch { count: usize },

    #[error("single node is not both edges")]
    SingletonEdges,

    #[error("walked {walked} nodes but count is {count}")]
    LengthMismatch { count: usize, walked: usize },

    #[error("walk from highest did not end at lowest")]
    TailMismatch,

    #[error("node at position {position} does not link back to its higher neighbour")]
    BrokenBackLink { position: usize },

    #[error("node at position {position} sorts above its higher neighbour")]
    OutOfOrder { position: usize },

    #[error("edge node still links outward")]
    EdgeLinkNotCleared,
}

/// A drain order other than `ascending` or `descending`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown drain order `{0}`, expected `ascending` or `descending`")]
pub struct UnknownDrainOrder(pub String);
