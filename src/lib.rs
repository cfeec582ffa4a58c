//! Thread-safe numerically ordered queue.
//!
//! Entries are `(key, payload)` pairs kept in descending key order on a
//! doubly-linked list. Either edge pops in constant time; insertion walks the
//! list from the highest edge.
//!
//! ```
//! use orderqueue::{DuplicatePolicy, Edge, OrderQueue};
//!
//! let queue = OrderQueue::<i64, &str>::new();
//! queue.insert("b", 20, DuplicatePolicy::Allow).unwrap();
//! queue.insert("a", 10, DuplicatePolicy::Allow).unwrap();
//! assert!(queue.insert("c", 20, DuplicatePolicy::Reject).is_err());
//!
//! assert_eq!(queue.span(), 10);
//! let lowest = queue.pop(Edge::Lowest).unwrap();
//! assert_eq!(lowest.key(), 10);
//! assert_eq!(lowest.release(), "a");
//! ```

pub mod driver;
pub mod error;
pub mod key;
pub mod node;
pub mod package;
pub mod queue;
mod spine;
mod sync;

pub use error::DuplicateKey;
pub use error::InvariantViolation;
pub use key::Key;
pub use key::OrderKey;
pub use node::release_orphan;
pub use node::Orphan;
pub use package::Package;
pub use queue::DuplicatePolicy;
pub use queue::Edge;
pub use queue::OrderQueue;
