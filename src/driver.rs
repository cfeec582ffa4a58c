//! Plumbing shared by the `dupe_rejection` and `random_fill` binaries.

use std::io::{self, Write};
use std::str::FromStr;

use crate::error::UnknownDrainOrder;
use crate::key::{key_to_string, OrderKey};
use crate::queue::{Edge, OrderQueue};

/// Direction a driver empties the queue in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrainOrder {
    /// Pop from the lowest edge.
    #[default]
    Ascending,
    /// Pop from the highest edge.
    Descending,
}

impl DrainOrder {
    pub const fn edge(self) -> Edge {
        match self {
            DrainOrder::Ascending => Edge::Lowest,
            DrainOrder::Descending => Edge::Highest,
        }
    }
}

impl FromStr for DrainOrder {
    type Err = UnknownDrainOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascending" | "asc" => Ok(DrainOrder::Ascending),
            "descending" | "desc" => Ok(DrainOrder::Descending),
            _ => Err(UnknownDrainOrder(s.to_owned())),
        }
    }
}

/// Pops every node in `order`, writing `<key> (<count>) {<span>}` per node,
/// and hands each payload to `teardown` before the node is released.
/// Returns the number of nodes drained.
pub fn drain<K, P, W, F>(
    queue: &OrderQueue<K, P>,
    order: DrainOrder,
    out: &mut W,
    mut teardown: F,
) -> io::Result<usize>
where
    K: OrderKey,
    W: Write,
    F: FnMut(P),
{
    let mut drained = 0;
    let mut num = [0u8; 64];
    while let Some(orphan) = queue.pop(order.edge()) {
        let n = orphan.format_key(&mut num);
        out.write_all(&num[..n])?;
        writeln!(
            out,
            " ({}) {{{}}}",
            queue.count(),
            key_to_string(queue.span())
        )?;
        teardown(orphan.release());
        drained += 1;
    }
    Ok(drained)
}

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG` (default
/// `info`). A subscriber that is already installed is left in place.
#[cfg(feature = "cli")]
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .try_init();
}
