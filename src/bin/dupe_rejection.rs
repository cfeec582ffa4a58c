//! Inserts a fixed pattern with duplicate rejection, then drains it.
//!
//! Usage: `dupe_rejection [ascending|descending]`

use std::io;

use anyhow::Result;
use orderqueue::driver::{self, DrainOrder};
use orderqueue::key::key_to_string;
use orderqueue::{DuplicatePolicy, Key, OrderQueue, Package};

const PATTERN: [i32; 9] = [41, 41, 42, 42, 41, 43, 43, 42, 41];

fn main() -> Result<()> {
    driver::init_tracing();

    let order = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<DrainOrder>()?,
        None => DrainOrder::default(),
    };

    let queue = OrderQueue::<Key, Package>::new();
    for num in PATTERN.map(Key::from) {
        if let Err(rejected) = queue.insert(Package::placeholder(), num, DuplicatePolicy::Reject) {
            println!("{} not inserted!", key_to_string(rejected.key));
        }
    }
    println!();

    let stdout = io::stdout();
    let drained = driver::drain(&queue, order, &mut stdout.lock(), drop)?;
    tracing::debug!(drained, ?order, "queue drained");
    Ok(())
}
