//! Fills the queue with random keys until it holds more than `limit` entries
//! or a termination signal arrives, then drains it.
//!
//! Usage: `random_fill <limit> [ascending|descending]`

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{bail, Context, Result};
use nix::libc;
use nix::sys::signal::{signal, SigHandler, Signal};
use orderqueue::driver::{self, DrainOrder};
use orderqueue::{DuplicatePolicy, Key, OrderQueue, Package};
use rand::Rng;
use tracing::info;

const USAGE: &str = "usage: random_fill <limit> [ascending|descending]";

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

extern "C" fn request_shutdown(_signum: libc::c_int) {
    SHUTDOWN.store(true, Ordering::Relaxed);
}

fn install_signal_handlers() -> Result<()> {
    for sig in [Signal::SIGHUP, Signal::SIGINT, Signal::SIGTERM, Signal::SIGQUIT] {
        // SAFETY: the handler only stores to an atomic, which is async-signal-safe.
        unsafe { signal(sig, SigHandler::Handler(request_shutdown)) }
            .with_context(|| format!("installing {} handler", sig))?;
    }
    Ok(())
}

fn random_key<R: Rng>(rng: &mut R) -> Key {
    let num = Key::from(rng.gen_range(0..=i32::MAX));
    #[cfg(feature = "double")]
    let num = num + rng.gen::<f64>();
    num
}

fn main() -> Result<()> {
    driver::init_tracing();

    let mut args = std::env::args().skip(1);
    let Some(limit) = args.next() else {
        bail!(USAGE);
    };
    let limit: usize = limit
        .parse()
        .with_context(|| format!("invalid limit `{}`; {}", limit, USAGE))?;
    let order = match args.next() {
        Some(arg) => arg.parse::<DrainOrder>()?,
        None => DrainOrder::default(),
    };

    install_signal_handlers()?;
    info!(limit, ?order, "filling");

    let queue = OrderQueue::<Key, Package>::new();
    let mut rng = rand::thread_rng();
    while !SHUTDOWN.load(Ordering::Relaxed) {
        // duplicates allowed, so this never comes back as an error
        let _ = queue.insert(Package::placeholder(), random_key(&mut rng), DuplicatePolicy::Allow);
        if queue.count() > limit {
            break;
        }
    }
    info!(count = queue.count(), span = ?queue.span(), "fill stopped");
    println!();

    let stdout = io::stdout();
    driver::drain(&queue, order, &mut stdout.lock(), drop)?;
    Ok(())
}
