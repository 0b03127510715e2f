//! Cooperative shutdown.
//!
//! SIGINT / SIGTERM set a process-wide flag; the acquisition loop checks it
//! between cycles and while sleeping, so a cycle in progress always finishes
//! and its record is written before the sink is closed.
//!
//! ```text
//!  signal thread ──store(true)──▶ STOP ◀──load── main loop / sleep slices
//! ```

use core::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use log::info;

/// Granularity of [`sleep_interruptible`]; bounds shutdown latency.
pub const SLEEP_SLICE: Duration = Duration::from_millis(100);

static STOP: AtomicBool = AtomicBool::new(false);

/// Ask the acquisition loop to stop after the current cycle.
pub fn request() {
    STOP.store(true, Ordering::Release);
}

/// Has a stop been requested?
pub fn requested() -> bool {
    STOP.load(Ordering::Acquire)
}

/// Route SIGINT and SIGTERM to [`request`].  Call once, before the loop.
pub fn install_signal_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        info!("Shutdown requested by signal");
        request();
    })
}

/// Sleep for `total`, waking early if a stop is requested.
///
/// Returns `true` when the full duration elapsed, `false` on early wake.
pub fn sleep_interruptible(total: Duration) -> bool {
    sleep_unless(total, &STOP)
}

fn sleep_unless(total: Duration, stop: &AtomicBool) -> bool {
    let deadline = Instant::now() + total;
    loop {
        if stop.load(Ordering::Acquire) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep(SLEEP_SLICE.min(deadline - now));
    }
}
