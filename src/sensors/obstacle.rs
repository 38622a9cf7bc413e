//! IR obstacle detector — falling-edge interrupt latch.
//!
//! The detector pulls its output low when an object enters range; the
//! GPIO ISR fires on that edge and sets a single atomic flag. The poll
//! loop drains the flag once per cycle. Multiple edges between drains
//! coalesce into one event — the latch counts presence, not edges.
//!
//! Concurrency shape: exactly one writer (the ISR) and one reader (the
//! poll loop). A lock-free `AtomicBool` with release/acquire ordering
//! is all the synchronisation this needs; the reader never blocks.

use core::sync::atomic::{AtomicBool, Ordering};

/// Set by the GPIO ISR, cleared by [`ObstacleLatch::drain`].
/// `static` because ISR callbacks in ESP-IDF cannot capture closures.
static OBSTACLE_FLAG: AtomicBool = AtomicBool::new(false);

/// Called from the GPIO ISR on each falling edge.
/// Constant-time, allocation-free, no computation beyond the store —
/// keep it that way so the handler stays resident in IRAM and minimal.
pub fn obstacle_isr_handler() {
    OBSTACLE_FLAG.store(true, Ordering::Release);
}

/// Poll-loop handle to the latch. The sole reader; constructing more
/// than one would break the single-consumer contract of `drain`.
pub struct ObstacleLatch {
    /// GPIO pin number (stored for diagnostics / re-init).
    _gpio: i32,
}

impl ObstacleLatch {
    pub fn new(gpio: i32) -> Self {
        Self { _gpio: gpio }
    }

    /// Atomically read-and-clear the flag. Returns whether at least one
    /// edge occurred since the previous drain.
    pub fn drain(&mut self) -> bool {
        OBSTACLE_FLAG.swap(false, Ordering::Acquire)
    }
}
