//! Bounded level wait — the timing primitive under the DHT11 transceiver.

use crate::hal::{DataLine, MonotonicClock};

/// The line did not reach the target level within the allotted budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitTimeout;

impl core::fmt::Display for WaitTimeout {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "level wait timed out")
    }
}

/// Busy-poll `line` until it reads `target`, returning the elapsed
/// microseconds, or [`WaitTimeout`] once more than `timeout_us` have
/// passed without the level being reached.
///
/// Returns ~0 if the line already reads `target` on entry. The spin is
/// deliberate: these waits are bounded to the low hundreds of
/// microseconds and the protocol depends on µs-granularity response, so
/// a yielding sleep would corrupt the measurement.
pub fn await_level<L, C>(line: &L, clock: &C, target: bool, timeout_us: i64) -> Result<i64, WaitTimeout>
where
    L: DataLine,
    C: MonotonicClock,
{
    let start = clock.now_us();
    while line.read() != target {
        if clock.now_us() - start > timeout_us {
            return Err(WaitTimeout);
        }
    }
    Ok(clock.now_us() - start)
}
