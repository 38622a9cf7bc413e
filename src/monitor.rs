//! Poll-loop orchestrator.
//!
//! Fixed-cadence driver of the whole system: each cycle drains the
//! obstacle latch, runs the DHT11 transceiver exactly once, and reports
//! both outcomes. The monitor is the transceiver's sole caller, which
//! is what guarantees the shared data line has at most one owner at a
//! time and that runs never overlap.

use crate::config::MonitorConfig;
use crate::hal::{DataLine, Delay, MonotonicClock};
use crate::report::{Report, ReportSink};
use crate::sensors::dht11::{Dht11, DhtError};
use crate::sensors::obstacle::ObstacleLatch;

pub struct Monitor<L, C, D, S> {
    dht: Dht11<L, C, D>,
    latch: ObstacleLatch,
    sink: S,
    config: MonitorConfig,
}

impl<L, C, D, S> Monitor<L, C, D, S>
where
    L: DataLine,
    C: MonotonicClock,
    D: Delay,
    S: ReportSink,
{
    pub fn new(dht: Dht11<L, C, D>, latch: ObstacleLatch, sink: S, config: MonitorConfig) -> Self {
        Self {
            dht,
            latch,
            sink,
            config,
        }
    }

    /// One poll iteration: obstacle event first, then one protocol run.
    ///
    /// A failed run is reported and dropped — the next scheduled cycle
    /// is the only retry mechanism.
    pub fn run_cycle(&mut self) {
        if self.latch.drain() {
            self.sink.report(&Report::ObstacleDetected);
        }

        match self.dht.read() {
            Ok(reading) => self.sink.report(&Report::Environment(reading)),
            Err(DhtError::Timeout) => self.sink.report(&Report::SensorTimeout),
            Err(DhtError::Checksum) => self.sink.report(&Report::ChecksumMismatch),
        }
    }

    /// Consume the monitor and hand back its sink (test inspection).
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Run forever at the configured cadence.
    pub fn run(&mut self) -> ! {
        loop {
            self.run_cycle();
            self.idle_sleep();
        }
    }

    /// Inter-cycle sleep. Yields the processor — the only blocking point
    /// of the main loop; all waits inside a protocol run are µs-bounded
    /// spins.
    fn idle_sleep(&self) {
        #[cfg(target_os = "espidf")]
        esp_idf_hal::delay::FreeRtos::delay_ms(self.config.poll_interval_ms);

        #[cfg(not(target_os = "espidf"))]
        std::thread::sleep(std::time::Duration::from_millis(u64::from(
            self.config.poll_interval_ms,
        )));
    }
}
