//! Report sink — the port between the monitor loop and the console.
//!
//! The monitor emits one [`Report`] per observable outcome through this
//! trait; [`LogReportSink`] writes them as human-readable lines via the
//! `log` crate (UART / USB-CDC on target). Tests substitute a recording
//! sink.

use log::{info, warn};

use crate::sensors::dht11::SensorReading;

/// One observable outcome of a poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    /// A full protocol run succeeded.
    Environment(SensorReading),
    /// A protocol phase timed out; no reading this cycle.
    SensorTimeout,
    /// The 40-bit frame arrived but failed its integrity check.
    ChecksumMismatch,
    /// At least one obstacle edge occurred since the previous cycle.
    ObstacleDetected,
}

/// Output port for cycle outcomes.
pub trait ReportSink {
    fn report(&mut self, report: &Report);
}

/// Adapter that logs every [`Report`] to the serial console.
pub struct LogReportSink;

impl LogReportSink {
    pub fn new() -> Self {
        Self
    }
}

impl ReportSink for LogReportSink {
    fn report(&mut self, report: &Report) {
        match report {
            Report::Environment(r) => {
                info!(
                    "Room Data -> Temp: {} C | Humidity: {} %",
                    r.temperature_c, r.humidity_pct
                );
            }
            Report::SensorTimeout => warn!("DHT error: connection timeout"),
            Report::ChecksumMismatch => warn!("DHT error: checksum mismatch (noise)"),
            Report::ObstacleDetected => info!(">>> [EVENT] OBSTACLE DETECTED <<<"),
        }
    }
}
