//! System configuration parameters.
//!
//! The DHT11 protocol's phase budgets are fixed wire-format constants and
//! live in [`crate::sensors::dht11`]; only loop-level parameters appear here.

/// Core monitor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Poll loop cadence (milliseconds between cycles).
    ///
    /// The DHT11 needs over a second between reads to recover, so this
    /// must stay above 1000 ms.
    pub poll_interval_ms: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = MonitorConfig::default();
        assert!(c.poll_interval_ms >= 1000);
    }
}
