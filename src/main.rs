//! RoomSense firmware — main entry point.
//!
//! Bootstrap order: ESP-IDF runtime patches, logger, peripheral
//! bring-up, ISR registration, then the monitor poll loop. The loop is
//! the sole caller of the DHT11 transceiver; the obstacle ISR only ever
//! touches its latch.

#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info};

use roomsense::config::MonitorConfig;
use roomsense::drivers::hw_init;
use roomsense::hal::{EspClock, EspDataLine, EspDelay};
use roomsense::monitor::Monitor;
use roomsense::pins;
use roomsense::report::LogReportSink;
use roomsense::sensors::dht11::Dht11;
use roomsense::sensors::obstacle::ObstacleLatch;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("RoomSense v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripheral bring-up ────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    if let Err(e) = hw_init::init_isr_service() {
        error!("ISR init failed: {} — continuing without obstacle events", e);
    }

    // ── 3. Construct the monitor ──────────────────────────────
    let dht = Dht11::new(
        EspDataLine::new(pins::DHT_DATA_GPIO),
        EspClock::new(),
        EspDelay::new(),
    );
    let latch = ObstacleLatch::new(pins::OBSTACLE_GPIO);
    let mut monitor = Monitor::new(dht, latch, LogReportSink::new(), MonitorConfig::default());

    info!("System initialized. Monitoring for obstacles and environment...");

    // ── 4. Poll loop ──────────────────────────────────────────
    monitor.run()
}
