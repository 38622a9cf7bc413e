//! Host-side protocol scenarios against the scripted waveform bus.
//!
//! Runs on host (x86_64) only — the simulator is compiled out on ESP32.

#![cfg(not(target_os = "espidf"))]

use roomsense::config::MonitorConfig;
use roomsense::hal::sim::SimBus;
use roomsense::monitor::Monitor;
use roomsense::report::{Report, ReportSink};
use roomsense::sensors::dht11::{Dht11, DhtError};
use roomsense::sensors::obstacle::{obstacle_isr_handler, ObstacleLatch};

// ── Waveform builders ─────────────────────────────────────────

/// Sensor-side waveform for a 5-byte frame: 80 µs presence low, 80 µs
/// presence high, then per bit a 50 µs low preamble and a high pulse of
/// 26 µs (0) or 70 µs (1), MSB first.
fn frame_waveform(frame: [u8; 5]) -> Vec<(i64, bool)> {
    let mut w = vec![(80, false), (80, true)];
    for byte in frame {
        for bit in (0..8).rev() {
            w.push((50, false));
            w.push((if byte >> bit & 1 == 1 { 70 } else { 26 }, true));
        }
    }
    w.push((50, false));
    w
}

/// Same shape, but with an explicit high-pulse duration per bit.
fn waveform_from_durations(durations: &[i64; 40]) -> Vec<(i64, bool)> {
    let mut w = vec![(80, false), (80, true)];
    for &d in durations {
        w.push((50, false));
        w.push((d, true));
    }
    w.push((50, false));
    w
}

fn dht_on(waveform: Vec<(i64, bool)>) -> Dht11<impl roomsense::hal::DataLine, impl roomsense::hal::MonotonicClock, impl roomsense::hal::Delay> {
    let bus = SimBus::new(waveform);
    let (line, clock, delay) = bus.ports();
    Dht11::new(line, clock, delay)
}

// ── Recording sink ────────────────────────────────────────────

#[derive(Default)]
struct RecordingSink {
    reports: Vec<Report>,
}

impl ReportSink for RecordingSink {
    fn report(&mut self, report: &Report) {
        self.reports.push(*report);
    }
}

// ── Scenario A: success ───────────────────────────────────────

#[test]
fn full_read_decodes_valid_frame() {
    // humidity=45, temp=22, checksum=45+0+22+0=67
    let mut dht = dht_on(frame_waveform([0x2D, 0x00, 0x16, 0x00, 0x43]));
    let reading = dht.read().expect("valid waveform must decode");
    assert_eq!(reading.humidity_pct, 45);
    assert_eq!(reading.temperature_c, 22);
}

// ── Scenario B: no sensor response ────────────────────────────

#[test]
fn silent_line_times_out() {
    // Empty waveform: the line never drops after the host releases it.
    let mut dht = dht_on(vec![]);
    assert_eq!(dht.read(), Err(DhtError::Timeout));
}

#[test]
fn stall_mid_capture_times_out() {
    // Presence pulse plus a few bits, then the line goes dead. Prior
    // phase successes must not rescue the run.
    let full = frame_waveform([0x2D, 0x00, 0x16, 0x00, 0x43]);
    let truncated: Vec<_> = full.into_iter().take(12).collect();
    let mut dht = dht_on(truncated);
    assert_eq!(dht.read(), Err(DhtError::Timeout));
}

// ── Scenario C: corrupted checksum ────────────────────────────

#[test]
fn corrupted_checksum_is_reported_as_such() {
    let mut dht = dht_on(frame_waveform([0x2D, 0x00, 0x16, 0x00, 0x44]));
    assert_eq!(dht.read(), Err(DhtError::Checksum));
}

// ── Bit classification boundary ───────────────────────────────

#[test]
fn forty_microsecond_pulse_decodes_as_zero() {
    // Every pulse exactly 40 µs ⇒ all-zero frame, checksum 0 — valid.
    let mut dht = dht_on(waveform_from_durations(&[40; 40]));
    let reading = dht.read().expect("all-zero frame is checksum-valid");
    assert_eq!(reading.humidity_pct, 0);
    assert_eq!(reading.temperature_c, 0);
}

#[test]
fn forty_one_microsecond_pulse_decodes_as_one() {
    // MSB of byte 0 and MSB of the checksum byte at 41 µs, the rest at
    // 40 µs: frame [0x80, 0, 0, 0, 0x80], which is checksum-valid.
    let mut durations = [40i64; 40];
    durations[0] = 41;
    durations[32] = 41;
    let mut dht = dht_on(waveform_from_durations(&durations));
    let reading = dht.read().expect("0x80 frame is checksum-valid");
    assert_eq!(reading.humidity_pct, 0x80);
    assert_eq!(reading.temperature_c, 0);
}

// ── Scenario D: obstacle event coalescing through the monitor ─

#[test]
fn monitor_cycle_coalesces_obstacle_events() {
    let bus = SimBus::new(frame_waveform([0x2D, 0x00, 0x16, 0x00, 0x43]));
    let (line, clock, delay) = bus.ports();
    let mut monitor = Monitor::new(
        Dht11::new(line, clock, delay),
        ObstacleLatch::new(27),
        RecordingSink::default(),
        MonitorConfig::default(),
    );

    // Two falling edges before the next poll iteration.
    obstacle_isr_handler();
    obstacle_isr_handler();

    monitor.run_cycle();
    monitor.run_cycle();

    let reports = monitor.into_sink().reports;
    assert_eq!(
        reports,
        vec![
            // Cycle 1: exactly one coalesced event, reported before the
            // sensor outcome.
            Report::ObstacleDetected,
            Report::Environment(roomsense::sensors::dht11::SensorReading {
                humidity_pct: 45,
                temperature_c: 22,
            }),
            // Cycle 2: latch drained, nothing new.
            Report::Environment(roomsense::sensors::dht11::SensorReading {
                humidity_pct: 45,
                temperature_c: 22,
            }),
        ]
    );
}
