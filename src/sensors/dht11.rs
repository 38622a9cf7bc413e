//! Bit-banged DHT11 driver.
//!
//! The DHT11 speaks a software-timed single-wire protocol: the host
//! holds the shared line low to request a reading, releases it, and the
//! sensor answers with a presence pulse followed by 40 data bits. Each
//! bit is a fixed-width low preamble plus a high pulse whose duration
//! encodes the value (~26–28 µs for 0, ~70 µs for 1).
//!
//! The driver is generic over the [`hal`](crate::hal) ports so the full
//! state machine runs against the scripted bus in host tests. One call
//! to [`Dht11::read`] is one protocol run; the caller owns the cadence
//! (the sensor needs over a second between runs) and must not re-enter
//! before a run completes.

use log::debug;

use crate::hal::{DataLine, Delay, MonotonicClock};
use crate::sensors::signal::await_level;

// Wire-format constants. These mirror the DHT11 datasheet timings and
// must not be tuned: the 40 µs threshold splits the ~28 µs "0" pulse
// from the ~70 µs "1" pulse.
const START_HOLD_LOW_MS: u32 = 20;
const START_RELEASE_HIGH_US: u32 = 30;
const PHASE_TIMEOUT_US: i64 = 100;
const BIT_ONE_THRESHOLD_US: i64 = 40;
const FRAME_BITS: usize = 40;
const FRAME_BYTES: usize = 5;

/// One decoded measurement. Integer-degree / integer-percent resolution
/// is all the DHT11 provides; the frame's fractional bytes are captured
/// for the checksum but always zero on this sensor class and not
/// surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorReading {
    pub humidity_pct: u8,
    pub temperature_c: u8,
}

/// Terminal outcome of a failed protocol run. Neither variant is fatal
/// to the process; the next poll cycle is the only retry mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DhtError {
    /// A phase wait exceeded its budget — sensor absent, disconnected,
    /// or protocol desync.
    Timeout,
    /// All 40 bits arrived but the integrity check failed — electrical
    /// noise on the wire.
    Checksum,
}

impl core::fmt::Display for DhtError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Timeout => write!(f, "connection timeout"),
            Self::Checksum => write!(f, "checksum mismatch (noise)"),
        }
    }
}

/// DHT11 transceiver bound to one data line, one clock, and one delay
/// provider.
pub struct Dht11<L, C, D> {
    line: L,
    clock: C,
    delay: D,
}

impl<L, C, D> Dht11<L, C, D>
where
    L: DataLine,
    C: MonotonicClock,
    D: Delay,
{
    pub fn new(line: L, clock: C, delay: D) -> Self {
        Self { line, clock, delay }
    }

    /// Run one complete protocol cycle and decode the result.
    ///
    /// Exactly one outcome per invocation; a timeout in any phase aborts
    /// the whole run and no partial frame escapes.
    pub fn read(&mut self) -> Result<SensorReading, DhtError> {
        let frame = self.capture_frame()?;
        validate(&frame)
    }

    /// Drive the start signal and capture the 40-bit answer.
    fn capture_frame(&mut self) -> Result<[u8; FRAME_BYTES], DhtError> {
        // Host start: hold low, brief high, then hand the wire over.
        self.line.set_output();
        self.line.write(false);
        self.delay.delay_ms(START_HOLD_LOW_MS);
        self.line.write(true);
        self.delay.delay_us(START_RELEASE_HIGH_US);
        self.line.set_input();

        // Sensor presence: ~80 µs low, ~80 µs high, then the first bit's
        // low preamble. Each transition gets the same 100 µs budget.
        self.await_edge(false)?;
        self.await_edge(true)?;
        self.await_edge(false)?;

        // 40 bits, MSB first, 8 per byte, in capture order.
        let mut frame = [0u8; FRAME_BYTES];
        for i in 0..FRAME_BITS {
            self.await_edge(true)?;
            let high_us = self.await_edge(false)?;
            if high_us > BIT_ONE_THRESHOLD_US {
                frame[i / 8] |= 1 << (7 - (i % 8));
            }
        }
        Ok(frame)
    }

    fn await_edge(&self, target: bool) -> Result<i64, DhtError> {
        await_level(&self.line, &self.clock, target, PHASE_TIMEOUT_US).map_err(|_| {
            debug!(
                "dht11: line never went {} within {} us",
                if target { "high" } else { "low" },
                PHASE_TIMEOUT_US
            );
            DhtError::Timeout
        })
    }
}

/// Integrity-check a captured frame and decode it.
///
/// The checksum byte must equal the modulo-256 sum of the four data
/// bytes. Pure function — separated from the capture path so it can be
/// tested exhaustively without a waveform.
pub fn validate(frame: &[u8; FRAME_BYTES]) -> Result<SensorReading, DhtError> {
    let sum = frame[0]
        .wrapping_add(frame[1])
        .wrapping_add(frame[2])
        .wrapping_add(frame[3]);
    if frame[4] != sum {
        return Err(DhtError::Checksum);
    }
    Ok(SensorReading {
        humidity_pct: frame[0],
        temperature_c: frame[2],
    })
}
