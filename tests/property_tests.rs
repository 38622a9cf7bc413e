//! Property tests for frame validation and the end-to-end bit path.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32
//! targets.

#![cfg(not(target_os = "espidf"))]

use proptest::prelude::*;
use roomsense::hal::sim::SimBus;
use roomsense::sensors::dht11::{validate, Dht11, DhtError};

fn checksum(data: [u8; 4]) -> u8 {
    data[0]
        .wrapping_add(data[1])
        .wrapping_add(data[2])
        .wrapping_add(data[3])
}

proptest! {
    /// Acceptance holds iff byte 4 equals the truncated sum of bytes 0–3.
    #[test]
    fn matching_checksum_always_accepted(data in proptest::array::uniform4(any::<u8>())) {
        let frame = [data[0], data[1], data[2], data[3], checksum(data)];
        let reading = validate(&frame).unwrap();
        prop_assert_eq!(reading.humidity_pct, data[0]);
        prop_assert_eq!(reading.temperature_c, data[2]);
    }

    /// Any nonzero perturbation of the checksum byte flips the outcome.
    #[test]
    fn perturbed_checksum_always_rejected(
        data in proptest::array::uniform4(any::<u8>()),
        delta in 1u8..=255u8,
    ) {
        let frame = [data[0], data[1], data[2], data[3], checksum(data).wrapping_add(delta)];
        prop_assert_eq!(validate(&frame), Err(DhtError::Checksum));
    }

    /// Single-bit corruption of the checksum byte alone is always caught.
    #[test]
    fn single_bit_corruption_of_checksum_detected(
        data in proptest::array::uniform4(any::<u8>()),
        bit in 0u8..8u8,
    ) {
        let frame = [data[0], data[1], data[2], data[3], checksum(data) ^ (1 << bit)];
        prop_assert_eq!(validate(&frame), Err(DhtError::Checksum));
    }

    /// Any checksum-consistent frame played on the wire decodes to its
    /// data bytes — the capture path neither drops nor reorders bits.
    #[test]
    fn transceiver_decodes_arbitrary_valid_frames(data in proptest::array::uniform4(any::<u8>())) {
        let frame = [data[0], data[1], data[2], data[3], checksum(data)];

        let mut waveform = vec![(80, false), (80, true)];
        for byte in frame {
            for bit in (0..8).rev() {
                waveform.push((50, false));
                waveform.push((if byte >> bit & 1 == 1 { 70 } else { 26 }, true));
            }
        }
        waveform.push((50, false));

        let bus = SimBus::new(waveform);
        let (line, clock, delay) = bus.ports();
        let reading = Dht11::new(line, clock, delay).read().unwrap();
        prop_assert_eq!(reading.humidity_pct, data[0]);
        prop_assert_eq!(reading.temperature_c, data[2]);
    }
}
