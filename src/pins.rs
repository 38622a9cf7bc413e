//! GPIO pin assignments for the RoomSense board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

/// DHT11 data line. Single shared wire: host-driven during the start
/// signal, sensor-driven during response and bit transmission.
/// Idles open-drain high (external 4.7 kΩ pull-up).
pub const DHT_DATA_GPIO: i32 = 4;

/// IR obstacle detector output. Active-low: the module pulls the line
/// low when an object enters range, so the interrupt fires on the
/// falling edge. Internal pull-up enabled.
pub const OBSTACLE_GPIO: i32 = 27;
