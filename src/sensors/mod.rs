//! Sensor subsystem — the DHT11 transceiver and the obstacle event latch.

pub mod dht11;
pub mod obstacle;
pub mod signal;
