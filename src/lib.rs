//! RoomSense firmware library.
//!
//! Exposes the logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod config;
pub mod drivers;
pub mod hal;
pub mod monitor;
pub mod pins;
pub mod report;
pub mod sensors;
