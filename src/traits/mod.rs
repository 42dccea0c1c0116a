//! Trait definitions for hardware abstraction.
//!
//! This module defines the core abstractions that allow rs-glowband to
//! run on different hardware (ESP32, desktop mock).
//!
//! # Submodules
//!
//! - `hardware`: Touch sensor, battery monitor, clock
//!
//! # Hardware Abstraction
//!
//! The key hardware traits are:
//!
//! - [`TouchSensor`]: Capacitive touch pad peripheral
//! - [`BatteryMonitor`]: Battery voltage and charge level
//! - [`Clock`]: Time source for `no_std` environments

pub mod hardware;

pub use hardware::*;
