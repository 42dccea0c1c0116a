//! # rs-glowband
//!
//! Firmware library for a wearable LED band with a capacitive touch button,
//! battery monitoring, and a single-byte BLE command protocol.
//!
//! ## Features
//!
//! - **Hardware abstraction**: Traits for the touch sensor peripheral and battery monitor
//! - **Touch-activation monitor**: Baseline calibration, interrupt or filtered-value
//!   detection, debounce, diagnostic activation counter
//! - **BLE command table**: Wire-compatible command bytes for the companion app
//! - **Device configuration**: Touch, WiFi-relay, battery, and identity settings
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Hardware abstractions
//! - `touch` - The touch-activation monitor
//! - `commands` - BLE command byte table
//! - `config` - Device configuration
//! - `board` - Pin assignments and task layout
//! - `hal` - Concrete implementations (mock for testing, esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use rs_glowband::{TouchMonitor, TouchPoll, config::TouchConfig};
//! use rs_glowband::hal::MockTouchSensor;
//!
//! // Create a monitor with a mock sensor; the pad reads 300 at rest
//! let mut sensor = MockTouchSensor::new();
//! sensor.queue_sample(300);
//!
//! let mut monitor = TouchMonitor::new(sensor, TouchConfig::default());
//! monitor.calibrate().unwrap();
//!
//! // A filtered sample below 80% of the baseline is a touch
//! monitor.sensor_mut().queue_sample(150);
//! assert_eq!(monitor.poll(0).unwrap(), TouchPoll::Activated);
//! assert_eq!(monitor.activation_count(), 1);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Pin assignments and task layout for the band hardware.
pub mod board;
/// BLE command byte table shared with the companion app.
pub mod commands;
/// Shared configuration system for desktop and ESP32.
pub mod config;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Touch-activation monitor.
pub mod touch;
/// Core traits for hardware abstraction.
pub mod traits;

// Re-exports for convenience
pub use commands::{BtCommand, CommandStatus, WifiLinkResult};
pub use config::{BatteryConfig, Config, DeviceConfig, TouchConfig, WifiConfig};
pub use touch::{DetectionMode, RearmPolicy, TouchMonitor, TouchPoll, TouchSignal, TouchState};
pub use traits::{BatteryMonitor, Clock, TouchSensor};
