//! ESP32 hardware abstraction layer for the band.
//!
//! This module provides the hardware implementations for the ESP32 module
//! driving the wearable: the RTC touch peripheral behind the enclosure
//! shell, and the battery divider on the ADC.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32 (dual-core Xtensa, 4MB Flash)
//! - **Touch button**: RTC touch pad 7 (GPIO27), under 2-3mm of enclosure plastic
//! - **Battery**: 1S LiPo through a 1:2 divider on GPIO2 (ADC2)
//!
//! Pin assignments live in [`crate::board`].

mod battery;
mod clock;
mod touch;

pub use battery::Esp32Battery;
pub use clock::Esp32Clock;
pub use touch::Esp32TouchSensor;
