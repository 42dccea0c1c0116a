//! Hardware abstraction traits for the touch sensor, battery monitor, and clock.
//!
//! This module defines the core hardware interfaces that allow rs-glowband to
//! work across different platforms (ESP32, desktop mocks, etc.).
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`TouchSensor`] | Capacitive touch pad peripheral (filtered reads, interrupt control) |
//! | [`BatteryMonitor`] | Battery voltage sensing and percent estimation |
//! | [`Clock`] | Time source for `no_std` environments |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations
//! from [`crate::hal::mock`]. For ESP32 hardware, use the
//! implementations from `hal::esp32` (requires `esp32` feature).
//!
//! # Example
//!
//! ```rust
//! use rs_glowband::traits::TouchSensor;
//! use rs_glowband::hal::MockTouchSensor;
//!
//! let mut sensor = MockTouchSensor::new();
//! sensor.queue_sample(300);
//!
//! let value = sensor.read_filtered(7).unwrap();
//! assert_eq!(value, 300);
//! ```

use crate::touch::TouchSignal;

/// Capacitive touch sensor peripheral trait.
///
/// Abstracts an RTC touch peripheral with per-pad filtered readings, a
/// hardware interrupt threshold register, and interrupt status flags.
/// The monitor drives this interface; bring-up (voltage references, filter
/// timer start) belongs to the concrete implementation's constructor.
///
/// # Implementation Notes
///
/// - `read_filtered` returns the firmware-smoothed sample, not a raw one
/// - `interrupt_status` returns a bitmask with one bit per pad
/// - `register_signal` installs the monitor's ISR handle; the implementation's
///   interrupt handler must read the status register, clear it, and forward
///   the snapshot to [`TouchSignal::on_touch_interrupt`] without blocking
///
/// # Example Implementation
///
/// ```rust,ignore
/// use rs_glowband::traits::TouchSensor;
/// use rs_glowband::touch::TouchSignal;
///
/// struct MySensor { /* hardware handles */ }
///
/// impl TouchSensor for MySensor {
///     type Error = ();
///
///     fn read_filtered(&mut self, pad: u8) -> Result<u16, ()> {
///         // Read the filtered-value register for the pad...
///         Ok(300)
///     }
///
///     // ...remaining register accessors...
/// }
/// ```
pub trait TouchSensor {
    /// Error type for peripheral operations.
    type Error;

    /// Read the current filtered sample for a pad. Blocking but fast.
    fn read_filtered(&mut self, pad: u8) -> Result<u16, Self::Error>;

    /// Write the hardware interrupt threshold register for a pad.
    ///
    /// The peripheral fires an interrupt when the pad's reading crosses
    /// below this value.
    fn set_threshold(&mut self, pad: u8, value: u16) -> Result<(), Self::Error>;

    /// Read the interrupt status bitmask (one bit per pad).
    fn interrupt_status(&mut self) -> Result<u16, Self::Error>;

    /// Clear all pending interrupt status bits.
    fn clear_status(&mut self) -> Result<(), Self::Error>;

    /// Enable hardware interrupt generation.
    fn enable_interrupt(&mut self) -> Result<(), Self::Error>;

    /// Disable hardware interrupt generation.
    fn disable_interrupt(&mut self) -> Result<(), Self::Error>;

    /// Install the monitor's interrupt signal handle.
    ///
    /// The implementation's ISR must stay minimal: read the status register,
    /// clear it, call [`TouchSignal::on_touch_interrupt`] with the snapshot.
    fn register_signal(&mut self, signal: TouchSignal) -> Result<(), Self::Error>;
}

/// Battery monitor trait.
///
/// Abstracts the battery-level ADC input. The companion app queries the
/// level over BLE (`GetBatteryLevel`), so the percent estimate should be
/// stable between reads.
pub trait BatteryMonitor {
    /// Error type for battery reads.
    type Error;

    /// Read the battery voltage in millivolts.
    fn read_millivolts(&mut self) -> Result<u16, Self::Error>;

    /// Estimate the charge level as a percentage (0-100).
    ///
    /// Default implementation maps a 1S LiPo linearly from
    /// [`BATTERY_EMPTY_MV`] to [`BATTERY_FULL_MV`]. Override for a
    /// chemistry-specific discharge curve.
    fn level_percent(&mut self) -> Result<u8, Self::Error> {
        let mv = self.read_millivolts()?;
        let clamped = mv.clamp(BATTERY_EMPTY_MV, BATTERY_FULL_MV);
        let span = (BATTERY_FULL_MV - BATTERY_EMPTY_MV) as u32;
        let pct = (clamped - BATTERY_EMPTY_MV) as u32 * 100 / span;
        Ok(pct as u8)
    }
}

/// Voltage considered fully discharged for the default percent mapping (1S LiPo).
pub const BATTERY_EMPTY_MV: u16 = 3300;

/// Voltage considered fully charged for the default percent mapping (1S LiPo).
pub const BATTERY_FULL_MV: u16 = 4200;

/// Time source trait for `no_std` compatibility.
///
/// Provides monotonic time in milliseconds for debounce timing.
/// On desktop, this can wrap `std::time::Instant`. On embedded,
/// use a hardware timer.
///
/// # Example
///
/// ```rust
/// use rs_glowband::traits::Clock;
/// use rs_glowband::hal::MockClock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.advance(100);
/// assert_eq!(clock.now_ms(), 100);
/// ```
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_ms(&self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // BatteryMonitor Default Methods Tests
    // =========================================================================

    struct TestBattery {
        millivolts: u16,
    }

    impl BatteryMonitor for TestBattery {
        type Error = ();

        fn read_millivolts(&mut self) -> Result<u16, ()> {
            Ok(self.millivolts)
        }
    }

    #[test]
    fn battery_percent_full() {
        let mut bat = TestBattery { millivolts: 4200 };
        assert_eq!(bat.level_percent().unwrap(), 100);
    }

    #[test]
    fn battery_percent_empty() {
        let mut bat = TestBattery { millivolts: 3300 };
        assert_eq!(bat.level_percent().unwrap(), 0);
    }

    #[test]
    fn battery_percent_midpoint() {
        let mut bat = TestBattery { millivolts: 3750 };
        assert_eq!(bat.level_percent().unwrap(), 50);
    }

    #[test]
    fn battery_percent_clamps_above_full() {
        let mut bat = TestBattery { millivolts: 5000 };
        assert_eq!(bat.level_percent().unwrap(), 100);
    }

    #[test]
    fn battery_percent_clamps_below_empty() {
        let mut bat = TestBattery { millivolts: 2000 };
        assert_eq!(bat.level_percent().unwrap(), 0);
    }

    // =========================================================================
    // TouchSensor Error Propagation Tests
    // =========================================================================

    struct FailingSensor;

    impl TouchSensor for FailingSensor {
        type Error = &'static str;

        fn read_filtered(&mut self, _pad: u8) -> Result<u16, Self::Error> {
            Err("read failed")
        }

        fn set_threshold(&mut self, _pad: u8, _value: u16) -> Result<(), Self::Error> {
            Err("bad pad")
        }

        fn interrupt_status(&mut self) -> Result<u16, Self::Error> {
            Ok(0)
        }

        fn clear_status(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn enable_interrupt(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn disable_interrupt(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn register_signal(&mut self, _signal: TouchSignal) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn sensor_errors_surface_to_caller() {
        let mut sensor = FailingSensor;
        assert_eq!(sensor.read_filtered(0), Err("read failed"));
        assert_eq!(sensor.set_threshold(0, 100), Err("bad pad"));
    }
}
