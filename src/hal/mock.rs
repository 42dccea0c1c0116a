//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for the hardware traits, enabling
//! development and testing on desktop without a physical band.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockTouchSensor`] | [`TouchSensor`] | Queued filtered samples, simulated interrupt edges |
//! | [`MockBattery`] | [`BatteryMonitor`] | Settable voltage |
//! | [`MockClock`] | [`Clock`] | Controllable time source |
//!
//! # Example
//!
//! ```rust
//! use rs_glowband::{TouchMonitor, TouchPoll, config::TouchConfig};
//! use rs_glowband::hal::MockTouchSensor;
//!
//! let mut sensor = MockTouchSensor::new();
//! sensor.queue_sample(300); // calibration sample
//!
//! let mut monitor = TouchMonitor::new(sensor, TouchConfig::default());
//! monitor.calibrate().unwrap();
//!
//! monitor.sensor_mut().queue_sample(150);
//! assert_eq!(monitor.poll(0).unwrap(), TouchPoll::Activated);
//! ```
//!
//! [`TouchSensor`]: crate::traits::TouchSensor
//! [`BatteryMonitor`]: crate::traits::BatteryMonitor
//! [`Clock`]: crate::traits::Clock

use crate::touch::TouchSignal;
use crate::traits::{BatteryMonitor, Clock, TouchSensor};

extern crate alloc;
use alloc::vec::Vec;

// ============================================================================
// Touch Sensor Mock
// ============================================================================

/// Mock touch sensor for testing.
///
/// Queue filtered samples to script what the monitor reads; when the queue
/// runs dry the last sample repeats, which models a pad sitting at a steady
/// reading. [`fire_interrupt`](Self::fire_interrupt) simulates a hardware
/// edge, respecting the interrupt-enable state the way the peripheral would.
///
/// # Example
///
/// ```rust
/// use rs_glowband::hal::MockTouchSensor;
/// use rs_glowband::traits::TouchSensor;
///
/// let mut sensor = MockTouchSensor::new();
/// sensor.queue_samples(&[300, 250]);
///
/// assert_eq!(sensor.read_filtered(7).unwrap(), 300);
/// assert_eq!(sensor.read_filtered(7).unwrap(), 250);
/// // Queue empty: last sample repeats
/// assert_eq!(sensor.read_filtered(7).unwrap(), 250);
/// ```
#[derive(Debug, Default)]
pub struct MockTouchSensor {
    /// Pending filtered samples, consumed front-first.
    samples: Vec<u16>,
    /// Value returned once the queue is empty.
    last_sample: u16,
    /// Last threshold written per pad (pad, value).
    pub thresholds: Vec<(u8, u16)>,
    /// Whether hardware interrupt generation is enabled.
    pub interrupt_enabled: bool,
    /// Pending interrupt status bitmask.
    pub status: u16,
    /// Number of `enable_interrupt` calls.
    pub enable_calls: usize,
    /// Number of `disable_interrupt` calls.
    pub disable_calls: usize,
    /// Number of `clear_status` calls.
    pub clear_status_calls: usize,
    /// Force every operation to fail.
    pub fail: bool,
    signal: Option<TouchSignal>,
}

impl MockTouchSensor {
    /// Creates a new mock sensor with no queued samples.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one filtered sample.
    pub fn queue_sample(&mut self, value: u16) {
        self.samples.push(value);
    }

    /// Queue several filtered samples, read in order.
    pub fn queue_samples(&mut self, values: &[u16]) {
        self.samples.extend_from_slice(values);
    }

    /// Simulate a hardware interrupt edge on a pad.
    ///
    /// Latches the pad's status bit. If interrupts are enabled and a signal
    /// is registered, runs the ISR path: snapshot the status, clear it,
    /// notify the signal. With interrupts disabled the bit stays pending
    /// until [`clear_status`](TouchSensor::clear_status).
    pub fn fire_interrupt(&mut self, pad: u8) {
        self.status |= 1u16 << pad;
        if self.interrupt_enabled {
            if let Some(signal) = &self.signal {
                let snapshot = self.status;
                self.status = 0;
                signal.on_touch_interrupt(snapshot);
            }
        }
    }

    /// The last threshold written for a pad, if any.
    pub fn threshold_for(&self, pad: u8) -> Option<u16> {
        self.thresholds
            .iter()
            .rev()
            .find(|(p, _)| *p == pad)
            .map(|(_, v)| *v)
    }

    /// Whether a signal has been registered.
    pub fn has_signal(&self) -> bool {
        self.signal.is_some()
    }
}

impl TouchSensor for MockTouchSensor {
    type Error = ();

    fn read_filtered(&mut self, _pad: u8) -> Result<u16, ()> {
        if self.fail {
            return Err(());
        }
        if !self.samples.is_empty() {
            self.last_sample = self.samples.remove(0);
        }
        Ok(self.last_sample)
    }

    fn set_threshold(&mut self, pad: u8, value: u16) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.thresholds.push((pad, value));
        Ok(())
    }

    fn interrupt_status(&mut self) -> Result<u16, ()> {
        if self.fail {
            return Err(());
        }
        Ok(self.status)
    }

    fn clear_status(&mut self) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.status = 0;
        self.clear_status_calls += 1;
        Ok(())
    }

    fn enable_interrupt(&mut self) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.interrupt_enabled = true;
        self.enable_calls += 1;
        Ok(())
    }

    fn disable_interrupt(&mut self) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.interrupt_enabled = false;
        self.disable_calls += 1;
        Ok(())
    }

    fn register_signal(&mut self, signal: TouchSignal) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.signal = Some(signal);
        Ok(())
    }
}

// ============================================================================
// Battery Mock
// ============================================================================

/// Mock battery monitor for testing.
///
/// # Example
///
/// ```rust
/// use rs_glowband::hal::MockBattery;
/// use rs_glowband::traits::BatteryMonitor;
///
/// let mut battery = MockBattery::at_millivolts(3750);
/// assert_eq!(battery.level_percent().unwrap(), 50);
/// ```
#[derive(Debug)]
pub struct MockBattery {
    /// Simulated battery voltage.
    pub millivolts: u16,
    /// Force reads to fail.
    pub fail: bool,
}

impl MockBattery {
    /// Creates a mock battery at full charge.
    pub fn new() -> Self {
        Self {
            millivolts: crate::traits::BATTERY_FULL_MV,
            fail: false,
        }
    }

    /// Creates a mock battery at the given voltage.
    pub fn at_millivolts(millivolts: u16) -> Self {
        Self {
            millivolts,
            fail: false,
        }
    }
}

impl Default for MockBattery {
    fn default() -> Self {
        Self::new()
    }
}

impl BatteryMonitor for MockBattery {
    type Error = ();

    fn read_millivolts(&mut self) -> Result<u16, ()> {
        if self.fail {
            return Err(());
        }
        Ok(self.millivolts)
    }
}

// ============================================================================
// Clock Mock
// ============================================================================

/// Mock clock for testing.
///
/// Provides a controllable time source for testing time-dependent behavior.
///
/// # Example
///
/// ```rust
/// use rs_glowband::hal::MockClock;
/// use rs_glowband::traits::Clock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.set(1000);
/// assert_eq!(clock.now_ms(), 1000);
///
/// clock.advance(500);
/// assert_eq!(clock.now_ms(), 1500);
/// ```
#[derive(Debug)]
pub struct MockClock {
    current_ms: u64,
}

impl MockClock {
    /// Creates a new mock clock starting at 0ms.
    pub fn new() -> Self {
        Self { current_ms: 0 }
    }

    /// Sets the current time in milliseconds.
    pub fn set(&mut self, ms: u64) {
        self.current_ms = ms;
    }

    /// Advances the clock by the given duration.
    pub fn advance(&mut self, ms: u64) {
        self.current_ms += ms;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.current_ms
    }
}

// ============================================================================
// Tests
// ============================================================================
