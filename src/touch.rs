//! Touch-activation monitor for the band's capacitive button.
//!
//! This module provides [`TouchMonitor`], the component that owns the
//! calibrated baseline, the activation signal shared with the interrupt
//! handler, and the diagnostic activation counter.
//!
//! # Overview
//!
//! The monitor:
//! - Calibrates once at startup against the untouched pad
//! - Detects touches either via the hardware interrupt or by comparing
//!   filtered samples against a fraction of the baseline
//! - Debounces detections with a fixed hold window
//! - Exposes a monotonic activation count for diagnostics
//!
//! # Example
//!
//! ```rust
//! use rs_glowband::{TouchMonitor, TouchPoll, config::TouchConfig};
//! use rs_glowband::hal::MockTouchSensor;
//!
//! let mut sensor = MockTouchSensor::new();
//! sensor.queue_sample(300); // calibration sample, pad at rest
//!
//! let mut monitor = TouchMonitor::new(sensor, TouchConfig::default());
//! let baseline = monitor.calibrate().unwrap();
//! assert_eq!(baseline, 300);
//! // Hardware interrupt threshold is 2/3 of the baseline
//! assert_eq!(monitor.sensor().threshold_for(monitor.pad()), Some(200));
//!
//! // A filtered sample below 80% of the baseline is a touch
//! monitor.sensor_mut().queue_sample(150);
//! assert_eq!(monitor.poll(0).unwrap(), TouchPoll::Activated);
//! assert_eq!(monitor.activation_count(), 1);
//! ```
//!
//! # Concurrency
//!
//! Two execution contexts touch shared state: the interrupt handler
//! (asynchronous, must not block) and the polling task. The only state they
//! share is [`TouchSignal`], a single atomic flag with relaxed ordering;
//! a read-then-clear race at worst delays recognition by one poll interval.
//! The activation counter has a single writer (the polling task) and needs
//! no synchronization.

extern crate alloc;

use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::config::TouchConfig;
use crate::traits::TouchSensor;

#[cfg(feature = "std")]
use crate::traits::Clock;

/// Numerator of the hardware interrupt threshold fraction (2/3 of baseline).
pub const THRESHOLD_NUMERATOR: u32 = 2;

/// Denominator of the hardware interrupt threshold fraction.
pub const THRESHOLD_DENOMINATOR: u32 = 3;

/// Derive the hardware interrupt threshold from a baseline reading.
///
/// Returns `floor(baseline * 2/3)`.
///
/// # Examples
///
/// ```
/// use rs_glowband::touch::derive_threshold;
///
/// assert_eq!(derive_threshold(300), 200);
/// assert_eq!(derive_threshold(0), 0);
/// assert_eq!(derive_threshold(u16::MAX), 43690);
/// ```
#[inline]
pub const fn derive_threshold(baseline: u16) -> u16 {
    (baseline as u32 * THRESHOLD_NUMERATOR / THRESHOLD_DENOMINATOR) as u16
}

/// Compute the filtered-value trip point from a baseline reading.
///
/// A sample strictly below `floor(baseline * percent/100)` is a touch.
///
/// # Examples
///
/// ```
/// use rs_glowband::touch::trip_point;
///
/// assert_eq!(trip_point(300, 80), 240);
/// assert_eq!(trip_point(0, 80), 0);
/// ```
#[inline]
pub const fn trip_point(baseline: u16, percent: u8) -> u16 {
    (baseline as u32 * percent as u32 / 100) as u16
}

// ============================================================================
// Interrupt signal
// ============================================================================

/// Cloneable handle to the activation flag shared with the interrupt handler.
///
/// The interrupt context calls [`on_touch_interrupt`](Self::on_touch_interrupt);
/// the polling task consumes the flag with [`take`](Self::take). A second
/// edge arriving before the flag is consumed is coalesced, not queued.
///
/// # Example
///
/// ```rust
/// use rs_glowband::touch::TouchSignal;
///
/// let signal = TouchSignal::for_pad(7);
///
/// // ISR path: status snapshot has pad 7's bit set
/// signal.on_touch_interrupt(1 << 7);
/// assert!(signal.is_raised());
///
/// // Poll path: consume exactly once
/// assert!(signal.take());
/// assert!(!signal.take());
/// ```
#[derive(Clone, Debug)]
pub struct TouchSignal {
    raised: Arc<AtomicBool>,
    mask: u16,
}

impl TouchSignal {
    /// Creates a signal that reacts to the given pad's status bit.
    pub fn for_pad(pad: u8) -> Self {
        Self {
            raised: Arc::new(AtomicBool::new(false)),
            mask: 1u16 << pad,
        }
    }

    /// Interrupt handler body.
    ///
    /// `status` is the interrupt status bitmask, read and cleared by the
    /// caller before invoking this. Sets the activation flag if the
    /// monitored pad's bit is set. Non-blocking, safe in interrupt context.
    #[inline]
    pub fn on_touch_interrupt(&self, status: u16) {
        if status & self.mask != 0 {
            self.raised.store(true, Ordering::Relaxed);
        }
    }

    /// Consume the flag, returning whether it was raised.
    #[inline]
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::Relaxed)
    }

    /// Peek at the flag without consuming it.
    #[inline]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Relaxed)
    }

    /// The status bitmask this signal reacts to.
    #[inline]
    pub fn mask(&self) -> u16 {
        self.mask
    }
}

// ============================================================================
// Detection configuration
// ============================================================================

/// Detection strategy for the polling loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DetectionMode {
    /// Hardware interrupt edge sets the activation flag; the poll loop
    /// re-enables the interrupt each iteration and consumes the flag.
    Interrupt,
    /// Compare each filtered sample against a fraction of the baseline.
    /// Suited to pads covered by a few millimeters of glass or plastic,
    /// where the capacitance change of a touch is too small for the
    /// hardware threshold.
    #[default]
    Filtered,
}

/// Re-arm behavior after a filtered-value detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RearmPolicy {
    /// Count again on every below-threshold poll once the debounce hold has
    /// expired, even if the pad was never released. Matches the reference
    /// firmware, where a held touch keeps incrementing the counter.
    #[default]
    Continuous,
    /// Require the sample to return to or above the trip point before a new
    /// touch is counted.
    OnRelease,
}

/// Outcome of one polling iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPoll {
    /// No touch observed.
    Idle,
    /// Inside the debounce hold window; detections are absorbed.
    Holding,
    /// A touch was detected this iteration.
    Activated,
}

// ============================================================================
// Monitor
// ============================================================================

/// Touch-activation monitor.
///
/// Owns the sensor, the calibrated baseline, the interrupt signal, and the
/// activation counter. Construct with [`new`](Self::new), then call
/// [`calibrate`](Self::calibrate) once with the pad at rest before polling.
///
/// # Type Parameter
///
/// - `S`: The touch sensor peripheral ([`TouchSensor`] trait)
///
/// # Debounce
///
/// After a detection the monitor holds for `debounce_ms` of clock time;
/// polls inside the window return [`TouchPoll::Holding`] and produce no
/// side effects. Interrupt edges arriving inside the window are discarded
/// when it expires.
pub struct TouchMonitor<S: TouchSensor> {
    sensor: S,
    config: TouchConfig,
    signal: TouchSignal,
    baseline: Option<u16>,
    activations: u32,
    hold_until_ms: Option<u64>,
    was_below: bool,
}

impl<S: TouchSensor> TouchMonitor<S> {
    /// Create a new monitor. Detection is inert until [`calibrate`](Self::calibrate).
    pub fn new(sensor: S, config: TouchConfig) -> Self {
        let signal = TouchSignal::for_pad(config.pad);
        Self {
            sensor,
            config,
            signal,
            baseline: None,
            activations: 0,
            hold_until_ms: None,
            was_below: false,
        }
    }

    /// One-shot calibration against the untouched pad.
    ///
    /// Registers the interrupt signal with the peripheral, captures one
    /// filtered sample as the baseline, and writes the hardware interrupt
    /// threshold register with 2/3 of it. Returns the captured baseline.
    ///
    /// Any peripheral error is fatal: the caller should not start the
    /// polling loop if this fails.
    ///
    /// # Precondition
    ///
    /// The pad must be physically untouched. A touched pad during
    /// calibration produces a miscalibrated threshold the monitor cannot
    /// detect. Not intended to be repeated at runtime.
    pub fn calibrate(&mut self) -> Result<u16, S::Error> {
        self.sensor.register_signal(self.signal.clone())?;
        let value = self.sensor.read_filtered(self.config.pad)?;
        self.baseline = Some(value);
        self.sensor.set_threshold(self.config.pad, derive_threshold(value))?;
        log::info!(
            "touch pad {} calibrated: baseline {}, threshold {}",
            self.config.pad,
            value,
            derive_threshold(value)
        );
        Ok(value)
    }

    /// One polling iteration. Call every `poll_interval_ms` with the current
    /// clock time.
    pub fn poll(&mut self, now_ms: u64) -> Result<TouchPoll, S::Error> {
        if let Some(hold) = self.hold_until_ms {
            if now_ms < hold {
                return Ok(TouchPoll::Holding);
            }
            self.hold_until_ms = None;
            // Edges that arrived during the hold window are absorbed.
            let _ = self.signal.take();
        }

        match self.config.mode {
            DetectionMode::Interrupt => {
                self.sensor.enable_interrupt()?;
                if self.signal.take() {
                    log::info!("touch pad {} activated", self.config.pad);
                    self.hold_until_ms = Some(now_ms + self.config.debounce_ms as u64);
                    return Ok(TouchPoll::Activated);
                }
            }
            DetectionMode::Filtered => {
                self.sensor.disable_interrupt()?;
                self.sensor.clear_status()?;
                let _ = self.signal.take();

                let Some(baseline) = self.baseline else {
                    // Not calibrated; nothing to compare against.
                    return Ok(TouchPoll::Idle);
                };

                let value = self.sensor.read_filtered(self.config.pad)?;
                let trip = trip_point(baseline, self.config.trip_percent);
                let below = value < trip;
                let counted = below
                    && (self.config.rearm == RearmPolicy::Continuous || !self.was_below);
                self.was_below = below;

                if counted {
                    self.activations += 1;
                    log::info!(
                        "touch pad {} activated: value {}, baseline {}",
                        self.config.pad,
                        value,
                        baseline
                    );
                    self.hold_until_ms = Some(now_ms + self.config.debounce_ms as u64);
                    return Ok(TouchPoll::Activated);
                }
            }
        }

        Ok(TouchPoll::Idle)
    }

    /// Run the polling loop for the lifetime of the process.
    ///
    /// Blocks, sleeping `poll_interval_ms` between iterations. There is no
    /// cancellation; the only exit is a peripheral error.
    #[cfg(feature = "std")]
    pub fn run<C: Clock>(&mut self, clock: &C) -> Result<(), S::Error> {
        loop {
            self.poll(clock.now_ms())?;
            std::thread::sleep(std::time::Duration::from_millis(
                self.config.poll_interval_ms as u64,
            ));
        }
    }

    /// Diagnostic activation counter. Starts at 0, never decreases, never
    /// reset. Incremented by filtered-value detections only.
    #[inline]
    pub fn activation_count(&self) -> u32 {
        self.activations
    }

    /// The calibrated baseline, if [`calibrate`](Self::calibrate) has run.
    #[inline]
    pub fn baseline(&self) -> Option<u16> {
        self.baseline
    }

    /// The monitored pad index.
    #[inline]
    pub fn pad(&self) -> u8 {
        self.config.pad
    }

    /// Whether the monitor is inside a debounce hold at the given time.
    pub fn is_holding(&self, now_ms: u64) -> bool {
        self.hold_until_ms.is_some_and(|hold| now_ms < hold)
    }

    /// A clone of the interrupt signal handle, for wiring an external ISR.
    pub fn signal(&self) -> TouchSignal {
        self.signal.clone()
    }

    /// Get a reference to the sensor.
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Get a mutable reference to the sensor.
    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// Snapshot of the monitor state for UI/BLE replies.
    pub fn state(&self, now_ms: u64) -> TouchState {
        TouchState {
            baseline: self.baseline,
            activations: self.activations,
            holding: self.is_holding(now_ms),
        }
    }
}

/// Monitor state snapshot.
///
/// # Example
///
/// ```rust
/// use rs_glowband::{TouchMonitor, config::TouchConfig};
/// use rs_glowband::hal::MockTouchSensor;
///
/// let monitor = TouchMonitor::new(MockTouchSensor::new(), TouchConfig::default());
/// let state = monitor.state(0);
/// assert_eq!(state.baseline, None);
/// assert_eq!(state.activations, 0);
/// assert!(!state.holding);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TouchState {
    /// Calibrated untouched-pad reading, if calibration has run.
    pub baseline: Option<u16>,
    /// Monotonic activation count.
    pub activations: u32,
    /// Whether a debounce hold is in effect.
    pub holding: bool,
}

// ============================================================================
// Tests
// ============================================================================
