//! ESP32 RTC touch peripheral implementation.
//!
//! Wraps the ESP-IDF `touch_pad_*` driver. Construction performs the full
//! bring-up: peripheral init, timer-triggered FSM mode (required for
//! interrupt operation), charge/discharge reference voltages, pad IO
//! config, and the software filter that produces the smoothed samples the
//! monitor compares against.
//!
//! # Voltage references
//!
//! The 2.7V/0.5V/1V-attenuation combination gives a 1.7V-to-0.5V swing,
//! which suits most pad geometries.
//!
//! # Example
//!
//! ```ignore
//! use rs_glowband::hal::esp32::Esp32TouchSensor;
//! use rs_glowband::{TouchMonitor, config::TouchConfig};
//!
//! let config = TouchConfig::default();
//! let sensor = Esp32TouchSensor::new(&config)?;
//! let mut monitor = TouchMonitor::new(sensor, config);
//! monitor.calibrate()?;
//! ```

use core::ffi::c_void;

use esp_idf_sys::{
    esp, touch_pad_clear_status, touch_pad_config, touch_pad_filter_start, touch_pad_get_status,
    touch_pad_init, touch_pad_intr_disable, touch_pad_intr_enable, touch_pad_isr_register,
    touch_pad_read_filtered, touch_pad_set_fsm_mode, touch_pad_set_thresh, touch_pad_set_voltage,
    touch_fsm_mode_t_TOUCH_FSM_MODE_TIMER, touch_high_volt_t_TOUCH_HVOLT_2V7,
    touch_low_volt_t_TOUCH_LVOLT_0V5, touch_pad_t, touch_volt_atten_t_TOUCH_HVOLT_ATTEN_1V,
    EspError,
};

use crate::config::TouchConfig;
use crate::touch::TouchSignal;
use crate::traits::TouchSensor;

/// Threshold value used during pad config before calibration runs.
const THRESH_NO_USE: u16 = 0;

/// ESP32 RTC touch peripheral.
///
/// Owns the ISR registration: the signal handle passed to
/// [`register_signal`](TouchSensor::register_signal) is leaked to the ISR
/// for the lifetime of the process, matching the monitor's run-forever
/// model.
pub struct Esp32TouchSensor {
    isr_signal: Option<*mut TouchSignal>,
}

// The raw pointer is only handed to the ISR; the signal behind it is Sync.
unsafe impl Send for Esp32TouchSensor {}

impl Esp32TouchSensor {
    /// Initializes the touch peripheral and starts the software filter.
    ///
    /// # Errors
    ///
    /// Returns an error if any driver call fails (e.g., invalid pad index).
    /// Treat this as fatal: the monitor must not start without a working
    /// peripheral.
    pub fn new(config: &TouchConfig) -> Result<Self, EspError> {
        unsafe {
            esp!(touch_pad_init())?;
            // Interrupt trigger requires the timer-driven FSM
            esp!(touch_pad_set_fsm_mode(touch_fsm_mode_t_TOUCH_FSM_MODE_TIMER))?;
            esp!(touch_pad_set_voltage(
                touch_high_volt_t_TOUCH_HVOLT_2V7,
                touch_low_volt_t_TOUCH_LVOLT_0V5,
                touch_volt_atten_t_TOUCH_HVOLT_ATTEN_1V,
            ))?;
            esp!(touch_pad_config(config.pad as touch_pad_t, THRESH_NO_USE))?;
            esp!(touch_pad_filter_start(config.filter_period_ms))?;
        }

        Ok(Self { isr_signal: None })
    }
}

/// ISR: snapshot and clear the status register, forward to the signal.
/// Runs in interrupt context; must not block or allocate.
unsafe extern "C" fn touch_isr(arg: *mut c_void) {
    let signal = &*(arg as *const TouchSignal);
    let status = touch_pad_get_status();
    touch_pad_clear_status();
    signal.on_touch_interrupt(status as u16);
}

impl TouchSensor for Esp32TouchSensor {
    type Error = EspError;

    fn read_filtered(&mut self, pad: u8) -> Result<u16, EspError> {
        let mut value: u16 = 0;
        unsafe {
            esp!(touch_pad_read_filtered(pad as touch_pad_t, &mut value))?;
        }
        Ok(value)
    }

    fn set_threshold(&mut self, pad: u8, value: u16) -> Result<(), EspError> {
        unsafe { esp!(touch_pad_set_thresh(pad as touch_pad_t, value)) }
    }

    fn interrupt_status(&mut self) -> Result<u16, EspError> {
        Ok(unsafe { touch_pad_get_status() } as u16)
    }

    fn clear_status(&mut self) -> Result<(), EspError> {
        unsafe {
            touch_pad_clear_status();
        }
        Ok(())
    }

    fn enable_interrupt(&mut self) -> Result<(), EspError> {
        unsafe { esp!(touch_pad_intr_enable()) }
    }

    fn disable_interrupt(&mut self) -> Result<(), EspError> {
        unsafe { esp!(touch_pad_intr_disable()) }
    }

    fn register_signal(&mut self, signal: TouchSignal) -> Result<(), EspError> {
        // One registration per process; the leaked box lives as long as the ISR.
        let ptr = Box::into_raw(Box::new(signal));
        unsafe {
            esp!(touch_pad_isr_register(Some(touch_isr), ptr as *mut c_void))?;
        }
        self.isr_signal = Some(ptr);
        Ok(())
    }
}
