//! Battery voltage sensing via the ESP32 ADC.
//!
//! The battery feeds the ADC input through a 1:2 resistor divider, so the
//! measured voltage is half the cell voltage. GPIO2 (board pin A12) is on
//! ADC2; sampling it while WiFi is active can fail, which the caller sees
//! as a read error and should treat as a transient.

use crate::traits::BatteryMonitor;
use esp_idf_hal::adc::attenuation::DB_11;
use esp_idf_hal::adc::oneshot::config::AdcChannelConfig;
use esp_idf_hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_hal::adc::ADC2;
use esp_idf_hal::gpio::Gpio2;
use esp_idf_hal::peripheral::Peripheral;

/// Full-scale ADC reading (12-bit).
const ADC_FULL_SCALE: u32 = 4095;

/// ADC reference span in millivolts at 11dB attenuation.
const ADC_REF_MV: u32 = 3300;

/// Battery divider ratio (cell voltage / measured voltage).
const DIVIDER_RATIO: u32 = 2;

/// Battery monitor using the ADC divider input.
///
/// # Example
///
/// ```ignore
/// use esp_idf_hal::adc::oneshot::AdcDriver;
/// use rs_glowband::hal::esp32::Esp32Battery;
/// use rs_glowband::traits::BatteryMonitor;
///
/// let peripherals = Peripherals::take()?;
/// let adc2 = AdcDriver::new(peripherals.adc2)?;
/// let mut battery = Esp32Battery::new(&adc2, peripherals.pins.gpio2)?;
///
/// println!("Battery: {}%", battery.level_percent()?);
/// ```
pub struct Esp32Battery<'d> {
    channel: AdcChannelDriver<'d, Gpio2, &'d AdcDriver<'d, ADC2>>,
}

impl<'d> Esp32Battery<'d> {
    /// Creates a new battery monitor on the divider input.
    ///
    /// # Arguments
    ///
    /// * `adc` - Reference to the ADC2 driver (must outlive this struct)
    /// * `pin` - GPIO2, the divider tap
    ///
    /// # Errors
    ///
    /// Returns an error if ADC channel initialization fails.
    pub fn new(
        adc: &'d AdcDriver<'d, ADC2>,
        pin: impl Peripheral<P = Gpio2> + 'd,
    ) -> Result<Self, esp_idf_hal::sys::EspError> {
        let config = AdcChannelConfig {
            attenuation: DB_11,
            ..Default::default()
        };
        let channel = AdcChannelDriver::new(adc, pin, &config)?;
        Ok(Self { channel })
    }

    /// Converts a raw ADC reading to cell millivolts through the divider.
    fn raw_to_mv(raw: u16) -> u16 {
        (raw as u32 * ADC_REF_MV * DIVIDER_RATIO / ADC_FULL_SCALE) as u16
    }
}

impl BatteryMonitor for Esp32Battery<'_> {
    type Error = esp_idf_hal::sys::EspError;

    fn read_millivolts(&mut self) -> Result<u16, Self::Error> {
        let raw = self.channel.read()?;
        Ok(Self::raw_to_mv(raw))
    }
}
