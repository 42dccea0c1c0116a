//! ESP32 wearable band firmware entry point.
//!
//! Runs the touch polling loop:
//! - Brings up the RTC touch peripheral and calibrates against the
//!   untouched pad (keep hands off the band during boot)
//! - Polls for touch activations every 10ms
//! - Samples the battery divider periodically and prints the charge level
//!
//! # Hardware Setup
//!
//! See `src/board.rs` for the pin map.
//!
//! # Build
//!
//! ```bash
//! cargo build --features esp32 --target xtensa-esp32-espidf
//! ```

use esp_idf_hal::adc::oneshot::AdcDriver;
use esp_idf_hal::peripherals::Peripherals;
use rs_glowband::hal::esp32::{Esp32Battery, Esp32Clock, Esp32TouchSensor};
use rs_glowband::traits::{BatteryMonitor, Clock};
use rs_glowband::{Config, TouchMonitor};
use std::thread;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();

    println!();
    println!("================================");
    println!("  rs-glowband");
    println!("================================");
    println!();

    // =========================================================================
    // Configuration
    // =========================================================================
    // TODO: Load WiFi credentials and meeting ID from NVS once the BLE
    // service task lands
    let config = Config::default();

    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Initialize Touch Peripheral (RTC touch pad 7)
    // =========================================================================
    let sensor = Esp32TouchSensor::new(&config.touch)?;
    println!("[OK] Touch peripheral initialized (pad {})", config.touch.pad);

    // =========================================================================
    // Initialize Battery Monitor (divider on GPIO2 / ADC2)
    // =========================================================================
    let adc2 = AdcDriver::new(peripherals.adc2)?;
    let mut battery = Esp32Battery::new(&adc2, peripherals.pins.gpio2)?;
    println!("[OK] Battery monitor initialized (GPIO2 ADC)");

    // =========================================================================
    // Calibrate and start the monitor
    // =========================================================================
    let clock = Esp32Clock::new();
    let mut monitor = TouchMonitor::new(sensor, config.touch.clone());

    // Pad must be untouched here; a touched pad miscalibrates the threshold
    let baseline = monitor.calibrate()?;
    println!("[OK] Touch pad calibrated (baseline {})", baseline);

    println!();
    println!("Starting touch polling loop ({}ms)...", config.touch.poll_interval_ms);
    println!();

    let mut last_count = 0u32;
    let mut last_battery_ms = 0u64;

    // =========================================================================
    // Main Polling Loop
    // =========================================================================
    loop {
        let now = clock.now_ms();

        monitor.poll(now)?;

        let count = monitor.activation_count();
        if count != last_count {
            println!("Touch activations: {}", count);
            last_count = count;
        }

        if now - last_battery_ms >= config.battery.poll_interval_ms as u64 {
            last_battery_ms = now;
            match battery.level_percent() {
                Ok(percent) => println!("Battery: {}%", percent),
                // ADC2 reads fail while WiFi holds the ADC; transient
                Err(e) => println!("[WARN] Battery read failed: {:?}", e),
            }
        }

        thread::sleep(Duration::from_millis(config.touch.poll_interval_ms as u64));
    }
}
