//! Pin assignments and task layout for the band hardware.
//!
//! These constants match the shipped wiring: an APA102 strip on the SPI
//! pins, the touch button on RTC touch pad 7, and the battery charger
//! status LEDs. The companion app and enclosure both assume this layout.

// ============================================================================
// LED strip (APA102)
// ============================================================================

/// APA102 data line
pub const LED_DATA_PIN: u8 = 18;

/// APA102 clock line
pub const LED_CLOCK_PIN: u8 = 5;

/// Number of LEDs on the strip
pub const NUM_LEDS: usize = 60;

/// Global brightness (0-255)
pub const LED_BRIGHTNESS: u8 = 64;

/// Strip refresh rate in updates per second
pub const LED_UPDATES_PER_SECOND: u32 = 2;

/// Blink half-period in milliseconds
pub const LED_BLINK_DELAY_MS: u32 = 250;

// ============================================================================
// Touch button
// ============================================================================

/// RTC touch pad index for the button
pub const TOUCH_PAD: u8 = 7;

/// GPIO routed to touch pad 7
pub const TOUCH_GPIO: u8 = 27;

// ============================================================================
// Battery
// ============================================================================

/// Lit while the battery is full
pub const LED_CHARGED_PIN: u8 = 15;

/// Lit while the battery is charging
pub const LED_CHARGE_PIN: u8 = 32;

/// Battery voltage divider input (ADC, board pin A12)
pub const BAT_LEVEL_PIN: u8 = 2;

// ============================================================================
// Task layout (FreeRTOS)
// ============================================================================

/// Core and priority assignments for the firmware tasks.
///
/// Everything is pinned to core 0, leaving core 1 to the radio stacks.
/// Priorities range 1 (lowest) to 5; the touch task runs above the network
/// tasks so button response never waits on I/O.
pub mod tasks {
    /// Core for the battery sampling task
    pub const BAT_CORE: i32 = 0;

    /// Core for the touch polling task
    pub const TOUCH_CORE: i32 = 0;

    /// Core for the BLE command task
    pub const BT_CORE: i32 = 0;

    /// Core for the Firebase sync task
    pub const FIRE_CORE: i32 = 0;

    /// Core for the WiFi task
    pub const WIFI_CORE: i32 = 0;

    /// Battery task priority
    pub const BAT_PRIORITY: u8 = 1;

    /// Touch task priority
    pub const TOUCH_PRIORITY: u8 = 3;

    /// BLE task priority
    pub const BT_PRIORITY: u8 = 2;

    /// Firebase task priority
    pub const FIRE_PRIORITY: u8 = 2;

    /// WiFi task priority
    pub const WIFI_PRIORITY: u8 = 2;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_task_outranks_network_tasks() {
        assert!(tasks::TOUCH_PRIORITY > tasks::BT_PRIORITY);
        assert!(tasks::TOUCH_PRIORITY > tasks::WIFI_PRIORITY);
        assert!(tasks::TOUCH_PRIORITY > tasks::FIRE_PRIORITY);
        assert!(tasks::BAT_PRIORITY < tasks::TOUCH_PRIORITY);
    }

    #[test]
    fn led_and_touch_pins_do_not_collide() {
        let pins = [
            LED_DATA_PIN,
            LED_CLOCK_PIN,
            TOUCH_GPIO,
            LED_CHARGED_PIN,
            LED_CHARGE_PIN,
            BAT_LEVEL_PIN,
        ];
        for (i, a) in pins.iter().enumerate() {
            for b in &pins[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
