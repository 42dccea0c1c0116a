//! Shared configuration system for desktop and ESP32.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`.
//!
//! # Example
//!
//! ```rust
//! use rs_glowband::config::{Config, TouchConfig, WifiConfig};
//!
//! // Use defaults
//! let config = Config::default();
//!
//! // Or customize
//! let config = Config::default()
//!     .with_touch(TouchConfig::default().with_pad(0).with_debounce_ms(150))
//!     .with_wifi(WifiConfig::default().with_ssid("OfficeNet"));
//! ```

use heapless::String as HString;

use crate::touch::{DetectionMode, RearmPolicy};

/// Maximum length for short config strings (device names, meeting IDs)
pub const MAX_SHORT_STRING: usize = 64;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

// ============================================================================
// Helper for creating heapless strings
// ============================================================================

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    // Keep every char whose encoding ends within the capacity
    let valid_end = s
        .char_indices()
        .take_while(|&(i, c)| i + c.len_utf8() <= MAX_SHORT_STRING)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete device configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Touch monitor configuration
    pub touch: TouchConfig,
    /// WiFi credentials relayed to the companion app
    pub wifi: WifiConfig,
    /// Battery monitor configuration
    pub battery: BatteryConfig,
    /// Device identification
    pub device: DeviceConfig,
}

impl Config {
    /// Set touch configuration
    pub fn with_touch(mut self, touch: TouchConfig) -> Self {
        self.touch = touch;
        self
    }

    /// Set WiFi configuration
    pub fn with_wifi(mut self, wifi: WifiConfig) -> Self {
        self.wifi = wifi;
        self
    }

    /// Set battery configuration
    pub fn with_battery(mut self, battery: BatteryConfig) -> Self {
        self.battery = battery;
        self
    }

    /// Set device configuration
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }
}

// ============================================================================
// Touch Config
// ============================================================================

/// Touch monitor configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TouchConfig {
    /// Pad index to monitor (0-9 on the ESP32 RTC touch peripheral)
    pub pad: u8,
    /// Hold window after a detection, in milliseconds
    pub debounce_ms: u32,
    /// Polling loop interval in milliseconds
    pub poll_interval_ms: u32,
    /// Hardware filter period in milliseconds (peripheral bring-up)
    pub filter_period_ms: u32,
    /// Filtered-value trip point as a percent of the baseline
    pub trip_percent: u8,
    /// Detection strategy
    pub mode: DetectionMode,
    /// Re-arm behavior after a filtered detection
    pub rearm: RearmPolicy,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            pad: 7,
            debounce_ms: 200,
            poll_interval_ms: 10,
            filter_period_ms: 10,
            trip_percent: 80,
            mode: DetectionMode::default(),
            rearm: RearmPolicy::default(),
        }
    }
}

impl TouchConfig {
    /// Set the pad index
    pub fn with_pad(mut self, pad: u8) -> Self {
        self.pad = pad;
        self
    }

    /// Set the debounce hold window
    pub fn with_debounce_ms(mut self, ms: u32) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Set the polling interval
    pub fn with_poll_interval_ms(mut self, ms: u32) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Set the hardware filter period
    pub fn with_filter_period_ms(mut self, ms: u32) -> Self {
        self.filter_period_ms = ms;
        self
    }

    /// Set the trip point percentage (clamped to 100)
    pub fn with_trip_percent(mut self, percent: u8) -> Self {
        self.trip_percent = percent.min(100);
        self
    }

    /// Set the detection strategy
    pub fn with_mode(mut self, mode: DetectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the re-arm policy
    pub fn with_rearm(mut self, rearm: RearmPolicy) -> Self {
        self.rearm = rearm;
        self
    }
}

// ============================================================================
// WiFi Config
// ============================================================================

/// WiFi credentials, set over BLE and relayed onward.
///
/// The band never joins WiFi itself: the companion app writes the SSID and
/// password over the BLE command protocol and triggers the connect elsewhere.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WifiConfig {
    /// WiFi network SSID
    pub ssid: ShortString,
    /// WiFi password
    pub password: ShortString,
    /// How long to keep searching for the network, in seconds
    pub search_timeout_s: u16,
}

impl Default for WifiConfig {
    fn default() -> Self {
        Self {
            ssid: ShortString::new(),
            password: ShortString::new(),
            search_timeout_s: 60,
        }
    }
}

impl WifiConfig {
    /// Set the SSID
    pub fn with_ssid(mut self, ssid: &str) -> Self {
        self.ssid = short_string(ssid);
        self
    }

    /// Set the password
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = short_string(password);
        self
    }

    /// Set the search timeout
    pub fn with_search_timeout_s(mut self, secs: u16) -> Self {
        self.search_timeout_s = secs;
        self
    }

    /// Check if WiFi credentials are configured
    pub fn is_configured(&self) -> bool {
        !self.ssid.is_empty()
    }
}

// ============================================================================
// Battery Config
// ============================================================================

/// Battery monitor configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatteryConfig {
    /// How often the battery task samples the ADC, in milliseconds
    pub poll_interval_ms: u32,
    /// Charge percent below which the charge LED starts blinking
    pub low_warning_percent: u8,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 5000,
            low_warning_percent: 20,
        }
    }
}

impl BatteryConfig {
    /// Set the sampling interval
    pub fn with_poll_interval_ms(mut self, ms: u32) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Set the low-charge warning threshold
    pub fn with_low_warning_percent(mut self, percent: u8) -> Self {
        self.low_warning_percent = percent.min(100);
        self
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Device identification configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// BLE advertising name. The companion app pairs by this name,
    /// so the default matches the shipped firmware.
    pub name: ShortString,
    /// Meeting ID the band is joined to, set over BLE
    pub meeting_id: ShortString,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: short_string("Odeji-123456"),
            meeting_id: ShortString::new(),
        }
    }
}

impl DeviceConfig {
    /// Set the BLE advertising name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }

    /// Set the meeting ID
    pub fn with_meeting_id(mut self, id: &str) -> Self {
        self.meeting_id = short_string(id);
        self
    }

    /// Check if a meeting has been configured
    pub fn has_meeting(&self) -> bool {
        !self.meeting_id.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
