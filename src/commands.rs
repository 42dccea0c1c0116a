//! Single-byte BLE command protocol shared with the companion app.
//!
//! Each command is one ASCII byte on the wire. The values are fixed by the
//! shipped companion app; changing them breaks pairing with devices already
//! in the field. Replies carry a [`CommandStatus`] byte, and WiFi connect
//! attempts report a [`WifiLinkResult`] byte.
//!
//! This crate only defines the table; the dispatcher lives in the BLE
//! service task, outside this library.
//!
//! # Example
//!
//! ```rust
//! use rs_glowband::commands::{BtCommand, CommandStatus};
//!
//! // Incoming byte from the BLE characteristic
//! let cmd = BtCommand::from_byte(b'H');
//! assert_eq!(cmd, Some(BtCommand::GetBatteryLevel));
//!
//! // Reply status byte
//! assert_eq!(CommandStatus::Success.as_byte(), b'1');
//! ```

/// Command bytes received from the companion app.
///
/// Discriminants are the exact wire bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum BtCommand {
    /// Store the WiFi SSID to relay.
    SetWifiSsid = b'0',
    /// Read back the stored WiFi SSID.
    GetWifiSsid = b'1',
    /// Store the WiFi password to relay.
    SetWifiPassword = b'2',
    /// Read back the stored WiFi password.
    GetWifiPassword = b'3',
    /// Store the meeting ID.
    SetMeetingId = b'4',
    /// Read back the meeting ID.
    GetMeetingId = b'5',
    /// Connect to Firebase.
    GoConnectFirebase = b'6',
    /// Disconnect from Firebase.
    DisconnectFirebase = b'7',
    /// Start connecting to the configured WiFi network.
    GoConnectWifi = b'8',
    /// Abort the WiFi network search.
    StopLookingForWifi = b'9',
    /// Run the LED demo sequence.
    DoDemoLeds = b'A',
    /// Stop the Firebase sync task.
    StopFirebase = b'B',
    /// Toggle playback.
    PlayPause = b'C',
    /// Skip to the next item.
    Next = b'D',
    /// Turn the device off.
    TurnOff = b'E',
    /// Dump all stored parameters.
    AllParameters = b'F',
    /// Abort joining the meeting.
    StopConnectMeeting = b'G',
    /// Query the battery charge level.
    GetBatteryLevel = b'H',
}

impl BtCommand {
    /// All commands, in wire-byte order.
    pub const ALL: [BtCommand; 18] = [
        BtCommand::SetWifiSsid,
        BtCommand::GetWifiSsid,
        BtCommand::SetWifiPassword,
        BtCommand::GetWifiPassword,
        BtCommand::SetMeetingId,
        BtCommand::GetMeetingId,
        BtCommand::GoConnectFirebase,
        BtCommand::DisconnectFirebase,
        BtCommand::GoConnectWifi,
        BtCommand::StopLookingForWifi,
        BtCommand::DoDemoLeds,
        BtCommand::StopFirebase,
        BtCommand::PlayPause,
        BtCommand::Next,
        BtCommand::TurnOff,
        BtCommand::AllParameters,
        BtCommand::StopConnectMeeting,
        BtCommand::GetBatteryLevel,
    ];

    /// The wire byte for this command.
    #[inline]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Parse a wire byte. Returns `None` for unknown bytes.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'0' => Some(BtCommand::SetWifiSsid),
            b'1' => Some(BtCommand::GetWifiSsid),
            b'2' => Some(BtCommand::SetWifiPassword),
            b'3' => Some(BtCommand::GetWifiPassword),
            b'4' => Some(BtCommand::SetMeetingId),
            b'5' => Some(BtCommand::GetMeetingId),
            b'6' => Some(BtCommand::GoConnectFirebase),
            b'7' => Some(BtCommand::DisconnectFirebase),
            b'8' => Some(BtCommand::GoConnectWifi),
            b'9' => Some(BtCommand::StopLookingForWifi),
            b'A' => Some(BtCommand::DoDemoLeds),
            b'B' => Some(BtCommand::StopFirebase),
            b'C' => Some(BtCommand::PlayPause),
            b'D' => Some(BtCommand::Next),
            b'E' => Some(BtCommand::TurnOff),
            b'F' => Some(BtCommand::AllParameters),
            b'G' => Some(BtCommand::StopConnectMeeting),
            b'H' => Some(BtCommand::GetBatteryLevel),
            _ => None,
        }
    }

    /// Whether this command carries a payload after the command byte.
    pub const fn has_payload(self) -> bool {
        matches!(
            self,
            BtCommand::SetWifiSsid | BtCommand::SetWifiPassword | BtCommand::SetMeetingId
        )
    }
}

/// Reply status byte sent back after handling a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum CommandStatus {
    /// Command failed.
    Failure = b'0',
    /// Command handled.
    Success = b'1',
}

impl CommandStatus {
    /// The wire byte for this status.
    #[inline]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }
}

/// Result byte sent after a WiFi connect attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum WifiLinkResult {
    /// The network could not be joined.
    Failure = b'0',
    /// Connected.
    Connected = b'1',
}

impl WifiLinkResult {
    /// The wire byte for this result.
    #[inline]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }
}
