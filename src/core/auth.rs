//! Authentication mode translation for scan results

use std::fmt;

use serde::{Deserialize, Serialize};

/// WEP capability bit in the backend auth bitmask
pub const AUTH_BIT_WEP: u8 = 1 << 0;
/// WPA capability bit in the backend auth bitmask
pub const AUTH_BIT_WPA: u8 = 1 << 1;
/// WPA2 capability bit in the backend auth bitmask
pub const AUTH_BIT_WPA2: u8 = 1 << 2;

/// Normalized authentication mode of a discovered access point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    Open,
    Wep,
    WpaPersonal,
    Wpa2Personal,
    WpaWpa2Personal,
    Wpa3Personal,
    #[default]
    Unknown,
}

impl AuthMode {
    /// Translate the backend's 3-bit capability mask
    ///
    /// WPA and WPA2 together are the mixed mode, not "the higher one wins",
    /// whatever else is set. Otherwise each mode needs its bit alone, and any
    /// other combination is `Unknown`.
    pub fn from_backend_bitmask(bits: u8) -> Self {
        const MIXED: u8 = AUTH_BIT_WPA | AUTH_BIT_WPA2;

        match bits {
            b if (b & MIXED) == MIXED => AuthMode::WpaWpa2Personal,
            0 => AuthMode::Open,
            AUTH_BIT_WEP => AuthMode::Wep,
            AUTH_BIT_WPA => AuthMode::WpaPersonal,
            AUTH_BIT_WPA2 => AuthMode::Wpa2Personal,
            _ => AuthMode::Unknown,
        }
    }

    /// Display string used by the console table
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMode::Open => "OPEN",
            AuthMode::Wep => "WEP",
            AuthMode::WpaPersonal => "WPA",
            AuthMode::Wpa2Personal => "WPA2",
            AuthMode::WpaWpa2Personal => "WPA/WPA2",
            AuthMode::Wpa3Personal => "WPA3",
            AuthMode::Unknown => "???",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
