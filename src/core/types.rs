//! Domain types for WiFi scanning

use std::{borrow::Cow, fmt, str::FromStr};

use serde::{Serialize, Serializer};

use crate::core::{auth::AuthMode, error::WifiError};

/// Maximum SSID length per 802.11
pub const MAX_SSID_LEN: usize = 32;

/// BSSID (MAC address) length
pub const BSSID_LEN: usize = 6;

/// Maximum number of access points kept per scan
pub const MAX_SCAN_RESULTS: usize = 32;

/// Network name, at most 32 bytes, not necessarily UTF-8
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Ssid(heapless::Vec<u8, MAX_SSID_LEN>);

impl Ssid {
    /// Decode a backend name buffer
    ///
    /// Copies `min(reported_len, buf.len(), 32)` bytes and stops at the first NUL.
    pub fn from_raw(buf: &[u8], reported_len: usize) -> Self {
        let len = reported_len.min(buf.len()).min(MAX_SSID_LEN);
        Self(
            buf[..len]
                .iter()
                .copied()
                .take_while(|&b| b != 0)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl From<&str> for Ssid {
    fn from(name: &str) -> Self {
        Self::from_raw(name.as_bytes(), name.len())
    }
}

impl fmt::Display for Ssid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_string_lossy())
    }
}

impl Serialize for Ssid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}

/// Hardware address of the radio advertising a network
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bssid(pub [u8; BSSID_LEN]);

impl fmt::Display for Bssid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let octets: Vec<String> = self.0.iter().map(|b| hex::encode_upper([*b])).collect();
        f.pad(&octets.join(":"))
    }
}

impl FromStr for Bssid {
    type Err = WifiError;

    /// Parse `aa:bb:cc:dd:ee:ff` (separators `:` or `-`, any case)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s.chars().filter(|c| *c != ':' && *c != '-').collect();
        let mut octets = [0u8; BSSID_LEN];
        hex::decode_to_slice(&digits, &mut octets)
            .map_err(|e| WifiError::InvalidBssid(format!("{}: {}", s, e)))?;
        Ok(Self(octets))
    }
}

impl Serialize for Bssid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One discovery event as delivered by a scan backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawScanRecord {
    /// Name buffer, possibly NUL-padded or longer than the reported length
    pub ssid: Vec<u8>,
    /// Length reported by the backend
    pub ssid_len: usize,
    pub bssid: [u8; BSSID_LEN],
    pub rssi: i16,
    pub channel: u8,
    /// Vendor auth bitmask (bit 0 WEP, bit 1 WPA, bit 2 WPA2)
    pub auth_mode: u8,
}

impl RawScanRecord {
    pub fn new(ssid: &[u8], bssid: [u8; BSSID_LEN], rssi: i16, channel: u8, auth_mode: u8) -> Self {
        Self {
            ssid: ssid.to_vec(),
            ssid_len: ssid.len(),
            bssid,
            rssi,
            channel,
            auth_mode,
        }
    }
}

/// Represents a discovered WiFi network
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredNetwork {
    pub ssid: Ssid,
    pub bssid: Bssid,
    /// Signal strength in dBm
    pub rssi: i16,
    pub channel: u8,
    pub auth: AuthMode,
}

impl DiscoveredNetwork {
    /// Decode a backend record, `None` for hidden networks (empty name)
    pub fn from_raw(record: &RawScanRecord) -> Option<Self> {
        let ssid = Ssid::from_raw(&record.ssid, record.ssid_len);
        if ssid.is_empty() {
            return None;
        }

        Some(Self {
            ssid,
            bssid: Bssid(record.bssid),
            rssi: record.rssi,
            channel: record.channel,
            auth: AuthMode::from_backend_bitmask(record.auth_mode),
        })
    }
}
