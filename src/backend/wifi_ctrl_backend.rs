//! wifi-ctrl backend implementation

use std::{
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use tracing::{debug, error, warn};
use wifi_ctrl::sta::{RequestClient, WifiSetup};

use crate::{
    backend::{DiscoverySink, ScanBackend, ScanOptions},
    core::{
        auth::{AUTH_BIT_WEP, AUTH_BIT_WPA, AUTH_BIT_WPA2},
        error::{WifiError, WifiResult},
        types::{Bssid, RawScanRecord},
    },
};

/// Scan backend talking to wpa_supplicant over its control socket
pub struct WifiCtrlBackend {
    interface: String,
    ctrl_socket: String,
    client: Arc<RequestClient>,
    active: Arc<AtomicBool>,
}

impl WifiCtrlBackend {
    pub async fn new(interface: String) -> WifiResult<Self> {
        let ctrl_socket = format!("/var/run/wpa_supplicant/{}", interface);
        let mut setup =
            WifiSetup::new().map_err(|e| WifiError::WpaSupplicantError(e.to_string()))?;
        setup.set_socket_path(ctrl_socket.clone());

        let client = setup.get_request_client();
        let station = setup.complete();

        // Spawn the station runtime
        tokio::spawn(async move {
            if let Err(e) = station.run().await {
                error!("WifiStation runtime error: {}", e);
            }
        });

        Ok(Self {
            interface,
            ctrl_socket,
            client: Arc::new(client),
            active: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Convert frequency (MHz) to channel number
    fn frequency_to_channel(freq_str: &str) -> u8 {
        let freq = freq_str.parse::<u16>().unwrap_or(0);
        match freq {
            2412 => 1,
            2417 => 2,
            2422 => 3,
            2427 => 4,
            2432 => 5,
            2437 => 6,
            2442 => 7,
            2447 => 8,
            2452 => 9,
            2457 => 10,
            2462 => 11,
            2467 => 12,
            2472 => 13,
            2484 => 14,
            // 5GHz channels (simplified)
            5180 => 36,
            5200 => 40,
            5220 => 44,
            5240 => 48,
            5260 => 52,
            5280 => 56,
            5300 => 60,
            5320 => 64,
            5500 => 100,
            5520 => 104,
            5540 => 108,
            5560 => 112,
            5580 => 116,
            5660 => 132,
            5680 => 136,
            5700 => 140,
            5745 => 149,
            5765 => 153,
            5785 => 157,
            5805 => 161,
            5825 => 165,
            _ => 0,
        }
    }

    /// Fold wpa_supplicant flags like `[WPA-PSK-TKIP][WPA2-PSK-CCMP][ESS]`
    /// into the WEP/WPA/WPA2 capability mask
    fn flags_to_auth_bitmask(flags: &str) -> u8 {
        let mut bits = 0;
        if flags.contains("[WEP") {
            bits |= AUTH_BIT_WEP;
        }
        if flags.contains("[WPA-") {
            bits |= AUTH_BIT_WPA;
        }
        if flags.contains("[WPA2-") || flags.contains("[RSN-") {
            bits |= AUTH_BIT_WPA2;
        }
        bits
    }

    /// Report a failed wpa_supplicant scan request to the executor
    fn abort_scan(sink: &DiscoverySink, reason: impl std::fmt::Display) {
        warn!("wpa_supplicant scan failed: {}", reason);
        sink.abort(WifiError::WpaSupplicantError(reason.to_string()));
    }

    fn to_record(
        name: &str,
        mac: &str,
        frequency: &str,
        signal: isize,
        flags: &str,
    ) -> WifiResult<RawScanRecord> {
        let bssid: Bssid = mac.parse()?;
        let rssi = signal.clamp(i16::MIN as isize, i16::MAX as isize) as i16;

        Ok(RawScanRecord::new(
            name.as_bytes(),
            bssid.0,
            rssi,
            Self::frequency_to_channel(frequency),
            Self::flags_to_auth_bitmask(flags),
        ))
    }
}

impl ScanBackend for WifiCtrlBackend {
    async fn start_scan(&self, options: &ScanOptions, sink: DiscoverySink) -> WifiResult<()> {
        debug!("Starting WiFi scan on interface: {}", self.interface);

        if !Path::new(&self.ctrl_socket).exists() {
            return Err(WifiError::BackendUnavailable(format!(
                "wpa_supplicant control socket not found: {}",
                self.ctrl_socket
            )));
        }

        if self.active.swap(true, Ordering::AcqRel) {
            return Err(WifiError::ScanBusy);
        }

        let client = self.client.clone();
        let active = self.active.clone();
        let wanted = options.ssid.clone();

        tokio::spawn(async move {
            match client.get_scan().await {
                Ok(results) => {
                    let mut delivered = 0usize;
                    for res in results.iter() {
                        if wanted.as_deref().is_some_and(|ssid| ssid != res.name) {
                            continue;
                        }
                        match Self::to_record(
                            &res.name,
                            &res.mac,
                            &res.frequency,
                            res.signal,
                            &res.flags,
                        ) {
                            Ok(record) => {
                                if sink.deliver(record) {
                                    delivered += 1;
                                }
                            }
                            Err(e) => debug!("Skipping scan result: {}", e),
                        }
                    }
                    debug!("Scan complete, delivered {} results", delivered);
                }
                Err(e) => Self::abort_scan(&sink, e),
            }
            active.store(false, Ordering::Release);
        });

        Ok(())
    }

    async fn is_scan_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}
