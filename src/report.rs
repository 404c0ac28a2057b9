//! Console presentation of scan outcomes

use crate::core::outcome::ScanOutcome;

const RULE_WIDTH: usize = 80;

/// Startup banner
pub fn banner() -> String {
    let rule = "=".repeat(40);
    format!(
        "\n{rule}\n  WiFi Scanner\n  wifi-scan-coordinator {}\n{rule}\n",
        env!("CARGO_PKG_VERSION")
    )
}

/// Render an outcome as the console table
pub fn render_table(outcome: &ScanOutcome) -> String {
    if !outcome.succeeded() {
        return format!("Scan failed (error: {})\n", outcome.failure_code());
    }

    let mut out = format!(
        "\n  {:<32}  {:<17}  {:>3}  {:>7}  {}\n  {}\n",
        "SSID",
        "BSSID",
        "CH",
        "RSSI",
        "AUTH",
        "-".repeat(RULE_WIDTH)
    );
    for ap in outcome.networks() {
        out.push_str(&format!(
            "  {:<32}  {}  ch{:>2}  {:>4}dBm  {}\n",
            ap.ssid, ap.bssid, ap.channel, ap.rssi, ap.auth
        ));
    }
    out.push_str(&format!("\n  Found {} networks\n", outcome.len()));
    out
}

/// Render an outcome as pretty-printed JSON
pub fn render_json(outcome: &ScanOutcome) -> serde_json::Result<String> {
    serde_json::to_string_pretty(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{DiscoveredNetwork, RawScanRecord};
    use pretty_assertions::assert_eq;

    fn outcome_with(records: &[RawScanRecord]) -> ScanOutcome {
        let mut outcome = ScanOutcome::new();
        for record in records {
            assert!(outcome.try_add(DiscoveredNetwork::from_raw(record).unwrap()));
        }
        outcome.mark_succeeded();
        outcome
    }

    #[test]
    fn test_table_rows() {
        let outcome = outcome_with(&[
            RawScanRecord::new(b"HomeNetwork", [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff], -41, 6, 4),
            RawScanRecord::new(b"Cafe", [0, 1, 2, 3, 4, 5], -7, 11, 0),
        ]);

        let table = render_table(&outcome);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(
            lines[1],
            "  SSID                              BSSID               CH     RSSI  AUTH"
        );
        assert_eq!(
            lines[3],
            "  HomeNetwork                       AA:BB:CC:DD:EE:FF  ch 6   -41dBm  WPA2"
        );
        assert_eq!(
            lines[4],
            "  Cafe                              00:01:02:03:04:05  ch11    -7dBm  OPEN"
        );
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[2], format!("  {}", "-".repeat(RULE_WIDTH)));
        assert!(table.ends_with("\n\n  Found 2 networks\n"));
    }

    #[test]
    fn test_table_failure() {
        let mut outcome = ScanOutcome::new();
        outcome.mark_failed(-5);
        assert_eq!(render_table(&outcome), "Scan failed (error: -5)\n");
    }

    #[test]
    fn test_table_empty_scan() {
        let outcome = outcome_with(&[]);
        assert!(render_table(&outcome).ends_with("  Found 0 networks\n"));
    }

    #[test]
    fn test_json() {
        let outcome = outcome_with(&[RawScanRecord::new(b"Lab", [1, 2, 3, 4, 5, 6], -50, 1, 2)]);

        let value: serde_json::Value = serde_json::from_str(&render_json(&outcome).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "succeeded": true,
                "failure_code": 0,
                "networks": [{
                    "ssid": "Lab",
                    "bssid": "01:02:03:04:05:06",
                    "rssi": -50,
                    "channel": 1,
                    "auth": "wpa_personal",
                }],
            })
        );
    }

    #[test]
    fn test_banner() {
        assert!(banner().contains("WiFi Scanner"));
    }
}
