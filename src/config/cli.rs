//! Command-line argument parsing

use clap::{Parser, ValueEnum};

/// How scan results are printed
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser, Debug, Clone)]
#[clap(name = "wifi-scanner", version, author)]
#[clap(about = "Periodic WiFi scanner driven by a synchronous scan coordinator")]
pub struct CliArgs {
    /// Wireless network interface name
    #[clap(short, long, default_value = "wlan0")]
    pub interface: String,

    /// Use a simulated radio instead of wpa_supplicant
    #[clap(long)]
    pub simulate: bool,

    /// Only report networks with this SSID
    #[clap(long)]
    pub ssid: Option<String>,

    /// Seconds between scans
    #[clap(long, default_value = "20")]
    pub scan_interval: u64,

    /// Milliseconds to wait for a scan to complete
    #[clap(long, default_value = "30000")]
    pub scan_timeout_ms: u64,

    /// Indicator blink interval in milliseconds while scanning
    #[clap(long, default_value = "50")]
    pub blink_interval_ms: u64,

    /// Output format
    #[clap(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Exit after a single scan
    #[clap(long)]
    pub once: bool,
}
