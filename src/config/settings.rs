//! Runtime settings

use std::time::Duration;

use crate::{
    backend::ScanOptions,
    config::{CliArgs, OutputFormat},
};

/// Runtime configuration settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub interface: String,
    pub simulate: bool,
    pub scan_options: ScanOptions,
    pub scan_interval: Duration,
    pub scan_timeout: Duration,
    pub blink_interval: Duration,
    pub format: OutputFormat,
    pub once: bool,
}

impl From<CliArgs> for Settings {
    fn from(args: CliArgs) -> Self {
        // An empty --ssid means no filter
        let ssid = args.ssid.filter(|s| !s.is_empty());

        Settings {
            interface: args.interface,
            simulate: args.simulate,
            scan_options: ScanOptions { ssid },
            scan_interval: Duration::from_secs(args.scan_interval),
            scan_timeout: Duration::from_millis(args.scan_timeout_ms),
            blink_interval: Duration::from_millis(args.blink_interval_ms),
            format: args.format,
            once: args.once,
        }
    }
}
