//! WiFi Scan Coordinator
//!
//! Serializes time-limited WiFi scans from a requester onto a single scan
//! worker:
//! - a blocking request entry point with a caller-supplied timeout
//! - a worker that drives the radio backend and the status indicator
//! - a fixed-capacity, ordered result set per scan

pub mod backend;
pub mod config;
pub mod core;
pub mod indicator;
pub mod report;

pub use crate::core::{
    auth::AuthMode,
    coordinator::{DEFAULT_SCAN_TIMEOUT, ScanCoordinator, ScanState},
    error::{ServiceError, WifiError},
    outcome::ScanOutcome,
    scanner::ScanExecutor,
    types::{Bssid, DiscoveredNetwork, RawScanRecord, Ssid},
};
