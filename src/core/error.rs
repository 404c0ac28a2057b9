//! Error types for the WiFi scan coordinator

use std::time::Duration;

use thiserror::Error;

/// Failure code reported for backend errors that carry no native code
pub const GENERIC_FAILURE_CODE: i32 = -1;

/// Failure code reported when a scan is already running on the radio
pub const BUSY_FAILURE_CODE: i32 = -16;

/// Result type for WiFi backend operations
pub type WifiResult<T> = Result<T, WifiError>;

/// Result type for coordinator operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors related to WiFi backend operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WifiError {
    #[error("Scan start rejected by backend with code {0}")]
    ScanStartFailed(i32),

    #[error("Scan aborted by backend with code {0}")]
    ScanAborted(i32),

    #[error("A scan is already in progress")]
    ScanBusy,

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Invalid BSSID: {0}")]
    InvalidBssid(String),

    #[error("wpa_supplicant error: {0}")]
    WpaSupplicantError(String),
}

impl WifiError {
    /// Backend-native signed code stored in a failed scan outcome
    pub fn code(&self) -> i32 {
        match self {
            WifiError::ScanStartFailed(code) | WifiError::ScanAborted(code) => *code,
            WifiError::ScanBusy => BUSY_FAILURE_CODE,
            WifiError::BackendUnavailable(_)
            | WifiError::InvalidBssid(_)
            | WifiError::WpaSupplicantError(_) => GENERIC_FAILURE_CODE,
        }
    }
}

/// Errors related to the request/response coordinator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Scan worker already started")]
    WorkerAlreadyStarted,

    #[error("Failed to spawn scan worker: {0}")]
    WorkerSpawn(String),

    #[error("Scan worker not started")]
    WorkerNotStarted,

    #[error("Scan did not complete within {0:?}")]
    Timeout(Duration),

    #[error("Scan worker stopped")]
    WorkerStopped,
}
