//! Mock scan backend for tests and simulation

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::Mutex;
use tracing::debug;

use crate::{
    backend::{DiscoverySink, ScanBackend, ScanOptions},
    core::{
        error::{WifiError, WifiResult},
        types::{RawScanRecord, Ssid},
    },
};

const DEFAULT_SCAN_DURATION: Duration = Duration::from_millis(20);

/// Internal state for the mock backend
#[derive(Debug, Clone)]
struct MockState {
    scan_results: Vec<RawScanRecord>,
    start_failure: Option<i32>,
    late_failure: Option<i32>,
    delivery_gap: Duration,
    scan_duration: Duration,
    start_calls: usize,
    active_polls: usize,
    last_options: Option<ScanOptions>,
}

/// Mock scan backend
///
/// Delivers the configured records from a background task, then stays
/// active for the configured scan duration.
#[derive(Debug, Clone)]
pub struct MockScanBackend {
    inner: Arc<Mutex<MockState>>,
    active: Arc<AtomicBool>,
}

impl MockScanBackend {
    /// Create a new mock backend that finds nothing
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockState {
                scan_results: vec![],
                start_failure: None,
                late_failure: None,
                delivery_gap: Duration::ZERO,
                scan_duration: DEFAULT_SCAN_DURATION,
                start_calls: 0,
                active_polls: 0,
                last_options: None,
            })),
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Mock preloaded with a small neighbourhood, used by `--simulate`
    pub async fn with_sample_networks() -> Self {
        let backend = Self::new();
        backend
            .set_scan_results(vec![
                RawScanRecord::new(b"HomeNetwork", [0x3c, 0x84, 0x6a, 0x12, 0x34, 0x56], -41, 6, 4),
                RawScanRecord::new(b"CoffeeShop", [0xa4, 0x2b, 0xb0, 0x01, 0x02, 0x03], -67, 11, 0),
                RawScanRecord::new(b"", [0xa4, 0x2b, 0xb0, 0x01, 0x02, 0x04], -70, 11, 4),
                RawScanRecord::new(b"Neighbours", [0x00, 0x1e, 0x58, 0xaa, 0xbb, 0xcc], -78, 1, 6),
                RawScanRecord::new(b"OldPrinter", [0x00, 0x0d, 0x93, 0x10, 0x20, 0x30], -85, 3, 1),
            ])
            .await;
        backend.set_delivery_gap(Duration::from_millis(150)).await;
        backend.set_scan_duration(Duration::from_millis(500)).await;
        backend
    }

    /// Configure the records delivered on each scan
    pub async fn set_scan_results(&self, records: Vec<RawScanRecord>) {
        self.inner.lock().await.scan_results = records;
    }

    /// Configure `start_scan` to fail with the given backend code
    pub async fn set_start_failure(&self, code: Option<i32>) {
        self.inner.lock().await.start_failure = code;
    }

    /// Configure the scan to abort with the given code after its deliveries
    pub async fn set_late_failure(&self, code: Option<i32>) {
        self.inner.lock().await.late_failure = code;
    }

    /// Delay before each delivered record
    pub async fn set_delivery_gap(&self, gap: Duration) {
        self.inner.lock().await.delivery_gap = gap;
    }

    /// Time the scan stays active after the last delivery
    pub async fn set_scan_duration(&self, duration: Duration) {
        self.inner.lock().await.scan_duration = duration;
    }

    /// Number of `start_scan` calls so far
    pub async fn start_calls(&self) -> usize {
        self.inner.lock().await.start_calls
    }

    /// Number of `is_scan_active` calls so far
    pub async fn active_polls(&self) -> usize {
        self.inner.lock().await.active_polls
    }

    /// Options passed to the most recent `start_scan`
    pub async fn last_options(&self) -> Option<ScanOptions> {
        self.inner.lock().await.last_options.clone()
    }
}

impl Default for MockScanBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanBackend for MockScanBackend {
    async fn start_scan(&self, options: &ScanOptions, sink: DiscoverySink) -> WifiResult<()> {
        let mut state = self.inner.lock().await;
        state.start_calls += 1;
        state.last_options = Some(options.clone());

        if let Some(code) = state.start_failure {
            return Err(WifiError::ScanStartFailed(code));
        }
        if self.active.swap(true, Ordering::AcqRel) {
            return Err(WifiError::ScanBusy);
        }

        let records: Vec<RawScanRecord> = match &options.ssid {
            Some(wanted) => {
                let wanted = Ssid::from(wanted.as_str());
                state
                    .scan_results
                    .iter()
                    .filter(|r| Ssid::from_raw(&r.ssid, r.ssid_len) == wanted)
                    .cloned()
                    .collect()
            }
            None => state.scan_results.clone(),
        };
        let gap = state.delivery_gap;
        let late_failure = state.late_failure;
        let duration = state.scan_duration;
        let active = self.active.clone();

        debug!("Mock scan started with {} records", records.len());
        tokio::spawn(async move {
            for record in records {
                if !gap.is_zero() {
                    tokio::time::sleep(gap).await;
                }
                sink.deliver(record);
            }
            if let Some(code) = late_failure {
                sink.abort(WifiError::ScanAborted(code));
            }
            tokio::time::sleep(duration).await;
            active.store(false, Ordering::Release);
        });

        Ok(())
    }

    async fn is_scan_active(&self) -> bool {
        self.inner.lock().await.active_polls += 1;
        self.active.load(Ordering::Acquire)
    }
}
