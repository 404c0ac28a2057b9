//! Raw scan backend trait definition

use tokio::sync::mpsc;
use trait_variant::make;

use crate::core::{
    error::{WifiError, WifiResult},
    types::RawScanRecord,
};

/// Options passed to the backend when a scan is started
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Only report networks with this exact name
    pub ssid: Option<String>,
}

/// Event reported by a running scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// One access point was seen
    Discovered(RawScanRecord),
    /// The scan failed after it was started; nothing it delivered is kept
    Aborted(WifiError),
}

/// Receiving end of a [`DiscoverySink`]
pub type DiscoveryStream = mpsc::UnboundedReceiver<ScanEvent>;

/// Hands discovery events from the backend to the scan executor
///
/// Backends may deliver from any task or thread; delivery never blocks.
#[derive(Debug, Clone)]
pub struct DiscoverySink {
    tx: mpsc::UnboundedSender<ScanEvent>,
}

impl DiscoverySink {
    pub fn channel() -> (Self, DiscoveryStream) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Deliver one discovery event
    ///
    /// Returns false once the executor has stopped listening.
    pub fn deliver(&self, record: RawScanRecord) -> bool {
        self.tx.send(ScanEvent::Discovered(record)).is_ok()
    }

    /// Report that the running scan failed
    ///
    /// The backend must still go inactive afterwards.
    pub fn abort(&self, error: WifiError) -> bool {
        self.tx.send(ScanEvent::Aborted(error)).is_ok()
    }
}

/// Abstraction over the radio performing the physical scan
///
/// A backend runs at most one scan at a time. `start_scan` returns as soon
/// as the scan is running; discoveries and late failures arrive on the sink
/// and completion is observed through `is_scan_active`.
#[make(Send)]
pub trait ScanBackend: Send + Sync + 'static {
    /// Start a scan; an error means nothing was started
    async fn start_scan(&self, options: &ScanOptions, sink: DiscoverySink) -> WifiResult<()>;

    /// Whether the scan started last is still running
    async fn is_scan_active(&self) -> bool;
}
