//! Raw scan backend abstraction layer

pub mod mock_backend;
pub mod scan_backend;
pub mod wifi_ctrl_backend;

pub use mock_backend::MockScanBackend;
pub use scan_backend::{DiscoverySink, DiscoveryStream, ScanBackend, ScanEvent, ScanOptions};
pub use wifi_ctrl_backend::WifiCtrlBackend;
