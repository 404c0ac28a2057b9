//! Scan status indicator

pub mod blinking_indicator;
pub mod mock_indicator;
pub mod status_indicator;

pub use blinking_indicator::BlinkingIndicator;
pub use status_indicator::{IndicatorMode, StatusIndicator};

#[cfg(test)]
pub use mock_indicator::MockIndicator;
