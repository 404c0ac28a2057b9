//! Status indicator trait definition

use std::time::Duration;

/// Visual state of the scan status indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorMode {
    /// Solid on, no scan running
    Steady,
    /// Blinking at the given interval while a scan runs
    Pulsing(Duration),
}

/// Binary-state indicator driven by the scan executor
///
/// Calls are fire-and-forget. Only the scan worker drives the indicator.
pub trait StatusIndicator: Send + 'static {
    fn set_steady(&mut self);

    fn set_pulsing(&mut self, interval: Duration);
}
