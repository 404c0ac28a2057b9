//! Mock status indicator for testing

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use crate::indicator::{IndicatorMode, StatusIndicator};

/// Records every mode change; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct MockIndicator {
    transitions: Arc<Mutex<Vec<IndicatorMode>>>,
}

impl MockIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// All transitions so far, oldest first
    pub fn transitions(&self) -> Vec<IndicatorMode> {
        self.transitions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, mode: IndicatorMode) {
        self.transitions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(mode);
    }
}

impl StatusIndicator for MockIndicator {
    fn set_steady(&mut self) {
        self.record(IndicatorMode::Steady);
    }

    fn set_pulsing(&mut self, interval: Duration) {
        self.record(IndicatorMode::Pulsing(interval));
    }
}
