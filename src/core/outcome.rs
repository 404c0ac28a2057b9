//! Fixed-capacity aggregate result of one scan cycle

use serde::Serialize;

use crate::core::types::{DiscoveredNetwork, MAX_SCAN_RESULTS};

/// Result of a WiFi scan
///
/// Networks are kept in discovery order. Storage is fixed at
/// [`MAX_SCAN_RESULTS`] entries and never reallocates; once full, further
/// insertions are rejected without touching what is already stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    succeeded: bool,
    failure_code: i32,
    networks: heapless::Vec<DiscoveredNetwork, MAX_SCAN_RESULTS>,
}

impl ScanOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear for a new cycle
    pub fn reset(&mut self) {
        self.succeeded = false;
        self.failure_code = 0;
        self.networks.clear();
    }

    /// Append a network, returns false if at capacity
    pub fn try_add(&mut self, network: DiscoveredNetwork) -> bool {
        self.networks.push(network).is_ok()
    }

    pub fn is_full(&self) -> bool {
        self.networks.is_full()
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// Backend code of a failed cycle, zero otherwise
    pub fn failure_code(&self) -> i32 {
        self.failure_code
    }

    pub fn networks(&self) -> &[DiscoveredNetwork] {
        &self.networks
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.networks.capacity()
    }

    pub(crate) fn mark_succeeded(&mut self) {
        self.succeeded = true;
        self.failure_code = 0;
    }

    pub(crate) fn mark_failed(&mut self, code: i32) {
        self.succeeded = false;
        self.failure_code = code;
    }
}
