//! Single scan cycle against the raw backend

use std::{sync::Arc, time::Duration};
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace, warn};

use crate::{
    backend::{DiscoverySink, ScanBackend, ScanEvent, ScanOptions},
    core::{
        error::WifiError,
        outcome::ScanOutcome,
        types::{DiscoveredNetwork, RawScanRecord},
    },
    indicator::StatusIndicator,
};

/// Interval between checks of the backend's scan-active flag
pub const SCAN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Default indicator blink interval while scanning
pub const DEFAULT_BLINK_INTERVAL: Duration = Duration::from_millis(50);

/// Runs one scan-to-completion cycle at a time
///
/// Owns the status indicator; whoever owns the executor is the only one
/// driving it.
pub struct ScanExecutor<B: ScanBackend, I: StatusIndicator> {
    backend: Arc<B>,
    indicator: I,
    options: ScanOptions,
    blink_interval: Duration,
}

impl<B: ScanBackend, I: StatusIndicator> ScanExecutor<B, I> {
    pub fn new(backend: Arc<B>, indicator: I) -> Self {
        Self {
            backend,
            indicator,
            options: ScanOptions::default(),
            blink_interval: DEFAULT_BLINK_INTERVAL,
        }
    }

    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_blink_interval(mut self, interval: Duration) -> Self {
        self.blink_interval = interval;
        self
    }

    /// Run one scan and fill `outcome`
    ///
    /// The indicator pulses before the backend is started and returns to
    /// steady exactly once, including when the start is rejected. A rejected
    /// start leaves `outcome` failed with the backend code and nothing else
    /// is asked of the backend. Otherwise the backend is polled every
    /// [`SCAN_POLL_INTERVAL`] until it reports inactive, and the outcome
    /// succeeds even when nothing was found. A scan the backend aborts after
    /// starting ends failed and empty, with the abort code.
    pub async fn run_cycle(&mut self, outcome: &mut ScanOutcome) {
        outcome.reset();
        self.indicator.set_pulsing(self.blink_interval);

        let (sink, mut discoveries) = DiscoverySink::channel();
        if let Err(e) = self.backend.start_scan(&self.options, sink).await {
            self.indicator.set_steady();
            outcome.mark_failed(e.code());
            warn!("Scan start failed: {}", e);
            return;
        }
        debug!("Scan started");

        let mut aborted = None;
        let mut poll = tokio::time::interval(SCAN_POLL_INTERVAL);
        poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                Some(event) = discoveries.recv() => handle(outcome, &mut aborted, event),
                _ = poll.tick() => {
                    if !self.backend.is_scan_active().await {
                        break;
                    }
                }
            }
        }

        // Deliveries made before the backend went inactive
        while let Ok(event) = discoveries.try_recv() {
            handle(outcome, &mut aborted, event);
        }

        self.indicator.set_steady();
        match aborted {
            Some(e) => {
                outcome.reset();
                outcome.mark_failed(e.code());
                warn!("Scan aborted: {}", e);
            }
            None => {
                outcome.mark_succeeded();
                debug!("Scan complete, kept {} networks", outcome.len());
            }
        }
    }
}

fn handle(outcome: &mut ScanOutcome, aborted: &mut Option<WifiError>, event: ScanEvent) {
    match event {
        ScanEvent::Discovered(record) => collect(outcome, record),
        ScanEvent::Aborted(e) if aborted.is_none() => *aborted = Some(e),
        ScanEvent::Aborted(e) => trace!("Ignoring further abort: {}", e),
    }
}

fn collect(outcome: &mut ScanOutcome, record: RawScanRecord) {
    if outcome.is_full() {
        trace!("Result set full, dropping discovery");
        return;
    }

    match DiscoveredNetwork::from_raw(&record) {
        Some(network) => {
            outcome.try_add(network);
        }
        None => trace!("Skipping hidden network"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        backend::MockScanBackend,
        core::{auth::AuthMode, types::MAX_SCAN_RESULTS},
        indicator::{IndicatorMode, MockIndicator},
    };
    use pretty_assertions::assert_eq;

    fn record(name: &str, auth: u8) -> RawScanRecord {
        RawScanRecord::new(name.as_bytes(), [0x02, 0, 0, 0, 0, auth], -60, 6, auth)
    }

    fn executor(
        backend: &Arc<MockScanBackend>,
    ) -> (ScanExecutor<MockScanBackend, MockIndicator>, MockIndicator) {
        let indicator = MockIndicator::new();
        (ScanExecutor::new(backend.clone(), indicator.clone()), indicator)
    }

    fn names(outcome: &ScanOutcome) -> Vec<String> {
        outcome
            .networks()
            .iter()
            .map(|n| n.ssid.to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_cycle_translates_auth_in_order() {
        let backend = Arc::new(MockScanBackend::new());
        backend
            .set_scan_results(vec![record("A", 4), record("B", 0), record("C", 6)])
            .await;
        let (mut executor, _) = executor(&backend);

        let mut outcome = ScanOutcome::new();
        executor.run_cycle(&mut outcome).await;

        assert!(outcome.succeeded());
        assert_eq!(names(&outcome), vec!["A", "B", "C"]);
        let auths: Vec<AuthMode> = outcome.networks().iter().map(|n| n.auth).collect();
        assert_eq!(
            auths,
            vec![
                AuthMode::Wpa2Personal,
                AuthMode::Open,
                AuthMode::WpaWpa2Personal
            ]
        );
    }

    #[tokio::test]
    async fn test_cycle_caps_at_capacity() {
        let backend = Arc::new(MockScanBackend::new());
        backend
            .set_scan_results((0..40).map(|i| record(&format!("Net{}", i), 4)).collect())
            .await;
        let (mut executor, _) = executor(&backend);

        let mut outcome = ScanOutcome::new();
        executor.run_cycle(&mut outcome).await;

        assert!(outcome.succeeded());
        assert_eq!(outcome.len(), MAX_SCAN_RESULTS);
        assert!(outcome.is_full());
        assert_eq!(outcome.networks()[0].ssid.to_string(), "Net0");
        assert_eq!(outcome.networks()[31].ssid.to_string(), "Net31");
    }

    #[tokio::test]
    async fn test_cycle_discards_hidden_networks_anywhere() {
        let backend = Arc::new(MockScanBackend::new());
        backend
            .set_scan_results(vec![
                record("", 0),
                record("First", 2),
                record("", 4),
                RawScanRecord::new(&[0u8; 32], [0; 6], -90, 1, 0),
                record("Second", 1),
                record("", 6),
            ])
            .await;
        let (mut executor, _) = executor(&backend);

        let mut outcome = ScanOutcome::new();
        executor.run_cycle(&mut outcome).await;

        assert_eq!(names(&outcome), vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn test_cycle_counts_only_named_networks_towards_capacity() {
        let backend = Arc::new(MockScanBackend::new());
        let mut records = vec![];
        for i in 0..MAX_SCAN_RESULTS {
            records.push(record("", 0));
            records.push(record(&format!("Net{}", i), 4));
        }
        records.push(record("Late", 4));
        backend.set_scan_results(records).await;
        let (mut executor, _) = executor(&backend);

        let mut outcome = ScanOutcome::new();
        executor.run_cycle(&mut outcome).await;

        assert_eq!(outcome.len(), MAX_SCAN_RESULTS);
        assert!(!names(&outcome).contains(&"Late".to_string()));
    }

    #[tokio::test]
    async fn test_cycle_empty_scan_succeeds() {
        let backend = Arc::new(MockScanBackend::new());
        let (mut executor, indicator) = executor(&backend);

        let mut outcome = ScanOutcome::new();
        executor.run_cycle(&mut outcome).await;

        assert!(outcome.succeeded());
        assert_eq!(outcome.failure_code(), 0);
        assert!(outcome.is_empty());
        assert_eq!(
            indicator.transitions(),
            vec![
                IndicatorMode::Pulsing(DEFAULT_BLINK_INTERVAL),
                IndicatorMode::Steady
            ]
        );
    }

    #[tokio::test]
    async fn test_cycle_start_failure() {
        let backend = Arc::new(MockScanBackend::new());
        backend.set_scan_results(vec![record("Ignored", 4)]).await;
        backend.set_start_failure(Some(-7)).await;
        let (mut executor, indicator) = executor(&backend);

        let mut outcome = ScanOutcome::new();
        executor.run_cycle(&mut outcome).await;

        assert!(!outcome.succeeded());
        assert_eq!(outcome.failure_code(), -7);
        assert!(outcome.is_empty());
        assert_eq!(backend.start_calls().await, 1);
        assert_eq!(backend.active_polls().await, 0);
        assert_eq!(
            indicator.transitions(),
            vec![
                IndicatorMode::Pulsing(DEFAULT_BLINK_INTERVAL),
                IndicatorMode::Steady
            ]
        );
    }

    #[tokio::test]
    async fn test_cycle_resets_previous_outcome() {
        let backend = Arc::new(MockScanBackend::new());
        backend.set_scan_results(vec![record("Old", 4)]).await;
        let (mut executor, _) = executor(&backend);

        let mut outcome = ScanOutcome::new();
        executor.run_cycle(&mut outcome).await;
        assert_eq!(outcome.len(), 1);

        backend.set_scan_results(vec![]).await;
        executor.run_cycle(&mut outcome).await;
        assert!(outcome.succeeded());
        assert!(outcome.is_empty());
    }

    #[tokio::test]
    async fn test_indicator_transitions_once_per_cycle() {
        let backend = Arc::new(MockScanBackend::new());
        backend
            .set_scan_results((0..10).map(|i| record(&format!("N{}", i), 2)).collect())
            .await;
        backend.set_delivery_gap(Duration::from_millis(15)).await;
        let indicator = MockIndicator::new();
        let mut executor = ScanExecutor::new(backend.clone(), indicator.clone())
            .with_blink_interval(Duration::from_millis(100));

        let mut outcome = ScanOutcome::new();
        executor.run_cycle(&mut outcome).await;

        assert_eq!(outcome.len(), 10);
        assert_eq!(
            indicator.transitions(),
            vec![
                IndicatorMode::Pulsing(Duration::from_millis(100)),
                IndicatorMode::Steady
            ]
        );
    }

    #[tokio::test]
    async fn test_cycle_passes_options() {
        let backend = Arc::new(MockScanBackend::new());
        backend
            .set_scan_results(vec![record("Lab", 4), record("Guest", 0)])
            .await;
        let options = ScanOptions {
            ssid: Some("Guest".into()),
        };
        let mut executor =
            ScanExecutor::new(backend.clone(), MockIndicator::new()).with_options(options.clone());

        let mut outcome = ScanOutcome::new();
        executor.run_cycle(&mut outcome).await;

        assert_eq!(names(&outcome), vec!["Guest"]);
        assert_eq!(backend.last_options().await, Some(options));
    }

    #[tokio::test]
    async fn test_cycle_late_abort_fails_outcome() {
        let backend = Arc::new(MockScanBackend::new());
        backend
            .set_scan_results(vec![record("Seen", 4), record("AlsoSeen", 2)])
            .await;
        backend.set_late_failure(Some(-110)).await;
        let (mut executor, indicator) = executor(&backend);

        let mut outcome = ScanOutcome::new();
        executor.run_cycle(&mut outcome).await;

        assert!(!outcome.succeeded());
        assert_eq!(outcome.failure_code(), -110);
        assert!(outcome.is_empty());
        assert!(backend.active_polls().await > 0);
        assert_eq!(
            indicator.transitions(),
            vec![
                IndicatorMode::Pulsing(DEFAULT_BLINK_INTERVAL),
                IndicatorMode::Steady
            ]
        );

        // The next scan is unaffected
        backend.set_late_failure(None).await;
        executor.run_cycle(&mut outcome).await;
        assert!(outcome.succeeded());
        assert_eq!(names(&outcome), vec!["Seen", "AlsoSeen"]);
    }
}
