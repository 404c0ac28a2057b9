//! Synchronous scan request/response coordinator
//!
//! One worker task owns the [`ScanExecutor`] and runs one cycle per request.
//! Requesters hand their [`ScanOutcome`] to the worker through a single-slot
//! request channel and get it back through a per-request completion signal.
//! Moving the outcome into the request is sequenced before the send, and the
//! worker only touches it after receiving, so no lock guards the outcome.

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use tokio::{
    runtime::Handle,
    sync::{mpsc, oneshot},
    task::JoinHandle,
    time::Instant,
};
use tracing::{debug, info, warn};

use crate::{
    backend::ScanBackend,
    core::{
        error::{ServiceError, ServiceResult},
        outcome::ScanOutcome,
        scanner::ScanExecutor,
    },
    indicator::StatusIndicator,
};

/// Default time a requester waits for a scan to complete
pub const DEFAULT_SCAN_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Coordinator states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No request in flight
    Idle,
    /// A request was accepted and the worker has not completed it yet
    Requested,
}

/// A pending scan, carrying the outcome buffer to fill
struct ScanRequest {
    outcome: ScanOutcome,
    respond_to: oneshot::Sender<ScanOutcome>,
}

/// Request/response front end for a single scan worker
///
/// Requests are served one at a time; concurrent requesters queue behind the
/// single request slot in arrival order, there is no further arbitration.
/// The worker stops when the coordinator is dropped.
pub struct ScanCoordinator<B: ScanBackend, I: StatusIndicator> {
    executor: Option<ScanExecutor<B, I>>,
    requests: Option<mpsc::Sender<ScanRequest>>,
    in_flight: Arc<AtomicUsize>,
    worker: Option<JoinHandle<()>>,
}

impl<B: ScanBackend, I: StatusIndicator> ScanCoordinator<B, I> {
    pub fn new(executor: ScanExecutor<B, I>) -> Self {
        Self {
            executor: Some(executor),
            requests: None,
            in_flight: Arc::new(AtomicUsize::new(0)),
            worker: None,
        }
    }

    /// Spawn the scan worker on the current tokio runtime
    ///
    /// `request_scan` must not be relied on if this fails.
    pub fn start_worker(&mut self) -> ServiceResult<()> {
        if self.requests.is_some() {
            return Err(ServiceError::WorkerAlreadyStarted);
        }
        let handle = Handle::try_current().map_err(|e| ServiceError::WorkerSpawn(e.to_string()))?;
        let executor = self.executor.take().ok_or(ServiceError::WorkerAlreadyStarted)?;

        let (tx, rx) = mpsc::channel(1);
        let in_flight = self.in_flight.clone();
        self.worker = Some(handle.spawn(run_worker(executor, rx, in_flight)));
        self.requests = Some(tx);

        info!("Scan worker started");
        Ok(())
    }

    /// Whether the worker task is alive
    pub fn is_worker_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }

    /// Current coordinator state
    ///
    /// A requester that timed out can poll this to learn when the abandoned
    /// cycle has finished before issuing another request.
    pub fn state(&self) -> ScanState {
        if self.in_flight.load(Ordering::Acquire) == 0 {
            ScanState::Idle
        } else {
            ScanState::Requested
        }
    }

    /// Request a scan and wait up to `timeout` for it to complete
    ///
    /// Returns true iff the worker completed the cycle within `timeout`; the
    /// result is then in `outcome`. Any failure, including a timeout or a
    /// worker that was never started, returns false.
    pub async fn request_scan(&self, outcome: &mut ScanOutcome, timeout: Duration) -> bool {
        match self.try_request_scan(outcome, timeout).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Scan request failed: {}", e);
                false
            }
        }
    }

    /// Request a scan, reporting why it did not complete
    ///
    /// On timeout the worker is not cancelled: the cycle runs to completion
    /// and its result is discarded. `outcome` is left reset and is never
    /// touched by the worker after this returns.
    pub async fn try_request_scan(
        &self,
        outcome: &mut ScanOutcome,
        timeout: Duration,
    ) -> ServiceResult<()> {
        let requests = self.requests.as_ref().ok_or(ServiceError::WorkerNotStarted)?;
        let deadline = Instant::now() + timeout;

        let permit = match tokio::time::timeout_at(deadline, requests.reserve()).await {
            Ok(Ok(permit)) => permit,
            Ok(Err(_)) => return Err(ServiceError::WorkerStopped),
            Err(_) => return Err(ServiceError::Timeout(timeout)),
        };

        let (respond_to, response) = oneshot::channel();
        let buffer = std::mem::take(outcome);
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        permit.send(ScanRequest {
            outcome: buffer,
            respond_to,
        });
        debug!("Scan requested");

        match tokio::time::timeout_at(deadline, response).await {
            Ok(Ok(completed)) => {
                *outcome = completed;
                Ok(())
            }
            Ok(Err(_)) => Err(ServiceError::WorkerStopped),
            Err(_) => Err(ServiceError::Timeout(timeout)),
        }
    }
}

async fn run_worker<B: ScanBackend, I: StatusIndicator>(
    mut executor: ScanExecutor<B, I>,
    mut requests: mpsc::Receiver<ScanRequest>,
    in_flight: Arc<AtomicUsize>,
) {
    let mut cycle: u64 = 0;

    while let Some(ScanRequest {
        mut outcome,
        respond_to,
    }) = requests.recv().await
    {
        if respond_to.is_closed() {
            debug!("Requester gave up before the scan started, skipping");
            in_flight.fetch_sub(1, Ordering::AcqRel);
            continue;
        }

        cycle += 1;
        debug!(cycle, "Scan cycle starting");
        executor.run_cycle(&mut outcome).await;
        debug!(
            cycle,
            succeeded = outcome.succeeded(),
            networks = outcome.len(),
            "Scan cycle finished"
        );

        in_flight.fetch_sub(1, Ordering::AcqRel);
        if respond_to.send(outcome).is_err() {
            warn!(cycle, "Requester timed out, discarding scan outcome");
        }
    }

    info!("Scan worker stopped");
}
