//! Software LED that blinks on a tokio interval

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::{runtime::Handle, task::JoinHandle, time::MissedTickBehavior};
use tracing::{debug, trace, warn};

use crate::indicator::{IndicatorMode, StatusIndicator};

/// LED indicator toggled by a background blink task
///
/// Steady mode leaves the LED lit.
#[derive(Debug)]
pub struct BlinkingIndicator {
    lit: Arc<AtomicBool>,
    mode: IndicatorMode,
    blinker: Option<JoinHandle<()>>,
}

impl BlinkingIndicator {
    pub fn new() -> Self {
        Self {
            lit: Arc::new(AtomicBool::new(true)),
            mode: IndicatorMode::Steady,
            blinker: None,
        }
    }

    pub fn is_lit(&self) -> bool {
        self.lit.load(Ordering::Relaxed)
    }

    pub fn mode(&self) -> IndicatorMode {
        self.mode
    }

    fn stop_blinker(&mut self) {
        if let Some(blinker) = self.blinker.take() {
            blinker.abort();
        }
    }
}

impl Default for BlinkingIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusIndicator for BlinkingIndicator {
    fn set_steady(&mut self) {
        self.stop_blinker();
        self.lit.store(true, Ordering::Relaxed);
        self.mode = IndicatorMode::Steady;
        debug!("Indicator steady");
    }

    fn set_pulsing(&mut self, interval: Duration) {
        self.stop_blinker();
        self.lit.store(true, Ordering::Relaxed);

        let Ok(handle) = Handle::try_current() else {
            warn!("No runtime available for indicator blinking, staying steady");
            self.mode = IndicatorMode::Steady;
            return;
        };

        // tokio::time::interval panics on a zero period
        let period = interval.max(Duration::from_millis(1));
        let lit = self.lit.clone();
        self.blinker = Some(handle.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let now_lit = !lit.fetch_xor(true, Ordering::Relaxed);
                trace!(lit = now_lit, "Indicator toggled");
            }
        }));
        self.mode = IndicatorMode::Pulsing(interval);
        debug!("Indicator pulsing every {:?}", interval);
    }
}

impl Drop for BlinkingIndicator {
    fn drop(&mut self) {
        self.stop_blinker();
    }
}
