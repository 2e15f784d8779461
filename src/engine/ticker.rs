//! Periodic tick source.
//!
//! A [`Ticker`] fires a callback at a fixed period until its [`TickHandle`] is
//! cancelled or dropped. Firings of one schedule never overlap, and none
//! happen after cancellation returns.

use tokio::sync::oneshot;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::debug;

/// Period the engine expects between ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Callback invoked on every tick.
pub type TickCallback = Box<dyn FnMut() + Send + 'static>;

/// Schedules periodic callbacks.
pub trait Ticker: Send {
    /// Starts firing `callback` every `period`, first firing one period from now.
    fn schedule(&mut self, period: Duration, callback: TickCallback) -> TickHandle;
}

// ============================================================================
// TickHandle
// ============================================================================

/// Cancels a schedule when [`TickHandle::cancel`] is called or the handle is
/// dropped.
#[must_use = "dropping a TickHandle cancels the schedule"]
pub struct TickHandle {
    cancel: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl TickHandle {
    /// Wraps a cancellation routine.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stops future firings.
    pub fn cancel(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl std::fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickHandle")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

// ============================================================================
// TokioTicker
// ============================================================================

/// Ticker backed by `tokio::time::interval`. Must be used inside a tokio
/// runtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioTicker;

impl Ticker for TokioTicker {
    fn schedule(&mut self, period: Duration, mut callback: TickCallback) -> TickHandle {
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = &mut cancel_rx => break,
                    _ = ticker.tick() => callback(),
                }
            }
            debug!("Ticker stopped");
        });

        debug!(period_ms = period.as_millis() as u64, "Ticker scheduled");

        TickHandle::new(move || {
            let _ = cancel_tx.send(());
            task.abort();
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
