//! Single-owner event loop around the interval engine.
//!
//! Commands from any number of [`SessionHandle`]s and ticks from the
//! [`Ticker`] go through one queue and are applied one at a time. The loop
//! keeps the ticker in step with the engine's `running` flag and publishes a
//! fresh [`Snapshot`] after every event.
//!
//! ```text
//! SessionHandle ──┐
//!                 ├─▶ mpsc queue ─▶ Session::run ─▶ IntervalEngine ─▶ watch<Snapshot>
//! Ticker ─────────┘                     │
//!                                       └─ schedule / cancel ticker
//! ```

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::engine::{IntervalEngine, TickHandle, Ticker, TICK_PERIOD};
use crate::types::Snapshot;

// ============================================================================
// Commands
// ============================================================================

/// Commands a presenter may issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartWork,
    StartRest { is_long: bool },
    TogglePause,
}

#[derive(Debug)]
enum SessionEvent {
    Command(Command),
    /// Tick from the schedule with the given generation
    Tick(u64),
    Shutdown,
}

/// Errors returned by [`SessionHandle`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("タイマーセッションは終了しています")]
    Closed,
}

// ============================================================================
// Session
// ============================================================================

/// Owns the engine and drives it from the event queue.
pub struct Session<T: Ticker> {
    engine: IntervalEngine,
    ticker: T,
    tick_handle: Option<TickHandle>,
    generation: u64,
    events_tx: mpsc::WeakUnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
    snapshot_tx: watch::Sender<Snapshot>,
}

impl<T: Ticker> Session<T> {
    /// Creates a session and the first handle to it.
    ///
    /// The loop ends when [`SessionHandle::shutdown`] is called or every
    /// handle has been dropped.
    pub fn new(engine: IntervalEngine, ticker: T) -> (Self, SessionHandle) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());

        let session = Self {
            engine,
            ticker,
            tick_handle: None,
            generation: 0,
            events_tx: events_tx.downgrade(),
            events_rx,
            snapshot_tx,
        };
        let handle = SessionHandle {
            events_tx,
            snapshot_rx,
        };
        (session, handle)
    }

    /// Runs the event loop and returns the final snapshot.
    pub async fn run(mut self) -> Snapshot {
        info!("Session started");

        while let Some(event) = self.events_rx.recv().await {
            match event {
                SessionEvent::Command(command) => self.handle_command(command),
                SessionEvent::Tick(generation) => self.handle_tick(generation),
                SessionEvent::Shutdown => break,
            }
            self.sync_ticker();
            self.publish();
        }

        self.stop_ticker();
        let snapshot = self.engine.snapshot();
        info!(
            completed_work_intervals = snapshot.completed_work_intervals,
            completed_cycles = snapshot.completed_cycles,
            total_seconds_worked = snapshot.total_seconds_worked,
            "Session finished"
        );
        snapshot
    }

    fn handle_command(&mut self, command: Command) {
        debug!(?command, "Command received");
        match command {
            Command::StartWork => self.engine.start_work(),
            Command::StartRest { is_long } => self.engine.start_rest(is_long),
            Command::TogglePause => self.engine.toggle_pause(),
        }
    }

    fn handle_tick(&mut self, generation: u64) {
        if self.tick_handle.is_none() || generation != self.generation {
            debug!(generation, current = self.generation, "Dropping stale tick");
            return;
        }
        self.engine.advance();
    }

    /// Schedules the ticker when the engine starts running and cancels it
    /// when it stops.
    fn sync_ticker(&mut self) {
        let should_tick = self.engine.is_running();
        match (self.tick_handle.is_some(), should_tick) {
            (false, true) => self.start_ticker(),
            (true, false) => self.stop_ticker(),
            _ => {}
        }
    }

    fn start_ticker(&mut self) {
        self.generation += 1;
        let generation = self.generation;
        let events_tx = self.events_tx.clone();

        let handle = self.ticker.schedule(
            TICK_PERIOD,
            Box::new(move || {
                if let Some(tx) = events_tx.upgrade() {
                    let _ = tx.send(SessionEvent::Tick(generation));
                }
            }),
        );
        self.tick_handle = Some(handle);
    }

    fn stop_ticker(&mut self) {
        if let Some(handle) = self.tick_handle.take() {
            handle.cancel();
            self.generation += 1;
        }
    }

    fn publish(&self) {
        let snapshot = self.engine.snapshot();
        self.snapshot_tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}

// ============================================================================
// SessionHandle
// ============================================================================

/// Cloneable front end to a running [`Session`].
#[derive(Debug, Clone)]
pub struct SessionHandle {
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    snapshot_rx: watch::Receiver<Snapshot>,
}

impl SessionHandle {
    /// Queues a command.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Closed`] if the session loop has ended.
    pub fn send(&self, command: Command) -> Result<(), SessionError> {
        self.events_tx
            .send(SessionEvent::Command(command))
            .map_err(|_| SessionError::Closed)
    }

    /// Queues [`Command::StartWork`].
    pub fn start_work(&self) -> Result<(), SessionError> {
        self.send(Command::StartWork)
    }

    /// Queues a short or long rest.
    pub fn start_rest(&self, is_long: bool) -> Result<(), SessionError> {
        self.send(Command::StartRest { is_long })
    }

    /// Queues a pause or resume.
    pub fn toggle_pause(&self) -> Result<(), SessionError> {
        self.send(Command::TogglePause)
    }

    /// Asks the loop to stop after the events already queued.
    pub fn shutdown(&self) -> Result<(), SessionError> {
        self.events_tx
            .send(SessionEvent::Shutdown)
            .map_err(|_| SessionError::Closed)
    }

    /// Returns the latest published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        *self.snapshot_rx.borrow()
    }

    /// Returns a receiver that is notified on every snapshot change.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_rx.clone()
    }
}

// ============================================================================
// Tests
// ============================================================================
