//! Interval engine for the timer.
//!
//! This module provides the core timer functionality:
//! - `machine`: the pure transition table (work → rest → work, short vs. long)
//! - `interval`: `IntervalEngine`, which owns the state and calls the notifier
//! - `notifier`: the phase cue seam
//! - `ticker`: the cancelable once-per-second tick source

pub mod interval;
pub mod machine;
pub mod notifier;
pub mod ticker;

pub use interval::IntervalEngine;
pub use machine::{step, Input, InvariantViolation, Transition};
pub use notifier::{Notifier, NullNotifier, PhaseEvent, RecordingNotifier};
pub use ticker::{TickCallback, TickHandle, Ticker, TokioTicker, TICK_PERIOD};
