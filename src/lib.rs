//! Pomodoro Interval Timer Library
//!
//! This library provides the core functionality for the interval timer CLI.
//! It includes:
//! - The interval engine: work, short rest and long rest phases with cycle
//!   accounting
//! - A session actor that drives the engine from a once-per-second ticker
//! - Sound cues for phase changes
//! - Layered configuration (defaults, settings file, command-line flags)
//! - CLI command parsing and display utilities

pub mod cli;
pub mod config;
pub mod engine;
pub mod format;
pub mod session;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{ConfigError, EngineState, IntervalConfig, Phase, Snapshot};

pub use engine::{
    IntervalEngine, InvariantViolation, Notifier, NullNotifier, PhaseEvent, RecordingNotifier,
    TickHandle, Ticker, TokioTicker,
};

pub use session::{Command, Session, SessionError, SessionHandle};

pub use config::{Settings, SettingsError};

pub use format::{format_hms, format_ms};

// Re-export sound types
pub use sound::{
    CueSet, MockSoundPlayer, RodioSoundPlayer, SoundError, SoundNotifier, SoundPlayer,
    SoundSource,
};
