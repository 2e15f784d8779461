//! Core data types for the interval timer.
//!
//! This module defines the data structures used for:
//! - Phase tracking (idle / working / short rest / long rest)
//! - Timer configuration with validation
//! - The engine state bundle and its read-only snapshot

mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};

// ============================================================================
// Phase
// ============================================================================

/// Represents the current phase of the interval cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing has been started yet
    #[default]
    Idle,
    /// Currently in a work interval
    Working,
    /// Currently in a short rest
    ShortResting,
    /// Currently in a long rest (once per cycle)
    LongResting,
}

impl Phase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Working => "working",
            Phase::ShortResting => "short_resting",
            Phase::LongResting => "long_resting",
        }
    }

    /// Returns true for either rest phase.
    pub fn is_resting(&self) -> bool {
        matches!(self, Phase::ShortResting | Phase::LongResting)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// IntervalConfig
// ============================================================================

/// Durations and cycle length for the interval timer.
///
/// All durations are in seconds. A value is only usable by the engine after
/// [`IntervalConfig::validate`] succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalConfig {
    /// Work interval length in seconds
    pub work_seconds: u32,
    /// Short rest length in seconds
    pub short_rest_seconds: u32,
    /// Long rest length in seconds
    pub long_rest_seconds: u32,
    /// Number of work intervals per cycle; the last one is followed by a long rest
    pub cycles_before_long_rest: u32,
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self {
            work_seconds: 25 * 60,
            short_rest_seconds: 5 * 60,
            long_rest_seconds: 15 * 60,
            cycles_before_long_rest: 4,
        }
    }
}

impl IntervalConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any duration is zero or the cycle length
    /// is less than one.
    pub fn new(
        work_seconds: u32,
        short_rest_seconds: u32,
        long_rest_seconds: u32,
        cycles_before_long_rest: u32,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            work_seconds,
            short_rest_seconds,
            long_rest_seconds,
            cycles_before_long_rest,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the work duration in seconds.
    pub fn with_work_seconds(mut self, seconds: u32) -> Self {
        self.work_seconds = seconds;
        self
    }

    /// Sets the short rest duration in seconds.
    pub fn with_short_rest_seconds(mut self, seconds: u32) -> Self {
        self.short_rest_seconds = seconds;
        self
    }

    /// Sets the long rest duration in seconds.
    pub fn with_long_rest_seconds(mut self, seconds: u32) -> Self {
        self.long_rest_seconds = seconds;
        self
    }

    /// Sets the number of work intervals per cycle.
    pub fn with_cycles_before_long_rest(mut self, cycles: u32) -> Self {
        self.cycles_before_long_rest = cycles;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.work_seconds == 0 {
            return Err(ConfigError::WorkDuration);
        }
        if self.short_rest_seconds == 0 {
            return Err(ConfigError::ShortRestDuration);
        }
        if self.long_rest_seconds == 0 {
            return Err(ConfigError::LongRestDuration);
        }
        if self.cycles_before_long_rest == 0 {
            return Err(ConfigError::Cycles);
        }
        Ok(())
    }

    /// Returns the rest length for the given rest kind.
    pub fn rest_seconds(&self, is_long: bool) -> u32 {
        if is_long {
            self.long_rest_seconds
        } else {
            self.short_rest_seconds
        }
    }

    /// Number of short rests taken before each long rest.
    pub fn short_rests_per_cycle(&self) -> u32 {
        self.cycles_before_long_rest.saturating_sub(1)
    }
}

// ============================================================================
// EngineState
// ============================================================================

/// Everything the engine tracks, kept in one value so each event replaces it
/// wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineState {
    /// Current phase
    pub phase: Phase,
    /// Seconds left in the current phase
    pub remaining_seconds: u32,
    /// Whether ticks count down
    pub running: bool,
    /// Short rests left before the next long rest
    pub short_rests_remaining_in_cycle: u32,
    /// Number of long rests entered
    pub completed_cycles: u32,
    /// Number of work intervals that ran to zero
    pub completed_work_intervals: u32,
    /// Seconds counted while working
    pub total_seconds_worked: u64,
}

impl EngineState {
    /// Creates the initial idle state for a configuration.
    pub fn new(config: &IntervalConfig) -> Self {
        Self {
            phase: Phase::Idle,
            remaining_seconds: config.work_seconds,
            running: false,
            short_rests_remaining_in_cycle: config.short_rests_per_cycle(),
            completed_cycles: 0,
            completed_work_intervals: 0,
            total_seconds_worked: 0,
        }
    }

    /// Returns the read-only projection used by presenters.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            remaining_seconds: self.remaining_seconds,
            running: self.running,
            completed_cycles: self.completed_cycles,
            completed_work_intervals: self.completed_work_intervals,
            total_seconds_worked: self.total_seconds_worked,
        }
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// Read-only view of the engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub phase: Phase,
    pub remaining_seconds: u32,
    pub running: bool,
    pub completed_cycles: u32,
    pub completed_work_intervals: u32,
    pub total_seconds_worked: u64,
}

impl Snapshot {
    /// Returns true if a phase was entered but the countdown is halted.
    pub fn is_paused(&self) -> bool {
        self.phase != Phase::Idle && !self.running
    }
}

// ============================================================================
// Tests
// ============================================================================
