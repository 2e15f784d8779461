//! Interval engine.
//!
//! Owns the configuration and the single [`EngineState`] value, applies
//! commands and ticks through the transition table, and forwards phase cues
//! to the [`Notifier`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::types::{ConfigError, EngineState, IntervalConfig, Phase, Snapshot};

use super::machine::{step, Input, InvariantViolation};
use super::notifier::{Notifier, PhaseEvent};

// ============================================================================
// IntervalEngine
// ============================================================================

/// Single source of truth for where the timer is in the work/rest cycle.
pub struct IntervalEngine {
    config: IntervalConfig,
    state: EngineState,
    notifier: Arc<dyn Notifier>,
}

impl IntervalEngine {
    /// Creates an idle engine.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration has a zero duration or
    /// a zero cycle length.
    pub fn new(config: IntervalConfig, notifier: Arc<dyn Notifier>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: EngineState::new(&config),
            config,
            notifier,
        })
    }

    /// Starts (or restarts) a work interval.
    pub fn start_work(&mut self) {
        self.apply(Input::StartWork);
    }

    /// Starts a short or long rest.
    pub fn start_rest(&mut self, is_long: bool) {
        self.apply(Input::StartRest { is_long });
    }

    /// Halts or resumes the countdown. Does nothing while idle.
    pub fn toggle_pause(&mut self) {
        self.apply(Input::TogglePause);
    }

    /// Advances the countdown by one second.
    ///
    /// Returns the cue for the phase entered by this tick, if any. A tick
    /// delivered while halted leaves the state untouched.
    pub fn advance(&mut self) -> Option<PhaseEvent> {
        self.apply(Input::Advance)
    }

    fn apply(&mut self, input: Input) -> Option<PhaseEvent> {
        let transition = match step(&self.config, &self.state, input) {
            Ok(transition) => transition,
            Err(violation) => {
                debug_assert!(
                    !matches!(violation, InvariantViolation::Exhausted { .. }),
                    "{violation}"
                );
                warn!("Ignoring tick: {}", violation);
                return None;
            }
        };

        let previous = self.state.phase;
        self.state = transition.state;

        if let Some(event) = transition.event {
            info!(
                from = %previous,
                to = %self.state.phase,
                remaining = self.state.remaining_seconds,
                "Phase entered"
            );
            self.notifier.notify(event);
        } else if input == Input::TogglePause {
            debug!(running = self.state.running, "Pause toggled");
        }

        transition.event
    }

    /// Returns a reference to the current state.
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Returns the read-only projection of the current state.
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Returns the configuration the engine was built with.
    pub fn config(&self) -> &IntervalConfig {
        &self.config
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Returns true if ticks should be delivered.
    pub fn is_running(&self) -> bool {
        self.state.running && self.state.phase != Phase::Idle
    }
}

impl std::fmt::Debug for IntervalEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntervalEngine")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
