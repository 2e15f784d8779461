//! Transition table for the interval cycle.
//!
//! [`step`] maps `(state, input)` to the next state plus the cue to emit, and
//! never touches anything else. `IntervalEngine` is a thin shell around it.

use thiserror::Error;

use crate::types::{EngineState, IntervalConfig, Phase};

use super::notifier::PhaseEvent;

/// Inputs the machine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    StartWork,
    StartRest { is_long: bool },
    TogglePause,
    /// One elapsed second
    Advance,
}

/// Result of applying one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Replacement for the previous state
    pub state: EngineState,
    /// Phase cue to hand to the notifier, set exactly when a phase is entered
    pub event: Option<PhaseEvent>,
}

impl Transition {
    fn quiet(state: EngineState) -> Self {
        Self { state, event: None }
    }
}

/// A tick that should never have been delivered.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("tick delivered while the countdown is halted (phase: {phase})")]
    NotRunning { phase: Phase },

    #[error("tick delivered with no time left in {phase}; a transition was missed")]
    Exhausted { phase: Phase },
}

/// Applies one input to a state.
///
/// # Errors
///
/// Only [`Input::Advance`] can fail, and only when the caller delivered a
/// tick it should not have. The state is left untouched in that case.
pub fn step(
    config: &IntervalConfig,
    state: &EngineState,
    input: Input,
) -> Result<Transition, InvariantViolation> {
    match input {
        Input::StartWork => Ok(enter_work(config, *state)),
        Input::StartRest { is_long } => Ok(enter_rest(config, *state, is_long)),
        Input::TogglePause => Ok(toggle_pause(*state)),
        Input::Advance => advance(config, *state),
    }
}

fn enter_work(config: &IntervalConfig, mut state: EngineState) -> Transition {
    state.phase = Phase::Working;
    state.running = true;
    state.remaining_seconds = config.work_seconds;
    Transition {
        state,
        event: Some(PhaseEvent::WorkStarted),
    }
}

fn enter_rest(config: &IntervalConfig, mut state: EngineState, is_long: bool) -> Transition {
    state.phase = if is_long {
        Phase::LongResting
    } else {
        Phase::ShortResting
    };
    state.running = true;
    state.remaining_seconds = config.rest_seconds(is_long);
    Transition {
        state,
        event: Some(PhaseEvent::RestStarted { is_long }),
    }
}

fn toggle_pause(mut state: EngineState) -> Transition {
    // Idle never counts down, so there is nothing to pause.
    if state.phase != Phase::Idle {
        state.running = !state.running;
    }
    Transition::quiet(state)
}

fn advance(
    config: &IntervalConfig,
    mut state: EngineState,
) -> Result<Transition, InvariantViolation> {
    if !state.running {
        return Err(InvariantViolation::NotRunning { phase: state.phase });
    }
    if state.remaining_seconds == 0 {
        return Err(InvariantViolation::Exhausted { phase: state.phase });
    }

    if state.phase == Phase::Working {
        state.total_seconds_worked += 1;
    }
    state.remaining_seconds -= 1;

    if state.remaining_seconds > 0 {
        return Ok(Transition::quiet(state));
    }

    let transition = match state.phase {
        Phase::Working => {
            state.completed_work_intervals += 1;
            if state.short_rests_remaining_in_cycle > 0 {
                state.short_rests_remaining_in_cycle -= 1;
                enter_rest(config, state, false)
            } else {
                state.completed_cycles += 1;
                state.short_rests_remaining_in_cycle = config.short_rests_per_cycle();
                enter_rest(config, state, true)
            }
        }
        Phase::ShortResting | Phase::LongResting => enter_work(config, state),
        Phase::Idle => Transition::quiet(state),
    };
    Ok(transition)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> IntervalConfig {
        IntervalConfig::new(3, 2, 4, 2).unwrap()
    }

    fn apply(state: &EngineState, input: Input) -> Transition {
        step(&config(), state, input).unwrap()
    }

    mod command_tests {
        use super::*;

        #[test]
        fn test_start_work_from_idle() {
            let state = EngineState::new(&config());
            let t = apply(&state, Input::StartWork);

            assert_eq!(t.state.phase, Phase::Working);
            assert!(t.state.running);
            assert_eq!(t.state.remaining_seconds, 3);
            assert_eq!(t.event, Some(PhaseEvent::WorkStarted));
        }

        #[test]
        fn test_start_work_twice_matches_once() {
            let state = EngineState::new(&config());
            let once = apply(&state, Input::StartWork);
            let twice = apply(&once.state, Input::StartWork);
            assert_eq!(once.state, twice.state);
        }

        #[test]
        fn test_start_work_resets_partial_countdown() {
            let state = EngineState::new(&config());
            let working = apply(&state, Input::StartWork).state;
            let ticked = apply(&working, Input::Advance).state;
            assert_eq!(ticked.remaining_seconds, 2);

            let restarted = apply(&ticked, Input::StartWork).state;
            assert_eq!(restarted.remaining_seconds, 3);
            assert_eq!(restarted.total_seconds_worked, 1);
        }

        #[test]
        fn test_start_rest_short_and_long() {
            let state = EngineState::new(&config());

            let short = apply(&state, Input::StartRest { is_long: false });
            assert_eq!(short.state.phase, Phase::ShortResting);
            assert_eq!(short.state.remaining_seconds, 2);
            assert_eq!(short.event, Some(PhaseEvent::RestStarted { is_long: false }));

            let long = apply(&state, Input::StartRest { is_long: true });
            assert_eq!(long.state.phase, Phase::LongResting);
            assert_eq!(long.state.remaining_seconds, 4);
            assert_eq!(long.event, Some(PhaseEvent::RestStarted { is_long: true }));
        }

        #[test]
        fn test_manual_rest_does_not_touch_cycle_counter() {
            let state = EngineState::new(&config());
            let t = apply(&state, Input::StartRest { is_long: true });
            assert_eq!(t.state.completed_cycles, 0);
            assert_eq!(t.state.short_rests_remaining_in_cycle, 1);
        }

        #[test]
        fn test_toggle_pause_flips_running() {
            let state = EngineState::new(&config());
            let working = apply(&state, Input::StartWork).state;

            let paused = apply(&working, Input::TogglePause);
            assert!(!paused.state.running);
            assert_eq!(paused.event, None);

            let resumed = apply(&paused.state, Input::TogglePause);
            assert!(resumed.state.running);
        }

        #[test]
        fn test_toggle_pause_while_idle_is_noop() {
            let state = EngineState::new(&config());
            let t = apply(&state, Input::TogglePause);
            assert_eq!(t.state, state);
        }
    }

    mod advance_tests {
        use super::*;

        #[test]
        fn test_advance_counts_work_seconds() {
            let state = EngineState::new(&config());
            let working = apply(&state, Input::StartWork).state;
            let t = apply(&working, Input::Advance);

            assert_eq!(t.state.remaining_seconds, 2);
            assert_eq!(t.state.total_seconds_worked, 1);
            assert_eq!(t.event, None);
        }

        #[test]
        fn test_advance_during_rest_does_not_count_work() {
            let state = EngineState::new(&config());
            let resting = apply(&state, Input::StartRest { is_long: false }).state;
            let t = apply(&resting, Input::Advance);

            assert_eq!(t.state.remaining_seconds, 1);
            assert_eq!(t.state.total_seconds_worked, 0);
        }

        #[test]
        fn test_work_reaching_zero_enters_short_rest() {
            let mut state = apply(&EngineState::new(&config()), Input::StartWork).state;
            let mut events = Vec::new();
            for _ in 0..3 {
                let t = apply(&state, Input::Advance);
                events.extend(t.event);
                state = t.state;
            }

            assert_eq!(events, vec![PhaseEvent::RestStarted { is_long: false }]);
            assert_eq!(state.phase, Phase::ShortResting);
            assert_eq!(state.remaining_seconds, 2);
            assert_eq!(state.completed_work_intervals, 1);
            assert_eq!(state.short_rests_remaining_in_cycle, 0);
            assert_eq!(state.completed_cycles, 0);
        }

        #[test]
        fn test_last_work_in_cycle_enters_long_rest() {
            let mut state = apply(&EngineState::new(&config()), Input::StartWork).state;
            state.short_rests_remaining_in_cycle = 0;
            state.remaining_seconds = 1;

            let t = apply(&state, Input::Advance);
            assert_eq!(t.event, Some(PhaseEvent::RestStarted { is_long: true }));
            assert_eq!(t.state.phase, Phase::LongResting);
            assert_eq!(t.state.remaining_seconds, 4);
            assert_eq!(t.state.completed_cycles, 1);
            assert_eq!(t.state.short_rests_remaining_in_cycle, 1);
        }

        #[test]
        fn test_rest_reaching_zero_resumes_work() {
            let mut state =
                apply(&EngineState::new(&config()), Input::StartRest { is_long: true }).state;
            state.remaining_seconds = 1;

            let t = apply(&state, Input::Advance);
            assert_eq!(t.event, Some(PhaseEvent::WorkStarted));
            assert_eq!(t.state.phase, Phase::Working);
            assert_eq!(t.state.remaining_seconds, 3);
            assert!(t.state.running);
        }

        #[test]
        fn test_advance_while_paused_is_rejected() {
            let working = apply(&EngineState::new(&config()), Input::StartWork).state;
            let paused = apply(&working, Input::TogglePause).state;

            let err = step(&config(), &paused, Input::Advance).unwrap_err();
            assert_eq!(
                err,
                InvariantViolation::NotRunning {
                    phase: Phase::Working
                }
            );
        }

        #[test]
        fn test_advance_while_idle_is_rejected() {
            let state = EngineState::new(&config());
            let err = step(&config(), &state, Input::Advance).unwrap_err();
            assert_eq!(err, InvariantViolation::NotRunning { phase: Phase::Idle });
        }

        #[test]
        fn test_advance_at_zero_is_rejected() {
            let mut state = apply(&EngineState::new(&config()), Input::StartWork).state;
            state.remaining_seconds = 0;

            let err = step(&config(), &state, Input::Advance).unwrap_err();
            assert!(matches!(err, InvariantViolation::Exhausted { .. }));
            assert!(err.to_string().contains("working"));
        }

        #[test]
        fn test_single_cycle_config_always_takes_long_rest() {
            let config = IntervalConfig::new(1, 1, 1, 1).unwrap();
            let mut state = step(&config, &EngineState::new(&config), Input::StartWork)
                .unwrap()
                .state;

            for expected_cycles in 1..=3 {
                let t = step(&config, &state, Input::Advance).unwrap();
                assert_eq!(t.state.phase, Phase::LongResting);
                assert_eq!(t.state.completed_cycles, expected_cycles);
                assert_eq!(t.state.short_rests_remaining_in_cycle, 0);
                state = step(&config, &t.state, Input::Advance).unwrap().state;
                assert_eq!(state.phase, Phase::Working);
            }
        }
    }
}
