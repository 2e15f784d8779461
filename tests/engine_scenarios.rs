//! Scenario tests for the interval engine and the session that drives it.
//!
//! The engine is exercised through its public commands only, the same way a
//! presenter would. Session tests swap in a hand-cranked ticker so every
//! second is delivered explicitly.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use pomodoro_interval::engine::{
    IntervalEngine, PhaseEvent, RecordingNotifier, TickCallback, TickHandle, Ticker,
};
use pomodoro_interval::session::{Session, SessionHandle};
use pomodoro_interval::types::{ConfigError, IntervalConfig, Phase, Snapshot};

// ============================================================================
// Test Helpers
// ============================================================================

fn create_engine(config: IntervalConfig) -> (IntervalEngine, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let engine = IntervalEngine::new(config, notifier.clone()).unwrap();
    (engine, notifier)
}

fn advance_times(engine: &mut IntervalEngine, times: u32) {
    for _ in 0..times {
        engine.advance();
    }
}

/// A small grid of valid configurations, including the degenerate
/// one-interval cycle.
fn sample_configs() -> Vec<IntervalConfig> {
    let mut configs = Vec::new();
    for work in [1, 2, 7] {
        for short in [1, 3] {
            for long in [1, 4] {
                for cycles in [1, 2, 4] {
                    configs.push(IntervalConfig::new(work, short, long, cycles).unwrap());
                }
            }
        }
    }
    configs.push(IntervalConfig::default());
    configs
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_invalid_configurations_are_rejected() {
    let cases = [
        (IntervalConfig::default().with_work_seconds(0), ConfigError::WorkDuration),
        (
            IntervalConfig::default().with_short_rest_seconds(0),
            ConfigError::ShortRestDuration,
        ),
        (
            IntervalConfig::default().with_long_rest_seconds(0),
            ConfigError::LongRestDuration,
        ),
        (
            IntervalConfig::default().with_cycles_before_long_rest(0),
            ConfigError::Cycles,
        ),
    ];

    for (config, expected) in cases {
        let result = IntervalEngine::new(config, Arc::new(RecordingNotifier::new()));
        assert_eq!(result.unwrap_err(), expected);
    }
}

#[test]
fn test_new_engine_is_idle() {
    let (engine, notifier) = create_engine(IntervalConfig::default());
    let state = engine.state();

    assert_eq!(state.phase, Phase::Idle);
    assert!(!state.running);
    assert_eq!(state.remaining_seconds, 1500);
    assert_eq!(state.short_rests_remaining_in_cycle, 3);
    assert_eq!(state.completed_cycles, 0);
    assert_eq!(state.completed_work_intervals, 0);
    assert_eq!(state.total_seconds_worked, 0);
    assert!(notifier.events().is_empty());
}

// ============================================================================
// Transition properties
// ============================================================================

#[test]
fn test_work_interval_ends_in_exactly_one_rest() {
    for config in sample_configs() {
        let (mut engine, notifier) = create_engine(config);
        engine.start_work();
        notifier.clear();

        advance_times(&mut engine, config.work_seconds);

        let events = notifier.events();
        assert_eq!(events.len(), 1, "config {:?}", config);
        let is_long = match events[0] {
            PhaseEvent::RestStarted { is_long } => is_long,
            other => panic!("unexpected event {:?} for {:?}", other, config),
        };

        let expected_phase = if is_long {
            Phase::LongResting
        } else {
            Phase::ShortResting
        };
        assert_eq!(engine.phase(), expected_phase);
        assert_eq!(engine.state().remaining_seconds, config.rest_seconds(is_long));
        assert_eq!(is_long, config.cycles_before_long_rest == 1);
    }
}

#[test]
fn test_long_rest_once_per_cycle() {
    let (mut engine, notifier) = create_engine(IntervalConfig::new(3, 2, 5, 4).unwrap());
    engine.start_work();

    for _ in 0..4 {
        advance_times(&mut engine, 3);
        let rest = engine.state().remaining_seconds;
        advance_times(&mut engine, rest);
    }

    assert_eq!(notifier.rest_kinds(), vec![false, false, false, true]);
    assert_eq!(engine.phase(), Phase::Working);
}

#[test]
fn test_completed_cycles_counts_long_rest_entries() {
    for config in sample_configs() {
        let (mut engine, notifier) = create_engine(config);
        engine.start_work();

        let mut previous = engine.state().completed_cycles;
        for _ in 0..(config.cycles_before_long_rest * 3) {
            advance_times(&mut engine, config.work_seconds);
            let entered_long = engine.phase() == Phase::LongResting;
            let cycles = engine.state().completed_cycles;
            assert_eq!(cycles, previous + u32::from(entered_long));
            previous = cycles;

            let rest = engine.state().remaining_seconds;
            advance_times(&mut engine, rest);
            assert_eq!(engine.state().completed_cycles, previous);
        }

        let long_rests = notifier.rest_kinds().iter().filter(|&&long| long).count();
        assert_eq!(long_rests, 3);
        assert_eq!(engine.state().completed_cycles, 3);
    }
}

#[test]
fn test_seconds_worked_only_counts_working_ticks() {
    let config = IntervalConfig::new(4, 3, 6, 2).unwrap();
    let (mut engine, _notifier) = create_engine(config);
    engine.start_work();

    let mut working_ticks = 0u64;
    for _ in 0..40 {
        let before = *engine.state();
        engine.advance();
        let after = engine.state();

        if before.phase == Phase::Working {
            working_ticks += 1;
            assert_eq!(after.total_seconds_worked, before.total_seconds_worked + 1);
        } else {
            assert_eq!(after.total_seconds_worked, before.total_seconds_worked);
        }
        assert!(after.completed_work_intervals >= before.completed_work_intervals);
    }
    assert_eq!(engine.state().total_seconds_worked, working_ticks);
}

#[test]
fn test_short_rest_counter_stays_in_range() {
    for config in sample_configs() {
        let (mut engine, _notifier) = create_engine(config);
        engine.start_work();

        for _ in 0..200 {
            engine.advance();
            let remaining = engine.state().short_rests_remaining_in_cycle;
            assert!(remaining <= config.short_rests_per_cycle(), "{:?}", config);
        }
    }
}

#[test]
fn test_start_work_twice_matches_single_call() {
    let config = IntervalConfig::default();
    let (mut once, _) = create_engine(config);
    let (mut twice, _) = create_engine(config);

    once.start_work();
    twice.start_work();
    twice.start_work();
    assert_eq!(once.state(), twice.state());

    advance_times(&mut once, 10);
    advance_times(&mut twice, 10);
    once.start_work();
    twice.start_work();
    twice.start_work();
    assert_eq!(once.state(), twice.state());
    assert_eq!(twice.state().remaining_seconds, 1500);
}

#[test]
fn test_paused_engine_ignores_advances() {
    let (mut engine, notifier) = create_engine(IntervalConfig::new(5, 2, 3, 2).unwrap());
    engine.start_work();
    advance_times(&mut engine, 2);
    engine.toggle_pause();

    let paused = *engine.state();
    let events_before = notifier.events().len();
    advance_times(&mut engine, 10);

    assert_eq!(*engine.state(), paused);
    assert_eq!(notifier.events().len(), events_before);

    engine.toggle_pause();
    engine.advance();
    assert_eq!(engine.state().remaining_seconds, paused.remaining_seconds - 1);
}

#[test]
fn test_toggle_pause_while_idle_does_nothing() {
    let (mut engine, _notifier) = create_engine(IntervalConfig::default());
    let before = *engine.state();
    engine.toggle_pause();
    assert_eq!(*engine.state(), before);
    assert!(!engine.is_running());
}

#[test]
fn test_start_rest_from_idle_uses_matching_duration() {
    let config = IntervalConfig::new(10, 4, 8, 3).unwrap();

    let (mut engine, notifier) = create_engine(config);
    engine.start_rest(false);
    assert_eq!(engine.phase(), Phase::ShortResting);
    assert_eq!(engine.state().remaining_seconds, 4);

    engine.start_rest(true);
    assert_eq!(engine.phase(), Phase::LongResting);
    assert_eq!(engine.state().remaining_seconds, 8);
    assert_eq!(notifier.rest_kinds(), vec![false, true]);
    assert_eq!(engine.state().completed_cycles, 0);
}

// ============================================================================
// Full cycle scenario
// ============================================================================

#[test]
fn test_default_configuration_full_cycle() {
    let (mut engine, notifier) = create_engine(IntervalConfig::default());
    engine.start_work();

    for _ in 0..3 {
        advance_times(&mut engine, 1500);
        assert_eq!(engine.phase(), Phase::ShortResting);
        advance_times(&mut engine, 300);
        assert_eq!(engine.phase(), Phase::Working);
    }
    advance_times(&mut engine, 1500);
    assert_eq!(engine.phase(), Phase::LongResting);
    assert_eq!(engine.state().remaining_seconds, 900);
    advance_times(&mut engine, 900);

    let state = engine.state();
    assert_eq!(state.phase, Phase::Working);
    assert_eq!(state.completed_work_intervals, 4);
    assert_eq!(state.completed_cycles, 1);
    assert_eq!(state.total_seconds_worked, 6000);
    assert_eq!(state.short_rests_remaining_in_cycle, 3);
    assert_eq!(notifier.rest_kinds(), vec![false, false, false, true]);
}

// ============================================================================
// Session with a hand-cranked ticker
// ============================================================================

type Slot = Arc<Mutex<Option<TickCallback>>>;

/// Ticker whose callback only fires when the test calls [`ManualTicker::fire`].
#[derive(Clone, Default)]
struct ManualTicker {
    slot: Slot,
    schedules: Arc<Mutex<u32>>,
}

impl ManualTicker {
    /// Fires the active callback, returning false if nothing is scheduled.
    fn fire(&self) -> bool {
        match self.slot.lock().unwrap().as_mut() {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    fn is_scheduled(&self) -> bool {
        self.slot.lock().unwrap().is_some()
    }

    fn schedule_count(&self) -> u32 {
        *self.schedules.lock().unwrap()
    }
}

impl Ticker for ManualTicker {
    fn schedule(&mut self, period: Duration, callback: TickCallback) -> TickHandle {
        assert_eq!(period, Duration::from_secs(1));
        *self.slot.lock().unwrap() = Some(callback);
        *self.schedules.lock().unwrap() += 1;

        let slot = self.slot.clone();
        TickHandle::new(move || {
            slot.lock().unwrap().take();
        })
    }
}

async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

fn spawn_session(
    config: IntervalConfig,
) -> (
    SessionHandle,
    ManualTicker,
    Arc<RecordingNotifier>,
    tokio::task::JoinHandle<Snapshot>,
) {
    let (engine, notifier) = create_engine(config);
    let ticker = ManualTicker::default();
    let (session, handle) = Session::new(engine, ticker.clone());
    let task = tokio::spawn(session.run());
    (handle, ticker, notifier, task)
}

#[tokio::test]
async fn test_session_schedules_only_while_running() {
    let (handle, ticker, _notifier, task) = spawn_session(IntervalConfig::default());
    settle().await;
    assert!(!ticker.is_scheduled());

    handle.start_work().unwrap();
    settle().await;
    assert!(ticker.is_scheduled());

    handle.toggle_pause().unwrap();
    settle().await;
    assert!(!ticker.is_scheduled());

    handle.toggle_pause().unwrap();
    settle().await;
    assert!(ticker.is_scheduled());
    assert_eq!(ticker.schedule_count(), 2);

    handle.shutdown().unwrap();
    task.await.unwrap();
    assert!(!ticker.is_scheduled());
}

#[tokio::test]
async fn test_session_applies_ticks_in_order() {
    let (handle, ticker, notifier, task) =
        spawn_session(IntervalConfig::new(2, 1, 2, 2).unwrap());

    handle.start_work().unwrap();
    settle().await;

    for _ in 0..3 {
        assert!(ticker.fire());
        settle().await;
    }

    let snapshot = handle.snapshot();
    assert_eq!(snapshot.phase, Phase::Working);
    assert_eq!(snapshot.completed_work_intervals, 1);
    assert_eq!(
        notifier.events(),
        vec![
            PhaseEvent::WorkStarted,
            PhaseEvent::RestStarted { is_long: false },
            PhaseEvent::WorkStarted,
        ]
    );

    handle.shutdown().unwrap();
    let last = task.await.unwrap();
    assert_eq!(last.total_seconds_worked, 2);
}

#[tokio::test]
async fn test_session_drops_tick_from_cancelled_schedule() {
    let (handle, ticker, _notifier, task) = spawn_session(IntervalConfig::default());

    handle.start_work().unwrap();
    settle().await;

    // Keep the first schedule's callback alive past its cancellation.
    let stale = ticker.slot.lock().unwrap().take();
    handle.toggle_pause().unwrap();
    handle.toggle_pause().unwrap();
    settle().await;

    let before = handle.snapshot();
    if let Some(mut callback) = stale {
        callback();
    }
    settle().await;
    assert_eq!(handle.snapshot(), before);

    assert!(ticker.fire());
    settle().await;
    assert_eq!(handle.snapshot().remaining_seconds, before.remaining_seconds - 1);

    handle.shutdown().unwrap();
    task.await.unwrap();
}
