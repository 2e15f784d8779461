//! Notifier seam for phase cues.

use std::sync::Mutex;

use serde::Serialize;

/// Cue emitted whenever a phase is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PhaseEvent {
    /// A work interval started
    WorkStarted,
    /// A rest started
    RestStarted {
        /// Whether this is the long rest that closes a cycle
        is_long: bool,
    },
}

/// Receives phase cues from the engine.
///
/// Implementations must return promptly and must not surface failures; the
/// engine treats every call as fire-and-forget.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: PhaseEvent);
}

/// Notifier that drops every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: PhaseEvent) {}
}

/// Notifier that records cues in order, for tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<PhaseEvent>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every cue received so far.
    #[must_use]
    pub fn events(&self) -> Vec<PhaseEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Returns only the long/short flag of each rest cue.
    #[must_use]
    pub fn rest_kinds(&self) -> Vec<bool> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                PhaseEvent::RestStarted { is_long } => Some(is_long),
                PhaseEvent::WorkStarted => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: PhaseEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
