//! Sound playback for phase cues.
//!
//! This module provides audio notification capabilities, including:
//!
//! - A start bell when work begins and a finish bell when a rest begins
//! - User-supplied sound files with a synthesized-tone fallback
//! - Non-blocking playback on a dedicated audio thread
//! - Graceful degradation when audio is unavailable
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐   try_send   ┌──────────────────┐
//! │  SoundNotifier   │─────────────▶│   audio thread   │
//! │ (engine Notifier)│  crossbeam   │                  │
//! └──────────────────┘              └────────┬─────────┘
//!                                            │
//!                                            ▼
//!                                   ┌──────────────────┐     ┌─────────────┐
//!                                   │   SoundPlayer    │────▶│ file / tone │
//!                                   └──────────────────┘     └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use pomodoro_interval::engine::{Notifier, PhaseEvent};
//! use pomodoro_interval::sound::{CueSet, SoundNotifier};
//!
//! let notifier = SoundNotifier::spawn(CueSet::default());
//! notifier.notify(PhaseEvent::WorkStarted);
//! ```

mod error;
mod notifier;
mod player;
mod source;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub use error::SoundError;
pub use notifier::SoundNotifier;
pub use player::RodioSoundPlayer;
pub use source::{finish_bell, start_bell, CueSet, SoundSource};

/// Trait for sound playback implementations.
///
/// This trait abstracts the sound playback functionality, allowing for
/// different implementations (e.g., rodio-based, mock for testing).
pub trait SoundPlayer {
    /// Plays a sound from the given source without waiting for it to end.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }
}

impl<P: SoundPlayer + ?Sized> SoundPlayer for Arc<P> {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        (**self).play(source)
    }
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<SoundSource>>,
    failing_names: Mutex<Vec<String>>,
    should_fail: AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `play` call fail with a playback error.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Makes `play` report a missing file for sources with this name.
    pub fn fail_for(&self, name: impl Into<String>) {
        if let Ok(mut names) = self.failing_names.lock() {
            names.push(name.into());
        }
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.get_play_calls().len()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SoundSource> {
        self.play_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn clear_calls(&self) {
        if let Ok(mut calls) = self.play_calls.lock() {
            calls.clear();
        }
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        let missing = self
            .failing_names
            .lock()
            .map(|names| names.iter().any(|name| name == source.name()))
            .unwrap_or(false);
        if missing {
            return Err(SoundError::FileNotFound(source.name().to_string()));
        }
        if let Ok(mut calls) = self.play_calls.lock() {
            calls.push(source.clone());
        }
        Ok(())
    }
}
