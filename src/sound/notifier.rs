//! Notifier that plays a sound for each phase cue.
//!
//! Cues are handed to a dedicated audio thread over a bounded channel, so
//! `notify` never blocks the timer loop. If the queue is full or the audio
//! thread has gone away, the cue is dropped.

use std::thread::JoinHandle;

use crossbeam_channel::{bounded, Sender, TrySendError};
use tracing::{debug, warn};

use crate::engine::{Notifier, PhaseEvent};

use super::error::SoundError;
use super::player::RodioSoundPlayer;
use super::source::CueSet;
use super::SoundPlayer;

/// Cues waiting for the audio thread beyond this are dropped.
const CUE_QUEUE_CAPACITY: usize = 8;

/// Plays phase cues on a background thread.
pub struct SoundNotifier {
    tx: Option<Sender<PhaseEvent>>,
    worker: Option<JoinHandle<()>>,
}

impl SoundNotifier {
    /// Starts an audio thread backed by rodio.
    #[must_use]
    pub fn spawn(cues: CueSet) -> Self {
        Self::spawn_with(cues, RodioSoundPlayer::new)
    }

    /// Starts an audio thread whose player is built by `make_player` on that
    /// thread.
    #[must_use]
    pub fn spawn_with<P, F>(cues: CueSet, make_player: F) -> Self
    where
        P: SoundPlayer + 'static,
        F: FnOnce() -> Result<P, SoundError> + Send + 'static,
    {
        let (tx, rx) = bounded::<PhaseEvent>(CUE_QUEUE_CAPACITY);

        let spawned = std::thread::Builder::new()
            .name("pomodoro-audio".to_string())
            .spawn(move || {
                let player = match make_player() {
                    Ok(player) => player,
                    Err(e) => {
                        warn!("Audio not available, sound disabled: {} ({})", e, e.suggestion());
                        return;
                    }
                };

                for event in rx.iter() {
                    play_cue(&player, &cues, event);
                }
                debug!("Audio thread finished");
            });

        match spawned {
            Ok(worker) => Self {
                tx: Some(tx),
                worker: Some(worker),
            },
            Err(e) => {
                warn!("Failed to start audio thread: {}", e);
                Self {
                    tx: None,
                    worker: None,
                }
            }
        }
    }
}

fn play_cue<P: SoundPlayer>(player: &P, cues: &CueSet, event: PhaseEvent) {
    let source = cues.for_event(event);
    let Err(e) = player.play(source) else {
        return;
    };

    if e.should_fallback_to_tone() && !source.is_tone() {
        warn!(
            "Failed to play '{}': {}, falling back to built-in tone",
            source.name(),
            e
        );
        if let Err(e) = player.play(&CueSet::fallback_for(event)) {
            warn!("Fallback tone failed: {}", e);
        }
    } else {
        warn!("Failed to play '{}': {}", source.name(), e);
    }
}

impl Notifier for SoundNotifier {
    fn notify(&self, event: PhaseEvent) {
        let Some(tx) = &self.tx else {
            return;
        };
        match tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => debug!(?event, "Cue queue full, dropping"),
            Err(TrySendError::Disconnected(event)) => {
                debug!(?event, "Audio thread gone, dropping cue")
            }
        }
    }
}

impl Drop for SoundNotifier {
    fn drop(&mut self) {
        // Closing the channel ends the audio thread's loop.
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl std::fmt::Debug for SoundNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundNotifier")
            .field("active", &self.tx.is_some())
            .finish()
    }
}
