//! Sound player implementation using rodio.
//!
//! This module provides the `RodioSoundPlayer` which uses the rodio v0.20
//! audio library for cross-platform sound playback.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::debug;

use super::error::SoundError;
use super::source::SoundSource;

/// Volume applied to synthesized tones.
const TONE_AMPLITUDE: f32 = 0.25;

/// A sound player that uses rodio for audio playback.
///
/// The output stream is not `Send` on every platform, so the player is
/// created and used on the audio thread that owns it. Playback is
/// non-blocking; sounds continue playing in the background.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
}

impl RodioSoundPlayer {
    /// Opens the default output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new() -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Plays a sound from the given source without waiting for it to end.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The sound file cannot be opened
    /// - The audio format cannot be decoded
    /// - A sink cannot be attached to the output stream
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        match source {
            SoundSource::File { path, name } => {
                debug!("Playing sound file: {}", name);
                self.play_file(path)
            }
            SoundSource::Tone {
                name,
                frequency_hz,
                duration_ms,
            } => {
                debug!("Playing tone: {}", name);
                self.play_tone(*frequency_hz, *duration_ms)
            }
        }
    }

    /// Plays a sound file from the filesystem.
    fn play_file(&self, path: &Path) -> Result<(), SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| SoundError::DecodeError(e.to_string()))?;

        let sink = self.new_sink()?;
        sink.append(decoder);
        sink.detach();
        debug!("Sound playback started (detached)");
        Ok(())
    }

    /// Plays a sine tone.
    fn play_tone(&self, frequency_hz: u32, duration_ms: u64) -> Result<(), SoundError> {
        let tone = SineWave::new(frequency_hz as f32)
            .take_duration(Duration::from_millis(duration_ms))
            .amplify(TONE_AMPLITUDE);

        let sink = self.new_sink()?;
        sink.append(tone);
        sink.detach();
        debug!("Tone playback started (detached)");
        Ok(())
    }

    fn new_sink(&self) -> Result<Sink, SoundError> {
        Sink::try_new(&self.stream_handle).map_err(|e| SoundError::StreamError(e.to_string()))
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer").finish_non_exhaustive()
    }
}
