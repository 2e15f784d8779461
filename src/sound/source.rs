//! Sound sources for phase cues.
//!
//! A cue is either a user-supplied audio file or a synthesized tone. The
//! tones double as the fallback when a file cannot be played.

use std::path::{Path, PathBuf};

use crate::engine::PhaseEvent;

use super::error::SoundError;

/// Supported audio file extensions.
const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "mp3", "ogg", "flac"];

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// An audio file on disk.
    File {
        /// Display name (the file stem).
        name: String,
        /// The full path to the sound file.
        path: PathBuf,
    },
    /// A sine tone generated at playback time.
    Tone {
        /// Display name (e.g., "start_bell").
        name: String,
        /// Pitch in hertz.
        frequency_hz: u32,
        /// Length in milliseconds.
        duration_ms: u64,
    },
}

impl SoundSource {
    /// Creates a file source without checking the path.
    #[must_use]
    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::File {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Creates a file source after checking that the file exists and has a
    /// supported extension.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::FileNotFound` or `SoundError::UnsupportedFormat`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SoundError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SoundError::FileNotFound(path.display().to_string()));
        }

        let supported = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()));
        if !supported {
            return Err(SoundError::UnsupportedFormat(path.display().to_string()));
        }

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::file(name, path))
    }

    /// Creates a tone source.
    #[must_use]
    pub fn tone(name: impl Into<String>, frequency_hz: u32, duration_ms: u64) -> Self {
        Self::Tone {
            name: name.into(),
            frequency_hz,
            duration_ms,
        }
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Tone { name, .. } => name,
        }
    }

    /// Returns true if this source is a file.
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Returns true if this source is a synthesized tone.
    #[must_use]
    pub fn is_tone(&self) -> bool {
        matches!(self, Self::Tone { .. })
    }

    /// Returns the file path if this is a file source.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path, .. } => Some(path),
            Self::Tone { .. } => None,
        }
    }
}

/// Bell played when a work interval starts.
#[must_use]
pub fn start_bell() -> SoundSource {
    SoundSource::tone("start_bell", 880, 300)
}

/// Bell played when a rest starts.
#[must_use]
pub fn finish_bell() -> SoundSource {
    SoundSource::tone("finish_bell", 523, 600)
}

// ============================================================================
// CueSet
// ============================================================================

/// Which sound to play for each phase cue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueSet {
    pub work_started: SoundSource,
    pub rest_started: SoundSource,
}

impl Default for CueSet {
    fn default() -> Self {
        Self {
            work_started: start_bell(),
            rest_started: finish_bell(),
        }
    }
}

impl CueSet {
    /// Returns the sound for an event.
    #[must_use]
    pub fn for_event(&self, event: PhaseEvent) -> &SoundSource {
        match event {
            PhaseEvent::WorkStarted => &self.work_started,
            PhaseEvent::RestStarted { .. } => &self.rest_started,
        }
    }

    /// Returns the built-in tone for an event, used when a file fails.
    #[must_use]
    pub fn fallback_for(event: PhaseEvent) -> SoundSource {
        match event {
            PhaseEvent::WorkStarted => start_bell(),
            PhaseEvent::RestStarted { .. } => finish_bell(),
        }
    }
}
