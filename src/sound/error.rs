//! Sound system error types.
//!
//! None of these ever reach the engine: the sound notifier logs them and
//! keeps going.

use thiserror::Error;

/// Errors that can occur while playing a phase cue.
#[derive(Debug, Error)]
pub enum SoundError {
    /// Audio device is not available (e.g., no speakers connected).
    #[error("オーディオデバイスが利用できません: {0}")]
    DeviceNotAvailable(String),

    /// Sound file was not found at the specified path.
    #[error("サウンドファイルが見つかりません: {0}")]
    FileNotFound(String),

    /// File extension is not one rodio can decode.
    #[error("対応していないサウンド形式です: {0}")]
    UnsupportedFormat(String),

    /// Failed to decode the audio file.
    #[error("サウンドファイルのデコードに失敗しました: {0}")]
    DecodeError(String),

    /// Failed to create the audio output stream.
    #[error("オーディオストリームの作成に失敗しました: {0}")]
    StreamError(String),

    /// Generic sound playback error.
    #[error("サウンド再生エラー: {0}")]
    PlaybackError(String),
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }

    /// Returns true if playback should fall back to the built-in tone.
    #[must_use]
    pub fn should_fallback_to_tone(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound(_) | Self::UnsupportedFormat(_) | Self::DecodeError(_)
        )
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::DeviceNotAvailable(_) => "オーディオデバイスを接続してください",
            Self::FileNotFound(_) => "内蔵のトーンで再生します",
            Self::UnsupportedFormat(_) => "wav / mp3 / ogg / flac のいずれかを指定してください",
            Self::DecodeError(_) => "サウンドファイルが破損している可能性があります",
            Self::StreamError(_) => "オーディオ設定を確認してください",
            Self::PlaybackError(_) => "--no-sound でサウンドを無効にできます",
        }
    }
}
