//! Configuration error types.

use thiserror::Error;

/// Rejected interval configuration. The engine is never constructed from a
/// configuration that produces one of these.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("作業時間は1秒以上で指定してください")]
    WorkDuration,

    #[error("短い休憩時間は1秒以上で指定してください")]
    ShortRestDuration,

    #[error("長い休憩時間は1秒以上で指定してください")]
    LongRestDuration,

    #[error("長い休憩までのサイクル数は1以上で指定してください")]
    Cycles,
}

impl ConfigError {
    /// Returns the configuration field this error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::WorkDuration => "work_seconds",
            Self::ShortRestDuration => "short_rest_seconds",
            Self::LongRestDuration => "long_rest_seconds",
            Self::Cycles => "cycles_before_long_rest",
        }
    }
}
