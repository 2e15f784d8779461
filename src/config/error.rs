//! Settings file error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::ConfigError;

/// Errors raised while loading and resolving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An explicitly requested settings file does not exist.
    #[error("設定ファイルが見つかりません: {}", .0.display())]
    NotFound(PathBuf),

    #[error("設定ファイルを読み込めませんでした: {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("設定ファイルの形式が正しくありません: {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The merged configuration failed validation. The message carries the
    /// reason and the settings key, so there is no source.
    #[error("{0} ({field})", field = .0.field())]
    Invalid(ConfigError),
}

impl From<ConfigError> for SettingsError {
    fn from(err: ConfigError) -> Self {
        Self::Invalid(err)
    }
}
