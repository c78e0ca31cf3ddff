use std::path::PathBuf;

use thiserror::Error;

use crate::store::DataFile;

#[derive(Debug, Error)]
pub enum BenchHistoryError {
    #[error("{0}")]
    HistoryError(#[from] HistoryError),

    #[error("{0}")]
    SettingsError(#[from] SettingsError),
}

/// Set of errors occurring while aggregating benchmark history. Every variant is fatal to the
/// run; nothing is retried.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// A required input document does not exist. Raised before any document is read or written.
    #[error("required {role} file not found: {path:?}")]
    MissingFile { role: DataFile, path: PathBuf },

    /// An input document is not valid JSON.
    #[error("failed to parse {role} JSON at {path:?}: {source}")]
    MalformedJson {
        role: DataFile,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The all data document parsed, but it is not a JSON array of records.
    #[error("{role} file at {path:?} does not hold a JSON array (found {found})")]
    NotAnArray {
        role: DataFile,
        path: PathBuf,
        found: &'static str,
    },

    #[error("failed to serialize {role} JSON: {source}")]
    Serialize {
        role: DataFile,
        #[source]
        source: serde_json::Error,
    },

    /// IO failure reading or writing a document. A failed write is not rolled back, so the all
    /// data and recent data files may disagree afterwards.
    #[error("IO failure on {role} file {path:?}: {source}")]
    Io {
        role: DataFile,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HistoryError {
    /// The document the error concerns.
    pub fn role(&self) -> DataFile {
        match self {
            Self::MissingFile { role, .. } => *role,
            Self::MalformedJson { role, .. } => *role,
            Self::NotAnArray { role, .. } => *role,
            Self::Serialize { role, .. } => *role,
            Self::Io { role, .. } => *role,
        }
    }
}

/// Error variants related to configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    /// Error in configuration settings.
    #[error(transparent)]
    Configuration(#[from] config::ConfigError),

    /// Error in bootstrapping execution from configuration.
    #[error("error during system bootstrap: {message}: {setting}")]
    Bootstrap { message: String, setting: String },

    #[error("{0}")]
    IOError(#[from] std::io::Error),
}
