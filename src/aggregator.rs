use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{BenchHistoryError, HistoryError, SettingsError};
use crate::history::{BenchmarkRecord, History, DEFAULT_RECENT_LIMIT};
use crate::settings::Settings;
use crate::store::{make_document_store, DataFile, DocumentStore};

/// Where the three documents live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub current: PathBuf,
    pub all_data: PathBuf,
    pub recent: PathBuf,
}

impl DataPaths {
    pub fn path_for(&self, role: DataFile) -> &Path {
        match role {
            DataFile::Current => self.current.as_path(),
            DataFile::AllData => self.all_data.as_path(),
            DataFile::Recent => self.recent.as_path(),
        }
    }
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateOutcome {
    pub history_len: usize,
    pub recent_len: usize,
    pub all_data_path: PathBuf,
    pub recent_data_path: PathBuf,
}

/// Appends the latest benchmark record to the history and republishes both the full history and
/// its recent view.
///
/// Both inputs are checked and read before anything is written. The two writes are independent:
/// if the recent view fails to write, the already written history is left in place.
#[derive(Debug)]
pub struct Aggregator {
    store: Box<dyn DocumentStore>,
    paths: DataPaths,
    recent_limit: usize,
}

impl Aggregator {
    pub fn new(store: Box<dyn DocumentStore>, paths: DataPaths) -> Self {
        Self { store, paths, recent_limit: DEFAULT_RECENT_LIMIT }
    }

    /// The recent view must keep at least one record.
    pub fn with_recent_limit(self, recent_limit: usize) -> Result<Self, SettingsError> {
        if recent_limit == 0 {
            return Err(SettingsError::Bootstrap {
                message: "recent view must keep at least one record".to_string(),
                setting: format!("recent_limit = {}", recent_limit),
            });
        }

        Ok(Self { recent_limit, ..self })
    }

    /// Builds a file backed aggregator. `build_dir` is the resolved build output directory
    /// holding the current benchmark result.
    pub fn from_settings(settings: &Settings, build_dir: impl AsRef<Path>) -> Result<Self, BenchHistoryError> {
        settings.validate()?;
        let history = &settings.history;
        let paths = DataPaths {
            current: build_dir.as_ref().join(&history.current_file_name),
            all_data: history.all_data_path.clone(),
            recent: history.recent_data_path.clone(),
        };

        let aggregator = Self::new(make_document_store(history), paths).with_recent_limit(history.recent_limit)?;
        Ok(aggregator)
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    pub fn recent_limit(&self) -> usize {
        self.recent_limit
    }

    #[tracing::instrument(level = "info", skip(self))]
    pub fn run(&self) -> Result<AggregateOutcome, HistoryError> {
        self.check_exists(DataFile::Current)?;
        self.check_exists(DataFile::AllData)?;

        let record = self.load_current()?;
        let mut history = self.load_history()?;
        history.append(record);

        self.persist_history(&history)?;
        let recent_len = self.persist_recent(&history)?;

        let outcome = AggregateOutcome {
            history_len: history.len(),
            recent_len,
            all_data_path: self.paths.all_data.clone(),
            recent_data_path: self.paths.recent.clone(),
        };
        tracing::info!(?outcome, "benchmark history updated.");
        Ok(outcome)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn load_current(&self) -> Result<BenchmarkRecord, HistoryError> {
        let value = self.read_json(DataFile::Current)?;
        Ok(BenchmarkRecord::new(value))
    }

    /// The all data document must be a JSON array.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn load_history(&self) -> Result<History, HistoryError> {
        match self.read_json(DataFile::AllData)? {
            serde_json::Value::Array(records) => {
                let history: History = records.into_iter().map(BenchmarkRecord::new).collect();
                tracing::debug!(history_len=%history.len(), "loaded benchmark history.");
                Ok(history)
            },
            other => Err(HistoryError::NotAnArray {
                role: DataFile::AllData,
                path: self.paths.all_data.clone(),
                found: json_kind(&other),
            }),
        }
    }

    pub fn persist_history(&self, history: &History) -> Result<(), HistoryError> {
        self.write_json(DataFile::AllData, history)
    }

    /// Returns the number of records written.
    pub fn persist_recent(&self, history: &History) -> Result<usize, HistoryError> {
        let recent = history.recent(self.recent_limit);
        self.write_json(DataFile::Recent, &recent)?;
        Ok(recent.len())
    }

    fn check_exists(&self, role: DataFile) -> Result<(), HistoryError> {
        let path = self.paths.path_for(role);
        if self.store.exists(path) {
            Ok(())
        } else {
            tracing::error!(%role, ?path, "required file is missing.");
            Err(HistoryError::MissingFile { role, path: path.to_path_buf() })
        }
    }

    fn read_json(&self, role: DataFile) -> Result<serde_json::Value, HistoryError> {
        let path = self.paths.path_for(role);
        let bytes = self.store.read(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => HistoryError::MissingFile { role, path: path.to_path_buf() },
            _ => HistoryError::Io { role, path: path.to_path_buf(), source },
        })?;

        serde_json::from_slice(&bytes).map_err(|source| HistoryError::MalformedJson {
            role,
            path: path.to_path_buf(),
            source,
        })
    }

    #[tracing::instrument(level = "debug", skip(self, data))]
    fn write_json<T: Serialize + ?Sized>(&self, role: DataFile, data: &T) -> Result<(), HistoryError> {
        let path = self.paths.path_for(role);
        let bytes = serde_json::to_vec(data).map_err(|source| HistoryError::Serialize { role, source })?;
        self.store
            .write(path, &bytes)
            .map_err(|source| HistoryError::Io { role, path: path.to_path_buf(), source })
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
