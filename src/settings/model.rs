use std::path::PathBuf;

use path_absolutize::Absolutize;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::SettingsError;
use crate::history::DEFAULT_RECENT_LIMIT;
use crate::store::WriteMode;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub build: BuildSettings,
    pub history: HistorySettings,
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.history.validate()
    }
}

/// Locates the directory the benchmark step writes its results into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Project root that holds the `target` directory.
    pub root: PathBuf,

    /// Explicit build output directory. Takes precedence over `root` and `mode`.
    pub path: Option<PathBuf>,

    pub mode: BuildMode,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            path: None,
            mode: BuildMode::default(),
        }
    }
}

impl BuildSettings {
    /// Absolute build output directory: `path` when set, otherwise `<root>/target/<mode>`.
    pub fn resolve_build_dir(&self) -> Result<PathBuf, SettingsError> {
        let dir = match &self.path {
            Some(path) => path.clone(),
            None => self.root.join("target").join(self.mode.to_string()),
        };

        let dir = dir.absolutize()?.into_owned();
        tracing::debug!(build_dir=?dir, settings=?self, "resolved build directory.");
        Ok(dir)
    }
}

#[derive(Debug, Display, EnumString, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum BuildMode {
    Debug,
    Release,
}

impl Default for BuildMode {
    fn default() -> Self {
        Self::Debug
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Name of the benchmark result file inside the build directory.
    pub current_file_name: String,
    pub all_data_path: PathBuf,
    pub recent_data_path: PathBuf,
    pub recent_limit: usize,
    pub write_mode: WriteMode,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            current_file_name: "bench.json".to_string(),
            all_data_path: PathBuf::from("gh-pages/data.json"),
            recent_data_path: PathBuf::from("gh-pages/recent.json"),
            recent_limit: DEFAULT_RECENT_LIMIT,
            write_mode: WriteMode::default(),
        }
    }
}

impl HistorySettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.recent_limit == 0 {
            return Err(SettingsError::Bootstrap {
                message: "recent view must keep at least one record".to_string(),
                setting: format!("history.recent_limit = {}", self.recent_limit),
            });
        }

        if self.current_file_name.trim().is_empty() {
            return Err(SettingsError::Bootstrap {
                message: "benchmark result file name is empty".to_string(),
                setting: "history.current_file_name".to_string(),
            });
        }

        Ok(())
    }
}
