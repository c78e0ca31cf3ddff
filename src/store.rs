use std::fmt::Debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::settings::HistorySettings;

/// The documents the aggregator touches.
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DataFile {
    #[strum(serialize = "current data")]
    Current,

    #[strum(serialize = "all data")]
    AllData,

    #[strum(serialize = "recent data")]
    Recent,
}

/// How a document is replaced on write.
#[derive(Debug, Display, EnumString, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Truncate and rewrite the target in place. A crash mid-write can leave a corrupt file.
    Overwrite,

    /// Write to a temporary file in the target's directory, then rename it over the target.
    Atomic,
}

impl Default for WriteMode {
    fn default() -> Self {
        Self::Overwrite
    }
}

pub fn make_document_store(settings: &HistorySettings) -> Box<dyn DocumentStore> {
    Box::new(FileStore::new(settings.write_mode))
}

/// Byte-level access to the JSON documents. Serialization stays with the caller so the trait
/// remains object safe.
pub trait DocumentStore: Debug {
    fn exists(&self, path: &Path) -> bool;
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;
    fn write(&self, path: &Path, contents: &[u8]) -> std::io::Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore(Arc<DashMap<PathBuf, Vec<u8>>>);

impl MemoryStore {
    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.0.insert(path.into(), contents.into());
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.0.get(path.as_ref()).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn exists(&self, path: &Path) -> bool {
        self.0.contains_key(path)
    }

    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        self.get(path).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no document at {}", path.display()),
            )
        })
    }

    #[tracing::instrument(level = "debug", skip(self, contents), fields(nr_bytes = contents.len()))]
    fn write(&self, path: &Path, contents: &[u8]) -> std::io::Result<()> {
        let old = self.0.insert(path.to_path_buf(), contents.to_vec());
        tracing::debug!(replaced=%old.is_some(), "stored document in memory.");
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FileStore {
    mode: WriteMode,
}

impl FileStore {
    pub fn new(mode: WriteMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    fn overwrite(path: &Path, contents: &[u8]) -> std::io::Result<()> {
        let f = File::create(path)?;
        let mut writer = BufWriter::new(f);
        writer.write_all(contents)?;
        writer.flush()
    }

    fn replace_atomically(path: &Path, contents: &[u8]) -> std::io::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(contents)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl DocumentStore for FileStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    #[tracing::instrument(level = "debug", skip(self, contents), fields(mode=%self.mode, nr_bytes = contents.len()))]
    fn write(&self, path: &Path, contents: &[u8]) -> std::io::Result<()> {
        match self.mode {
            WriteMode::Overwrite => Self::overwrite(path, contents),
            WriteMode::Atomic => Self::replace_atomically(path, contents),
        }
    }
}
