use std::path::{Path, PathBuf};

use bench_history::DataPaths;
use serde_json::Value;
use tempfile::TempDir;

/// A scratch project laid out the way the CI job sees it: a build directory holding
/// `bench.json` and a `gh-pages` checkout holding the published data.
pub struct Workspace {
    pub dir: TempDir,
    pub paths: DataPaths,
}

impl Workspace {
    pub fn new() -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let build_dir = dir.path().join("target").join("release");
        let pages_dir = dir.path().join("gh-pages");
        std::fs::create_dir_all(&build_dir)?;
        std::fs::create_dir_all(&pages_dir)?;

        let paths = DataPaths {
            current: build_dir.join("bench.json"),
            all_data: pages_dir.join("data.json"),
            recent: pages_dir.join("recent.json"),
        };

        Ok(Self { dir, paths })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn build_dir(&self) -> PathBuf {
        self.root().join("target").join("release")
    }

    pub fn write_current(&self, contents: impl AsRef<[u8]>) -> anyhow::Result<()> {
        std::fs::write(&self.paths.current, contents)?;
        Ok(())
    }

    pub fn write_all_data(&self, contents: impl AsRef<[u8]>) -> anyhow::Result<()> {
        std::fs::write(&self.paths.all_data, contents)?;
        Ok(())
    }

    pub fn read_json(&self, path: &Path) -> anyhow::Result<Value> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
