use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

/// Directory-backed store for the text artifacts one run produces: the
/// initial report, one expansion file per step, and the performance summary.
/// Files written before a failed run are left in place; they document how
/// far the run got.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Open the store, creating the directory if it does not exist.
    pub fn create(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write one UTF-8 artifact, replacing any previous file of that name.
    pub fn write(&self, name: &str, content: &str) -> io::Result<PathBuf> {
        let path = self.root.join(name);
        fs::write(&path, content)?;
        debug!("wrote artifact {}", path.display());
        Ok(path)
    }
}
