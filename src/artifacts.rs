//! Output artifact storage.
//!
//! Actions that produce files go through the narrow [`ArtifactStore`]
//! capability, so tests substitute [`MemoryArtifactStore`] for real disk
//! I/O. Artifacts are written exactly once and never mutated.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rand::Rng;

use crate::error::ProcessResult;

/// Narrow storage capability for generated output artifacts.
pub trait ArtifactStore: Send + Sync {
    /// Store `bytes` under `name`, returning the stored artifact name.
    fn put(&self, name: &str, bytes: &[u8]) -> ProcessResult<String>;
}

/// Writes artifacts into a directory on disk.
#[derive(Debug)]
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    /// Create a store rooted at `root`. The directory is created on first
    /// write.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The directory artifacts are written into.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactStore for FsArtifactStore {
    fn put(&self, name: &str, bytes: &[u8]) -> ProcessResult<String> {
        fs::create_dir_all(&self.root)?;
        let mut file = fs::File::create(self.root.join(name))?;
        file.write_all(bytes)?;
        Ok(name.to_owned())
    }
}

/// In-memory store for tests and embedding.
///
/// Keeps artifacts in insertion order so callers can assert on write order.
#[derive(Debug, Default)]
pub struct MemoryArtifactStore {
    blobs: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemoryArtifactStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bytes stored under `name`, if any.
    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        let blobs = self.blobs.lock().expect("artifact store mutex poisoned");
        blobs
            .iter()
            .find(|(stored, _)| stored == name)
            .map(|(_, bytes)| bytes.clone())
    }

    /// Stored artifact names, in write order.
    pub fn names(&self) -> Vec<String> {
        let blobs = self.blobs.lock().expect("artifact store mutex poisoned");
        blobs.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Number of stored artifacts.
    pub fn len(&self) -> usize {
        self.blobs.lock().expect("artifact store mutex poisoned").len()
    }

    /// `true` when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ArtifactStore for MemoryArtifactStore {
    fn put(&self, name: &str, bytes: &[u8]) -> ProcessResult<String> {
        let mut blobs = self.blobs.lock().expect("artifact store mutex poisoned");
        blobs.push((name.to_owned(), bytes.to_vec()));
        Ok(name.to_owned())
    }
}

/// Build an artifact name from `base` and `ext` with a random 8-hex-char
/// suffix inserted before the extension.
///
/// The suffix is a probabilistic uniqueness device for the shared output
/// namespace, not a coordination mechanism.
pub fn unique_name(base: &str, ext: &str) -> String {
    let suffix: u32 = rand::rng().random();
    format!("{base}_{suffix:08x}.{ext}")
}
