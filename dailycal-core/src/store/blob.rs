//! Blob stores: a single slot holding the whole serialized document.

use std::cell::{Cell, RefCell};
use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Key the document is stored under.
pub const DATA_KEY: &str = "calorie-companion-data";

#[derive(Error, Debug)]
pub enum BlobError {
    #[error("I/O error for {}: {}", .0.display(), .1)]
    IoError(PathBuf, #[source] io::Error),

    #[error("Blob store unavailable: {0}")]
    Unavailable(String),
}

/// Load/save access to one persisted document.
pub trait BlobStore {
    /// Returns `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<String>, BlobError>;

    /// Replaces the stored document.
    fn save(&self, document: &str) -> Result<(), BlobError>;
}

/// Stores the document as `<DATA_KEY>.json` inside a data directory.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    data_dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    pub fn path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", DATA_KEY))
    }

    pub fn exists(&self) -> bool {
        self.path().exists()
    }
}

impl BlobStore for FileBlobStore {
    fn load(&self) -> Result<Option<String>, BlobError> {
        let path = self.path();
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BlobError::IoError(path, e)),
        }
    }

    /// Creates the data directory if it doesn't exist.
    fn save(&self, document: &str) -> Result<(), BlobError> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| BlobError::IoError(self.data_dir.clone(), e))?;

        let path = self.path();
        fs::write(&path, document).map_err(|e| BlobError::IoError(path, e))
    }
}

/// In-process store, mainly for tests. Writes can be made to fail.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    document: RefCell<Option<String>>,
    fail_writes: Cell<bool>,
    saves: Cell<usize>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: impl Into<String>) -> Self {
        let store = Self::default();
        store.document.replace(Some(document.into()));
        store
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn document(&self) -> Option<String> {
        self.document.borrow().clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&self) -> Result<Option<String>, BlobError> {
        Ok(self.document())
    }

    fn save(&self, document: &str) -> Result<(), BlobError> {
        if self.fail_writes.get() {
            return Err(BlobError::Unavailable("writes disabled".to_string()));
        }
        self.document.replace(Some(document.to_string()));
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
