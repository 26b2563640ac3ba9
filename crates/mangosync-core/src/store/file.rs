use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::store::errors::StoreError;
use crate::store::types::ConfigDocument;

/// File-backed mirror of one config file.
///
/// The document is read eagerly at construction and mutated only through
/// [`ConfigStore::set`]; `dirty` records whether memory has diverged from
/// disk since the last successful write. Once a store exists, the mirror is
/// the source of truth: retargeting redirects future writes to a new path
/// without adopting that file's contents.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    document: ConfigDocument,
    dirty: bool,
}

impl ConfigStore {
    /// Open a store over `path` with an eager read.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read; there is no store without an
    /// initial document.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let mut store = Self {
            path,
            document: ConfigDocument::default(),
            dirty: false,
        };
        store.read()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Re-read the document from the current path, replacing memory.
    pub fn read(&mut self) -> Result<(), StoreError> {
        let text = fs::read_to_string(&self.path).map_err(|source| StoreError::ReadFailed {
            path: self.path.clone(),
            source,
        })?;
        self.document = ConfigDocument::parse(&text);
        Ok(())
    }

    /// Flush the document to the current path.
    ///
    /// A clean store skips the write unless `force` is set. The write goes
    /// through a temp file in the destination directory followed by a
    /// rename, so a crash mid-write cannot leave a half-written config
    /// behind. Clears `dirty` on success.
    pub fn write(&mut self, force: bool) -> Result<(), StoreError> {
        if !self.dirty && !force {
            return Ok(());
        }

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|source| StoreError::WriteFailed {
            path: self.path.clone(),
            source,
        })?;
        tmp.write_all(self.document.render().as_bytes())
            .map_err(|source| StoreError::WriteFailed {
                path: self.path.clone(),
                source,
            })?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::WriteFailed {
                path: self.path.clone(),
                source: e.error,
            })?;

        self.dirty = false;
        Ok(())
    }

    /// Set `key` in the document and mark the store dirty.
    ///
    /// Dirty is set even when the stored value did not change.
    pub fn set(&mut self, key: &str, value: Option<&str>) {
        self.dirty = true;
        self.document.set(key, value);
    }

    /// Point future writes at `path`.
    ///
    /// The document is intentionally left as-is: a path change redirects
    /// the mirror, it does not re-read the newly discovered file.
    pub fn retarget(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if path != self.path {
            debug!(
                event = "core.store.retargeted",
                old_path = %self.path.display(),
                new_path = %path.display()
            );
        }
        self.path = path;
    }
}
