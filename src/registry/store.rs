//! Registry persistence backends.
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::path::AddonEntry;
use crate::error::RegistryError;
use crate::resources::helpers::fs::write_atomic;

/// Storage backend for an [`AddonRegistry`](super::AddonRegistry).
///
/// The registry calls [`load`](Self::load) once when it is opened and
/// [`save`](Self::save) with the complete entry list after every mutation.
pub trait RegistryStore {
    /// Read the persisted entries in stored order.
    ///
    /// A store that has never been written must return an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Storage`] if the backing storage exists but
    /// cannot be read or decoded.
    fn load(&self) -> Result<Vec<AddonEntry>, RegistryError>;

    /// Replace the persisted entries with `entries`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Storage`] if the entries cannot be written.
    fn save(&self, entries: &[AddonEntry]) -> Result<(), RegistryError>;

    /// Human-readable location of the backing storage.
    fn location(&self) -> String;
}

/// Parse the plain-text registry format.
///
/// One path per line; blank lines and lines starting with `#` (after leading
/// whitespace) are skipped. Leading whitespace is not part of the path;
/// trailing whitespace is. Later duplicates of an earlier line are dropped.
#[must_use]
pub fn parse_registry(text: &str) -> Vec<AddonEntry> {
    let mut entries: Vec<AddonEntry> = Vec::new();
    for line in text.lines() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let trimmed = line.trim_start();
        if trimmed.trim_end().is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let entry = AddonEntry::new(trimmed);
        if !entries.contains(&entry) {
            entries.push(entry);
        }
    }
    entries
}

/// Serialize entries into the plain-text registry format.
#[must_use]
pub fn serialize_registry(entries: &[AddonEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(entry.as_str());
        out.push('\n');
    }
    out
}

/// Registry file on disk, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the registry file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RegistryStore for FileStore {
    fn load(&self) -> Result<Vec<AddonEntry>, RegistryError> {
        if !self.path.exists() {
            self.save(&[])?;
            return Ok(Vec::new());
        }

        let bytes = std::fs::read(&self.path)
            .map_err(|e| RegistryError::storage(&self.path, "reading registry", e))?;
        let text = String::from_utf8(bytes).map_err(|e| {
            RegistryError::storage(
                &self.path,
                "decoding registry",
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })?;
        Ok(parse_registry(&text))
    }

    fn save(&self, entries: &[AddonEntry]) -> Result<(), RegistryError> {
        write_atomic(&self.path, serialize_registry(entries).as_bytes())
            .map_err(|(message, e)| RegistryError::storage(&self.path, message, e))
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory store, used when the registry must not touch the filesystem.
///
/// Clones share the same contents, so a test can keep one handle and hand
/// another to the registry.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<Vec<AddonEntry>>>,
    saves: Arc<AtomicUsize>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `paths`.
    #[must_use]
    pub fn with_entries<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = paths.into_iter().map(AddonEntry::new).collect();
        Self {
            entries: Arc::new(Mutex::new(entries)),
            saves: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Snapshot of the currently stored entries.
    #[must_use]
    pub fn entries(&self) -> Vec<AddonEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of times [`RegistryStore::save`] has been called.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl RegistryStore for MemoryStore {
    fn load(&self) -> Result<Vec<AddonEntry>, RegistryError> {
        Ok(self.entries())
    }

    fn save(&self, entries: &[AddonEntry]) -> Result<(), RegistryError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.entries.lock().unwrap_or_else(PoisonError::into_inner) = entries.to_vec();
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
