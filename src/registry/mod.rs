//! Ordered, deduplicated, crash-safe list of addon paths.
mod path;
mod store;

pub use path::{AddonEntry, normalize};
pub use store::{FileStore, MemoryStore, RegistryStore, parse_registry, serialize_registry};

use std::path::{Path, PathBuf};

use crate::error::RegistryError;

/// Result of [`AddonRegistry::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// The entry was appended and the registry persisted.
    Added(AddonEntry),
    /// An identical entry already exists; nothing was changed.
    AlreadyPresent(AddonEntry),
}

/// Result of [`AddonRegistry::remove`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The entry was removed and the registry persisted.
    Removed(AddonEntry),
    /// No such entry; nothing was changed.
    NotPresent(AddonEntry),
}

/// An entry together with its on-disk existence at the time of listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedAddon {
    /// The registered path.
    pub entry: AddonEntry,
    /// Whether something existed at the path when the list was taken.
    pub exists: bool,
}

/// The addon registry.
///
/// Holds the entries in insertion order and writes the full list back to its
/// [`RegistryStore`] after every mutation. Relative paths given to
/// [`add`](Self::add) and [`remove`](Self::remove) are resolved against the
/// registry's base directory (the working directory unless overridden with
/// [`with_base_dir`](Self::with_base_dir)).
#[derive(Debug)]
pub struct AddonRegistry<S = FileStore> {
    store: S,
    entries: Vec<AddonEntry>,
    base_dir: Option<PathBuf>,
}

impl<S: RegistryStore> AddonRegistry<S> {
    /// Open the registry, reading its current contents from `store`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Storage`] if the store exists but cannot be
    /// read. A store that was never written loads as empty.
    pub fn load(store: S) -> Result<Self, RegistryError> {
        let entries = store.load()?;
        Ok(Self {
            store,
            entries,
            base_dir: None,
        })
    }

    /// Resolve relative paths against `dir` instead of the working directory.
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Register `raw` if it is not already present.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::LineBreak`] if the path contains `\n` or
    /// `\r`, [`RegistryError::NotFound`] if nothing exists at the normalized
    /// path, or [`RegistryError::Storage`] if persisting fails. On a storage
    /// failure the in-memory list is left unchanged.
    pub fn add(&mut self, raw: &Path) -> Result<AddOutcome, RegistryError> {
        let entry = self.normalize(raw)?;
        if entry.as_str().contains(['\n', '\r']) {
            return Err(RegistryError::LineBreak {
                path: entry.to_string(),
            });
        }
        if !entry.exists() {
            return Err(RegistryError::NotFound {
                path: entry.path().to_path_buf(),
            });
        }
        if self.contains(&entry) {
            return Ok(AddOutcome::AlreadyPresent(entry));
        }

        let mut next = self.entries.clone();
        next.push(entry.clone());
        self.commit(next)?;
        Ok(AddOutcome::Added(entry))
    }

    /// Unregister `raw` if present. The path does not need to exist on disk.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Storage`] if persisting fails.
    pub fn remove(&mut self, raw: &Path) -> Result<RemoveOutcome, RegistryError> {
        let entry = self.normalize(raw)?;
        if !self.contains(&entry) {
            return Ok(RemoveOutcome::NotPresent(entry));
        }

        let next = self
            .entries
            .iter()
            .filter(|e| **e != entry)
            .cloned()
            .collect();
        self.commit(next)?;
        Ok(RemoveOutcome::Removed(entry))
    }

    /// Remove every listed entry that is present, persisting once.
    ///
    /// Entries are matched exactly (no normalization). Returns the number of
    /// entries removed; when nothing matched the store is not written.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Storage`] if persisting fails.
    pub fn remove_many(&mut self, entries: &[AddonEntry]) -> Result<usize, RegistryError> {
        let next: Vec<AddonEntry> = self
            .entries
            .iter()
            .filter(|e| !entries.contains(*e))
            .cloned()
            .collect();
        let removed = self.entries.len() - next.len();
        if removed > 0 {
            self.commit(next)?;
        }
        Ok(removed)
    }

    /// All entries in registry order with their current existence on disk.
    #[must_use]
    pub fn list(&self) -> Vec<ListedAddon> {
        self.entries
            .iter()
            .map(|entry| ListedAddon {
                entry: entry.clone(),
                exists: entry.exists(),
            })
            .collect()
    }

    /// Whether `entry` is registered (exact string match).
    #[must_use]
    pub fn contains(&self, entry: &AddonEntry) -> bool {
        self.entries.contains(entry)
    }

    /// The entries in registry order.
    #[must_use]
    pub fn entries(&self) -> &[AddonEntry] {
        &self.entries
    }

    /// Number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Human-readable location of the backing store.
    #[must_use]
    pub fn location(&self) -> String {
        self.store.location()
    }

    /// Normalize `raw` the way [`add`](Self::add) and [`remove`](Self::remove) do.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::WorkingDir`] if `raw` is relative, no base
    /// directory was configured, and the working directory is unavailable.
    pub fn normalize(&self, raw: &Path) -> Result<AddonEntry, RegistryError> {
        if raw.is_absolute() {
            return Ok(normalize(raw, Path::new("")));
        }
        let base = match &self.base_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().map_err(RegistryError::WorkingDir)?,
        };
        Ok(normalize(raw, &base))
    }

    fn commit(&mut self, next: Vec<AddonEntry>) -> Result<(), RegistryError> {
        self.store.save(&next)?;
        self.entries = next;
        Ok(())
    }
}
