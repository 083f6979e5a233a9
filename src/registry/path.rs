//! Conversion of user-supplied paths into canonical absolute addon entries.
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A registered addon path.
///
/// Identity is exact string equality of the stored path. Normalization only
/// happens when an entry is built from user input via [`normalize`]; entries
/// read back from storage are taken as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddonEntry(String);

impl AddonEntry {
    /// Wrap an already-canonical path string.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The stored path string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The stored path as a [`Path`].
    #[must_use]
    pub fn path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// Whether something currently exists at this path.
    ///
    /// Re-checked on every call; never cached.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path().exists()
    }
}

impl fmt::Display for AddonEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for AddonEntry {
    fn as_ref(&self) -> &Path {
        self.path()
    }
}

/// Make `raw` absolute against `base` and clean it lexically.
///
/// `.` components and redundant or trailing separators are dropped and `..`
/// is resolved against the preceding component. Symlinks are not followed
/// and case is preserved.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use sideload_cli::registry::normalize;
///
/// let entry = normalize(Path::new("ext/../addon/"), Path::new("/home/me"));
/// assert_eq!(entry.as_str(), "/home/me/addon");
/// ```
#[must_use]
pub fn normalize(raw: &Path, base: &Path) -> AddonEntry {
    let joined = if raw.is_absolute() {
        raw.to_path_buf()
    } else {
        base.join(raw)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Never pop past the root or a drive prefix.
                if matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                ) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }

    let simplified = dunce::simplified(&out);
    AddonEntry(simplified.to_string_lossy().into_owned())
}
