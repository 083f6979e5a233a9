//! Host application discovery.
//!
//! The host is a Firefox-family browser. Discovery yields its install root,
//! the directory the browser reads `config.js` and `defaults/pref/` from,
//! plus the executable used by `start`.
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::HostError;
use crate::platform::Platform;

/// Known Firefox-family browsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Mozilla Firefox.
    Firefox,
    /// Zen Browser.
    Zen,
    /// LibreWolf.
    LibreWolf,
    /// Waterfox.
    Waterfox,
    /// Floorp.
    Floorp,
}

impl Variant {
    /// Every variant, in probe order.
    pub const ALL: [Self; 5] = [
        Self::Firefox,
        Self::Zen,
        Self::LibreWolf,
        Self::Waterfox,
        Self::Floorp,
    ];

    /// Executable file stem of this browser.
    #[must_use]
    pub const fn executable_stem(self) -> &'static str {
        match self {
            Self::Firefox => "firefox",
            Self::Zen => "zen",
            Self::LibreWolf => "librewolf",
            Self::Waterfox => "waterfox",
            Self::Floorp => "floorp",
        }
    }

    /// Identify the browser from an executable path by its file stem.
    #[must_use]
    pub fn from_executable(path: &Path) -> Option<Self> {
        let stem = path.file_stem()?.to_str()?.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|v| v.executable_stem() == stem)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Firefox => "Firefox",
            Self::Zen => "Zen",
            Self::LibreWolf => "LibreWolf",
            Self::Waterfox => "Waterfox",
            Self::Floorp => "Floorp",
        };
        f.write_str(name)
    }
}

/// A located host installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInstall {
    /// Install root that receives the artifact and companion files.
    pub root: PathBuf,
    /// Browser executable, when one was found.
    pub executable: Option<PathBuf>,
    /// Which browser this is, when it could be identified.
    pub variant: Option<Variant>,
}

impl HostInstall {
    /// The executable, or [`HostError::MissingExecutable`] when none is known.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery found a root but no executable.
    pub fn require_executable(&self) -> Result<&Path, HostError> {
        self.executable
            .as_deref()
            .ok_or_else(|| HostError::MissingExecutable {
                root: self.root.clone(),
            })
    }
}

/// Resolves the host installation.
#[cfg_attr(test, mockall::automock)]
pub trait HostLocator {
    /// Find the host install.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::NotFound`] when no installation is found.
    fn locate(&self) -> Result<HostInstall, HostError>;
}

/// Locates the host by explicit configuration or by probing.
///
/// Resolution order:
/// 1. an explicit install root (used as-is when it is a directory),
/// 2. an explicit executable (its directory becomes the root),
/// 3. well-known install roots containing a browser executable,
/// 4. browser executables on `PATH` whose directory looks like an install
///    root (holds `omni.ja` or `application.ini`).
#[derive(Debug, Clone)]
pub struct ProbeLocator {
    platform: Platform,
    root: Option<PathBuf>,
    executable: Option<PathBuf>,
    candidates: Vec<PathBuf>,
    search_path: bool,
}

impl ProbeLocator {
    /// Probe the platform's well-known locations and `PATH`.
    #[must_use]
    pub fn new(platform: Platform) -> Self {
        Self {
            candidates: platform.candidate_roots(),
            platform,
            root: None,
            executable: None,
            search_path: true,
        }
    }

    /// Use an explicit install root instead of probing.
    #[must_use]
    pub fn with_root(mut self, root: Option<PathBuf>) -> Self {
        self.root = root;
        self
    }

    /// Use an explicit executable.
    #[must_use]
    pub fn with_executable(mut self, executable: Option<PathBuf>) -> Self {
        self.executable = executable;
        self
    }

    /// Replace the well-known install roots.
    #[must_use]
    pub fn with_candidates(mut self, candidates: Vec<PathBuf>) -> Self {
        self.candidates = candidates;
        self
    }

    /// Skip the `PATH` lookup.
    #[must_use]
    pub const fn without_path_search(mut self) -> Self {
        self.search_path = false;
        self
    }

    /// First browser executable found for `root`.
    fn find_executable(&self, root: &Path) -> Option<(PathBuf, Variant)> {
        let dir = self.platform.executable_dir(root);
        Variant::ALL.into_iter().find_map(|variant| {
            let candidate = dir.join(self.platform.executable_name(variant.executable_stem()));
            candidate.is_file().then_some((candidate, variant))
        })
    }

    fn explicit(&self, root: &Path) -> Result<HostInstall, HostError> {
        if !root.is_dir() {
            return Err(HostError::NotFound {
                searched: vec![root.to_path_buf()],
            });
        }
        let (executable, variant) = self.executable.as_ref().map_or_else(
            || {
                self.find_executable(root)
                    .map_or((None, None), |(exe, v)| (Some(exe), Some(v)))
            },
            |exe| (Some(exe.clone()), Variant::from_executable(exe)),
        );
        Ok(HostInstall {
            root: root.to_path_buf(),
            executable,
            variant,
        })
    }

    fn probe_path(&self, searched: &mut Vec<PathBuf>) -> Option<HostInstall> {
        for variant in Variant::ALL {
            let Ok(found) = which::which(variant.executable_stem()) else {
                continue;
            };
            // Distribution launchers are often symlinks into the real root.
            let exe = dunce::canonicalize(&found).unwrap_or(found);
            let Some(dir) = exe.parent() else {
                continue;
            };
            let root = self.platform.root_for_executable_dir(dir);
            if is_install_root(&root) {
                return Some(HostInstall {
                    root,
                    executable: Some(exe),
                    variant: Some(variant),
                });
            }
            debug!("{} is not an install root", root.display());
            searched.push(root);
        }
        None
    }
}

impl HostLocator for ProbeLocator {
    fn locate(&self) -> Result<HostInstall, HostError> {
        if let Some(root) = &self.root {
            return self.explicit(root);
        }

        if let Some(exe) = &self.executable {
            let dir = exe.parent().unwrap_or_else(|| Path::new("."));
            return self.explicit(&self.platform.root_for_executable_dir(dir));
        }

        let mut searched = Vec::new();
        for root in &self.candidates {
            searched.push(root.clone());
            if let Some((exe, variant)) = self.find_executable(root) {
                debug!("found {variant} at {}", root.display());
                return Ok(HostInstall {
                    root: root.clone(),
                    executable: Some(exe),
                    variant: Some(variant),
                });
            }
        }

        if self.search_path
            && let Some(install) = self.probe_path(&mut searched)
        {
            return Ok(install);
        }

        Err(HostError::NotFound { searched })
    }
}

fn is_install_root(dir: &Path) -> bool {
    dir.join("omni.ja").is_file() || dir.join("application.ini").is_file()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::platform::Os;

    fn linux() -> Platform {
        Platform::new(Os::Linux)
    }

    fn fake_root(parent: &Path, name: &str, exe: &str) -> PathBuf {
        let root = parent.join(name);
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join(exe), "").unwrap();
        root
    }

    #[test]
    fn variant_from_executable_ignores_extension_and_case() {
        assert_eq!(
            Variant::from_executable(Path::new("/opt/zen/zen")),
            Some(Variant::Zen)
        );
        assert_eq!(
            Variant::from_executable(Path::new("LibreWolf.exe")),
            Some(Variant::LibreWolf)
        );
        assert_eq!(Variant::from_executable(Path::new("/usr/bin/chrome")), None);
    }

    #[test]
    fn explicit_root_is_used_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let root = fake_root(dir.path(), "ff", "firefox");

        let install = ProbeLocator::new(linux())
            .with_root(Some(root.clone()))
            .without_path_search()
            .locate()
            .unwrap();

        assert_eq!(install.root, root);
        assert_eq!(install.executable, Some(root.join("firefox")));
        assert_eq!(install.variant, Some(Variant::Firefox));
    }

    #[test]
    fn explicit_root_without_executable_still_resolves() {
        let dir = tempfile::tempdir().unwrap();

        let install = ProbeLocator::new(linux())
            .with_root(Some(dir.path().to_path_buf()))
            .locate()
            .unwrap();

        assert_eq!(install.executable, None);
        let err = install.require_executable().unwrap_err();
        assert!(matches!(err, HostError::MissingExecutable { .. }));
    }

    #[test]
    fn explicit_root_that_does_not_exist_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = ProbeLocator::new(linux())
            .with_root(Some(missing.clone()))
            .locate()
            .unwrap_err();

        assert!(
            matches!(&err, HostError::NotFound { searched } if searched == &vec![missing]),
            "got {err:?}"
        );
    }

    #[test]
    fn explicit_executable_sets_root_to_its_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = fake_root(dir.path(), "lw", "librewolf");

        let install = ProbeLocator::new(linux())
            .with_executable(Some(root.join("librewolf")))
            .locate()
            .unwrap();

        assert_eq!(install.root, root);
        assert_eq!(install.variant, Some(Variant::LibreWolf));
    }

    #[test]
    fn candidates_are_probed_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty");
        std::fs::create_dir_all(&empty).unwrap();
        let zen = fake_root(dir.path(), "zen", "zen");
        let ff = fake_root(dir.path(), "ff", "firefox");

        let install = ProbeLocator::new(linux())
            .with_candidates(vec![empty, zen.clone(), ff])
            .without_path_search()
            .locate()
            .unwrap();

        assert_eq!(install.root, zen);
        assert_eq!(install.variant, Some(Variant::Zen));
    }

    #[test]
    fn nothing_found_lists_every_probed_root() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");

        let err = ProbeLocator::new(linux())
            .with_candidates(vec![a.clone(), b.clone()])
            .without_path_search()
            .locate()
            .unwrap_err();

        let HostError::NotFound { searched } = err else {
            panic!("expected NotFound, got {err:?}");
        };
        assert_eq!(searched, vec![a, b]);
    }

    #[test]
    fn install_root_markers() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_install_root(dir.path()));
        std::fs::write(dir.path().join("application.ini"), "").unwrap();
        assert!(is_install_root(dir.path()));
    }

    #[test]
    fn mock_locator_can_stand_in() {
        let mut mock = MockHostLocator::new();
        mock.expect_locate().returning(|| {
            Ok(HostInstall {
                root: PathBuf::from("/opt/firefox"),
                executable: None,
                variant: None,
            })
        });
        assert_eq!(mock.locate().unwrap().root, PathBuf::from("/opt/firefox"));
    }
}
