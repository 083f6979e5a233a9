//! Operating-system detection and well-known browser install locations.
use std::fmt;
use std::path::{Path, PathBuf};

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux and other Unix-like systems.
    Linux,
    /// Microsoft Windows.
    Windows,
    /// Apple macOS.
    MacOs,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::Windows => write!(f, "windows"),
            Self::MacOs => write!(f, "macos"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone)]
pub struct Platform {
    /// Operating system.
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            os: Self::detect_os(),
        }
    }

    /// Create a platform with explicit values (for testing).
    #[must_use]
    pub const fn new(os: Os) -> Self {
        Self { os }
    }

    /// Whether the platform is Windows.
    #[must_use]
    pub const fn is_windows(&self) -> bool {
        matches!(self.os, Os::Windows)
    }

    /// File name of an executable called `stem` on this platform.
    #[must_use]
    pub fn executable_name(&self, stem: &str) -> String {
        if self.is_windows() {
            format!("{stem}.exe")
        } else {
            stem.to_string()
        }
    }

    /// Well-known install roots of Firefox-family browsers, in probe order.
    ///
    /// An install root is the directory holding the browser's own resource
    /// files (`omni.ja`, `defaults/`), which is where `config.js` is read from.
    #[must_use]
    pub fn candidate_roots(&self) -> Vec<PathBuf> {
        match self.os {
            Os::Linux => [
                "/usr/lib/firefox",
                "/usr/lib64/firefox",
                "/usr/lib/firefox-esr",
                "/opt/firefox",
                "/usr/lib/librewolf",
                "/opt/librewolf",
                "/opt/zen-browser",
                "/opt/zen-browser-bin",
                "/usr/lib/waterfox",
                "/opt/waterfox",
                "/usr/lib/floorp",
                "/opt/floorp",
            ]
            .iter()
            .map(PathBuf::from)
            .collect(),
            Os::Windows => [
                r"C:\Program Files\Mozilla Firefox",
                r"C:\Program Files (x86)\Mozilla Firefox",
                r"C:\Program Files\LibreWolf",
                r"C:\Program Files\Zen Browser",
                r"C:\Program Files\Waterfox",
                r"C:\Program Files\Ablaze Floorp",
            ]
            .iter()
            .map(PathBuf::from)
            .collect(),
            Os::MacOs => ["Firefox", "LibreWolf", "Zen", "Waterfox", "Floorp"]
                .iter()
                .map(|app| {
                    Path::new("/Applications")
                        .join(format!("{app}.app"))
                        .join("Contents/Resources")
                })
                .collect(),
        }
    }

    /// Directory that holds the executable for an install root.
    ///
    /// On macOS the executable lives in `Contents/MacOS`, next to the
    /// `Contents/Resources` install root; elsewhere it sits in the root.
    #[must_use]
    pub fn executable_dir(&self, root: &Path) -> PathBuf {
        if matches!(self.os, Os::MacOs)
            && root.ends_with("Contents/Resources")
            && let Some(contents) = root.parent()
        {
            return contents.join("MacOS");
        }
        root.to_path_buf()
    }

    /// Install root for a directory holding an executable; the inverse of
    /// [`executable_dir`](Self::executable_dir).
    #[must_use]
    pub fn root_for_executable_dir(&self, dir: &Path) -> PathBuf {
        if matches!(self.os, Os::MacOs)
            && dir.ends_with("Contents/MacOS")
            && let Some(contents) = dir.parent()
        {
            return contents.join("Resources");
        }
        dir.to_path_buf()
    }

    fn detect_os() -> Os {
        if cfg!(target_os = "windows") {
            Os::Windows
        } else if cfg!(target_os = "macos") {
            Os::MacOs
        } else {
            // Default to Linux for other Unix-like systems
            Os::Linux
        }
    }
}
