//! Installation of the rendered artifact into the host install root.
//!
//! Two files make up an installation: the static companion preference file,
//! which tells the browser to evaluate AutoConfig, and the rendered artifact
//! itself. The installation counts as synchronized when both are present;
//! content is not compared because every registry mutation re-renders and
//! re-installs in the same operation.
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::InstallError;
use crate::resources::file::FileResource;
use crate::resources::{Applicable as _, Resource as _, ResourceChange, ResourceState};

/// Artifact location relative to the install root.
pub const ARTIFACT_FILE: &str = "config.js";

/// Companion preference file location relative to the install root.
pub const COMPANION_FILE: &str = "defaults/pref/config-prefs.js";

/// Derived installation state of a host install root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallationState {
    /// At least one of the two files is absent.
    NotInstalled,
    /// Both files are present.
    Installed,
}

/// Per-file state of an installation compared with the desired content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationReport {
    /// State of the companion preference file.
    pub companion: ResourceState,
    /// State of the rendered artifact.
    pub artifact: ResourceState,
}

impl InstallationReport {
    /// Whether both files exist and match the desired content byte for byte.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.companion == ResourceState::Correct && self.artifact == ResourceState::Correct
    }
}

/// The two installed files under a host install root.
#[derive(Debug, Clone)]
pub struct Installation {
    root: PathBuf,
}

impl Installation {
    /// Target the install root `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The install root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the rendered artifact is installed.
    #[must_use]
    pub fn artifact_path(&self) -> PathBuf {
        self.root.join(ARTIFACT_FILE)
    }

    /// Where the companion file is installed.
    #[must_use]
    pub fn companion_path(&self) -> PathBuf {
        self.root.join(COMPANION_FILE)
    }

    /// Presence-based installation state.
    #[must_use]
    pub fn state(&self) -> InstallationState {
        if self.companion_path().is_file() && self.artifact_path().is_file() {
            InstallationState::Installed
        } else {
            InstallationState::NotInstalled
        }
    }

    /// Whether both files are present.
    #[must_use]
    pub fn is_synchronized(&self) -> bool {
        self.state() == InstallationState::Installed
    }

    /// Write both files, overwriting whatever is there.
    ///
    /// The companion is written first, then the artifact. Each file is
    /// replaced atomically but the pair is not: an interruption between the
    /// two leaves a state that [`ensure_installed`](Self::ensure_installed)
    /// repairs on the next run.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::Write`] if either file or a parent directory
    /// cannot be written.
    pub fn install(&self, artifact: &str, companion: &str) -> Result<(), InstallError> {
        for resource in [
            FileResource::new(self.companion_path(), companion),
            FileResource::new(self.artifact_path(), artifact),
        ] {
            resource.apply()?;
            debug!("wrote {}", resource.description());
        }
        Ok(())
    }

    /// Install only if the installation is not synchronized.
    ///
    /// Returns [`ResourceChange::AlreadyCorrect`] when both files were present
    /// and [`ResourceChange::Applied`] when they were (re)written.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`install`](Self::install).
    pub fn ensure_installed(
        &self,
        artifact: &str,
        companion: &str,
    ) -> Result<ResourceChange, InstallError> {
        if self.is_synchronized() {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        self.install(artifact, companion)?;
        Ok(ResourceChange::Applied)
    }

    /// Compare both installed files with the desired content.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::Inspect`] if an installed file exists but
    /// cannot be read.
    pub fn inspect(
        &self,
        artifact: &str,
        companion: &str,
    ) -> Result<InstallationReport, InstallError> {
        Ok(InstallationReport {
            companion: FileResource::new(self.companion_path(), companion).current_state()?,
            artifact: FileResource::new(self.artifact_path(), artifact).current_state()?,
        })
    }
}
