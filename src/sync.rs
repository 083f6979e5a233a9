//! Render-and-install as a single step.
use crate::error::InstallError;
use crate::install::{Installation, InstallationReport};
use crate::registry::AddonEntry;
use crate::resources::ResourceChange;
use crate::template::{COMPANION, Rendered, Template};

/// Outcome of [`Synchronizer::ensure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ensured {
    /// Both files were already present; nothing was written.
    AlreadySynchronized,
    /// The installation was missing or partial and has been rewritten.
    Reinstalled(Rendered),
}

/// Keeps an [`Installation`] in step with the registry.
#[derive(Debug, Clone)]
pub struct Synchronizer {
    template: Template,
    companion: String,
    installation: Installation,
}

impl Synchronizer {
    /// Synchronize `installation` from `template` and the built-in companion.
    #[must_use]
    pub fn new(template: Template, installation: Installation) -> Self {
        Self {
            template,
            companion: COMPANION.to_string(),
            installation,
        }
    }

    /// Replace the companion file content.
    #[must_use]
    pub fn with_companion(mut self, companion: impl Into<String>) -> Self {
        self.companion = companion.into();
        self
    }

    /// The target installation.
    #[must_use]
    pub const fn installation(&self) -> &Installation {
        &self.installation
    }

    /// Render the artifact for `entries` without writing anything.
    #[must_use]
    pub fn render(&self, entries: &[AddonEntry]) -> Rendered {
        self.template.render(entries)
    }

    /// Render and install unconditionally. Used after every registry mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if either target file cannot be written.
    pub fn apply(&self, entries: &[AddonEntry]) -> Result<Rendered, InstallError> {
        let rendered = self.render(entries);
        self.installation.install(&rendered.text, &self.companion)?;
        Ok(rendered)
    }

    /// Render and install only when the installation is not synchronized.
    ///
    /// # Errors
    ///
    /// Returns an error if a re-install was needed and failed.
    pub fn ensure(&self, entries: &[AddonEntry]) -> Result<Ensured, InstallError> {
        let rendered = self.render(entries);
        match self
            .installation
            .ensure_installed(&rendered.text, &self.companion)?
        {
            ResourceChange::AlreadyCorrect => Ok(Ensured::AlreadySynchronized),
            ResourceChange::Applied => Ok(Ensured::Reinstalled(rendered)),
        }
    }

    /// Compare the installed files with a fresh render of `entries`.
    ///
    /// # Errors
    ///
    /// Returns an error if an installed file cannot be read.
    pub fn inspect(&self, entries: &[AddonEntry]) -> Result<InstallationReport, InstallError> {
        let rendered = self.render(entries);
        self.installation.inspect(&rendered.text, &self.companion)
    }
}
