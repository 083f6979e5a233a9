//! Whole-file resource: a target path that must hold exact content.
use std::path::PathBuf;

use super::helpers::fs::write_atomic;
use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::error::InstallError;

/// A file that should exist at `target` with `content`.
#[derive(Debug, Clone)]
pub struct FileResource<'a> {
    /// Where the file is installed.
    pub target: PathBuf,
    /// The desired file content.
    pub content: &'a str,
}

impl<'a> FileResource<'a> {
    /// Create a new file resource.
    #[must_use]
    pub const fn new(target: PathBuf, content: &'a str) -> Self {
        Self { target, content }
    }
}

impl Applicable for FileResource<'_> {
    fn description(&self) -> String {
        self.target.display().to_string()
    }

    fn apply(&self) -> Result<ResourceChange, InstallError> {
        write_atomic(&self.target, self.content.as_bytes()).map_err(|(_, source)| {
            InstallError::Write {
                path: self.target.clone(),
                source,
            }
        })?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for FileResource<'_> {
    fn current_state(&self) -> Result<ResourceState, InstallError> {
        if self.target.is_dir() {
            return Ok(ResourceState::Invalid {
                reason: "target is a directory".to_string(),
            });
        }
        if !self.target.exists() {
            return Ok(ResourceState::Missing);
        }

        let current = std::fs::read(&self.target).map_err(|source| InstallError::Inspect {
            path: self.target.clone(),
            source,
        })?;
        if current == self.content.as_bytes() {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect {
                current: format!("{} bytes, content differs", current.len()),
            })
        }
    }
}
