//! Starting the host application.
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::HostError;

/// Starts a program without waiting for it.
#[cfg_attr(test, mockall::automock)]
pub trait Launcher {
    /// Spawn `program` with `args`, detached from the terminal's stdio, and
    /// return its process id.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Launch`] if the process cannot be started.
    fn launch(&self, program: &Path, args: &[String]) -> Result<u32, HostError>;
}

/// Launcher backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    // The browser is meant to outlive this process.
    #[allow(clippy::zombie_processes)]
    fn launch(&self, program: &Path, args: &[String]) -> Result<u32, HostError> {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| HostError::Launch {
                program: program.to_path_buf(),
                source,
            })?;
        Ok(child.id())
    }
}
