//! Top-level subcommand orchestration.
pub mod add;
pub mod list;
pub mod remove;
pub mod setup;
pub mod start;
pub mod status;

use anyhow::Result;
use std::fmt;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::config::{self, paths::process_env};
use crate::error::{SideloadError, TemplateError};
use crate::host::{HostInstall, HostLocator, ProbeLocator};
use crate::install::Installation;
use crate::logging::Log;
use crate::platform::Platform;
use crate::registry::{AddonRegistry, FileStore, RegistryStore};
use crate::sync::Synchronizer;
use crate::template::{Rendered, Template};

/// Shared state for one command invocation.
///
/// Holds the loaded registry and knows where the template and host come
/// from; neither is resolved until a command asks for a [`Target`].
pub struct Session<S = FileStore> {
    /// The addon registry.
    pub registry: AddonRegistry<S>,
    template: Option<PathBuf>,
    locator: Box<dyn HostLocator>,
}

impl<S: fmt::Debug> fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("registry", &self.registry)
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

/// A resolved host together with a synchronizer targeting it.
#[derive(Debug)]
pub struct Target {
    /// The located host.
    pub host: HostInstall,
    /// Renders and installs into the host's install root.
    pub sync: Synchronizer,
}

impl Session<FileStore> {
    /// Resolve configuration and load the registry.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or the registry
    /// file cannot be read.
    pub fn open(global: &GlobalOpts, log: &dyn Log) -> Result<Self> {
        let resolved = config::resolve(global, process_env)?;
        log.debug(&format!("registry: {}", resolved.registry.display()));

        let registry = AddonRegistry::load(FileStore::new(&resolved.registry))?;
        let locator = ProbeLocator::new(Platform::detect())
            .with_root(resolved.host_root)
            .with_executable(resolved.host_executable);

        Ok(Self::new(registry, resolved.template, Box::new(locator)))
    }
}

impl<S: RegistryStore> Session<S> {
    /// Assemble a session from its parts.
    #[must_use]
    pub fn new(
        registry: AddonRegistry<S>,
        template: Option<PathBuf>,
        locator: Box<dyn HostLocator>,
    ) -> Self {
        Self {
            registry,
            template,
            locator,
        }
    }

    /// Load the configured template, or the built-in one.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be read or is invalid.
    pub fn template(&self) -> Result<Template, TemplateError> {
        self.template
            .as_deref()
            .map_or_else(Template::builtin, Template::load)
    }

    /// Validate the template and locate the host.
    ///
    /// Commands call this before touching the registry so that a fatal
    /// problem aborts before anything is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is invalid or no host is found.
    pub fn target(&self, log: &dyn Log) -> Result<Target, SideloadError> {
        let template = self.template()?;
        let host = self.locator.locate()?;
        let label = host
            .variant
            .as_ref()
            .map_or_else(|| "host".to_string(), ToString::to_string);
        log.debug(&format!("{label} at {}", host.root.display()));
        let sync = Synchronizer::new(template, Installation::new(&host.root));
        Ok(Target { host, sync })
    }
}

/// Report the outcome of a render: one warning per skipped entry, then a
/// summary line.
pub(crate) fn report_rendered(log: &dyn Log, rendered: &Rendered, target: &Target) {
    for entry in &rendered.skipped {
        log.warn(&format!("skipping {entry}: path does not exist"));
    }
    log.info(&format!(
        "installed {} addon(s) into {}",
        rendered.included.len(),
        target.host.root.display()
    ));
}


#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::test_support::Fixture;
    use crate::error::HostError;
    use crate::host::MockHostLocator;
    use crate::logging::MemoryLog;
    use crate::registry::AddonRegistry;

    #[test]
    fn target_uses_located_root() {
        let fx = Fixture::new();
        let session = fx.session();
        let target = session.target(&MemoryLog::new()).unwrap();
        assert_eq!(target.host.root, fx.root);
        assert_eq!(target.sync.installation().root(), fx.root.as_path());
    }

    #[test]
    fn target_fails_when_host_missing() {
        let fx = Fixture::new();
        let mut locator = MockHostLocator::new();
        locator
            .expect_locate()
            .returning(|| Err(HostError::NotFound { searched: vec![] }));
        let err = fx.session_with(locator).target(&MemoryLog::new()).unwrap_err();
        assert!(err.to_string().contains("host application not found"));
    }

    #[test]
    fn invalid_custom_template_is_reported_before_host_lookup() {
        let fx = Fixture::new();
        let template = fx.dir.path().join("broken.tmpl");
        std::fs::write(&template, "no marker here\n").unwrap();
        let mut locator = MockHostLocator::new();
        locator.expect_locate().never();
        let registry = AddonRegistry::load(fx.store.clone()).unwrap();
        let session = super::Session::new(registry, Some(template), Box::new(locator));

        let err = session.target(&MemoryLog::new()).unwrap_err();

        assert!(format!("{err:#}").contains("not found in template"), "got {err:#}");
    }
}
