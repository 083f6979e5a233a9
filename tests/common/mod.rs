// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed browser install root, registry file,
// and add-on directories so each integration test runs in isolation.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use sideload_cli::commands::Session;
use sideload_cli::error::HostError;
use sideload_cli::exec::Launcher;
use sideload_cli::host::ProbeLocator;
use sideload_cli::platform::Platform;
use sideload_cli::registry::{AddonRegistry, FileStore};

/// Lines of the installed artifact that carry add-on paths.
pub fn generated_lines(artifact: &str) -> Vec<&str> {
    artifact
        .lines()
        .filter(|line| line.trim_start().starts_with('"'))
        .collect()
}

/// An isolated browser install and registry backed by a [`tempfile::TempDir`].
pub struct IntegrationTestContext {
    /// Temporary directory holding everything below.
    pub dir: tempfile::TempDir,
    /// Fake browser install root.
    pub host_root: PathBuf,
    /// Registry file (created empty by the first session).
    pub registry: PathBuf,
    /// Custom template, when one was configured.
    pub template: Option<PathBuf>,
}

impl IntegrationTestContext {
    /// Create a context with an install root containing a `firefox`
    /// executable and `application.ini`.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let host_root = dir.path().join("firefox");
        std::fs::create_dir_all(&host_root).expect("create host root");
        std::fs::write(host_root.join("firefox"), "").expect("write executable");
        std::fs::write(host_root.join("application.ini"), "[App]\nName=Firefox\n")
            .expect("write application.ini");
        let registry = dir.path().join("data").join("addons.list");
        Self {
            dir,
            host_root,
            registry,
            template: None,
        }
    }

    /// Create an add-on directory named `name` and return its path.
    pub fn addon(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join("addons").join(name);
        std::fs::create_dir_all(&path).expect("create addon dir");
        path
    }

    /// Open a fresh session, re-reading the registry from disk.
    pub fn session(&self) -> Session<FileStore> {
        let registry = AddonRegistry::load(FileStore::new(&self.registry)).expect("load registry");
        let locator = ProbeLocator::new(Platform::detect())
            .with_root(Some(self.host_root.clone()))
            .with_executable(Some(self.host_root.join("firefox")));
        Session::new(registry, self.template.clone(), Box::new(locator))
    }

    /// The installed artifact, if present.
    pub fn artifact(&self) -> Option<String> {
        std::fs::read_to_string(self.host_root.join("config.js")).ok()
    }

    /// The installed companion file, if present.
    pub fn companion(&self) -> Option<String> {
        std::fs::read_to_string(self.host_root.join("defaults/pref/config-prefs.js")).ok()
    }

    /// Delete both installed files, as a browser upgrade would.
    pub fn wipe_installation(&self) {
        std::fs::remove_file(self.host_root.join("config.js")).expect("remove artifact");
        std::fs::remove_dir_all(self.host_root.join("defaults")).expect("remove defaults");
    }

    /// Registered paths, read back from disk.
    pub fn registered(&self) -> Vec<String> {
        self.session()
            .registry
            .entries()
            .iter()
            .map(|e| e.as_str().to_string())
            .collect()
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new context.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Use `text` as a custom template.
    pub fn with_template(mut self, text: &str) -> Self {
        let path = self.ctx.dir.path().join("custom.tmpl");
        std::fs::write(&path, text).expect("write template");
        self.ctx.template = Some(path);
        self
    }

    /// Pre-populate the registry file with `lines`.
    pub fn with_registry(self, lines: &[&str]) -> Self {
        let parent = self.ctx.registry.parent().expect("registry parent");
        std::fs::create_dir_all(parent).expect("create registry dir");
        let mut text = lines.join("\n");
        text.push('\n');
        std::fs::write(&self.ctx.registry, text).expect("write registry");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

/// Launcher that records calls instead of spawning processes.
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    calls: RefCell<Vec<(PathBuf, Vec<String>)>>,
}

impl RecordingLauncher {
    /// Every `(program, args)` pair launched so far.
    pub fn calls(&self) -> Vec<(PathBuf, Vec<String>)> {
        self.calls.borrow().clone()
    }
}

impl Launcher for RecordingLauncher {
    fn launch(&self, program: &Path, args: &[String]) -> Result<u32, HostError> {
        self.calls
            .borrow_mut()
            .push((program.to_path_buf(), args.to_vec()));
        Ok(1)
    }
}
