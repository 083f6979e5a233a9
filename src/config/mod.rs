//! Layered configuration: CLI flags, environment, config file, defaults.
pub mod paths;
pub mod toml_loader;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::GlobalOpts;

/// Environment variable overriding the host install root.
pub const ENV_HOST_ROOT: &str = "SIDELOAD_HOST_ROOT";

/// Environment variable overriding the registry file.
pub const ENV_REGISTRY: &str = "SIDELOAD_REGISTRY";

/// Name of the registry file inside the data directory.
pub const REGISTRY_FILE: &str = "addons.list";

/// Name of the config file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Contents of `config.toml`.
///
/// ```toml
/// registry = "addons.list"
/// template = "my-config.js.tmpl"
///
/// [host]
/// root = "/opt/zen-browser"
/// executable = "/opt/zen-browser/zen"
/// ```
///
/// Relative paths are resolved against the directory holding the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Registry file.
    pub registry: Option<PathBuf>,
    /// Custom template.
    pub template: Option<PathBuf>,
    /// Host application location.
    pub host: HostSettings,
}

/// The `[host]` table of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostSettings {
    /// Install root receiving `config.js`.
    pub root: Option<PathBuf>,
    /// Browser executable used by `start`.
    pub executable: Option<PathBuf>,
}

impl Settings {
    /// Load settings from `path`; a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let settings: Self = toml_loader::load_config(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(settings.anchored(base))
    }

    fn anchored(self, base: &Path) -> Self {
        let anchor = |p: Option<PathBuf>| p.map(|p| base.join(p));
        Self {
            registry: anchor(self.registry),
            template: anchor(self.template),
            host: HostSettings {
                root: anchor(self.host.root),
                executable: anchor(self.host.executable),
            },
        }
    }
}

/// Locations used by one invocation, after applying precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Registry file.
    pub registry: PathBuf,
    /// Custom template, or `None` for the built-in one.
    pub template: Option<PathBuf>,
    /// Explicit host install root, or `None` to probe.
    pub host_root: Option<PathBuf>,
    /// Explicit host executable, or `None` to probe.
    pub host_executable: Option<PathBuf>,
}

/// Resolve every location from CLI flags, environment, config file, and
/// defaults, in that order of precedence.
///
/// # Errors
///
/// Returns an error if an explicitly given config file does not exist, or
/// if a config file cannot be read or parsed.
pub fn resolve(global: &GlobalOpts, env: impl Fn(&str) -> Option<String>) -> Result<Resolved> {
    let config_path = match &global.config {
        Some(path) => {
            if !path.is_file() {
                bail!("config file not found: {}", path.display());
            }
            path.clone()
        }
        None => paths::config_dir(&env).join(CONFIG_FILE),
    };
    let settings = Settings::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let registry = global
        .registry
        .clone()
        .or_else(|| env(ENV_REGISTRY).map(PathBuf::from))
        .or(settings.registry)
        .unwrap_or_else(|| paths::data_dir(&env).join(REGISTRY_FILE));

    let host_root = global
        .host_root
        .clone()
        .or_else(|| env(ENV_HOST_ROOT).map(PathBuf::from))
        .or(settings.host.root);

    Ok(Resolved {
        registry,
        template: global.template.clone().or(settings.template),
        host_root,
        host_executable: settings.host.executable,
    })
}
