//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point.
#[derive(Parser, Debug)]
#[command(
    name = "sideload",
    about = "Keep unpacked add-ons loaded in a Firefox-family browser",
    version = option_env!("SIDELOAD_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Configuration file (default: $XDG_CONFIG_HOME/sideload/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Registry file (default: $XDG_DATA_HOME/sideload/addons.list)
    #[arg(long, global = true, value_name = "FILE")]
    pub registry: Option<PathBuf>,

    /// Custom template instead of the built-in one
    #[arg(long, global = true, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Browser install root, skipping discovery
    #[arg(long, global = true, value_name = "DIR")]
    pub host_root: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install the AutoConfig files for the current registry
    Setup,
    /// Register an add-on directory and reinstall
    Add(AddOpts),
    /// Unregister an add-on (interactive when no path is given) and reinstall
    Remove(RemoveOpts),
    /// Show registered add-ons
    List(ListOpts),
    /// Show registry and installation state
    Status,
    /// Repair the installation if needed, then launch the browser
    Start(StartOpts),
}

impl Command {
    /// Subcommand name, used to name the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Add(_) => "add",
            Self::Remove(_) => "remove",
            Self::List(_) => "list",
            Self::Status => "status",
            Self::Start(_) => "start",
        }
    }
}

/// Options for the `add` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct AddOpts {
    /// Add-on directory (relative paths resolve against the working directory)
    pub path: PathBuf,
}

/// Options for the `remove` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct RemoveOpts {
    /// Registered path to remove; omit to choose from a menu
    pub path: Option<PathBuf>,
}

/// Options for the `list` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ListOpts {
    /// Print the registry as JSON
    #[arg(long)]
    pub json: bool,
}

/// Options for the `start` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct StartOpts {
    /// Arguments passed through to the browser
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
