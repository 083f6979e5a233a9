//! `setup` subcommand: render the registry and install it into the host.
use anyhow::Result;

use super::{Session, report_rendered};
use crate::cli::GlobalOpts;
use crate::logging::{Log, Logger};
use crate::registry::RegistryStore;

/// Run the `setup` command.
///
/// # Errors
///
/// Returns an error if configuration, template, host discovery, or the
/// install itself fails.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let session = Session::open(global, log)?;
    execute(&session, log)
}

/// Install the current registry, overwriting whatever is there.
///
/// # Errors
///
/// Returns an error if the template is invalid, no host is found, or the
/// files cannot be written.
pub fn execute<S: RegistryStore>(session: &Session<S>, log: &dyn Log) -> Result<()> {
    log.stage("Installing AutoConfig");
    let target = session.target(log)?;
    let rendered = target.sync.apply(session.registry.entries())?;
    report_rendered(log, &rendered, &target);
    Ok(())
}
