//! `status` subcommand: report registry, host, and installation state.
use anyhow::Result;

use super::Session;
use crate::cli::GlobalOpts;
use crate::error::SideloadError;
use crate::install::InstallationState;
use crate::logging::{Log, Logger};
use crate::registry::RegistryStore;

/// Run the `status` command.
///
/// # Errors
///
/// Returns an error if configuration or the registry cannot be loaded, or
/// the template is invalid.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let session = Session::open(global, log)?;
    execute(&session, log)
}

/// Report state without changing anything.
///
/// A host that cannot be found is reported as a warning rather than an
/// error. An unusable template is still an error.
///
/// # Errors
///
/// Returns an error if the template cannot be read or is invalid, or an
/// installed file cannot be read.
pub fn execute<S: RegistryStore>(session: &Session<S>, log: &dyn Log) -> Result<()> {
    log.stage("Registry");
    let listed = session.registry.list();
    let missing = listed.iter().filter(|item| !item.exists).count();
    log.info(&format!("location: {}", session.registry.location()));
    log.info(&format!("{} addon(s), {missing} missing", listed.len()));

    log.stage("Host");
    let target = match session.target(log) {
        Ok(target) => target,
        Err(SideloadError::Host(e)) => {
            log.warn(&e.to_string());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    if let Some(variant) = target.host.variant {
        log.info(&format!("browser: {variant}"));
    }
    log.info(&format!("root: {}", target.host.root.display()));
    let executable = target
        .host
        .executable
        .as_ref()
        .map(|exe| exe.display().to_string());
    log.info(&format!(
        "executable: {}",
        executable.as_deref().unwrap_or("none")
    ));
    if executable.is_none() {
        log.warn("no browser executable in the install root; `start` will not work");
    }

    log.stage("Installation");
    let installation = target.sync.installation();
    match installation.state() {
        InstallationState::NotInstalled => {
            log.warn("not installed; run `sideload setup`");
        }
        InstallationState::Installed => {
            let report = target.sync.inspect(session.registry.entries())?;
            if report.is_current() {
                log.info("installed and up to date");
            } else {
                log.warn("installed but out of date; run `sideload setup`");
            }
        }
    }
    log.debug(&format!("artifact: {}", installation.artifact_path().display()));
    log.debug(&format!("companion: {}", installation.companion_path().display()));
    Ok(())
}
