//! `add` subcommand: register an addon directory and reinstall.
use anyhow::Result;

use super::{Session, report_rendered};
use crate::cli::{AddOpts, GlobalOpts};
use crate::logging::{Log, Logger};
use crate::registry::{AddOutcome, RegistryStore};

/// Run the `add` command.
///
/// # Errors
///
/// Returns an error if the path does not exist, the registry cannot be
/// written, or the reinstall fails.
pub fn run(global: &GlobalOpts, opts: &AddOpts, log: &Logger) -> Result<()> {
    let mut session = Session::open(global, log)?;
    execute(&mut session, opts, log)
}

/// Register `opts.path`, then bring the installation up to date.
///
/// The template and host are resolved first so that nothing is written to
/// the registry when either is unusable. A path that is already registered
/// only produces a warning; the installation is left as it is.
///
/// # Errors
///
/// Returns an error if the template is invalid, no host is found, the path
/// does not exist, or a write fails.
pub fn execute<S: RegistryStore>(
    session: &mut Session<S>,
    opts: &AddOpts,
    log: &dyn Log,
) -> Result<()> {
    log.stage("Adding addon");
    let target = session.target(log)?;

    match session.registry.add(&opts.path)? {
        AddOutcome::Added(entry) => {
            log.info(&format!("registered {entry}"));
            let rendered = target.sync.apply(session.registry.entries())?;
            report_rendered(log, &rendered, &target);
        }
        AddOutcome::AlreadyPresent(entry) => {
            log.warn(&format!("{entry} is already registered"));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::test_support::Fixture;
    use crate::error::HostError;
    use crate::host::MockHostLocator;
    use crate::logging::{Level, MemoryLog};
    use crate::registry::{AddonEntry, MemoryStore};

    fn opts(path: &std::path::Path) -> AddOpts {
        AddOpts {
            path: path.to_path_buf(),
        }
    }

    #[test]
    fn registers_and_installs() {
        let fx = Fixture::new();
        let addon = fx.addon("dark-mode");
        let log = MemoryLog::new();

        execute(&mut fx.session(), &opts(&addon), &log).unwrap();

        assert_eq!(
            fx.store.entries(),
            vec![AddonEntry::new(addon.display().to_string())]
        );
        assert!(fx.artifact().unwrap().contains(&addon.display().to_string()));
        assert!(log.contains(Level::Info, "registered"));
    }

    #[test]
    fn duplicate_add_warns_and_keeps_single_entry() {
        let fx = Fixture::new();
        let addon = fx.addon("a");
        let mut session = fx.session();
        execute(&mut session, &opts(&addon), &MemoryLog::new()).unwrap();
        let log = MemoryLog::new();

        execute(&mut session, &opts(&addon), &log).unwrap();

        assert_eq!(fx.store.entries().len(), 1);
        assert_eq!(fx.store.save_count(), 1);
        assert!(log.contains(Level::Warn, "already registered"));
    }

    #[test]
    fn duplicate_add_does_not_reinstall() {
        let fx = Fixture::new();
        let addon = fx.addon("a");
        let mut session = fx.session();
        execute(&mut session, &opts(&addon), &MemoryLog::new()).unwrap();
        std::fs::remove_file(fx.root.join("config.js")).unwrap();
        let log = MemoryLog::new();

        execute(&mut session, &opts(&addon), &log).unwrap();

        assert!(!fx.root.join("config.js").exists());
        assert_eq!(fx.store.save_count(), 1);
        assert!(log.messages(Level::Info).is_empty());
    }

    #[test]
    fn nonexistent_path_is_rejected_without_writes() {
        let fx = Fixture::new();
        let missing = fx.dir.path().join("nope");

        let err = execute(&mut fx.session(), &opts(&missing), &MemoryLog::new()).unwrap_err();

        assert!(err.to_string().contains("path not found"), "got {err}");
        assert_eq!(fx.store.save_count(), 0);
        assert!(!fx.installed());
    }

    #[test]
    fn missing_host_leaves_registry_untouched() {
        let fx = Fixture::new();
        let addon = fx.addon("a");
        let mut locator = MockHostLocator::new();
        locator
            .expect_locate()
            .returning(|| Err(HostError::NotFound { searched: vec![] }));

        let result = execute(&mut fx.session_with(locator), &opts(&addon), &MemoryLog::new());

        assert!(result.is_err());
        assert_eq!(fx.store.save_count(), 0);
    }

    #[test]
    fn entries_keep_insertion_order() {
        let mut fx = Fixture::new();
        let first = fx.addon("first");
        let second = fx.addon("second");
        fx.store = MemoryStore::new();
        let mut session = fx.session();

        execute(&mut session, &opts(&second), &MemoryLog::new()).unwrap();
        execute(&mut session, &opts(&first), &MemoryLog::new()).unwrap();

        let artifact = fx.artifact().unwrap();
        let second_at = artifact.find(&second.display().to_string()).unwrap();
        let first_at = artifact.find(&first.display().to_string()).unwrap();
        assert!(second_at < first_at);
    }
}
