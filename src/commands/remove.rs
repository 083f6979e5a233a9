//! `remove` subcommand: unregister addons by path or from a menu.
use anyhow::Result;

use super::{Session, report_rendered};
use crate::cli::{GlobalOpts, RemoveOpts};
use crate::logging::{Log, Logger};
use crate::prompt::{Prompt, TerminalPrompt};
use crate::registry::{RegistryStore, RemoveOutcome};
use crate::selector::{Selection, select};

/// Run the `remove` command.
///
/// # Errors
///
/// Returns an error if the registry cannot be written or the reinstall
/// fails.
pub fn run(global: &GlobalOpts, opts: &RemoveOpts, log: &Logger) -> Result<()> {
    let mut session = Session::open(global, log)?;
    execute(&mut session, opts, log, &TerminalPrompt)
}

/// Remove `opts.path`, or ask which entries to remove when no path is given.
///
/// # Errors
///
/// Returns an error if the template is invalid, no host is found, the
/// prompt cannot be read, or a write fails.
pub fn execute<S: RegistryStore>(
    session: &mut Session<S>,
    opts: &RemoveOpts,
    log: &dyn Log,
    prompt: &dyn Prompt,
) -> Result<()> {
    log.stage("Removing addon");
    if let Some(path) = &opts.path {
        return remove_path(session, path, log);
    }
    remove_interactive(session, log, prompt)
}

fn remove_path<S: RegistryStore>(
    session: &mut Session<S>,
    path: &std::path::Path,
    log: &dyn Log,
) -> Result<()> {
    let target = session.target(log)?;
    match session.registry.remove(path)? {
        RemoveOutcome::Removed(entry) => {
            log.info(&format!("unregistered {entry}"));
            let rendered = target.sync.apply(session.registry.entries())?;
            report_rendered(log, &rendered, &target);
        }
        RemoveOutcome::NotPresent(entry) => {
            log.warn(&format!("{entry} is not registered"));
        }
    }
    Ok(())
}

fn remove_interactive<S: RegistryStore>(
    session: &mut Session<S>,
    log: &dyn Log,
    prompt: &dyn Prompt,
) -> Result<()> {
    let chosen = match select(&session.registry.list(), prompt)? {
        Selection::Chosen(chosen) => chosen,
        Selection::Cancelled(reason) => {
            log.info(&reason.to_string());
            return Ok(());
        }
    };

    let target = session.target(log)?;
    let removed = session.registry.remove_many(&chosen)?;
    for entry in &chosen {
        log.info(&format!("unregistered {entry}"));
    }
    if removed > 0 {
        let rendered = target.sync.apply(session.registry.entries())?;
        report_rendered(log, &rendered, &target);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::commands::test_support::Fixture;
    use crate::host::MockHostLocator;
    use crate::logging::{Level, MemoryLog};
    use crate::prompt::ScriptedPrompt;
    use crate::registry::{AddonEntry, MemoryStore};

    fn by_path(path: &std::path::Path) -> RemoveOpts {
        RemoveOpts {
            path: Some(path.to_path_buf()),
        }
    }

    fn fixture_with(names: &[&str]) -> (Fixture, Vec<String>) {
        let mut fx = Fixture::new();
        let paths: Vec<String> = names
            .iter()
            .map(|n| fx.addon(n).display().to_string())
            .collect();
        fx.store = MemoryStore::with_entries(paths.clone());
        (fx, paths)
    }

    #[test]
    fn removes_by_path_and_reinstalls() {
        let (fx, paths) = fixture_with(&["a", "b"]);
        let log = MemoryLog::new();
        let prompt = ScriptedPrompt::new(Vec::<String>::new());

        execute(
            &mut fx.session(),
            &by_path(std::path::Path::new(&paths[0])),
            &log,
            &prompt,
        )
        .unwrap();

        assert_eq!(fx.store.entries(), vec![AddonEntry::new(paths[1].clone())]);
        let artifact = fx.artifact().unwrap();
        assert!(!artifact.contains(&paths[0]));
        assert!(artifact.contains(&paths[1]));
        assert!(prompt.questions().is_empty());
    }

    #[test]
    fn removing_unknown_path_warns_and_writes_nothing() {
        let (fx, _) = fixture_with(&["a"]);
        let log = MemoryLog::new();
        let other = fx.dir.path().join("other");

        execute(
            &mut fx.session(),
            &by_path(&other),
            &log,
            &ScriptedPrompt::new(Vec::<String>::new()),
        )
        .unwrap();

        assert!(log.contains(Level::Warn, "is not registered"));
        assert_eq!(fx.store.save_count(), 0);
        assert!(!fx.installed());
    }

    #[test]
    fn removing_entry_whose_directory_is_gone() {
        let (fx, paths) = fixture_with(&["a"]);
        std::fs::remove_dir(&paths[0]).unwrap();

        execute(
            &mut fx.session(),
            &by_path(std::path::Path::new(&paths[0])),
            &MemoryLog::new(),
            &ScriptedPrompt::new(Vec::<String>::new()),
        )
        .unwrap();

        assert!(fx.store.entries().is_empty());
    }

    #[test]
    fn interactive_removes_chosen_entries() {
        let (fx, paths) = fixture_with(&["a", "b", "c"]);
        let prompt = ScriptedPrompt::new(["1 3", "y"]);

        execute(
            &mut fx.session(),
            &RemoveOpts { path: None },
            &MemoryLog::new(),
            &prompt,
        )
        .unwrap();

        assert_eq!(fx.store.entries(), vec![AddonEntry::new(paths[1].clone())]);
        assert!(fx.installed());
    }

    #[test]
    fn interactive_decline_changes_nothing() {
        let (fx, _) = fixture_with(&["a", "b"]);
        let log = MemoryLog::new();

        execute(
            &mut fx.session(),
            &RemoveOpts { path: None },
            &log,
            &ScriptedPrompt::new(["1", "n"]),
        )
        .unwrap();

        assert_eq!(fx.store.entries().len(), 2);
        assert_eq!(fx.store.save_count(), 0);
        assert!(!fx.installed());
    }

    #[test]
    fn interactive_on_empty_registry_does_not_prompt_or_locate() {
        let fx = Fixture::new();
        let mut locator = MockHostLocator::new();
        locator.expect_locate().never();
        let prompt = ScriptedPrompt::new(Vec::<String>::new());
        let log = MemoryLog::new();

        execute(
            &mut fx.session_with(locator),
            &RemoveOpts { path: None },
            &log,
            &prompt,
        )
        .unwrap();

        assert!(prompt.questions().is_empty());
        assert_eq!(log.messages(Level::Info).len(), 1);
    }
}
