//! `start` subcommand: repair the installation if needed, then launch.
use anyhow::Result;

use super::{Session, report_rendered};
use crate::cli::{GlobalOpts, StartOpts};
use crate::exec::{Launcher, SystemLauncher};
use crate::logging::{Log, Logger};
use crate::registry::RegistryStore;
use crate::sync::Ensured;

/// Run the `start` command.
///
/// # Errors
///
/// Returns an error if no host or executable is found, the reinstall fails,
/// or the browser cannot be started.
pub fn run(global: &GlobalOpts, opts: &StartOpts, log: &Logger) -> Result<()> {
    let session = Session::open(global, log)?;
    execute(&session, opts, log, &SystemLauncher)
}

/// Reinstall only when a file is missing, then launch the browser with
/// `opts.args`.
///
/// # Errors
///
/// Returns an error if no host or executable is found, the reinstall fails,
/// or the launcher fails.
pub fn execute<S: RegistryStore>(
    session: &Session<S>,
    opts: &StartOpts,
    log: &dyn Log,
    launcher: &dyn Launcher,
) -> Result<()> {
    log.stage("Starting browser");
    let target = session.target(log)?;
    let executable = target.host.require_executable()?;

    match target.sync.ensure(session.registry.entries())? {
        Ensured::AlreadySynchronized => log.debug("installation present"),
        Ensured::Reinstalled(rendered) => {
            log.info("installation was missing; reinstalled");
            report_rendered(log, &rendered, &target);
        }
    }

    let pid = launcher.launch(executable, &opts.args)?;
    log.info(&format!("launched {} (pid {pid})", executable.display()));
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::test_support::Fixture;
    use crate::error::HostError;
    use crate::exec::MockLauncher;
    use crate::host::{HostInstall, MockHostLocator};
    use crate::logging::{Level, MemoryLog};
    use mockall::predicate::eq;

    fn no_args() -> StartOpts {
        StartOpts { args: vec![] }
    }

    #[test]
    fn repairs_then_launches() {
        let fx = Fixture::new();
        let exe = fx.root.join("firefox");
        let mut launcher = MockLauncher::new();
        launcher
            .expect_launch()
            .withf(move |program, args| program == exe.as_path() && args.is_empty())
            .times(1)
            .returning(|_, _| Ok(4242));
        let log = MemoryLog::new();

        execute(&fx.session(), &no_args(), &log, &launcher).unwrap();

        assert!(fx.installed());
        assert!(log.contains(Level::Info, "reinstalled"));
        assert!(log.contains(Level::Info, "pid 4242"));
    }

    #[test]
    fn leaves_existing_installation_untouched() {
        let fx = Fixture::new();
        std::fs::create_dir_all(fx.root.join("defaults/pref")).unwrap();
        std::fs::write(fx.root.join("defaults/pref/config-prefs.js"), "custom").unwrap();
        std::fs::write(fx.root.join("config.js"), "stale").unwrap();
        let mut launcher = MockLauncher::new();
        launcher.expect_launch().returning(|_, _| Ok(1));

        execute(&fx.session(), &no_args(), &MemoryLog::new(), &launcher).unwrap();

        assert_eq!(fx.artifact().unwrap(), "stale");
    }

    #[test]
    fn passes_arguments_through() {
        let fx = Fixture::new();
        let mut launcher = MockLauncher::new();
        launcher
            .expect_launch()
            .with(
                eq(fx.root.join("firefox")),
                eq(vec!["--private-window".to_string()]),
            )
            .returning(|_, _| Ok(7));
        let opts = StartOpts {
            args: vec!["--private-window".to_string()],
        };

        execute(&fx.session(), &opts, &MemoryLog::new(), &launcher).unwrap();
    }

    #[test]
    fn missing_executable_fails_before_writing() {
        let fx = Fixture::new();
        let root = fx.root.clone();
        let mut locator = MockHostLocator::new();
        locator.expect_locate().returning(move || {
            Ok(HostInstall {
                root: root.clone(),
                executable: None,
                variant: None,
            })
        });
        let mut launcher = MockLauncher::new();
        launcher.expect_launch().never();

        let err = execute(
            &fx.session_with(locator),
            &no_args(),
            &MemoryLog::new(),
            &launcher,
        )
        .unwrap_err();

        assert!(err.to_string().contains("no browser executable"), "got {err}");
        assert!(!fx.installed());
    }

    #[test]
    fn launch_failure_is_reported() {
        let fx = Fixture::new();
        let mut launcher = MockLauncher::new();
        launcher.expect_launch().returning(|program, _| {
            Err(HostError::Launch {
                program: program.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            })
        });

        let err = execute(&fx.session(), &no_args(), &MemoryLog::new(), &launcher).unwrap_err();

        assert!(err.to_string().contains("failed to launch"));
    }
}
