//! `list` subcommand: show registered addons.
use std::io::{self, Write};

use anyhow::{Context as _, Result};
use serde::Serialize;

use super::Session;
use crate::cli::{GlobalOpts, ListOpts};
use crate::logging::{Log, Logger};
use crate::registry::{ListedAddon, RegistryStore};

/// One addon in `--json` output.
#[derive(Debug, Serialize)]
struct JsonEntry<'a> {
    path: &'a str,
    exists: bool,
}

/// Run the `list` command.
///
/// # Errors
///
/// Returns an error if the registry cannot be read or output fails.
pub fn run(global: &GlobalOpts, opts: &ListOpts, log: &Logger) -> Result<()> {
    let session = Session::open(global, log)?;
    execute(&session, opts, log, &mut io::stdout().lock())
}

/// List the registry in order, marking entries whose directory is gone.
///
/// Text output goes through `log`; JSON output is written to `out` so it
/// stays machine-readable.
///
/// # Errors
///
/// Returns an error if writing JSON to `out` fails.
pub fn execute<S: RegistryStore>(
    session: &Session<S>,
    opts: &ListOpts,
    log: &dyn Log,
    out: &mut dyn Write,
) -> Result<()> {
    let listed = session.registry.list();
    if opts.json {
        return write_json(&listed, out);
    }

    if listed.is_empty() {
        log.info("no addons registered");
    }
    for item in &listed {
        let tag = if item.exists { "[ok]     " } else { "[missing]" };
        log.info(&format!("{tag} {}", item.entry));
    }
    log.debug(&format!(
        "{} addon(s) in {}",
        listed.len(),
        session.registry.location()
    ));
    Ok(())
}

fn write_json(listed: &[ListedAddon], out: &mut dyn Write) -> Result<()> {
    let entries: Vec<JsonEntry<'_>> = listed
        .iter()
        .map(|item| JsonEntry {
            path: item.entry.as_str(),
            exists: item.exists,
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &entries).context("writing JSON")?;
    writeln!(out).context("writing JSON")?;
    Ok(())
}
