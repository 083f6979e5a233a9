//! `sideload` command-line entry point.
use std::process::ExitCode;

use clap::Parser;
use sideload_cli::cli::{Cli, Command};
use sideload_cli::commands;
use sideload_cli::logging::{Logger, init_subscriber};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    let name = args.command.name();
    init_subscriber(args.verbose, name);
    let log = Logger::new(name);

    let result = match &args.command {
        Command::Setup => commands::setup::run(&args.global, &log),
        Command::Add(opts) => commands::add::run(&args.global, opts, &log),
        Command::Remove(opts) => commands::remove::run(&args.global, opts, &log),
        Command::List(opts) => commands::list::run(&args.global, opts, &log),
        Command::Status => commands::status::run(&args.global, &log),
        Command::Start(opts) => commands::start::run(&args.global, opts, &log),
    };

    if let Err(e) = result {
        log.error(&format!("{e:#}"));
        if let Some(path) = log.log_path() {
            log.debug(&format!("log written to {}", path.display()));
        }
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
