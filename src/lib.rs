//! Keep unpacked browser add-ons loaded in a Firefox-family browser.
//!
//! A registry of add-on directories is rendered into an AutoConfig script
//! (`config.js`) and installed, with its companion preference file, into the
//! browser's install root. Every registry change re-renders and reinstalls;
//! `start` repairs a wiped installation before launching the browser.
//!
//! The public API is organised into layers:
//!
//! - **[`registry`]** persists the ordered list of add-on paths
//! - **[`template`]** renders that list into the AutoConfig script
//! - **[`install`]** and **[`sync`]** write the rendered files into a host
//! - **[`host`]** and **[`platform`]** find the browser to install into
//! - **[`commands`]** wires them into the `sideload` subcommands
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod host;
pub mod install;
pub mod logging;
pub mod platform;
pub mod prompt;
pub mod registry;
pub mod resources;
pub mod selector;
pub mod sync;
pub mod template;
