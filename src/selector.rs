//! Interactive choice of registry entries to remove.
//!
//! The registry is shown as a 1-based numbered menu. The answer is a line of
//! whitespace-separated numbers; any `0` or an empty line cancels, and tokens
//! that are not numbers in range are reported and skipped. A final `y`/`Y`
//! confirmation is required before anything is returned for removal.
use std::collections::BTreeSet;
use std::fmt;
use std::io;

use crate::prompt::Prompt;
use crate::registry::{AddonEntry, ListedAddon};

/// A token of the selection line that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejected {
    /// The token is not a non-negative integer.
    NotANumber(String),
    /// The number is past the end of the menu.
    OutOfRange(usize),
}

/// Result of parsing one selection line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSelection {
    /// Chosen 1-based menu positions, ascending and without duplicates.
    pub indices: Vec<usize>,
    /// Tokens that were skipped, in input order.
    pub rejected: Vec<Rejected>,
    /// The line was empty or contained `0`.
    pub cancelled: bool,
}

/// Why an interactive removal ended without choosing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The registry is empty.
    NothingToRemove,
    /// The user entered `0` or an empty line.
    Aborted,
    /// None of the entered tokens named a menu entry.
    NothingValid,
    /// The user did not confirm.
    Declined,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NothingToRemove => "nothing to remove",
            Self::Aborted => "cancelled",
            Self::NothingValid => "no valid selection",
            Self::Declined => "not confirmed",
        };
        f.write_str(text)
    }
}

/// Outcome of [`select`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Entries the user chose and confirmed, in registry order.
    Chosen(Vec<AddonEntry>),
    /// Nothing is to be removed.
    Cancelled(CancelReason),
}

/// Parse a selection line against a menu of `len` entries.
///
/// ```
/// use sideload_cli::selector::{parse_selection, Rejected};
///
/// let parsed = parse_selection("3 x 1 3 9", 4);
/// assert_eq!(parsed.indices, vec![1, 3]);
/// assert_eq!(
///     parsed.rejected,
///     vec![Rejected::NotANumber("x".into()), Rejected::OutOfRange(9)]
/// );
/// assert!(!parsed.cancelled);
/// ```
#[must_use]
pub fn parse_selection(input: &str, len: usize) -> ParsedSelection {
    let mut chosen = BTreeSet::new();
    let mut parsed = ParsedSelection::default();
    let mut tokens = input.split_whitespace().peekable();

    if tokens.peek().is_none() {
        parsed.cancelled = true;
        return parsed;
    }

    for token in tokens {
        match token.parse::<usize>() {
            Ok(0) => parsed.cancelled = true,
            Ok(n) if n <= len => {
                chosen.insert(n);
            }
            Ok(n) => parsed.rejected.push(Rejected::OutOfRange(n)),
            Err(_) => parsed.rejected.push(Rejected::NotANumber(token.to_string())),
        }
    }

    parsed.indices = chosen.into_iter().collect();
    parsed
}

/// Menu lines for `listed`, numbered from 1.
#[must_use]
pub fn menu_lines(listed: &[ListedAddon]) -> Vec<String> {
    listed
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let marker = if item.exists { "" } else { " (missing)" };
            format!("  {}) {}{marker}", i + 1, item.entry)
        })
        .collect()
}

/// Run the interactive removal dialogue over `listed`.
///
/// # Errors
///
/// Returns an error only if the prompt cannot be read.
pub fn select(listed: &[ListedAddon], prompt: &dyn Prompt) -> io::Result<Selection> {
    if listed.is_empty() {
        return Ok(Selection::Cancelled(CancelReason::NothingToRemove));
    }

    prompt.show("Registered addons:");
    for line in menu_lines(listed) {
        prompt.show(&line);
    }

    let answer = prompt.ask(&format!(
        "Remove which? [1-{}, space separated, 0 to cancel]:",
        listed.len()
    ))?;
    let parsed = parse_selection(&answer, listed.len());

    if parsed.cancelled {
        return Ok(Selection::Cancelled(CancelReason::Aborted));
    }

    for rejected in &parsed.rejected {
        match rejected {
            Rejected::NotANumber(token) => {
                prompt.show(&format!("ignoring '{token}': not a number"));
            }
            Rejected::OutOfRange(n) => {
                prompt.show(&format!("ignoring {n}: out of range 1-{}", listed.len()));
            }
        }
    }

    let chosen: Vec<AddonEntry> = parsed
        .indices
        .iter()
        .filter_map(|&n| listed.get(n - 1))
        .map(|item| item.entry.clone())
        .collect();

    if chosen.is_empty() {
        return Ok(Selection::Cancelled(CancelReason::NothingValid));
    }

    for entry in &chosen {
        prompt.show(&format!("  - {entry}"));
    }
    let confirm = prompt.ask(&format!("Remove {} addon(s)? [y/N]", chosen.len()))?;
    if matches!(confirm.trim(), "y" | "Y") {
        Ok(Selection::Chosen(chosen))
    } else {
        Ok(Selection::Cancelled(CancelReason::Declined))
    }
}
