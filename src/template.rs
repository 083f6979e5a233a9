//! Rendering of the AutoConfig artifact from a template and the registry.
//!
//! A template is ordinary text containing exactly one line whose trimmed
//! content is [`PLACEHOLDER_MARKER`]. Rendering copies every other line
//! verbatim (line terminators included) and replaces the placeholder line
//! with one quoted string literal per addon that exists on disk:
//!
//! ```text
//! const addonPaths = [          const addonPaths = [
//!   // @@ADDON_PATHS@@    ==>     "/home/me/addons/one",
//! ];                              "/home/me/addons/two"
//!                               ];
//! ```
use std::path::Path;

use crate::error::TemplateError;
use crate::registry::AddonEntry;

/// The line marking where generated entries are inserted.
pub const PLACEHOLDER_MARKER: &str = "// @@ADDON_PATHS@@";

/// Template shipped with the binary, used unless a custom one is configured.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/config.js.tmpl");

/// Static companion file enabling AutoConfig, copied verbatim.
pub const COMPANION: &str = include_str!("../templates/config-prefs.js");

/// A validated template, split around its placeholder line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    before: String,
    after: String,
    indent: String,
    line_ending: String,
}

/// Output of [`Template::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The full artifact text.
    pub text: String,
    /// Entries written into the artifact, in registry order.
    pub included: Vec<AddonEntry>,
    /// Entries left out because nothing exists at their path.
    pub skipped: Vec<AddonEntry>,
}

impl Template {
    /// Validate `source` and locate its placeholder line.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingPlaceholder`] if no line matches the
    /// marker and [`TemplateError::DuplicatePlaceholder`] if more than one
    /// does.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut found: Option<(usize, usize, &str)> = None;
        let mut offset = 0;

        for (index, line) in source.split_inclusive('\n').enumerate() {
            if line.trim() == PLACEHOLDER_MARKER {
                if let Some((first, _, _)) = found {
                    return Err(TemplateError::DuplicatePlaceholder {
                        marker: PLACEHOLDER_MARKER.to_string(),
                        first: first + 1,
                        second: index + 1,
                    });
                }
                found = Some((index, offset, line));
            }
            offset += line.len();
        }

        let Some((_, start, line)) = found else {
            return Err(TemplateError::MissingPlaceholder {
                marker: PLACEHOLDER_MARKER.to_string(),
            });
        };

        let content = line.trim_end_matches(['\r', '\n']);
        let line_ending = &line[content.len()..];
        let indent_len = content.len() - content.trim_start().len();

        Ok(Self {
            before: source[..start].to_string(),
            after: source[start + line.len()..].to_string(),
            indent: content[..indent_len].to_string(),
            line_ending: line_ending.to_string(),
        })
    }

    /// Read and validate the template at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Read`] if the file cannot be read, or any
    /// error of [`parse`](Self::parse).
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let source = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source)
    }

    /// The embedded default template.
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded template is malformed.
    pub fn builtin() -> Result<Self, TemplateError> {
        Self::parse(DEFAULT_TEMPLATE)
    }

    /// Render the artifact for `entries`, skipping entries missing on disk.
    #[must_use]
    pub fn render(&self, entries: &[AddonEntry]) -> Rendered {
        self.render_with(entries, AddonEntry::exists)
    }

    /// Render the artifact, deciding per entry with `exists` whether it is
    /// written or skipped.
    #[must_use]
    pub fn render_with(
        &self,
        entries: &[AddonEntry],
        exists: impl Fn(&AddonEntry) -> bool,
    ) -> Rendered {
        let (included, skipped): (Vec<AddonEntry>, Vec<AddonEntry>) =
            entries.iter().cloned().partition(&exists);

        let mut text = self.before.clone();
        let last = included.len().saturating_sub(1);
        for (i, entry) in included.iter().enumerate() {
            text.push_str(&self.indent);
            text.push('"');
            text.push_str(&escape_string_literal(entry.as_str()));
            text.push('"');
            if i < last {
                text.push(',');
                // An unterminated placeholder still needs breaks between entries.
                text.push_str(if self.line_ending.is_empty() {
                    "\n"
                } else {
                    self.line_ending.as_str()
                });
            } else {
                text.push_str(&self.line_ending);
            }
        }
        text.push_str(&self.after);

        Rendered {
            text,
            included,
            skipped,
        }
    }
}

/// Render `template` for `entries` in one step.
///
/// # Errors
///
/// Returns a [`TemplateError`] if the template has no placeholder line or
/// more than one.
pub fn render(template: &str, entries: &[AddonEntry]) -> Result<Rendered, TemplateError> {
    Ok(Template::parse(template)?.render(entries))
}

/// Escape `raw` for use inside a double-quoted JavaScript string literal.
///
/// Backslashes are escaped before quotes so that the backslash introduced
/// for a quote is not itself doubled.
///
/// # Examples
///
/// ```
/// use sideload_cli::template::escape_string_literal;
///
/// assert_eq!(escape_string_literal(r#"C:\a "b""#), r#"C:\\a \"b\""#);
/// ```
#[must_use]
pub fn escape_string_literal(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}
