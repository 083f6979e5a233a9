//! File-system resource helpers.
use std::io::Write as _;
use std::path::Path;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Replace `path` with `content` through a temporary sibling file.
///
/// The content is written and synced to a temp file in the same directory,
/// which is then renamed over `path`; readers observe either the old file or
/// the complete new one. Missing parent directories are created. On failure
/// the temp file is removed and the error is returned together with the step
/// that failed.
///
/// # Errors
///
/// Returns `(step, error)` if any step fails.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<(), (&'static str, std::io::Error)> {
    ensure_parent_dir(path).map_err(|e| ("creating parent directory", e))?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".sideload-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| ("creating temporary file", e))?;
    tmp.write_all(content)
        .map_err(|e| ("writing temporary file", e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| ("syncing temporary file", e))?;
    tmp.persist(path).map_err(|e| ("replacing file", e.error))?;
    Ok(())
}
