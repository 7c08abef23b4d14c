//! # Path Utilities

use std::path::PathBuf;

/// Expand `~` and `$VAR` / `${VAR}` references in a user supplied path.
///
/// Does not check that the path exists.
pub fn expand_path(path: &str) -> anyhow::Result<PathBuf> {
    let expanded = shellexpand::full(path)?;
    Ok(PathBuf::from(expanded.into_owned()))
}
