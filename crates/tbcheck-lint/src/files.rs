//! Source file enumeration.

use std::path::Path;
use walkdir::WalkDir;

use crate::error::{LintError, LintResult};

/// Extension of Verilog sources.
pub const VERILOG_EXTENSION: &str = "v";

/// Walks `dir` and returns every `.v` file as a `/`-separated path relative
/// to `root`, sorted, skipping paths for which `exclude` returns true.
pub fn verilog_files<F>(root: &Path, dir: &Path, exclude: F) -> LintResult<Vec<String>>
where
    F: Fn(&str) -> bool,
{
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|source| LintError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) != Some(VERILOG_EXTENSION) {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative = to_slash_path(relative);
        if !exclude(&relative) {
            files.push(relative);
        }
    }

    files.sort();
    Ok(files)
}

/// Joins path components with `/` regardless of platform.
pub fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Returns the final `/`-separated component of `path`.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
