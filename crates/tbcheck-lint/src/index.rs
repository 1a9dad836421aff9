//! Cross-check of the device index file against device files on disk.
//!
//! The index lists each device as a markdown link whose text is the device
//! number and whose target is the device file, e.g.
//! `[74161](source-7400/74161.v)`. Every device file must be listed exactly
//! once and every listing must point at an existing device file.

use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use crate::error::LintResult;
use crate::files::verilog_files;
use crate::report::CheckReport;

/// Default index file name at the project root.
pub const DEFAULT_INDEX_FILE: &str = "device-index.md";

/// Top-level directories that never hold indexed devices.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &["docs", "images", "includes", "scripts"];

fn listing_regex() -> &'static Regex {
    static LISTING: OnceLock<Regex> = OnceLock::new();
    LISTING.get_or_init(|| {
        Regex::new(r"(?i)\[([0-9]+[A-Z]?)\]\((.*?([0-9]+[A-Z]?)\.v)\)").expect("valid regex")
    })
}

/// What is wrong with one device path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexProblem {
    /// On disk but not listed.
    Missing,
    /// Listed more than once.
    Duplicate,
    /// Listed but not on disk.
    NonExistent,
    /// Link text does not match the file's device number.
    Malformed,
}

impl fmt::Display for IndexProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IndexProblem::Missing => "Missing listing",
            IndexProblem::Duplicate => "Duplicate listing",
            IndexProblem::NonExistent => "Non-existent device listed",
            IndexProblem::Malformed => "Malformed listing",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Listing {
    Count(u32),
    NotOnDisk,
    Malformed,
}

/// Finds the first index problem, checking on-disk devices in the given
/// order and then paths only found in the index, in index order.
pub fn find_index_problem(
    index_text: &str,
    device_paths: &[String],
) -> Option<(IndexProblem, String)> {
    let mut order: Vec<String> = device_paths.to_vec();
    let mut listings: HashMap<String, Listing> = device_paths
        .iter()
        .map(|p| (p.clone(), Listing::Count(0)))
        .collect();

    for line in index_text.lines() {
        let Some(caps) = listing_regex().captures(line) else {
            continue;
        };
        let path = &caps[2];
        let text_matches = caps[1] == caps[3];

        match listings.get_mut(path) {
            Some(Listing::Count(n)) if text_matches => *n += 1,
            Some(listing) if !text_matches => *listing = Listing::Malformed,
            Some(_) => {}
            None => {
                let listing = if text_matches {
                    Listing::NotOnDisk
                } else {
                    Listing::Malformed
                };
                listings.insert(path.to_string(), listing);
                order.push(path.to_string());
            }
        }
    }

    order.into_iter().find_map(|path| {
        let problem = match listings.get(&path)? {
            Listing::Count(0) => IndexProblem::Missing,
            Listing::Count(1) => return None,
            Listing::Count(_) => IndexProblem::Duplicate,
            Listing::NotOnDisk => IndexProblem::NonExistent,
            Listing::Malformed => IndexProblem::Malformed,
        };
        Some((problem, path))
    })
}

/// Checks `index_text` against `device_paths` (relative to the project root).
pub fn check_index_contents(index_text: &str, device_paths: &[String]) -> CheckReport {
    match find_index_problem(index_text, device_paths) {
        Some((problem, path)) => CheckReport::failed(format_args!("{} {}", problem, path)),
        None => CheckReport::passed("Index contents"),
    }
}

/// Lists device files below `root` that the index must cover: `*.v`
/// excluding test benches and files under `ignored_dirs`.
pub fn indexed_device_files(root: &Path, ignored_dirs: &[String]) -> LintResult<Vec<String>> {
    verilog_files(root, root, |path| {
        path.ends_with("-tb.v")
            || ignored_dirs
                .iter()
                .any(|dir| path.starts_with(&format!("{}/", dir.trim_end_matches('/'))))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn paths(list: &[&str]) -> Vec<String> {
        list.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_every_device_listed_once_passes() {
        let index = "\
# Devices

| Device | Description |
|--------|-------------|
| [7400](source-7400/7400.v) | Quad 2-input NAND |
| [74161](source-7400/74161.v) | 4-bit counter |
";
        let devices = paths(&["source-7400/7400.v", "source-7400/74161.v"]);
        let report = check_index_contents(index, &devices);
        assert!(report.passed);
        assert_eq!(report.summary, "Passed: Index contents");
    }

    #[test]
    fn test_missing_listing() {
        let index = "[7400](source-7400/7400.v)\n";
        let devices = paths(&["source-7400/7400.v", "source-7400/7402.v"]);
        let report = check_index_contents(index, &devices);
        assert!(!report.passed);
        assert_eq!(report.summary, "Failed at: Missing listing source-7400/7402.v");
    }

    #[test]
    fn test_duplicate_listing() {
        let index = "[7400](source-7400/7400.v)\n[7400](source-7400/7400.v)\n";
        assert_eq!(
            find_index_problem(index, &paths(&["source-7400/7400.v"])),
            Some((IndexProblem::Duplicate, "source-7400/7400.v".to_string()))
        );
    }

    #[test]
    fn test_non_existent_device_listed_after_disk_problems() {
        let index = "[7499](source-7400/7499.v)\n";
        let devices = paths(&["source-7400/7400.v"]);
        assert_eq!(
            find_index_problem(index, &devices),
            Some((IndexProblem::Missing, "source-7400/7400.v".to_string()))
        );

        let index = "[7400](source-7400/7400.v)\n[7499](source-7400/7499.v)\n";
        assert_eq!(
            check_index_contents(index, &devices).summary,
            "Failed at: Non-existent device listed source-7400/7499.v"
        );
    }

    #[test]
    fn test_malformed_link_text() {
        let index = "[7402](source-7400/7400.v)\n";
        assert_eq!(
            find_index_problem(index, &paths(&["source-7400/7400.v"])),
            Some((IndexProblem::Malformed, "source-7400/7400.v".to_string()))
        );
    }

    #[test]
    fn test_lettered_devices_match_case_insensitively() {
        let index = "[74H](source-7400/74H.v)\n[74h](source-7400/74h.v)\n";
        let devices = paths(&["source-7400/74H.v", "source-7400/74h.v"]);
        assert!(check_index_contents(index, &devices).passed);
    }

    #[test]
    fn test_indexed_device_files_skip_support_trees() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for name in [
            "source-7400/7400.v",
            "source-7400/7400-tb.v",
            "includes/helper.v",
            "docs/example.v",
        ] {
            let path = root.join(name);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, "").unwrap();
        }

        let ignored: Vec<String> = DEFAULT_IGNORED_DIRS.iter().map(|d| d.to_string()).collect();
        let files = indexed_device_files(root, &ignored).unwrap();
        assert_eq!(files, vec!["source-7400/7400.v"]);
    }
}
