//! Enumeration of device files under a devices root.

use std::path::Path;
use walkdir::WalkDir;

use crate::device::TEST_BENCH_SUFFIX;
use crate::error::{BenchError, BenchResult};

/// Lists every `*.v` file under `devices_root` except test benches, as
/// `/`-separated paths relative to the root, sorted.
pub fn device_worklist(devices_root: &Path) -> BenchResult<Vec<String>> {
    let mut worklist = Vec::new();

    for entry in WalkDir::new(devices_root).sort_by_file_name() {
        let entry = entry.map_err(|source| BenchError::Walk {
            path: devices_root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(devices_root) else {
            continue;
        };
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if relative.ends_with(".v") && !relative.ends_with(TEST_BENCH_SUFFIX) {
            worklist.push(relative);
        }
    }

    worklist.sort();
    Ok(worklist)
}
