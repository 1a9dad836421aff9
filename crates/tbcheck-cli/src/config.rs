//! Project configuration.
//!
//! Every field has a default matching the conventional library layout, so a
//! config file only needs the fields that differ. The file is looked up as
//! `--config <path>` or, failing that, `tbcheck.json` in the project root.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name picked up from the project root.
pub const DEFAULT_CONFIG_FILE: &str = "tbcheck.json";

/// Layout and limits of the library being checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Device sources, relative to the project root.
    pub source_dir: String,
    /// Directory holding the support files, relative to the project root.
    pub includes_dir: String,
    /// Support files compiled with every test bench, in order.
    pub support_files: [String; 2],
    /// Where compiled simulation artifacts go, relative to the project root.
    pub output_dir: String,
    /// Index file at the project root.
    pub index_file: String,
    /// Top-level directories skipped when collecting indexed devices.
    pub index_ignored_dirs: Vec<String>,
    /// Maximum source line length.
    pub max_line_length: usize,
    /// Tab width when no `.editorconfig` applies.
    pub default_tab_width: usize,
    /// File names skipped by the line-length check.
    pub line_length_excluded: Vec<String>,
    /// Explicit `iverilog` executable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iverilog: Option<PathBuf>,
    /// Explicit `vvp` executable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vvp: Option<PathBuf>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            source_dir: "source-7400".to_string(),
            includes_dir: "includes".to_string(),
            support_files: ["helper.v".to_string(), "tbhelper.v".to_string()],
            output_dir: "target/tbcheck".to_string(),
            index_file: tbcheck_lint::index::DEFAULT_INDEX_FILE.to_string(),
            index_ignored_dirs: tbcheck_lint::index::DEFAULT_IGNORED_DIRS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            max_line_length: tbcheck_lint::line_length::DEFAULT_MAX_LINE_LENGTH,
            default_tab_width: tbcheck_lint::line_length::DEFAULT_TAB_WIDTH,
            line_length_excluded: tbcheck_lint::line_length::DEFAULT_EXCLUDED_FILES
                .iter()
                .map(|f| f.to_string())
                .collect(),
            iverilog: None,
            vvp: None,
        }
    }
}

impl CheckConfig {
    /// Parse a config from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Loads `explicit` if given, else `tbcheck.json` under `root` if it
    /// exists, else the defaults.
    pub fn load(explicit: Option<&str>, root: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(Path::new(path));
        }

        let discovered = root.join(DEFAULT_CONFIG_FILE);
        if discovered.is_file() {
            log::debug!("using config {}", discovered.display());
            return Self::from_file(&discovered);
        }

        Ok(Self::default())
    }

    /// Absolute paths of the support files under `root`.
    pub fn support_paths(&self, root: &Path) -> [PathBuf; 2] {
        let includes = root.join(&self.includes_dir);
        [
            includes.join(&self.support_files[0]),
            includes.join(&self.support_files[1]),
        ]
    }
}
