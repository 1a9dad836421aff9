//! Line-lengths command implementation

use anyhow::Result;
use std::path::PathBuf;
use std::process::ExitCode;

use tbcheck_lint::{line_length_files, tb_assert_exemption, LineLengthCheck};

use super::index::emit;
use super::resolve_root;
use crate::config::CheckConfig;

/// Run the line-lengths command
///
/// `source` overrides the configured source directory. A source outside the
/// project root is checked on its own, with paths reported relative to it.
///
/// # Returns
/// Exit code: 0 if no line is over the limit, 1 otherwise
pub fn run(
    root: Option<&str>,
    source: Option<&str>,
    config_path: Option<&str>,
    json: bool,
) -> Result<ExitCode> {
    let root = resolve_root(root)?;
    let config = CheckConfig::load(config_path, &root)?;

    let source_dir = match source {
        Some(dir) => resolve_root(Some(dir))?,
        None => root.join(&config.source_dir),
    };
    let base: PathBuf = if source_dir.starts_with(&root) {
        root
    } else {
        source_dir.clone()
    };

    let files = line_length_files(&base, &source_dir, &config.line_length_excluded)?;
    log::debug!("checking {} files under {}", files.len(), source_dir.display());

    let report = LineLengthCheck::new(config.max_line_length)
        .default_tab_width(config.default_tab_width)
        .with_filter(tb_assert_exemption())
        .check(&base, &files)?;
    emit(&report, json)
}
