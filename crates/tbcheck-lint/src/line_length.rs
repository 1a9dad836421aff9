//! Maximum line length check for Verilog sources.
//!
//! Tabs are expanded to the tab width configured for the file before
//! measuring. The check stops at the first file containing over-long lines
//! and reports every such line of that file.

use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use crate::editorconfig::resolve_tab_width;
use crate::error::{LintError, LintResult};
use crate::files::{file_name, verilog_files};
use crate::report::{CheckReport, LineDiagnostic};

/// Default maximum line length.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 100;

/// Tab width used when no `.editorconfig` applies.
pub const DEFAULT_TAB_WIDTH: usize = 2;

/// Shared sources that are not checked.
pub const DEFAULT_EXCLUDED_FILES: &[&str] = &["helper.v", "tbhelper.v"];

/// Decides whether a line of a file is exempt from the limit. Receives the
/// file's root-relative path and the raw line.
pub type LineFilter = Box<dyn Fn(&str, &str) -> bool>;

fn tb_assert_regex() -> &'static Regex {
    static TB_ASSERT: OnceLock<Regex> = OnceLock::new();
    TB_ASSERT.get_or_init(|| Regex::new(r"^\s+(tbassert|case_tbassert)").expect("valid regex"))
}

/// Exempts indented `tbassert`/`case_tbassert` lines in test benches, whose
/// messages are long by nature.
pub fn tb_assert_exemption() -> LineFilter {
    Box::new(|path: &str, line: &str| path.contains("-tb") && tb_assert_regex().is_match(line))
}

/// First file found with over-long lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineLengthViolation {
    /// Root-relative path of the file.
    pub path: String,
    /// Every over-long line of the file.
    pub lines: Vec<LineDiagnostic>,
}

/// Line length checker.
pub struct LineLengthCheck {
    limit: usize,
    default_tab_width: usize,
    file_type_name: String,
    filters: Vec<LineFilter>,
}

impl LineLengthCheck {
    /// Creates a checker with `limit` and no exemptions.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            default_tab_width: DEFAULT_TAB_WIDTH,
            file_type_name: "Verilog".to_string(),
            filters: Vec::new(),
        }
    }

    /// Sets the fallback tab width.
    pub fn default_tab_width(mut self, width: usize) -> Self {
        self.default_tab_width = width;
        self
    }

    /// Sets the file type named in the passing summary.
    pub fn file_type_name(mut self, name: impl Into<String>) -> Self {
        self.file_type_name = name.into();
        self
    }

    /// Adds a line exemption.
    pub fn with_filter(mut self, filter: LineFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Returns the configured limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Checks `files` (paths relative to `root`) and returns the verdict.
    pub fn check(&self, root: &Path, files: &[String]) -> LintResult<CheckReport> {
        Ok(match self.find_violation(root, files)? {
            Some(violation) => {
                CheckReport::failed(&violation.path).with_diagnostics(violation.lines)
            }
            None => CheckReport::passed(format_args!(
                "Line lengths {} {} files",
                files.len(),
                self.file_type_name
            )),
        })
    }

    /// Returns the first file with over-long lines, if any.
    pub fn find_violation(
        &self,
        root: &Path,
        files: &[String],
    ) -> LintResult<Option<LineLengthViolation>> {
        let mut tab_widths: HashMap<String, usize> = HashMap::new();

        for relative in files {
            let path = root.join(relative);
            let text = std::fs::read_to_string(&path).map_err(|source| LintError::Read {
                path: path.clone(),
                source,
            })?;

            let extension = Path::new(relative)
                .extension()
                .map(|e| e.to_string_lossy().to_string())
                .unwrap_or_default();
            let tab_width = *tab_widths.entry(extension).or_insert_with(|| {
                resolve_tab_width(&path, root).unwrap_or(self.default_tab_width)
            });

            let lines = self.long_lines(relative, &text, tab_width);
            if !lines.is_empty() {
                log::debug!("{}: {} lines over {}", relative, lines.len(), self.limit);
                return Ok(Some(LineLengthViolation {
                    path: relative.clone(),
                    lines,
                }));
            }
        }

        Ok(None)
    }

    fn long_lines(&self, relative: &str, text: &str, tab_width: usize) -> Vec<LineDiagnostic> {
        let tab_spaces = " ".repeat(tab_width);

        text.lines()
            .enumerate()
            .filter(|(_, line)| !self.filters.iter().any(|f| f(relative, *line)))
            .filter_map(|(i, line)| {
                let expanded = line.replace('\t', &tab_spaces);
                if expanded.chars().count() > self.limit {
                    Some(LineDiagnostic {
                        line: i + 1,
                        text: expanded.chars().take(self.limit).collect(),
                    })
                } else {
                    None
                }
            })
            .collect()
    }
}

impl std::fmt::Debug for LineLengthCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineLengthCheck")
            .field("limit", &self.limit)
            .field("default_tab_width", &self.default_tab_width)
            .field("file_type_name", &self.file_type_name)
            .field("filters", &self.filters.len())
            .finish()
    }
}

/// Lists the Verilog sources under `source_dir` to check, relative to
/// `root`, skipping files named in `excluded`.
pub fn line_length_files(
    root: &Path,
    source_dir: &Path,
    excluded: &[String],
) -> LintResult<Vec<String>> {
    verilog_files(root, source_dir, |path| {
        let name = file_name(path);
        excluded.iter().any(|e| e == name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn write(root: &Path, relative: &str, text: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    #[test]
    fn test_short_lines_pass() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "src/7400.v", "module ttl_7400;\nendmodule\n");
        write(dir.path(), "src/7402.v", "module ttl_7402;\nendmodule\n");

        let files = vec!["src/7400.v".to_string(), "src/7402.v".to_string()];
        let report = LineLengthCheck::new(20).check(dir.path(), &files).unwrap();
        assert!(report.passed);
        assert_eq!(report.summary, "Passed: Line lengths 2 Verilog files");
    }

    #[test]
    fn test_reports_every_long_line_of_first_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "src/7400.v", "short\nthis line is too long\nok\nalso far too long\n");
        write(dir.path(), "src/7402.v", "this line is too long as well\n");

        let files = vec!["src/7400.v".to_string(), "src/7402.v".to_string()];
        let report = LineLengthCheck::new(10).check(dir.path(), &files).unwrap();
        assert!(!report.passed);
        assert_eq!(report.summary, "Failed at: src/7400.v");
        assert_eq!(
            report.diagnostics,
            vec![
                LineDiagnostic {
                    line: 2,
                    text: "this line ".to_string(),
                },
                LineDiagnostic {
                    line: 4,
                    text: "also far t".to_string(),
                },
            ]
        );
        assert_eq!(report.diagnostics[0].to_string(), "Line 2 this line ");
    }

    #[test]
    fn test_tabs_expand_to_default_width() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "7400.v", "\t\tabcdef\n");
        let files = vec!["7400.v".to_string()];

        let check = LineLengthCheck::new(10).default_tab_width(2);
        assert!(check.check(dir.path(), &files).unwrap().passed);

        let check = LineLengthCheck::new(10).default_tab_width(4);
        assert!(!check.check(dir.path(), &files).unwrap().passed);
    }

    #[test]
    fn test_tab_width_from_editorconfig() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), ".editorconfig", "root = true\n[*.v]\nindent_size = 4\n");
        write(dir.path(), "7400.v", "\tabcdef\n");
        let files = vec!["7400.v".to_string()];

        let check = LineLengthCheck::new(9);
        let report = check.check(dir.path(), &files).unwrap();
        assert_eq!(report.diagnostics[0].text, "    abcde");
    }

    #[test]
    fn test_tb_assert_lines_exempt_only_in_test_benches() {
        let dir = tempfile::tempdir().unwrap();
        let long_assert = format!("  tbassert(Y == 1'b0, \"{}\");\n", "x".repeat(40));
        write(dir.path(), "7400-tb.v", &long_assert);
        write(dir.path(), "7400.v", &long_assert);

        let check = LineLengthCheck::new(30).with_filter(tb_assert_exemption());
        let tb_only = vec!["7400-tb.v".to_string()];
        assert!(check.check(dir.path(), &tb_only).unwrap().passed);

        let device = vec!["7400.v".to_string()];
        assert!(!check.check(dir.path(), &device).unwrap().passed);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec!["absent.v".to_string()];
        let err = LineLengthCheck::new(100)
            .check(dir.path(), &files)
            .unwrap_err();
        assert!(matches!(err, LintError::Read { .. }));
    }

    #[test]
    fn test_line_length_files_skip_helpers() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["src/7400.v", "src/helper.v", "src/tbhelper.v", "src/7400-tb.v"] {
            write(dir.path(), name, "");
        }
        let excluded: Vec<String> = DEFAULT_EXCLUDED_FILES.iter().map(|s| s.to_string()).collect();
        let files = line_length_files(dir.path(), &dir.path().join("src"), &excluded).unwrap();
        assert_eq!(files, vec!["src/7400-tb.v", "src/7400.v"]);
    }
}
