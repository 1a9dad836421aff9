//! Minimal `.editorconfig` reader for tab widths.
//!
//! Only what line-length checking needs: section globs, `root`,
//! `indent_size` and `tab_width`.

use glob::{MatchOptions, Pattern};
use std::path::Path;

use crate::files::to_slash_path;

/// Name of the editorconfig file.
pub const EDITORCONFIG_FILE: &str = ".editorconfig";

#[derive(Debug, Clone)]
struct Section {
    patterns: Vec<Pattern>,
    anchored: bool,
    indent_size: Option<usize>,
    tab_width: Option<usize>,
}

/// One parsed `.editorconfig` file.
#[derive(Debug, Clone, Default)]
pub struct EditorConfigFile {
    root: bool,
    sections: Vec<Section>,
}

impl EditorConfigFile {
    /// Parses editorconfig text.
    pub fn parse(text: &str) -> Self {
        let mut file = Self::default();

        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(glob) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let anchored = glob.contains('/');
                let glob = glob.trim_start_matches('/');
                let patterns = expand_braces(glob)
                    .iter()
                    .filter_map(|g| match Pattern::new(g) {
                        Ok(p) => Some(p),
                        Err(e) => {
                            log::warn!("ignoring editorconfig section [{}]: {}", glob, e);
                            None
                        }
                    })
                    .collect();
                file.sections.push(Section {
                    patterns,
                    anchored,
                    indent_size: None,
                    tab_width: None,
                });
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim().to_lowercase();

            match (file.sections.last_mut(), key.as_str()) {
                (None, "root") => file.root = value == "true",
                (Some(section), "indent_size") => section.indent_size = value.parse().ok(),
                (Some(section), "tab_width") => section.tab_width = value.parse().ok(),
                _ => {}
            }
        }

        file
    }

    /// Returns true if this file stops the upward search.
    pub fn is_root(&self) -> bool {
        self.root
    }

    /// Applies matching sections, in order, for `relative` (a `/`-separated
    /// path relative to this file's directory).
    fn apply(&self, relative: &str, settings: &mut TabSettings) {
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        let name = relative.rsplit('/').next().unwrap_or(relative);

        for section in &self.sections {
            let subject = if section.anchored { relative } else { name };
            if section
                .patterns
                .iter()
                .any(|p| p.matches_with(subject, options))
            {
                if section.indent_size.is_some() {
                    settings.indent_size = section.indent_size;
                }
                if section.tab_width.is_some() {
                    settings.tab_width = section.tab_width;
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct TabSettings {
    indent_size: Option<usize>,
    tab_width: Option<usize>,
}

/// Resolves the tab width for `file` from `.editorconfig` files in its
/// directory and its ancestors, up to and including `top`.
///
/// Returns `indent_size` if set, else `tab_width`, else `None`.
pub fn resolve_tab_width(file: &Path, top: &Path) -> Option<usize> {
    let mut configs = Vec::new();

    for dir in file.ancestors().skip(1) {
        let candidate = dir.join(EDITORCONFIG_FILE);
        if let Ok(text) = std::fs::read_to_string(&candidate) {
            let parsed = EditorConfigFile::parse(&text);
            let is_root = parsed.is_root();
            configs.push((dir, parsed));
            if is_root {
                break;
            }
        }
        if dir == top {
            break;
        }
    }

    let mut settings = TabSettings::default();
    for (dir, config) in configs.iter().rev() {
        if let Ok(relative) = file.strip_prefix(dir) {
            config.apply(&to_slash_path(relative), &mut settings);
        }
    }

    settings.indent_size.or(settings.tab_width)
}

/// Expands `{a,b}` alternatives; nested braces are not supported.
fn expand_braces(glob: &str) -> Vec<String> {
    let (Some(open), Some(close)) = (glob.find('{'), glob.find('}')) else {
        return vec![glob.to_string()];
    };
    if close < open {
        return vec![glob.to_string()];
    }

    let (prefix, rest) = glob.split_at(open);
    let alternatives = &rest[1..close - open];
    let suffix = &rest[close - open + 1..];

    alternatives
        .split(',')
        .flat_map(|alt| expand_braces(&format!("{}{}{}", prefix, alt, suffix)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_expand_braces() {
        assert_eq!(expand_braces("*.{v,sv}"), vec!["*.v", "*.sv"]);
        assert_eq!(expand_braces("*.v"), vec!["*.v"]);
    }

    #[test]
    fn test_indent_size_preferred_over_tab_width() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(EDITORCONFIG_FILE),
            "root = true\n\n[*]\ntab_width = 8\n\n[*.{v,sv}]\nindent_size = 4\n",
        )
        .unwrap();
        let file = dir.path().join("src/7400.v");
        assert_eq!(resolve_tab_width(&file, dir.path()), Some(4));

        let other = dir.path().join("README.md");
        assert_eq!(resolve_tab_width(&other, dir.path()), Some(8));
    }

    #[test]
    fn test_nearer_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join(EDITORCONFIG_FILE), "root = true\n[*.v]\nindent_size = 2\n")
            .unwrap();
        fs::write(dir.path().join("src").join(EDITORCONFIG_FILE), "[*.v]\nindent_size = 3\n")
            .unwrap();
        let file = dir.path().join("src/7400.v");
        assert_eq!(resolve_tab_width(&file, dir.path()), Some(3));
    }

    #[test]
    fn test_anchored_section() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(EDITORCONFIG_FILE),
            "root = true\n[src/*.v]\nindent_size = 6\n",
        )
        .unwrap();
        assert_eq!(resolve_tab_width(&dir.path().join("src/7400.v"), dir.path()), Some(6));
        assert_eq!(resolve_tab_width(&dir.path().join("lib/7400.v"), dir.path()), None);
    }

    #[test]
    fn test_no_config() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_tab_width(&dir.path().join("7400.v"), dir.path()), None);
    }
}
