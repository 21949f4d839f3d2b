pub mod output;

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::parser::{self, SourceLang};
use crate::report::{node_reports, Report};
use crate::TextChecker;

/// Expand the given paths into the source files to check. Directories are
/// walked honoring `.gitignore`; explicit files are kept as given.
pub fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.exists() {
            tracing::warn!("Path not found: {}", path.display());
            continue;
        }

        for entry in WalkBuilder::new(path).build() {
            match entry {
                Ok(entry) => {
                    let candidate = entry.path();
                    if candidate.is_file() && SourceLang::from_path(candidate).is_some() {
                        files.push(candidate.to_path_buf());
                    }
                }
                Err(err) => tracing::warn!("Failed to walk {}: {}", path.display(), err),
            }
        }
    }

    files.sort();
    files.dedup();
    files
}

/// Check every text unit of one file. Units are checked in source order and
/// a unit that fails is logged and skipped.
pub fn check_source(checker: &TextChecker, path: &Path, content: &str) -> Vec<Report> {
    let Some(nodes) = parser::parse_file(path, content) else {
        tracing::warn!("Unsupported file type: {}", path.display());
        return Vec::new();
    };

    let mut reports = Vec::new();
    for node in nodes.iter().filter(|n| n.is_checkable()) {
        match checker.check_text(&node.value, node.kind) {
            Ok(result) => reports.extend(node_reports(node, &result)),
            Err(err) => tracing::warn!(
                "{}: skipping text at byte {}: {}",
                path.display(),
                node.range.0,
                err
            ),
        }
    }
    reports
}
