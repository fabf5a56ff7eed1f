//! Sorted, gitignore-aware file discovery.

use std::path::{Path, PathBuf};

use globset::GlobSet;
use ignore::{DirEntry, WalkBuilder};

/// Every file under `dir` accepted by `keep`, in path order.
///
/// `exclude` globs are matched against the path relative to `root`. A missing
/// directory yields no files. Entries the walker cannot read are skipped with
/// a warning and the rest of the tree is still listed.
#[must_use]
pub fn files_under(
    dir: &Path,
    root: &Path,
    exclude: &GlobSet,
    keep: impl Fn(&Path) -> bool,
) -> Vec<PathBuf> {
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "directory not present, nothing to scan");
        return Vec::new();
    }

    let mut builder = WalkBuilder::new(dir);
    builder.sort_by_file_name(std::cmp::Ord::cmp);
    builder.filter_entry(|entry| {
        let name = entry.file_name().to_string_lossy();
        !(name == fdl_config::PROJECT_DIR && entry.file_type().is_some_and(|ft| ft.is_dir()))
    });

    collect(builder.build(), root, exclude, keep)
}

fn collect(
    entries: impl IntoIterator<Item = Result<DirEntry, ignore::Error>>,
    root: &Path,
    exclude: &GlobSet,
    keep: impl Fn(&Path) -> bool,
) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                tracing::warn!(%error, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.into_path();
        let relative = path.strip_prefix(root).unwrap_or(&path);
        if exclude.is_match(relative) || exclude.is_match(&path) {
            tracing::trace!(path = %path.display(), "excluded by glob");
            continue;
        }
        if keep(&path) {
            files.push(path);
        }
    }
    files
}

/// Whether `path` has the given extension (case-insensitive).
#[must_use]
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .is_some_and(|e| e.to_string_lossy().eq_ignore_ascii_case(extension))
}
