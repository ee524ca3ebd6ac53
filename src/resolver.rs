//! Page name → candidate files → existence, plus project root discovery.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::ConventionTable;
use crate::fs::FileSystem;

/// File whose presence marks the top-level directory of a PHP project.
pub const ROOT_MARKER: &str = "composer.json";

/// The directory page paths are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    /// Whether the marker was found, or the path is the working-directory fallback.
    pub marker_found: bool,
    /// Absolute or working-directory-relative root path.
    pub path: PathBuf,
}

impl ProjectRoot {
    /// Walk from `start` up through its ancestors looking for `composer.json`.
    /// Falls back to `start` itself when no ancestor has one.
    pub fn discover(fs: &dyn FileSystem, start: &Path) -> Self {
        for dir in start.ancestors() {
            if fs.exists(&dir.join(ROOT_MARKER)) {
                tracing::debug!(root = %dir.display(), "found project root");
                return Self {
                    marker_found: true,
                    path: dir.to_path_buf(),
                };
            }
        }

        tracing::debug!(
            cwd = %start.display(),
            "no {ROOT_MARKER} above working directory, resolving pages relative to it"
        );
        return Self {
            marker_found: false,
            path: start.to_path_buf(),
        };
    }

    /// Discover the root from the process working directory.
    /// An unreadable working directory degrades to `.`.
    pub fn from_current_dir(fs: &dyn FileSystem) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_err| return PathBuf::from("."));
        return Self::discover(fs, &cwd);
    }
}

/// Turn `Auth.Login` or `Auth/Login` into the relative path `Auth/Login`
/// (with the platform separator). Empty segments are dropped, so `..` and
/// leading slashes cannot climb out of a page directory.
/// Returns `None` when nothing is left.
pub fn normalize_page_name(raw_name: &str) -> Option<PathBuf> {
    let path: PathBuf = raw_name
        .split(['.', '/'])
        .filter(|segment| return !segment.is_empty())
        .collect();

    if path.as_os_str().is_empty() {
        return None;
    }
    return Some(path);
}

/// Every path the page could live at, in resolution order: each directory,
/// then each extension within it. Lazy, so a hit stops generation.
pub fn candidates<'a>(
    root: &'a Path,
    raw_name: &str,
    table: &'a ConventionTable,
) -> impl Iterator<Item = PathBuf> + 'a {
    let normalized = normalize_page_name(raw_name);

    return table.directories().iter().flat_map(move |directory| {
        let base = normalized.clone();
        return table.extensions().iter().filter_map(move |extension| {
            let mut file_name = OsString::from(base.as_ref()?.as_os_str());
            file_name.push(extension);
            return Some(root.join(directory).join(file_name));
        });
    });
}

/// Whether any candidate for the page is a regular file.
/// Filesystem errors count as "not there" for that candidate only.
pub fn page_exists(fs: &dyn FileSystem, root: &Path, raw_name: &str, table: &ConventionTable) -> bool {
    return candidates(root, raw_name, table).any(|candidate| return fs.is_file(&candidate));
}
