use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::error::Error;
use crate::grammar;
use crate::rule::PageExistsRule;
use crate::syntax;
use crate::types::Finding;

/// Directories that hold third-party or generated code and are never scanned.
const SKIPPED_DIRECTORIES: &[&str] = &["vendor", "node_modules"];

/// Outcome of checking every PHP file in a project.
#[derive(Debug, Default, serde::Serialize)]
pub struct ScanReport {
    /// PHP files that could not be read or parsed and were skipped.
    pub failed: Vec<PathBuf>,
    /// Missing-page diagnostics, sorted by file and position.
    pub findings: Vec<Finding>,
    /// Number of PHP files checked.
    pub scanned: usize,
}

/// Check every PHP file under `root` against the rule.
/// Applies the config's include/exclude filters to relative paths. Files are
/// checked in parallel; a file that fails to read or parse is skipped with a
/// warning and listed in the report, never aborting the scan.
pub fn scan(root: &Path, config: &Config, rule: &PageExistsRule) -> ScanReport {
    let files = discover_php_files(root, config);
    tracing::debug!(files = files.len(), root = %root.display(), "scanning PHP sources");

    let results: Vec<(PathBuf, Result<Vec<Finding>, Error>)> = files
        .into_par_iter()
        .map(|relative| {
            let outcome = check_file(root, &relative, rule);
            return (relative, outcome);
        })
        .collect();

    let mut report = ScanReport::default();
    for (relative, outcome) in results {
        match outcome {
            Err(e) => {
                tracing::warn!(file = %relative.display(), error = %e, "skipping file");
                report.failed.push(relative);
            },
            Ok(findings) => {
                report.scanned = report.scanned.saturating_add(1);
                report.findings.extend(findings);
            },
        }
    }

    report.findings.sort();
    report.failed.sort();
    return report;
}

/// Check one PHP source text. `relative` is only used to label findings.
///
/// # Errors
///
/// Returns `Error::UnsupportedLanguage` for non-PHP paths, or
/// `Error::ParseFailed` if tree-sitter cannot parse the source.
pub fn check_source(relative: &Path, source: &str, rule: &PageExistsRule) -> Result<Vec<Finding>, Error> {
    let language = grammar::language_for_path(relative)?;
    let tree = syntax::parse_source(relative, source, &language)?;

    let findings = syntax::collect_calls(tree.root_node(), source)
        .iter()
        .flat_map(|call| return rule.process_node(call))
        .map(|diagnostic| {
            return Finding {
                column: diagnostic.node.column.saturating_add(1),
                file: relative.to_path_buf(),
                line: diagnostic.node.row.saturating_add(1),
                message: diagnostic.message,
            };
        })
        .collect();

    return Ok(findings);
}

/// Read and check one file.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read, or any error from [`check_source`].
fn check_file(root: &Path, relative: &Path, rule: &PageExistsRule) -> Result<Vec<Finding>, Error> {
    let source = std::fs::read_to_string(root.join(relative))?;
    return check_source(relative, &source, rule);
}

/// All `.php` files under `root`, as root-relative paths, in walk order.
fn discover_php_files(root: &Path, config: &Config) -> Vec<PathBuf> {
    return WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| return !is_skipped_directory(e))
        .filter_map(Result::ok)
        .filter(|e| return e.file_type().is_file())
        .filter(|e| return e.path().extension().is_some_and(|ext| return ext == "php"))
        .filter_map(|e| {
            let relative = e.path().strip_prefix(root).unwrap_or(e.path()).to_path_buf();
            let relative_str = relative.to_string_lossy().replace('\\', "/");
            return config.should_scan(&relative_str).then_some(relative);
        })
        .collect();
}

/// Hidden directories and dependency directories below the root.
fn is_skipped_directory(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    return name.starts_with('.') || SKIPPED_DIRECTORIES.iter().any(|skipped| return name == *skipped);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::{CallPatterns, ConventionTable};
    use crate::fs::{MemoryFs, RealFs};
    use crate::resolver::ProjectRoot;

    fn memory_rule() -> PageExistsRule {
        let fs = MemoryFs::new()
            .with_file("/app/composer.json", 1)
            .with_file("/app/resources/js/Pages/Dashboard.vue", 1)
            .with_file("/app/resources/js/Pages/Auth/Login.vue", 1);
        let root = ProjectRoot::discover(&fs, Path::new("/app"));
        PageExistsRule::new(Arc::new(fs), root, ConventionTable::default(), CallPatterns::default())
    }

    const CONTROLLER: &str = r#"<?php

namespace App\Http\Controllers;

use Inertia\Inertia;

class ExampleController extends Controller
{
    public function dashboard()
    {
        return Inertia::render('Dashboard');
    }

    public function profile()
    {
        return Inertia::render('Profile/Edit');
    }

    public function login()
    {
        return inertia('Auth/Login');
    }

    public function settings()
    {
        return $this->inertia('Settings/Index');
    }

    public function dynamic(string $page)
    {
        return Inertia::render($page);
    }
}
"#;

    #[test]
    fn controller_reports_each_missing_page_with_location() {
        let findings = check_source(Path::new("app/Http/Controllers/ExampleController.php"), CONTROLLER, &memory_rule()).unwrap();
        let summary: Vec<(usize, usize, &str)> = findings
            .iter()
            .map(|f| (f.line, f.column, f.message.as_str()))
            .collect();
        assert_eq!(
            summary,
            [
                (16, 16, "Page \"Profile/Edit\" does not exist on disk."),
                (26, 16, "Page \"Settings/Index\" does not exist on disk."),
            ]
        );
    }

    #[test]
    fn non_php_path_is_rejected() {
        let err = check_source(Path::new("routes/web.txt"), "<?php", &memory_rule()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedLanguage { .. }));
    }

    #[test]
    fn scan_skips_vendor_and_honours_excludes() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::write(root.join("composer.json"), "{}").unwrap();
        std::fs::create_dir_all(root.join("app/Legacy")).unwrap();
        std::fs::create_dir_all(root.join("vendor/inertiajs")).unwrap();
        std::fs::create_dir_all(root.join("routes")).unwrap();
        std::fs::write(root.join("routes/web.php"), "<?php Route::inertia('/', 'Welcome');").unwrap();
        std::fs::write(root.join("app/Legacy/Old.php"), "<?php inertia('Old');").unwrap();
        std::fs::write(root.join("vendor/inertiajs/X.php"), "<?php inertia('Vendor');").unwrap();

        let config = Config::parse("exclude = [\"app/Legacy/\"]").unwrap();
        let rule = PageExistsRule::new(
            Arc::new(RealFs),
            ProjectRoot::discover(&RealFs, root),
            config.pages.clone(),
            config.calls.clone(),
        );
        let report = scan(root, &config, &rule);

        assert_eq!(report.scanned, 1);
        assert!(report.failed.is_empty());
        assert_eq!(report.findings.len(), 1);
        let finding = report.findings.first().unwrap();
        assert_eq!(finding.file, Path::new("routes").join("web.php"));
        assert_eq!(finding.message, "Page \"Welcome\" does not exist on disk.");
    }

    #[test]
    fn unreadable_file_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::write(root.join("bad.php"), [0xff_u8, 0xfe, 0x00]).unwrap();
        std::fs::write(root.join("good.php"), "<?php inertia('Gone');").unwrap();

        let config = Config::default();
        let rule = PageExistsRule::new(
            Arc::new(RealFs),
            ProjectRoot::discover(&RealFs, root),
            config.pages.clone(),
            config.calls.clone(),
        );
        let report = scan(root, &config, &rule);

        assert_eq!(report.failed, [PathBuf::from("bad.php")]);
        assert_eq!(report.scanned, 1);
        assert_eq!(report.findings.len(), 1);
    }
}
