//! Core CLI commands for pagecheck: check, resolve, fingerprint.

use std::process::ExitCode;
use std::sync::Arc;

use crate::config::Config;
use crate::diagnostics;
use crate::error;
use crate::fingerprint;
use crate::fs::{FileSystem as _, RealFs};
use crate::resolver::{self, ProjectRoot};
use crate::rule::PageExistsRule;
use crate::scanner;

/// Locate the project root from the working directory and load its config.
///
/// # Errors
///
/// Returns config loading errors.
fn load_project() -> Result<(ProjectRoot, Config), error::Error> {
    let root = ProjectRoot::from_current_dir(&RealFs);
    if !root.marker_found {
        tracing::warn!(
            root = %root.path.display(),
            "no {} found, resolving pages relative to the working directory",
            resolver::ROOT_MARKER
        );
    }
    let config = Config::load(&root.path)?;
    return Ok((root, config));
}

/// Scan every PHP file in the project and report missing pages.
/// Exits 1 if any page reference is unresolved, 0 otherwise.
///
/// # Errors
///
/// Returns errors from config loading or JSON serialization.
pub fn check(json: bool) -> Result<ExitCode, error::Error> {
    let (root, config) = load_project()?;
    let rule = PageExistsRule::new(
        Arc::new(RealFs),
        root.clone(),
        config.pages.clone(),
        config.calls.clone(),
    );

    let report = scanner::scan(&root.path, &config, &rule);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", diagnostics::render_report(&report));
    }

    if report.findings.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }
    return Ok(ExitCode::from(1));
}

/// Explain how one page name resolves: every candidate path and whether it exists.
/// Exits 0 if the page exists, 1 if it does not.
///
/// # Errors
///
/// Returns errors from config loading.
pub fn resolve(name: &str) -> Result<ExitCode, error::Error> {
    let (root, config) = load_project()?;

    let Some(normalized) = resolver::normalize_page_name(name) else {
        println!("`{name}` names no page");
        return Ok(ExitCode::from(1));
    };
    println!("{name} -> {}", normalized.display());

    let mut found = false;
    for candidate in resolver::candidates(&root.path, name, &config.pages) {
        let exists = RealFs.is_file(&candidate);
        found |= exists;
        let mark = if exists { "found  " } else { "missing" };
        let shown = candidate.strip_prefix(&root.path).unwrap_or(&candidate);
        println!("  {mark} {}", shown.display());
    }

    if found {
        return Ok(ExitCode::SUCCESS);
    }
    println!();
    println!("Page \"{name}\" does not exist on disk.");
    return Ok(ExitCode::from(1));
}

/// Print the page-directory cache fingerprint as `key hash`, or as JSON.
///
/// # Errors
///
/// Returns errors from config loading or JSON serialization.
pub fn fingerprint(json: bool) -> Result<(), error::Error> {
    let (root, config) = load_project()?;
    let meta = fingerprint::fingerprint(&RealFs, &root.path, &config.pages);

    if json {
        println!("{}", serde_json::to_string(&meta)?);
    } else {
        println!("{} {}", meta.key, meta.hash);
    }
    return Ok(());
}
