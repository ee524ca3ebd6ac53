use std::fmt::Write as _;

use crate::config::CONFIG_FILE;
use crate::error::Error;
use crate::scanner::ScanReport;
use crate::types::Finding;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and, where there is one,
/// how to fix it.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::InvalidConfig { path, reason } => render_invalid_config(&path.display().to_string(), reason),
        Error::UnsupportedLanguage { ext } => render_unsupported_language(ext),
        Error::TomlDe(e) => format!("\
# Error: Invalid TOML

{e}

## Fix

Check the syntax of `{CONFIG_FILE}`.
"),
        Error::ParseFailed { file, reason } => format!("\
# Error: Parse Failed

Could not parse `{}`: {reason}
", file.display()),
        Error::Io(e) => format!("\
# Error: I/O

{e}
"),
        Error::Json(e) => format!("\
# Error: JSON Serialization

{e}
"),
    }
}

fn render_invalid_config(file: &str, reason: &str) -> String {
    format!("\
# Error: Invalid Config

`{file}`: {reason}

## Fix

Every `[pages]` list needs at least one entry, and extensions keep their dot:

    [pages]
    directories = [\"resources/js/Pages\"]
    extensions = [\".vue\", \".tsx\"]
")
}

fn render_unsupported_language(ext: &str) -> String {
    format!(
        "\
# Error: Unsupported Language

No tree-sitter grammar for `.{ext}` files.

## Supported extensions

- `.php` — PHP
"
    )
}

/// One line per finding, compiler style: `file:line:column: message`.
pub fn render_finding(finding: &Finding) -> String {
    format!(
        "{}:{}:{}: {}",
        finding.file.display(),
        finding.line,
        finding.column,
        finding.message
    )
}

/// Human-readable report: findings, skipped files, and a summary line.
pub fn render_report(report: &ScanReport) -> String {
    let mut out = String::new();
    for finding in &report.findings {
        let _ = writeln!(out, "{}", render_finding(finding));
    }
    for failed in &report.failed {
        let _ = writeln!(out, "skipped {} (unreadable or unparsable)", failed.display());
    }

    if !out.is_empty() {
        out.push('\n');
    }

    let missing = report.findings.len();
    let scanned = report.scanned;
    if missing == 0 {
        let _ = writeln!(out, "All page references resolve ({scanned} files checked)");
    } else {
        let _ = writeln!(out, "{missing} missing pages ({scanned} files checked)");
    }
    out
}
