/// Crate-level error types for pagecheck diagnostics.
use std::path::PathBuf;

/// Errors raised by the host layer: config loading, source reading, parsing.
///
/// The rule itself never produces one of these. A missing page is a
/// [`Diagnostic`](crate::types::Diagnostic), and a filesystem failure while
/// probing candidates is a negative answer, not an error.
#[allow(clippy::error_impl_error, reason = "crate-wide error type")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A config file exists but its contents violate a constraint.
    #[error("invalid config {}: {reason}", path.display())]
    InvalidConfig {
        /// Config file that failed validation.
        path: PathBuf,
        /// Which constraint was violated.
        reason: String,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON serialization of a report failed.
    #[error("json: {0}")]
    Json(
        /// The wrapped JSON error.
        #[from]
        serde_json::Error,
    ),

    /// Tree-sitter failed to parse a source file.
    #[error("parse failed: {}: {reason}", file.display())]
    ParseFailed {
        /// File that failed to parse.
        file: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// No tree-sitter grammar registered for this file extension.
    #[error("no grammar for extension: .{ext}")]
    UnsupportedLanguage {
        /// File extension without the leading dot.
        ext: String,
    },
}
