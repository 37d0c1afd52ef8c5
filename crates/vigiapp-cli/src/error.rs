//! CLI error types with associated exit codes.
//!
//! [`CliError`] is the top-level error type for the `vigiapp` binary. Every
//! variant maps to a stable exit code (1 or 2) via [`CliError::exit_code`]:
//!
//! - Exit code **2**: the tool could not read or parse its input, or could
//!   not reach the lookup service. Nothing was judged.
//! - Exit code **1**: the tool ran to completion and the answer is "no":
//!   an invalid value, a form that may not be submitted, or no record.
use std::fmt;
use std::path::PathBuf;

use crate::lookup_client::LookupError;

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// All error conditions that the `vigiapp` CLI can produce.
///
/// Use [`CliError::exit_code`] to obtain the exit code associated with each
/// variant. [`CliError::message`] returns the line printed to stderr before
/// exiting.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read a file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input exceeds the configured `--max-file-size` limit.
    FileTooLarge {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The configured size limit in bytes.
        limit: u64,
        /// The actual size in bytes; unknown for stdin.
        actual: Option<u64>,
    },

    /// The input bytes are not valid UTF-8.
    InvalidUtf8 {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The byte offset of the first invalid byte sequence.
        byte_offset: usize,
    },

    /// An I/O error occurred while reading from stdin.
    StdinReadError {
        /// The underlying I/O error message.
        detail: String,
    },

    /// A generic I/O error not covered by the more specific variants above.
    IoError {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// The input is not a well-formed form document.
    ParseFailed {
        /// The parser's description of the problem.
        detail: String,
    },

    /// A `lookup` argument is not a complete, valid identity number.
    InvalidIdentity {
        /// `"CPF"` or `"CNPJ"`.
        label: &'static str,
        /// Why the number was rejected.
        detail: String,
    },

    /// The lookup service could not be reached or answered garbage.
    Lookup(LookupError),

    // --- Exit code 1: logical failures ---
    /// `validate` rejected the value. The diagnostic has already been
    /// printed.
    InvalidValue,

    /// `check` found at least one blocking field. The diagnostics have
    /// already been printed.
    SubmitBlocked {
        /// Number of blocking fields.
        errors: usize,
    },

    /// The lookup service has no record for the number.
    RecordNotFound {
        /// Request path that was tried.
        path: String,
    },
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::InvalidUtf8 { .. }
            | Self::StdinReadError { .. }
            | Self::IoError { .. }
            | Self::ParseFailed { .. }
            | Self::InvalidIdentity { .. }
            | Self::Lookup(_) => 2,

            Self::InvalidValue | Self::SubmitBlocked { .. } | Self::RecordNotFound { .. } => 1,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: Some(actual),
            } => {
                format!("error: file too large: {source} is {actual} bytes, limit is {limit} bytes")
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: None,
            } => {
                format!("error: file too large: {source} exceeded limit of {limit} bytes")
            }
            Self::InvalidUtf8 {
                source,
                byte_offset,
            } => {
                format!(
                    "error: invalid UTF-8 in {source}: first invalid byte at offset {byte_offset}"
                )
            }
            Self::StdinReadError { detail } => {
                format!("error: failed to read stdin: {detail}")
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error reading {source}: {detail}")
            }
            Self::ParseFailed { detail } => {
                format!("error: not a form document: {detail}")
            }
            Self::InvalidIdentity { label, detail } => {
                format!("error: invalid {label}: {detail}")
            }
            Self::Lookup(e) => format!("error: lookup failed: {e}"),
            Self::InvalidValue => "error: value rejected".to_owned(),
            Self::SubmitBlocked { errors } => {
                format!("error: form blocked by {errors} invalid field(s)")
            }
            Self::RecordNotFound { path } => {
                format!("error: no record found at {path}")
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

impl From<LookupError> for CliError {
    fn from(e: LookupError) -> Self {
        Self::Lookup(e)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
