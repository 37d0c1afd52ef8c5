//! Diagnostic formatting: human-readable and JSON (NDJSON) modes.
//!
//! - **Human mode** (default): one line per [`FieldDiagnostic`] on stderr,
//!   color-coded by severity. Colors are off when `--no-color` is set, when
//!   `NO_COLOR` is present (per <https://no-color.org>), or when stderr is
//!   not a TTY.
//! - **JSON mode**: each diagnostic is a single-line JSON object (NDJSON) on
//!   stderr.
//!
//! Both modes honour **quiet** (warnings and the summary are dropped) and
//! **verbose** (timing lines are added).
use std::io::{IsTerminal as _, Write};
use std::time::Duration;

use vigiapp_core::{FieldDiagnostic, Severity};

/// Returns `true` if ANSI color codes should be emitted to stderr.
pub fn colors_enabled(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stderr().is_terminal()
}

const ANSI_RED: &str = "\x1b[31m";
const ANSI_YELLOW: &str = "\x1b[33m";
const ANSI_RESET: &str = "\x1b[0m";

/// Configuration for the diagnostic formatter, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Whether ANSI colors are enabled.
    pub colors: bool,
    /// Suppress all non-error stderr output.
    pub quiet: bool,
    /// Emit timing to stderr.
    pub verbose: bool,
}

impl FormatterConfig {
    /// Constructs a [`FormatterConfig`] from the raw CLI flags.
    pub fn from_flags(no_color_flag: bool, quiet: bool, verbose: bool) -> Self {
        Self {
            colors: colors_enabled(no_color_flag),
            quiet,
            verbose,
        }
    }
}

// ---------------------------------------------------------------------------
// Human mode
// ---------------------------------------------------------------------------

/// Writes one diagnostic as
/// `[E] checksum-mismatch  cpf: CPF inválido`.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_diagnostic_human<W: Write>(
    writer: &mut W,
    diag: &FieldDiagnostic,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet && diag.severity == Severity::Warning {
        return Ok(());
    }

    let (tag, color) = match diag.severity {
        Severity::Error => ("[E]", ANSI_RED),
        Severity::Warning => ("[W]", ANSI_YELLOW),
    };
    let code = diag.reason.code();

    if config.colors {
        writeln!(
            writer,
            "{color}{tag}{ANSI_RESET} {code}  {field}: {message}",
            field = diag.field,
            message = diag.message,
        )
    } else {
        writeln!(
            writer,
            "{tag} {code}  {field}: {message}",
            field = diag.field,
            message = diag.message,
        )
    }
}

/// Writes `3 errors, 1 warning`. Suppressed in quiet mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_summary_human<W: Write>(
    writer: &mut W,
    errors: usize,
    warnings: usize,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    writeln!(
        writer,
        "{errors} {}, {warnings} {}",
        pluralize(errors, "error", "errors"),
        pluralize(warnings, "warning", "warnings"),
    )
}

/// Writes `label in Nms` when verbose.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_timing_human<W: Write>(
    writer: &mut W,
    label: &str,
    duration: Duration,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if !config.verbose {
        return Ok(());
    }
    writeln!(writer, "{label} in {}ms", duration.as_millis())
}

// ---------------------------------------------------------------------------
// JSON mode (NDJSON)
// ---------------------------------------------------------------------------

/// Writes one diagnostic as a NDJSON line:
/// `{"field":"cpf","kind":"personal-id","message":"CPF inválido","reason":"checksum-mismatch","severity":"error"}`
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_diagnostic_json<W: Write>(
    writer: &mut W,
    diag: &FieldDiagnostic,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet && diag.severity == Severity::Warning {
        return Ok(());
    }

    let severity_str = match diag.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };

    let line = serde_json::json!({
        "reason": diag.reason.code(),
        "severity": severity_str,
        "field": diag.field,
        "kind": diag.kind.code(),
        "message": diag.message,
    });
    writeln!(writer, "{line}")
}

/// Writes `{"summary":{"errors":3,"warnings":1}}`. Suppressed in quiet mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_summary_json<W: Write>(
    writer: &mut W,
    errors: usize,
    warnings: usize,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    writeln!(
        writer,
        r#"{{"summary":{{"errors":{errors},"warnings":{warnings}}}}}"#,
    )
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Output format selection, mirroring the CLI `--format` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    /// Human-readable, optionally colored output.
    Human,
    /// Structured NDJSON output.
    Json,
}

impl From<crate::OutputFormat> for FormatMode {
    fn from(f: crate::OutputFormat) -> Self {
        match f {
            crate::OutputFormat::Human => Self::Human,
            crate::OutputFormat::Json => Self::Json,
        }
    }
}

/// Writes a single diagnostic in the requested format.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_diagnostic<W: Write>(
    writer: &mut W,
    diag: &FieldDiagnostic,
    mode: FormatMode,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    match mode {
        FormatMode::Human => write_diagnostic_human(writer, diag, config),
        FormatMode::Json => write_diagnostic_json(writer, diag, config),
    }
}

/// Writes a summary in the requested format.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_summary<W: Write>(
    writer: &mut W,
    errors: usize,
    warnings: usize,
    mode: FormatMode,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    match mode {
        FormatMode::Human => write_summary_human(writer, errors, warnings, config),
        FormatMode::Json => write_summary_json(writer, errors, warnings, config),
    }
}

fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}
