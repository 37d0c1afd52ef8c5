//! Implementation of `vigiapp validate <KIND> <VALUE> [--required]`.
//!
//! Exit codes:
//! - 0 = valid, or empty / incomplete on an optional field (a warning is
//!   still printed for the incomplete case)
//! - 1 = rejected
use std::io::Write as _;

use vigiapp_core::form::diagnose;
use vigiapp_core::{FieldKind, FieldSpec, FieldVerdict, Severity, check_field, format_canonical};

use crate::OutputFormat;
use crate::cmd::write_failed;
use crate::error::CliError;
use crate::format::{FormatMode, FormatterConfig, write_diagnostic};

/// Runs the `validate` command.
///
/// Writes at most one diagnostic to stderr. A valid value's stored form is
/// printed on stdout (`{"kind":..,"value":..}` in JSON mode).
///
/// # Errors
///
/// [`CliError::InvalidValue`] (exit code 1) when the value is rejected.
pub fn run(
    kind: FieldKind,
    value: &str,
    required: bool,
    format: &OutputFormat,
    quiet: bool,
    verbose: bool,
    no_color: bool,
) -> Result<(), CliError> {
    let spec = FieldSpec::new(kind.code(), kind, required);
    let verdict = check_field(&spec, value);
    let diagnostic = diagnose(&spec, verdict);

    let mode = FormatMode::from(*format);
    let fmt_config = FormatterConfig::from_flags(no_color, quiet, verbose);

    if let Some(diag) = &diagnostic {
        let stderr = std::io::stderr();
        let mut err_out = stderr.lock();
        write_diagnostic(&mut err_out, diag, mode, &fmt_config)
            .map_err(|e| write_failed("stderr", &e))?;
        if diag.severity == Severity::Error {
            return Err(CliError::InvalidValue);
        }
    }

    if verdict == FieldVerdict::Valid {
        let stored = format_canonical(kind, value.trim());
        let line = match format {
            OutputFormat::Human => stored,
            OutputFormat::Json => {
                serde_json::json!({ "kind": kind.code(), "value": stored }).to_string()
            }
        };
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        writeln!(out, "{line}").map_err(|e| write_failed("stdout", &e))?;
    }
    Ok(())
}
