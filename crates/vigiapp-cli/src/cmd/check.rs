//! Implementation of `vigiapp check <FILE|->`.
//!
//! Reads a form document and checks every masked field the way the page
//! does on submit.
//!
//! Exit codes:
//! - 0 = the form may be submitted (warnings allowed)
//! - 1 = at least one blocking field
//! - 2 = the input is not a form document
use std::time::Instant;

use vigiapp_core::FormDocument;

use crate::OutputFormat;
use crate::cmd::write_failed;
use crate::error::CliError;
use crate::format::{
    FormatMode, FormatterConfig, write_diagnostic, write_summary, write_timing_human,
};

/// Parses `content` as a [`FormDocument`].
///
/// # Errors
///
/// [`CliError::ParseFailed`] with the line and column of the problem.
pub fn parse_document(content: &str) -> Result<FormDocument, CliError> {
    FormDocument::from_json(content).map_err(|e| CliError::ParseFailed {
        detail: format!("line {}, column {}: {e}", e.line(), e.column()),
    })
}

/// Runs the `check` command.
///
/// Diagnostics and the summary go to stderr; nothing is written to stdout.
///
/// # Errors
///
/// - [`CliError::ParseFailed`]: `content` is not a form document.
/// - [`CliError::SubmitBlocked`]: one or more fields block submission.
pub fn run(
    content: &str,
    format: &OutputFormat,
    quiet: bool,
    verbose: bool,
    no_color: bool,
) -> Result<(), CliError> {
    let doc = parse_document(content)?;

    let started = Instant::now();
    let result = doc.check();
    let elapsed = started.elapsed();

    let mode = FormatMode::from(*format);
    let fmt_config = FormatterConfig::from_flags(no_color, quiet, verbose);

    let stderr = std::io::stderr();
    let mut err_out = stderr.lock();

    for diag in &result.diagnostics {
        write_diagnostic(&mut err_out, diag, mode, &fmt_config)
            .map_err(|e| write_failed("stderr", &e))?;
    }

    let error_count = result.errors().count();
    let warning_count = result.warnings().count();
    write_summary(&mut err_out, error_count, warning_count, mode, &fmt_config)
        .map_err(|e| write_failed("stderr", &e))?;

    if mode == FormatMode::Human {
        let label = format!("checked {} field(s)", result.fields_checked);
        write_timing_human(&mut err_out, &label, elapsed, &fmt_config)
            .map_err(|e| write_failed("stderr", &e))?;
    }

    if result.blocks_submit() {
        Err(CliError::SubmitBlocked {
            errors: error_count,
        })
    } else {
        Ok(())
    }
}
