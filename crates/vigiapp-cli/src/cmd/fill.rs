//! Implementation of `vigiapp fill <FILE|->`.
//!
//! For every identity field holding a complete, valid number the matching
//! record is fetched and copied into the document's target fields. The
//! filled document is printed on stdout.
//!
//! A record that is missing, or a service that cannot be reached, leaves
//! the document as it was; both are logged and the exit code stays 0.
use std::io::Write as _;

use vigiapp_core::{AutofillOutcome, FieldAutofill, RecordSource, autofill_document};

use crate::cmd::check::parse_document;
use crate::cmd::lookup::Endpoint;
use crate::cmd::write_failed;
use crate::error::CliError;
use crate::lookup_client::{HttpRecordSource, LookupClient, runtime};

/// Runs the `fill` command against the lookup service at `endpoint`.
///
/// # Errors
///
/// - [`CliError::ParseFailed`]: `content` is not a form document.
/// - [`CliError::Lookup`]: the HTTP client or runtime could not be built.
pub fn run(content: &str, endpoint: &Endpoint) -> Result<(), CliError> {
    let client = LookupClient::new(&endpoint.base_url, endpoint.timeout)?;
    let source = HttpRecordSource::new(client, runtime()?);
    let filled = fill(content, &source)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{filled}").map_err(|e| write_failed("stdout", &e))
}

/// Fills the document in `content` from `source` and returns it as pretty
/// JSON.
fn fill(content: &str, source: &dyn RecordSource) -> Result<String, CliError> {
    let mut doc = parse_document(content)?;
    for report in autofill_document(&mut doc, source) {
        log_outcome(&report);
    }
    serde_json::to_string_pretty(&doc).map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })
}

fn log_outcome(report: &FieldAutofill) {
    match report.outcome {
        Some(AutofillOutcome::Applied) => log::info!("{}: record applied", report.field),
        Some(AutofillOutcome::NotFound) => log::info!("{}: no record", report.field),
        Some(AutofillOutcome::Stale) => log::debug!("{}: response discarded", report.field),
        None => log::debug!("{}: no lookup issued", report.field),
    }
}
