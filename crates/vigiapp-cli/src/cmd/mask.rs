//! Implementation of `vigiapp mask <KIND> <VALUE>`.
//!
//! Prints the masked form of `VALUE` on stdout. Masking never fails: extra
//! digits are dropped and non-digits ignored, exactly as the form inputs do
//! on every keystroke.
use std::io::Write as _;

use vigiapp_core::FieldKind;
use vigiapp_core::mask::{mask, raw_digits};

use crate::OutputFormat;
use crate::cmd::write_failed;
use crate::error::CliError;

/// Runs the `mask` command.
///
/// Human mode prints the masked text. JSON mode prints an object with the
/// input, the kept digits, the masked text and whether the value has a
/// complete length.
///
/// # Errors
///
/// Only if stdout cannot be written.
pub fn run(kind: FieldKind, value: &str, format: &OutputFormat) -> Result<(), CliError> {
    let line = match format {
        OutputFormat::Human => mask(kind, value),
        OutputFormat::Json => mask_json(kind, value).to_string(),
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{line}").map_err(|e| write_failed("stdout", &e))
}

fn mask_json(kind: FieldKind, value: &str) -> serde_json::Value {
    let digits = raw_digits(kind, value);
    let complete = kind.terminal_lengths().contains(&digits.len());
    serde_json::json!({
        "kind": kind.code(),
        "input": value,
        "digits": digits,
        "masked": mask(kind, value),
        "complete": complete,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_reports_partial_cpf() {
        let v = mask_json(FieldKind::PersonalId, "1114447");
        assert_eq!(v["masked"], "111.444.7");
        assert_eq!(v["digits"], "1114447");
        assert_eq!(v["complete"], false);
    }

    #[test]
    fn json_reports_complete_landline() {
        let v = mask_json(FieldKind::Phone, "1133334444");
        assert_eq!(v["masked"], "(11) 3333-4444");
        assert_eq!(v["kind"], "phone");
        assert_eq!(v["complete"], true);
    }

    #[test]
    fn json_drops_overflow_digits() {
        let v = mask_json(FieldKind::Time, "093045");
        assert_eq!(v["digits"], "0930");
        assert_eq!(v["masked"], "09:30");
        assert_eq!(v["input"], "093045");
    }
}
