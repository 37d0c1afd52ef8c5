//! Invariant checkers for masking, stored forms and form checks.

use vigiapp_core::mask::{raw_digits, strip_non_digits};
use vigiapp_core::{FieldKind, FormCheck, FormDocument, Severity, check, format_canonical, mask};

/// Masking an already masked value changes nothing.
pub fn check_mask_idempotent(kind: FieldKind, input: &str) -> Result<(), String> {
    let once = mask(kind, input);
    let twice = mask(kind, &once);
    if once != twice {
        return Err(format!("{kind}: mask({input:?}) = {once:?} but re-masked to {twice:?}"));
    }
    Ok(())
}

/// The mask only inserts punctuation: its digits are the kept input digits,
/// in order.
pub fn check_mask_keeps_digits(kind: FieldKind, input: &str) -> Result<(), String> {
    let masked = mask(kind, input);
    let kept = raw_digits(kind, input);
    if strip_non_digits(&masked) != kept {
        return Err(format!("{kind}: mask({input:?}) = {masked:?} lost or reordered digits"));
    }
    if kept.len() > kind.max_digits() {
        return Err(format!("{kind}: kept {} digits, max is {}", kept.len(), kind.max_digits()));
    }
    Ok(())
}

/// A valid value is still valid, with the same digits, in its stored form.
pub fn check_stored_form(kind: FieldKind, value: &str) -> Result<(), String> {
    if check(kind, value).is_err() {
        return Ok(());
    }
    let stored = format_canonical(kind, value);
    if let Err(e) = check(kind, &stored) {
        return Err(format!("{kind}: stored form {stored:?} of {value:?} rejected: {e}"));
    }
    if strip_non_digits(&stored) != strip_non_digits(value) {
        return Err(format!("{kind}: stored form {stored:?} changed the digits of {value:?}"));
    }
    Ok(())
}

/// Verifies a form check result against its document:
/// - one field counted per masked field
/// - every diagnostic names a field of the document, in page order
/// - submission is blocked iff some diagnostic is an error
pub fn check_form_result(doc: &FormDocument, result: &FormCheck) -> Result<(), String> {
    if result.fields_checked != doc.fields.len() {
        return Err(format!(
            "checked {} fields, document has {}",
            result.fields_checked,
            doc.fields.len()
        ));
    }
    let mut cursor = 0;
    for diag in &result.diagnostics {
        let Some(pos) = doc.fields[cursor..]
            .iter()
            .position(|f| f.spec.name == diag.field)
        else {
            return Err(format!("diagnostic for {:?} out of order or unknown", diag.field));
        };
        cursor += pos + 1;
    }
    let any_error = result
        .diagnostics
        .iter()
        .any(|d| d.severity == Severity::Error);
    if result.blocks_submit() != any_error {
        return Err("blocks_submit disagrees with diagnostic severities".to_owned());
    }
    Ok(())
}
