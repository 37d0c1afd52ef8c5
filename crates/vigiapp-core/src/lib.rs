#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod calendar;
pub mod canonical;
pub mod check_digits;
pub mod form;
pub mod kind;
pub mod lookup;
pub mod mask;
pub mod newtypes;
pub mod serde_helpers;
pub mod validate;

pub use canonical::{format_canonical, format_cnpj, format_cpf, format_phone};
pub use check_digits::{cnpj_check_digits, cpf_check_digits};
pub use form::{
    FieldDiagnostic, FieldSpec, FieldVerdict, FormCheck, FormDocument, FormField, Severity,
    check_field,
};
pub use kind::FieldKind;
pub use lookup::{
    AutofillForm, AutofillOutcome, AutofillRecord, CompanyRecord, FieldAutofill, LookupTicket,
    PersonRecord, RecordSource, autofill_document, company_lookup_path, person_lookup_path,
};
pub use mask::{mask, mask_date, mask_organization_id, mask_personal_id, mask_phone, mask_time};
pub use newtypes::{BrDate, ClockTime, Cnpj, Cpf, Phone};
pub use validate::{
    FieldError, check, check_progress, validate_date, validate_organization_id,
    validate_personal_id, validate_phone, validate_time,
};

/// Returns the current version of the vigiapp-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn version_is_semver() {
        let v = version();
        let parts: Vec<&str> = v.split('.').collect();
        assert_eq!(parts.len(), 3, "version should have 3 parts: {v}");
        for part in parts {
            part.parse::<u32>().expect("each part should be a number");
        }
    }
}
