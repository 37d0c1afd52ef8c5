#![allow(clippy::expect_used)]

use super::*;

fn spec(kind: FieldKind, required: bool) -> FieldSpec {
    FieldSpec::new(kind.code(), kind, required)
}

// ---------------------------------------------------------------------------
// check_field
// ---------------------------------------------------------------------------

#[test]
fn whitespace_only_is_empty() {
    let s = spec(FieldKind::Phone, true);
    assert_eq!(check_field(&s, ""), FieldVerdict::Empty);
    assert_eq!(check_field(&s, "   "), FieldVerdict::Empty);
}

#[test]
fn surrounding_whitespace_is_ignored() {
    let s = spec(FieldKind::Time, false);
    assert_eq!(check_field(&s, " 23:59 "), FieldVerdict::Valid);
}

#[test]
fn short_identity_is_incomplete() {
    let s = spec(FieldKind::PersonalId, false);
    assert_eq!(
        check_field(&s, "111.444"),
        FieldVerdict::Invalid(FieldError::Incomplete {
            digits: 6,
            needed: 11
        })
    );
}

#[test]
fn full_length_identity_is_judged() {
    let s = spec(FieldKind::OrganizationId, true);
    assert_eq!(check_field(&s, "11.222.333/0001-81"), FieldVerdict::Valid);
    assert_eq!(
        check_field(&s, "11.222.333/0001-80"),
        FieldVerdict::Invalid(FieldError::ChecksumMismatch)
    );
}

// ---------------------------------------------------------------------------
// diagnose
// ---------------------------------------------------------------------------

#[test]
fn empty_optional_is_silent() {
    assert_eq!(diagnose(&spec(FieldKind::Date, false), FieldVerdict::Empty), None);
}

#[test]
fn empty_required_is_missing() {
    let d = diagnose(&spec(FieldKind::Date, true), FieldVerdict::Empty).expect("diagnostic");
    assert_eq!(d.severity, Severity::Error);
    assert_eq!(d.reason, FieldError::MissingRequired);
    assert_eq!(d.message, "Campo obrigatório: Data");
}

#[test]
fn incomplete_optional_is_warning() {
    let verdict = FieldVerdict::Invalid(FieldError::Incomplete {
        digits: 4,
        needed: 11,
    });
    let d = diagnose(&spec(FieldKind::PersonalId, false), verdict).expect("diagnostic");
    assert_eq!(d.severity, Severity::Warning);
    let d = diagnose(&spec(FieldKind::PersonalId, true), verdict).expect("diagnostic");
    assert_eq!(d.severity, Severity::Error);
}

#[test]
fn invalid_value_is_error_even_when_optional() {
    let d = diagnose(
        &spec(FieldKind::PersonalId, false),
        FieldVerdict::Invalid(FieldError::AllSameDigit),
    )
    .expect("diagnostic");
    assert_eq!(d.severity, Severity::Error);
    assert_eq!(d.message, "CPF inválido");
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[test]
fn submit_messages_match_application_wording() {
    let bad = FieldError::PatternMismatch;
    assert_eq!(message(FieldKind::PersonalId, bad), "CPF inválido");
    assert_eq!(message(FieldKind::OrganizationId, bad), "CNPJ inválido");
    assert_eq!(message(FieldKind::Phone, bad), "Telefone inválido");
    assert_eq!(message(FieldKind::Date, bad), "Data inválida");
    assert_eq!(message(FieldKind::Time, bad), "Hora inválida");
}

#[test]
fn diagnostic_display_has_level_code_and_field() {
    let d = FieldDiagnostic::new(
        "cnpj",
        FieldKind::OrganizationId,
        Severity::Error,
        FieldError::ChecksumMismatch,
    );
    assert_eq!(d.to_string(), "[E] checksum-mismatch cnpj: CNPJ inválido");
}

// ---------------------------------------------------------------------------
// FormCheck
// ---------------------------------------------------------------------------

#[test]
fn form_check_collects_every_failure() {
    let specs = [
        FieldSpec::new("cpf", FieldKind::PersonalId, true),
        FieldSpec::new("telefone", FieldKind::Phone, false),
        FieldSpec::new("data", FieldKind::Date, true),
        FieldSpec::new("hora", FieldKind::Time, true),
    ];
    let values = ["11111111111", "", "31/04/2024", "24:00"];
    let check = FormCheck::run(specs.iter().zip(values));
    assert_eq!(check.fields_checked, 4);
    let failing: Vec<&str> = check.diagnostics.iter().map(|d| d.field.as_str()).collect();
    assert_eq!(failing, vec!["cpf", "data", "hora"]);
    assert!(check.blocks_submit());
    assert_eq!(check.errors().count(), 3);
}

#[test]
fn warnings_alone_do_not_block_submit() {
    let specs = [
        FieldSpec::new("cpf", FieldKind::PersonalId, false),
        FieldSpec::new("hora", FieldKind::Time, true),
    ];
    let values = ["111.444.7", "08:00"];
    let check = FormCheck::run(specs.iter().zip(values));
    assert_eq!(check.warnings().count(), 1);
    assert!(!check.has_errors());
    assert!(!check.blocks_submit());
}

#[test]
fn clean_form_is_empty() {
    let specs = [FieldSpec::new("cpf", FieldKind::PersonalId, true)];
    let check = FormCheck::run(specs.iter().zip(["111.444.777-35"]));
    assert!(check.is_empty());
    assert!(!check.blocks_submit());
}

// ---------------------------------------------------------------------------
// FormDocument
// ---------------------------------------------------------------------------

#[test]
fn document_parses_and_checks() {
    let doc = FormDocument::from_json(
        r#"{"fields":[
            {"name":"cpf","kind":"personal-id","required":true,"value":"111.444.777-35"},
            {"name":"cnpj","kind":"cnpj","value":"11222333000180"},
            {"name":"telefone","kind":"phone"}
        ]}"#,
    )
    .expect("valid document");
    assert_eq!(doc.fields.len(), 3);
    assert!(!doc.fields[1].spec.required);
    assert_eq!(doc.fields[2].value, "");

    let check = doc.check();
    assert_eq!(check.diagnostics.len(), 1);
    assert_eq!(check.diagnostics[0].reason, FieldError::ChecksumMismatch);
}

#[test]
fn document_rejects_unknown_kind() {
    let err = FormDocument::from_json(r#"{"fields":[{"name":"x","kind":"email"}]}"#);
    assert!(err.is_err());
}

#[test]
fn document_rejects_missing_fields_array() {
    assert!(FormDocument::from_json("{}").is_err());
}
