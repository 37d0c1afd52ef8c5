//! Integration tests for `vigiapp validate`.
#![allow(clippy::expect_used)]

use std::path::PathBuf;
use std::process::Command;

/// Path to the compiled `vigiapp` binary.
fn vigiapp_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("vigiapp");
    path
}

fn validate(args: &[&str]) -> std::process::Output {
    Command::new(vigiapp_bin())
        .arg("--no-color")
        .arg("validate")
        .args(args)
        .output()
        .expect("run vigiapp validate")
}

// ---------------------------------------------------------------------------
// exit 0
// ---------------------------------------------------------------------------

#[test]
fn valid_cpf_prints_stored_form() {
    let out = validate(&["cpf", "11144477735"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "111.444.777-35\n");
    assert!(out.stderr.is_empty(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
}

#[test]
fn valid_landline_prints_ten_digit_layout() {
    let out = validate(&["telefone", "1133334444"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "(11) 3333-4444\n");
}

#[test]
fn leap_day_is_valid() {
    let out = validate(&["data", "29/02/2024"]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "29/02/2024\n");
}

#[test]
fn empty_optional_is_fine_and_silent() {
    let out = validate(&["cnpj", ""]);
    assert_eq!(out.status.code(), Some(0));
    assert!(out.stdout.is_empty());
    assert!(out.stderr.is_empty());
}

#[test]
fn incomplete_optional_only_warns() {
    let out = validate(&["cpf", "111.444"]);
    assert_eq!(out.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("[W] incomplete"), "stderr: {stderr}");
    assert!(out.stdout.is_empty());
}

// ---------------------------------------------------------------------------
// exit 1
// ---------------------------------------------------------------------------

#[test]
fn bad_check_digit_is_rejected() {
    let out = validate(&["cpf", "111.444.777-36"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("[E] checksum-mismatch"), "stderr: {stderr}");
    assert!(stderr.contains("CPF inválido"), "stderr: {stderr}");
    assert!(out.stdout.is_empty());
}

#[test]
fn repeated_digits_are_rejected() {
    let out = validate(&["cnpj", "00000000000000"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("all-same-digit"));
}

#[test]
fn incomplete_required_is_rejected() {
    let out = validate(&["--required", "cpf", "111.444"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("[E] incomplete"));
}

#[test]
fn empty_required_is_rejected() {
    let out = validate(&["--required", "hora", "  "]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Campo obrigatório: Hora"));
}

#[test]
fn impossible_date_is_rejected() {
    let out = validate(&["data", "31/04/2025"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("calendar-overflow"));
}

#[test]
fn out_of_range_time_is_rejected() {
    let out = validate(&["hora", "24:00"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Hora inválida"));
}

// ---------------------------------------------------------------------------
// JSON mode
// ---------------------------------------------------------------------------

#[test]
fn json_mode_emits_ndjson_diagnostic() {
    let out = Command::new(vigiapp_bin())
        .args(["-f", "json", "validate", "telefone", "123456789"])
        .output()
        .expect("run vigiapp validate");
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    let first = stderr.lines().next().expect("one diagnostic line");
    let v: serde_json::Value = serde_json::from_str(first).expect("NDJSON line");
    assert_eq!(v["reason"], "wrong-length");
    assert_eq!(v["kind"], "phone");
}

#[test]
fn json_mode_prints_stored_value() {
    let out = Command::new(vigiapp_bin())
        .args(["-f", "json", "validate", "cnpj", "11222333000181"])
        .output()
        .expect("run vigiapp validate");
    assert_eq!(out.status.code(), Some(0));
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("JSON");
    assert_eq!(v["value"], "11.222.333/0001-81");
    assert_eq!(v["kind"], "organization-id");
}
