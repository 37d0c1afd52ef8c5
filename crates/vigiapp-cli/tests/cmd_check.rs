//! Integration tests for `vigiapp check`.
#![allow(clippy::expect_used)]

use std::io::Write as _;
use std::path::PathBuf;
use std::process::{Command, Stdio};

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

/// Path to a shared fixture file.
fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("../../tests/fixtures");
    path.push(name);
    path
}

fn check(args: &[&str], name: &str) -> std::process::Output {
    Command::new(vigiapp_bin())
        .arg("--no-color")
        .args(args)
        .arg("check")
        .arg(fixture(name))
        .output()
        .expect("run vigiapp check")
}

// ---------------------------------------------------------------------------
// exit 0
// ---------------------------------------------------------------------------

#[test]
fn valid_form_exits_0_with_summary() {
    let out = check(&[], "visitor-valid.json");
    assert_eq!(
        out.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    assert!(out.stdout.is_empty(), "check should not write to stdout");
    assert_eq!(String::from_utf8_lossy(&out.stderr), "0 errors, 0 warnings\n");
}

#[test]
fn incomplete_optional_warns_but_passes() {
    let out = check(&[], "delivery-incomplete.json");
    assert_eq!(out.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("[W] incomplete  cnpj:"), "stderr: {stderr}");
    assert!(stderr.contains("0 errors, 1 warning"), "stderr: {stderr}");
}

#[test]
fn quiet_hides_warnings_and_summary() {
    let out = check(&["--quiet"], "delivery-incomplete.json");
    assert_eq!(out.status.code(), Some(0));
    assert!(out.stderr.is_empty(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
}

#[test]
fn verbose_adds_timing() {
    let out = check(&["--verbose"], "visitor-valid.json");
    assert_eq!(out.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("checked 4 field(s) in"), "stderr: {stderr}");
}

// ---------------------------------------------------------------------------
// exit 1
// ---------------------------------------------------------------------------

#[test]
fn invalid_form_reports_every_field() {
    let out = check(&[], "visitor-invalid.json");
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    for expected in [
        "[E] all-same-digit  cpf: CPF inválido",
        "[E] wrong-length  telefone: Telefone inválido",
        "[E] calendar-overflow  data: Data inválida",
        "[E] pattern-mismatch  hora: Hora inválida",
        "[E] missing-required  observacao_data: Campo obrigatório: Data",
        "5 errors, 0 warnings",
        "form blocked by 5",
    ] {
        assert!(stderr.contains(expected), "missing {expected:?} in: {stderr}");
    }
}

#[test]
fn invalid_form_json_mode() {
    let out = check(&["--format", "json"], "visitor-invalid.json");
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    let lines: Vec<serde_json::Value> = stderr
        .lines()
        .filter(|l| l.starts_with('{'))
        .map(|l| serde_json::from_str(l).expect("NDJSON line"))
        .collect();
    assert_eq!(lines.len(), 6, "five diagnostics and a summary: {stderr}");
    assert_eq!(lines[0]["field"], "cpf");
    assert_eq!(lines[5]["summary"]["errors"], 5);
}

// ---------------------------------------------------------------------------
// exit 2
// ---------------------------------------------------------------------------

#[test]
fn truncated_document_exits_2() {
    let out = check(&[], "truncated.json");
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("not a form document"));
}

#[test]
fn missing_file_exits_2() {
    let out = check(&[], "no-such-form.json");
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("file not found"));
}

#[test]
fn file_over_size_limit_exits_2() {
    let out = check(&["--max-file-size", "16"], "visitor-valid.json");
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("too large"));
}

// ---------------------------------------------------------------------------
// stdin
// ---------------------------------------------------------------------------

#[test]
fn reads_document_from_stdin() {
    let mut child = Command::new(vigiapp_bin())
        .args(["--no-color", "check", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn vigiapp check -");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(br#"{"fields":[{"name":"hora","kind":"hora","value":"25:00"}]}"#)
        .expect("write stdin");
    let out = child.wait_with_output().expect("wait");
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("pattern-mismatch  hora"));
}
