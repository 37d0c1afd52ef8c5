//! Integration tests for `vigiapp fill` against a local stub service.
#![allow(clippy::expect_used)]

use std::io::{BufRead as _, BufReader, Write as _};
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::Command;
use std::thread;

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

/// Answers exactly one request with `status` and `body`.
fn stub_once(status: u16, body: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub service");
    let base_url = format!("http://{}", listener.local_addr().expect("local addr"));
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
        let mut request_line = String::new();
        reader.read_line(&mut request_line).expect("request line");
        loop {
            let mut header = String::new();
            let n = reader.read_line(&mut header).expect("header line");
            if n == 0 || header == "\r\n" {
                break;
            }
        }
        let reason = if status == 200 { "OK" } else { "Not Found" };
        write!(
            stream,
            "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .expect("write response");
        request_line
    });
    (base_url, handle)
}

fn fill(base_url: &str, name: &str) -> std::process::Output {
    Command::new(vigiapp_bin())
        .args(["--base-url", base_url, "--timeout-secs", "5", "fill"])
        .arg(fixture(name))
        .output()
        .expect("run vigiapp fill")
}

#[test]
fn company_record_fills_delivery_form() {
    let (base_url, server) = stub_once(
        200,
        r#"{"nome_empresa":"Transportes Lima","telefone_empresa":"(11) 3333-4444","coringa":"K7","nome_func":null,"telefone_func":"(11) 91234-5678"}"#,
    );
    let out = fill(&base_url, "delivery-lookup.json");
    assert_eq!(
        out.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let doc: serde_json::Value = serde_json::from_slice(&out.stdout).expect("document JSON");
    assert_eq!(doc["text"]["nome_empresa"], "Transportes Lima");
    assert_eq!(doc["text"]["coringa"], "K7");
    assert_eq!(doc["text"]["nome_func"], "");
    assert_eq!(doc["fields"][1]["name"], "telefone_empresa");
    assert_eq!(doc["fields"][1]["value"], "(11) 3333-4444");
    // No telefone_func field on this form, so nothing is added.
    assert!(doc["text"].get("telefone_func").is_none());

    let request_line = server.join().expect("stub thread");
    assert!(
        request_line.starts_with("GET /empresas/buscar-por-cnpj/11222333000181 "),
        "request: {request_line}"
    );
}

#[test]
fn not_found_leaves_document_unchanged() {
    let (base_url, server) = stub_once(404, "{}");
    let out = fill(&base_url, "delivery-lookup.json");
    assert_eq!(out.status.code(), Some(0));
    let doc: serde_json::Value = serde_json::from_slice(&out.stdout).expect("document JSON");
    assert_eq!(doc["text"]["nome_empresa"], "");
    assert_eq!(doc["fields"][0]["value"], "11.222.333/0001-81");
    server.join().expect("stub thread");
}

#[test]
fn unreachable_service_still_prints_document() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let out = fill(&format!("http://{addr}"), "delivery-lookup.json");
    assert_eq!(out.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("company lookup failed"), "stderr: {stderr}");
    let doc: serde_json::Value = serde_json::from_slice(&out.stdout).expect("document JSON");
    assert_eq!(doc["fields"].as_array().map(Vec::len), Some(4));
}

#[test]
fn incomplete_identity_issues_no_request() {
    // Nothing listens here; a request would be logged as a failure.
    let out = fill("http://127.0.0.1:9", "delivery-incomplete.json");
    assert_eq!(out.status.code(), Some(0));
    assert!(
        !String::from_utf8_lossy(&out.stderr).contains("lookup failed"),
        "no lookup expected"
    );
}

#[test]
fn malformed_document_exits_2() {
    let out = fill("http://127.0.0.1:9", "truncated.json");
    assert_eq!(out.status.code(), Some(2));
}
