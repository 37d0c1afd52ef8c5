//! Implementation of `vigiapp lookup person <CPF>` and
//! `vigiapp lookup company <CNPJ>`.
//!
//! Exit codes:
//! - 0 = record printed on stdout as JSON
//! - 1 = no record for that number
//! - 2 = the number is not a complete, valid CPF/CNPJ, or the service could
//!   not be reached
use std::io::Write as _;
use std::time::Duration;

use vigiapp_core::{Cnpj, Cpf, FieldError, company_lookup_path, person_lookup_path};

use crate::LookupTarget;
use crate::cmd::write_failed;
use crate::error::CliError;
use crate::lookup_client::{LookupClient, runtime};

/// Where and how long to wait for the lookup service.
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// Service base URL, without trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

fn invalid(label: &'static str, e: FieldError) -> CliError {
    CliError::InvalidIdentity {
        label,
        detail: e.to_string(),
    }
}

/// Runs the `lookup` command.
///
/// # Errors
///
/// - [`CliError::InvalidIdentity`]: the argument is not a valid number.
/// - [`CliError::Lookup`]: transport failure or an unreadable record.
/// - [`CliError::RecordNotFound`]: the service has no such record.
pub fn run(target: &LookupTarget, endpoint: &Endpoint) -> Result<(), CliError> {
    let client = LookupClient::new(&endpoint.base_url, endpoint.timeout)?;
    let rt = runtime()?;

    let (path, body) = match target {
        LookupTarget::Person { cpf } => {
            let cpf = Cpf::try_from(cpf.trim()).map_err(|e| invalid("CPF", e))?;
            let path = person_lookup_path(&cpf);
            let body = rt
                .block_on(client.person(&cpf))?
                .map(|r| serde_json::to_string(&r));
            (path, body)
        }
        LookupTarget::Company { cnpj } => {
            let cnpj = Cnpj::try_from(cnpj.trim()).map_err(|e| invalid("CNPJ", e))?;
            let path = company_lookup_path(&cnpj);
            let body = rt
                .block_on(client.company(&cnpj))?
                .map(|r| serde_json::to_string(&r));
            (path, body)
        }
    };

    let Some(body) = body else {
        return Err(CliError::RecordNotFound { path });
    };
    let body = body.map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{body}").map_err(|e| write_failed("stdout", &e))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]
    #![allow(clippy::wildcard_enum_match_arm)]

    use super::*;

    fn endpoint() -> Endpoint {
        Endpoint {
            base_url: "http://127.0.0.1:9".to_owned(),
            timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn bad_checksum_is_rejected_before_any_request() {
        let target = LookupTarget::Person {
            cpf: "111.444.777-36".to_owned(),
        };
        match run(&target, &endpoint()).expect_err("invalid cpf") {
            CliError::InvalidIdentity { label, detail } => {
                assert_eq!(label, "CPF");
                assert!(detail.contains("check digit"), "{detail}");
            }
            other => panic!("expected InvalidIdentity, got {other:?}"),
        }
    }

    #[test]
    fn short_cnpj_is_rejected() {
        let target = LookupTarget::Company {
            cnpj: "11.222.333/0001".to_owned(),
        };
        let err = run(&target, &endpoint()).expect_err("short cnpj");
        assert_eq!(err.exit_code(), 2);
    }
}
