//! HTTP transport for the person and company lookup service.
//!
//! [`LookupClient`] issues the GET requests; [`HttpRecordSource`] drives it
//! from synchronous code and adapts it to the [`RecordSource`] seam used by
//! document autofill.
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use thiserror::Error;
use vigiapp_core::lookup::{parse_company_record, parse_person_record};
use vigiapp_core::{
    Cnpj, CompanyRecord, Cpf, PersonRecord, RecordSource, company_lookup_path, person_lookup_path,
};

/// Failures that stop a lookup from producing an answer.
///
/// A missing record is not an error; see [`LookupClient::person`].
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("http client setup failed: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid record from {url}: {source}")]
    InvalidRecord {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("async runtime unavailable: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Builds the single-threaded runtime the CLI drives requests on.
///
/// # Errors
///
/// Returns [`LookupError::Runtime`] if the runtime cannot start.
pub fn runtime() -> Result<tokio::runtime::Runtime, LookupError> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

/// Async client for the lookup endpoints.
#[derive(Debug, Clone)]
pub struct LookupClient {
    http: reqwest::Client,
    base_url: String,
}

impl LookupClient {
    /// Creates a client for the service at `base_url`. Every request gives up
    /// after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::ClientBuild`] if the TLS backend cannot be
    /// initialised.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(LookupError::ClientBuild)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Absolute URL for a request path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GETs `path`. Any status other than 200 means "no record".
    async fn fetch_body(&self, path: &str) -> Result<Option<String>, LookupError> {
        let url = self.url_for(path);
        log::debug!("GET {url}");
        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| LookupError::RequestFailed {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            if status == StatusCode::NOT_FOUND {
                log::info!("no record at {path}");
            } else {
                log::warn!("{path} answered {status}, treating as not found");
            }
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .map_err(|source| LookupError::RequestFailed {
                url: url.clone(),
                source,
            })?;
        log::info!("record found at {path}");
        Ok(Some(body))
    }

    /// Fetches the person registered under `cpf`; `Ok(None)` if there is
    /// none.
    ///
    /// # Errors
    ///
    /// Returns a [`LookupError`] if the service cannot be reached or the
    /// body is not a person record.
    pub async fn person(&self, cpf: &Cpf) -> Result<Option<PersonRecord>, LookupError> {
        let path = person_lookup_path(cpf);
        let Some(body) = self.fetch_body(&path).await? else {
            return Ok(None);
        };
        parse_person_record(&body)
            .map(Some)
            .map_err(|source| LookupError::InvalidRecord {
                url: self.url_for(&path),
                source,
            })
    }

    /// Fetches the company registered under `cnpj`; `Ok(None)` if there is
    /// none.
    ///
    /// # Errors
    ///
    /// Returns a [`LookupError`] if the service cannot be reached or the
    /// body is not a company record.
    pub async fn company(&self, cnpj: &Cnpj) -> Result<Option<CompanyRecord>, LookupError> {
        let path = company_lookup_path(cnpj);
        let Some(body) = self.fetch_body(&path).await? else {
            return Ok(None);
        };
        parse_company_record(&body)
            .map(Some)
            .map_err(|source| LookupError::InvalidRecord {
                url: self.url_for(&path),
                source,
            })
    }
}

/// Blocking [`RecordSource`] over a [`LookupClient`].
///
/// Failures are logged and reported as "no record", so a flaky service
/// leaves the form as the user typed it.
pub struct HttpRecordSource {
    client: LookupClient,
    runtime: tokio::runtime::Runtime,
}

impl HttpRecordSource {
    /// Wraps `client`, running its requests on `runtime`.
    pub fn new(client: LookupClient, runtime: tokio::runtime::Runtime) -> Self {
        Self { client, runtime }
    }
}

impl RecordSource for HttpRecordSource {
    fn person_by_cpf(&self, cpf: &Cpf) -> Option<PersonRecord> {
        self.runtime
            .block_on(self.client.person(cpf))
            .unwrap_or_else(|e| {
                log::warn!("person lookup failed: {e}");
                None
            })
    }

    fn company_by_cnpj(&self, cnpj: &Cnpj) -> Option<CompanyRecord> {
        self.runtime
            .block_on(self.client.company(cnpj))
            .unwrap_or_else(|e| {
                log::warn!("company lookup failed: {e}");
                None
            })
    }
}
