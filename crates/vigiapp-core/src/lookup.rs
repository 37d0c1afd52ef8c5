//! Record lookup types and the autofill state that consumes them.
//!
//! When a personal or organization identity field loses focus holding a
//! complete, valid number, the page asks the lookup service for the matching
//! record and copies it into neighbouring fields. This module owns the record
//! shapes, the request paths, the [`RecordSource`] seam the transport plugs
//! into, and [`AutofillForm`], which decides whether a response may still be
//! applied once it arrives.
//!
//! No I/O happens here. The command-line crate supplies an HTTP-backed
//! [`RecordSource`]; tests supply in-memory ones.
use std::collections::BTreeMap;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::form::FormDocument;
use crate::kind::FieldKind;
use crate::mask::strip_non_digits;
use crate::newtypes::{Cnpj, Cpf};
use crate::serde_helpers::null_as_empty;
use crate::validate::check;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A registered visitor, as returned by the person lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Full name.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nome: String,
    /// Contact phone, in stored form.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub telefone: String,
    /// Company the visitor works for.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub empresa: String,
}

/// A registered company, as returned by the company lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Company name.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nome_empresa: String,
    /// Company phone, in stored form.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub telefone_empresa: String,
    /// Standing access code.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub coringa: String,
    /// Name of the usual courier or employee.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nome_func: String,
    /// Phone of the usual courier or employee.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub telefone_func: String,
}

/// Parses a person lookup response body.
///
/// # Errors
///
/// Returns the `serde_json` error if `body` is not a JSON object of strings
/// and nulls.
pub fn parse_person_record(body: &str) -> Result<PersonRecord, serde_json::Error> {
    serde_json::from_str(body)
}

/// Parses a company lookup response body.
///
/// # Errors
///
/// Returns the `serde_json` error if `body` is not a JSON object of strings
/// and nulls.
pub fn parse_company_record(body: &str) -> Result<CompanyRecord, serde_json::Error> {
    serde_json::from_str(body)
}

/// Request path for a person lookup.
///
/// ```
/// use vigiapp_core::lookup::person_lookup_path;
/// use vigiapp_core::newtypes::Cpf;
///
/// let cpf = Cpf::try_from("111.444.777-35").unwrap();
/// assert_eq!(person_lookup_path(&cpf), "/pessoas/buscar-por-cpf/11144477735");
/// ```
pub fn person_lookup_path(cpf: &Cpf) -> String {
    format!("/pessoas/buscar-por-cpf/{}", cpf.digits())
}

/// Request path for a company lookup.
pub fn company_lookup_path(cnpj: &Cnpj) -> String {
    format!("/empresas/buscar-por-cnpj/{}", cnpj.digits())
}

// ---------------------------------------------------------------------------
// RecordSource
// ---------------------------------------------------------------------------

/// An injected source of person and company records.
///
/// Implementations may call the lookup service, read a local cache, or
/// return fixed data. The trait is object-safe.
///
/// `None` means the record was not found or the source could not answer.
/// Callers treat both the same way and leave the form untouched.
pub trait RecordSource {
    /// Looks up the person registered under `cpf`.
    fn person_by_cpf(&self, cpf: &Cpf) -> Option<PersonRecord>;

    /// Looks up the company registered under `cnpj`.
    fn company_by_cnpj(&self, cnpj: &Cnpj) -> Option<CompanyRecord>;
}

// ---------------------------------------------------------------------------
// AutofillRecord
// ---------------------------------------------------------------------------

/// A record type that can fill form fields.
pub trait AutofillRecord: Sized {
    /// Kind of the identity field the record is keyed by.
    const ID_KIND: FieldKind;

    /// Names of the form fields this record writes, in page order.
    const TARGETS: &'static [&'static str];

    /// Request path for the record keyed by `digits`, or `None` if `digits`
    /// is not a valid key.
    fn lookup_path(digits: &str) -> Option<String>;

    /// Fetches the record keyed by `digits` from `source`.
    fn fetch(source: &dyn RecordSource, digits: &str) -> Option<Self>;

    /// `(field name, value)` pairs to write, in [`Self::TARGETS`] order.
    fn assignments(&self) -> Vec<(&'static str, &str)>;
}

impl AutofillRecord for PersonRecord {
    const ID_KIND: FieldKind = FieldKind::PersonalId;
    const TARGETS: &'static [&'static str] = &["nome", "telefone", "empresa"];

    fn lookup_path(digits: &str) -> Option<String> {
        Cpf::try_from(digits).ok().map(|c| person_lookup_path(&c))
    }

    fn fetch(source: &dyn RecordSource, digits: &str) -> Option<Self> {
        let cpf = Cpf::try_from(digits).ok()?;
        source.person_by_cpf(&cpf)
    }

    fn assignments(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("nome", self.nome.as_str()),
            ("telefone", self.telefone.as_str()),
            ("empresa", self.empresa.as_str()),
        ]
    }
}

impl AutofillRecord for CompanyRecord {
    const ID_KIND: FieldKind = FieldKind::OrganizationId;
    const TARGETS: &'static [&'static str] = &[
        "nome_empresa",
        "telefone_empresa",
        "coringa",
        "nome_func",
        "telefone_func",
    ];

    fn lookup_path(digits: &str) -> Option<String> {
        Cnpj::try_from(digits).ok().map(|c| company_lookup_path(&c))
    }

    fn fetch(source: &dyn RecordSource, digits: &str) -> Option<Self> {
        let cnpj = Cnpj::try_from(digits).ok()?;
        source.company_by_cnpj(&cnpj)
    }

    fn assignments(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("nome_empresa", self.nome_empresa.as_str()),
            ("telefone_empresa", self.telefone_empresa.as_str()),
            ("coringa", self.coringa.as_str()),
            ("nome_func", self.nome_func.as_str()),
            ("telefone_func", self.telefone_func.as_str()),
        ]
    }
}

// ---------------------------------------------------------------------------
// AutofillForm
// ---------------------------------------------------------------------------

/// An outstanding lookup, issued by [`AutofillForm::begin_lookup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    digits: String,
    path: String,
    seq: u64,
}

impl LookupTicket {
    /// Identity digits the lookup was issued for.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Request path for the lookup.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Sequence number; later tickets from the same form compare greater.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// What [`AutofillForm::complete`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutofillOutcome {
    /// The record was written into the target fields.
    Applied,
    /// The identity field changed or a newer lookup was issued; nothing
    /// was written.
    Stale,
    /// No record came back; nothing was written.
    NotFound,
}

/// The identity field of a form plus the fields a lookup fills in.
///
/// Only target fields present on the page are written; a record value for
/// a field the form does not have is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutofillForm<R> {
    id_value: String,
    targets: BTreeMap<&'static str, String>,
    next_seq: u64,
    latest: Option<u64>,
    _record: PhantomData<R>,
}

impl<R: AutofillRecord> Default for AutofillForm<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: AutofillRecord> AutofillForm<R> {
    /// A form with every field of `R::TARGETS` present and empty.
    pub fn new() -> Self {
        Self::with_targets(R::TARGETS.iter().copied())
    }

    /// A form holding only the named target fields.
    ///
    /// Names outside `R::TARGETS` are ignored.
    pub fn with_targets<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let targets = names
            .into_iter()
            .filter_map(|n| R::TARGETS.iter().find(|t| **t == n).copied())
            .map(|t| (t, String::new()))
            .collect();
        Self {
            id_value: String::new(),
            targets,
            next_seq: 0,
            latest: None,
            _record: PhantomData,
        }
    }

    /// Current text of the identity field.
    pub fn id_value(&self) -> &str {
        &self.id_value
    }

    /// Replaces the identity field text, as a keystroke or paste would.
    pub fn set_id_value(&mut self, value: impl Into<String>) {
        self.id_value = value.into();
    }

    /// Current text of target field `name`, if the form has it.
    pub fn target(&self, name: &str) -> Option<&str> {
        self.targets.get(name).map(String::as_str)
    }

    /// Overwrites target field `name` if the form has it.
    pub fn set_target(&mut self, name: &str, value: impl Into<String>) {
        if let Some(slot) = self.targets.get_mut(name) {
            *slot = value.into();
        }
    }

    /// Target fields and their current text, in name order.
    pub fn targets(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.targets.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Issues a lookup for the current identity value.
    ///
    /// Returns `None` unless the field holds exactly the full digit count and
    /// the number passes validation. Issuing a ticket supersedes every ticket
    /// issued before it.
    pub fn begin_lookup(&mut self) -> Option<LookupTicket> {
        let digits = strip_non_digits(&self.id_value);
        if digits.len() != R::ID_KIND.max_digits() || check(R::ID_KIND, &digits).is_err() {
            return None;
        }
        let path = R::lookup_path(&digits)?;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.latest = Some(seq);
        Some(LookupTicket { digits, path, seq })
    }

    /// Applies a lookup response.
    ///
    /// The record is written only if `ticket` is the most recently issued
    /// one and the identity field still holds the digits it was issued for.
    pub fn complete(&mut self, ticket: &LookupTicket, record: Option<R>) -> AutofillOutcome {
        if self.latest != Some(ticket.seq) || strip_non_digits(&self.id_value) != ticket.digits {
            return AutofillOutcome::Stale;
        }
        let Some(record) = record else {
            return AutofillOutcome::NotFound;
        };
        for (name, value) in record.assignments() {
            if let Some(slot) = self.targets.get_mut(name) {
                value.clone_into(slot);
            }
        }
        AutofillOutcome::Applied
    }

    /// Issues a lookup, fetches it from `source` and applies the result.
    ///
    /// Returns `None` when no lookup was issued.
    pub fn lookup_with(&mut self, source: &dyn RecordSource) -> Option<AutofillOutcome> {
        let ticket = self.begin_lookup()?;
        let record = R::fetch(source, ticket.digits());
        Some(self.complete(&ticket, record))
    }
}

// ---------------------------------------------------------------------------
// Document autofill
// ---------------------------------------------------------------------------

/// Outcome of one identity field's lookup in [`autofill_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAutofill {
    /// Name of the identity field.
    pub field: String,
    /// What happened; `None` if no lookup was issued.
    pub outcome: Option<AutofillOutcome>,
}

fn autofill_with<R: AutofillRecord>(
    doc: &mut FormDocument,
    index: usize,
    source: &dyn RecordSource,
) -> Option<AutofillOutcome> {
    let names = doc
        .fields
        .iter()
        .map(|f| f.spec.name.as_str())
        .chain(doc.text.keys().map(String::as_str));
    let mut form = AutofillForm::<R>::with_targets(names);
    form.set_id_value(doc.fields[index].value.clone());
    let outcome = form.lookup_with(source);
    if outcome == Some(AutofillOutcome::Applied) {
        for field in &mut doc.fields {
            if let Some(value) = form.target(&field.spec.name) {
                value.clone_into(&mut field.value);
            }
        }
        for (name, slot) in &mut doc.text {
            if let Some(value) = form.target(name) {
                value.clone_into(slot);
            }
        }
    }
    outcome
}

/// Runs a lookup for every identity field of `doc` in page order and copies
/// each found record into the document's matching masked and free-text
/// fields.
pub fn autofill_document(doc: &mut FormDocument, source: &dyn RecordSource) -> Vec<FieldAutofill> {
    let mut report = Vec::new();
    for index in 0..doc.fields.len() {
        let outcome = match doc.fields[index].spec.kind {
            FieldKind::PersonalId => autofill_with::<PersonRecord>(doc, index, source),
            FieldKind::OrganizationId => autofill_with::<CompanyRecord>(doc, index, source),
            FieldKind::Phone | FieldKind::Date | FieldKind::Time => continue,
        };
        report.push(FieldAutofill {
            field: doc.fields[index].spec.name.clone(),
            outcome,
        });
    }
    report
}
