//! Field verdicts and whole-form checks.
//!
//! The UI layer calls [`check_field`] on keystroke or blur to set a single
//! field's error state, and [`FormCheck::run`] on submit. A form check never
//! fails fast: every failing field contributes one [`FieldDiagnostic`], and
//! submission is blocked iff at least one of them is an
//! [`Severity::Error`].
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::kind::FieldKind;
use crate::validate::{FieldError, check_progress};

// ---------------------------------------------------------------------------
// FieldSpec / FieldVerdict
// ---------------------------------------------------------------------------

/// Static description of one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name as used by the page (`cpf`, `telefone`, ...).
    pub name: String,
    /// Which mask and validator apply.
    pub kind: FieldKind,
    /// Whether an empty or incomplete value blocks submission.
    #[serde(default)]
    pub required: bool,
}

impl FieldSpec {
    /// Creates a spec for field `name`.
    pub fn new(name: impl Into<String>, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            required,
        }
    }
}

/// Result of checking a single field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldVerdict {
    /// The value is complete and valid.
    Valid,
    /// Nothing was entered (whitespace only counts as nothing).
    Empty,
    /// The value was rejected, or an identity number is still incomplete.
    Invalid(FieldError),
}

/// Checks `value` against `spec`.
///
/// Surrounding whitespace is ignored. A short identity number yields
/// `Invalid(FieldError::Incomplete { .. })`; whether that blocks submission
/// is decided by [`FormCheck`] from `spec.required`.
pub fn check_field(spec: &FieldSpec, value: &str) -> FieldVerdict {
    let value = value.trim();
    if value.is_empty() {
        return FieldVerdict::Empty;
    }
    match check_progress(spec.kind, value) {
        Ok(()) => FieldVerdict::Valid,
        Err(e) => FieldVerdict::Invalid(e),
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// User-facing message for a rejected field, in the application's language.
///
/// ```
/// use vigiapp_core::{FieldError, FieldKind, form::message};
///
/// assert_eq!(message(FieldKind::PersonalId, FieldError::ChecksumMismatch), "CPF inválido");
/// assert_eq!(message(FieldKind::Date, FieldError::CalendarOverflow), "Data inválida");
/// ```
pub fn message(kind: FieldKind, error: FieldError) -> String {
    match error {
        FieldError::MissingRequired => format!("Campo obrigatório: {}", kind.label()),
        FieldError::Incomplete { digits, needed } => {
            format!("{} incompleto ({digits} de {needed} dígitos)", kind.label())
        }
        FieldError::WrongLength { .. }
        | FieldError::AllSameDigit
        | FieldError::ChecksumMismatch
        | FieldError::PatternMismatch
        | FieldError::CalendarOverflow => match kind {
            FieldKind::Date | FieldKind::Time => format!("{} inválida", kind.label()),
            FieldKind::PersonalId | FieldKind::OrganizationId | FieldKind::Phone => {
                format!("{} inválido", kind.label())
            }
        },
    }
}

// ---------------------------------------------------------------------------
// Severity / FieldDiagnostic
// ---------------------------------------------------------------------------

/// How a failing field affects submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Blocks submission.
    Error,
    /// Shown to the user but does not block submission.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("Error"),
            Self::Warning => f.write_str("Warning"),
        }
    }
}

/// One failing field found by [`FormCheck::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDiagnostic {
    /// Name of the failing field.
    pub field: String,
    /// Kind of the failing field.
    pub kind: FieldKind,
    /// Whether the failure blocks submission.
    pub severity: Severity,
    /// Reason category.
    pub reason: FieldError,
    /// User-facing message.
    pub message: String,
}

impl FieldDiagnostic {
    /// Builds a diagnostic with the standard message for `kind` and `reason`.
    pub fn new(
        field: impl Into<String>,
        kind: FieldKind,
        severity: Severity,
        reason: FieldError,
    ) -> Self {
        Self {
            field: field.into(),
            kind,
            severity,
            reason,
            message: message(kind, reason),
        }
    }
}

impl fmt::Display for FieldDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level_char = match self.severity {
            Severity::Error => 'E',
            Severity::Warning => 'W',
        };
        write!(
            f,
            "[{level_char}] {} {}: {}",
            self.reason.code(),
            self.field,
            self.message
        )
    }
}

/// Maps a field verdict to the diagnostic it produces, if any.
///
/// Empty optional fields are fine. An incomplete identity number on an
/// optional field is only a warning.
pub fn diagnose(spec: &FieldSpec, verdict: FieldVerdict) -> Option<FieldDiagnostic> {
    let (severity, reason) = match verdict {
        FieldVerdict::Valid => return None,
        FieldVerdict::Empty if !spec.required => return None,
        FieldVerdict::Empty => (Severity::Error, FieldError::MissingRequired),
        FieldVerdict::Invalid(e @ FieldError::Incomplete { .. }) if !spec.required => {
            (Severity::Warning, e)
        }
        FieldVerdict::Invalid(e) => (Severity::Error, e),
    };
    Some(FieldDiagnostic::new(spec.name.clone(), spec.kind, severity, reason))
}

// ---------------------------------------------------------------------------
// FormCheck
// ---------------------------------------------------------------------------

/// Collected outcome of checking every field of a form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormCheck {
    /// Diagnostics in field order.
    pub diagnostics: Vec<FieldDiagnostic>,
    /// Number of fields examined.
    pub fields_checked: usize,
}

impl FormCheck {
    /// Checks every `(spec, value)` pair.
    pub fn run<'s, 'v, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'s FieldSpec, &'v str)>,
    {
        let mut out = Self::default();
        for (spec, value) in fields {
            out.fields_checked += 1;
            if let Some(d) = diagnose(spec, check_field(spec, value)) {
                out.diagnostics.push(d);
            }
        }
        out
    }

    /// Returns `true` if any diagnostic has [`Severity::Error`].
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns `true` if the form must not be submitted.
    pub fn blocks_submit(&self) -> bool {
        self.has_errors()
    }

    /// Returns an iterator over all diagnostics with [`Severity::Error`].
    pub fn errors(&self) -> impl Iterator<Item = &FieldDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    /// Returns an iterator over all diagnostics with [`Severity::Warning`].
    pub fn warnings(&self) -> impl Iterator<Item = &FieldDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// Returns `true` if no field produced a diagnostic.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ---------------------------------------------------------------------------
// FormDocument
// ---------------------------------------------------------------------------

/// A field together with the value entered for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    /// Name, kind and required flag.
    #[serde(flatten)]
    pub spec: FieldSpec,
    /// Entered value; absent means empty.
    #[serde(default)]
    pub value: String,
}

/// A form snapshot as exchanged with the command line:
/// `{"fields":[{"name":"cpf","kind":"personal-id","required":true,"value":"..."}]}`.
///
/// Free-text inputs such as a name carry no mask or validator and live in
/// the optional `text` map. Lookups may fill them but [`FormDocument::check`]
/// ignores them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormDocument {
    /// Masked fields in page order.
    pub fields: Vec<FormField>,
    /// Free-text fields by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub text: BTreeMap<String, String>,
}

impl FormDocument {
    /// Parses a form document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON, unknown field kinds
    /// or a missing `fields` array.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Runs [`FormCheck::run`] over every field.
    pub fn check(&self) -> FormCheck {
        FormCheck::run(self.fields.iter().map(|f| (&f.spec, f.value.as_str())))
    }
}

#[cfg(test)]
mod tests;
