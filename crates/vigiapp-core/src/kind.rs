//! The kinds of masked form field handled by this crate.
use std::fmt;

use serde::{Deserialize, Serialize};

/// A masked input field kind.
///
/// Each kind fixes how many digits the field accepts, which digit counts are
/// complete values, and which punctuation the mask inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Personal identity number (CPF), 11 digits.
    #[serde(alias = "cpf")]
    PersonalId,
    /// Organization identity number (CNPJ), 14 digits.
    #[serde(alias = "cnpj")]
    OrganizationId,
    /// Landline (10 digits) or mobile (11 digits) phone number with area code.
    #[serde(alias = "telefone")]
    Phone,
    /// Calendar date typed as `ddmmyyyy`, displayed as `dd/mm/yyyy`.
    #[serde(alias = "data")]
    Date,
    /// Clock time typed as `hhmm`, displayed as `hh:mm`.
    #[serde(alias = "hora")]
    Time,
}

impl FieldKind {
    /// All kinds, in declaration order.
    pub const ALL: [FieldKind; 5] = [
        FieldKind::PersonalId,
        FieldKind::OrganizationId,
        FieldKind::Phone,
        FieldKind::Date,
        FieldKind::Time,
    ];

    /// Maximum number of digits the field keeps; extra digits are dropped.
    pub fn max_digits(self) -> usize {
        match self {
            Self::PersonalId | Self::Phone => 11,
            Self::OrganizationId => 14,
            Self::Date => 8,
            Self::Time => 4,
        }
    }

    /// Digit counts at which the value is complete.
    pub fn terminal_lengths(self) -> &'static [usize] {
        match self {
            Self::PersonalId => &[11],
            Self::OrganizationId => &[14],
            Self::Phone => &[10, 11],
            Self::Date => &[8],
            Self::Time => &[4],
        }
    }

    /// Smallest digit count at which the value is complete.
    pub fn min_complete_digits(self) -> usize {
        self.terminal_lengths().first().copied().unwrap_or(0)
    }

    /// Returns `true` for the check-digit protected identity numbers.
    pub fn is_identity(self) -> bool {
        matches!(self, Self::PersonalId | Self::OrganizationId)
    }

    /// Stable kebab-case code, matching the serde representation.
    pub fn code(self) -> &'static str {
        match self {
            Self::PersonalId => "personal-id",
            Self::OrganizationId => "organization-id",
            Self::Phone => "phone",
            Self::Date => "date",
            Self::Time => "time",
        }
    }

    /// Short label shown to users next to field errors.
    pub fn label(self) -> &'static str {
        match self {
            Self::PersonalId => "CPF",
            Self::OrganizationId => "CNPJ",
            Self::Phone => "Telefone",
            Self::Date => "Data",
            Self::Time => "Hora",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
