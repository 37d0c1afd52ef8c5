//! Field validators and the failure taxonomy they report.
//!
//! Every validator exists in two forms: `check_*` returns the precise
//! [`FieldError`] for a rejected value, and `validate_*` collapses the result
//! to a boolean. Identity numbers, phones and the digit-count part of each
//! check operate on the digits of the input, so punctuation is ignored. Dates
//! and times are matched against their literal layout.
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::calendar::{is_real_date, parse_u32_fixed};
use crate::check_digits::{ORGANIZATION_ID_LEN, PERSONAL_ID_LEN, cnpj_mod11, cpf_mod11};
use crate::kind::FieldKind;
use crate::mask::strip_non_digits;

// ---------------------------------------------------------------------------
// FieldError
// ---------------------------------------------------------------------------

/// Why a field value was not accepted.
///
/// None of these are fatal: they drive a field's error state and, depending
/// on whether the field is required, whether the form may be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldError {
    /// Fewer digits than the kind needs; not yet judged valid or invalid.
    Incomplete {
        /// Digits present.
        digits: usize,
        /// Digits needed for the shortest complete value.
        needed: usize,
    },
    /// A digit count that no complete value of this kind has.
    WrongLength {
        /// Digits present.
        digits: usize,
    },
    /// Every digit is identical. Such sequences pass the checksum trivially
    /// but are never issued.
    AllSameDigit,
    /// Length and structure are correct but a check digit is wrong.
    ChecksumMismatch,
    /// The text does not follow the literal `DD/MM/YYYY` or `HH:MM` layout.
    PatternMismatch,
    /// Day or month out of range for the given month and year.
    CalendarOverflow,
    /// The field is required and was left empty.
    MissingRequired,
}

impl FieldError {
    /// Stable kebab-case reason code used in machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Incomplete { .. } => "incomplete",
            Self::WrongLength { .. } => "wrong-length",
            Self::AllSameDigit => "all-same-digit",
            Self::ChecksumMismatch => "checksum-mismatch",
            Self::PatternMismatch => "pattern-mismatch",
            Self::CalendarOverflow => "calendar-overflow",
            Self::MissingRequired => "missing-required",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incomplete { digits, needed } => {
                write!(f, "incomplete: {digits} of {needed} digits")
            }
            Self::WrongLength { digits } => write!(f, "wrong length: {digits} digits"),
            Self::AllSameDigit => f.write_str("all digits are identical"),
            Self::ChecksumMismatch => f.write_str("check digit mismatch"),
            Self::PatternMismatch => f.write_str("does not match the expected layout"),
            Self::CalendarOverflow => f.write_str("no such calendar day"),
            Self::MissingRequired => f.write_str("required field is empty"),
        }
    }
}

impl std::error::Error for FieldError {}

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

/// `DD/MM/YYYY`, ASCII digits only.
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{2})/([0-9]{2})/([0-9]{4})$")
        .unwrap_or_else(|_| Regex::new("a^").unwrap_or_else(|_| unreachable!("regex engine broken")))
});

/// `HH:MM` within 00:00..=23:59.
static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$")
        .unwrap_or_else(|_| Regex::new("a^").unwrap_or_else(|_| unreachable!("regex engine broken")))
});

/// `(dd) dddd-dddd` or `(dd) ddddd-dddd`.
static FORMATTED_PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\([0-9]{2}\) [0-9]{4,5}-[0-9]{4}$")
        .unwrap_or_else(|_| Regex::new("a^").unwrap_or_else(|_| unreachable!("regex engine broken")))
});

// ---------------------------------------------------------------------------
// Identity numbers
// ---------------------------------------------------------------------------

/// Returns `true` if every byte of the non-empty `digits` is the same.
fn all_same_digit(digits: &str) -> bool {
    let bytes = digits.as_bytes();
    match bytes.first() {
        Some(first) => bytes.iter().all(|b| b == first),
        None => false,
    }
}

/// Shared length, repetition and checksum sequence for both identity numbers.
fn check_identity(value: &str, len: usize, checksum: fn(&str) -> bool) -> Result<(), FieldError> {
    let digits = strip_non_digits(value);
    if digits.len() != len {
        return Err(FieldError::WrongLength {
            digits: digits.len(),
        });
    }
    if all_same_digit(&digits) {
        return Err(FieldError::AllSameDigit);
    }
    if !checksum(&digits) {
        return Err(FieldError::ChecksumMismatch);
    }
    Ok(())
}

/// Checks a personal identity number (CPF), with or without punctuation.
///
/// # Errors
///
/// - [`FieldError::WrongLength`] unless exactly 11 digits are present.
/// - [`FieldError::AllSameDigit`] for sequences like `00000000000`.
/// - [`FieldError::ChecksumMismatch`] when either check digit is wrong.
pub fn check_personal_id(value: &str) -> Result<(), FieldError> {
    check_identity(value, PERSONAL_ID_LEN, cpf_mod11)
}

/// Checks an organization identity number (CNPJ), with or without
/// punctuation.
///
/// # Errors
///
/// - [`FieldError::WrongLength`] unless exactly 14 digits are present.
/// - [`FieldError::AllSameDigit`] for sequences like `00000000000000`.
/// - [`FieldError::ChecksumMismatch`] when either check digit is wrong.
pub fn check_organization_id(value: &str) -> Result<(), FieldError> {
    check_identity(value, ORGANIZATION_ID_LEN, cnpj_mod11)
}

/// Returns `true` if `value` is a valid personal identity number.
///
/// ```
/// use vigiapp_core::validate::validate_personal_id;
///
/// assert!(validate_personal_id("111.444.777-35"));
/// assert!(!validate_personal_id("11111111111"));
/// ```
pub fn validate_personal_id(value: &str) -> bool {
    check_personal_id(value).is_ok()
}

/// Returns `true` if `value` is a valid organization identity number.
///
/// ```
/// use vigiapp_core::validate::validate_organization_id;
///
/// assert!(validate_organization_id("11.222.333/0001-81"));
/// assert!(!validate_organization_id("11222333000180"));
/// ```
pub fn validate_organization_id(value: &str) -> bool {
    check_organization_id(value).is_ok()
}

// ---------------------------------------------------------------------------
// Phone
// ---------------------------------------------------------------------------

/// Checks that a phone number has 10 (landline) or 11 (mobile) digits.
///
/// # Errors
///
/// [`FieldError::WrongLength`] for any other digit count.
pub fn check_phone(value: &str) -> Result<(), FieldError> {
    let digits = strip_non_digits(value).len();
    if digits == 10 || digits == 11 {
        Ok(())
    } else {
        Err(FieldError::WrongLength { digits })
    }
}

/// Returns `true` if `value` holds 10 or 11 digits.
pub fn validate_phone(value: &str) -> bool {
    check_phone(value).is_ok()
}

/// Checks that a phone number is already fully punctuated, as the server
/// stores it: `(dd) dddd-dddd` or `(dd) ddddd-dddd`.
///
/// # Errors
///
/// [`FieldError::PatternMismatch`] for any other layout.
pub fn check_formatted_phone(value: &str) -> Result<(), FieldError> {
    if FORMATTED_PHONE_RE.is_match(value) {
        Ok(())
    } else {
        Err(FieldError::PatternMismatch)
    }
}

// ---------------------------------------------------------------------------
// Date and time
// ---------------------------------------------------------------------------

/// Splits a `DD/MM/YYYY` string into `(day, month, year)` after checking the
/// literal layout and the calendar.
///
/// # Errors
///
/// - [`FieldError::PatternMismatch`] if the layout is wrong.
/// - [`FieldError::CalendarOverflow`] if the day does not exist.
pub fn parse_date(value: &str) -> Result<(u32, u32, u32), FieldError> {
    if !DATE_RE.is_match(value) {
        return Err(FieldError::PatternMismatch);
    }
    // The pattern fixes every byte position.
    let bytes = value.as_bytes();
    let day = parse_u32_fixed(&bytes[0..2]);
    let month = parse_u32_fixed(&bytes[3..5]);
    let year = parse_u32_fixed(&bytes[6..10]);
    if !is_real_date(day, month, year) {
        return Err(FieldError::CalendarOverflow);
    }
    Ok((day, month, year))
}

/// Checks a `DD/MM/YYYY` date.
///
/// # Errors
///
/// See [`parse_date`].
pub fn check_date(value: &str) -> Result<(), FieldError> {
    parse_date(value).map(|_| ())
}

/// Returns `true` if `value` is a real calendar date in `DD/MM/YYYY` form.
///
/// ```
/// use vigiapp_core::validate::validate_date;
///
/// assert!(validate_date("29/02/2024"));
/// assert!(!validate_date("29/02/2023"));
/// ```
pub fn validate_date(value: &str) -> bool {
    check_date(value).is_ok()
}

/// Splits an `HH:MM` string into `(hour, minute)`.
///
/// # Errors
///
/// [`FieldError::PatternMismatch`] unless the value matches `HH:MM` with
/// the hour in `00..=23` and the minute in `00..=59`.
pub fn parse_time(value: &str) -> Result<(u32, u32), FieldError> {
    if !TIME_RE.is_match(value) {
        return Err(FieldError::PatternMismatch);
    }
    let bytes = value.as_bytes();
    Ok((parse_u32_fixed(&bytes[0..2]), parse_u32_fixed(&bytes[3..5])))
}

/// Checks an `HH:MM` time.
///
/// # Errors
///
/// See [`parse_time`].
pub fn check_time(value: &str) -> Result<(), FieldError> {
    parse_time(value).map(|_| ())
}

/// Returns `true` if `value` is a valid `HH:MM` time.
pub fn validate_time(value: &str) -> bool {
    check_time(value).is_ok()
}

// ---------------------------------------------------------------------------
// Dispatch by kind
// ---------------------------------------------------------------------------

/// Runs the checker for `kind` on a complete value.
///
/// # Errors
///
/// The [`FieldError`] reported by the kind-specific checker.
pub fn check(kind: FieldKind, value: &str) -> Result<(), FieldError> {
    match kind {
        FieldKind::PersonalId => check_personal_id(value),
        FieldKind::OrganizationId => check_organization_id(value),
        FieldKind::Phone => check_phone(value),
        FieldKind::Date => check_date(value),
        FieldKind::Time => check_time(value),
    }
}

/// Like [`check`], but reports [`FieldError::Incomplete`] instead of
/// [`FieldError::WrongLength`] while an identity number is still short.
///
/// Only identity numbers have an incomplete state; a short phone, date or
/// time is simply invalid.
///
/// # Errors
///
/// [`FieldError::Incomplete`] for short identity numbers, otherwise whatever
/// [`check`] reports.
pub fn check_progress(kind: FieldKind, value: &str) -> Result<(), FieldError> {
    if kind.is_identity() {
        let digits = strip_non_digits(value).len();
        let needed = kind.min_complete_digits();
        if digits < needed {
            return Err(FieldError::Incomplete { digits, needed });
        }
    }
    check(kind, value)
}
