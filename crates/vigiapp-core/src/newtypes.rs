//! Validated newtype wrappers for the values a VigiAPP form collects.
//!
//! Each newtype runs the matching checker from [`crate::validate`] at
//! construction time via [`TryFrom<&str>`] and is immutable afterwards (no
//! `DerefMut`). Serde `Deserialize` impls re-run validation so invalid data
//! cannot enter the type system from untrusted JSON.
//!
//! Identity numbers and phones store their bare digits: `Deref` yields the
//! digits and `Display` (and `Serialize`) yield the punctuated stored form.
//! Dates and times store the literal text they were built from.
use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::calendar::parse_u32_fixed;
use crate::canonical::{format_cnpj, format_cpf, format_phone};
use crate::mask::strip_non_digits;
use crate::validate::{
    FieldError, check_organization_id, check_personal_id, check_phone, parse_date, parse_time,
};

/// Implements `Deref<Target = str>` and serde for a single-`String` newtype.
///
/// `Serialize` writes the `Display` form; `Deserialize` goes back through
/// `TryFrom<&str>`.
macro_rules! validated_string {
    ($ty:ident, $label:literal) => {
        impl Deref for $ty {
            type Target = str;
            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                let s = String::deserialize(d)?;
                Self::try_from(s.as_str())
                    .map_err(|e| de::Error::custom(format_args!("invalid {}: {e}", $label)))
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Cpf
// ---------------------------------------------------------------------------

/// A personal identity number that passed the check-digit test.
///
/// Accepts the value with or without punctuation.
///
/// ```
/// use vigiapp_core::newtypes::Cpf;
///
/// let cpf = Cpf::try_from("111.444.777-35").unwrap();
/// assert_eq!(cpf.digits(), "11144477735");
/// assert_eq!(cpf.to_string(), "111.444.777-35");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cpf(String);

impl TryFrom<&str> for Cpf {
    type Error = FieldError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        check_personal_id(s)?;
        Ok(Self(strip_non_digits(s)))
    }
}

impl Cpf {
    /// The 11 bare digits.
    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_cpf(&self.0))
    }
}

validated_string!(Cpf, "CPF");

// ---------------------------------------------------------------------------
// Cnpj
// ---------------------------------------------------------------------------

/// An organization identity number that passed the check-digit test.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cnpj(String);

impl TryFrom<&str> for Cnpj {
    type Error = FieldError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        check_organization_id(s)?;
        Ok(Self(strip_non_digits(s)))
    }
}

impl Cnpj {
    /// The 14 bare digits.
    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cnpj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_cnpj(&self.0))
    }
}

validated_string!(Cnpj, "CNPJ");

// ---------------------------------------------------------------------------
// Phone
// ---------------------------------------------------------------------------

/// A phone number with area code: 10 digits for a landline, 11 for a mobile.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Phone(String);

impl TryFrom<&str> for Phone {
    type Error = FieldError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        check_phone(s)?;
        Ok(Self(strip_non_digits(s)))
    }
}

impl Phone {
    /// The 10 or 11 bare digits.
    pub fn digits(&self) -> &str {
        &self.0
    }

    /// Two-digit area code.
    pub fn area_code(&self) -> &str {
        &self.0[..2]
    }

    /// Returns `true` for an 11-digit (mobile) number.
    pub fn is_mobile(&self) -> bool {
        self.0.len() == 11
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_phone(&self.0))
    }
}

validated_string!(Phone, "telefone");

// ---------------------------------------------------------------------------
// BrDate
// ---------------------------------------------------------------------------

/// A real calendar date written as `DD/MM/YYYY`.
///
/// The original text is stored; components are parsed on demand from fixed
/// positions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BrDate(String);

impl TryFrom<&str> for BrDate {
    type Error = FieldError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        parse_date(s)?;
        Ok(Self(s.to_owned()))
    }
}

impl BrDate {
    fn field(&self, start: usize, end: usize) -> u32 {
        parse_u32_fixed(&self.0.as_bytes()[start..end])
    }

    /// Day of month, `1..=31`.
    pub fn day(&self) -> u32 {
        self.field(0, 2)
    }

    /// Month, `1..=12`.
    pub fn month(&self) -> u32 {
        self.field(3, 5)
    }

    /// Four-digit year.
    pub fn year(&self) -> u32 {
        self.field(6, 10)
    }

    /// The same date as ISO 8601 `YYYY-MM-DD`.
    ///
    /// ```
    /// use vigiapp_core::newtypes::BrDate;
    ///
    /// let d = BrDate::try_from("07/09/1822").unwrap();
    /// assert_eq!(d.to_iso(), "1822-09-07");
    /// ```
    pub fn to_iso(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl PartialOrd for BrDate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BrDate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.year(), self.month(), self.day()).cmp(&(other.year(), other.month(), other.day()))
    }
}

impl fmt::Display for BrDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

validated_string!(BrDate, "data");

// ---------------------------------------------------------------------------
// ClockTime
// ---------------------------------------------------------------------------

/// A wall-clock time written as `HH:MM`, between `00:00` and `23:59`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(String);

impl TryFrom<&str> for ClockTime {
    type Error = FieldError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        parse_time(s)?;
        Ok(Self(s.to_owned()))
    }
}

impl ClockTime {
    /// Hour, `0..=23`.
    pub fn hour(&self) -> u32 {
        parse_u32_fixed(&self.0.as_bytes()[0..2])
    }

    /// Minute, `0..=59`.
    pub fn minute(&self) -> u32 {
        parse_u32_fixed(&self.0.as_bytes()[3..5])
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

validated_string!(ClockTime, "hora");
