//! Canonical stored forms for identity numbers and phones.
//!
//! Unlike [`crate::mask`], which punctuates whatever prefix has been typed,
//! these functions only punctuate a value whose digit count is a complete
//! length for its kind. Anything else comes back as bare digits, which is
//! how partially entered values are persisted and compared.
use crate::check_digits::{ORGANIZATION_ID_LEN, PERSONAL_ID_LEN};
use crate::kind::FieldKind;
use crate::mask::{mask, strip_non_digits};

/// Punctuates `value` when its digits form a complete value of `kind`,
/// otherwise returns the digits unchanged.
fn format_complete(kind: FieldKind, value: &str, complete: &[usize]) -> String {
    let digits = strip_non_digits(value);
    if complete.contains(&digits.len()) {
        mask(kind, &digits)
    } else {
        digits
    }
}

/// Stored form of a personal identity number.
///
/// ```
/// use vigiapp_core::canonical::format_cpf;
///
/// assert_eq!(format_cpf("11144477735"), "111.444.777-35");
/// assert_eq!(format_cpf("111.444"), "111444");
/// ```
pub fn format_cpf(value: &str) -> String {
    format_complete(FieldKind::PersonalId, value, &[PERSONAL_ID_LEN])
}

/// Stored form of an organization identity number.
pub fn format_cnpj(value: &str) -> String {
    format_complete(FieldKind::OrganizationId, value, &[ORGANIZATION_ID_LEN])
}

/// Stored form of a phone number: `(dd) dddd-dddd` for 10 digits,
/// `(dd) ddddd-dddd` for 11, bare digits otherwise.
pub fn format_phone(value: &str) -> String {
    format_complete(
        FieldKind::Phone,
        value,
        FieldKind::Phone.terminal_lengths(),
    )
}

/// Stored form of a value of any kind.
///
/// Dates and times have no separate stored layout and are returned as
/// typed.
pub fn format_canonical(kind: FieldKind, value: &str) -> String {
    match kind {
        FieldKind::PersonalId => format_cpf(value),
        FieldKind::OrganizationId => format_cnpj(value),
        FieldKind::Phone => format_phone(value),
        FieldKind::Date | FieldKind::Time => value.to_owned(),
    }
}
