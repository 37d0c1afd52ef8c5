//! Keystroke masking for formatted input fields.
//!
//! Every mask first strips the input down to its ASCII digits, truncates to
//! the field's capacity and then re-inserts punctuation. Output therefore
//! depends only on the digit prefix: whatever separators the user typed (or
//! a previous mask inserted) are irrelevant, and masking is idempotent.
//!
//! Each field kind owns an ordered rule table. A rule applies when the digit
//! count is strictly greater than its threshold; tables are scanned from the
//! highest threshold down and the first applicable rule formats the value.
//! A separator is only written once the group that follows it has at least
//! one digit, so partial values never end in dangling punctuation.

use crate::kind::FieldKind;

/// One group of a mask template: the separator written before the group and
/// the maximum number of digits the group holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group {
    /// Text emitted before the group's first digit.
    pub prefix: &'static str,
    /// Maximum digits in the group; the final group may be partially filled.
    pub width: usize,
}

const fn group(prefix: &'static str, width: usize) -> Group {
    Group { prefix, width }
}

/// A length-bounded mask rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskRule {
    /// The rule applies when the digit count is greater than this value.
    pub above: usize,
    /// Groups laid out left to right.
    pub groups: &'static [Group],
}

const fn rule(above: usize, groups: &'static [Group]) -> MaskRule {
    MaskRule { above, groups }
}

/// `ddd.ddd.ddd-dd`
static PERSONAL_ID_RULES: &[MaskRule] = &[
    rule(9, &[group("", 3), group(".", 3), group(".", 3), group("-", 2)]),
    rule(6, &[group("", 3), group(".", 3), group(".", 3)]),
    rule(3, &[group("", 3), group(".", 3)]),
    rule(0, &[group("", 3)]),
];

/// `dd.ddd.ddd/dddd-dd`
static ORGANIZATION_ID_RULES: &[MaskRule] = &[
    rule(
        12,
        &[
            group("", 2),
            group(".", 3),
            group(".", 3),
            group("/", 4),
            group("-", 2),
        ],
    ),
    rule(
        8,
        &[group("", 2), group(".", 3), group(".", 3), group("/", 4)],
    ),
    rule(5, &[group("", 2), group(".", 3), group(".", 3)]),
    rule(2, &[group("", 2), group(".", 3)]),
    rule(0, &[group("", 2)]),
];

/// `(dd) ddddd-dddd` for mobile numbers, `(dd) dddd-dddd` for landlines.
///
/// Up to six digits the subscriber part is shown as one group; the hyphen
/// only appears once the seventh digit arrives.
static PHONE_RULES: &[MaskRule] = &[
    rule(10, &[group("(", 2), group(") ", 5), group("-", 4)]),
    rule(6, &[group("(", 2), group(") ", 4), group("-", 4)]),
    rule(2, &[group("(", 2), group(") ", 5)]),
    rule(0, &[group("", 2)]),
];

/// `dd/mm/yyyy`
static DATE_RULES: &[MaskRule] = &[
    rule(4, &[group("", 2), group("/", 2), group("/", 4)]),
    rule(2, &[group("", 2), group("/", 2)]),
    rule(0, &[group("", 2)]),
];

/// `hh:mm`
static TIME_RULES: &[MaskRule] = &[
    rule(2, &[group("", 2), group(":", 2)]),
    rule(0, &[group("", 2)]),
];

/// Returns the ordered rule table for `kind`.
pub fn rules_for(kind: FieldKind) -> &'static [MaskRule] {
    match kind {
        FieldKind::PersonalId => PERSONAL_ID_RULES,
        FieldKind::OrganizationId => ORGANIZATION_ID_RULES,
        FieldKind::Phone => PHONE_RULES,
        FieldKind::Date => DATE_RULES,
        FieldKind::Time => TIME_RULES,
    }
}

/// Removes every character that is not an ASCII digit.
///
/// # Examples
///
/// ```
/// use vigiapp_core::mask::strip_non_digits;
///
/// assert_eq!(strip_non_digits("111.444.777-35"), "11144477735");
/// assert_eq!(strip_non_digits("(11) 9 8765"), "1198765");
/// ```
pub fn strip_non_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Strips `input` to digits and truncates to the capacity of `kind`.
pub fn raw_digits(kind: FieldKind, input: &str) -> String {
    let mut digits = strip_non_digits(input);
    digits.truncate(kind.max_digits());
    digits
}

/// Lays `digits` out according to `groups`.
///
/// Digits beyond the template's total width are dropped.
fn apply_groups(digits: &str, groups: &[Group]) -> String {
    let mut out = String::with_capacity(digits.len() + 6);
    let mut rest = digits;
    for g in groups {
        if rest.is_empty() {
            break;
        }
        let take = g.width.min(rest.len());
        out.push_str(g.prefix);
        out.push_str(&rest[..take]);
        rest = &rest[take..];
    }
    out
}

/// Masks `input` for a field of the given `kind`.
///
/// # Examples
///
/// ```
/// use vigiapp_core::{FieldKind, mask::mask};
///
/// assert_eq!(mask(FieldKind::PersonalId, "1114447"), "111.444.7");
/// assert_eq!(mask(FieldKind::Time, "0930"), "09:30");
/// ```
pub fn mask(kind: FieldKind, input: &str) -> String {
    let digits = raw_digits(kind, input);
    let len = digits.len();
    match rules_for(kind).iter().find(|r| len > r.above) {
        Some(r) => apply_groups(&digits, r.groups),
        None => digits,
    }
}

/// Masks a personal identity number as `ddd.ddd.ddd-dd`.
pub fn mask_personal_id(input: &str) -> String {
    mask(FieldKind::PersonalId, input)
}

/// Masks an organization identity number as `dd.ddd.ddd/dddd-dd`.
pub fn mask_organization_id(input: &str) -> String {
    mask(FieldKind::OrganizationId, input)
}

/// Masks a phone number as `(dd) dddd-dddd` or `(dd) ddddd-dddd`.
pub fn mask_phone(input: &str) -> String {
    mask(FieldKind::Phone, input)
}

/// Masks a date as `dd/mm/yyyy`.
pub fn mask_date(input: &str) -> String {
    mask(FieldKind::Date, input)
}

/// Masks a time as `hh:mm`.
pub fn mask_time(input: &str) -> String {
    mask(FieldKind::Time, input)
}
