//! Gregorian calendar rules used by date validation.
//!
//! Month lengths come from an explicit table rather than from normalising a
//! date value, so `31/02` is rejected instead of rolling over into March.

/// Returns `true` if `year` is a Gregorian leap year.
pub fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Returns the number of days in `month` (1-based) of `year`.
///
/// Returns `0` for a month outside `1..=12`.
pub fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Earliest year a date field accepts.
///
/// The web form reads years below 100 as 19xx and then rejects them, so
/// `01/01/0050` is never a valid entry.
pub const MIN_YEAR: u32 = 100;

/// Returns `true` if `day/month/year` names an existing calendar day.
///
/// Years below [`MIN_YEAR`] are rejected.
pub fn is_real_date(day: u32, month: u32, year: u32) -> bool {
    if year < MIN_YEAR || !(1..=12).contains(&month) {
        return false;
    }
    day >= 1 && day <= days_in_month(year, month)
}

/// Parses a fixed-width ASCII decimal slice into a `u32`.
///
/// **Pre-condition:** every byte is an ASCII digit (guaranteed by the
/// callers' regex pre-check) and the slice has at most 9 bytes.
pub(crate) fn parse_u32_fixed(bytes: &[u8]) -> u32 {
    let mut n: u32 = 0;
    for &b in bytes {
        n = n * 10 + u32::from(b.wrapping_sub(b'0'));
    }
    n
}
