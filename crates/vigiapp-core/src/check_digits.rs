//! Check-digit arithmetic for the two national identity numbers.
//!
//! Both schemes use the same mod-11 reduction: the weighted sum of the payload
//! digits is taken modulo 11, and the check digit is `0` when the remainder is
//! below 2, otherwise `11 - remainder`. Each number carries two check digits;
//! the second pass treats the first check digit as part of the payload.
//!
//! The verifiers work directly on the bytes of the input slice without heap
//! allocation. Callers strip punctuation first; any non-digit byte makes the
//! verification fail.
//!
//! # Weights
//!
//! - Personal id (CPF): weights descend from `len + 1` down to 2, left to
//!   right (10..2 for the first pass, 11..2 for the second).
//! - Organization id (CNPJ): weights cycle 2..9 starting at the rightmost
//!   payload digit and moving left, restarting at 2 after 9. For the
//!   12-digit first pass this gives `5 4 3 2 9 8 7 6 5 4 3 2`; for the
//!   13-digit second pass `6 5 4 3 2 9 8 7 6 5 4 3 2`.

/// Number of digits in a personal identity number.
pub const PERSONAL_ID_LEN: usize = 11;

/// Number of digits in an organization identity number.
pub const ORGANIZATION_ID_LEN: usize = 14;

/// Reduces a weighted sum to a single mod-11 check digit.
fn mod11_digit(sum: u32) -> u8 {
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        // remainder is in 2..=10, so the result is a single digit.
        (11 - remainder) as u8
    }
}

/// Weight of position `i` in a personal-id payload of length `len`.
fn personal_weight(len: usize, i: usize) -> u32 {
    (len + 1 - i) as u32
}

/// Weight of position `i` in an organization-id payload of length `len`.
///
/// Counting from the rightmost payload digit (offset 0), the weight is
/// `2 + offset % 8`.
fn organization_weight(len: usize, i: usize) -> u32 {
    let offset_from_right = len - 1 - i;
    2 + (offset_from_right % 8) as u32
}

/// Computes one check digit over `payload` using the supplied weight function.
fn check_digit(payload: &[u8], weight: fn(usize, usize) -> u32) -> u8 {
    let len = payload.len();
    let sum: u32 = payload
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * weight(len, i))
        .sum();
    mod11_digit(sum)
}

/// Computes both check digits for a 9-digit personal-id payload.
///
/// Each element of `payload` is a digit value in `0..=9`.
///
/// # Examples
///
/// ```
/// use vigiapp_core::check_digits::cpf_check_digits;
///
/// assert_eq!(cpf_check_digits(&[1, 1, 1, 4, 4, 4, 7, 7, 7]), [3, 5]);
/// ```
pub fn cpf_check_digits(payload: &[u8; 9]) -> [u8; 2] {
    let first = check_digit(payload, personal_weight);
    let mut extended = [0u8; 10];
    extended[..9].copy_from_slice(payload);
    extended[9] = first;
    let second = check_digit(&extended, personal_weight);
    [first, second]
}

/// Computes both check digits for a 12-digit organization-id payload.
///
/// Each element of `payload` is a digit value in `0..=9`.
///
/// # Examples
///
/// ```
/// use vigiapp_core::check_digits::cnpj_check_digits;
///
/// assert_eq!(
///     cnpj_check_digits(&[1, 1, 2, 2, 2, 3, 3, 3, 0, 0, 0, 1]),
///     [8, 1]
/// );
/// ```
pub fn cnpj_check_digits(payload: &[u8; 12]) -> [u8; 2] {
    let first = check_digit(payload, organization_weight);
    let mut extended = [0u8; 13];
    extended[..12].copy_from_slice(payload);
    extended[12] = first;
    let second = check_digit(&extended, organization_weight);
    [first, second]
}

/// Converts an ASCII digit string into digit values, or `None` if the length
/// differs from `N` or any byte is not an ASCII digit.
fn digit_values<const N: usize>(s: &str) -> Option<[u8; N]> {
    let bytes = s.as_bytes();
    if bytes.len() != N {
        return None;
    }
    let mut out = [0u8; N];
    for (slot, &byte) in out.iter_mut().zip(bytes) {
        if !byte.is_ascii_digit() {
            return None;
        }
        *slot = byte - b'0';
    }
    Some(out)
}

/// Verifies both check digits of an 11-digit personal identity number.
///
/// **Pre-condition:** `cpf` holds digits only (punctuation already
/// stripped). Wrong length or any non-digit byte returns `false`. This
/// function does not reject repeated-digit sequences; that is a separate
/// structural rule applied by [`crate::validate::check_personal_id`].
///
/// # Examples
///
/// ```
/// use vigiapp_core::check_digits::cpf_mod11;
///
/// assert!(cpf_mod11("11144477735"));
/// assert!(!cpf_mod11("11144477736"));
/// ```
pub fn cpf_mod11(cpf: &str) -> bool {
    let Some(digits) = digit_values::<PERSONAL_ID_LEN>(cpf) else {
        return false;
    };
    let mut payload = [0u8; 9];
    payload.copy_from_slice(&digits[..9]);
    cpf_check_digits(&payload) == [digits[9], digits[10]]
}

/// Verifies both check digits of a 14-digit organization identity number.
///
/// **Pre-condition:** `cnpj` holds digits only. Wrong length or any
/// non-digit byte returns `false`.
///
/// # Examples
///
/// ```
/// use vigiapp_core::check_digits::cnpj_mod11;
///
/// assert!(cnpj_mod11("11222333000181"));
/// assert!(!cnpj_mod11("11222333000180"));
/// ```
pub fn cnpj_mod11(cnpj: &str) -> bool {
    let Some(digits) = digit_values::<ORGANIZATION_ID_LEN>(cnpj) else {
        return false;
    };
    let mut payload = [0u8; 12];
    payload.copy_from_slice(&digits[..12]);
    cnpj_check_digits(&payload) == [digits[12], digits[13]]
}
