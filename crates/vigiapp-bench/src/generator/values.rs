//! Field value generators.
//!
//! Identity numbers carry correct check digits and are never a single
//! repeated digit; dates always exist on the calendar. The `bad_*` and
//! [`corrupt_check_digit`] helpers produce values each checker must reject.

use rand::Rng;
use rand::rngs::StdRng;
use vigiapp_core::calendar::days_in_month;
use vigiapp_core::{cnpj_check_digits, cpf_check_digits};

fn random_digits<const N: usize>(rng: &mut StdRng) -> [u8; N] {
    let mut out = [0u8; N];
    for d in &mut out {
        *d = rng.gen_range(0..10);
    }
    out
}

fn is_repeated(digits: &[u8]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

fn to_text(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

/// Generates a valid CPF as 11 bare digits.
pub fn gen_cpf(rng: &mut StdRng) -> String {
    loop {
        let payload: [u8; 9] = random_digits(rng);
        let mut all = payload.to_vec();
        all.extend_from_slice(&cpf_check_digits(&payload));
        if !is_repeated(&all) {
            return to_text(&all);
        }
    }
}

/// Generates a valid CNPJ as 14 bare digits.
///
/// The branch part (digits 9..12) is `0001` most of the time, as it is for
/// head offices.
pub fn gen_cnpj(rng: &mut StdRng) -> String {
    loop {
        let mut payload: [u8; 12] = random_digits(rng);
        if rng.gen_bool(0.8) {
            payload[8..12].copy_from_slice(&[0, 0, 0, 1]);
        }
        let mut all = payload.to_vec();
        all.extend_from_slice(&cnpj_check_digits(&payload));
        if !is_repeated(&all) {
            return to_text(&all);
        }
    }
}

/// Generates a phone number as bare digits: an area code `11..=99` without
/// zeros, then a 9-led mobile or a 2..=5-led landline number.
pub fn gen_phone(rng: &mut StdRng) -> String {
    let area = format!("{}{}", rng.gen_range(1..10), rng.gen_range(1..10));
    if rng.gen_bool(0.7) {
        let rest: [u8; 8] = random_digits(rng);
        format!("{area}9{}", to_text(&rest))
    } else {
        let lead = rng.gen_range(2..6);
        let rest: [u8; 7] = random_digits(rng);
        format!("{area}{lead}{}", to_text(&rest))
    }
}

/// Generates an existing date between 1950 and 2049 as `DD/MM/YYYY`.
pub fn gen_date(rng: &mut StdRng) -> String {
    let year = rng.gen_range(1950..2050);
    let month = rng.gen_range(1..=12);
    let day = rng.gen_range(1..=days_in_month(year, month));
    format!("{day:02}/{month:02}/{year:04}")
}

/// Generates a time of day as `HH:MM`.
pub fn gen_time(rng: &mut StdRng) -> String {
    format!("{:02}:{:02}", rng.gen_range(0..24), rng.gen_range(0..60))
}

/// Changes the last digit of `digits`, which breaks its second check digit.
pub fn corrupt_check_digit(digits: &str, rng: &mut StdRng) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    if let Some(last) = bytes.last_mut() {
        let shift = rng.gen_range(1..10);
        *last = b'0' + (*last - b'0' + shift) % 10;
    }
    String::from_utf8(bytes).unwrap_or_default()
}

/// Generates a `DD/MM/YYYY` string whose day does not exist.
pub fn bad_date(rng: &mut StdRng) -> String {
    let year = rng.gen_range(1950..2050);
    let month = rng.gen_range(1..=12);
    let day = days_in_month(year, month) + 1;
    format!("{day:02}/{month:02}/{year:04}")
}

/// Generates an `HH:MM` string outside the day.
pub fn bad_time(rng: &mut StdRng) -> String {
    format!("{:02}:{:02}", rng.gen_range(24..100), rng.gen_range(0..60))
}

/// Generates a phone with a digit count no phone has.
pub fn bad_phone(rng: &mut StdRng) -> String {
    let len = if rng.gen_bool(0.5) { 9 } else { 8 };
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10)))
        .collect()
}
