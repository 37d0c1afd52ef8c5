//! Form document generator.
//!
//! Produces [`FormDocument`]s shaped like the visitor and delivery forms,
//! with a configurable share of rejected values, plus the keystroke-by-
//! keystroke inputs a user produces while typing them.

pub mod values;

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vigiapp_core::{FieldKind, FieldSpec, FormDocument, FormField, mask};

use values::{
    bad_date, bad_phone, bad_time, corrupt_check_digit, gen_cnpj, gen_cpf, gen_date, gen_phone,
    gen_time,
};

/// Configuration for the form generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for the random number generator (deterministic).
    pub seed: u64,
    /// Number of form documents.
    pub forms: usize,
    /// Probability that any one field holds a rejected value (0.0-1.0).
    pub invalid_ratio: f64,
    /// Probability that a value is stored masked rather than as bare digits.
    pub masked_ratio: f64,
}

/// Predefined corpus sizes for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// 100 forms.
    Small,
    /// 1 000 forms.
    Medium,
    /// 10 000 forms.
    Large,
}

impl SizeTier {
    /// Returns the default `GeneratorConfig` for this size tier.
    pub fn config(self, seed: u64) -> GeneratorConfig {
        let forms = match self {
            SizeTier::Small => 100,
            SizeTier::Medium => 1_000,
            SizeTier::Large => 10_000,
        };
        GeneratorConfig {
            seed,
            forms,
            invalid_ratio: 0.2,
            masked_ratio: 0.5,
        }
    }
}

fn value_for(kind: FieldKind, invalid: bool, rng: &mut StdRng) -> String {
    match (kind, invalid) {
        (FieldKind::PersonalId, false) => gen_cpf(rng),
        (FieldKind::PersonalId, true) => {
            let cpf = gen_cpf(rng);
            corrupt_check_digit(&cpf, rng)
        }
        (FieldKind::OrganizationId, false) => gen_cnpj(rng),
        (FieldKind::OrganizationId, true) => {
            let cnpj = gen_cnpj(rng);
            corrupt_check_digit(&cnpj, rng)
        }
        (FieldKind::Phone, false) => gen_phone(rng),
        (FieldKind::Phone, true) => bad_phone(rng),
        (FieldKind::Date, false) => gen_date(rng),
        (FieldKind::Date, true) => bad_date(rng),
        (FieldKind::Time, false) => gen_time(rng),
        (FieldKind::Time, true) => bad_time(rng),
    }
}

fn field(name: &str, kind: FieldKind, config: &GeneratorConfig, rng: &mut StdRng) -> FormField {
    let invalid = rng.gen_bool(config.invalid_ratio);
    let mut value = value_for(kind, invalid, rng);
    if (kind.is_identity() || kind == FieldKind::Phone) && rng.gen_bool(config.masked_ratio) {
        value = mask(kind, &value);
    }
    FormField {
        spec: FieldSpec::new(name, kind, true),
        value,
    }
}

/// A visitor registration: CPF, phone, date and time of arrival.
pub fn visitor_form(config: &GeneratorConfig, rng: &mut StdRng) -> FormDocument {
    FormDocument {
        fields: vec![
            field("cpf", FieldKind::PersonalId, config, rng),
            field("telefone", FieldKind::Phone, config, rng),
            field("data", FieldKind::Date, config, rng),
            field("hora", FieldKind::Time, config, rng),
        ],
        text: BTreeMap::from([
            ("nome".to_owned(), String::new()),
            ("empresa".to_owned(), String::new()),
        ]),
    }
}

/// A delivery registration: CNPJ, company and courier phones, date and time.
pub fn delivery_form(config: &GeneratorConfig, rng: &mut StdRng) -> FormDocument {
    FormDocument {
        fields: vec![
            field("cnpj", FieldKind::OrganizationId, config, rng),
            field("telefone_empresa", FieldKind::Phone, config, rng),
            field("telefone_func", FieldKind::Phone, config, rng),
            field("data", FieldKind::Date, config, rng),
            field("hora", FieldKind::Time, config, rng),
        ],
        text: BTreeMap::from([
            ("nome_empresa".to_owned(), String::new()),
            ("coringa".to_owned(), String::new()),
            ("nome_func".to_owned(), String::new()),
        ]),
    }
}

/// Generates `config.forms` documents, visitor and delivery forms mixed.
///
/// All randomness is deterministic, seeded from `config.seed`.
pub fn generate_forms(config: &GeneratorConfig) -> Vec<FormDocument> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    (0..config.forms)
        .map(|_| {
            if rng.gen_bool(0.5) {
                visitor_form(config, &mut rng)
            } else {
                delivery_form(config, &mut rng)
            }
        })
        .collect()
}

/// Every intermediate input of typing each field of `docs` one character at
/// a time, as `(kind, text so far)`.
pub fn keystrokes(docs: &[FormDocument]) -> Vec<(FieldKind, String)> {
    let mut out = Vec::new();
    for doc in docs {
        for f in &doc.fields {
            let mut typed = String::with_capacity(f.value.len());
            for ch in f.value.chars() {
                typed.push(ch);
                out.push((f.spec.kind, typed.clone()));
            }
        }
    }
    out
}
