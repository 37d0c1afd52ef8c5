//! Tests that generated values and forms are what they claim to be.
#![allow(clippy::expect_used)]

use rand::SeedableRng;
use rand::rngs::StdRng;
use vigiapp_bench::generator::values::{
    bad_date, bad_phone, bad_time, corrupt_check_digit, gen_cnpj, gen_cpf, gen_date, gen_phone,
    gen_time,
};
use vigiapp_bench::{GeneratorConfig, SizeTier, generate_forms};
use vigiapp_core::{
    FieldError, FieldKind, check, validate_date, validate_organization_id, validate_personal_id,
    validate_phone, validate_time,
};

#[test]
fn generated_values_are_valid() {
    for seed in [42, 123, 999, 7777, 54321] {
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..200 {
            let cpf = gen_cpf(&mut rng);
            assert!(validate_personal_id(&cpf), "seed={seed} cpf={cpf}");
            let cnpj = gen_cnpj(&mut rng);
            assert!(validate_organization_id(&cnpj), "seed={seed} cnpj={cnpj}");
            let phone = gen_phone(&mut rng);
            assert!(validate_phone(&phone), "seed={seed} phone={phone}");
            let date = gen_date(&mut rng);
            assert!(validate_date(&date), "seed={seed} date={date}");
            let time = gen_time(&mut rng);
            assert!(validate_time(&time), "seed={seed} time={time}");
        }
    }
}

#[test]
fn corrupted_identity_numbers_are_rejected() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let cpf = corrupt_check_digit(&gen_cpf(&mut rng), &mut rng);
        assert!(!validate_personal_id(&cpf), "cpf={cpf}");
        let cnpj = corrupt_check_digit(&gen_cnpj(&mut rng), &mut rng);
        assert!(!validate_organization_id(&cnpj), "cnpj={cnpj}");
    }
}

#[test]
fn bad_values_fail_for_the_expected_reason() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        assert_eq!(
            check(FieldKind::Date, &bad_date(&mut rng)),
            Err(FieldError::CalendarOverflow)
        );
        assert_eq!(
            check(FieldKind::Time, &bad_time(&mut rng)),
            Err(FieldError::PatternMismatch)
        );
        assert!(matches!(
            check(FieldKind::Phone, &bad_phone(&mut rng)),
            Err(FieldError::WrongLength { .. })
        ));
    }
}

#[test]
fn clean_corpus_submits() {
    let config = GeneratorConfig {
        invalid_ratio: 0.0,
        ..SizeTier::Small.config(42)
    };
    for doc in generate_forms(&config) {
        let result = doc.check();
        assert!(result.is_empty(), "{:?}", result.diagnostics);
    }
}

#[test]
fn fully_invalid_corpus_blocks_every_form() {
    let config = GeneratorConfig {
        invalid_ratio: 1.0,
        ..SizeTier::Small.config(42)
    };
    for doc in generate_forms(&config) {
        let result = doc.check();
        assert!(result.blocks_submit());
        assert_eq!(result.diagnostics.len(), doc.fields.len());
    }
}

#[test]
fn generation_is_deterministic() {
    let a = generate_forms(&SizeTier::Small.config(9));
    let b = generate_forms(&SizeTier::Small.config(9));
    assert_eq!(a, b);
    assert_eq!(a.len(), 100);
}
