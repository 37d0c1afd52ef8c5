//! Runs the correctness checkers over generated corpora and arbitrary input.
#![allow(clippy::expect_used)]

use proptest::prelude::*;
use vigiapp_bench::correctness::{
    check_form_result, check_mask_idempotent, check_mask_keeps_digits, check_stored_form,
};
use vigiapp_bench::{SizeTier, generate_forms, keystrokes};
use vigiapp_core::FieldKind;

#[test]
fn keystroke_masks_hold_invariants() {
    let docs = generate_forms(&SizeTier::Small.config(42));
    for (kind, text) in keystrokes(&docs) {
        check_mask_idempotent(kind, &text).expect("idempotent");
        check_mask_keeps_digits(kind, &text).expect("keeps digits");
    }
}

#[test]
fn stored_forms_stay_valid() {
    for doc in generate_forms(&SizeTier::Small.config(123)) {
        for f in &doc.fields {
            check_stored_form(f.spec.kind, &f.value).expect("stored form");
        }
    }
}

#[test]
fn form_checks_are_consistent() {
    for seed in [42, 999] {
        for doc in generate_forms(&SizeTier::Medium.config(seed)) {
            let result = doc.check();
            check_form_result(&doc, &result).expect("consistent form check");
        }
    }
}

fn any_kind() -> impl Strategy<Value = FieldKind> {
    prop::sample::select(FieldKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn mask_invariants_for_any_text(kind in any_kind(), input in "\\PC{0,24}") {
        prop_assert!(check_mask_idempotent(kind, &input).is_ok());
        prop_assert!(check_mask_keeps_digits(kind, &input).is_ok());
    }

    #[test]
    fn stored_form_invariant_for_digit_strings(kind in any_kind(), input in "[0-9]{0,14}") {
        prop_assert!(check_stored_form(kind, &input).is_ok());
    }
}
