//! Form corpus generator and benchmark utilities for VigiAPP.
//!
//! This crate provides deterministic generation of realistic form documents
//! for benchmarking and property-based testing of `vigiapp-core`.

use std::path::PathBuf;

pub mod correctness;
pub mod generator;

pub use generator::{GeneratorConfig, SizeTier, generate_forms, keystrokes};

/// Returns the path where `gen-forms` writes its NDJSON corpus.
///
/// The file lives under `target/bench-fixtures/forms.ndjson` so it is
/// automatically gitignored.
pub fn forms_fixture_path() -> PathBuf {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest
        .join("..")
        .join("..")
        .join("target")
        .join("bench-fixtures")
        .join("forms.ndjson")
}
