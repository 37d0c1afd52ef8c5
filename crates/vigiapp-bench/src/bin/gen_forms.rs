//! Writes a large form corpus to disk as NDJSON, one document per line.
//!
//! The file lands in `target/bench-fixtures/forms.ndjson` and can be piped
//! through `vigiapp check -` line by line, or loaded by external tooling.

use std::error::Error;
use std::fs;
use std::io::{BufWriter, Write as _};

use vigiapp_bench::{SizeTier, forms_fixture_path, generate_forms};

fn main() -> Result<(), Box<dyn Error>> {
    let path = forms_fixture_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    eprintln!("Generating Large tier...");
    let docs = generate_forms(&SizeTier::Large.config(42));
    let fields: usize = docs.iter().map(|d| d.fields.len()).sum();
    eprintln!("Generated {} forms, {fields} fields", docs.len());

    let mut out = BufWriter::new(fs::File::create(&path)?);
    for doc in &docs {
        serde_json::to_writer(&mut out, doc)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    let meta = fs::metadata(&path)?;
    eprintln!(
        "Wrote {} ({:.1} MB)",
        path.display(),
        meta.len() as f64 / (1024.0 * 1024.0)
    );
    Ok(())
}
