//! Serde helper functions shared by the lookup record types.
use serde::{Deserialize, Deserializer};

/// Deserializer that maps JSON `null` to an empty string.
///
/// | JSON                  | Rust result       |
/// |-----------------------|-------------------|
/// | field absent          | `""` (via `#[serde(default)]`) |
/// | `"field": null`       | `""`              |
/// | `"field": "text"`     | `"text"`          |
///
/// The lookup service serialises missing database columns as `null`; the
/// form only ever shows text, so both cases collapse to an empty field.
pub fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let inner: Option<String> = Option::deserialize(deserializer)?;
    Ok(inner.unwrap_or_default())
}
