//! Deserializers for columns the backend fills inconsistently.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolLike {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// Reads a flag that may arrive as a bool, `0`/`1`, `"true"`, or `null`.
/// Anything that is not clearly true is false.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<BoolLike>::deserialize(deserializer)? {
        None => false,
        Some(BoolLike::Bool(value)) => value,
        Some(BoolLike::Int(value)) => value != 0,
        Some(BoolLike::Text(value)) => value.eq_ignore_ascii_case("true") || value == "1",
    })
}

/// Reads `null` as the type's default value.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
