//! Common serde helpers for partial update payloads

use serde::{Deserialize, Deserializer};

/// Deserialize a field that distinguishes "absent" from "explicit null"
///
/// Use together with `#[serde(default)]`:
/// - field missing  -> `None`
/// - field is null  -> `Some(None)`
/// - field has value -> `Some(Some(v))`
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
