//! Serde helpers for partial-update DTOs.

use serde::{Deserialize, Deserializer};

/// Distinguish an absent field from an explicit `null`.
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`:
/// a missing key stays `None`, `null` becomes `Some(None)`, and a value
/// becomes `Some(Some(v))`.
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
