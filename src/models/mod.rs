use serde::{Deserialize, Deserializer};

pub mod comments;
pub mod posts;

/// Reads an explicit `null` as an empty string, leaving the blank check to
/// validation.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
