/// Serde utility functions for common patterns
use serde::{Deserialize, Deserializer};

/// Deserialize `Option<Option<T>>` to distinguish between missing field and null value.
///
/// - Missing field → `None` (needs `#[serde(default)]` on the field)
/// - Field is `null` → `Some(None)`
/// - Field has value → `Some(Some(value))`
///
/// Usage:
/// ```ignore
/// #[derive(Deserialize)]
/// struct UpdateTodoRequest {
///     #[serde(default, deserialize_with = "crate::serde_utils::double_option")]
///     description: Option<Option<String>>,
/// }
/// ```
pub fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}
