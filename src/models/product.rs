use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Catalog entry as stored by a repository.
///
/// `id` and `created_at` are only ever assigned by the repository; the id is a
/// counter value rendered as a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Price stored as integer cents (e.g. 999 = $9.99)
    pub price_cents: i64,
    pub created_at: DateTime<Utc>,
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// Candidate passed to `ProductRepository::create`.
///
/// Missing or `null` fields fall back to their zero value so that validation,
/// not deserialization, reports an absent name. Any `id` / `created_at` keys in
/// the request body are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewProduct {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Price in cents
    #[serde(default, deserialize_with = "null_as_default")]
    pub price_cents: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price_cents: i64) -> Self {
        Self {
            name: name.into(),
            price_cents,
        }
    }
}
