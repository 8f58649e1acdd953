//! Response envelope normalization.
//!
//! The backend wraps payloads inconsistently. A product listing may arrive as
//! any of:
//!
//! ```text
//! {"data": {"products": [...]}}
//! {"products": [...]}
//! {"data": [...]}
//! [...]
//! ```
//!
//! Extraction walks a fixed, ordered list of strategies and takes the first
//! one that yields at least one usable record. Nothing matching is not an error: the
//! result is an empty collection. Elements that fail to deserialize are
//! skipped individually so one malformed record cannot blank a whole page.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Where to look for the payload, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// `body.data.<key>`
    NestedKey,
    /// `body.<key>`
    Key,
    /// `body.data`
    Data,
    /// `body` itself
    Root,
}

/// Priority order for collection and entity extraction.
pub const STRATEGIES: [Strategy; 4] = [
    Strategy::NestedKey,
    Strategy::Key,
    Strategy::Data,
    Strategy::Root,
];

impl Strategy {
    fn locate<'a>(self, body: &'a Value, key: &str) -> Option<&'a Value> {
        match self {
            Self::NestedKey => body.get("data")?.get(key),
            Self::Key => body.get(key),
            Self::Data => body.get("data"),
            Self::Root => Some(body),
        }
    }
}

/// Extract the collection stored under `key` from any known envelope.
///
/// A strategy only wins if at least one of its elements deserializes;
/// otherwise the next strategy is tried.
#[must_use]
pub fn collection<T: DeserializeOwned>(body: &Value, key: &str) -> Vec<T> {
    let found = STRATEGIES.iter().find_map(|strategy| {
        let items = strategy.locate(body, key).and_then(Value::as_array)?;
        let parsed: Vec<T> = items
            .iter()
            .filter_map(|item| match T::deserialize(item) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(key, ?strategy, error = %e, "Skipping malformed record");
                    None
                }
            })
            .collect();
        if parsed.is_empty() {
            None
        } else {
            tracing::debug!(key, ?strategy, count = parsed.len(), "Extracted collection");
            Some(parsed)
        }
    });

    found.unwrap_or_else(|| {
        tracing::debug!(key, "No collection found in response, using empty list");
        Vec::new()
    })
}

/// Extract a single entity stored under `key` from any known envelope.
///
/// Each strategy's candidate must be an object that deserializes as `T`;
/// the first that does wins.
#[must_use]
pub fn entity<T: DeserializeOwned>(body: &Value, key: &str) -> Option<T> {
    STRATEGIES.iter().find_map(|strategy| {
        strategy
            .locate(body, key)
            .filter(|candidate| candidate.is_object())
            .and_then(|candidate| T::deserialize(candidate).ok())
    })
}

/// Extract a string field (e.g. an uploaded image URL or a token) from any
/// known envelope, trying each of `fields` in order.
#[must_use]
pub fn string_field(body: &Value, fields: &[&str]) -> Option<String> {
    if let Some(bare) = body.as_str() {
        return Some(bare.to_string());
    }
    fields.iter().find_map(|field| {
        STRATEGIES
            .iter()
            .filter(|s| matches!(s, Strategy::NestedKey | Strategy::Key))
            .find_map(|s| s.locate(body, field))
            .and_then(Value::as_str)
            .map(str::to_string)
    })
}
