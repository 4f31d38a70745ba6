//! Submitted form data keyed by field name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from field name to the submitted string value.
///
/// A snapshot is produced once per submission and consumed by validation and
/// the store; it is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSnapshot {
    values: BTreeMap<String, String>,
}

impl FormSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, replacing any earlier value for the same field.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    /// Value submitted for a field, if any.
    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Number of named fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no named field was captured.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for FormSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (field, value) in iter {
            snapshot.insert(field, value);
        }
        snapshot
    }
}
