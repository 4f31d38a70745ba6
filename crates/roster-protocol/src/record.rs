//! Record model exchanged with the remote resource.

use crate::{FIELD_EMAIL, FIELD_NAME, FormSnapshot};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Identifier assigned by the server once a record is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric identifier, as issued by most JSON APIs.
    Number(i64),
    /// Opaque string identifier (uuid, slug, ...).
    Text(String),
    /// Anything else the server sent (fractional or out-of-range numbers,
    /// booleans, objects), kept as received.
    Other(Value),
}

impl RecordId {
    fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Number(number) => match number.as_i64() {
                Some(id) => Self::Number(id),
                None => Self::Other(Value::Number(number)),
            },
            other => Self::Other(other),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Self::Number(id) => Value::from(id),
            Self::Text(id) => Value::String(id),
            Self::Other(value) => value,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

/// A user record.
///
/// Records hydrated from the server keep the payload verbatim: attributes
/// other than `id`, `name`, and `email` live in `extra`, and so does a `name`
/// or `email` the server sent as something other than a string (the typed
/// field is then empty). A `null` id stays in `extra` and leaves `id` unset.
/// Locally built records have no `id` until a save succeeds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Record {
    /// Server-assigned identifier, absent before persistence.
    pub id: Option<RecordId>,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Any further attributes returned by the server.
    pub extra: Map<String, Value>,
}

impl Record {
    /// Build an unsaved record from a name and email.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            extra: Map::new(),
        }
    }

    /// Build an unsaved record from submitted form data.
    ///
    /// Only `name` and `email` are taken; see [`Record::with_fields_from`] for
    /// anything else the form collects.
    pub fn from_snapshot(snapshot: &FormSnapshot) -> Self {
        Self::new(
            snapshot.value(FIELD_NAME).unwrap_or_default(),
            snapshot.value(FIELD_EMAIL).unwrap_or_default(),
        )
    }

    /// Copy the listed snapshot fields into `extra` as strings.
    ///
    /// `name`, `email`, and fields missing from the snapshot are skipped.
    pub fn with_fields_from<'a>(
        mut self,
        snapshot: &FormSnapshot,
        fields: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        for field in fields {
            if field == FIELD_NAME || field == FIELD_EMAIL {
                continue;
            }
            if let Some(value) = snapshot.value(field) {
                self.extra
                    .insert(field.to_string(), Value::String(value.to_string()));
            }
        }
        self
    }

    /// Whether the server has confirmed this record.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Look up a string attribute by field name.
    pub fn field(&self, field: &str) -> Option<&str> {
        match field {
            FIELD_NAME => Some(self.name.as_str()),
            FIELD_EMAIL => Some(self.email.as_str()),
            other => self.extra.get(other).and_then(Value::as_str),
        }
    }
}

/// Remove `key` when it holds a string; anything else stays in `map`.
fn take_text(map: &mut Map<String, Value>, key: &str) -> String {
    if !map.get(key).is_some_and(Value::is_string) {
        return String::new();
    }
    match map.remove(key) {
        Some(Value::String(text)) => text,
        _ => String::new(),
    }
}

impl From<Map<String, Value>> for Record {
    fn from(mut map: Map<String, Value>) -> Self {
        let id = match map.remove("id") {
            Some(Value::Null) => {
                map.insert("id".to_string(), Value::Null);
                None
            }
            Some(value) => Some(RecordId::from_value(value)),
            None => None,
        };
        let name = take_text(&mut map, FIELD_NAME);
        let email = take_text(&mut map, FIELD_EMAIL);
        Self {
            id,
            name,
            email,
            extra: map,
        }
    }
}

impl From<Record> for Map<String, Value> {
    fn from(record: Record) -> Self {
        let Record {
            id,
            name,
            email,
            extra: mut map,
        } = record;
        if let Some(id) = id {
            map.insert("id".to_string(), id.into_value());
        }
        for (key, text) in [(FIELD_NAME, name), (FIELD_EMAIL, email)] {
            // An empty typed value defers to a non-string the server sent.
            if !text.is_empty() || !map.contains_key(key) {
                map.insert(key.to_string(), Value::String(text));
            }
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::{Record, RecordId};
    use crate::FormSnapshot;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn hydrates_server_payload_with_extra_attributes() {
        let record: Record = serde_json::from_value(json!({
            "id": 3,
            "name": "Clementine",
            "email": "c@example.com",
            "username": "clem",
        }))
        .expect("record");

        assert_eq!(record.id, Some(RecordId::Number(3)));
        assert_eq!(record.field("username"), Some("clem"));
        assert!(record.is_persisted());
        assert_eq!(
            serde_json::to_value(&record).expect("json"),
            json!({
                "id": 3,
                "name": "Clementine",
                "email": "c@example.com",
                "username": "clem",
            })
        );
    }

    #[test]
    fn missing_attributes_default_to_empty() {
        let record: Record = serde_json::from_value(json!({ "name": "X" })).expect("record");
        assert_eq!(record, Record::new("X", ""));
        assert!(!record.is_persisted());
    }

    #[test]
    fn string_ids_are_preserved() {
        let record: Record =
            serde_json::from_value(json!({ "id": "a1", "name": "A" })).expect("record");
        assert_eq!(record.id, Some(RecordId::Text("a1".to_string())));
        assert_eq!(record.id.expect("id").to_string(), "a1");
    }

    #[test]
    fn unsaved_record_serializes_without_id() {
        let snapshot: FormSnapshot = [("name", "Jo"), ("email", "jo@x.io"), ("extra", "skip")]
            .into_iter()
            .collect();
        let record = Record::from_snapshot(&snapshot);
        assert_eq!(
            serde_json::to_value(&record).expect("json"),
            json!({ "name": "Jo", "email": "jo@x.io" })
        );
    }

    #[test]
    fn non_string_contact_fields_stay_verbatim() {
        let payload = json!({ "id": 1, "name": "A", "email": null });
        let record: Record = serde_json::from_value(payload.clone()).expect("record");

        assert_eq!(record.name, "A");
        assert_eq!(record.email, "");
        assert_eq!(record.extra.get("email"), Some(&serde_json::Value::Null));
        assert_eq!(serde_json::to_value(&record).expect("json"), payload);
    }

    #[test]
    fn unusual_ids_are_kept_as_received() {
        let fractional: Record =
            serde_json::from_value(json!({ "id": 1.5, "name": "A", "email": "a" })).expect("record");
        assert_eq!(fractional.id, Some(RecordId::Other(json!(1.5))));
        assert_eq!(fractional.id.as_ref().expect("id").to_string(), "1.5");

        let payload = json!({ "id": null, "name": "A", "email": "a" });
        let unset: Record = serde_json::from_value(payload.clone()).expect("record");
        assert_eq!(unset.id, None);
        assert_eq!(serde_json::to_value(&unset).expect("json"), payload);
    }

    #[test]
    fn declared_fields_are_carried_into_extra() {
        let snapshot: FormSnapshot = [("name", "Jo"), ("email", "jo@x.io"), ("phone", "555")]
            .into_iter()
            .collect();
        let record = Record::from_snapshot(&snapshot)
            .with_fields_from(&snapshot, ["name", "phone", "fax"]);
        assert_eq!(
            serde_json::to_value(&record).expect("json"),
            json!({ "name": "Jo", "email": "jo@x.io", "phone": "555" })
        );
    }
}
