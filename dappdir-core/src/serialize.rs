//! Conversion of stored documents into transport-safe JSON.
//!
//! Stored documents carry a native identifier under `_id` and native BSON
//! date-times. Before they leave the process:
//!
//! - `_id` becomes a public `id` string (object ids as 24 char hex);
//! - every date-time, at any depth, becomes RFC 3339 text (`2024-05-01T12:00:00.000Z`);
//! - everything else passes through unchanged.
//!
//! Conversion is best effort and never fails: BSON types without a natural JSON
//! shape fall back to their extended-JSON form.

use bson::{Bson, DateTime, Document};
use chrono::SecondsFormat;
use serde_json::{Map, Value};

/// Key under which backends return the storage identifier.
pub const STORAGE_ID: &str = "_id";
/// Key under which the identifier is exposed to clients.
pub const PUBLIC_ID: &str = "id";

/// Converts a stored document into its transport shape.
///
/// An empty document converts to an empty map.
pub fn to_transport(document: Document) -> Map<String, Value> {
    let mut output = Map::new();

    for (key, value) in document {
        if key == STORAGE_ID && value != Bson::Null {
            output.insert(PUBLIC_ID.to_string(), Value::String(id_string(value)));
        } else {
            output.insert(key, to_transport_value(value));
        }
    }

    output
}

/// [`to_transport`] lifted over an optional document; `None` stays `None`.
pub fn to_transport_opt(document: Option<Document>) -> Option<Map<String, Value>> {
    document.map(to_transport)
}

/// Converts a single BSON value, recursing into arrays and embedded documents.
pub fn to_transport_value(value: Bson) -> Value {
    match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(n) => Value::from(n),
        Bson::Int64(n) => Value::from(n),
        Bson::Double(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Bson::String(s) => Value::String(s),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => Value::String(iso_timestamp(dt)),
        Bson::Array(items) => Value::Array(items.into_iter().map(to_transport_value).collect()),
        Bson::Document(document) => Value::Object(
            document
                .into_iter()
                .map(|(key, value)| (key, to_transport_value(value)))
                .collect(),
        ),
        other => serde_json::to_value(&other).unwrap_or_else(|_| Value::String(other.to_string())),
    }
}

/// Renders a BSON date-time as RFC 3339 UTC text with millisecond precision.
pub fn iso_timestamp(dt: DateTime) -> String {
    dt.to_chrono().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn id_string(value: Bson) -> String {
    match value {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => match to_transport_value(other) {
            Value::String(s) => s,
            json => json.to_string(),
        },
    }
}
