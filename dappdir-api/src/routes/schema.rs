use axum::Json;
use dappdir::schema::schema_registry;
use serde_json::Value;

/// GET /schema -- lowercase type name to JSON schema, for every record kind.
pub async fn get_schema() -> Json<Value> {
    Json(Value::Object(schema_registry()))
}
