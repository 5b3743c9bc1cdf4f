//! Schema registry for every record kind the directory stores.
//!
//! Each [`Kind`] owns a static table of [`FieldSpec`]s. The same table drives
//! request validation ([`Kind::validate`]) and the JSON-Schema description
//! served to clients ([`Kind::json_schema`]), so the two can never disagree.
//!
//! Collection names are derived from the type name: lowercased, unless the
//! type appears in the explicit override table.
//!
//! ```ignore
//! use dappdir_core::schema::{Kind, collection_name_for};
//!
//! assert_eq!(Kind::Dapp.collection_name(), "dapp");
//! assert_eq!(collection_name_for("BlogPost"), "blogs");
//! ```

use std::{borrow::Cow, fmt};

use serde::Serialize;
use serde_json::{Map, Value, json};
use validator::{ValidateLength, ValidateUrl};

/// Type names whose collection is not simply the lowercased name.
const COLLECTION_OVERRIDES: &[(&str, &str)] = &[("BlogPost", "blogs")];

/// Upper bound on URL length, matching common browser limits.
const MAX_URL_LENGTH: u64 = 2083;

/// Whole floats in `[-2^63, 2^63)` convert to `i64` without loss of range.
const I64_FLOAT_LOWER: f64 = i64::MIN as f64;
const I64_FLOAT_UPPER: f64 = 9_223_372_036_854_775_808.0;

/// Returns the storage collection name for a record type name.
pub fn collection_name_for(type_name: &str) -> Cow<'static, str> {
    COLLECTION_OVERRIDES
        .iter()
        .find(|(name, _)| *name == type_name)
        .map(|(_, collection)| Cow::Borrowed(*collection))
        .unwrap_or_else(|| Cow::Owned(type_name.to_lowercase()))
}

/// The logical record kinds known to the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    User,
    Dapp,
    Comment,
    Product,
}

impl Kind {
    /// All kinds, in the order they are published by the schema endpoint.
    pub const ALL: [Kind; 4] = [Kind::User, Kind::Dapp, Kind::Comment, Kind::Product];

    /// The record type name, e.g. `"Dapp"`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Kind::User => "User",
            Kind::Dapp => "Dapp",
            Kind::Comment => "Comment",
            Kind::Product => "Product",
        }
    }

    /// The lowercase key used by the schema endpoint.
    pub fn schema_key(&self) -> String {
        self.type_name().to_lowercase()
    }

    /// The storage collection holding records of this kind.
    pub fn collection_name(&self) -> Cow<'static, str> {
        collection_name_for(self.type_name())
    }

    pub fn description(&self) -> &'static str {
        match self {
            Kind::User => "A directory user.",
            Kind::Dapp => "A decentralized application listed on the platform.",
            Kind::Comment => "A comment attached to a dapp.",
            Kind::Product => "A product listing, kept as a reference schema.",
        }
    }

    /// The field table for this kind.
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Kind::User => USER_FIELDS,
            Kind::Dapp => DAPP_FIELDS,
            Kind::Comment => COMMENT_FIELDS,
            Kind::Product => PRODUCT_FIELDS,
        }
    }

    /// Validates a request body against this kind's field table.
    ///
    /// Every field is checked and all failures are reported together. On success
    /// the returned object holds exactly the declared fields, with defaults filled
    /// in for any that were omitted. Unknown fields are dropped.
    pub fn validate(&self, body: &Value) -> Result<Map<String, Value>, ValidationErrors> {
        let Some(object) = body.as_object() else {
            return Err(ValidationErrors::single("body", "expected a JSON object"));
        };

        let mut errors = ValidationErrors::default();
        let mut normalized = Map::new();

        for spec in self.fields() {
            match object.get(spec.name) {
                None if spec.required => errors.push(spec.name, "field required"),
                None => {
                    normalized.insert(spec.name.to_string(), spec.default.to_value());
                }
                Some(Value::Null) if spec.accepts_null() => {
                    normalized.insert(spec.name.to_string(), Value::Null);
                }
                Some(value) => match spec.check(value) {
                    Ok(value) => {
                        normalized.insert(spec.name.to_string(), value);
                    }
                    Err(message) => errors.push(spec.name, message),
                },
            }
        }

        if errors.is_empty() {
            Ok(normalized)
        } else {
            Err(errors)
        }
    }

    /// Builds the JSON-Schema description of this kind.
    pub fn json_schema(&self) -> Value {
        let mut properties = Map::new();
        for spec in self.fields() {
            properties.insert(spec.name.to_string(), spec.json_schema());
        }

        let required = self
            .fields()
            .iter()
            .filter(|spec| spec.required)
            .map(|spec| Value::from(spec.name))
            .collect::<Vec<_>>();

        json!({
            "title": self.type_name(),
            "description": self.description(),
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Returns the JSON-Schema description of every kind, keyed by lowercase type name.
pub fn schema_registry() -> Map<String, Value> {
    Kind::ALL
        .iter()
        .map(|kind| (kind.schema_key(), kind.json_schema()))
        .collect()
}

/// The value type a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    /// An absolute `http` or `https` URL.
    Url,
    Integer,
    Number,
    Boolean,
    /// An ordered list of strings.
    StringList,
}

/// The value a field takes when omitted from a request body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDefault {
    Null,
    Integer(i64),
    Boolean(bool),
    EmptyList,
}

impl FieldDefault {
    fn to_value(self) -> Value {
        match self {
            FieldDefault::Null => Value::Null,
            FieldDefault::Integer(value) => Value::from(value),
            FieldDefault::Boolean(value) => Value::from(value),
            FieldDefault::EmptyList => Value::Array(Vec::new()),
        }
    }
}

/// Declarative description of one record field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    pub default: FieldDefault,
    pub description: &'static str,
    /// Inclusive lower bound for numeric fields.
    pub minimum: Option<f64>,
    /// Length bounds for string fields, in characters.
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
}

impl FieldSpec {
    pub const fn required(name: &'static str, field_type: FieldType, description: &'static str) -> Self {
        Self {
            name,
            field_type,
            required: true,
            default: FieldDefault::Null,
            description,
            minimum: None,
            min_length: None,
            max_length: None,
        }
    }

    pub const fn optional(name: &'static str, field_type: FieldType, description: &'static str) -> Self {
        Self {
            required: false,
            ..Self::required(name, field_type, description)
        }
    }

    pub const fn with_default(self, default: FieldDefault) -> Self {
        Self { default, ..self }
    }

    pub const fn minimum(self, minimum: f64) -> Self {
        Self { minimum: Some(minimum), ..self }
    }

    pub const fn length(self, min: u64, max: u64) -> Self {
        Self {
            min_length: Some(min),
            max_length: Some(max),
            ..self
        }
    }

    /// Optional fields defaulting to null also accept an explicit null.
    fn accepts_null(&self) -> bool {
        !self.required && self.default == FieldDefault::Null
    }

    fn length_bounds(&self) -> (Option<u64>, Option<u64>) {
        match self.field_type {
            FieldType::Url => (Some(self.min_length.unwrap_or(1)), Some(self.max_length.unwrap_or(MAX_URL_LENGTH))),
            _ => (self.min_length, self.max_length),
        }
    }

    fn check(&self, value: &Value) -> Result<Value, String> {
        match self.field_type {
            FieldType::String => {
                let text = value.as_str().ok_or("expected a string")?;
                self.check_length(text)?;
                Ok(Value::from(text))
            }
            FieldType::Url => {
                let text = value.as_str().ok_or("expected a URL string")?;
                self.check_length(text)?;
                let is_http = text.starts_with("http://") || text.starts_with("https://");
                if !is_http || !text.validate_url() {
                    return Err("expected a valid http or https URL".to_string());
                }
                Ok(Value::from(text))
            }
            FieldType::Integer => {
                let Value::Number(n) = value else {
                    return Err("expected an integer".to_string());
                };
                let number = match n.as_i64() {
                    Some(number) => number,
                    None if n.is_u64() => return Err("integer out of range".to_string()),
                    // Whole floats convert only when exactly representable as i64.
                    None => n
                        .as_f64()
                        .filter(|f| f.fract() == 0.0 && (I64_FLOAT_LOWER..I64_FLOAT_UPPER).contains(f))
                        .map(|f| f as i64)
                        .ok_or("expected an integer")?,
                };
                self.check_minimum(number as f64)?;
                Ok(Value::from(number))
            }
            FieldType::Number => {
                let number = value.as_f64().ok_or("expected a number")?;
                self.check_minimum(number)?;
                Ok(value.clone())
            }
            FieldType::Boolean => value
                .as_bool()
                .map(Value::from)
                .ok_or_else(|| "expected a boolean".to_string()),
            FieldType::StringList => {
                let items = value.as_array().ok_or("expected a list of strings")?;
                if let Some(position) = items.iter().position(|item| !item.is_string()) {
                    return Err(format!("item {position} is not a string"));
                }
                Ok(value.clone())
            }
        }
    }

    fn check_length(&self, text: &str) -> Result<(), String> {
        let (min, max) = self.length_bounds();
        if text.validate_length(min, max, None) {
            return Ok(());
        }

        Err(match (min, max) {
            (Some(min), Some(max)) => format!("length must be between {min} and {max} characters"),
            (Some(min), None) => format!("length must be at least {min} characters"),
            (None, Some(max)) => format!("length must be at most {max} characters"),
            (None, None) => "invalid length".to_string(),
        })
    }

    fn check_minimum(&self, number: f64) -> Result<(), String> {
        match self.minimum {
            Some(minimum) if number < minimum => Err(format!("must be greater than or equal to {minimum}")),
            _ => Ok(()),
        }
    }

    fn json_schema(&self) -> Value {
        let mut schema = match self.field_type {
            FieldType::String => json!({ "type": "string" }),
            FieldType::Url => json!({ "type": "string", "format": "uri" }),
            FieldType::Integer => json!({ "type": "integer" }),
            FieldType::Number => json!({ "type": "number" }),
            FieldType::Boolean => json!({ "type": "boolean" }),
            FieldType::StringList => json!({ "type": "array", "items": { "type": "string" } }),
        };

        let (min_length, max_length) = self.length_bounds();
        if let Some(object) = schema.as_object_mut() {
            if let Some(min) = min_length {
                object.insert("minLength".into(), Value::from(min));
            }
            if let Some(max) = max_length {
                object.insert("maxLength".into(), Value::from(max));
            }
            if let Some(minimum) = self.minimum {
                let minimum = match self.field_type {
                    FieldType::Integer => Value::from(minimum as i64),
                    _ => Value::from(minimum),
                };
                object.insert("minimum".into(), minimum);
            }
        }

        if self.accepts_null() {
            schema = json!({ "anyOf": [schema, { "type": "null" }] });
        }

        if let Some(object) = schema.as_object_mut() {
            object.insert("title".into(), Value::from(title_case(self.name)));
            object.insert("description".into(), Value::from(self.description));
            if !self.required {
                object.insert("default".into(), self.default.to_value());
            }
        }

        schema
    }
}

/// `"wallet_address"` becomes `"Wallet Address"`.
fn title_case(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

static USER_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", FieldType::String, "Display name"),
    FieldSpec::optional("wallet_address", FieldType::String, "EVM wallet address or other chain address"),
    FieldSpec::optional("avatar_url", FieldType::String, "Avatar image URL"),
];

static DAPP_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", FieldType::String, "Project name"),
    FieldSpec::required("tagline", FieldType::String, "Short one-line description"),
    FieldSpec::optional("description", FieldType::String, "Longer description of the project"),
    FieldSpec::optional("website", FieldType::Url, "Project website"),
    FieldSpec::optional("twitter", FieldType::String, "Twitter/X handle or link"),
    FieldSpec::optional("github", FieldType::String, "GitHub repo link"),
    FieldSpec::optional("category", FieldType::String, "Category like DeFi, NFT, Tooling, Infra, Gaming"),
    FieldSpec::optional("chains", FieldType::StringList, "Supported chains").with_default(FieldDefault::EmptyList),
    FieldSpec::optional("tags", FieldType::StringList, "Extra tags").with_default(FieldDefault::EmptyList),
    FieldSpec::optional("logo_url", FieldType::String, "Logo image URL"),
    FieldSpec::optional("banner_url", FieldType::String, "Cover image URL"),
    FieldSpec::optional("submitter_name", FieldType::String, "Name of submitter"),
    FieldSpec::optional("submitter_wallet", FieldType::String, "Submitter wallet address"),
    FieldSpec::optional("votes", FieldType::Integer, "Upvote count")
        .with_default(FieldDefault::Integer(0))
        .minimum(0.0),
];

static COMMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("dapp_id", FieldType::String, "Related dapp id"),
    FieldSpec::optional("author_name", FieldType::String, "Commenter name"),
    FieldSpec::optional("author_wallet", FieldType::String, "Commenter wallet address"),
    FieldSpec::required("content", FieldType::String, "Comment text").length(1, 1000),
];

static PRODUCT_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", FieldType::String, "Product title"),
    FieldSpec::optional("description", FieldType::String, "Product description"),
    FieldSpec::required("price", FieldType::Number, "Price in dollars").minimum(0.0),
    FieldSpec::required("category", FieldType::String, "Product category"),
    FieldSpec::optional("in_stock", FieldType::Boolean, "Whether product is in stock")
        .with_default(FieldDefault::Boolean(true)),
];

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every field error found while validating a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Returns the error reported for `field`, if any.
    pub fn field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|error| error.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self
            .0
            .iter()
            .map(|error| format!("{}: {}", error.field, error.message))
            .collect::<Vec<_>>();
        f.write_str(&parts.join("; "))
    }
}
