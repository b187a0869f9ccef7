//! JSON-schema validation for book write payloads.
//!
//! Two schemas ship with the crate: `book.schema.json` for creates (every
//! field required) and `book_update.schema.json` for updates (any non-empty
//! subset). Both are compiled once and shared through the application state.

use jsonschema::{error::ValidationErrorKind, ValidationError, Validator};
use serde_json::Value;
use thiserror::Error;

const CREATE_SCHEMA: &str = include_str!("../../schemas/book.schema.json");
const UPDATE_SCHEMA: &str = include_str!("../../schemas/book_update.schema.json");

/// Which schema a payload is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVariant {
    Create,
    Update,
}

impl SchemaVariant {
    pub fn schema_name(&self) -> &'static str {
        match self {
            SchemaVariant::Create => "book.schema.json",
            SchemaVariant::Update => "book_update.schema.json",
        }
    }
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Schema {name} is not valid JSON: {reason}")]
    InvalidJson { name: &'static str, reason: String },

    #[error("Schema {name} failed to compile: {reason}")]
    Compile { name: &'static str, reason: String },
}

/// A payload that failed validation, with violations in reporting order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} schema violation(s): {}", .messages.len(), .messages.join("; "))]
pub struct SchemaViolations {
    pub messages: Vec<String>,
}

/// Compiled create and update validators
pub struct BookValidator {
    create: Validator,
    update: Validator,
}

impl BookValidator {
    pub fn new() -> Result<Self, SchemaError> {
        Ok(Self {
            create: compile(SchemaVariant::Create, CREATE_SCHEMA)?,
            update: compile(SchemaVariant::Update, UPDATE_SCHEMA)?,
        })
    }

    /// Check `payload` against the schema for `variant`, handing it back untouched on success.
    ///
    /// Missing required properties are reported first, one message each in the
    /// order the schema declares them; every other violation follows in the
    /// order the validator found it.
    pub fn validate(&self, variant: SchemaVariant, payload: Value) -> Result<Value, SchemaViolations> {
        let validator = match variant {
            SchemaVariant::Create => &self.create,
            SchemaVariant::Update => &self.update,
        };

        let messages: Vec<String> = {
            let mut errors: Vec<ValidationError<'_>> = validator.iter_errors(&payload).collect();
            // stable: keeps declaration order inside each group
            errors.sort_by_key(|e| !matches!(e.kind, ValidationErrorKind::Required { .. }));
            errors.iter().map(violation_message).collect()
        };
        if messages.is_empty() {
            return Ok(payload);
        }

        tracing::debug!(schema = variant.schema_name(), ?messages, "Payload rejected");
        Err(SchemaViolations { messages })
    }
}

fn compile(variant: SchemaVariant, source: &str) -> Result<Validator, SchemaError> {
    let name = variant.schema_name();
    let schema: Value = serde_json::from_str(source).map_err(|e| SchemaError::InvalidJson {
        name,
        reason: e.to_string(),
    })?;
    jsonschema::validator_for(&schema).map_err(|e| SchemaError::Compile {
        name,
        reason: e.to_string(),
    })
}

fn violation_message(error: &ValidationError<'_>) -> String {
    let location = instance_label(&error.instance_path.to_string());
    match &error.kind {
        ValidationErrorKind::Required { property } => {
            format!("{} requires property {}", location, property)
        }
        _ => format!("{} {}", location, error),
    }
}

/// Render a JSON pointer (`/a/0/b`) as `instance.a[0].b`
fn instance_label(pointer: &str) -> String {
    let mut label = String::from("instance");
    for segment in pointer.split('/').skip(1) {
        let segment = segment.replace("~1", "/").replace("~0", "~");
        if !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()) {
            label.push_str(&format!("[{}]", segment));
        } else {
            label.push('.');
            label.push_str(&segment);
        }
    }
    label
}
