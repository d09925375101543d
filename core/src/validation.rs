#![deny(missing_docs)]

//! # Validation Facade
//!
//! Hands a schema document and a data document to the `jsonschema`
//! validator and collects its verdict. No validation logic lives here.
//!
//! Schemas are compiled as draft 4, the JSON Schema flavour that Swagger 2.0
//! and OpenAPI 3.0 schema objects are based on.

use crate::error::{SchemaError, SchemaResult};
use jsonschema::Draft;
use serde::Serialize;
use serde_json::Value;

/// One itemized validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// JSON Pointer of the offending location in the data (`""` is the root).
    pub path: String,
    /// Human-readable description from the validator.
    pub message: String,
}

/// Outcome of validating a data document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// True when the data satisfies the schema.
    pub valid: bool,
    /// Every violation found, in validator order.
    pub violations: Vec<Violation>,
}

impl ValidationResult {
    /// A passing result.
    pub fn ok() -> Self {
        Self {
            valid: true,
            violations: Vec::new(),
        }
    }
}

/// Validates `data` against `schema`.
pub fn validate(schema: &Value, data: &Value) -> SchemaResult<ValidationResult> {
    let validator = jsonschema::options()
        .with_draft(Draft::Draft4)
        .build(schema)
        .map_err(|e| SchemaError::InvalidSchema(e.to_string()))?;

    let violations: Vec<Violation> = validator
        .iter_errors(data)
        .map(|e| Violation {
            path: e.instance_path.to_string(),
            message: e.to_string(),
        })
        .collect();

    Ok(ValidationResult {
        valid: violations.is_empty(),
        violations,
    })
}

/// Parses `data` as JSON text and validates it against `schema`.
pub fn validate_text(schema: &Value, data: &str) -> SchemaResult<ValidationResult> {
    let data: Value = serde_json::from_str(data)
        .map_err(|e| SchemaError::SchemaSerialization(format!("request data: {}", e)))?;
    validate(schema, &data)
}
