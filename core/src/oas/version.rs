#![deny(missing_docs)]

//! # Dialect Detection
//!
//! Picks the API description dialect from the root version marker.

use crate::error::{SchemaError, SchemaResult};
use serde_json::Value;
use std::fmt;

/// Supported API description dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Swagger 2.0 (`swagger: "2.0"`).
    Swagger2,
    /// OpenAPI 3.0.x (`openapi: "3.0.*"`).
    OpenApi30,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Swagger2 => write!(f, "Swagger 2.0"),
            Dialect::OpenApi30 => write!(f, "OpenAPI 3.0"),
        }
    }
}

/// Reads the root `openapi` / `swagger` marker and returns the dialect.
///
/// An `openapi` marker takes precedence; any `3.0` or `3.0.*` value selects
/// OpenAPI 3.0. Without it, a `swagger` marker starting with `2.0` selects
/// Swagger 2.0.
pub fn detect(doc: &Value) -> SchemaResult<Dialect> {
    if let Some(version) = doc.get("openapi").and_then(Value::as_str) {
        if version == "3.0" || version.starts_with("3.0.") {
            return Ok(Dialect::OpenApi30);
        }
        return Err(SchemaError::UnsupportedVersion(format!("openapi {}", version)));
    }

    if let Some(version) = doc.get("swagger").and_then(Value::as_str) {
        if version.starts_with("2.0") {
            return Ok(Dialect::Swagger2);
        }
        return Err(SchemaError::UnsupportedVersion(format!("swagger {}", version)));
    }

    Err(SchemaError::UnsupportedSchema)
}
