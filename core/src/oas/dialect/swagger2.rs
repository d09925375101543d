#![deny(missing_docs)]

//! # Swagger 2.0 Accessor
//!
//! Type keywords live directly on the parameter spec, and the request body
//! is itself a parameter with `in: body` carrying a `schema`.

use crate::error::{SchemaError, SchemaResult};
use crate::oas::dialect::DialectAccessor;
use crate::oas::params::{copy_except, each_parameter, ParamLocation};
use serde_json::{Map, Value};

/// Accessor for `swagger: "2.0"` documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct Swagger2;

impl DialectAccessor for Swagger2 {
    fn project_parameter(&self, spec: &Map<String, Value>) -> Map<String, Value> {
        copy_except(spec, &["name", "in", "required"])
    }

    /// The first `in: body` parameter that declares a `schema` wins.
    /// `content_type` does not select anything in this dialect.
    fn body_schema<'a>(
        &self,
        doc: &'a Value,
        path: &str,
        method: &str,
        content_type: &str,
    ) -> SchemaResult<&'a Value> {
        let not_found = || SchemaError::BodyNotFound {
            path: path.to_string(),
            method: method.to_string(),
            content_type: content_type.to_string(),
        };

        let mut specs = match each_parameter(doc, path, method, Some(ParamLocation::Body)) {
            Ok(specs) => specs,
            Err(SchemaError::ParametersNotFound { .. }) => return Err(not_found()),
            Err(err) => return Err(err),
        };

        specs
            .find_map(|(_, spec)| spec.get("schema"))
            .ok_or_else(not_found)
    }

    /// Builds `<scheme>://<host><basePath>` for each declared scheme
    /// (`https` when `schemes` is absent).
    fn servers(&self, doc: &Value) -> SchemaResult<Vec<String>> {
        let host = doc
            .get("host")
            .and_then(Value::as_str)
            .ok_or_else(|| SchemaError::ServersNotFound("host undefined".into()))?;
        let base_path = doc.get("basePath").and_then(Value::as_str).unwrap_or("");

        let schemes: Vec<&str> = match doc.get("schemes").and_then(Value::as_array) {
            Some(list) => list.iter().filter_map(Value::as_str).collect(),
            None => vec!["https"],
        };
        if schemes.is_empty() {
            return Err(SchemaError::ServersNotFound("empty schemes".into()));
        }

        Ok(schemes
            .into_iter()
            .map(|scheme| format!("{}://{}{}", scheme, host, base_path))
            .collect())
    }
}
