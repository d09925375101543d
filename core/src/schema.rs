#![deny(missing_docs)]

//! # Schema
//!
//! A loaded, reference-expanded API description and its per-operation
//! accessors.
//!
//! Loading runs in a fixed order: parse, expand references (when enabled),
//! detect the dialect. The document is owned privately and only handed out
//! as `&Value` afterwards, so every accessor is a pure read and a failed
//! call never affects later ones.

use crate::error::{SchemaError, SchemaResult};
use crate::oas::dialect::DialectAccessor;
use crate::oas::expand::expand_references;
use crate::oas::params::{each_parameter, synthesize, CanonicalSchema, ParamLocation};
use crate::oas::version::{detect, Dialect};
use crate::options::LoadOptions;
use crate::validation::{validate, validate_text, ValidationResult};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Content type used by [`Schema::validate_json_request_body`].
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A loaded API description.
#[derive(Debug, Clone)]
pub struct Schema {
    doc: Value,
    dialect: Dialect,
    options: LoadOptions,
}

impl Schema {
    /// Wraps an already-parsed document.
    pub fn load(mut doc: Value, options: LoadOptions) -> SchemaResult<Self> {
        if options.expand_references {
            expand_references(&mut doc, &options)?;
        }
        let dialect = detect(&doc)?;
        debug!(%dialect, "loaded API description");
        Ok(Self {
            doc,
            dialect,
            options,
        })
    }

    /// Parses JSON or YAML text and loads it.
    pub fn from_text(text: &str, options: LoadOptions) -> SchemaResult<Self> {
        Self::load(parse_document(text)?, options)
    }

    /// Parses JSON or YAML bytes and loads them.
    pub fn from_slice(bytes: &[u8], options: LoadOptions) -> SchemaResult<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| SchemaError::Parse(format!("document is not UTF-8: {}", e)))?;
        Self::from_text(text, options)
    }

    /// Reads a JSON or YAML file and loads it.
    pub fn from_path(path: impl AsRef<Path>, options: LoadOptions) -> SchemaResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "read API description");
        Self::from_text(&text, options)
    }

    /// The expanded document.
    pub fn raw_json(&self) -> &Value {
        &self.doc
    }

    /// The detected dialect.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// The options the document was loaded with.
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    fn accessor(&self) -> &'static dyn DialectAccessor {
        self.dialect.accessor()
    }

    /// Builds the canonical object schema for the operation's parameters at
    /// `location` (`None` for every location).
    ///
    /// Always returns a schema, even when no parameter matched.
    pub fn parameter_canonical(
        &self,
        path: &str,
        method: &str,
        location: Option<ParamLocation>,
    ) -> SchemaResult<CanonicalSchema> {
        let method = method.to_ascii_lowercase();
        let accessor = self.accessor();
        let specs = each_parameter(&self.doc, path, &method, location)?;
        let mut schema = synthesize(specs, path, &method, |spec| {
            accessor.project_parameter(spec)
        })?;
        if self.options.inject_min_length {
            schema.inject_min_length();
        }
        Ok(schema)
    }

    /// Synthesized parameter schema, or `None` when no parameter matched.
    pub fn parameter_schema(
        &self,
        path: &str,
        method: &str,
        location: Option<ParamLocation>,
    ) -> SchemaResult<Option<Value>> {
        let schema = self.parameter_canonical(path, method, location)?;
        if schema.is_empty() {
            return Ok(None);
        }
        Ok(Some(schema.to_value()))
    }

    /// Synthesized parameter schema as JSON text, or `None` when no parameter matched.
    pub fn find_parameter(
        &self,
        path: &str,
        method: &str,
        location: Option<ParamLocation>,
    ) -> SchemaResult<Option<String>> {
        Ok(self
            .parameter_schema(path, method, location)?
            .map(|schema| schema.to_string()))
    }

    /// The declared request body schema for `content_type`.
    ///
    /// A missing body is `BodyNotFound` in both dialects.
    pub fn body_schema(&self, path: &str, method: &str, content_type: &str) -> SchemaResult<&Value> {
        let method = method.to_ascii_lowercase();
        self.accessor()
            .body_schema(&self.doc, path, &method, content_type)
    }

    /// The declared request body schema as JSON text.
    pub fn find_body(&self, path: &str, method: &str, content_type: &str) -> SchemaResult<String> {
        Ok(self.body_schema(path, method, content_type)?.to_string())
    }

    /// Validates parameter values against the synthesized schema.
    pub fn validate_parameters(
        &self,
        path: &str,
        method: &str,
        location: Option<ParamLocation>,
        data: &Map<String, Value>,
    ) -> SchemaResult<ValidationResult> {
        let schema = self.parameter_canonical(path, method, location)?;
        validate(&schema.to_value(), &Value::Object(data.clone()))
    }

    /// Validates raw string parameter values (query strings, headers).
    pub fn validate_string_parameters(
        &self,
        path: &str,
        method: &str,
        location: Option<ParamLocation>,
        data: &HashMap<String, String>,
    ) -> SchemaResult<ValidationResult> {
        let data: Map<String, Value> = data
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect();
        self.validate_parameters(path, method, location, &data)
    }

    /// Validates a parsed request body against the declared body schema.
    pub fn validate_request_body(
        &self,
        path: &str,
        method: &str,
        content_type: &str,
        body: &Value,
    ) -> SchemaResult<ValidationResult> {
        let schema = self.body_schema(path, method, content_type)?;
        validate(schema, body)
    }

    /// Validates a JSON request body given as text.
    pub fn validate_json_request_body(
        &self,
        path: &str,
        method: &str,
        body: &str,
    ) -> SchemaResult<ValidationResult> {
        let schema = self.body_schema(path, method, JSON_CONTENT_TYPE)?;
        validate_text(schema, body)
    }

    /// Base URLs the API is served from.
    pub fn servers(&self) -> SchemaResult<Vec<String>> {
        self.accessor().servers(&self.doc)
    }
}

/// Compact JSON of the expanded document.
impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.doc)
    }
}

/// Parses JSON first, then YAML.
fn parse_document(text: &str) -> SchemaResult<Value> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(json_err) => serde_yaml::from_str(text).map_err(|yaml_err| {
            SchemaError::Parse(format!(
                "not JSON ({}) and not YAML ({})",
                json_err, yaml_err
            ))
        }),
    }
}
