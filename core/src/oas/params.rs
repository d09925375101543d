#![deny(missing_docs)]

//! # Parameter Iteration & Schema Synthesis
//!
//! Dialect-independent parts of parameter handling: locating an operation,
//! iterating its `parameters` array filtered by location, and folding the
//! matching parameter specs into one canonical object schema.
//!
//! Dialects differ only in how a single parameter spec becomes a property
//! descriptor; that projection is passed in by the caller.

use crate::error::{SchemaError, SchemaResult};
use crate::tree::select_keys;
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamLocation {
    /// Query string.
    Query,
    /// Path template segment.
    Path,
    /// Request header.
    Header,
    /// Cookie (OpenAPI 3.0).
    Cookie,
    /// Request body (Swagger 2.0).
    Body,
}

impl ParamLocation {
    /// The value of the parameter's `in` field for this location.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamLocation::Query => "query",
            ParamLocation::Path => "path",
            ParamLocation::Header => "header",
            ParamLocation::Cookie => "cookie",
            ParamLocation::Body => "body",
        }
    }
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamLocation {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "query" => Ok(ParamLocation::Query),
            "path" => Ok(ParamLocation::Path),
            "header" => Ok(ParamLocation::Header),
            "cookie" => Ok(ParamLocation::Cookie),
            "body" => Ok(ParamLocation::Body),
            other => Err(SchemaError::Parse(format!(
                "unknown parameter location '{}'",
                other
            ))),
        }
    }
}

/// Returns the operation object at `paths.<path>.<method>`.
pub(crate) fn operation<'a>(
    doc: &'a Value,
    path: &str,
    method: &str,
) -> SchemaResult<&'a Map<String, Value>> {
    select_keys(doc, &["paths", path, method])
        .and_then(Value::as_object)
        .ok_or_else(|| SchemaError::OperationNotFound {
            path: path.to_string(),
            method: method.to_string(),
        })
}

/// Returns the operation's `parameters` array.
///
/// A missing array is an error rather than an empty list so that a typo in
/// `path`/`method` is never mistaken for "no parameters".
pub(crate) fn parameters<'a>(doc: &'a Value, path: &str, method: &str) -> SchemaResult<&'a [Value]> {
    let op = operation(doc, path, method)?;
    let params = op
        .get("parameters")
        .ok_or_else(|| SchemaError::ParametersNotFound {
            path: path.to_string(),
            method: method.to_string(),
        })?;
    params
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| SchemaError::ParametersNotArray {
            path: path.to_string(),
            method: method.to_string(),
        })
}

/// Iterates `(index, spec)` for every parameter whose `in` matches `filter`
/// (`None` yields every parameter).
pub(crate) fn each_parameter<'a>(
    doc: &'a Value,
    path: &str,
    method: &str,
    filter: Option<ParamLocation>,
) -> SchemaResult<impl Iterator<Item = (usize, &'a Value)> + 'a> {
    let params = parameters(doc, path, method)?;
    Ok(params.iter().enumerate().filter(move |(_, spec)| match filter {
        Some(location) => spec.get("in").and_then(Value::as_str) == Some(location.as_str()),
        None => true,
    }))
}

/// The synthesized `{type: object, required, properties}` schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalSchema {
    /// Names of required parameters, in declaration order, without duplicates.
    pub required: Vec<String>,
    /// Property descriptor per parameter name.
    pub properties: Map<String, Value>,
}

impl CanonicalSchema {
    /// True when no parameter contributed a property.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Adds `minLength: 1` to every required string property that has no
    /// `minLength`, so an empty string no longer satisfies a required field.
    pub fn inject_min_length(&mut self) {
        for name in &self.required {
            let Some(Value::Object(property)) = self.properties.get_mut(name) else {
                continue;
            };
            let is_string = property.get("type").and_then(Value::as_str) == Some("string");
            if is_string && !property.contains_key("minLength") {
                property.insert("minLength".to_string(), json!(1));
            }
        }
    }

    /// Renders the JSON Schema document. `required` is omitted when empty.
    pub fn to_value(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        if !self.required.is_empty() {
            schema.insert("required".to_string(), json!(self.required));
        }
        schema.insert(
            "properties".to_string(),
            Value::Object(self.properties.clone()),
        );
        Value::Object(schema)
    }
}

/// Folds parameter specs into a [`CanonicalSchema`].
///
/// Every spec needs a non-empty `name`; `required: true` lists it under
/// `required`; `project` turns the spec into its property descriptor.
pub(crate) fn synthesize<'a, I, F>(
    specs: I,
    path: &str,
    method: &str,
    project: F,
) -> SchemaResult<CanonicalSchema>
where
    I: IntoIterator<Item = (usize, &'a Value)>,
    F: Fn(&Map<String, Value>) -> Map<String, Value>,
{
    let mut schema = CanonicalSchema::default();
    for (index, spec) in specs {
        let missing_name = || SchemaError::MissingParameterName {
            path: path.to_string(),
            method: method.to_string(),
            index,
        };
        let spec = spec.as_object().ok_or_else(missing_name)?;
        let name = spec
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .ok_or_else(missing_name)?;

        let required = spec.get("required").and_then(Value::as_bool).unwrap_or(false);
        if required && !schema.required.iter().any(|r| r == name) {
            schema.required.push(name.to_string());
        }

        schema
            .properties
            .insert(name.to_string(), Value::Object(project(spec)));
    }
    Ok(schema)
}

/// Copies every member of `spec` except those named in `skip`.
pub(crate) fn copy_except(spec: &Map<String, Value>, skip: &[&str]) -> Map<String, Value> {
    spec.iter()
        .filter(|(key, _)| !skip.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
