#![deny(missing_docs)]

//! # OpenAPI 3.0 Accessor
//!
//! Type keywords sit under each parameter's nested `schema`, which is
//! flattened into the property descriptor. Request bodies live under
//! `requestBody.content.<contentType>.schema`.

use crate::error::{SchemaError, SchemaResult};
use crate::oas::dialect::DialectAccessor;
use crate::oas::params::{copy_except, operation};
use crate::tree::{as_array, as_object, as_str, pointer_string, PathSegment};
use serde_json::{Map, Value};

/// Accessor for `openapi: "3.0.*"` documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenApi30;

impl DialectAccessor for OpenApi30 {
    fn project_parameter(&self, spec: &Map<String, Value>) -> Map<String, Value> {
        let mut property = copy_except(spec, &["name", "in", "required", "schema"]);
        if let Some(Value::Object(schema)) = spec.get("schema") {
            for (key, value) in schema {
                property.insert(key.clone(), value.clone());
            }
        }
        property
    }

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

        let op = operation(doc, path, method)?;
        let request_body = op.get("requestBody").ok_or_else(not_found)?;
        let pointer = pointer_string(&[
            PathSegment::from("paths"),
            PathSegment::from(path),
            PathSegment::from(method),
            PathSegment::from("requestBody"),
        ]);
        let request_body = as_object(request_body, &pointer)?;

        request_body
            .get("content")
            .and_then(|content| content.get(content_type))
            .and_then(|media| media.get("schema"))
            .ok_or_else(not_found)
    }

    fn servers(&self, doc: &Value) -> SchemaResult<Vec<String>> {
        let servers = doc
            .get("servers")
            .ok_or_else(|| SchemaError::ServersNotFound("servers undefined".into()))?;
        let servers = as_array(servers, "/servers")?;
        if servers.is_empty() {
            return Err(SchemaError::ServersNotFound("empty servers".into()));
        }

        servers
            .iter()
            .enumerate()
            .map(|(index, server)| {
                let url = server
                    .get("url")
                    .ok_or(SchemaError::MalformedServer { index })?;
                as_str(url, &format!("/servers/{}/url", index)).map(str::to_string)
            })
            .collect()
    }
}
