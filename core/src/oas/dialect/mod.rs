#![deny(missing_docs)]

//! # Dialect Accessors
//!
//! The closed set of dialect-specific behaviours. Shared logic (parameter
//! iteration, schema synthesis) lives in `oas::params`; an accessor only
//! supplies what differs between dialects.

use crate::error::SchemaResult;
use crate::oas::version::Dialect;
use serde_json::{Map, Value};

pub mod openapi3;
pub mod swagger2;

/// Dialect-specific lookups over an expanded document.
pub(crate) trait DialectAccessor: Sync {
    /// Turns one parameter spec into its property descriptor.
    fn project_parameter(&self, spec: &Map<String, Value>) -> Map<String, Value>;

    /// Locates the declared request body schema.
    fn body_schema<'a>(
        &self,
        doc: &'a Value,
        path: &str,
        method: &str,
        content_type: &str,
    ) -> SchemaResult<&'a Value>;

    /// Lists the base URLs the API is served from.
    fn servers(&self, doc: &Value) -> SchemaResult<Vec<String>>;
}

static SWAGGER2: swagger2::Swagger2 = swagger2::Swagger2;
static OPENAPI30: openapi3::OpenApi30 = openapi3::OpenApi30;

impl Dialect {
    /// Returns the accessor implementing this dialect.
    pub(crate) fn accessor(self) -> &'static dyn DialectAccessor {
        match self {
            Dialect::Swagger2 => &SWAGGER2,
            Dialect::OpenApi30 => &OPENAPI30,
        }
    }
}
