use oasval_core::{
    expand_references, has_references, Dialect, LoadOptions, ParamLocation, Schema, SchemaError,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

const DIALECT_DIRS: [&str; 2] = ["v2.0", "v3.0"];

fn fixture(dir: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(dir)
        .join("petstore-expanded.json")
}

fn load(dir: &str) -> Schema {
    Schema::from_path(fixture(dir), LoadOptions::default()).unwrap()
}

#[test]
fn test_pets_request_body_validation() {
    for dir in DIALECT_DIRS {
        let schema = load(dir);

        let result = schema
            .validate_json_request_body("/pets", "post", r#"{"name":"Tama"}"#)
            .unwrap();
        assert!(result.valid, "{dir}: {:?}", result.violations);

        let result = schema
            .validate_json_request_body("/pets", "post", r#"{"NAME":"Tama"}"#)
            .unwrap();
        assert!(!result.valid, "{dir}");
        assert!(!result.violations.is_empty());
    }
}

#[test]
fn test_dialects_detected() {
    assert_eq!(load("v2.0").dialect(), Dialect::Swagger2);
    assert_eq!(load("v3.0").dialect(), Dialect::OpenApi30);
}

#[test]
fn test_no_residual_references_and_idempotent() {
    for dir in DIALECT_DIRS {
        let schema = load(dir);
        assert!(!has_references(schema.raw_json()), "{dir}");

        let mut again = schema.raw_json().clone();
        let expanded = expand_references(&mut again, &LoadOptions::default()).unwrap();
        assert_eq!(expanded, 0);
        assert_eq!(&again, schema.raw_json());
    }
}

#[test]
fn test_find_parameter_projection() {
    for dir in DIALECT_DIRS {
        let schema = load(dir);
        let text = schema
            .find_parameter("/pets/{id}", "get", Some(ParamLocation::Path))
            .unwrap()
            .unwrap();
        let found: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(found["type"], json!("object"), "{dir}");
        assert_eq!(found["required"], json!(["id"]), "{dir}");
        assert_eq!(found["properties"]["id"]["type"], json!("integer"), "{dir}");
        assert_eq!(found["properties"]["id"]["format"], json!("int64"), "{dir}");
    }
}

#[test]
fn test_dialect_equivalence_for_query_parameters() {
    let mut shapes = Vec::new();
    for dir in DIALECT_DIRS {
        let found = load(dir)
            .parameter_canonical("/pets", "get", Some(ParamLocation::Query))
            .unwrap();
        let keys: BTreeSet<String> = found.properties.keys().cloned().collect();
        shapes.push((found.required.clone(), keys));
        assert_eq!(found.properties["limit"]["type"], json!("integer"));
        assert_eq!(found.properties["tags"]["items"], json!({"type": "string"}));
    }
    assert_eq!(shapes[0], shapes[1]);
}

#[test]
fn test_validate_query_parameters() {
    for dir in DIALECT_DIRS {
        let schema = load(dir);
        let mut data = Map::new();
        data.insert("limit".into(), json!(10));
        data.insert("tags".into(), json!(["dog", "cat"]));
        let result = schema
            .validate_parameters("/pets", "get", Some(ParamLocation::Query), &data)
            .unwrap();
        assert!(result.valid, "{dir}: {:?}", result.violations);

        data.insert("limit".into(), json!("ten"));
        let result = schema
            .validate_parameters("/pets", "get", Some(ParamLocation::Query), &data)
            .unwrap();
        assert!(!result.valid, "{dir}");
        assert_eq!(result.violations[0].path, "/limit");
    }
}

#[test]
fn test_find_body_returns_expanded_schema() {
    let expected = json!({
        "type": "object",
        "required": ["name"],
        "properties": {"name": {"type": "string"}, "tag": {"type": "string"}}
    });
    for dir in DIALECT_DIRS {
        let text = load(dir)
            .find_body("/pets", "post", "application/json")
            .unwrap();
        let found: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(found, expected, "{dir}");
    }
}

#[test]
fn test_missing_body_is_an_error_in_both_dialects() {
    for dir in DIALECT_DIRS {
        let err = load(dir)
            .validate_json_request_body("/pets", "get", "{}")
            .unwrap_err();
        assert!(matches!(err, SchemaError::BodyNotFound { .. }), "{dir}: {err}");
    }
}

#[test]
fn test_missing_operation() {
    for dir in DIALECT_DIRS {
        let err = load(dir)
            .find_parameter("/unknown", "get", Some(ParamLocation::Query))
            .unwrap_err();
        match err {
            SchemaError::OperationNotFound { path, method } => {
                assert_eq!(path, "/unknown");
                assert_eq!(method, "get");
            }
            other => panic!("{dir}: unexpected error: {other}"),
        }
    }
}

#[test]
fn test_malformed_body_text() {
    let err = load("v3.0")
        .validate_json_request_body("/pets", "post", "{\"name\":")
        .unwrap_err();
    assert!(matches!(err, SchemaError::SchemaSerialization(_)));
}

#[test]
fn test_servers() {
    assert_eq!(
        load("v2.0").servers().unwrap(),
        vec!["http://petstore.swagger.io/api".to_string()]
    );
    assert_eq!(
        load("v3.0").servers().unwrap(),
        vec!["http://petstore.swagger.io/api".to_string()]
    );
}

#[test]
fn test_malformed_reference_fails_load() {
    let doc = json!({
        "swagger": "2.0",
        "paths": {"/x": {"get": {"parameters": [{"$ref": "external.json#/Foo"}]}}}
    });
    let err = Schema::load(doc, LoadOptions::default()).unwrap_err();
    assert!(matches!(err, SchemaError::MalformedReference { .. }));
}

#[test]
fn test_parameter_reference_expanded_before_synthesis() {
    let doc = json!({
        "openapi": "3.0.3",
        "components": {
            "parameters": {
                "Limit": {"name": "limit", "in": "query", "required": true,
                          "schema": {"type": "string"}}
            }
        },
        "paths": {
            "/items": {"get": {"parameters": [{"$ref": "#/components/parameters/Limit"}]}}
        }
    });
    let opts = LoadOptions::default().with_inject_min_length(true);
    let schema = Schema::load(doc, opts).unwrap();
    let found = schema
        .parameter_schema("/items", "get", Some(ParamLocation::Query))
        .unwrap()
        .unwrap();
    assert_eq!(
        found,
        json!({
            "type": "object",
            "required": ["limit"],
            "properties": {"limit": {"type": "string", "minLength": 1}}
        })
    );
}

#[test]
fn test_hardening_is_opt_in() {
    let doc = json!({
        "swagger": "2.0",
        "paths": {
            "/search": {
                "get": {
                    "parameters": [
                        {"name": "q", "in": "query", "required": true, "type": "string"},
                        {"name": "page", "in": "query", "required": true, "type": "integer"},
                        {"name": "lang", "in": "query", "type": "string"}
                    ]
                }
            }
        }
    });

    let plain = Schema::load(doc.clone(), LoadOptions::default()).unwrap();
    let found = plain
        .parameter_schema("/search", "get", Some(ParamLocation::Query))
        .unwrap()
        .unwrap();
    assert!(found["properties"]["q"].get("minLength").is_none());

    let hardened = Schema::load(doc, LoadOptions::default().with_inject_min_length(true)).unwrap();
    let found = hardened
        .parameter_schema("/search", "get", Some(ParamLocation::Query))
        .unwrap()
        .unwrap();
    assert_eq!(found["properties"]["q"]["minLength"], json!(1));
    assert!(found["properties"]["page"].get("minLength").is_none());
    assert!(found["properties"]["lang"].get("minLength").is_none());

    let mut data = Map::new();
    data.insert("q".into(), json!(""));
    data.insert("page".into(), json!(1));
    let result = hardened
        .validate_parameters("/search", "get", Some(ParamLocation::Query), &data)
        .unwrap();
    assert!(!result.valid);
    assert_eq!(result.violations[0].path, "/q");
}

#[test]
fn test_unsupported_documents() {
    let err = Schema::from_text(r#"{"openapi": "3.1.0"}"#, LoadOptions::default()).unwrap_err();
    assert!(matches!(err, SchemaError::UnsupportedVersion(_)));

    let err = Schema::from_text(r#"{"info": {}}"#, LoadOptions::default()).unwrap_err();
    assert!(matches!(err, SchemaError::UnsupportedSchema));
}

#[test]
fn test_load_yaml_file() {
    let yaml = r#"
openapi: 3.0.1
info:
  title: Test API
  version: 1.0.0
paths:
  /users/{id}:
    get:
      parameters:
        - $ref: '#/components/parameters/UserId'
components:
  parameters:
    UserId:
      name: id
      in: path
      required: true
      schema:
        type: integer
"#;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("openapi.yaml");
    fs::write(&path, yaml).unwrap();

    let schema = Schema::from_path(&path, LoadOptions::default()).unwrap();
    assert_eq!(schema.dialect(), Dialect::OpenApi30);

    let mut data = Map::new();
    data.insert("id".into(), json!(42));
    let result = schema
        .validate_parameters("/users/{id}", "get", Some(ParamLocation::Path), &data)
        .unwrap();
    assert!(result.valid);
}

#[test]
fn test_from_slice_and_missing_file() {
    let bytes = fs::read(fixture("v2.0")).unwrap();
    let schema = Schema::from_slice(&bytes, LoadOptions::default()).unwrap();
    assert_eq!(schema.dialect(), Dialect::Swagger2);

    let err = Schema::from_path("/nonexistent/openapi.json", LoadOptions::default()).unwrap_err();
    assert!(matches!(err, SchemaError::Io(_)));
}

#[test]
fn test_recursive_definition_fails_load() {
    let doc = json!({
        "swagger": "2.0",
        "paths": {
            "/nodes": {
                "post": {
                    "parameters": [
                        {"name": "n", "in": "body", "schema": {"$ref": "#/definitions/Node"}}
                    ]
                }
            }
        },
        "definitions": {
            "Node": {"type": "object", "properties": {"child": {"$ref": "#/definitions/Node"}}}
        }
    });
    for max in [2000, 10_000] {
        let opts = LoadOptions::default().with_max_expansion_passes(max);
        let err = Schema::load(doc.clone(), opts).unwrap_err();
        assert!(matches!(err, SchemaError::CyclicReference { .. }), "{err}");
    }
}
