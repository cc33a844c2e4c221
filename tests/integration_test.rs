use axum_test::TestServer;
use openapi_scalar::scalar::{serve_document, setup_scalar, SpecPayload};
use openapi_scalar::{
    GeneratorConfig, MetadataStore, OpenApiGenerator, OperationMeta, Parameter, PropertyMeta,
    Response, RouteDescriptor, ScalarConfig, Schema, SpecSource, ValueType,
};
use serde_json::{json, Value};

/// Helper building the metadata for a small user-management controller.
fn user_controller_metadata() -> MetadataStore {
    let mut meta = MetadataStore::new();

    meta.set_tags("UserController", ["users"]);
    meta.set_base_path("UserController", "/users");
    meta.add_route("UserController", RouteDescriptor::new("get", "/", "find_all"));
    meta.add_route(
        "UserController",
        RouteDescriptor::new("get", "/:id", "find_one"),
    );
    meta.add_route("UserController", RouteDescriptor::new("POST", "/", "create"));

    meta.set_operation(
        "UserController",
        "find_one",
        OperationMeta::summary("Find one user"),
    );
    meta.add_parameter(
        "UserController",
        "find_one",
        Parameter::path("id").schema(ValueType::Number.schema()),
    );
    meta.add_response(
        "UserController",
        "find_one",
        "200",
        Response::new("User found"),
    );

    meta.add_property(
        "User",
        "name",
        PropertyMeta::new(ValueType::String.schema()).required(),
    );
    meta.add_property("User", "age", PropertyMeta::new(ValueType::Number.schema()));

    meta
}

fn user_document() -> openapi_scalar::OpenApiDocument {
    let meta = user_controller_metadata();
    let mut generator = OpenApiGenerator::new(GeneratorConfig::new("User API", "1.0.0"));
    generator.add_controller(&meta, "UserController", None);
    generator.add_controller(&meta, "User", None);
    generator.generate_document()
}

#[test]
fn test_end_to_end_document_generation() {
    let document = user_document();

    assert_eq!(document.openapi, "3.0.0");
    assert_eq!(document.info.title, "User API");

    // Route paths are joined with the metadata base path and normalized.
    let find_one = &document.paths["/users/{id}"]["get"];
    assert_eq!(
        find_one.operation_id.as_deref(),
        Some("UserController_find_one")
    );
    assert_eq!(find_one.summary.as_deref(), Some("Find one user"));
    assert_eq!(find_one.responses["200"].description, "User found");
    assert_eq!(find_one.tags, vec!["users".to_string()]);

    // The root route collapses onto the base path, one entry per verb.
    let root = &document.paths["/users"];
    assert_eq!(root.len(), 2);
    assert_eq!(
        root["post"].operation_id.as_deref(),
        Some("UserController_create")
    );
    assert_eq!(root["get"].responses["200"].description, "Success");

    // Property declarations merged into one schema entry.
    let schema = &document.components.as_ref().unwrap().schemas["User"];
    assert_eq!(schema.properties.len(), 2);
    assert_eq!(schema.required, vec!["name".to_string()]);
}

#[test]
fn test_document_serializes_with_expected_keys() {
    let value = serde_json::to_value(user_document()).unwrap();

    assert_eq!(value["openapi"], "3.0.0");
    assert_eq!(
        value["paths"]["/users/{id}"]["get"]["operationId"],
        "UserController_find_one"
    );
    assert_eq!(
        value["paths"]["/users/{id}"]["get"]["parameters"][0]["in"],
        "path"
    );
    assert_eq!(
        value["components"]["schemas"]["User"]["properties"]["name"]["type"],
        "string"
    );
    // Unused buckets never appear.
    assert!(value["components"].get("securitySchemes").is_none());
}

#[tokio::test]
async fn test_spec_endpoint_serves_json() {
    let app = serve_document(axum::Router::new(), "/openapi.json", user_document());
    let server = TestServer::new(app).unwrap();

    let response = server.get("/openapi.json").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["openapi"], "3.0.0");
    assert_eq!(
        body["paths"]["/users/{id}"]["get"]["responses"]["200"]["description"],
        "User found"
    );
}

#[tokio::test]
async fn test_docs_endpoint_serves_scalar_ui() {
    let app = setup_scalar(
        axum::Router::new(),
        ScalarConfig::new().title("User API Docs").spec("/openapi.json"),
    );
    let server = TestServer::new(app).unwrap();

    let response = server.get("/docs").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("<title>User API Docs</title>"));
    assert!(html.contains("id=\"api-reference\""));
    assert!(html.contains("&quot;url&quot;:&quot;/openapi.json&quot;"));
}

#[tokio::test]
async fn test_disabled_config_mounts_nothing() {
    let app = setup_scalar(axum::Router::new(), ScalarConfig::new().disabled());
    let server = TestServer::new(app).unwrap();

    let response = server.get("/docs").await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_dynamic_resolver_renders_inline_content() {
    let source = SpecSource::resolver(|_parts| async {
        SpecPayload::Document(json!({"openapi": "3.0.0", "info": {"title": "Resolved"}}))
    });
    let app = setup_scalar(axum::Router::new(), ScalarConfig::new().spec(source));
    let server = TestServer::new(app).unwrap();

    let response = server.get("/docs").await;
    response.assert_status_ok();
    assert!(response.text().contains("Resolved"));
}

#[tokio::test]
async fn test_markdown_endpoint_renders_spec() {
    let document = user_document();
    let config = ScalarConfig::new()
        .spec(SpecSource::from(&document))
        .markdown(true);
    let app = setup_scalar(axum::Router::new(), config);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/llms.txt").await;
    response.assert_status_ok();
    assert_eq!(
        response.header("content-type"),
        "text/plain; charset=utf-8"
    );

    let markdown = response.text();
    assert!(markdown.starts_with("# User API"));
    assert!(markdown.contains("## GET /users/{id}"));
    assert!(markdown.contains("- `200` - User found"));
}

#[tokio::test]
async fn test_markdown_failure_degrades_to_fixed_500() {
    // An array is not an OpenAPI document; conversion fails server-side.
    let config = ScalarConfig::new()
        .spec(SpecSource::Document(json!([1, 2, 3])))
        .markdown(true);
    let app = setup_scalar(axum::Router::new(), config);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/llms.txt").await;
    response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.text(),
        "Failed to generate API documentation markdown"
    );
}

#[tokio::test]
async fn test_overwrite_then_reset_round_trip() {
    let mut first = MetadataStore::new();
    first.add_route("First", RouteDescriptor::new("get", "/x", "one"));
    let mut second = MetadataStore::new();
    second.add_route("Second", RouteDescriptor::new("get", "/x", "two"));

    let mut generator = OpenApiGenerator::new(GeneratorConfig::new("API", "1.0.0"));
    generator.add_controller(&first, "First", None);
    generator.add_controller(&second, "Second", None);

    let document = generator.generate_document();
    assert_eq!(
        document.paths["/x"]["get"].operation_id.as_deref(),
        Some("Second_two")
    );

    generator.reset();
    let reset_document = generator.generate_document();
    assert!(reset_document.paths.is_empty());
    assert!(reset_document.components.is_none());
}

#[test]
fn test_schema_class_collision_merges_silently() {
    // Two distinct classes sharing a name end up in one schema entry.
    let mut meta = MetadataStore::new();
    meta.set_schema("Shared", Schema::object());
    meta.add_property(
        "Shared",
        "field",
        PropertyMeta::new(ValueType::Boolean.schema()),
    );

    let mut generator = OpenApiGenerator::new(GeneratorConfig::new("API", "1.0.0"));
    generator.add_controller(&meta, "Shared", None);

    let document = generator.generate_document();
    let schemas = &document.components.as_ref().unwrap().schemas;
    assert_eq!(schemas.len(), 1);
    assert_eq!(
        schemas["Shared"].properties["field"].schema_type.as_deref(),
        Some("boolean")
    );
}
