//! OpenAPI-to-Markdown conversion for the LLM export endpoint.
//!
//! The converter takes a serialized spec and renders a plain-text Markdown
//! digest of its operations and schemas. It tolerates partial documents:
//! missing sections are skipped rather than rejected, matching the
//! garbage-in/garbage-out contract of the generator.

use crate::error::{Error, Result};
use crate::scalar::{SpecPayload, SpecSource};
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response as HttpResponse};
use log::error;
use serde_json::Value;
use std::fmt::Write as _;

/// Fixed body returned when conversion fails; the real cause only reaches
/// the log.
const CONVERSION_FAILED: &str = "Failed to generate API documentation markdown";

/// Handler body for the Markdown export endpoint.
///
/// Resolves the spec source, fetches or serializes the spec, converts it,
/// and returns `text/plain; charset=utf-8`. Every failure along the way is
/// logged and mapped to a 500 with a fixed message - nothing propagates.
pub(crate) async fn markdown_endpoint(source: SpecSource, parts: Parts) -> HttpResponse {
    let result = spec_content(source, parts).await;
    match result.and_then(|spec| markdown_from_openapi(&spec)) {
        Ok(markdown) => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            markdown,
        )
            .into_response(),
        Err(err) => {
            error!("Failed to generate markdown: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, CONVERSION_FAILED).into_response()
        }
    }
}

/// Obtain the serialized spec for one request.
///
/// Inline documents serialize directly. Absolute URLs are fetched over
/// HTTP; relative URLs resolve against the request's Host header.
async fn spec_content(source: SpecSource, parts: Parts) -> Result<String> {
    let host = parts
        .headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    match source.resolve(parts).await {
        SpecPayload::Document(doc) => Ok(serde_json::to_string(&doc)?),
        SpecPayload::Url(url) if url.starts_with("http") => {
            Ok(reqwest::get(&url).await?.text().await?)
        }
        SpecPayload::Url(path) => {
            let host = host.ok_or_else(|| {
                Error::Markdown("cannot resolve a relative spec URL without a Host header".to_string())
            })?;
            Ok(reqwest::get(format!("http://{host}{path}")).await?.text().await?)
        }
    }
}

/// Convert a serialized OpenAPI document to Markdown.
///
/// # Errors
///
/// Returns an error when the input is not valid JSON or not a JSON object.
pub fn markdown_from_openapi(spec_json: &str) -> Result<String> {
    let doc: Value = serde_json::from_str(spec_json)?;
    let root = doc
        .as_object()
        .ok_or_else(|| Error::Markdown("spec is not a JSON object".to_string()))?;

    let mut out = String::new();

    if let Some(info) = root.get("info").and_then(Value::as_object) {
        let title = info.get("title").and_then(Value::as_str).unwrap_or("API");
        let _ = writeln!(out, "# {title}");
        if let Some(version) = info.get("version").and_then(Value::as_str) {
            let _ = writeln!(out, "\nVersion: {version}");
        }
        if let Some(description) = info.get("description").and_then(Value::as_str) {
            let _ = writeln!(out, "\n{description}");
        }
    } else {
        out.push_str("# API\n");
    }

    if let Some(servers) = root.get("servers").and_then(Value::as_array) {
        if !servers.is_empty() {
            out.push_str("\n## Servers\n\n");
            for server in servers {
                if let Some(url) = server.get("url").and_then(Value::as_str) {
                    match server.get("description").and_then(Value::as_str) {
                        Some(description) => {
                            let _ = writeln!(out, "- `{url}` - {description}");
                        }
                        None => {
                            let _ = writeln!(out, "- `{url}`");
                        }
                    }
                }
            }
        }
    }

    if let Some(paths) = root.get("paths").and_then(Value::as_object) {
        for (path, item) in paths {
            let Some(operations) = item.as_object() else {
                continue;
            };
            for (method, operation) in operations {
                write_operation(&mut out, method, path, operation);
            }
        }
    }

    if let Some(schemas) = root
        .get("components")
        .and_then(|c| c.get("schemas"))
        .and_then(Value::as_object)
    {
        if !schemas.is_empty() {
            out.push_str("\n## Schemas\n");
            for (name, schema) in schemas {
                write_schema(&mut out, name, schema);
            }
        }
    }

    Ok(out)
}

fn write_operation(out: &mut String, method: &str, path: &str, operation: &Value) {
    let _ = writeln!(out, "\n## {} {path}", method.to_uppercase());

    if let Some(summary) = operation.get("summary").and_then(Value::as_str) {
        let _ = writeln!(out, "\n{summary}");
    }
    if let Some(description) = operation.get("description").and_then(Value::as_str) {
        let _ = writeln!(out, "\n{description}");
    }
    if let Some(operation_id) = operation.get("operationId").and_then(Value::as_str) {
        let _ = writeln!(out, "\nOperation ID: `{operation_id}`");
    }
    if let Some(tags) = operation.get("tags").and_then(Value::as_array) {
        let names: Vec<&str> = tags.iter().filter_map(Value::as_str).collect();
        if !names.is_empty() {
            let _ = writeln!(out, "\nTags: {}", names.join(", "));
        }
    }

    if let Some(parameters) = operation.get("parameters").and_then(Value::as_array) {
        if !parameters.is_empty() {
            out.push_str("\n### Parameters\n\n");
            out.push_str("| Name | In | Required | Type | Description |\n");
            out.push_str("| --- | --- | --- | --- | --- |\n");
            for parameter in parameters {
                let name = parameter.get("name").and_then(Value::as_str).unwrap_or("");
                let location = parameter.get("in").and_then(Value::as_str).unwrap_or("");
                let required = parameter
                    .get("required")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                let schema_type = parameter
                    .get("schema")
                    .and_then(|s| s.get("type"))
                    .and_then(Value::as_str)
                    .unwrap_or("");
                let description = parameter
                    .get("description")
                    .and_then(Value::as_str)
                    .unwrap_or("");
                let _ = writeln!(
                    out,
                    "| {name} | {location} | {required} | {schema_type} | {description} |"
                );
            }
        }
    }

    if let Some(request_body) = operation.get("requestBody").and_then(Value::as_object) {
        out.push_str("\n### Request Body\n\n");
        if let Some(description) = request_body.get("description").and_then(Value::as_str) {
            let _ = writeln!(out, "{description}\n");
        }
        if let Some(content) = request_body.get("content").and_then(Value::as_object) {
            for content_type in content.keys() {
                let _ = writeln!(out, "- `{content_type}`");
            }
        }
    }

    if let Some(responses) = operation.get("responses").and_then(Value::as_object) {
        out.push_str("\n### Responses\n\n");
        for (status, response) in responses {
            let description = response
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("");
            let _ = writeln!(out, "- `{status}` - {description}");
        }
    }
}

fn write_schema(out: &mut String, name: &str, schema: &Value) {
    let _ = writeln!(out, "\n### {name}");

    if let Some(description) = schema.get("description").and_then(Value::as_str) {
        let _ = writeln!(out, "\n{description}");
    }

    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        out.push('\n');
        for (property, value) in properties {
            let property_type = value.get("type").and_then(Value::as_str).unwrap_or("object");
            let marker = if required.contains(&property.as_str()) {
                " (required)"
            } else {
                ""
            };
            let _ = writeln!(out, "- `{property}`: {property_type}{marker}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{GeneratorConfig, OpenApiGenerator};
    use crate::metadata::{MetadataStore, OperationMeta, PropertyMeta, RouteDescriptor};
    use crate::openapi::{Parameter, Response, Schema};
    use crate::serializer::serialize_json_compact;

    fn sample_spec() -> String {
        let mut meta = MetadataStore::new();
        meta.set_tags("UserController", ["users"]);
        meta.add_route(
            "UserController",
            RouteDescriptor::new("get", "/:id", "find_one"),
        );
        meta.set_operation(
            "UserController",
            "find_one",
            OperationMeta::summary("Find one user"),
        );
        meta.add_parameter(
            "UserController",
            "find_one",
            Parameter::path("id").schema(Schema::typed("number")),
        );
        meta.add_response(
            "UserController",
            "find_one",
            "200",
            Response::new("User found"),
        );
        meta.add_property(
            "UserController",
            "name",
            PropertyMeta::new(Schema::typed("string")).required(),
        );

        let mut gen = OpenApiGenerator::new(GeneratorConfig::new("User API", "1.0.0"));
        gen.add_controller(&meta, "UserController", Some("/users"));
        serialize_json_compact(&gen.generate_document()).unwrap()
    }

    #[test]
    fn test_renders_title_and_operations() {
        let markdown = markdown_from_openapi(&sample_spec()).unwrap();
        assert!(markdown.starts_with("# User API"));
        assert!(markdown.contains("## GET /users/{id}"));
        assert!(markdown.contains("Find one user"));
        assert!(markdown.contains("Operation ID: `UserController_find_one`"));
        assert!(markdown.contains("| id | path | true | number |"));
        assert!(markdown.contains("- `200` - User found"));
    }

    #[test]
    fn test_renders_schema_section() {
        let markdown = markdown_from_openapi(&sample_spec()).unwrap();
        assert!(markdown.contains("### UserController"));
        assert!(markdown.contains("- `name`: string (required)"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(markdown_from_openapi("not json").is_err());
        assert!(markdown_from_openapi("[1, 2]").is_err());
    }

    #[test]
    fn test_partial_documents_are_tolerated() {
        let markdown = markdown_from_openapi("{}").unwrap();
        assert!(markdown.contains("# API"));
    }
}
