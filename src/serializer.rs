//! Serialization module for converting OpenAPI documents to JSON or YAML.

use crate::error::Result;
use crate::openapi::OpenApiDocument;
use log::debug;
use std::fs;
use std::path::Path;

/// Serializes an OpenAPI document to pretty-printed JSON.
///
/// The output is formatted with indentation, suitable for human review and
/// version control.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_json(doc: &OpenApiDocument) -> Result<String> {
    debug!("Serializing OpenAPI document to JSON");
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Serializes an OpenAPI document to compact JSON, the form served by the
/// JSON endpoint.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_json_compact(doc: &OpenApiDocument) -> Result<String> {
    debug!("Serializing OpenAPI document to compact JSON");
    Ok(serde_json::to_string(doc)?)
}

/// Serializes an OpenAPI document to YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_yaml(doc: &OpenApiDocument) -> Result<String> {
    debug!("Serializing OpenAPI document to YAML");
    Ok(serde_yaml::to_string(doc)?)
}

/// Writes string content to a file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;

    debug!(
        "Successfully wrote {} bytes to {}",
        content.len(),
        path.display()
    );
    Ok(())
}
