//! Operation builder - assembles one OpenAPI Operation from metadata.

use crate::metadata::MetadataStore;
use crate::openapi::Operation;
use crate::openapi::Response;
use log::debug;
use std::collections::BTreeMap;

/// Build the Operation object for one controller method.
///
/// Metadata fields present in the store override the computed defaults:
///
/// - `tags` falls back to `default_tags` (the controller's class-level tags)
/// - `operation_id` defaults to `"{controller}_{method_name}"`
/// - `responses` defaults to a synthesized `200 Success` when no response
///   metadata exists
///
/// Parameters, request body, response map and security requirements are
/// attached verbatim; nothing is validated here.
pub fn build_operation(
    meta: &MetadataStore,
    controller: &str,
    method_name: &str,
    default_tags: &[String],
) -> Operation {
    debug!("Building operation for {controller}.{method_name}");

    let operation_meta = meta
        .operation_of(controller, method_name)
        .cloned()
        .unwrap_or_default();

    let tags = operation_meta
        .tags
        .unwrap_or_else(|| default_tags.to_vec());

    let operation_id = operation_meta
        .operation_id
        .unwrap_or_else(|| format!("{controller}_{method_name}"));

    let parameters = meta
        .parameters_of(controller, method_name)
        .filter(|parameters| !parameters.is_empty())
        .map(|items| items.to_vec());

    let request_body = meta.request_body_of(controller, method_name).cloned();

    let responses = meta
        .responses_of(controller, method_name)
        .filter(|responses| !responses.is_empty())
        .cloned()
        .unwrap_or_else(default_responses);

    let security = meta
        .security_of(controller, method_name)
        .map(|items| items.to_vec());

    Operation {
        tags,
        summary: operation_meta.summary,
        description: operation_meta.description,
        operation_id: Some(operation_id),
        parameters,
        request_body,
        responses,
        security,
        deprecated: operation_meta.deprecated,
    }
}

/// The synthesized response map used when a method declares none.
fn default_responses() -> BTreeMap<String, Response> {
    let mut responses = BTreeMap::new();
    responses.insert("200".to_string(), Response::new("Success"));
    responses
}
