//! Explicit OpenAPI metadata store.
//!
//! Annotations that a decorator-based framework would scatter through a
//! global reflection registry live here as an owned map keyed by
//! `(key, target, member)`, where `target` is a controller or schema class
//! name and `member` an optional method name. The raw [`MetadataStore::get`]
//! / [`MetadataStore::set`] capability is the full contract; the typed
//! helpers on top of it reproduce the accumulation semantics of the
//! individual annotations (responses merge per status, parameters append,
//! properties merge per name, everything else is last-write-wins).
//!
//! The store performs no validation. A nonsense HTTP method or an unknown
//! parameter location is stored and later emitted unchanged.

use crate::openapi::{Parameter, RequestBody, Response, Schema, SecurityRequirement};
use std::collections::{BTreeMap, HashMap};

/// The fixed set of metadata keys the generator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKey {
    /// Class-level tag list
    Tags,
    /// Method-level operation descriptor
    Operation,
    /// Method-level parameter list
    Parameters,
    /// Method-level request body
    RequestBody,
    /// Method-level response map
    Responses,
    /// Method-level security requirements
    Security,
    /// Class-level schema object
    Schema,
    /// Class-level property schema map
    Properties,
    /// Class-level ordered route table
    Routes,
    /// Class-level base path
    BasePath,
}

impl MetadataKey {
    /// Stable string form of the key, matching the annotation names.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataKey::Tags => "openapi:tags",
            MetadataKey::Operation => "openapi:operation",
            MetadataKey::Parameters => "openapi:parameters",
            MetadataKey::RequestBody => "openapi:requestBody",
            MetadataKey::Responses => "openapi:responses",
            MetadataKey::Security => "openapi:security",
            MetadataKey::Schema => "openapi:schema",
            MetadataKey::Properties => "openapi:properties",
            MetadataKey::Routes => "openapi:routes",
            MetadataKey::BasePath => "openapi:basePath",
        }
    }
}

/// Partial operation descriptor; any present field overrides the builder's
/// computed default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationMeta {
    pub tags: Option<Vec<String>>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub operation_id: Option<String>,
    pub deprecated: Option<bool>,
}

impl OperationMeta {
    pub fn summary(summary: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }

    pub fn tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}

/// One property declaration on a schema class.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyMeta {
    pub schema: Schema,
    /// Feeds the class schema's `required` list during merging.
    pub required: bool,
}

impl PropertyMeta {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// One HTTP method/path pair registered on a controller.
///
/// `(method, path)` pairs need not be unique here; if two routes resolve to
/// the same final path and method, the later addition wins downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDescriptor {
    /// HTTP method, case-insensitive (lowercased when stored in the document)
    pub method: String,
    /// Route path in framework syntax, e.g. `/:id`
    pub path: String,
    /// Method identifier used for metadata lookup
    pub method_name: String,
}

impl RouteDescriptor {
    pub fn new(
        method: impl Into<String>,
        path: impl Into<String>,
        method_name: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            method_name: method_name.into(),
        }
    }
}

/// A stored metadata value; the variant corresponds to its key.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Tags(Vec<String>),
    Operation(OperationMeta),
    Parameters(Vec<Parameter>),
    RequestBody(RequestBody),
    Responses(BTreeMap<String, Response>),
    Security(Vec<SecurityRequirement>),
    Schema(Schema),
    Properties(BTreeMap<String, PropertyMeta>),
    Routes(Vec<RouteDescriptor>),
    BasePath(String),
}

type EntryKey = (MetadataKey, String, Option<String>);

/// Per-target, per-member annotation storage.
#[derive(Debug, Clone, Default)]
pub struct MetadataStore {
    entries: HashMap<EntryKey, MetadataValue>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under `(key, target, member)`, replacing any previous
    /// value at that slot.
    pub fn set(
        &mut self,
        key: MetadataKey,
        value: MetadataValue,
        target: &str,
        member: Option<&str>,
    ) {
        self.entries
            .insert((key, target.to_string(), member.map(str::to_string)), value);
    }

    /// Look up whatever was stored under `(key, target, member)`.
    pub fn get(
        &self,
        key: MetadataKey,
        target: &str,
        member: Option<&str>,
    ) -> Option<&MetadataValue> {
        self.entries
            .get(&(key, target.to_string(), member.map(str::to_string)))
    }

    // --- registration helpers (the decorator analogs) ---

    /// Set the class-level tag list.
    pub fn set_tags(&mut self, target: &str, tags: impl IntoIterator<Item = impl Into<String>>) {
        let tags = tags.into_iter().map(Into::into).collect();
        self.set(MetadataKey::Tags, MetadataValue::Tags(tags), target, None);
    }

    /// Set the operation descriptor for a method.
    pub fn set_operation(&mut self, target: &str, member: &str, operation: OperationMeta) {
        self.set(
            MetadataKey::Operation,
            MetadataValue::Operation(operation),
            target,
            Some(member),
        );
    }

    /// Add one response for a method; later declarations of the same status
    /// replace earlier ones.
    pub fn add_response(
        &mut self,
        target: &str,
        member: &str,
        status: impl Into<String>,
        response: Response,
    ) {
        let mut responses = self
            .responses_of(target, member)
            .cloned()
            .unwrap_or_default();
        responses.insert(status.into(), response);
        self.set(
            MetadataKey::Responses,
            MetadataValue::Responses(responses),
            target,
            Some(member),
        );
    }

    /// Append one parameter to a method's parameter list.
    pub fn add_parameter(&mut self, target: &str, member: &str, parameter: Parameter) {
        let mut parameters = self
            .parameters_of(target, member)
            .map(<[Parameter]>::to_vec)
            .unwrap_or_default();
        parameters.push(parameter);
        self.set(
            MetadataKey::Parameters,
            MetadataValue::Parameters(parameters),
            target,
            Some(member),
        );
    }

    /// Set the request body for a method.
    pub fn set_request_body(&mut self, target: &str, member: &str, body: RequestBody) {
        self.set(
            MetadataKey::RequestBody,
            MetadataValue::RequestBody(body),
            target,
            Some(member),
        );
    }

    /// Set the security requirements for a method.
    pub fn set_security(&mut self, target: &str, member: &str, security: Vec<SecurityRequirement>) {
        self.set(
            MetadataKey::Security,
            MetadataValue::Security(security),
            target,
            Some(member),
        );
    }

    /// Set a class-level schema.
    pub fn set_schema(&mut self, target: &str, schema: Schema) {
        self.set(
            MetadataKey::Schema,
            MetadataValue::Schema(schema),
            target,
            None,
        );
    }

    /// Declare one property on a schema class; re-declaring a property name
    /// replaces the earlier declaration.
    pub fn add_property(&mut self, target: &str, name: impl Into<String>, property: PropertyMeta) {
        let mut properties = self.properties_of(target).cloned().unwrap_or_default();
        properties.insert(name.into(), property);
        self.set(
            MetadataKey::Properties,
            MetadataValue::Properties(properties),
            target,
            None,
        );
    }

    /// Append one route to a controller's route table, preserving
    /// declaration order.
    pub fn add_route(&mut self, target: &str, route: RouteDescriptor) {
        let mut routes = self
            .routes_of(target)
            .map(<[RouteDescriptor]>::to_vec)
            .unwrap_or_default();
        routes.push(route);
        self.set(
            MetadataKey::Routes,
            MetadataValue::Routes(routes),
            target,
            None,
        );
    }

    /// Set a controller's base path.
    pub fn set_base_path(&mut self, target: &str, base_path: impl Into<String>) {
        self.set(
            MetadataKey::BasePath,
            MetadataValue::BasePath(base_path.into()),
            target,
            None,
        );
    }

    // --- typed readers ---

    /// Class-level tags; empty when never set.
    pub fn tags_of(&self, target: &str) -> Vec<String> {
        match self.get(MetadataKey::Tags, target, None) {
            Some(MetadataValue::Tags(tags)) => tags.clone(),
            _ => Vec::new(),
        }
    }

    pub fn operation_of(&self, target: &str, member: &str) -> Option<&OperationMeta> {
        match self.get(MetadataKey::Operation, target, Some(member)) {
            Some(MetadataValue::Operation(operation)) => Some(operation),
            _ => None,
        }
    }

    pub fn parameters_of(&self, target: &str, member: &str) -> Option<&[Parameter]> {
        match self.get(MetadataKey::Parameters, target, Some(member)) {
            Some(MetadataValue::Parameters(parameters)) => Some(parameters),
            _ => None,
        }
    }

    pub fn request_body_of(&self, target: &str, member: &str) -> Option<&RequestBody> {
        match self.get(MetadataKey::RequestBody, target, Some(member)) {
            Some(MetadataValue::RequestBody(body)) => Some(body),
            _ => None,
        }
    }

    pub fn responses_of(&self, target: &str, member: &str) -> Option<&BTreeMap<String, Response>> {
        match self.get(MetadataKey::Responses, target, Some(member)) {
            Some(MetadataValue::Responses(responses)) => Some(responses),
            _ => None,
        }
    }

    pub fn security_of(&self, target: &str, member: &str) -> Option<&[SecurityRequirement]> {
        match self.get(MetadataKey::Security, target, Some(member)) {
            Some(MetadataValue::Security(security)) => Some(security),
            _ => None,
        }
    }

    pub fn schema_of(&self, target: &str) -> Option<&Schema> {
        match self.get(MetadataKey::Schema, target, None) {
            Some(MetadataValue::Schema(schema)) => Some(schema),
            _ => None,
        }
    }

    pub fn properties_of(&self, target: &str) -> Option<&BTreeMap<String, PropertyMeta>> {
        match self.get(MetadataKey::Properties, target, None) {
            Some(MetadataValue::Properties(properties)) => Some(properties),
            _ => None,
        }
    }

    /// Route table in declaration order; empty when never set.
    pub fn routes_of(&self, target: &str) -> Option<&[RouteDescriptor]> {
        match self.get(MetadataKey::Routes, target, None) {
            Some(MetadataValue::Routes(routes)) => Some(routes),
            _ => None,
        }
    }

    pub fn base_path_of(&self, target: &str) -> Option<&str> {
        match self.get(MetadataKey::BasePath, target, None) {
            Some(MetadataValue::BasePath(base_path)) => Some(base_path),
            _ => None,
        }
    }
}
