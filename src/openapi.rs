//! OpenAPI 3.0 object model.
//!
//! Typed representations of the document structures the generator emits.
//! Optional fields are skipped during serialization so the output matches
//! what OpenAPI tooling expects; no field is validated - a malformed status
//! code or parameter location propagates into the document unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A security requirement: scheme name mapped to a list of scopes.
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

/// OpenAPI Info object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// API title
    pub title: String,
    /// API version
    pub version: String,
    /// API description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Terms of service URL
    #[serde(rename = "termsOfService", skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    /// Contact information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    /// License information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

impl Info {
    /// Create an Info object with just a title and version.
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            description: None,
            terms_of_service: None,
            contact: None,
            license: None,
        }
    }
}

/// OpenAPI Contact object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// OpenAPI License object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// OpenAPI Server object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    /// Server URL
    pub url: String,
    /// Server description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Server {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }
}

/// OpenAPI Tag object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "externalDocs", skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
}

/// OpenAPI External Documentation object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalDocs {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// OpenAPI Schema object
///
/// Structural type description for request/response bodies and component
/// schemas. Property maps and required lists accumulate across multiple
/// declaration sites (see the generator's schema merge rules).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// The type of the schema (string, number, boolean, array, object)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Format hint for primitive types (e.g. "date-time", "int64")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Properties for object types
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub properties: BTreeMap<String, Schema>,
    /// Required property names for object types
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub required: Vec<String>,
    /// Items schema for array types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Enum values
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    /// Reference to another schema
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
}

impl Schema {
    /// Schema with only a primitive type name set.
    pub fn typed(schema_type: impl Into<String>) -> Self {
        Self {
            schema_type: Some(schema_type.into()),
            ..Self::default()
        }
    }

    /// Empty object schema, the starting point for property accumulation.
    pub fn object() -> Self {
        Self::typed("object")
    }

    /// Reference schema pointing at a named component schema.
    pub fn reference(name: &str) -> Self {
        Self {
            reference: Some(format!("#/components/schemas/{name}")),
            ..Self::default()
        }
    }

    pub fn example(mut self, example: impl Into<Value>) -> Self {
        self.example = Some(example.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// OpenAPI Parameter object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Parameter location (path, query, header, cookie)
    #[serde(rename = "in")]
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the parameter is required; path parameters are implicitly required
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            description: None,
            required: false,
            schema: None,
            example: None,
        }
    }

    /// Query parameter, optional by default.
    pub fn query(name: impl Into<String>) -> Self {
        Self::new(name, "query")
    }

    /// Path parameter, implicitly required.
    pub fn path(name: impl Into<String>) -> Self {
        let mut param = Self::new(name, "path");
        param.required = true;
        param
    }

    /// Header parameter, optional by default.
    pub fn header(name: impl Into<String>) -> Self {
        Self::new(name, "header")
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn example(mut self, example: impl Into<Value>) -> Self {
        self.example = Some(example.into());
        self
    }
}

/// OpenAPI MediaType object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

/// OpenAPI RequestBody object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the request body is required
    pub required: bool,
    /// Content types and their schemas
    pub content: BTreeMap<String, MediaType>,
}

impl RequestBody {
    /// Required `application/json` body with the given schema.
    pub fn json(schema: Schema) -> Self {
        let mut content = BTreeMap::new();
        content.insert(
            "application/json".to_string(),
            MediaType {
                schema: Some(schema),
                example: None,
            },
        );
        Self {
            description: None,
            required: true,
            content,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// OpenAPI Response object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Response description
    pub description: String,
    /// Response content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<BTreeMap<String, MediaType>>,
}

impl Response {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            content: None,
        }
    }

    /// Response with an `application/json` content schema.
    pub fn json(description: impl Into<String>, schema: Schema) -> Self {
        let mut content = BTreeMap::new();
        content.insert(
            "application/json".to_string(),
            MediaType {
                schema: Some(schema),
                example: None,
            },
        );
        Self {
            description: description.into(),
            content: Some(content),
        }
    }
}

/// OpenAPI Security Scheme object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityScheme {
    /// Scheme type (http, apiKey, oauth2, openIdConnect)
    #[serde(rename = "type")]
    pub scheme_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Header/query/cookie name for apiKey schemes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// HTTP auth scheme (basic, bearer) for http schemes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(rename = "bearerFormat", skip_serializing_if = "Option::is_none")]
    pub bearer_format: Option<String>,
}

impl SecurityScheme {
    /// `http` scheme with bearer tokens.
    pub fn bearer() -> Self {
        Self {
            scheme_type: "http".to_string(),
            description: None,
            name: None,
            location: None,
            scheme: Some("bearer".to_string()),
            bearer_format: Some("JWT".to_string()),
        }
    }
}

/// OpenAPI Operation object - one HTTP-method-plus-path endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Tags for grouping; falls back to the controller's tags when unset.
    /// Serialized even when empty
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Stable identifier, defaults to `{Controller}_{method}`
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Parameter>>,
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Status-code string to response; never empty after building
    pub responses: BTreeMap<String, Response>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
}

/// OpenAPI Components object with the nine fixed buckets.
///
/// A bucket serializes only when it holds at least one entry; the generator
/// omits the whole object when every bucket is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub schemas: BTreeMap<String, Schema>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub responses: BTreeMap<String, Response>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub parameters: BTreeMap<String, Parameter>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub examples: BTreeMap<String, Value>,
    #[serde(
        rename = "requestBodies",
        skip_serializing_if = "BTreeMap::is_empty",
        default
    )]
    pub request_bodies: BTreeMap<String, RequestBody>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub headers: BTreeMap<String, Value>,
    #[serde(
        rename = "securitySchemes",
        skip_serializing_if = "BTreeMap::is_empty",
        default
    )]
    pub security_schemes: BTreeMap<String, SecurityScheme>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub links: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub callbacks: BTreeMap<String, Value>,
}

impl Components {
    /// True when every bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
            && self.responses.is_empty()
            && self.parameters.is_empty()
            && self.examples.is_empty()
            && self.request_bodies.is_empty()
            && self.headers.is_empty()
            && self.security_schemes.is_empty()
            && self.links.is_empty()
            && self.callbacks.is_empty()
    }

    /// Copy every entry from `other` into this object. Existing names are
    /// overwritten; used to apply config-seeded components.
    pub fn merge_from(&mut self, other: &Components) {
        self.schemas
            .extend(other.schemas.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.responses
            .extend(other.responses.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.parameters
            .extend(other.parameters.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.examples
            .extend(other.examples.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.request_bodies.extend(
            other
                .request_bodies
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        self.headers
            .extend(other.headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.security_schemes.extend(
            other
                .security_schemes
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        self.links
            .extend(other.links.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.callbacks
            .extend(other.callbacks.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// Insert one component into the bucket selected by its variant.
    /// Last write wins on duplicate names.
    pub fn insert(&mut self, name: impl Into<String>, component: Component) {
        let name = name.into();
        match component {
            Component::Schema(v) => {
                self.schemas.insert(name, v);
            }
            Component::Response(v) => {
                self.responses.insert(name, v);
            }
            Component::Parameter(v) => {
                self.parameters.insert(name, v);
            }
            Component::Example(v) => {
                self.examples.insert(name, v);
            }
            Component::RequestBody(v) => {
                self.request_bodies.insert(name, v);
            }
            Component::Header(v) => {
                self.headers.insert(name, v);
            }
            Component::SecurityScheme(v) => {
                self.security_schemes.insert(name, v);
            }
            Component::Link(v) => {
                self.links.insert(name, v);
            }
            Component::Callback(v) => {
                self.callbacks.insert(name, v);
            }
        }
    }
}

/// One reusable component; the variant picks the target bucket.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Schema(Schema),
    Response(Response),
    Parameter(Parameter),
    Example(Value),
    RequestBody(RequestBody),
    Header(Value),
    SecurityScheme(SecurityScheme),
    Link(Value),
    Callback(Value),
}

/// Path map: normalized path, then lowercase HTTP verb, to operation.
pub type Paths = BTreeMap<String, BTreeMap<String, Operation>>;

/// Complete OpenAPI 3.0 document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiDocument {
    /// OpenAPI version, always "3.0.0"
    pub openapi: String,
    pub info: Info,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<Server>>,
    pub paths: Paths,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(rename = "externalDocs", skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_schema_skips_empty_collections() {
        let schema = Schema::typed("string");
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value, json!({"type": "string"}));
    }

    #[test]
    fn test_parameter_serializes_location_as_in() {
        let param = Parameter::path("id").schema(Schema::typed("number"));
        let value = serde_json::to_value(&param).unwrap();
        assert_eq!(value["in"], "path");
        assert_eq!(value["required"], true);
        assert_eq!(value["schema"]["type"], "number");
    }

    #[test]
    fn test_components_is_empty() {
        let mut components = Components::default();
        assert!(components.is_empty());

        components.insert("Error", Component::Schema(Schema::object()));
        assert!(!components.is_empty());
    }

    #[test]
    fn test_components_insert_last_write_wins() {
        let mut components = Components::default();
        components.insert("User", Component::Schema(Schema::typed("string")));
        components.insert("User", Component::Schema(Schema::object()));
        assert_eq!(
            components.schemas["User"].schema_type.as_deref(),
            Some("object")
        );
    }

    #[test]
    fn test_empty_buckets_not_serialized() {
        let mut components = Components::default();
        components.insert("ok", Component::Response(Response::new("OK")));
        let value = serde_json::to_value(&components).unwrap();
        assert_eq!(value, json!({"responses": {"ok": {"description": "OK"}}}));
    }

    #[test]
    fn test_untagged_operation_serializes_empty_tags_array() {
        let value = serde_json::to_value(Operation::default()).unwrap();
        assert_eq!(value["tags"], json!([]));
    }

    #[test]
    fn test_operation_rename_fields() {
        let operation = Operation {
            operation_id: Some("UserController_findOne".to_string()),
            request_body: Some(RequestBody::json(Schema::object())),
            ..Operation::default()
        };
        let value = serde_json::to_value(&operation).unwrap();
        assert!(value.get("operationId").is_some());
        assert!(value.get("requestBody").is_some());
        assert!(value.get("operation_id").is_none());
    }
}
