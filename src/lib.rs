//! Metadata-driven OpenAPI 3.0 document generation with Scalar documentation
//! serving for axum.
//!
//! This library assembles a standards-compliant OpenAPI 3.0 document from
//! controller metadata - tags, operations, parameters, request bodies,
//! responses and schemas registered in an explicit [`metadata::MetadataStore`]
//! - and serves the result through the interactive Scalar documentation UI.
//!
//! # Architecture
//!
//! The modules work together in a fixed order:
//!
//! 1. [`metadata`] - explicit annotation storage keyed by (key, target, member)
//! 2. [`type_resolver`] - maps declared value-type markers to OpenAPI primitives
//! 3. [`paths`] - normalizes `:param` route syntax to `{param}` and joins base paths
//! 4. [`operation`] - builds one Operation object per controller method
//! 5. [`generator`] - aggregates controllers into paths and merged component schemas
//! 6. [`serializer`] - serializes the document to JSON or YAML
//! 7. [`scalar`] - mounts the documentation UI and spec endpoints on an axum router
//! 8. [`markdown`] - renders the spec as Markdown for the LLM export endpoint
//! 9. [`discovery`] - enumerates registered controllers, recovering from failures
//!
//! # Example
//!
//! ```
//! use openapi_scalar::{
//!     GeneratorConfig, MetadataStore, OpenApiGenerator, RouteDescriptor, ScalarConfig,
//! };
//! use openapi_scalar::scalar::{serve_document, setup_scalar};
//!
//! // Register controller metadata (the decorator analog).
//! let mut meta = MetadataStore::new();
//! meta.set_tags("UserController", ["users"]);
//! meta.add_route(
//!     "UserController",
//!     RouteDescriptor::new("get", "/:id", "find_one"),
//! );
//!
//! // Assemble the document.
//! let mut generator = OpenApiGenerator::new(GeneratorConfig::new("User API", "1.0.0"));
//! generator.add_controller(&meta, "UserController", Some("/users"));
//! let document = generator.generate_document();
//! assert!(document.paths.contains_key("/users/{id}"));
//!
//! // Serve the document and the documentation UI.
//! let app = axum::Router::new();
//! let app = serve_document(app, "/openapi.json", document);
//! let _app = setup_scalar(
//!     app,
//!     ScalarConfig::new().spec("/openapi.json").markdown(true),
//! );
//! ```

pub mod discovery;
pub mod error;
pub mod generator;
pub mod markdown;
pub mod metadata;
pub mod openapi;
pub mod operation;
pub mod paths;
pub mod scalar;
pub mod serializer;
pub mod type_resolver;

pub use discovery::{discover_controllers, ControllerRegistry, ControllerSource};
pub use error::{Error, Result};
pub use generator::{GeneratorConfig, OpenApiGenerator};
pub use metadata::{
    MetadataKey, MetadataStore, MetadataValue, OperationMeta, PropertyMeta, RouteDescriptor,
};
pub use openapi::{
    Component, Components, Info, OpenApiDocument, Operation, Parameter, RequestBody, Response,
    Schema, SecurityScheme, Server, Tag,
};
pub use scalar::{ScalarConfig, SpecPayload, SpecSource, Theme};
pub use type_resolver::ValueType;
