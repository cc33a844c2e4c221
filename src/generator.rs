//! OpenAPI document generator - the assembly core.
//!
//! [`OpenApiGenerator`] owns the working path and component maps, fills them
//! from controller metadata via successive [`OpenApiGenerator::add_controller`]
//! calls, and snapshots them into a finished document with
//! [`OpenApiGenerator::generate_document`]. Assembly is synchronous and
//! single-threaded: one long-lived generator per process, mutated during
//! startup and read-only afterwards.
//!
//! Collisions are resolved silently by overwriting: two routes landing on the
//! same `(path, method)` key keep only the later one, and two schema classes
//! sharing a name merge into one schema entry. Both are documented
//! limitations, not errors.

use crate::metadata::MetadataStore;
use crate::openapi::{
    Component, Components, ExternalDocs, Info, OpenApiDocument, Paths, Schema,
    SecurityRequirement, Server, Tag,
};
use crate::operation::build_operation;
use crate::paths::join_paths;
use log::debug;

/// Generator configuration: the document-level fields that are not derived
/// from controller metadata, plus optional seed components reapplied on
/// every [`OpenApiGenerator::reset`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratorConfig {
    pub info: Info,
    pub servers: Option<Vec<Server>>,
    pub security: Option<Vec<SecurityRequirement>>,
    pub tags: Option<Vec<Tag>>,
    pub external_docs: Option<ExternalDocs>,
    pub components: Option<Components>,
}

impl GeneratorConfig {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            info: Info::new(title, version),
            ..Self::default()
        }
    }
}

/// Metadata-driven OpenAPI 3.0 document generator.
#[derive(Debug, Clone)]
pub struct OpenApiGenerator {
    config: GeneratorConfig,
    paths: Paths,
    components: Components,
}

impl OpenApiGenerator {
    /// Create a generator with empty paths and components seeded from
    /// `config.components`.
    pub fn new(config: GeneratorConfig) -> Self {
        debug!("Initializing OpenApiGenerator for '{}'", config.info.title);
        let mut components = Components::default();
        if let Some(seed) = &config.components {
            components.merge_from(seed);
        }
        Self {
            config,
            paths: Paths::new(),
            components,
        }
    }

    /// Walk one controller's metadata and add its routes and schema.
    ///
    /// `base_path` overrides the controller's stored base path; when `None`,
    /// the metadata base path applies, defaulting to the empty string. Routes
    /// are processed in declaration order; each resolves to
    /// `paths[join(base, route.path)][lowercase(method)]`, silently replacing
    /// any operation already there. Class-level and property-level schema
    /// metadata then merge into `components.schemas[controller]`.
    pub fn add_controller(
        &mut self,
        meta: &MetadataStore,
        controller: &str,
        base_path: Option<&str>,
    ) {
        let base = match base_path {
            Some(base) => base.to_string(),
            None => meta.base_path_of(controller).unwrap_or_default().to_string(),
        };
        debug!("Processing controller {controller} with base path '{base}'");

        let default_tags = meta.tags_of(controller);
        let routes = meta.routes_of(controller).unwrap_or_default();

        for route in routes {
            let full_path = join_paths(&base, &route.path);
            let verb = route.method.to_lowercase();
            debug!(
                "Adding route {verb} {full_path} ({controller}.{})",
                route.method_name
            );

            let operation = build_operation(meta, controller, &route.method_name, &default_tags);
            let by_method = self.paths.entry(full_path.clone()).or_default();
            if by_method.insert(verb.clone(), operation).is_some() {
                debug!("Route {verb} {full_path} overwrote an earlier operation");
            }
        }

        self.add_schema_from_class(meta, controller);
    }

    /// Merge class-level and property-level schema metadata into the schemas
    /// bucket, keyed by the class name.
    ///
    /// A class-level schema replaces any existing entry wholesale. Property
    /// declarations then merge in per name, and properties flagged required
    /// append to the schema's required list. The list is append-only, so a
    /// class processed twice lists its required properties twice.
    fn add_schema_from_class(&mut self, meta: &MetadataStore, target: &str) {
        if let Some(schema) = meta.schema_of(target) {
            self.components
                .schemas
                .insert(target.to_string(), schema.clone());
        }

        let Some(properties) = meta.properties_of(target) else {
            return;
        };
        if properties.is_empty() {
            return;
        }

        let entry = self
            .components
            .schemas
            .entry(target.to_string())
            .or_insert_with(Schema::object);

        for (name, property) in properties {
            entry.properties.insert(name.clone(), property.schema.clone());
            if property.required {
                entry.required.push(name.clone());
            }
        }
    }

    /// Insert one component directly; last write wins on duplicate names.
    pub fn add_component(&mut self, name: impl Into<String>, component: Component) {
        self.components.insert(name, component);
    }

    /// Snapshot the accumulated state into a complete document.
    ///
    /// Pure read: the generator stays mutable afterwards. The `components`
    /// key is present only when at least one bucket is non-empty; empty
    /// buckets are pruned at serialization time, but a bucket with entries is
    /// kept whole.
    pub fn generate_document(&self) -> OpenApiDocument {
        debug!(
            "Generating document with {} path(s)",
            self.paths.len()
        );
        OpenApiDocument {
            openapi: "3.0.0".to_string(),
            info: self.config.info.clone(),
            servers: self.config.servers.clone(),
            paths: self.paths.clone(),
            components: if self.components.is_empty() {
                None
            } else {
                Some(self.components.clone())
            },
            security: self.config.security.clone(),
            tags: self.config.tags.clone(),
            external_docs: self.config.external_docs.clone(),
        }
    }

    /// Clear paths and components back to the freshly-constructed state,
    /// reapplying any config-seeded components.
    pub fn reset(&mut self) {
        debug!("Resetting generator state");
        self.paths.clear();
        self.components = Components::default();
        if let Some(seed) = &self.config.components {
            self.components.merge_from(seed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{PropertyMeta, RouteDescriptor};
    use crate::openapi::{Response, SecurityScheme};
    use pretty_assertions::assert_eq;

    fn generator() -> OpenApiGenerator {
        OpenApiGenerator::new(GeneratorConfig::new("Test API", "1.0.0"))
    }

    #[test]
    fn test_add_controller_builds_paths() {
        let mut meta = MetadataStore::new();
        meta.set_tags("UserController", ["users"]);
        meta.add_route("UserController", RouteDescriptor::new("GET", "/", "index"));
        meta.add_route(
            "UserController",
            RouteDescriptor::new("get", "/:id", "find_one"),
        );

        let mut gen = generator();
        gen.add_controller(&meta, "UserController", Some("/users"));
        let document = gen.generate_document();

        assert_eq!(document.openapi, "3.0.0");
        let index = &document.paths["/users"]["get"];
        assert_eq!(index.operation_id.as_deref(), Some("UserController_index"));
        assert_eq!(index.tags, vec!["users".to_string()]);

        let find_one = &document.paths["/users/{id}"]["get"];
        assert_eq!(
            find_one.operation_id.as_deref(),
            Some("UserController_find_one")
        );
        assert_eq!(find_one.responses["200"].description, "Success");
    }

    #[test]
    fn test_base_path_falls_back_to_metadata() {
        let mut meta = MetadataStore::new();
        meta.set_base_path("C", "/api");
        meta.add_route("C", RouteDescriptor::new("get", "/x", "x"));

        let mut gen = generator();
        gen.add_controller(&meta, "C", None);
        assert!(gen.generate_document().paths.contains_key("/api/x"));
    }

    #[test]
    fn test_duplicate_route_last_write_wins() {
        let mut meta = MetadataStore::new();
        meta.add_route("First", RouteDescriptor::new("get", "/x", "one"));
        meta.add_route("Second", RouteDescriptor::new("GET", "/x", "two"));

        let mut gen = generator();
        gen.add_controller(&meta, "First", None);
        gen.add_controller(&meta, "Second", None);

        let document = gen.generate_document();
        assert_eq!(document.paths["/x"].len(), 1);
        assert_eq!(
            document.paths["/x"]["get"].operation_id.as_deref(),
            Some("Second_two")
        );
    }

    #[test]
    fn test_property_accumulation_and_required() {
        let mut meta = MetadataStore::new();
        meta.add_property(
            "User",
            "a",
            PropertyMeta::new(Schema::typed("string")).required(),
        );
        meta.add_property("User", "b", PropertyMeta::new(Schema::typed("number")));

        let mut gen = generator();
        gen.add_controller(&meta, "User", None);

        let document = gen.generate_document();
        let schema = &document.components.unwrap().schemas["User"];
        assert_eq!(schema.schema_type.as_deref(), Some("object"));
        assert_eq!(schema.properties.len(), 2);
        assert_eq!(schema.required, vec!["a".to_string()]);
    }

    #[test]
    fn test_class_schema_processed_twice_duplicates_required() {
        let mut meta = MetadataStore::new();
        meta.add_property(
            "User",
            "a",
            PropertyMeta::new(Schema::typed("string")).required(),
        );

        let mut gen = generator();
        gen.add_controller(&meta, "User", None);
        gen.add_controller(&meta, "User", None);

        let document = gen.generate_document();
        let schema = &document.components.unwrap().schemas["User"];
        assert_eq!(schema.required, vec!["a".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_components_omitted_when_empty() {
        let mut meta = MetadataStore::new();
        meta.add_route("C", RouteDescriptor::new("get", "/x", "x"));

        let mut gen = generator();
        gen.add_controller(&meta, "C", None);

        let document = gen.generate_document();
        assert!(document.components.is_none());

        let json = serde_json::to_value(&document).unwrap();
        assert!(json.get("components").is_none());
    }

    #[test]
    fn test_add_component_and_pruning() {
        let mut gen = generator();
        gen.add_component(
            "bearerAuth",
            Component::SecurityScheme(SecurityScheme::bearer()),
        );

        let json = serde_json::to_value(&gen.generate_document()).unwrap();
        let components = json.get("components").unwrap();
        assert!(components.get("securitySchemes").is_some());
        // empty buckets are pruned entirely
        assert!(components.get("schemas").is_none());
    }

    #[test]
    fn test_reset_restores_seeded_state() {
        let mut seed = Components::default();
        seed.insert("Error", Component::Schema(Schema::object()));
        let config = GeneratorConfig {
            components: Some(seed),
            ..GeneratorConfig::new("Test API", "1.0.0")
        };

        let mut meta = MetadataStore::new();
        meta.add_route("C", RouteDescriptor::new("get", "/x", "x"));

        let mut gen = OpenApiGenerator::new(config.clone());
        gen.add_controller(&meta, "C", None);
        gen.add_component("ok", Component::Response(Response::new("OK")));
        gen.reset();

        let document = gen.generate_document();
        assert!(document.paths.is_empty());
        assert_eq!(
            document.components,
            OpenApiGenerator::new(config).generate_document().components
        );
    }

    #[test]
    fn test_generate_document_is_a_pure_read() {
        let mut meta = MetadataStore::new();
        meta.add_route("C", RouteDescriptor::new("get", "/x", "x"));

        let mut gen = generator();
        gen.add_controller(&meta, "C", None);
        let first = gen.generate_document();
        let second = gen.generate_document();
        assert_eq!(first, second);
    }
}
