//! Value-type markers and their mapping to OpenAPI primitive type strings.
//!
//! The mapping is intentionally lossy: it never recurses into array item
//! types or nested object shapes, and unrecognized markers fall back to
//! `string` rather than raising an error. Class-level schemas go through
//! the generator's dedicated schema path instead.

use crate::openapi::Schema;

/// A declared value-type marker for a parameter or property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    String,
    Number,
    Boolean,
    /// Date-like values are documented as strings.
    Date,
    Array,
    Object,
    /// A named class reference; documented as a plain object.
    Class(String),
}

impl ValueType {
    /// Resolve a marker to one of the fixed OpenAPI primitive type strings.
    ///
    /// An absent marker resolves to `string`.
    pub fn resolve(marker: Option<&ValueType>) -> &'static str {
        match marker {
            None => "string",
            Some(ValueType::String) | Some(ValueType::Date) => "string",
            Some(ValueType::Number) => "number",
            Some(ValueType::Boolean) => "boolean",
            Some(ValueType::Array) => "array",
            Some(ValueType::Object) | Some(ValueType::Class(_)) => "object",
        }
    }

    /// OpenAPI primitive type string for this marker.
    pub fn as_openapi_type(&self) -> &'static str {
        Self::resolve(Some(self))
    }

    /// Schema carrying only the resolved primitive type.
    pub fn schema(&self) -> Schema {
        Schema::typed(self.as_openapi_type())
    }
}
