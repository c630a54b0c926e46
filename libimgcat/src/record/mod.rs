//! Raw image records as returned by the catalog service.
//!
//! The adapter never talks to the service itself. Whatever client is in use
//! only has to expose its image objects through [`ImageRecord`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};


/// Read access to the attributes of a catalog image.
///
/// `attribute` distinguishes a missing attribute (`None`) from one that is
/// present but null (`Some(Value::Null)`).
pub trait ImageRecord {
    /// Looks up a single attribute by name.
    fn attribute(&self, name: &str) -> Option<&Value>;

    /// Names of every attribute present on the record.
    fn attribute_names(&self) -> Box<dyn Iterator<Item = &str> + '_>;
}

impl ImageRecord for Map<String, Value> {
    fn attribute(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }

    fn attribute_names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.keys().map(String::as_str))
    }
}

/// An image record backed by the JSON object the catalog API returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawImage(Map<String, Value>);

impl RawImage {
    /// Wraps an already decoded attribute map.
    pub fn new(attributes: Map<String, Value>) -> Self {
        Self(attributes)
    }

    /// Builds a record from a JSON value, which must be an object.
    ///
    /// Returns `None` for any other kind of value.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(attributes) => Some(Self(attributes)),
            _ => None,
        }
    }

    /// Sets an attribute, returning the record for chaining.
    pub fn with<S: Into<String>>(mut self, name: S, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Returns the underlying attribute map.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl ImageRecord for RawImage {
    fn attribute(&self, name: &str) -> Option<&Value> {
        self.0.attribute(name)
    }

    fn attribute_names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        self.0.attribute_names()
    }
}

impl From<Map<String, Value>> for RawImage {
    fn from(attributes: Map<String, Value>) -> Self {
        Self(attributes)
    }
}

/// Renders an attribute value the way it is compared against fixed strings.
///
/// Strings are used verbatim; every other value uses its JSON text, so a
/// missing or null value never matches a non-empty literal.
pub fn canonical_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => Value::Null.to_string(),
    }
}
