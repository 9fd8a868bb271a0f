//! Read-only typed view over an untyped OpenAPI document tree
//!
//! Every accessor is total: missing structure is reported as [`Field::Absent`]
//! (or an empty collection), never as a panic. Only the top-level collections
//! whose shape a syntax-valid document guarantees (`paths`,
//! `components.schemas`) return [`DocumentError::Malformed`] when they exist
//! but are not mappings.
//!
//! Iteration order is the order the document was provided in; `serde_json`
//! is built with `preserve_order`.

mod operation;
mod schema;

pub use operation::{Operation, PathItem, HTTP_METHODS};
pub use schema::Schema;

use serde_json::{Map, Value};
use thiserror::Error;

/// Raised when a structure that must be a mapping is something else
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("malformed document: '{location}' must be a {expected}")]
    Malformed {
        location: String,
        expected: &'static str,
    },
}

impl DocumentError {
    fn malformed(location: impl Into<String>, expected: &'static str) -> Self {
        DocumentError::Malformed {
            location: location.into(),
            expected,
        }
    }
}

/// Presence state of an optional node
///
/// `Absent` (key missing) is distinct from a present-but-empty value, and a
/// present value of the wrong shape is `Malformed` so rules can skip it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    Absent,
    Malformed,
    Present(T),
}

impl<T> Field<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Field::Malformed)
    }

    pub fn present(&self) -> Option<&T> {
        match self {
            Field::Present(v) => Some(v),
            _ => None,
        }
    }
}

/// A `security` requirement list, at document or operation level
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecurityDecl<'a> {
    /// The `security` key is not present
    Absent,
    /// `security: []`, which explicitly removes any requirement
    Empty,
    /// Non-empty requirement list; holds the referenced scheme names
    Declared(Vec<&'a str>),
    /// Present but not a list of requirement mappings
    Malformed,
}

impl<'a> SecurityDecl<'a> {
    pub(crate) fn from_node(node: Option<&'a Value>) -> Self {
        match node {
            None => SecurityDecl::Absent,
            Some(Value::Array(items)) if items.is_empty() => SecurityDecl::Empty,
            Some(Value::Array(items)) if items.iter().all(Value::is_object) => {
                SecurityDecl::Declared(
                    items
                        .iter()
                        .filter_map(Value::as_object)
                        .flat_map(|req| req.keys().map(String::as_str))
                        .collect(),
                )
            }
            Some(_) => SecurityDecl::Malformed,
        }
    }

    pub fn is_declared(&self) -> bool {
        matches!(self, SecurityDecl::Declared(_))
    }
}

/// Typed view over one OpenAPI document
#[derive(Debug, Clone, Copy)]
pub struct OpenApiDocument<'a> {
    root: &'a Value,
}

impl<'a> OpenApiDocument<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.root.as_object().and_then(|m| m.get(key))
    }

    /// Document-level `security` requirement
    pub fn global_security(&self) -> SecurityDecl<'a> {
        SecurityDecl::from_node(self.get("security"))
    }

    /// Path items in document order
    pub fn paths(&self) -> Result<Vec<PathItem<'a>>, DocumentError> {
        match self.get("paths") {
            None => Ok(Vec::new()),
            Some(Value::Object(map)) => Ok(map
                .iter()
                .map(|(template, item)| PathItem::new(template, item))
                .collect()),
            Some(_) => Err(DocumentError::malformed("paths", "mapping")),
        }
    }

    /// All operations whose value is a mapping, path order then method order
    pub fn operations(&self) -> Result<Vec<Operation<'a>>, DocumentError> {
        Ok(self
            .paths()?
            .iter()
            .flat_map(PathItem::operations)
            .collect())
    }

    fn components(&self) -> Result<Option<&'a Map<String, Value>>, DocumentError> {
        match self.get("components") {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(_) => Err(DocumentError::malformed("components", "mapping")),
        }
    }

    /// Named schemas under `components.schemas`, skipping non-mapping entries
    pub fn schemas(&self) -> Result<Vec<Schema<'a>>, DocumentError> {
        let Some(components) = self.components()? else {
            return Ok(Vec::new());
        };
        match components.get("schemas") {
            None => Ok(Vec::new()),
            Some(Value::Object(map)) => Ok(map
                .iter()
                .filter_map(|(name, value)| Schema::new(name, value))
                .collect()),
            Some(_) => Err(DocumentError::malformed("components.schemas", "mapping")),
        }
    }

    /// Names declared under `components.securitySchemes`
    pub fn security_schemes(&self) -> Field<Vec<&'a str>> {
        let components = match self.get("components") {
            None => return Field::Absent,
            Some(Value::Object(map)) => map,
            Some(_) => return Field::Malformed,
        };
        match components.get("securitySchemes") {
            None => Field::Absent,
            Some(Value::Object(map)) => Field::Present(map.keys().map(String::as_str).collect()),
            Some(_) => Field::Malformed,
        }
    }

    pub fn has_security_schemes(&self) -> bool {
        self.security_schemes()
            .present()
            .is_some_and(|names| !names.is_empty())
    }

    /// Root-level extension value (`x-...`), looked up case-insensitively
    pub fn extension(&self, key: &str) -> Option<&'a Value> {
        if !key.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("x-")) {
            return None;
        }
        self.root.as_object().and_then(|m| {
            m.iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v)
        })
    }

    pub fn has_any_extension<S: AsRef<str>>(&self, keys: &[S]) -> bool {
        keys.iter().any(|k| self.extension(k.as_ref()).is_some())
    }
}

/// Location helpers so every rule formats document paths the same way
pub mod location {
    pub fn root(key: &str) -> String {
        key.to_string()
    }

    pub fn operation(path: &str, method: &str) -> String {
        format!("paths.{path}.{method}")
    }

    pub fn operation_field(path: &str, method: &str, field: &str) -> String {
        format!("paths.{path}.{method}.{field}")
    }

    pub fn schema(name: &str) -> String {
        format!("components.schemas.{name}")
    }
}
