//! Named component schemas

use super::Field;
use serde_json::Value;

/// One entry of `components.schemas` whose value is a mapping
#[derive(Debug, Clone, Copy)]
pub struct Schema<'a> {
    name: &'a str,
    value: &'a Value,
}

impl<'a> Schema<'a> {
    pub(crate) fn new(name: &'a str, value: &'a Value) -> Option<Self> {
        value.is_object().then_some(Self { name, value })
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.value.as_object().and_then(|m| m.get(key))
    }

    pub fn has_example(&self) -> bool {
        self.get("example").is_some()
    }

    /// Schema-level `readOnly: true`
    pub fn is_read_only(&self) -> bool {
        self.get("readOnly").and_then(Value::as_bool).unwrap_or(false)
    }

    /// Declared property names in document order
    pub fn property_names(&self) -> Field<Vec<&'a str>> {
        match self.get("properties") {
            None => Field::Absent,
            Some(Value::Object(map)) => Field::Present(map.keys().map(String::as_str).collect()),
            Some(_) => Field::Malformed,
        }
    }

    /// Whether any declared property carries `readOnly: true`
    pub fn has_read_only_property(&self) -> bool {
        self.get("properties")
            .and_then(Value::as_object)
            .is_some_and(|props| {
                props
                    .values()
                    .any(|p| p.get("readOnly").and_then(Value::as_bool).unwrap_or(false))
            })
    }
}
