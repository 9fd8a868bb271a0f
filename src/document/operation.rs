//! Path items and operations

use super::{Field, SecurityDecl};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Keys of a path item that hold operations
pub const HTTP_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

fn placeholder() -> &'static Regex {
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{[^{}/]+\}").expect("valid placeholder regex"))
}

/// One entry of `paths`
#[derive(Debug, Clone, Copy)]
pub struct PathItem<'a> {
    template: &'a str,
    value: &'a Value,
}

impl<'a> PathItem<'a> {
    pub(crate) fn new(template: &'a str, value: &'a Value) -> Self {
        Self { template, value }
    }

    pub fn template(&self) -> &'a str {
        self.template
    }

    /// Whether the template contains a `{param}` segment
    pub fn has_placeholder(&self) -> bool {
        placeholder().is_match(self.template)
    }

    /// Operations in method declaration order
    ///
    /// Non-method keys (`parameters`, `summary`, extensions) are ignored, as
    /// are method entries whose value is not a mapping.
    pub fn operations(&self) -> Vec<Operation<'a>> {
        let Some(map) = self.value.as_object() else {
            return Vec::new();
        };
        map.iter()
            .filter(|(method, value)| {
                HTTP_METHODS.contains(&method.to_ascii_lowercase().as_str()) && value.is_object()
            })
            .map(|(method, value)| Operation {
                path: self.template,
                method: method.as_str(),
                value,
                has_placeholder: self.has_placeholder(),
            })
            .collect()
    }
}

/// One HTTP operation under a path item
#[derive(Debug, Clone, Copy)]
pub struct Operation<'a> {
    path: &'a str,
    method: &'a str,
    value: &'a Value,
    has_placeholder: bool,
}

impl<'a> Operation<'a> {
    pub fn path(&self) -> &'a str {
        self.path
    }

    /// Method key exactly as written in the document
    pub fn method(&self) -> &'a str {
        self.method
    }

    pub fn is_method(&self, method: &str) -> bool {
        self.method.eq_ignore_ascii_case(method)
    }

    /// `GET /users` style label for messages
    pub fn label(&self) -> String {
        format!("{} {}", self.method.to_ascii_uppercase(), self.path)
    }

    pub fn path_has_placeholder(&self) -> bool {
        self.has_placeholder
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.value.as_object().and_then(|m| m.get(key))
    }

    pub fn operation_id(&self) -> Field<&'a str> {
        match self.get("operationId") {
            None => Field::Absent,
            Some(Value::String(s)) => Field::Present(s.as_str()),
            Some(_) => Field::Malformed,
        }
    }

    /// Declared response status keys in document order
    pub fn response_codes(&self) -> Field<Vec<&'a str>> {
        match self.get("responses") {
            None => Field::Absent,
            Some(Value::Object(map)) => Field::Present(map.keys().map(String::as_str).collect()),
            Some(_) => Field::Malformed,
        }
    }

    pub fn security(&self) -> SecurityDecl<'a> {
        SecurityDecl::from_node(self.get("security"))
    }

    /// Whether the operation ends up with a non-empty security requirement.
    ///
    /// An operation-level list overrides the global one; `security: []`
    /// removes protection even when a global requirement exists.
    pub fn is_secured(&self, global: &SecurityDecl<'_>) -> bool {
        match self.security() {
            SecurityDecl::Declared(_) => true,
            SecurityDecl::Empty => false,
            SecurityDecl::Absent => global.is_declared(),
            SecurityDecl::Malformed => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_placeholder_detection() {
        let v = json!({});
        assert!(PathItem::new("/items/{id}", &v).has_placeholder());
        assert!(PathItem::new("/users/{userId}/orders", &v).has_placeholder());
        assert!(!PathItem::new("/items", &v).has_placeholder());
        assert!(!PathItem::new("/items/{}", &v).has_placeholder());
    }

    #[test]
    fn test_operations_skip_non_methods_and_non_mappings() {
        let v = json!({
            "summary": "Items",
            "parameters": [{"name": "id", "in": "path"}],
            "get": {"responses": {"200": {"description": "ok"}}},
            "post": "oops",
            "x-internal": {"responses": {}},
            "DELETE": {"responses": {}}
        });
        let item = PathItem::new("/items", &v);
        let methods: Vec<_> = item.operations().iter().map(|o| o.method()).collect();
        assert_eq!(methods, vec!["get", "DELETE"]);
    }

    #[test]
    fn test_non_mapping_path_item_has_no_operations() {
        let v = json!("not a path item");
        assert!(PathItem::new("/items", &v).operations().is_empty());
    }

    #[test]
    fn test_response_codes_states() {
        let v = json!({
            "get": {"responses": {"200": {}, "default": {}}},
            "put": {"responses": {}},
            "post": {},
            "patch": {"responses": ["200"]}
        });
        let ops = PathItem::new("/a", &v).operations();
        assert_eq!(ops[0].response_codes(), Field::Present(vec!["200", "default"]));
        assert_eq!(ops[1].response_codes(), Field::Present(vec![]));
        assert_eq!(ops[2].response_codes(), Field::Absent);
        assert_eq!(ops[3].response_codes(), Field::Malformed);
    }

    #[test]
    fn test_operation_id_states() {
        let v = json!({
            "get": {"operationId": "listItems"},
            "put": {"operationId": 42},
            "post": {}
        });
        let ops = PathItem::new("/a", &v).operations();
        assert_eq!(ops[0].operation_id(), Field::Present("listItems"));
        assert_eq!(ops[1].operation_id(), Field::Malformed);
        assert_eq!(ops[2].operation_id(), Field::Absent);
    }

    #[test]
    fn test_security_inheritance() {
        let v = json!({
            "get": {},
            "put": {"security": []},
            "post": {"security": [{"bearerAuth": []}]}
        });
        let ops = PathItem::new("/a", &v).operations();
        let global = SecurityDecl::Declared(vec!["bearerAuth"]);
        let none = SecurityDecl::Absent;

        assert!(ops[0].is_secured(&global));
        assert!(!ops[0].is_secured(&none));
        assert!(!ops[1].is_secured(&global));
        assert!(ops[2].is_secured(&none));
    }

    #[test]
    fn test_label() {
        let v = json!({"delete": {}});
        let ops = PathItem::new("/items/{id}", &v).operations();
        assert_eq!(ops[0].label(), "DELETE /items/{id}");
        assert!(ops[0].is_method("delete"));
        assert!(ops[0].path_has_placeholder());
    }
}
