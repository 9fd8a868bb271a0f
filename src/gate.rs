//! Syntax gate
//!
//! A document must pass the gate before any rule sees it. The gate is a
//! trait so a full OpenAPI schema validator can be plugged in; the built-in
//! [`StructuralValidator`] checks the structural subset of OpenAPI 3.0.x that
//! the rules rely on.

use crate::document::HTTP_METHODS;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// The document failed syntax validation
///
/// Carries every violation found, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .violations.join("; "))]
pub struct SyntaxError {
    pub violations: Vec<String>,
}

impl SyntaxError {
    pub fn new(violations: Vec<String>) -> Self {
        Self { violations }
    }
}

/// Accepts or rejects a raw document before semantic rules run
pub trait SyntaxValidator: Send + Sync {
    fn name(&self) -> &'static str;

    fn validate(&self, raw: &Value) -> Result<(), SyntaxError>;
}

/// Built-in structural checks for OpenAPI 3.0.x documents
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

impl SyntaxValidator for StructuralValidator {
    fn name(&self) -> &'static str {
        "structural"
    }

    fn validate(&self, raw: &Value) -> Result<(), SyntaxError> {
        let Some(root) = raw.as_object() else {
            return Err(SyntaxError::new(vec![
                "document root must be a mapping".to_string()
            ]));
        };

        let mut violations = Vec::new();
        check_version(root, &mut violations);
        check_info(root, &mut violations);
        check_paths(root, &mut violations);
        check_components(root, &mut violations);
        check_security(root, &mut violations);

        if violations.is_empty() {
            Ok(())
        } else {
            debug!("Syntax gate rejected document: {} violations", violations.len());
            Err(SyntaxError::new(violations))
        }
    }
}

fn check_version(root: &Map<String, Value>, violations: &mut Vec<String>) {
    match root.get("openapi") {
        None => violations.push("'openapi' is a required property".to_string()),
        Some(Value::String(v)) if is_supported_version(v) => {}
        Some(Value::String(v)) => violations.push(format!(
            "unsupported OpenAPI version '{}': expected 3.0.x",
            v
        )),
        Some(_) => violations.push("'openapi' must be a string".to_string()),
    }
}

fn is_supported_version(version: &str) -> bool {
    let Some(patch) = version.strip_prefix("3.0.") else {
        return false;
    };
    let patch = patch.split_once('-').map_or(patch, |(p, _)| p);
    !patch.is_empty() && patch.bytes().all(|b| b.is_ascii_digit())
}

fn check_info(root: &Map<String, Value>, violations: &mut Vec<String>) {
    let info = match root.get("info") {
        None => {
            violations.push("'info' is a required property".to_string());
            return;
        }
        Some(Value::Object(info)) => info,
        Some(_) => {
            violations.push("'info' must be a mapping".to_string());
            return;
        }
    };
    for key in ["title", "version"] {
        match info.get(key) {
            Some(Value::String(_)) => {}
            None => violations.push(format!("'info.{}' is a required property", key)),
            Some(_) => violations.push(format!("'info.{}' must be a string", key)),
        }
    }
}

fn check_paths(root: &Map<String, Value>, violations: &mut Vec<String>) {
    let paths = match root.get("paths") {
        None => {
            violations.push("'paths' is a required property".to_string());
            return;
        }
        Some(Value::Object(paths)) => paths,
        Some(_) => {
            violations.push("'paths' must be a mapping".to_string());
            return;
        }
    };

    for (template, item) in paths {
        if !template.starts_with('/') {
            violations.push(format!("path '{}' must start with '/'", template));
        }
        let Some(item) = item.as_object() else {
            violations.push(format!("path item '{}' must be a mapping", template));
            continue;
        };
        for (method, operation) in item {
            if !HTTP_METHODS.contains(&method.to_ascii_lowercase().as_str()) {
                continue;
            }
            let Some(operation) = operation.as_object() else {
                violations.push(format!("operation '{} {}' must be a mapping", method, template));
                continue;
            };
            if operation.get("responses").is_some_and(|r| !r.is_object()) {
                violations.push(format!(
                    "'responses' of '{} {}' must be a mapping",
                    method, template
                ));
            }
        }
    }
}

fn check_components(root: &Map<String, Value>, violations: &mut Vec<String>) {
    let components = match root.get("components") {
        None => return,
        Some(Value::Object(components)) => components,
        Some(_) => {
            violations.push("'components' must be a mapping".to_string());
            return;
        }
    };
    for key in ["schemas", "securitySchemes"] {
        if components.get(key).is_some_and(|v| !v.is_object()) {
            violations.push(format!("'components.{}' must be a mapping", key));
        }
    }
}

fn check_security(root: &Map<String, Value>, violations: &mut Vec<String>) {
    match root.get("security") {
        None => {}
        Some(Value::Array(items)) => {
            if items.iter().any(|req| !req.is_object()) {
                violations.push("'security' entries must be mappings".to_string());
            }
        }
        Some(_) => violations.push("'security' must be a list".to_string()),
    }
}
