//! Authorization escalations for destructive and resource-addressed operations
//!
//! Both rules overlap with `endpoint-security-absent` on purpose: a DELETE on
//! `/items/{id}` without security yields three findings, one per rule.

use crate::document::{location, OpenApiDocument};
use crate::models::{Finding, Severity};
use crate::rules::base::Rule;
use anyhow::Result;

/// SEC-003: DELETE operations without any security requirement
pub struct DestructiveOperationRule;

impl Rule for DestructiveOperationRule {
    fn id(&self) -> &'static str {
        "SEC-003"
    }

    fn name(&self) -> &'static str {
        "destructive-operation-no-auth"
    }

    fn description(&self) -> &'static str {
        "DELETE operations must require authorization"
    }

    fn category(&self) -> &'static str {
        "Broken Function Level Authorization"
    }

    fn severity(&self) -> Severity {
        Severity::Critical
    }

    fn evaluate(&self, doc: &OpenApiDocument<'_>) -> Result<Vec<Finding>> {
        let global = doc.global_security();
        let findings = doc
            .operations()?
            .iter()
            .filter(|op| op.is_method("delete") && !op.is_secured(&global))
            .map(|op| {
                self.finding(
                    format!("DELETE endpoint without authorization: {}", op.path()),
                    location::operation(op.path(), op.method()),
                )
                .with_rationale("Destructive operations are the most damaging to expose.")
                .with_impact("Anyone can delete data through this endpoint.")
                .with_recommendation(
                    "Require authentication and restrict the operation to privileged roles.",
                )
            })
            .collect();
        Ok(findings)
    }
}

/// SEC-004: unsecured operations on paths that identify a single object
pub struct ObjectLevelAuthorizationRule;

impl Rule for ObjectLevelAuthorizationRule {
    fn id(&self) -> &'static str {
        "SEC-004"
    }

    fn name(&self) -> &'static str {
        "object-level-authorization"
    }

    fn description(&self) -> &'static str {
        "Operations addressing a resource by identifier must require authorization"
    }

    fn category(&self) -> &'static str {
        "Broken Object Level Authorization"
    }

    fn severity(&self) -> Severity {
        Severity::Critical
    }

    fn evaluate(&self, doc: &OpenApiDocument<'_>) -> Result<Vec<Finding>> {
        let global = doc.global_security();
        let findings = doc
            .operations()?
            .iter()
            .filter(|op| op.path_has_placeholder() && !op.is_secured(&global))
            .map(|op| {
                self.finding(
                    format!(
                        "{} addresses a resource by identifier without authorization",
                        op.label()
                    ),
                    location::operation(op.path(), op.method()),
                )
                .with_rationale(
                    "Identifier-based endpoints let callers enumerate objects they do not own.",
                )
                .with_impact(
                    "Attackers can read or modify other users' resources by changing the ID.",
                )
                .with_recommendation(
                    "Require authentication and check object ownership on every request.",
                )
            })
            .collect();
        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unsecured_delete_is_critical() {
        let raw = json!({"paths": {"/items": {"delete": {}, "get": {}}}});
        let findings = DestructiveOperationRule
            .evaluate(&OpenApiDocument::new(&raw))
            .unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Critical);
        assert_eq!(findings[0].location, "paths./items.delete");
    }

    #[test]
    fn test_secured_delete_is_fine() {
        let raw = json!({
            "security": [{"bearerAuth": []}],
            "paths": {"/items": {"delete": {}}}
        });
        let doc = OpenApiDocument::new(&raw);
        assert!(DestructiveOperationRule.evaluate(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_placeholder_paths_need_authorization() {
        let raw = json!({"paths": {
            "/items": {"get": {}},
            "/items/{id}": {"get": {}, "put": {"security": [{"bearerAuth": []}]}}
        }});
        let findings = ObjectLevelAuthorizationRule
            .evaluate(&OpenApiDocument::new(&raw))
            .unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].message,
            "GET /items/{id} addresses a resource by identifier without authorization"
        );
    }

    #[test]
    fn test_delete_on_placeholder_fires_both() {
        let raw = json!({"paths": {"/items/{id}": {"delete": {"responses": {"204": {}}}}}});
        let doc = OpenApiDocument::new(&raw);
        assert_eq!(DestructiveOperationRule.evaluate(&doc).unwrap().len(), 1);
        assert_eq!(ObjectLevelAuthorizationRule.evaluate(&doc).unwrap().len(), 1);
    }
}
