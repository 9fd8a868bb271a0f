//! Authentication declarations from the contract's point of view

use crate::document::{location, Field, OpenApiDocument, Operation, SecurityDecl};
use crate::models::{Finding, Severity};
use crate::rules::base::Rule;
use anyhow::Result;

/// Auth error codes every secured operation should document
const AUTH_ERROR_CODES: [&str; 2] = ["401", "403"];

/// An operation counts as authenticated for linting when it resolves to a
/// non-empty requirement, or the document defines any security scheme.
fn uses_auth(op: &Operation<'_>, global: &SecurityDecl<'_>, schemes_defined: bool) -> bool {
    op.is_secured(global) || schemes_defined
}

/// Warns about operations with no authentication at all
pub struct MissingAuthenticationRule;

impl Rule for MissingAuthenticationRule {
    fn id(&self) -> &'static str {
        "OAS-003"
    }

    fn name(&self) -> &'static str {
        "missing-authentication"
    }

    fn description(&self) -> &'static str {
        "Operations should declare or inherit an authentication requirement"
    }

    fn category(&self) -> &'static str {
        "Authentication"
    }

    fn severity(&self) -> Severity {
        Severity::Medium
    }

    fn evaluate(&self, doc: &OpenApiDocument<'_>) -> Result<Vec<Finding>> {
        let global = doc.global_security();
        let schemes_defined = doc.has_security_schemes();

        let findings = doc
            .operations()?
            .iter()
            .filter(|op| !uses_auth(op, &global, schemes_defined))
            .map(|op| {
                self.finding(
                    format!("{} has no authentication defined", op.label()),
                    location::operation_field(op.path(), op.method(), "security"),
                )
                .with_rationale("Unprotected endpoints can be accessed by unauthorized users.")
                .with_impact(
                    "This can lead to data leaks or unauthorized operations in production.",
                )
                .with_recommendation(
                    "Define security requirements (e.g., JWT bearerAuth) for this endpoint.",
                )
            })
            .collect();
        Ok(findings)
    }
}

/// Secured operations should document 401 and 403 responses
pub struct AuthErrorResponsesRule;

impl Rule for AuthErrorResponsesRule {
    fn id(&self) -> &'static str {
        "OAS-004"
    }

    fn name(&self) -> &'static str {
        "missing-auth-error-responses"
    }

    fn description(&self) -> &'static str {
        "Authenticated operations should declare 401 and 403 responses"
    }

    fn category(&self) -> &'static str {
        "Authentication"
    }

    fn severity(&self) -> Severity {
        Severity::Low
    }

    fn evaluate(&self, doc: &OpenApiDocument<'_>) -> Result<Vec<Finding>> {
        let global = doc.global_security();
        let schemes_defined = doc.has_security_schemes();
        let mut findings = Vec::new();

        for op in doc.operations()? {
            if !uses_auth(&op, &global, schemes_defined) {
                continue;
            }
            // OAS-002 owns operations without a responses map
            let Field::Present(codes) = op.response_codes() else {
                continue;
            };
            for code in AUTH_ERROR_CODES {
                if codes.contains(&code) {
                    continue;
                }
                findings.push(
                    self.finding(
                        format!("{} is missing {} response", op.label(), code),
                        location::operation_field(op.path(), op.method(), "responses"),
                    )
                    .with_rationale(
                        "Clients should be aware of authentication and authorization failures.",
                    )
                    .with_impact(
                        "Missing error contracts make it hard for clients to handle auth failures gracefully.",
                    )
                    .with_recommendation(format!(
                        "Add {} response to this endpoint's responses.",
                        code
                    )),
                );
            }
        }
        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unauthenticated_operation_is_flagged() {
        let raw = json!({"paths": {"/items": {"get": {"responses": {"200": {}}}}}});
        let findings = MissingAuthenticationRule
            .evaluate(&OpenApiDocument::new(&raw))
            .unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "GET /items has no authentication defined");
        assert_eq!(findings[0].location, "paths./items.get.security");
    }

    #[test]
    fn test_security_schemes_count_as_auth_in_use() {
        let raw = json!({
            "paths": {"/items": {"get": {"responses": {"200": {}}}}},
            "components": {"securitySchemes": {"bearerAuth": {"type": "http", "scheme": "bearer"}}}
        });
        let doc = OpenApiDocument::new(&raw);
        assert!(MissingAuthenticationRule.evaluate(&doc).unwrap().is_empty());
        // ...which makes the operation subject to the 401/403 check
        assert_eq!(AuthErrorResponsesRule.evaluate(&doc).unwrap().len(), 2);
    }

    #[test]
    fn test_auth_error_codes_reported_separately() {
        let raw = json!({
            "security": [{"bearerAuth": []}],
            "paths": {"/items": {
                "get": {"responses": {"200": {}, "401": {}}},
                "post": {"responses": {"201": {}, "401": {}, "403": {}}}
            }}
        });
        let findings = AuthErrorResponsesRule.evaluate(&OpenApiDocument::new(&raw)).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "GET /items is missing 403 response");
        assert_eq!(findings[0].recommendation, "Add 403 response to this endpoint's responses.");
    }

    #[test]
    fn test_unsecured_operations_skip_auth_error_check() {
        let raw = json!({"paths": {"/items": {"get": {"responses": {"200": {}}}}}});
        assert!(AuthErrorResponsesRule.evaluate(&OpenApiDocument::new(&raw)).unwrap().is_empty());
    }

    #[test]
    fn test_explicit_opt_out_is_unauthenticated() {
        let raw = json!({
            "security": [{"bearerAuth": []}],
            "paths": {"/health": {"get": {"security": [], "responses": {"200": {}}}}}
        });
        let findings = MissingAuthenticationRule
            .evaluate(&OpenApiDocument::new(&raw))
            .unwrap();
        assert_eq!(findings.len(), 1);
    }
}
