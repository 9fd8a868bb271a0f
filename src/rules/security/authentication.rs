//! Broken authentication: missing global and per-endpoint requirements

use crate::document::{location, OpenApiDocument, SecurityDecl};
use crate::models::{Finding, Severity};
use crate::rules::base::Rule;
use anyhow::Result;

const CATEGORY: &str = "Broken Authentication";

/// SEC-001: the document declares no non-empty root `security`
pub struct GlobalSecurityRule;

impl Rule for GlobalSecurityRule {
    fn id(&self) -> &'static str {
        "SEC-001"
    }

    fn name(&self) -> &'static str {
        "global-security-absent"
    }

    fn description(&self) -> &'static str {
        "The document should declare a global security requirement"
    }

    fn category(&self) -> &'static str {
        CATEGORY
    }

    fn severity(&self) -> Severity {
        Severity::Critical
    }

    fn evaluate(&self, doc: &OpenApiDocument<'_>) -> Result<Vec<Finding>> {
        if doc.global_security().is_declared() {
            return Ok(Vec::new());
        }
        Ok(vec![self
            .finding("No global authentication defined", location::root("security"))
            .with_rationale(
                "Without a default requirement every new endpoint ships unauthenticated unless someone remembers to protect it.",
            )
            .with_impact("Attackers can call the API without presenting any credentials.")
            .with_recommendation(
                "Add a root-level 'security' requirement referencing a scheme in components.securitySchemes.",
            )])
    }
}

/// SEC-002: an operation ends up without any security requirement
pub struct EndpointSecurityRule;

impl Rule for EndpointSecurityRule {
    fn id(&self) -> &'static str {
        "SEC-002"
    }

    fn name(&self) -> &'static str {
        "endpoint-security-absent"
    }

    fn description(&self) -> &'static str {
        "Each operation should be covered by an operation-level or inherited security requirement"
    }

    fn category(&self) -> &'static str {
        CATEGORY
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn evaluate(&self, doc: &OpenApiDocument<'_>) -> Result<Vec<Finding>> {
        let global = doc.global_security();
        let findings = doc
            .operations()?
            .iter()
            .filter(|op| !op.is_secured(&global))
            .map(|op| {
                let message = match op.security() {
                    SecurityDecl::Empty => {
                        format!("{} explicitly disables authentication", op.label())
                    }
                    _ => format!("{} is missing authentication", op.label()),
                };
                self.finding(message, location::operation(op.path(), op.method()))
                    .with_rationale(
                        "Endpoints without authentication are reachable by anyone who can reach the API.",
                    )
                    .with_impact(
                        "Data and operations behind this endpoint are publicly accessible.",
                    )
                    .with_recommendation(
                        "Declare a 'security' requirement on the operation or rely on a global one.",
                    )
            })
            .collect();
        Ok(findings)
    }
}
