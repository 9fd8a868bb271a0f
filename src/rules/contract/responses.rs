//! Response contract checks

use crate::document::{location, Field, OpenApiDocument};
use crate::models::{Finding, FindingLevel, Severity};
use crate::rules::base::Rule;
use anyhow::Result;

/// Blocking: an operation must declare at least one response
pub struct MissingResponsesRule;

impl Rule for MissingResponsesRule {
    fn id(&self) -> &'static str {
        "OAS-002"
    }

    fn name(&self) -> &'static str {
        "missing-responses"
    }

    fn description(&self) -> &'static str {
        "Every operation must define at least one response"
    }

    fn category(&self) -> &'static str {
        "Contract Completeness"
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn level(&self) -> FindingLevel {
        FindingLevel::Error
    }

    fn evaluate(&self, doc: &OpenApiDocument<'_>) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();
        for op in doc.operations()? {
            let missing = match op.response_codes() {
                Field::Absent => true,
                Field::Present(codes) => codes.is_empty(),
                Field::Malformed => false,
            };
            if missing {
                findings.push(
                    self.finding(
                        format!("{} has no responses defined", op.label()),
                        location::operation_field(op.path(), op.method(), "responses"),
                    )
                    .with_rationale(
                        "Every endpoint must define responses to form a valid API contract.",
                    )
                    .with_impact(
                        "Clients will not know how to handle responses, causing runtime failures.",
                    )
                    .with_recommendation(
                        "Define at least one success and standard error responses (200, 400, 500).",
                    ),
                );
            }
        }
        Ok(findings)
    }
}

/// Response keys should be numeric HTTP status codes
pub struct StatusCodeRule;

fn is_numeric_status(code: &str) -> bool {
    !code.is_empty() && code.bytes().all(|b| b.is_ascii_digit())
}

impl Rule for StatusCodeRule {
    fn id(&self) -> &'static str {
        "OAS-007"
    }

    fn name(&self) -> &'static str {
        "non-standard-status-code"
    }

    fn description(&self) -> &'static str {
        "Response keys should be plain numeric HTTP status codes"
    }

    fn category(&self) -> &'static str {
        "Contract Consistency"
    }

    fn severity(&self) -> Severity {
        Severity::Low
    }

    fn evaluate(&self, doc: &OpenApiDocument<'_>) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();
        for op in doc.operations()? {
            let Field::Present(codes) = op.response_codes() else {
                continue;
            };
            for code in codes.into_iter().filter(|c| !is_numeric_status(c)) {
                findings.push(
                    self.finding(
                        format!("{} has non-standard status code '{}'", op.label(), code),
                        location::operation_field(op.path(), op.method(), "responses"),
                    )
                    .with_rationale("Non-standard status codes may confuse API consumers.")
                    .with_impact("Clients may not handle unexpected status codes correctly.")
                    .with_recommendation(
                        "Use standard HTTP status codes like 200, 201, 400, 401, 403, 404, 500.",
                    ),
                );
            }
        }
        Ok(findings)
    }
}
