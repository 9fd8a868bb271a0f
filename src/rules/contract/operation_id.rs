//! operationId presence and naming

use crate::document::{location, Field, OpenApiDocument};
use crate::models::{Finding, Severity};
use crate::rules::base::Rule;
use anyhow::Result;
use regex::Regex;
use std::sync::OnceLock;

static CAMEL_CASE: OnceLock<Regex> = OnceLock::new();

fn camel_case() -> &'static Regex {
    CAMEL_CASE.get_or_init(|| Regex::new(r"^[a-z][a-zA-Z0-9]*$").expect("valid camelCase regex"))
}

pub(crate) fn is_camel_case(id: &str) -> bool {
    camel_case().is_match(id)
}

/// Every operation should have a non-empty operationId
pub struct OperationIdMissingRule;

impl Rule for OperationIdMissingRule {
    fn id(&self) -> &'static str {
        "OAS-005"
    }

    fn name(&self) -> &'static str {
        "operation-id-missing"
    }

    fn description(&self) -> &'static str {
        "Operations should declare an operationId"
    }

    fn category(&self) -> &'static str {
        "Naming Conventions"
    }

    fn severity(&self) -> Severity {
        Severity::Low
    }

    fn evaluate(&self, doc: &OpenApiDocument<'_>) -> Result<Vec<Finding>> {
        let findings = doc
            .operations()?
            .iter()
            .filter(|op| matches!(op.operation_id(), Field::Absent | Field::Present("")))
            .map(|op| {
                self.finding(
                    format!("{} is missing operationId", op.label()),
                    location::operation_field(op.path(), op.method(), "operationId"),
                )
                .with_rationale(
                    "operationId is used for client SDK generation and API discoverability.",
                )
                .with_impact("Missing operationId can break automated client generation.")
                .with_recommendation("Add a unique camelCase operationId.")
            })
            .collect();
        Ok(findings)
    }
}

/// A present operationId should be camelCase
pub struct OperationIdCaseRule;

impl Rule for OperationIdCaseRule {
    fn id(&self) -> &'static str {
        "OAS-006"
    }

    fn name(&self) -> &'static str {
        "operation-id-not-camel-case"
    }

    fn description(&self) -> &'static str {
        "operationId values should follow camelCase"
    }

    fn category(&self) -> &'static str {
        "Naming Conventions"
    }

    fn severity(&self) -> Severity {
        Severity::Low
    }

    fn evaluate(&self, doc: &OpenApiDocument<'_>) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();
        for op in doc.operations()? {
            let Field::Present(id) = op.operation_id() else {
                continue;
            };
            if id.is_empty() || is_camel_case(id) {
                continue;
            }
            findings.push(
                self.finding(
                    format!("operationId '{}' should be camelCase", id),
                    location::operation_field(op.path(), op.method(), "operationId"),
                )
                .with_rationale(
                    "Consistent naming conventions improve maintainability and readability.",
                )
                .with_impact("Inconsistent naming makes client SDKs harder to use and maintain.")
                .with_recommendation("Rename operationId to camelCase (e.g., getOrdersByUser)."),
            );
        }
        Ok(findings)
    }
}
