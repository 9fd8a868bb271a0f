//! Schema example coverage

use crate::document::{location, OpenApiDocument};
use crate::models::{Finding, Severity};
use crate::rules::base::Rule;
use anyhow::Result;

/// Flags component schemas without an `example`
pub struct SchemaExampleRule;

impl Rule for SchemaExampleRule {
    fn id(&self) -> &'static str {
        "OAS-001"
    }

    fn name(&self) -> &'static str {
        "schema-missing-example"
    }

    fn description(&self) -> &'static str {
        "Component schemas should carry example values"
    }

    fn category(&self) -> &'static str {
        "Documentation"
    }

    fn severity(&self) -> Severity {
        Severity::Low
    }

    fn evaluate(&self, doc: &OpenApiDocument<'_>) -> Result<Vec<Finding>> {
        let findings = doc
            .schemas()?
            .iter()
            .filter(|schema| !schema.has_example())
            .map(|schema| {
                self.finding(
                    format!("Schema '{}' is missing example values", schema.name()),
                    location::schema(schema.name()),
                )
                .with_rationale(
                    "Examples help frontend and QA teams understand expected payloads.",
                )
                .with_impact(
                    "Lack of examples leads to misinterpretation of API contracts and integration bugs.",
                )
                .with_recommendation("Add an 'example' field to the schema definition.")
            })
            .collect();
        Ok(findings)
    }
}
