//! Schema-level data exposure heuristics

use crate::document::{location, Field, OpenApiDocument};
use crate::models::{Finding, Severity};
use crate::rules::base::Rule;
use anyhow::Result;

/// SEC-005: properties whose name marks them as sensitive
pub struct SensitiveFieldRule {
    /// Lowercased terms; a property matches when its lowercased name is one of them
    terms: Vec<String>,
}

impl SensitiveFieldRule {
    pub fn new<S: AsRef<str>>(terms: &[S]) -> Self {
        let mut normalized: Vec<String> = Vec::with_capacity(terms.len());
        for term in terms {
            let term = term.as_ref().trim().to_lowercase();
            if !term.is_empty() && !normalized.contains(&term) {
                normalized.push(term);
            }
        }
        Self { terms: normalized }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    fn is_sensitive(&self, field: &str) -> bool {
        let lowered = field.to_lowercase();
        self.terms.iter().any(|t| *t == lowered)
    }
}

impl Rule for SensitiveFieldRule {
    fn id(&self) -> &'static str {
        "SEC-005"
    }

    fn name(&self) -> &'static str {
        "sensitive-field-exposure"
    }

    fn description(&self) -> &'static str {
        "Schemas should not expose sensitive fields such as passwords or tokens"
    }

    fn category(&self) -> &'static str {
        "Excessive Data Exposure"
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn evaluate(&self, doc: &OpenApiDocument<'_>) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();
        for schema in doc.schemas()? {
            let Field::Present(fields) = schema.property_names() else {
                continue;
            };
            for field in fields.into_iter().filter(|f| self.is_sensitive(f)) {
                findings.push(
                    self.finding(
                        format!(
                            "Schema '{}' exposes sensitive field '{}'",
                            schema.name(),
                            field
                        ),
                        location::schema(schema.name()),
                    )
                    .with_rationale(
                        "Sensitive values in shared schemas tend to leak into responses and logs.",
                    )
                    .with_impact("Credentials or personal data can be disclosed to API consumers.")
                    .with_recommendation(format!(
                        "Mark '{}' as writeOnly, or move it to a request-only schema.",
                        field
                    )),
                );
            }
        }
        Ok(findings)
    }
}

/// SEC-006: object schemas with no read-only protection at all
pub struct MassAssignmentRule;

impl Rule for MassAssignmentRule {
    fn id(&self) -> &'static str {
        "SEC-006"
    }

    fn name(&self) -> &'static str {
        "mass-assignment-exposure"
    }

    fn description(&self) -> &'static str {
        "Schemas with properties should protect server-managed fields with readOnly"
    }

    fn category(&self) -> &'static str {
        "Mass Assignment"
    }

    fn severity(&self) -> Severity {
        Severity::Medium
    }

    fn evaluate(&self, doc: &OpenApiDocument<'_>) -> Result<Vec<Finding>> {
        let findings = doc
            .schemas()?
            .iter()
            .filter(|schema| {
                schema
                    .property_names()
                    .present()
                    .is_some_and(|names| !names.is_empty())
                    && !schema.is_read_only()
                    && !schema.has_read_only_property()
            })
            .map(|schema| {
                self.finding(
                    format!(
                        "Schema '{}' has no read-only fields; every property is client-writable",
                        schema.name()
                    ),
                    location::schema(schema.name()),
                )
                .with_rationale(
                    "Binding request bodies straight to models lets clients set fields they should not control.",
                )
                .with_impact("Clients may overwrite identifiers, roles or ownership fields.")
                .with_recommendation(
                    "Mark server-managed properties readOnly, or use separate request and response schemas.",
                )
            })
            .collect();
        Ok(findings)
    }
}
