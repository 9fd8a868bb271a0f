//! SARIF 2.1.0 reporter for GitHub Code Scanning and VS Code integration
//!
//! Generates SARIF (Static Analysis Results Interchange Format) output
//! compliant with OASIS SARIF 2.1.0 specification. Each analyzed file is an
//! artifact; the finding's document path is reported as a logical location.
//!
//! Reference: https://docs.oasis-open.org/sarif/sarif/v2.1.0/sarif-v2.1.0.html

use super::FileReport;
use crate::models::{Finding, Severity};
use crate::report::AnalysisResult;
use crate::rules::{catalog, SecuritySettings};
use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;

/// SARIF schema URI
const SARIF_SCHEMA: &str =
    "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";

/// Map severity to SARIF level
fn severity_to_sarif_level(severity: &Severity) -> &'static str {
    match severity {
        Severity::Critical | Severity::High => "error",
        Severity::Medium => "warning",
        Severity::Low => "note",
    }
}

/// Map severity to security-severity score (0.0 - 10.0) for GitHub Code Scanning
fn severity_to_security_score(severity: &Severity) -> f64 {
    match severity {
        Severity::Critical => 9.5,
        Severity::High => 7.5,
        Severity::Medium => 5.0,
        Severity::Low => 2.5,
    }
}

// ============================================================================
// SARIF Data Structures
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
    invocations: Vec<SarifInvocation>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifDriver {
    name: String,
    version: String,
    rules: Vec<SarifRule>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRule {
    id: String,
    name: String,
    short_description: SarifMessage,
    full_description: SarifMessage,
    default_configuration: SarifConfiguration,
    properties: SarifRuleProperties,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifConfiguration {
    level: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRuleProperties {
    tags: Vec<String>,
    #[serde(rename = "security-severity")]
    security_severity: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
    fingerprints: HashMap<String, String>,
    properties: SarifResultProperties,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fixes: Vec<SarifFix>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLocation {
    physical_location: SarifPhysicalLocation,
    logical_locations: Vec<SarifLogicalLocation>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifPhysicalLocation {
    artifact_location: SarifArtifactLocation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLogicalLocation {
    fully_qualified_name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifMessage {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifInvocation {
    execution_successful: bool,
    end_time_utc: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_execution_notifications: Vec<SarifNotification>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifNotification {
    level: String,
    message: SarifMessage,
    descriptor: SarifDescriptor,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifDescriptor {
    id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResultProperties {
    severity: String,
    category: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    why_it_matters: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    production_impact: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifFix {
    description: SarifMessage,
}

// ============================================================================
// Implementation
// ============================================================================

/// Render reports as SARIF 2.1.0 JSON
pub fn render(reports: &[FileReport]) -> Result<String> {
    let sarif = build_sarif(reports);
    Ok(serde_json::to_string_pretty(&sarif)?)
}

/// Name and description of a catalog rule, if the id belongs to one
fn rule_metadata(rule_id: &str) -> Option<(&'static str, &'static str)> {
    catalog(&SecuritySettings::default())
        .into_iter()
        .find(|(_, rule)| rule.id() == rule_id)
        .map(|(_, rule)| (rule.name(), rule.description()))
}

/// Build the complete SARIF document
fn build_sarif(reports: &[FileReport]) -> SarifReport {
    // Rules in first-seen order so output is stable
    let mut rule_order: Vec<&str> = Vec::new();
    let mut findings_by_rule: HashMap<&str, Vec<&Finding>> = HashMap::new();
    let mut results = Vec::new();
    let mut notifications = Vec::new();

    for report in reports {
        for finding in report.result.findings() {
            if !findings_by_rule.contains_key(finding.rule_id.as_str()) {
                rule_order.push(&finding.rule_id);
            }
            findings_by_rule
                .entry(&finding.rule_id)
                .or_default()
                .push(finding);
            results.push(build_result(finding, &report.file));
        }
        notifications.push(build_notification(report));
    }

    let rules = rule_order
        .iter()
        .map(|id| build_rule(id, &findings_by_rule[id]))
        .collect();

    SarifReport {
        schema: SARIF_SCHEMA.to_string(),
        version: SARIF_VERSION.to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "oasgov".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    rules,
                },
            },
            results,
            invocations: vec![SarifInvocation {
                execution_successful: true,
                end_time_utc: Utc::now().to_rfc3339(),
                tool_execution_notifications: notifications,
            }],
        }],
    }
}

fn build_notification(report: &FileReport) -> SarifNotification {
    let text = match &report.result {
        AnalysisResult::Validation(r) => format!(
            "{}: contract {}, confidence {:.2}",
            report.file,
            if r.valid { "valid" } else { "invalid" },
            r.confidence
        ),
        AnalysisResult::Security(r) => format!(
            "{}: security score {}/100, confidence {:.2}",
            report.file, r.score, r.confidence
        ),
    };
    SarifNotification {
        level: "note".to_string(),
        message: SarifMessage { text },
        descriptor: SarifDescriptor {
            id: "summary".to_string(),
        },
    }
}

/// Build a SARIF rule from the findings it produced
fn build_rule(rule_id: &str, findings: &[&Finding]) -> SarifRule {
    let max_severity = findings
        .iter()
        .map(|f| f.severity)
        .max()
        .unwrap_or(Severity::Low);

    let (name, description) =
        rule_metadata(rule_id).unwrap_or(("syntax-error", "OpenAPI syntax validation"));
    let category = findings
        .first()
        .map(|f| f.category.clone())
        .unwrap_or_default();

    let mut tags = vec!["openapi".to_string()];
    if rule_id.starts_with("SEC-") {
        tags.push("security".to_string());
    }
    if !category.is_empty() {
        tags.push(category);
    }

    SarifRule {
        id: rule_id.to_string(),
        name: name.to_string(),
        short_description: SarifMessage {
            text: description.to_string(),
        },
        full_description: SarifMessage {
            text: findings
                .first()
                .map(|f| f.rationale.clone())
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| description.to_string()),
        },
        default_configuration: SarifConfiguration {
            level: severity_to_sarif_level(&max_severity).to_string(),
        },
        properties: SarifRuleProperties {
            tags,
            security_severity: format!("{:.1}", severity_to_security_score(&max_severity)),
        },
    }
}

/// Build a SARIF result from a finding
fn build_result(finding: &Finding, file: &str) -> SarifResult {
    let mut fingerprints = HashMap::new();
    fingerprints.insert("oasgov/finding/v1".to_string(), finding.id.clone());

    let fixes = if finding.recommendation.is_empty() {
        Vec::new()
    } else {
        vec![SarifFix {
            description: SarifMessage {
                text: finding.recommendation.clone(),
            },
        }]
    };

    SarifResult {
        rule_id: finding.rule_id.clone(),
        level: severity_to_sarif_level(&finding.severity).to_string(),
        message: SarifMessage {
            text: finding.message.clone(),
        },
        locations: vec![SarifLocation {
            physical_location: SarifPhysicalLocation {
                artifact_location: SarifArtifactLocation {
                    uri: file.to_string(),
                },
            },
            logical_locations: vec![SarifLogicalLocation {
                fully_qualified_name: finding.location.clone(),
            }],
        }],
        fingerprints,
        properties: SarifResultProperties {
            severity: finding.severity.to_string(),
            category: finding.category.clone(),
            why_it_matters: finding.rationale.clone(),
            production_impact: finding.impact.clone(),
        },
        fixes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::{security_report, validation_report};

    #[test]
    fn test_severity_mapping() {
        assert_eq!(severity_to_sarif_level(&Severity::Critical), "error");
        assert_eq!(severity_to_sarif_level(&Severity::Medium), "warning");
        assert_eq!(severity_to_sarif_level(&Severity::Low), "note");
    }

    #[test]
    fn test_rule_metadata_from_catalog() {
        assert_eq!(
            rule_metadata("SEC-004").map(|(name, _)| name),
            Some("object-level-authorization")
        );
        assert!(rule_metadata("OAS-000").is_none());
    }

    #[test]
    fn test_sarif_structure() {
        let sarif_json = render(&[validation_report(), security_report()]).expect("render SARIF");
        let parsed: serde_json::Value = serde_json::from_str(&sarif_json).expect("parse SARIF");

        assert_eq!(parsed["version"], "2.1.0");
        let run = &parsed["runs"][0];
        let rule_ids: Vec<_> = run["tool"]["driver"]["rules"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(rule_ids, vec!["OAS-002", "OAS-005", "SEC-001", "SEC-007"]);

        let results = run["results"].as_array().unwrap();
        assert_eq!(results.len(), 4);
        assert_eq!(results[0]["level"], "error");
        assert_eq!(
            results[0]["locations"][0]["physicalLocation"]["artifactLocation"]["uri"],
            "api.yaml"
        );
        assert_eq!(
            results[0]["locations"][0]["logicalLocations"][0]["fullyQualifiedName"],
            "paths./items.get.responses"
        );
        assert_eq!(results[2]["properties"]["severity"], "CRITICAL");
        assert_eq!(
            run["invocations"][0]["toolExecutionNotifications"]
                .as_array()
                .unwrap()
                .len(),
            2
        );
    }
}
