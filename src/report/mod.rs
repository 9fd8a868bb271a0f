//! Report assembly
//!
//! Turns a finding list plus its score into the result handed back to the
//! caller. Timing is supplied by the caller; nothing here reads a clock.

use crate::gate::SyntaxError;
use crate::models::{Finding, FindingLevel, Severity};
use crate::scoring::{contract_score, security_score, SYNTAX_FAILURE_CONFIDENCE};
use serde::{Deserialize, Serialize};

pub const CONTRACT_NOTES: &str =
    "Findings are based on OpenAPI best practices and API governance rules.";
pub const SYNTAX_FAILURE_NOTES: &str = "Validation failed due to OpenAPI syntax errors.";
pub const SECURITY_NOTES: &str =
    "Findings are based on OWASP API Security Top 10 risk categories.";

/// Rule id of the single finding emitted when the syntax gate fails
pub const SYNTAX_RULE_ID: &str = "OAS-000";

/// Contract (lint) run result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    /// Blocking findings
    pub errors: Vec<Finding>,
    /// Advisory findings
    pub warnings: Vec<Finding>,
    pub confidence: f64,
    pub notes: String,
    pub processing_time_ms: u64,
}

impl ValidationReport {
    /// Partition findings into errors and warnings, keeping their order
    pub fn assemble(findings: Vec<Finding>, processing_time_ms: u64) -> Self {
        let score = contract_score(&findings);
        let (errors, warnings): (Vec<_>, Vec<_>) =
            findings.into_iter().partition(Finding::is_error);

        Self {
            valid: score.valid,
            errors,
            warnings,
            confidence: score.confidence,
            notes: CONTRACT_NOTES.to_string(),
            processing_time_ms,
        }
    }

    /// Short-circuit result for a document the syntax gate rejected
    pub fn syntax_failure(error: &SyntaxError, processing_time_ms: u64) -> Self {
        let finding = Finding::new(
            SYNTAX_RULE_ID,
            Severity::High,
            FindingLevel::Error,
            "Syntax",
            format!("Syntax Error: {}", error),
            "spec",
        )
        .with_rationale("Invalid OpenAPI specs cannot be used for tooling or code generation.")
        .with_impact("CI/CD pipelines and API gateways may reject invalid specs.")
        .with_recommendation("Fix the OpenAPI syntax error reported above.");

        Self {
            valid: false,
            errors: vec![finding],
            warnings: Vec::new(),
            confidence: SYNTAX_FAILURE_CONFIDENCE,
            notes: SYNTAX_FAILURE_NOTES.to_string(),
            processing_time_ms,
        }
    }

    pub fn is_syntax_failure(&self) -> bool {
        self.errors.first().is_some_and(|f| f.rule_id == SYNTAX_RULE_ID)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecuritySummary {
    pub rules_checked: usize,
    pub issues_found: usize,
    pub score: u32,
}

/// Security run result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityReport {
    pub issues: Vec<Finding>,
    pub summary: SecuritySummary,
    pub score: u32,
    pub confidence: f64,
    pub notes: String,
    pub processing_time_ms: u64,
}

impl SecurityReport {
    pub fn assemble(issues: Vec<Finding>, rules_checked: usize, processing_time_ms: u64) -> Self {
        let score = security_score(&issues);
        Self {
            summary: SecuritySummary {
                rules_checked,
                issues_found: issues.len(),
                score: score.score,
            },
            score: score.score,
            confidence: score.confidence,
            notes: SECURITY_NOTES.to_string(),
            processing_time_ms,
            issues,
        }
    }

    /// Highest severity among the issues, if any
    pub fn max_severity(&self) -> Option<Severity> {
        self.issues.iter().map(|f| f.severity).max()
    }
}

/// Either report, for callers that handle both catalogs uniformly
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Validation(ValidationReport),
    Security(SecurityReport),
}

impl AnalysisResult {
    /// All findings in report order (errors before warnings)
    pub fn findings(&self) -> Vec<&Finding> {
        match self {
            AnalysisResult::Validation(r) => r.errors.iter().chain(r.warnings.iter()).collect(),
            AnalysisResult::Security(r) => r.issues.iter().collect(),
        }
    }

    pub fn processing_time_ms(&self) -> u64 {
        match self {
            AnalysisResult::Validation(r) => r.processing_time_ms,
            AnalysisResult::Security(r) => r.processing_time_ms,
        }
    }

    /// Whether the syntax gate rejected the document
    pub fn is_syntax_failure(&self) -> bool {
        matches!(self, AnalysisResult::Validation(r) if r.is_syntax_failure())
    }
}

impl From<ValidationReport> for AnalysisResult {
    fn from(report: ValidationReport) -> Self {
        AnalysisResult::Validation(report)
    }
}

impl From<SecurityReport> for AnalysisResult {
    fn from(report: SecurityReport) -> Self {
        AnalysisResult::Security(report)
    }
}
