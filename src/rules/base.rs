//! Base rule trait and types
//!
//! This module defines the core abstractions for document governance:
//! - `Rule` trait that all rules must implement
//! - `RuleResult` for capturing per-rule execution results
//! - `EvaluationSummary` for aggregate statistics of one registry run

use crate::document::OpenApiDocument;
use crate::models::{Finding, FindingLevel, Severity};
use anyhow::Result;
use std::collections::HashMap;

/// Result from running a single rule
#[derive(Debug, Clone)]
pub struct RuleResult {
    /// Stable identifier of the rule (e.g. "SEC-004")
    pub rule_id: &'static str,
    /// Findings produced by the rule; empty when the rule failed
    pub findings: Vec<Finding>,
    /// Execution time in microseconds
    pub duration_us: u64,
    /// Whether the rule completed successfully
    pub success: bool,
    /// Error message if the rule failed
    pub error: Option<String>,
}

impl RuleResult {
    pub fn success(rule_id: &'static str, findings: Vec<Finding>, duration_us: u64) -> Self {
        Self {
            rule_id,
            findings,
            duration_us,
            success: true,
            error: None,
        }
    }

    pub fn failure(rule_id: &'static str, error: String, duration_us: u64) -> Self {
        Self {
            rule_id,
            findings: Vec::new(),
            duration_us,
            success: false,
            error: Some(error),
        }
    }
}

/// Trait for all governance rules
///
/// A rule is a pure function from a document to zero or more findings. Rules
/// hold no mutable state, so one instance can be shared across threads and
/// evaluated concurrently against independent documents.
///
/// # Example Implementation
///
/// ```ignore
/// pub struct MyRule;
///
/// impl Rule for MyRule {
///     fn id(&self) -> &'static str { "OAS-999" }
///     fn name(&self) -> &'static str { "my-rule" }
///     fn description(&self) -> &'static str { "Checks something" }
///     fn category(&self) -> &'static str { "Style" }
///     fn severity(&self) -> Severity { Severity::Low }
///
///     fn evaluate(&self, doc: &OpenApiDocument<'_>) -> Result<Vec<Finding>> {
///         Ok(vec![])
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Stable identifier; downstream consumers key on it
    fn id(&self) -> &'static str;

    /// Kebab-case name used in configuration
    fn name(&self) -> &'static str;

    /// Human-readable description of what this rule checks
    fn description(&self) -> &'static str;

    /// Classification string, e.g. "Broken Authentication"
    fn category(&self) -> &'static str;

    /// Severity assigned to every finding this rule creates
    fn severity(&self) -> Severity;

    /// Whether findings block the contract
    ///
    /// Default: `Warning`
    fn level(&self) -> FindingLevel {
        FindingLevel::Warning
    }

    /// Run the rule against one document.
    ///
    /// Absent structure yields zero findings. An `Err` (or a panic) drops
    /// this rule's contribution only; the registry keeps going.
    fn evaluate(&self, doc: &OpenApiDocument<'_>) -> Result<Vec<Finding>>;

    /// Start a finding carrying this rule's identity
    fn finding(&self, message: impl Into<String>, location: impl Into<String>) -> Finding
    where
        Self: Sized,
    {
        Finding::new(
            self.id(),
            self.severity(),
            self.level(),
            self.category(),
            message,
            location,
        )
    }
}

/// Summary statistics from running all rules of a registry
#[derive(Debug, Clone, Default)]
pub struct EvaluationSummary {
    pub rules_run: usize,
    pub rules_succeeded: usize,
    pub rules_failed: usize,
    pub total_findings: usize,
    pub by_severity: HashMap<Severity, usize>,
    pub total_duration_us: u64,
}

impl EvaluationSummary {
    /// Update summary with a rule result
    pub fn add_result(&mut self, result: &RuleResult) {
        self.rules_run += 1;
        self.total_duration_us += result.duration_us;

        if result.success {
            self.rules_succeeded += 1;
            self.total_findings += result.findings.len();

            for finding in &result.findings {
                *self.by_severity.entry(finding.severity).or_insert(0) += 1;
            }
        } else {
            self.rules_failed += 1;
        }
    }

    pub fn from_results(results: &[RuleResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            summary.add_result(result);
        }
        summary
    }
}
