//! Core data models for oasgov
//!
//! These models are shared by the rules, the scoring engine and the
//! report assembler.

use serde::{Deserialize, Serialize};

/// Generate a deterministic finding ID based on content hash.
///
/// The same rule reporting the same message at the same location always
/// yields the same ID, so downstream consumers can track findings across runs.
pub fn deterministic_finding_id(rule_id: &str, location: &str, message: &str) -> String {
    let input = format!("{rule_id}\n{location}\n{message}");
    let digest = md5::compute(input.as_bytes());
    format!("{:x}", digest)[..16].to_string()
}

/// Severity levels for findings
///
/// The serialized tokens are part of the public contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "LOW"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(anyhow::anyhow!(
                "Unknown severity '{}'. Valid values: low, medium, high, critical",
                s
            )),
        }
    }
}

/// Whether a finding blocks the contract (`error`) or is advisory (`warning`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FindingLevel {
    Error,
    #[default]
    Warning,
}

/// One reported rule violation
///
/// Findings are created once by the rule that detected the violation and are
/// never mutated afterwards; the builder methods consume `self`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    pub rule_id: String,
    pub severity: Severity,
    pub level: FindingLevel,
    pub category: String,
    pub message: String,
    /// Dot path into the document, e.g. `paths./users.get.responses`
    pub location: String,
    #[serde(rename = "how_to_fix")]
    pub recommendation: String,
    #[serde(rename = "why_it_matters")]
    pub rationale: String,
    #[serde(rename = "production_impact")]
    pub impact: String,
}

impl Finding {
    pub fn new(
        rule_id: &str,
        severity: Severity,
        level: FindingLevel,
        category: &str,
        message: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        let message = message.into();
        let location = location.into();
        Self {
            id: deterministic_finding_id(rule_id, &location, &message),
            rule_id: rule_id.to_string(),
            severity,
            level,
            category: category.to_string(),
            message,
            location,
            recommendation: String::new(),
            rationale: String::new(),
            impact: String::new(),
        }
    }

    pub fn with_recommendation(mut self, text: impl Into<String>) -> Self {
        self.recommendation = text.into();
        self
    }

    pub fn with_rationale(mut self, text: impl Into<String>) -> Self {
        self.rationale = text.into();
        self
    }

    pub fn with_impact(mut self, text: impl Into<String>) -> Self {
        self.impact = text.into();
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == FindingLevel::Error
    }
}

/// Summary of findings by severity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingsSummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub total: usize,
}

impl FindingsSummary {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut summary = Self::default();
        for f in findings {
            match f.severity {
                Severity::Critical => summary.critical += 1,
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
            }
            summary.total += 1;
        }
        summary
    }

    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }
}
