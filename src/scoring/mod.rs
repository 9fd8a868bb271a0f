//! Finding-based scoring
//!
//! Two independent variants, selected by the catalog that produced the
//! findings. Both are pure functions of the finding multiset and are total,
//! including over the empty set.
//!
//! # Contract confidence
//!
//! ```text
//! deduction  = min(0.5, 0.1 × errors + 0.03 × warnings)
//! confidence = clamp(0.95 - deduction, 0.40, 0.95)
//! valid      = errors == 0
//! ```
//!
//! # Security score
//!
//! ```text
//! score      = max(0, 100 - Σ penalty(severity))
//! confidence = clamp(score / 100, 0.40, 0.98)
//!
//! penalty: CRITICAL 15, HIGH 10, MEDIUM 5, LOW 2
//! ```
//!
//! Confidence values are rounded to two decimals.

use crate::models::{Finding, FindingsSummary, Severity};
use serde::Serialize;
use tracing::debug;

pub const CONTRACT_CONFIDENCE_MIN: f64 = 0.40;
pub const CONTRACT_CONFIDENCE_MAX: f64 = 0.95;
pub const SECURITY_CONFIDENCE_MIN: f64 = 0.40;
pub const SECURITY_CONFIDENCE_MAX: f64 = 0.98;

/// Confidence reported when the syntax gate rejects a document
pub const SYNTAX_FAILURE_CONFIDENCE: f64 = 0.40;

const ERROR_DEDUCTION: f64 = 0.10;
const WARNING_DEDUCTION: f64 = 0.03;
const MAX_DEDUCTION: f64 = 0.50;

/// Points removed from the security score per finding
pub fn severity_penalty(severity: Severity) -> u32 {
    match severity {
        Severity::Critical => 15,
        Severity::High => 10,
        Severity::Medium => 5,
        Severity::Low => 2,
    }
}

/// Round to two decimals, the precision every report carries
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Contract-confidence outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContractScore {
    pub valid: bool,
    pub error_count: usize,
    pub warning_count: usize,
    pub confidence: f64,
}

/// Score a contract (lint) run
pub fn contract_score(findings: &[Finding]) -> ContractScore {
    let error_count = findings.iter().filter(|f| f.is_error()).count();
    let warning_count = findings.len() - error_count;
    let confidence = contract_confidence(error_count, warning_count);

    debug!(
        "Contract score: {} errors, {} warnings, confidence {:.2}",
        error_count, warning_count, confidence
    );

    ContractScore {
        valid: error_count == 0,
        error_count,
        warning_count,
        confidence,
    }
}

/// Confidence from raw error/warning counts
pub fn contract_confidence(error_count: usize, warning_count: usize) -> f64 {
    let deduction = (ERROR_DEDUCTION * error_count as f64
        + WARNING_DEDUCTION * warning_count as f64)
        .min(MAX_DEDUCTION);
    round2(
        (CONTRACT_CONFIDENCE_MAX - deduction)
            .clamp(CONTRACT_CONFIDENCE_MIN, CONTRACT_CONFIDENCE_MAX),
    )
}

/// Security-score outcome with the per-severity breakdown it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityScore {
    /// 0-100, higher is safer
    pub score: u32,
    pub confidence: f64,
    /// Total penalty before clamping; may exceed 100
    pub penalty: u64,
    pub by_severity: FindingsSummary,
}

/// Score a security run
pub fn security_score(findings: &[Finding]) -> SecurityScore {
    let penalty: u64 = findings
        .iter()
        .map(|f| u64::from(severity_penalty(f.severity)))
        .sum();
    let score = 100u64.saturating_sub(penalty) as u32;
    let confidence = round2(
        (f64::from(score) / 100.0).clamp(SECURITY_CONFIDENCE_MIN, SECURITY_CONFIDENCE_MAX),
    );

    debug!(
        "Security score: {} (penalty {}, {} findings), confidence {:.2}",
        score,
        penalty,
        findings.len(),
        confidence
    );

    SecurityScore {
        score,
        confidence,
        penalty,
        by_severity: FindingsSummary::from_findings(findings),
    }
}

impl SecurityScore {
    /// Penalty breakdown, one line per severity present; empty without findings
    pub fn explain(&self) -> String {
        let mut lines = Vec::new();
        for severity in Severity::ALL.iter().rev() {
            let count = self.by_severity.count(*severity);
            if count > 0 {
                lines.push(format!(
                    "{} x {} = -{}",
                    count,
                    severity,
                    count as u64 * u64::from(severity_penalty(*severity))
                ));
            }
        }
        if self.penalty > 100 {
            lines.push(format!("(penalty {} clamped at 100)", self.penalty));
        }
        lines.join("\n")
    }
}
