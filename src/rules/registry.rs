//! Rule execution registry
//!
//! The RuleRegistry holds an ordered rule catalog and evaluates it against
//! one document at a time:
//! - Runs every rule in registration order
//! - Isolates failures: a rule that errors or panics contributes nothing
//! - Concatenates findings in rule order, never re-sorting them
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     RuleRegistry                        │
//! ├─────────────────────────────────────────────────────────┤
//! │  1. Register rules (order is output order)              │
//! │  2. Evaluate each rule under catch_unwind               │
//! │  3. Drop failed rules' contributions, log them          │
//! │  4. Return findings + per-rule results                  │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog is immutable once built, so a registry behind an `Arc` can
//! serve concurrent evaluations of independent documents.

use crate::document::OpenApiDocument;
use crate::models::Finding;
use crate::rules::base::{EvaluationSummary, Rule, RuleResult};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, warn};

/// Output of one registry run
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Findings of all successful rules, in registration order
    pub findings: Vec<Finding>,
    /// One entry per registered rule, in registration order
    pub results: Vec<RuleResult>,
    pub summary: EvaluationSummary,
}

/// Ordered, immutable collection of rules
pub struct RuleRegistry {
    rules: Vec<Arc<dyn Rule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register a rule; rules run in registration order
    pub fn register(&mut self, rule: Arc<dyn Rule>) {
        debug!("Registering rule: {} ({})", rule.id(), rule.name());
        self.rules.push(rule);
    }

    /// Register multiple rules at once
    pub fn register_all(&mut self, rules: impl IntoIterator<Item = Arc<dyn Rule>>) {
        for rule in rules {
            self.register(rule);
        }
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    /// Evaluate every rule and return the concatenated findings
    pub fn run(&self, doc: &OpenApiDocument<'_>) -> Vec<Finding> {
        self.run_detailed(doc).findings
    }

    /// Evaluate every rule and return per-rule results as well
    pub fn run_detailed(&self, doc: &OpenApiDocument<'_>) -> Evaluation {
        let results: Vec<RuleResult> = self
            .rules
            .iter()
            .map(|rule| Self::run_single_rule(rule, doc))
            .collect();

        let summary = EvaluationSummary::from_results(&results);
        let mut findings = Vec::with_capacity(summary.total_findings);
        for result in &results {
            if result.success {
                findings.extend(result.findings.iter().cloned());
            } else if let Some(err) = &result.error {
                warn!("Rule {} failed: {}", result.rule_id, err);
            }
        }

        debug!(
            "Evaluation complete: {} findings from {}/{} rules",
            findings.len(),
            summary.rules_succeeded,
            summary.rules_run
        );

        Evaluation {
            findings,
            results,
            summary,
        }
    }

    /// Run a single rule with error handling and timing
    fn run_single_rule(rule: &Arc<dyn Rule>, doc: &OpenApiDocument<'_>) -> RuleResult {
        let id = rule.id();
        let start = Instant::now();

        // Wrap in catch_unwind so a panicking rule cannot abort the batch
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| rule.evaluate(doc)));
        let duration = start.elapsed().as_micros() as u64;

        match outcome {
            Ok(Ok(findings)) => {
                debug!("Rule {} found {} findings in {}us", id, findings.len(), duration);
                RuleResult::success(id, findings, duration)
            }
            Ok(Err(e)) => {
                debug!("Rule {} skipped (evaluation error): {}", id, e);
                RuleResult::failure(id, e.to_string(), duration)
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                error!("Rule {} panicked: {}", id, panic_msg);
                RuleResult::failure(id, format!("Panic: {}", panic_msg), duration)
            }
        }
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for RuleRegistry with fluent API
pub struct RuleRegistryBuilder {
    rules: Vec<Arc<dyn Rule>>,
}

impl RuleRegistryBuilder {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rule(mut self, rule: Arc<dyn Rule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = Arc<dyn Rule>>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Keep only rules for which `keep` returns true
    pub fn filter(mut self, keep: impl Fn(&dyn Rule) -> bool) -> Self {
        self.rules.retain(|r| keep(r.as_ref()));
        self
    }

    pub fn build(self) -> RuleRegistry {
        let mut registry = RuleRegistry::new();
        registry.register_all(self.rules);
        registry
    }
}

impl Default for RuleRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
