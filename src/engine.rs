//! Governance engine
//!
//! Ties the syntax gate, both rule catalogs and the report assembler
//! together. An engine is immutable after construction; share it behind an
//! `Arc` (or by reference) to analyze independent documents in parallel.
//!
//! ```text
//! raw document ──► SyntaxValidator ──► OpenApiDocument ──► RuleRegistry
//!                        │ (contract only)                     │
//!                        ▼                                     ▼
//!                 syntax-failure report            scoring ──► report
//! ```

use crate::config::ProjectConfig;
use crate::document::OpenApiDocument;
use crate::gate::{StructuralValidator, SyntaxValidator};
use crate::models::Finding;
use crate::report::{SecurityReport, ValidationReport};
use crate::rules::{
    contract_rules, security_rules, Evaluation, RuleRegistry, RuleRegistryBuilder,
    SecuritySettings,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

pub struct GovernanceEngine {
    contract: Arc<RuleRegistry>,
    security: Arc<RuleRegistry>,
    gate: Arc<dyn SyntaxValidator>,
}

impl GovernanceEngine {
    /// Engine with every built-in rule and the structural gate
    pub fn new() -> Self {
        Self::with_settings(&SecuritySettings::default())
    }

    pub fn with_settings(settings: &SecuritySettings) -> Self {
        Self::from_parts(
            RuleRegistryBuilder::new().rules(contract_rules()).build(),
            RuleRegistryBuilder::new().rules(security_rules(settings)).build(),
            Arc::new(StructuralValidator),
        )
    }

    /// Engine honoring per-rule overrides and security extensions from config
    pub fn from_config(config: &ProjectConfig) -> Self {
        let enabled = |rule: &dyn crate::rules::Rule| {
            let on = config.is_rule_enabled(rule.id(), rule.name());
            if !on {
                info!("Rule {} ({}) disabled by configuration", rule.id(), rule.name());
            }
            on
        };

        let contract = RuleRegistryBuilder::new()
            .rules(contract_rules())
            .filter(enabled)
            .build();
        let security = RuleRegistryBuilder::new()
            .rules(security_rules(&config.security_settings()))
            .filter(enabled)
            .build();

        Self::from_parts(contract, security, Arc::new(StructuralValidator))
    }

    pub fn from_parts(
        contract: RuleRegistry,
        security: RuleRegistry,
        gate: Arc<dyn SyntaxValidator>,
    ) -> Self {
        debug!(
            "Engine ready: {} contract rules, {} security rules, gate '{}'",
            contract.rule_count(),
            security.rule_count(),
            gate.name()
        );
        Self {
            contract: Arc::new(contract),
            security: Arc::new(security),
            gate,
        }
    }

    /// Replace the syntax gate, e.g. with a full schema validator
    pub fn with_validator(mut self, gate: Arc<dyn SyntaxValidator>) -> Self {
        self.gate = gate;
        self
    }

    pub fn contract_registry(&self) -> &RuleRegistry {
        &self.contract
    }

    pub fn security_registry(&self) -> &RuleRegistry {
        &self.security
    }

    /// Run the contract catalog without the gate
    pub fn lint(&self, raw: &Value) -> Evaluation {
        self.contract.run_detailed(&OpenApiDocument::new(raw))
    }

    /// Run the security catalog
    pub fn scan(&self, raw: &Value) -> Evaluation {
        self.security.run_detailed(&OpenApiDocument::new(raw))
    }

    /// Gate, lint and assemble a contract report.
    ///
    /// `started` is the caller's start time; the report's processing time is
    /// measured from it.
    pub fn validate(&self, raw: &Value, started: Instant) -> ValidationReport {
        if let Err(err) = self.gate.validate(raw) {
            info!("Document rejected by syntax gate: {}", err);
            return ValidationReport::syntax_failure(&err, elapsed_ms(started));
        }
        let findings: Vec<Finding> = self.lint(raw).findings;
        ValidationReport::assemble(findings, elapsed_ms(started))
    }

    /// Scan and assemble a security report.
    ///
    /// The security catalog tolerates any document shape, so no gate runs here.
    pub fn analyze_security(&self, raw: &Value, started: Instant) -> SecurityReport {
        let evaluation = self.scan(raw);
        SecurityReport::assemble(
            evaluation.findings,
            self.security.rule_count(),
            elapsed_ms(started),
        )
    }
}

impl Default for GovernanceEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
