//! Governance rules
//!
//! Two independent catalogs share the same machinery:
//! - [`contract`]: structural linting, scored by contract confidence
//! - [`security`]: OWASP-style risk rules, scored by security score
//!
//! Each rule is a unit struct (or a small struct holding its settings)
//! implementing [`Rule`]. A [`RuleRegistry`] runs a catalog in order and
//! isolates rule failures.

mod base;
pub mod contract;
mod registry;
pub mod security;

pub use base::{EvaluationSummary, Rule, RuleResult};
pub use registry::{Evaluation, RuleRegistry, RuleRegistryBuilder};
pub use security::SecuritySettings;

use std::sync::Arc;

/// Which catalog a rule belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Catalog {
    Contract,
    Security,
}

impl std::fmt::Display for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Catalog::Contract => write!(f, "contract"),
            Catalog::Security => write!(f, "security"),
        }
    }
}

/// Contract rules in registration order
pub fn contract_rules() -> Vec<Arc<dyn Rule>> {
    contract::all_rules()
}

/// Security rules in registration order
pub fn security_rules(settings: &SecuritySettings) -> Vec<Arc<dyn Rule>> {
    security::all_rules(settings)
}

/// Every rule of both catalogs, tagged with its catalog
pub fn catalog(settings: &SecuritySettings) -> Vec<(Catalog, Arc<dyn Rule>)> {
    contract_rules()
        .into_iter()
        .map(|r| (Catalog::Contract, r))
        .chain(security_rules(settings).into_iter().map(|r| (Catalog::Security, r)))
        .collect()
}
