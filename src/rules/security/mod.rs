//! Security catalog modeled on the OWASP API Security Top 10
//!
//! Findings from these rules feed the security score. Several rules look at
//! the same operation from different angles and may all fire for it; they are
//! never deduplicated.

mod authentication;
mod authorization;
mod data_exposure;
mod rate_limit;

pub use authentication::{EndpointSecurityRule, GlobalSecurityRule};
pub use authorization::{DestructiveOperationRule, ObjectLevelAuthorizationRule};
pub use data_exposure::{MassAssignmentRule, SensitiveFieldRule};
pub use rate_limit::RateLimitRule;

use crate::rules::base::Rule;
use std::sync::Arc;

/// Field names treated as sensitive out of the box
pub const DEFAULT_SENSITIVE_FIELDS: &[&str] = &[
    "password",
    "token",
    "ssn",
    "email",
    "creditcard",
    "apikey",
    "secret",
];

/// Root extensions accepted as a rate-limit declaration out of the box
pub const DEFAULT_RATE_LIMIT_EXTENSIONS: &[&str] = &[
    "x-rate-limit",
    "x-ratelimit",
    "x-rate-limiting",
    "x-throttling",
];

/// Tunables for the data-driven security rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecuritySettings {
    pub sensitive_fields: Vec<String>,
    pub rate_limit_extensions: Vec<String>,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            sensitive_fields: DEFAULT_SENSITIVE_FIELDS.iter().map(|s| s.to_string()).collect(),
            rate_limit_extensions: DEFAULT_RATE_LIMIT_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl SecuritySettings {
    /// Defaults plus extra terms; extras never replace the built-in sets
    pub fn extended(extra_fields: &[String], extra_extensions: &[String]) -> Self {
        let mut settings = Self::default();
        settings.sensitive_fields.extend(extra_fields.iter().cloned());
        settings
            .rate_limit_extensions
            .extend(extra_extensions.iter().cloned());
        settings
    }
}

/// All security rules in registration (and output) order
pub fn all_rules(settings: &SecuritySettings) -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(GlobalSecurityRule),
        Arc::new(EndpointSecurityRule),
        Arc::new(DestructiveOperationRule),
        Arc::new(ObjectLevelAuthorizationRule),
        Arc::new(SensitiveFieldRule::new(&settings.sensitive_fields)),
        Arc::new(MassAssignmentRule),
        Arc::new(RateLimitRule::new(&settings.rate_limit_extensions)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_and_ids() {
        let ids: Vec<_> = all_rules(&SecuritySettings::default())
            .iter()
            .map(|r| r.id())
            .collect();
        assert_eq!(
            ids,
            vec!["SEC-001", "SEC-002", "SEC-003", "SEC-004", "SEC-005", "SEC-006", "SEC-007"]
        );
    }

    #[test]
    fn test_extended_settings_keep_defaults() {
        let settings = SecuritySettings::extended(&["iban".to_string()], &[]);
        assert!(settings.sensitive_fields.contains(&"password".to_string()));
        assert!(settings.sensitive_fields.contains(&"iban".to_string()));
        assert_eq!(settings.rate_limit_extensions.len(), DEFAULT_RATE_LIMIT_EXTENSIONS.len());
    }
}
