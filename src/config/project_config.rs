//! Project-level configuration support
//!
//! Loads per-project configuration from `oasgov.toml` or `.oasgovrc.json`
//! in the working directory, or from an explicit `--config` path.
//!
//! # Configuration Format
//!
//! ```toml
//! # oasgov.toml
//!
//! [rules.operation-id-not-camel-case]
//! enabled = false
//!
//! [rules.SEC-007]
//! enabled = false
//!
//! [security]
//! sensitive_fields = ["iban", "dob"]
//! rate_limit_extensions = ["x-quota"]
//!
//! [defaults]
//! format = "json"
//! fail_on = "high"
//! min_score = 70
//! ```

use crate::models::Severity;
use crate::rules::SecuritySettings;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// File names searched in the working directory, in priority order
pub const CONFIG_FILE_NAMES: &[&str] = &["oasgov.toml", ".oasgovrc.json"];

/// Project-level configuration loaded from oasgov.toml or similar
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Per-rule overrides, keyed by rule id or rule name
    #[serde(default)]
    pub rules: HashMap<String, RuleConfigOverride>,

    /// Extra terms for the data-driven security rules
    #[serde(default)]
    pub security: SecurityConfig,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Configuration override for a specific rule
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RuleConfigOverride {
    /// Whether the rule is enabled (default: true)
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Additions to the built-in security term sets
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SecurityConfig {
    /// Property names flagged by sensitive-field-exposure, on top of the defaults
    #[serde(default)]
    pub sensitive_fields: Vec<String>,

    /// Root extensions accepted as a rate-limit declaration, on top of the defaults
    #[serde(default)]
    pub rate_limit_extensions: Vec<String>,
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default output format (text, json, sarif)
    #[serde(default)]
    pub format: Option<String>,

    /// Fail-on severity threshold for `security`
    #[serde(default)]
    pub fail_on: Option<String>,

    /// Minimum acceptable security score
    #[serde(default)]
    pub min_score: Option<u32>,

    /// Treat invalid contracts as a failing exit code in `validate`
    #[serde(default)]
    pub strict: Option<bool>,

    /// Skip rules by default
    #[serde(default)]
    pub skip_rules: Vec<String>,
}

/// Load project configuration from a directory.
///
/// Searches for configuration files in this order:
/// 1. `oasgov.toml`
/// 2. `.oasgovrc.json`
///
/// Returns default configuration if no usable config file is found.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    for name in CONFIG_FILE_NAMES {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded project config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load one configuration file, choosing the parser by extension
pub fn load_config_file(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let config = if is_json {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };
    Ok(config)
}

impl ProjectConfig {
    fn rule_override(&self, id: &str, name: &str) -> Option<&RuleConfigOverride> {
        let id_key = normalize_rule_name(id);
        let name_key = normalize_rule_name(name);
        self.rules.iter().find_map(|(key, cfg)| {
            let key = normalize_rule_name(key);
            (key == id_key || key == name_key).then_some(cfg)
        })
    }

    /// Check if a rule is enabled (defaults to true if not specified)
    ///
    /// A rule listed in `defaults.skip_rules` is disabled unless its own
    /// section sets `enabled = true`.
    pub fn is_rule_enabled(&self, id: &str, name: &str) -> bool {
        if let Some(enabled) = self.rule_override(id, name).and_then(|c| c.enabled) {
            return enabled;
        }
        let id_key = normalize_rule_name(id);
        let name_key = normalize_rule_name(name);
        !self.defaults.skip_rules.iter().any(|skip| {
            let skip = normalize_rule_name(skip);
            skip == id_key || skip == name_key
        })
    }

    /// Settings for the security catalog: built-in terms plus configured extras
    pub fn security_settings(&self) -> SecuritySettings {
        SecuritySettings::extended(
            &self.security.sensitive_fields,
            &self.security.rate_limit_extensions,
        )
    }

    /// Parsed `defaults.fail_on`; an unknown value is logged and ignored
    pub fn fail_on(&self) -> Option<Severity> {
        let raw = self.defaults.fail_on.as_deref()?;
        match raw.parse() {
            Ok(severity) => Some(severity),
            Err(e) => {
                warn!("Ignoring defaults.fail_on: {}", e);
                None
            }
        }
    }
}

/// Normalize a rule id or name for config lookup
///
/// Converts various formats to lowercase kebab-case for matching.
pub fn normalize_rule_name(name: &str) -> String {
    // SchemaMissingExample -> schema-missing-example
    // schema_missing_example -> schema-missing-example
    // OAS-001 -> oas-001

    let mut result = String::new();
    let chars: Vec<char> = name.trim().chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            // Hyphen before a new word: after a lowercase char, or at the end of an acronym
            let prev_is_lower = i > 0 && chars[i - 1].is_lowercase();
            let is_acronym_end = i > 0
                && chars[i - 1].is_uppercase()
                && i + 1 < chars.len()
                && chars[i + 1].is_lowercase();

            if prev_is_lower || is_acronym_end {
                result.push('-');
            }
            result.extend(c.to_lowercase());
        } else if *c == '_' {
            result.push('-');
        } else {
            result.push(*c);
        }
    }

    result.trim_end_matches("-rule").to_string()
}

/// Commented template written by `oasgov init`
pub const CONFIG_TEMPLATE: &str = r#"# oasgov project configuration
#
# Rules are addressed by id (OAS-001, SEC-004) or by name
# (schema-missing-example, object-level-authorization).

# [rules.schema-missing-example]
# enabled = false

[security]
# Property names reported by sensitive-field-exposure, added to the built-in set
# (password, token, ssn, email, creditcard, apikey, secret)
sensitive_fields = []

# Root extensions accepted as a rate-limit declaration, added to the built-in set
# (x-rate-limit, x-ratelimit, x-rate-limiting, x-throttling)
rate_limit_extensions = []

[defaults]
# Output format: text, json or sarif
format = "text"

# `oasgov security` exits non-zero when a finding at or above this severity exists
# fail_on = "high"

# `oasgov security` exits non-zero when the score drops below this value
# min_score = 70

# `oasgov validate` exits non-zero when any contract is invalid
# strict = true
"#;
