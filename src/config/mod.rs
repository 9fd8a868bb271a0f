//! Configuration module for oasgov
//!
//! This module handles:
//! - Project-level configuration (oasgov.toml)
//! - Per-rule enable/disable overrides
//! - Security term extensions
//! - CLI defaults

mod project_config;

pub use project_config::{
    load_config_file, load_project_config, normalize_rule_name, CliDefaults, ProjectConfig,
    RuleConfigOverride, SecurityConfig, CONFIG_FILE_NAMES, CONFIG_TEMPLATE,
};
