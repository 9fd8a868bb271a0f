//! Rules command - list both catalogs

use crate::config::ProjectConfig;
use crate::models::{FindingLevel, Severity};
use crate::rules::{catalog, Catalog};
use anyhow::Result;
use console::style;
use serde::Serialize;

#[derive(Serialize)]
struct RuleEntry {
    id: &'static str,
    name: &'static str,
    catalog: Catalog,
    category: &'static str,
    severity: Severity,
    level: FindingLevel,
    description: &'static str,
    enabled: bool,
}

fn entries(config: &ProjectConfig) -> Vec<RuleEntry> {
    catalog(&config.security_settings())
        .into_iter()
        .map(|(catalog, rule)| RuleEntry {
            id: rule.id(),
            name: rule.name(),
            catalog,
            category: rule.category(),
            severity: rule.severity(),
            level: rule.level(),
            description: rule.description(),
            enabled: config.is_rule_enabled(rule.id(), rule.name()),
        })
        .collect()
}

pub fn run(config: &ProjectConfig, format: &str) -> Result<()> {
    let entries = entries(config);
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let mut current = None;
    for entry in &entries {
        if current != Some(entry.catalog) {
            println!("\n{}", style(format!("{} rules", entry.catalog)).bold());
            current = Some(entry.catalog);
        }
        let id = if entry.enabled {
            style(entry.id).cyan()
        } else {
            style(entry.id).dim()
        };
        println!(
            "  {}  {:<8} {:<34} {}{}",
            id,
            entry.severity.to_string(),
            entry.name,
            entry.description,
            if entry.enabled { "" } else { " (disabled)" }
        );
    }
    Ok(())
}
