//! Init command - write a commented oasgov.toml

use crate::config::CONFIG_TEMPLATE;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

/// Run the init command
pub fn run(path: &Path, force: bool) -> Result<()> {
    if !path.is_dir() {
        anyhow::bail!("Path is not a directory: {}", path.display());
    }

    let config_path = path.join("oasgov.toml");
    if config_path.exists() && !force {
        println!(
            "{} Config already exists at {} (use --force to overwrite)",
            style("!").yellow(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );
    println!(
        "\n{} Run {} to lint your first contract",
        style("→").dim(),
        style("oasgov validate openapi.yaml").bold()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_project_config;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempfile::TempDir::new().unwrap();
        run(dir.path(), false).unwrap();

        let written = std::fs::read_to_string(dir.path().join("oasgov.toml")).unwrap();
        assert_eq!(written, CONFIG_TEMPLATE);
        let config = load_project_config(dir.path());
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("oasgov.toml");
        std::fs::write(&path, "[defaults]\nformat = \"json\"\n").unwrap();

        run(dir.path(), false).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("json"));

        run(dir.path(), true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), CONFIG_TEMPLATE);
    }
}
