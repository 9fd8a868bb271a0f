//! CLI command definitions and handlers

mod analyze;
mod init;
mod rules;

use crate::config::{load_config_file, load_project_config, ProjectConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::warn;

/// Parse a minimum score (0-100)
fn parse_score(s: &str) -> Result<u32, String> {
    let n: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n > 100 {
        Err("score cannot exceed 100".to_string())
    } else {
        Ok(n)
    }
}

/// oasgov - OpenAPI contract and security governance
#[derive(Parser, Debug)]
#[command(name = "oasgov")]
#[command(
    version,
    about = "Static governance for OpenAPI 3.0 documents: contract linting and OWASP API Top 10 risk scoring",
    after_help = "\
Examples:
  oasgov validate api.yaml                   Lint a contract
  oasgov validate specs/*.yaml --strict      Exit 1 if any contract is invalid
  oasgov security api.yaml --fail-on high    Exit 1 on high or critical issues
  oasgov security api.json --format sarif -o results.sarif.json
  oasgov rules                               List every rule"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); falls back to RUST_LOG
    #[arg(long, global = true, value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: Option<String>,

    /// Config file (default: oasgov.toml or .oasgovrc.json in the working directory)
    #[arg(long, global = true, env = "OASGOV_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate contracts: syntax gate plus contract linting
    #[command(after_help = "\
Examples:
  oasgov validate api.yaml
  oasgov validate a.yaml b.json --format json
  oasgov validate api.yaml --strict            Exit 1 if the contract is invalid")]
    Validate {
        /// OpenAPI documents (JSON or YAML)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format: text, json, sarif
        #[arg(long, short = 'f', value_parser = ["text", "json", "sarif"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Exit with code 1 if any document is invalid
        #[arg(long)]
        strict: bool,
    },

    /// Score security risks modeled on the OWASP API Security Top 10
    #[command(after_help = "\
Examples:
  oasgov security api.yaml
  oasgov security api.yaml --fail-on critical
  oasgov security api.yaml --min-score 70      Exit 1 if the score is below 70")]
    Security {
        /// OpenAPI documents (JSON or YAML)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format: text, json, sarif
        #[arg(long, short = 'f', value_parser = ["text", "json", "sarif"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Exit with code 1 if issues at this severity or higher exist
        #[arg(long, value_parser = ["critical", "high", "medium", "low"])]
        fail_on: Option<String>,

        /// Exit with code 1 if any document scores below this value
        #[arg(long, value_parser = parse_score)]
        min_score: Option<u32>,
    },

    /// List the rules of both catalogs
    Rules {
        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Write an oasgov.toml config file with example settings
    Init {
        /// Overwrite an existing oasgov.toml
        #[arg(long)]
        force: bool,
    },
}

/// Resolve the project config: explicit path first, then the working directory
fn resolve_config(explicit: Option<&PathBuf>) -> Result<ProjectConfig> {
    match explicit {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Ok(load_config_file(path).unwrap_or_else(|e| {
                warn!("Failed to load {}: {}; using defaults", path.display(), e);
                ProjectConfig::default()
            }))
        }
        None => {
            let cwd = std::env::current_dir().context("Cannot determine working directory")?;
            Ok(load_project_config(&cwd))
        }
    }
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { force } => {
            let cwd = std::env::current_dir().context("Cannot determine working directory")?;
            init::run(&cwd, force)
        }

        Commands::Rules { format } => {
            let config = resolve_config(cli.config.as_ref())?;
            rules::run(&config, &format)
        }

        Commands::Validate {
            files,
            format,
            output,
            strict,
        } => {
            let config = resolve_config(cli.config.as_ref())?;
            let options = analyze::ValidateOptions {
                format: format.or_else(|| config.defaults.format.clone()),
                output,
                strict: strict || config.defaults.strict.unwrap_or(false),
            };
            analyze::validate(&config, &files, options)
        }

        Commands::Security {
            files,
            format,
            output,
            fail_on,
            min_score,
        } => {
            let config = resolve_config(cli.config.as_ref())?;
            let fail_on = match fail_on {
                Some(sev) => Some(sev.parse()?),
                None => config.fail_on(),
            };
            let options = analyze::SecurityOptions {
                format: format.or_else(|| config.defaults.format.clone()),
                output,
                fail_on,
                min_score: min_score.or(config.defaults.min_score),
            };
            analyze::security(&config, &files, options)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("70"), Ok(70));
        assert!(parse_score("101").is_err());
        assert!(parse_score("abc").is_err());
    }

    #[test]
    fn test_cli_parses_security() {
        let cli = Cli::try_parse_from([
            "oasgov",
            "--log-level",
            "debug",
            "security",
            "a.yaml",
            "b.yaml",
            "--fail-on",
            "high",
            "--min-score",
            "60",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Commands::Security {
                files,
                fail_on,
                min_score,
                ..
            } => {
                assert_eq!(files.len(), 2);
                let fail_on = fail_on.as_deref().map(|s| s.parse::<Severity>().unwrap());
                assert_eq!(fail_on, Some(Severity::High));
                assert_eq!(min_score, Some(60));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_validate_requires_files() {
        assert!(Cli::try_parse_from(["oasgov", "validate"]).is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["oasgov", "validate", "a.yaml", "--format", "html"]).is_err());
    }
}
