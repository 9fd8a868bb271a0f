//! `validate` and `security` commands
//!
//! Files are loaded and analyzed in parallel; one immutable engine is shared
//! by every worker. Reports keep the command-line file order.

use crate::config::ProjectConfig;
use crate::engine::GovernanceEngine;
use crate::gate::SyntaxError;
use crate::loader::load_file;
use crate::models::Severity;
use crate::report::{SecurityReport, ValidationReport};
use crate::reporters::{self, FileReport, OutputFormat};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info};

pub(super) struct ValidateOptions {
    pub format: Option<String>,
    pub output: Option<PathBuf>,
    pub strict: bool,
}

pub(super) struct SecurityOptions {
    pub format: Option<String>,
    pub output: Option<PathBuf>,
    pub fail_on: Option<Severity>,
    pub min_score: Option<u32>,
}

fn output_format(format: Option<&str>) -> Result<OutputFormat> {
    OutputFormat::from_str(format.unwrap_or("text"))
}

pub(super) fn validate(
    config: &ProjectConfig,
    files: &[PathBuf],
    options: ValidateOptions,
) -> Result<()> {
    let format = output_format(options.format.as_deref())?;
    let engine = GovernanceEngine::from_config(config);
    info!("Validating {} document(s)", files.len());

    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| {
            FileReport::new(path.display().to_string(), validate_file(&engine, path))
        })
        .collect();

    write_output(&reports, format, options.output.as_deref())?;

    let invalid = reports
        .iter()
        .filter(|r| matches!(&r.result, crate::report::AnalysisResult::Validation(v) if !v.valid))
        .count();
    if options.strict && invalid > 0 {
        eprintln!("Failing due to --strict: {} invalid document(s)", invalid);
        std::process::exit(1);
    }
    Ok(())
}

/// A document that cannot be parsed is reported like a syntax-gate failure
fn validate_file(engine: &GovernanceEngine, path: &Path) -> ValidationReport {
    let started = Instant::now();
    match load_file(path) {
        Ok(raw) => engine.validate(&raw, started),
        Err(e) => {
            debug!("Failed to load {}: {}", path.display(), e);
            let elapsed = started.elapsed().as_millis() as u64;
            ValidationReport::syntax_failure(&SyntaxError::new(vec![e.to_string()]), elapsed)
        }
    }
}

pub(super) fn security(
    config: &ProjectConfig,
    files: &[PathBuf],
    options: SecurityOptions,
) -> Result<()> {
    let format = output_format(options.format.as_deref())?;
    let engine = GovernanceEngine::from_config(config);
    info!("Scanning {} document(s)", files.len());

    let reports: Vec<(String, SecurityReport)> = files
        .par_iter()
        .map(|path| {
            let started = Instant::now();
            let raw = load_file(path)
                .with_context(|| format!("Cannot analyze {}", path.display()))?;
            Ok((path.display().to_string(), engine.analyze_security(&raw, started)))
        })
        .collect::<Result<_>>()?;

    let failures = gate_failures(&reports, options.fail_on, options.min_score);

    let reports: Vec<FileReport> = reports
        .into_iter()
        .map(|(file, report)| FileReport::new(file, report))
        .collect();
    write_output(&reports, format, options.output.as_deref())?;

    if !failures.is_empty() {
        for failure in &failures {
            eprintln!("{}", failure);
        }
        std::process::exit(1);
    }
    Ok(())
}

/// Reasons the security run should fail, one line per offending file
fn gate_failures(
    reports: &[(String, SecurityReport)],
    fail_on: Option<Severity>,
    min_score: Option<u32>,
) -> Vec<String> {
    let mut failures = Vec::new();
    for (file, report) in reports {
        if let (Some(threshold), Some(worst)) = (fail_on, report.max_severity()) {
            if worst >= threshold {
                failures.push(format!(
                    "Failing due to --fail-on={}: {} has {} issue(s)",
                    threshold.to_string().to_lowercase(),
                    file,
                    worst
                ));
            }
        }
        if let Some(min) = min_score {
            if report.score < min {
                failures.push(format!(
                    "Failing due to --min-score={}: {} scored {}",
                    min, file, report.score
                ));
            }
        }
    }
    failures
}

fn write_output(reports: &[FileReport], format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let rendered = reporters::report_with_format(reports, format)?;
    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Finding, FindingLevel};

    fn report(severities: &[Severity]) -> SecurityReport {
        let issues = severities
            .iter()
            .map(|s| Finding::new("SEC-X", *s, FindingLevel::Warning, "c", "m", "l"))
            .collect();
        SecurityReport::assemble(issues, 7, 0)
    }

    #[test]
    fn test_fail_on_threshold() {
        let reports = vec![
            ("a.yaml".to_string(), report(&[Severity::Medium])),
            ("b.yaml".to_string(), report(&[Severity::Critical, Severity::Low])),
        ];
        let failures = gate_failures(&reports, Some(Severity::High), None);
        assert_eq!(failures.len(), 1);
        assert!(failures[0].contains("b.yaml"));
        assert!(failures[0].contains("CRITICAL"));

        assert_eq!(gate_failures(&reports, Some(Severity::Medium), None).len(), 2);
        assert!(gate_failures(&reports, None, None).is_empty());
    }

    #[test]
    fn test_min_score() {
        let reports = vec![(
            "a.yaml".to_string(),
            report(&[Severity::Critical, Severity::Critical]),
        )];
        // 100 - 30 = 70
        assert!(gate_failures(&reports, None, Some(70)).is_empty());
        assert_eq!(gate_failures(&reports, None, Some(71)).len(), 1);
    }

    #[test]
    fn test_unparseable_file_is_syntax_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "openapi: [3.0\n").unwrap();

        let report = validate_file(&GovernanceEngine::new(), &path);
        assert!(!report.valid);
        assert!(report.is_syntax_failure());
        assert!(report.errors[0].message.starts_with("Syntax Error: invalid YAML"));
    }
}
