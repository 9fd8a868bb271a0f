//! Text (terminal) reporter with colors and formatting

use super::FileReport;
use crate::models::{Finding, FindingsSummary, Severity};
use crate::report::{AnalysisResult, SecurityReport, ValidationReport};
use crate::scoring::security_score;
use anyhow::Result;

/// Severity colors
fn severity_color(severity: &Severity) -> &'static str {
    match severity {
        Severity::Critical => "\x1b[31m", // Red
        Severity::High => "\x1b[91m",     // Light red
        Severity::Medium => "\x1b[33m",   // Yellow
        Severity::Low => "\x1b[34m",      // Blue
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";

/// Severity tag
fn severity_tag(severity: &Severity) -> &'static str {
    match severity {
        Severity::Critical => "[C]",
        Severity::High => "[H]",
        Severity::Medium => "[M]",
        Severity::Low => "[L]",
    }
}

/// Render reports as formatted terminal output
pub fn render(reports: &[FileReport]) -> Result<String> {
    let mut out = String::new();
    for report in reports {
        out.push_str(&format!("\n{BOLD}{}{RESET}\n", report.file));
        out.push_str(&format!(
            "{DIM}──────────────────────────────────────{RESET}\n"
        ));
        match &report.result {
            AnalysisResult::Validation(r) => render_validation(&mut out, r),
            AnalysisResult::Security(r) => render_security(&mut out, r),
        }
    }
    Ok(out)
}

fn render_validation(out: &mut String, report: &ValidationReport) {
    let status = if report.valid {
        format!("{GREEN}{BOLD}VALID{RESET}")
    } else {
        format!("{RED}{BOLD}INVALID{RESET}")
    };
    out.push_str(&format!(
        "Contract: {status}  Confidence: {BOLD}{:.2}{RESET}  Errors: {}  Warnings: {}  {DIM}({} ms){RESET}\n\n",
        report.confidence,
        report.errors.len(),
        report.warnings.len(),
        report.processing_time_ms
    ));

    if !report.errors.is_empty() {
        out.push_str(&format!("{BOLD}ERRORS{RESET}\n"));
        render_findings(out, &report.errors);
    }
    if !report.warnings.is_empty() {
        out.push_str(&format!("{BOLD}WARNINGS{RESET}\n"));
        render_findings(out, &report.warnings);
    }
    out.push_str(&format!("{DIM}{}{RESET}\n", report.notes));
}

fn render_security(out: &mut String, report: &SecurityReport) {
    out.push_str(&format!(
        "Security score: {}  Confidence: {BOLD}{:.2}{RESET}  Rules: {}  {DIM}({} ms){RESET}\n",
        format_score(report.score),
        report.confidence,
        report.summary.rules_checked,
        report.processing_time_ms
    ));
    for line in security_score(&report.issues).explain().lines() {
        out.push_str(&format!("  {DIM}{}{RESET}\n", line));
    }
    out.push('\n');

    let fs = FindingsSummary::from_findings(&report.issues);
    out.push_str(&format!("{BOLD}ISSUES{RESET} ({} total)\n", fs.total));

    let summary_parts: Vec<String> = Severity::ALL
        .iter()
        .rev()
        .filter(|sev| fs.count(**sev) > 0)
        .map(|sev| {
            format!(
                "{}{} {}{RESET}",
                severity_color(sev),
                fs.count(*sev),
                sev.to_string().to_lowercase()
            )
        })
        .collect();
    if !summary_parts.is_empty() {
        out.push_str(&format!("  {}\n\n", summary_parts.join(" | ")));
    }

    render_findings(out, &report.issues);
    out.push_str(&format!("{DIM}{}{RESET}\n", report.notes));
}

fn render_findings(out: &mut String, findings: &[Finding]) {
    for finding in findings {
        let sev_c = severity_color(&finding.severity);
        out.push_str(&format!(
            "  {sev_c}{}{RESET} {BOLD}{}{RESET}  {}\n",
            severity_tag(&finding.severity),
            finding.rule_id,
            finding.message
        ));
        out.push_str(&format!("      {DIM}at {}{RESET}\n", finding.location));
        if !finding.recommendation.is_empty() {
            out.push_str(&format!("      {DIM}fix: {}{RESET}\n", finding.recommendation));
        }
    }
    out.push('\n');
}

fn format_score(score: u32) -> String {
    let color = if score >= 80 {
        "\x1b[32m"
    } else if score >= 60 {
        "\x1b[33m"
    } else {
        "\x1b[31m"
    };
    format!("{color}{BOLD}{}/100{RESET}", score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::{security_report, validation_report};

    #[test]
    fn test_validation_text() {
        let out = render(&[validation_report()]).unwrap();
        assert!(out.contains("api.yaml"));
        assert!(out.contains("INVALID"));
        assert!(out.contains("ERRORS"));
        assert!(out.contains("OAS-002"));
        assert!(out.contains("at paths./items.get.responses"));
        assert!(out.contains("fix: Define at least one response."));
    }

    #[test]
    fn test_security_text() {
        let out = render(&[security_report()]).unwrap();
        assert!(out.contains("80/100"));
        assert!(out.contains("ISSUES"));
        assert!(out.contains("1 critical"));
        assert!(out.contains("1 medium"));
        assert!(out.contains("1 x CRITICAL = -15"));
        assert!(out.contains("1 x MEDIUM = -5"));
        assert!(out.contains("OWASP"));
    }

    #[test]
    fn test_score_colors() {
        assert!(format_score(95).starts_with("\x1b[32m"));
        assert!(format_score(65).starts_with("\x1b[33m"));
        assert!(format_score(10).starts_with("\x1b[31m"));
    }
}
