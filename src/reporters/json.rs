//! JSON reporter
//!
//! Wraps each result in the envelope the governance services answer with:
//! `{status, service, file, result, meta}`. A single input yields a single
//! envelope; several inputs yield an array of envelopes.

use super::FileReport;
use crate::report::AnalysisResult;
use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

/// Envelope format version
const ENVELOPE_VERSION: &str = "1.0";

#[derive(Serialize)]
struct Envelope<'a> {
    status: &'static str,
    service: &'static str,
    file: &'a str,
    result: &'a AnalysisResult,
    meta: Meta,
}

#[derive(Serialize)]
struct Meta {
    version: &'static str,
    processing_time_ms: u64,
    generated_at: String,
}

fn service_name(result: &AnalysisResult) -> &'static str {
    match result {
        AnalysisResult::Validation(_) => "openapi-validator",
        AnalysisResult::Security(_) => "security-analyzer",
    }
}

fn envelope<'a>(report: &'a FileReport, generated_at: &str) -> Envelope<'a> {
    Envelope {
        status: if report.result.is_syntax_failure() {
            "error"
        } else {
            "success"
        },
        service: service_name(&report.result),
        file: &report.file,
        result: &report.result,
        meta: Meta {
            version: ENVELOPE_VERSION,
            processing_time_ms: report.result.processing_time_ms(),
            generated_at: generated_at.to_string(),
        },
    }
}

/// Render reports as pretty-printed JSON
pub fn render(reports: &[FileReport]) -> Result<String> {
    let generated_at = Utc::now().to_rfc3339();
    let envelopes: Vec<Envelope<'_>> = reports.iter().map(|r| envelope(r, &generated_at)).collect();

    let json = match envelopes.as_slice() {
        [single] => serde_json::to_string_pretty(single)?,
        many => serde_json::to_string_pretty(many)?,
    };
    Ok(json)
}
