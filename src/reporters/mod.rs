//! Output reporters for oasgov analysis results
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors
//! - `json` - Service-style JSON envelopes, one per analyzed file
//! - `sarif` - SARIF 2.1.0 for GitHub Code Scanning / VS Code

mod json;
mod sarif;
mod text;

use crate::report::AnalysisResult;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Sarif,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, sarif",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Sarif => write!(f, "sarif"),
        }
    }
}

/// Analysis outcome for one input file
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Path as given on the command line
    pub file: String,
    pub result: AnalysisResult,
}

impl FileReport {
    pub fn new(file: impl Into<String>, result: impl Into<AnalysisResult>) -> Self {
        Self {
            file: file.into(),
            result: result.into(),
        }
    }
}

/// Render reports using an OutputFormat enum
pub fn report_with_format(reports: &[FileReport], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(reports),
        OutputFormat::Json => json::render(reports),
        OutputFormat::Sarif => sarif::render(reports),
    }
}
