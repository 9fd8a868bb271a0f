//! Unrestricted resource consumption

use crate::document::{location, OpenApiDocument};
use crate::models::{Finding, Severity};
use crate::rules::base::Rule;
use anyhow::Result;

/// SEC-007: no recognized rate-limit extension at the document root
pub struct RateLimitRule {
    markers: Vec<String>,
}

impl RateLimitRule {
    pub fn new<S: AsRef<str>>(markers: &[S]) -> Self {
        let mut normalized: Vec<String> = Vec::with_capacity(markers.len());
        for marker in markers {
            let marker = marker.as_ref().trim().to_ascii_lowercase();
            if !marker.is_empty() && !normalized.contains(&marker) {
                normalized.push(marker);
            }
        }
        Self { markers: normalized }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }
}

impl Rule for RateLimitRule {
    fn id(&self) -> &'static str {
        "SEC-007"
    }

    fn name(&self) -> &'static str {
        "rate-limit-absent"
    }

    fn description(&self) -> &'static str {
        "The document should declare a rate-limiting policy extension"
    }

    fn category(&self) -> &'static str {
        "Unrestricted Resource Consumption"
    }

    fn severity(&self) -> Severity {
        Severity::Medium
    }

    fn evaluate(&self, doc: &OpenApiDocument<'_>) -> Result<Vec<Finding>> {
        if doc.has_any_extension(&self.markers) {
            return Ok(Vec::new());
        }
        Ok(vec![self
            .finding("No rate limiting policy declared", location::root("root"))
            .with_rationale("APIs without rate limits are easy to overload or brute-force.")
            .with_impact("A single client can exhaust capacity or enumerate credentials.")
            .with_recommendation(format!(
                "Declare a rate-limit extension at the document root (one of: {}).",
                self.markers.join(", ")
            ))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rule() -> RateLimitRule {
        RateLimitRule::new(&["x-rate-limit", "x-ratelimit", "x-rate-limiting", "x-throttling"])
    }

    #[test]
    fn test_missing_marker_fires_once() {
        let raw = json!({});
        let findings = rule().evaluate(&OpenApiDocument::new(&raw)).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Medium);
        assert_eq!(findings[0].location, "root");
    }

    #[test]
    fn test_marker_case_is_ignored() {
        let raw = json!({"X-RateLimit": {"requests": 100, "window": "1m"}});
        assert!(rule().evaluate(&OpenApiDocument::new(&raw)).unwrap().is_empty());
    }

    #[test]
    fn test_extra_markers() {
        let rule = RateLimitRule::new(&["x-quota", "X-QUOTA"]);
        assert_eq!(rule.markers(), &["x-quota".to_string()]);
        let raw = json!({"x-quota": true});
        assert!(rule.evaluate(&OpenApiDocument::new(&raw)).unwrap().is_empty());
    }
}
