//! Property-based tests for scoring and engine totality

use oasgov::models::{Finding, FindingLevel, Severity};
use oasgov::scoring::{contract_confidence, contract_score, security_score};
use oasgov::GovernanceEngine;
use proptest::prelude::*;
use serde_json::{json, Value};
use std::time::Instant;

fn severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Low),
        Just(Severity::Medium),
        Just(Severity::High),
        Just(Severity::Critical),
    ]
}

fn finding(severity: Severity, error: bool) -> Finding {
    let level = if error { FindingLevel::Error } else { FindingLevel::Warning };
    Finding::new("X-001", severity, level, "Test", "message", "root")
}

/// Arbitrary JSON, biased toward the keys rules look at
fn document() -> impl Strategy<Value = Value> {
    let key = prop_oneof![
        Just("paths".to_string()),
        Just("components".to_string()),
        Just("schemas".to_string()),
        Just("security".to_string()),
        Just("responses".to_string()),
        Just("properties".to_string()),
        Just("/items/{id}".to_string()),
        Just("get".to_string()),
        Just("delete".to_string()),
        "[a-z]{1,6}",
    ];
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,8}".prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 48, 6, move |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec((key.clone(), inner), 0..5)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn test_security_score_bounds(sevs in prop::collection::vec(severity(), 0..40)) {
        let findings: Vec<_> = sevs.iter().map(|s| finding(*s, false)).collect();
        let score = security_score(&findings);
        prop_assert!(score.score <= 100);
        prop_assert!(score.confidence >= 0.40 && score.confidence <= 0.98);
        prop_assert_eq!(score.by_severity.total, findings.len());
    }

    #[test]
    fn test_security_score_never_rises(
        sevs in prop::collection::vec(severity(), 0..20),
        extra in severity(),
    ) {
        let mut findings: Vec<_> = sevs.iter().map(|s| finding(*s, false)).collect();
        let before = security_score(&findings);
        findings.push(finding(extra, false));
        let after = security_score(&findings);
        prop_assert!(after.score <= before.score);
        prop_assert!(after.confidence <= before.confidence);
    }

    #[test]
    fn test_contract_confidence_bounds(errors in 0usize..50, warnings in 0usize..50) {
        let c = contract_confidence(errors, warnings);
        prop_assert!((0.40..=0.95).contains(&c));
        prop_assert!(contract_confidence(errors + 1, warnings) <= c);
        prop_assert!(contract_confidence(errors, warnings + 1) <= c);
    }

    #[test]
    fn test_validity_tracks_errors(levels in prop::collection::vec(any::<bool>(), 0..20)) {
        let findings: Vec<_> = levels.iter().map(|e| finding(Severity::Low, *e)).collect();
        let score = contract_score(&findings);
        prop_assert_eq!(score.valid, !levels.iter().any(|e| *e));
        prop_assert_eq!(score.error_count + score.warning_count, findings.len());
    }

    #[test]
    fn test_engine_is_total(raw in document()) {
        let engine = GovernanceEngine::new();
        let security = engine.analyze_security(&raw, Instant::now());
        prop_assert!(security.score <= 100);
        prop_assert_eq!(security.summary.issues_found, security.issues.len());

        let contract = engine.validate(&raw, Instant::now());
        prop_assert!((0.40..=0.95).contains(&contract.confidence));
        prop_assert_eq!(contract.valid, contract.errors.is_empty());
    }
}

#[test]
fn test_object_root_without_security_always_fires_global_rule() {
    let report = GovernanceEngine::new().analyze_security(&json!({"paths": {}}), Instant::now());
    assert!(report.issues.iter().any(|f| f.rule_id == "SEC-001"));
}
