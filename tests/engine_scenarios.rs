//! End-to-end engine tests over fixture documents
//!
//! Each test loads a document the way the CLI does and checks the assembled
//! report: which rules fired, where, and how the result was scored.

use oasgov::loader::{load_file, parse_document};
use oasgov::{FindingLevel, GovernanceEngine, Severity};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

fn fixture(name: &str) -> serde_json::Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    load_file(&path).unwrap_or_else(|e| panic!("fixture {name}: {e}"))
}

fn rule_ids(findings: &[oasgov::Finding]) -> Vec<&str> {
    findings.iter().map(|f| f.rule_id.as_str()).collect()
}

#[test]
fn empty_document_scores_eighty() {
    let report = GovernanceEngine::new().analyze_security(&json!({}), Instant::now());

    assert_eq!(rule_ids(&report.issues), vec!["SEC-001", "SEC-007"]);
    assert_eq!(report.issues[0].severity, Severity::Critical);
    assert_eq!(report.issues[0].location, "security");
    assert_eq!(report.score, 80);
    assert_eq!(report.confidence, 0.8);
    assert_eq!(report.summary.issues_found, 2);
}

#[test]
fn unsecured_delete_by_id_reports_every_angle() {
    let report =
        GovernanceEngine::new().analyze_security(&fixture("insecure.json"), Instant::now());

    assert_eq!(
        rule_ids(&report.issues),
        vec!["SEC-001", "SEC-002", "SEC-003", "SEC-004", "SEC-007"]
    );
    for issue in &report.issues[1..4] {
        assert_eq!(issue.location, "paths./users/{id}.delete");
    }
    assert_eq!(report.issues[2].message, "DELETE endpoint without authorization: /users/{id}");
    // 100 - (15 + 10 + 15 + 15 + 5)
    assert_eq!(report.score, 40);
    assert_eq!(report.confidence, 0.4);
}

#[test]
fn unsecured_delete_is_still_a_valid_contract() {
    let report = GovernanceEngine::new().validate(&fixture("insecure.json"), Instant::now());

    assert!(report.valid);
    assert!(report.errors.is_empty());
    assert_eq!(rule_ids(&report.warnings), vec!["OAS-003"]);
    assert_eq!(report.confidence, 0.92);
}

#[test]
fn sensitive_schema_is_reported_once_per_catalog() {
    let raw = fixture("incomplete.yaml");
    let engine = GovernanceEngine::new();

    let security = engine.analyze_security(&raw, Instant::now());
    let exposure: Vec<_> = security.issues.iter().filter(|f| f.rule_id == "SEC-005").collect();
    assert_eq!(exposure.len(), 1);
    assert_eq!(exposure[0].location, "components.schemas.User");
    assert_eq!(exposure[0].message, "Schema 'User' exposes sensitive field 'password'");
    assert!(security.issues.iter().any(|f| f.rule_id == "SEC-006"));

    let contract = engine.validate(&raw, Instant::now());
    let examples: Vec<_> = contract.warnings.iter().filter(|f| f.rule_id == "OAS-001").collect();
    assert_eq!(examples.len(), 1);
    assert_eq!(examples[0].location, "components.schemas.User");
}

#[test]
fn missing_responses_invalidates_the_contract() {
    let report = GovernanceEngine::new().validate(&fixture("incomplete.yaml"), Instant::now());

    assert!(!report.valid);
    assert_eq!(rule_ids(&report.errors), vec!["OAS-002"]);
    assert_eq!(report.errors[0].message, "GET /accounts has no responses defined");
    assert_eq!(report.errors[0].level, FindingLevel::Error);
    assert_eq!(
        rule_ids(&report.warnings),
        vec!["OAS-001", "OAS-003", "OAS-003", "OAS-005", "OAS-006", "OAS-007"]
    );
    // 0.95 - (0.10 + 6 * 0.03)
    assert_eq!(report.confidence, 0.67);
}

#[test]
fn incomplete_document_security_score() {
    let report =
        GovernanceEngine::new().analyze_security(&fixture("incomplete.yaml"), Instant::now());

    assert_eq!(
        rule_ids(&report.issues),
        vec!["SEC-001", "SEC-002", "SEC-002", "SEC-004", "SEC-005", "SEC-006", "SEC-007"]
    );
    assert_eq!(report.score, 30);
    assert_eq!(report.confidence, 0.4);
}

#[test]
fn well_governed_document_is_clean() {
    let raw = fixture("secure.yaml");
    let engine = GovernanceEngine::new();

    let contract = engine.validate(&raw, Instant::now());
    assert!(contract.valid);
    assert!(contract.errors.is_empty(), "{:?}", contract.errors);
    assert!(contract.warnings.is_empty(), "{:?}", contract.warnings);
    assert_eq!(contract.confidence, 0.95);

    let security = engine.analyze_security(&raw, Instant::now());
    assert!(security.issues.is_empty(), "{:?}", security.issues);
    assert_eq!(security.score, 100);
    assert_eq!(security.confidence, 0.98);
}

#[test]
fn non_openapi_document_fails_the_gate() {
    let raw = fixture("not_openapi.yaml");
    let engine = GovernanceEngine::new();

    let contract = engine.validate(&raw, Instant::now());
    assert!(!contract.valid);
    assert!(contract.is_syntax_failure());
    assert_eq!(contract.errors.len(), 1);
    assert_eq!(contract.errors[0].rule_id, "OAS-000");
    assert_eq!(contract.errors[0].location, "spec");
    assert!(contract.errors[0].message.contains("'openapi' is a required property"));
    assert!(contract.errors[0].message.contains("'paths' must be a mapping"));
    assert!(contract.warnings.is_empty());
    assert_eq!(contract.confidence, 0.4);

    // The security run still scores a malformed document; 'paths' cannot be
    // iterated, so only document-level rules contribute.
    let security = engine.analyze_security(&raw, Instant::now());
    assert_eq!(rule_ids(&security.issues), vec!["SEC-001", "SEC-007"]);
}

#[test]
fn repeated_runs_are_identical() {
    let raw = fixture("incomplete.yaml");
    let engine = GovernanceEngine::new();

    let first = engine.analyze_security(&raw, Instant::now());
    let second = engine.analyze_security(&raw, Instant::now());
    let strip = |r: &oasgov::SecurityReport| {
        let mut r = r.clone();
        r.processing_time_ms = 0;
        r
    };
    assert_eq!(strip(&first), strip(&second));

    let ids: Vec<_> = first.issues.iter().map(|f| f.id.clone()).collect();
    let again: Vec<_> = second.issues.iter().map(|f| f.id.clone()).collect();
    assert_eq!(ids, again);
}

#[test]
fn json_and_yaml_spellings_agree() {
    let yaml = parse_document(
        "openapi: 3.0.3\ninfo: {title: T, version: '1'}\npaths:\n  /a:\n    get:\n      responses:\n        200: {description: ok}\n",
    )
    .unwrap();
    let json = parse_document(
        r#"{"openapi": "3.0.3", "info": {"title": "T", "version": "1"},
            "paths": {"/a": {"get": {"responses": {"200": {"description": "ok"}}}}}}"#,
    )
    .unwrap();
    assert_eq!(yaml, json);

    let engine = GovernanceEngine::new();
    assert_eq!(
        engine.validate(&yaml, Instant::now()).warnings,
        engine.validate(&json, Instant::now()).warnings
    );
}

#[test]
fn one_engine_serves_parallel_callers() {
    let engine = Arc::new(GovernanceEngine::new());
    let raw = Arc::new(fixture("insecure.json"));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let raw = Arc::clone(&raw);
            std::thread::spawn(move || engine.analyze_security(&raw, Instant::now()).score)
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 40);
    }
}

#[test]
fn malformed_schemas_only_silence_schema_rules() {
    let mut raw = fixture("incomplete.yaml");
    let engine = GovernanceEngine::new();
    let before = engine.analyze_security(&raw, Instant::now());

    raw["components"]["schemas"] = json!(["not", "a", "mapping"]);
    let after = engine.analyze_security(&raw, Instant::now());

    let without_schema_rules: Vec<_> = before
        .issues
        .iter()
        .filter(|f| f.rule_id != "SEC-005" && f.rule_id != "SEC-006")
        .cloned()
        .collect();
    assert_eq!(after.issues, without_schema_rules);
}

#[test]
fn security_list_of_names_does_not_secure_anything() {
    let raw = json!({"security": ["bearer"], "paths": {"/items/{id}": {"delete": {}}}});
    let report = GovernanceEngine::new().analyze_security(&raw, Instant::now());

    assert_eq!(
        rule_ids(&report.issues),
        vec!["SEC-001", "SEC-002", "SEC-003", "SEC-004", "SEC-007"]
    );
    assert_eq!(report.score, 40);
}
