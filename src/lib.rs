//! oasgov - static governance for OpenAPI 3.0 documents
//!
//! Two analyses run over a parsed document:
//! - contract linting ([`GovernanceEngine::validate`]), behind a structural
//!   syntax gate, scored by contract confidence
//! - security risk scoring ([`GovernanceEngine::analyze_security`]) modeled
//!   on the OWASP API Security Top 10
//!
//! ```ignore
//! use oasgov::{loader, GovernanceEngine};
//! use std::time::Instant;
//!
//! let raw = loader::parse_document("openapi: 3.0.3\ninfo: {title: t, version: '1'}\npaths: {}\n")?;
//! let report = GovernanceEngine::new().analyze_security(&raw, Instant::now());
//! println!("score {}", report.score);
//! ```

pub mod cli;
pub mod config;
pub mod document;
pub mod engine;
pub mod gate;
pub mod loader;
pub mod models;
pub mod report;
pub mod reporters;
pub mod rules;
pub mod scoring;

pub use engine::GovernanceEngine;
pub use models::{Finding, FindingLevel, Severity};
pub use report::{AnalysisResult, SecurityReport, ValidationReport};
