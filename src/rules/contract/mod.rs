//! Contract catalog: structural linting of an OpenAPI document
//!
//! These rules feed the contract-confidence score. Only `missing-responses`
//! produces blocking errors; everything else is advisory.

mod authentication;
mod operation_id;
mod responses;
mod schema_example;

pub use authentication::{AuthErrorResponsesRule, MissingAuthenticationRule};
pub use operation_id::{OperationIdCaseRule, OperationIdMissingRule};
pub use responses::{MissingResponsesRule, StatusCodeRule};
pub use schema_example::SchemaExampleRule;

use crate::rules::base::Rule;
use std::sync::Arc;

/// All contract rules in registration (and output) order
pub fn all_rules() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(SchemaExampleRule),
        Arc::new(MissingResponsesRule),
        Arc::new(MissingAuthenticationRule),
        Arc::new(AuthErrorResponsesRule),
        Arc::new(OperationIdMissingRule),
        Arc::new(OperationIdCaseRule),
        Arc::new(StatusCodeRule),
    ]
}
