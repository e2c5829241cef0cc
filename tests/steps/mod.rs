//! Step definitions for the feature tests.

pub mod field_mapping;
pub mod re_aging;

use cucumber::gherkin::Step;
use fineract_client::models::PostLoansLoanIdTransactionsRequest;
use serde_json::Value;

/// Data table rows of a step.
pub fn table_rows(step: &Step) -> Vec<Vec<String>> {
    step.table
        .as_ref()
        .map(|table| table.rows.clone())
        .expect("Expected data table")
}

/// A request field as it would be sent, rendered as text.
pub fn request_field(request: &PostLoansLoanIdTransactionsRequest, name: &str) -> Option<String> {
    let json = serde_json::to_value(request).expect("request serializes");
    match json.get(name)? {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
