//! Client traits for loan transaction operations.
//!
//! Step definitions depend on these traits rather than on the HTTP client,
//! so scenarios can run against a recording mock as well as a live server.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{PostLoansLoanIdTransactionsRequest, PostLoansLoanIdTransactionsResponse};
use crate::response::ApiResponse;

/// Trait for the loan transactions API.
///
/// Implement this trait to create mock clients for testing or
/// alternative transport implementations.
#[async_trait]
pub trait LoanTransactionsApi: Send + Sync {
    /// Execute a transaction command (e.g. `reAge`) against a loan by id.
    async fn execute_loan_transaction(
        &self,
        loan_id: i64,
        request: &PostLoansLoanIdTransactionsRequest,
        command: &str,
    ) -> Result<ApiResponse<PostLoansLoanIdTransactionsResponse>>;

    /// Execute a transaction command against a loan by its external id.
    async fn execute_loan_transaction_by_external_id(
        &self,
        loan_external_id: &str,
        request: &PostLoansLoanIdTransactionsRequest,
        command: &str,
    ) -> Result<ApiResponse<PostLoansLoanIdTransactionsResponse>>;
}
