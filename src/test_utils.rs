//! Test utilities and mock implementations.
//!
//! Provides an in-memory [`LoanTransactionsApi`] for driving step handlers
//! without a running platform.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use fineract_client::models::{
    PostLoansLoanIdTransactionsRequest, PostLoansLoanIdTransactionsResponse, PostLoansResponse,
};
use fineract_client::{ApiResponse, ClientError, LoanTransactionsApi, Result as ClientResult};
use tokio::sync::RwLock;

type TransactionResponse = ApiResponse<PostLoansLoanIdTransactionsResponse>;

/// How a call addressed its loan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoanTarget {
    Id(i64),
    ExternalId(String),
}

/// One call received by [`MockLoanTransactionsApi`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub target: LoanTarget,
    pub command: String,
    pub request: PostLoansLoanIdTransactionsRequest,
}

/// Mock transactions API that records requests and replays queued responses.
///
/// With nothing queued, every call succeeds with a fresh resource id.
#[derive(Debug)]
pub struct MockLoanTransactionsApi {
    calls: RwLock<Vec<RecordedCall>>,
    responses: RwLock<VecDeque<TransactionResponse>>,
    fail_with_connection_error: RwLock<bool>,
    next_resource_id: AtomicI64,
}

impl Default for MockLoanTransactionsApi {
    fn default() -> Self {
        Self {
            calls: RwLock::new(Vec::new()),
            responses: RwLock::new(VecDeque::new()),
            fail_with_connection_error: RwLock::new(false),
            next_resource_id: AtomicI64::new(1),
        }
    }
}

impl MockLoanTransactionsApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the response for the next call.
    pub async fn push_response(&self, response: TransactionResponse) {
        self.responses.write().await.push_back(response);
    }

    /// Queue a rejection with the given status and raw body.
    pub async fn push_failure(&self, status: u16, body: impl Into<String>) {
        self.push_response(ApiResponse::failure(status, body)).await;
    }

    pub async fn set_fail_with_connection_error(&self, fail: bool) {
        *self.fail_with_connection_error.write().await = fail;
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    pub async fn last_call(&self) -> Option<RecordedCall> {
        self.calls.read().await.last().cloned()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    async fn respond(
        &self,
        target: LoanTarget,
        request: &PostLoansLoanIdTransactionsRequest,
        command: &str,
    ) -> ClientResult<TransactionResponse> {
        if *self.fail_with_connection_error.read().await {
            return Err(ClientError::Connection("mock connection refused".to_string()));
        }

        let loan_id = match &target {
            LoanTarget::Id(id) => Some(*id),
            LoanTarget::ExternalId(_) => None,
        };
        self.calls.write().await.push(RecordedCall {
            target,
            command: command.to_string(),
            request: request.clone(),
        });

        if let Some(queued) = self.responses.write().await.pop_front() {
            return Ok(queued);
        }

        let resource_id = self.next_resource_id.fetch_add(1, Ordering::SeqCst);
        Ok(ApiResponse::success(
            200,
            PostLoansLoanIdTransactionsResponse {
                loan_id,
                resource_id: Some(resource_id),
                resource_external_id: request.external_id.clone(),
                ..Default::default()
            },
        ))
    }
}

#[async_trait]
impl LoanTransactionsApi for MockLoanTransactionsApi {
    async fn execute_loan_transaction(
        &self,
        loan_id: i64,
        request: &PostLoansLoanIdTransactionsRequest,
        command: &str,
    ) -> ClientResult<TransactionResponse> {
        self.respond(LoanTarget::Id(loan_id), request, command).await
    }

    async fn execute_loan_transaction_by_external_id(
        &self,
        loan_external_id: &str,
        request: &PostLoansLoanIdTransactionsRequest,
        command: &str,
    ) -> ClientResult<TransactionResponse> {
        self.respond(
            LoanTarget::ExternalId(loan_external_id.to_string()),
            request,
            command,
        )
        .await
    }
}

/// A successful loan creation response, as earlier steps would store it.
pub fn loan_created(loan_id: i64, external_id: impl Into<String>) -> ApiResponse<PostLoansResponse> {
    ApiResponse::success(
        200,
        PostLoansResponse {
            loan_id: Some(loan_id),
            resource_id: Some(loan_id),
            resource_external_id: Some(external_id.into()),
            ..Default::default()
        },
    )
}

/// Platform error document with a single nested error.
pub fn error_body(status: u16, developer_message: &str, code: &str) -> String {
    serde_json::json!({
        "developerMessage": "Request was understood but caused a domain rule violation.",
        "httpStatusCode": status.to_string(),
        "defaultUserMessage": "Errors contain reason for domain rule violation.",
        "userMessageGlobalisationCode": "validation.msg.domain.rule.violation",
        "errors": [{
            "developerMessage": developer_message,
            "defaultUserMessage": developer_message,
            "userMessageGlobalisationCode": code,
            "parameterName": "id"
        }]
    })
    .to_string()
}
