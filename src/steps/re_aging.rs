use std::sync::Arc;

use fineract_client::models::{
    PostLoansLoanIdTransactionsRequest, PostLoansLoanIdTransactionsResponse, PostLoansResponse,
};
use fineract_client::{ApiResponse, LoanTransactionsApi};
use regex::Regex;
use tracing::{info, warn};

use crate::context::{TestContext, TestContextKey};
use crate::error::{Result, StepError};
use crate::events::{BusinessEvent, EventAssertion, LoanReAgeEvent, LoanUndoReAgeEvent};
use crate::factory::{ReAgingTerms, RE_AGING_TERM_FIELDS};
use crate::helpers::{self, messages, ErrorResponse};
use crate::mapper::{apply_additional_fields, MappingReport};
use crate::table::{RowTable, ValueResolver};

pub const RE_AGE_COMMAND: &str = "reAge";
pub const UNDO_RE_AGE_COMMAND: &str = "undoReAge";

/// Status the platform uses for domain rule violations.
const FORBIDDEN: u16 = 403;

type TransactionResponse = ApiResponse<PostLoansLoanIdTransactionsResponse>;

/// Loan re-aging steps.
#[derive(Clone)]
pub struct ReAgingSteps {
    api: Arc<dyn LoanTransactionsApi>,
    events: EventAssertion,
}

impl ReAgingSteps {
    pub fn new(api: Arc<dyn LoanTransactionsApi>, events: EventAssertion) -> Self {
        Self { api, events }
    }

    /// "Admin creates a Loan re-aging transaction with the following data:"
    ///
    /// Terms are taken by header name, or by column position for tables
    /// without meaningful headers. Any other column is applied to the
    /// request by name; the returned report says what happened to each.
    pub async fn create_re_aging_transaction(
        &self,
        ctx: &mut TestContext,
        rows: &[Vec<String>],
    ) -> Result<MappingReport> {
        let loan_id = loan_id(ctx)?;
        let table = RowTable::from_rows(rows)?;
        let fields = table.field_map();

        let terms = ReAgingTerms::resolve(&ValueResolver::new(&fields, table.values()))?;
        let mut request = terms.to_request();
        let report = apply_additional_fields(&mut request, &fields, &RE_AGING_TERM_FIELDS);

        let response = self
            .api
            .execute_loan_transaction(loan_id, &request, RE_AGE_COMMAND)
            .await?;
        helpers::check_successful_api_call(&response)?;
        info!(
            loan_id,
            applied = report.applied().count(),
            skipped = report.skipped().count(),
            "Loan re-aged"
        );

        ctx.set(TestContextKey::LoanReagingResponse, response);
        Ok(report)
    }

    /// "Admin creates a Loan re-aging transaction by Loan external ID with the following data:"
    pub async fn create_re_aging_transaction_by_external_id(
        &self,
        ctx: &mut TestContext,
        rows: &[Vec<String>],
    ) -> Result<()> {
        let external_id = loan_external_id(ctx)?;
        let request = positional_request(rows)?;

        let response = self
            .api
            .execute_loan_transaction_by_external_id(&external_id, &request, RE_AGE_COMMAND)
            .await?;
        helpers::check_successful_api_call(&response)?;
        info!(loan_external_id = %external_id, "Loan re-aged by external id");

        ctx.set(TestContextKey::LoanReagingResponse, response);
        Ok(())
    }

    /// "Admin successfully undo Loan re-aging transaction"
    pub async fn undo_re_aging_transaction(&self, ctx: &mut TestContext) -> Result<()> {
        let loan_id = loan_id(ctx)?;

        let response = self
            .api
            .execute_loan_transaction(
                loan_id,
                &PostLoansLoanIdTransactionsRequest::new(),
                UNDO_RE_AGE_COMMAND,
            )
            .await?;
        helpers::check_successful_api_call(&response)?;
        info!(loan_id, "Loan re-aging undone");

        ctx.set(TestContextKey::LoanReagingUndoResponse, response);
        Ok(())
    }

    /// "LoanReAgeBusinessEvent is created"
    pub async fn check_loan_re_age_business_event_created(&self, ctx: &TestContext) -> Result<()> {
        self.check_event_created::<LoanReAgeEvent>(ctx).await
    }

    /// "LoanUndoReAgeBusinessEvent is created"
    pub async fn check_loan_undo_re_age_business_event_created(
        &self,
        ctx: &TestContext,
    ) -> Result<()> {
        self.check_event_created::<LoanUndoReAgeEvent>(ctx).await
    }

    /// "Admin fails to create a Loan re-aging transaction with error {string} and with the following data:"
    pub async fn fails_to_create_re_aging_transaction_with_error(
        &self,
        ctx: &mut TestContext,
        expected_error: &str,
        rows: &[Vec<String>],
    ) -> Result<()> {
        let loan_id = loan_id(ctx)?;
        let request = positional_request(rows)?;

        let response = self
            .api
            .execute_loan_transaction(loan_id, &request, RE_AGE_COMMAND)
            .await?;

        helpers::check_error_body_contains(&response, expected_error)?;
        helpers::check_failed_api_call(&response, FORBIDDEN)
    }

    /// "Admin fails to create a Loan re-aging transaction with the following data because loan was charged-off:"
    pub async fn re_age_charged_off_loan_failure(
        &self,
        ctx: &mut TestContext,
        rows: &[Vec<String>],
    ) -> Result<()> {
        self.expect_rejection(ctx, rows, messages::re_age_charged_off_loan_failure())
            .await
    }

    /// "Admin fails to create a Loan re-aging transaction with the following data because loan was contract terminated:"
    pub async fn re_age_contract_terminated_loan_failure(
        &self,
        ctx: &mut TestContext,
        rows: &[Vec<String>],
    ) -> Result<()> {
        self.expect_rejection(ctx, rows, messages::re_age_contract_terminated_loan_failure())
            .await
    }

    async fn check_event_created<E: BusinessEvent>(&self, ctx: &TestContext) -> Result<()> {
        let loan_id = loan_id(ctx)?;
        self.events.assert_event_raised::<E>(loan_id).await?;
        Ok(())
    }

    // Stored even when the assertions below fail.
    async fn expect_rejection(
        &self,
        ctx: &mut TestContext,
        rows: &[Vec<String>],
        developer_message: &Regex,
    ) -> Result<()> {
        let loan_id = loan_id(ctx)?;
        let request = positional_request(rows)?;

        let response: TransactionResponse = self
            .api
            .execute_loan_transaction(loan_id, &request, RE_AGE_COMMAND)
            .await?;
        let error = ErrorResponse::from_response(&response);
        ctx.set(TestContextKey::LoanReagingResponse, response);
        let error = error?;

        if error.status() != Some(FORBIDDEN) {
            return Err(StepError::assertion(format!(
                "{}: expected {}, got {:?}",
                messages::STATUS_CODE_MISMATCH,
                FORBIDDEN,
                error.status()
            )));
        }

        let message = error.single_error()?.developer_message();
        if !developer_message.is_match(message) {
            warn!(loan_id, developer_message = message, "Unexpected re-age rejection message");
            return Err(StepError::assertion(format!(
                "developer message '{}' does not match '{}'",
                message,
                developer_message.as_str()
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ReAgingSteps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReAgingSteps")
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

fn created_loan(ctx: &TestContext) -> Result<&PostLoansResponse> {
    ctx.require::<ApiResponse<PostLoansResponse>>(TestContextKey::LoanCreateResponse)?
        .body()
        .ok_or_else(|| StepError::UnexpectedResponse("loan creation response has no body".into()))
}

fn loan_id(ctx: &TestContext) -> Result<i64> {
    created_loan(ctx)?
        .loan_id
        .ok_or_else(|| StepError::UnexpectedResponse("loan creation response has no loanId".into()))
}

fn loan_external_id(ctx: &TestContext) -> Result<String> {
    created_loan(ctx)?
        .resource_external_id
        .clone()
        .ok_or_else(|| {
            StepError::UnexpectedResponse(
                "loan creation response has no resourceExternalId".into(),
            )
        })
}

/// Request from a fixed-column table: only the values row is read.
fn positional_request(rows: &[Vec<String>]) -> Result<PostLoansLoanIdTransactionsRequest> {
    let table = RowTable::from_rows(rows)?;
    let terms = ReAgingTerms::resolve(&ValueResolver::positional(table.values()))?;
    Ok(terms.to_request())
}
