//! Loan re-aging step definitions, wired to a mock transactions API.

use std::sync::Arc;
use std::time::Duration;

use cucumber::gherkin::Step;
use cucumber::{given, then, when, World};
use fineract_client::models::PostLoansLoanIdTransactionsResponse;
use fineract_client::ApiResponse;
use fineract_e2e::events::{EventAssertion, EventLog, ReceivedEvent};
use fineract_e2e::mapper::{FieldStatus, MappingReport};
use fineract_e2e::test_utils::{error_body, loan_created, LoanTarget, MockLoanTransactionsApi};
use fineract_e2e::{ReAgingSteps, StepError, TestContext, TestContextKey};

use super::{request_field, table_rows};

/// Test context for re-aging scenarios.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct ReAgingWorld {
    api: Arc<MockLoanTransactionsApi>,
    events: Arc<EventLog>,
    steps: ReAgingSteps,
    ctx: TestContext,
    loan_id: i64,
    report: Option<MappingReport>,
    last_error: Option<StepError>,
}

impl ReAgingWorld {
    fn new() -> Self {
        let api = Arc::new(MockLoanTransactionsApi::new());
        let events = Arc::new(EventLog::new());
        let assertion = EventAssertion::new(events.clone())
            .with_wait(Duration::from_millis(50))
            .with_poll_interval(Duration::from_millis(5));

        Self {
            steps: ReAgingSteps::new(api.clone(), assertion),
            api,
            events,
            ctx: TestContext::new(),
            loan_id: 0,
            report: None,
            last_error: None,
        }
    }

    fn stored(&self, key: TestContextKey) -> &ApiResponse<PostLoansLoanIdTransactionsResponse> {
        self.ctx
            .get(key)
            .unwrap_or_else(|| panic!("no {key} in scenario context"))
    }
}

// --- Given ---

#[given(expr = "a loan with id {int} and external id {string} has been created")]
async fn given_loan_created(world: &mut ReAgingWorld, loan_id: i64, external_id: String) {
    world.loan_id = loan_id;
    world
        .ctx
        .set(TestContextKey::LoanCreateResponse, loan_created(loan_id, external_id));
}

#[given(expr = "the platform rejects the next transaction with status {int}, message {string} and code {string}")]
async fn given_next_rejected(
    world: &mut ReAgingWorld,
    status: u16,
    message: String,
    code: String,
) {
    world
        .api
        .push_failure(status, error_body(status, &message, &code))
        .await;
}

#[when(expr = "a {string} business event was received for the loan")]
async fn given_event_received(world: &mut ReAgingWorld, event_type: String) {
    world.events.record(ReceivedEvent::new(
        event_type,
        world.loan_id,
        serde_json::json!({ "loanId": world.loan_id }),
    ));
}

// --- When ---

#[when("Admin creates a Loan re-aging transaction with the following data:")]
async fn when_create_re_aging(world: &mut ReAgingWorld, step: &Step) {
    let report = world
        .steps
        .create_re_aging_transaction(&mut world.ctx, &table_rows(step))
        .await
        .expect("re-aging succeeds");
    world.report = Some(report);
}

#[when("Admin attempts to create a Loan re-aging transaction with the following data:")]
async fn when_attempt_re_aging(world: &mut ReAgingWorld, step: &Step) {
    match world
        .steps
        .create_re_aging_transaction(&mut world.ctx, &table_rows(step))
        .await
    {
        Ok(report) => world.report = Some(report),
        Err(e) => world.last_error = Some(e),
    }
}

#[when("Admin creates a Loan re-aging transaction by Loan external ID with the following data:")]
async fn when_create_re_aging_by_external_id(world: &mut ReAgingWorld, step: &Step) {
    world
        .steps
        .create_re_aging_transaction_by_external_id(&mut world.ctx, &table_rows(step))
        .await
        .expect("re-aging by external id succeeds");
}

#[when("Admin successfully undo Loan re-aging transaction")]
async fn when_undo_re_aging(world: &mut ReAgingWorld) {
    world
        .steps
        .undo_re_aging_transaction(&mut world.ctx)
        .await
        .expect("undo re-aging succeeds");
}

#[when(expr = "Admin fails to create a Loan re-aging transaction with error {string} and with the following data:")]
async fn when_fails_with_error(world: &mut ReAgingWorld, expected: String, step: &Step) {
    world
        .steps
        .fails_to_create_re_aging_transaction_with_error(&mut world.ctx, &expected, &table_rows(step))
        .await
        .expect("re-aging rejected as expected");
}

// --- Then ---

#[then("Admin fails to create a Loan re-aging transaction with the following data because loan was charged-off:")]
async fn then_charged_off_failure(world: &mut ReAgingWorld, step: &Step) {
    world
        .steps
        .re_age_charged_off_loan_failure(&mut world.ctx, &table_rows(step))
        .await
        .expect("charged-off rejection");
}

#[then("Admin fails to create a Loan re-aging transaction with the following data because loan was contract terminated:")]
async fn then_contract_terminated_failure(world: &mut ReAgingWorld, step: &Step) {
    world
        .steps
        .re_age_contract_terminated_loan_failure(&mut world.ctx, &table_rows(step))
        .await
        .expect("contract-terminated rejection");
}

#[then("LoanReAgeBusinessEvent is created")]
async fn then_re_age_event_created(world: &mut ReAgingWorld) {
    world
        .steps
        .check_loan_re_age_business_event_created(&world.ctx)
        .await
        .expect("LoanReAgeBusinessEvent raised");
}

#[then("LoanUndoReAgeBusinessEvent is created")]
async fn then_undo_re_age_event_created(world: &mut ReAgingWorld) {
    world
        .steps
        .check_loan_undo_re_age_business_event_created(&world.ctx)
        .await
        .expect("LoanUndoReAgeBusinessEvent raised");
}

#[then("LoanReAgeBusinessEvent is not created")]
async fn then_re_age_event_not_created(world: &mut ReAgingWorld) {
    let result = world
        .steps
        .check_loan_re_age_business_event_created(&world.ctx)
        .await;
    assert!(matches!(result, Err(StepError::EventNotRaised { .. })));
}

#[then(expr = "the last {string} request targets the loan by {word}")]
async fn then_last_request_targets(world: &mut ReAgingWorld, command: String, by: String) {
    let call = world.api.last_call().await.expect("a transaction call");
    assert_eq!(call.command, command);
    match by.as_str() {
        "id" => assert_eq!(call.target, LoanTarget::Id(world.loan_id)),
        "external-id" => assert!(matches!(call.target, LoanTarget::ExternalId(_))),
        other => panic!("unknown target kind {other}"),
    }
}

#[then(expr = "the last request has {string} set to {string}")]
async fn then_last_request_field(world: &mut ReAgingWorld, field: String, expected: String) {
    let call = world.api.last_call().await.expect("a transaction call");
    assert_eq!(
        request_field(&call.request, &field).as_deref(),
        Some(expected.as_str()),
        "field {field}"
    );
}

#[then(expr = "the last request has no {string}")]
async fn then_last_request_lacks_field(world: &mut ReAgingWorld, field: String) {
    let call = world.api.last_call().await.expect("a transaction call");
    assert_eq!(request_field(&call.request, &field), None, "field {field}");
}

#[then(expr = "the additional column {string} was skipped")]
async fn then_column_skipped(world: &mut ReAgingWorld, column: String) {
    let report = world.report.as_ref().expect("a mapping report");
    assert!(
        matches!(report.status(&column), Some(FieldStatus::Skipped(_))),
        "column {column}: {:?}",
        report.status(&column)
    );
}

#[then("the re-aging response is stored")]
async fn then_re_aging_response_stored(world: &mut ReAgingWorld) {
    let response = world.stored(TestContextKey::LoanReagingResponse);
    assert!(response.is_successful());
}

#[then(expr = "the stored re-aging response has status {int}")]
async fn then_re_aging_response_status(world: &mut ReAgingWorld, status: u16) {
    assert_eq!(world.stored(TestContextKey::LoanReagingResponse).code(), status);
}

#[then("the undo re-aging response is stored")]
async fn then_undo_response_stored(world: &mut ReAgingWorld) {
    let response = world.stored(TestContextKey::LoanReagingUndoResponse);
    assert!(response.is_successful());
}

#[then("the step fails with a data table error")]
async fn then_step_fails_with_table_error(world: &mut ReAgingWorld) {
    let error = world.last_error.as_ref().expect("the step to fail");
    assert!(error.is_table_error(), "unexpected error: {error}");
}

#[then(expr = "{int} transaction call(s) were made")]
async fn then_call_count(world: &mut ReAgingWorld, count: usize) {
    assert_eq!(world.api.call_count().await, count);
}
