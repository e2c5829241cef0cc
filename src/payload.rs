//! Field registries for the API request payloads.
//!
//! Names are the JSON (camelCase) field names, so feature-file headers
//! match the request body one to one.

use std::sync::LazyLock;

use fineract_client::models::PostLoansLoanIdTransactionsRequest;
use rust_decimal::Decimal;

use crate::mapper::{FieldRegistry, Settable};

type TransactionRequest = PostLoansLoanIdTransactionsRequest;

static TRANSACTION_REQUEST_FIELDS: LazyLock<FieldRegistry<TransactionRequest>> =
    LazyLock::new(|| {
        FieldRegistry::new("PostLoansLoanIdTransactionsRequest")
            .field("dateFormat", |r: &mut TransactionRequest, v: String| {
                r.date_format = Some(v)
            })
            .field("locale", |r: &mut TransactionRequest, v: String| {
                r.locale = Some(v)
            })
            .field("externalId", |r: &mut TransactionRequest, v: String| {
                r.external_id = Some(v)
            })
            .field("note", |r: &mut TransactionRequest, v: String| {
                r.note = Some(v)
            })
            .field("transactionDate", |r: &mut TransactionRequest, v: String| {
                r.transaction_date = Some(v)
            })
            .field("transactionAmount", |r: &mut TransactionRequest, v: Decimal| {
                r.transaction_amount = Some(v)
            })
            // Re-aging terms
            .field("frequencyNumber", |r: &mut TransactionRequest, v: i32| {
                r.frequency_number = Some(v)
            })
            .field("frequencyType", |r: &mut TransactionRequest, v: String| {
                r.frequency_type = Some(v)
            })
            .field("startDate", |r: &mut TransactionRequest, v: String| {
                r.start_date = Some(v)
            })
            .field("numberOfInstallments", |r: &mut TransactionRequest, v: i32| {
                r.number_of_installments = Some(v)
            })
            .field("reAgeInterestHandling", |r: &mut TransactionRequest, v: String| {
                r.re_age_interest_handling = Some(v)
            })
            .field("graceOnPrincipal", |r: &mut TransactionRequest, v: i32| {
                r.grace_on_principal = Some(v)
            })
            .field("graceOnInterest", |r: &mut TransactionRequest, v: i32| {
                r.grace_on_interest = Some(v)
            })
            .field("reversalExternalId", |r: &mut TransactionRequest, v: String| {
                r.reversal_external_id = Some(v)
            })
            .field("interestRefundCalculation", |r: &mut TransactionRequest, v: bool| {
                r.interest_refund_calculation = Some(v)
            })
            .field("classificationId", |r: &mut TransactionRequest, v: i64| {
                r.classification_id = Some(v)
            })
            // Payment details
            .field("paymentTypeId", |r: &mut TransactionRequest, v: i64| {
                r.payment_type_id = Some(v)
            })
            .field("accountNumber", |r: &mut TransactionRequest, v: String| {
                r.account_number = Some(v)
            })
            .field("checkNumber", |r: &mut TransactionRequest, v: String| {
                r.check_number = Some(v)
            })
            .field("routingCode", |r: &mut TransactionRequest, v: String| {
                r.routing_code = Some(v)
            })
            .field("receiptNumber", |r: &mut TransactionRequest, v: String| {
                r.receipt_number = Some(v)
            })
            .field("bankNumber", |r: &mut TransactionRequest, v: String| {
                r.bank_number = Some(v)
            })
    });

impl Settable for PostLoansLoanIdTransactionsRequest {
    fn registry() -> &'static FieldRegistry<Self> {
        &TRANSACTION_REQUEST_FIELDS
    }
}
