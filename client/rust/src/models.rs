//! Request and response bodies for the loan transactions endpoints.
//!
//! Field names follow the JSON wire format (camelCase). Every request field
//! is optional; absent fields are omitted from the serialized body.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body of `POST /loans/{loanId}/transactions?command=...`.
///
/// One request type serves every loan transaction command (re-age, undo
/// re-age, repayment, ...); each command reads the subset it understands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostLoansLoanIdTransactionsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_amount: Option<Decimal>,

    // Re-aging terms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_installments: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub re_age_interest_handling: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grace_on_principal: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grace_on_interest: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reversal_external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest_refund_calculation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_id: Option<i64>,

    // Payment details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_type_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_number: Option<String>,
}

impl PostLoansLoanIdTransactionsRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = Some(date_format.into());
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn transaction_date(mut self, transaction_date: impl Into<String>) -> Self {
        self.transaction_date = Some(transaction_date.into());
        self
    }

    pub fn transaction_amount(mut self, amount: Decimal) -> Self {
        self.transaction_amount = Some(amount);
        self
    }

    pub fn frequency_number(mut self, frequency_number: i32) -> Self {
        self.frequency_number = Some(frequency_number);
        self
    }

    pub fn frequency_type(mut self, frequency_type: impl Into<String>) -> Self {
        self.frequency_type = Some(frequency_type.into());
        self
    }

    pub fn start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    pub fn number_of_installments(mut self, number_of_installments: i32) -> Self {
        self.number_of_installments = Some(number_of_installments);
        self
    }

    pub fn re_age_interest_handling(mut self, handling: impl Into<String>) -> Self {
        self.re_age_interest_handling = Some(handling.into());
        self
    }
}

/// Response to a loan transaction command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostLoansLoanIdTransactionsResponse {
    pub office_id: Option<i64>,
    pub client_id: Option<i64>,
    pub loan_id: Option<i64>,
    pub resource_id: Option<i64>,
    pub resource_external_id: Option<String>,
    pub changes: Option<serde_json::Value>,
}

/// Response to loan creation, as stored by earlier steps of a scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostLoansResponse {
    pub office_id: Option<i64>,
    pub client_id: Option<i64>,
    pub loan_id: Option<i64>,
    pub resource_id: Option<i64>,
    pub resource_external_id: Option<String>,
}
