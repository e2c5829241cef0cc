//! Step failure type.
//!
//! Only mandatory input and API outcomes fail a step. Optional table
//! columns are reported through [`crate::mapper::MappingReport`] instead.

use fineract_client::ClientError;

use crate::context::TestContextKey;
use crate::table::TableError;

/// Why a step failed.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("data table: {0}")]
    Table(#[from] TableError),

    #[error("client: {0}")]
    Client(#[from] ClientError),

    #[error("scenario context has no value for {0}")]
    MissingContext(TestContextKey),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("assertion failed: {0}")]
    Assertion(String),

    #[error("{event} was not raised for aggregate {aggregate_id}")]
    EventNotRaised { event: &'static str, aggregate_id: i64 },

    #[error("invalid error body: {0}")]
    InvalidErrorBody(String),
}

impl StepError {
    pub fn assertion(message: impl Into<String>) -> Self {
        StepError::Assertion(message.into())
    }

    /// True when the failure came from the data table rather than the API.
    pub fn is_table_error(&self) -> bool {
        matches!(self, StepError::Table(_))
    }
}

/// Result type for step operations.
pub type Result<T> = std::result::Result<T, StepError>;
