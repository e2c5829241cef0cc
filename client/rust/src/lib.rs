//! Typed Rust client for the Fineract loan transactions API.
//!
//! This crate provides the request/response models, the
//! [`LoanTransactionsApi`] trait that step definitions depend on, and a
//! reqwest-backed implementation of it.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use fineract_client::{ClientConfig, LoanTransactionsApi, LoanTransactionsClient};
//! use fineract_client::models::PostLoansLoanIdTransactionsRequest;
//!
//! async fn example() -> fineract_client::Result<()> {
//!     let client = LoanTransactionsClient::new(
//!         ClientConfig::default()
//!             .with_base_url("https://localhost:8443/fineract-provider/api/v1")
//!             .with_credentials("mifos", "password"),
//!     )?;
//!
//!     let request = PostLoansLoanIdTransactionsRequest::new()
//!         .frequency_number(1)
//!         .frequency_type("MONTHS")
//!         .start_date("01 March 2024")
//!         .number_of_installments(6);
//!
//!     let response = client.execute_loan_transaction(42, &request, "reAge").await?;
//!     assert!(response.is_successful());
//!     Ok(())
//! }
//! ```
//!
//! # Mocking for Tests
//!
//! Implement [`LoanTransactionsApi`] to record requests and return canned
//! [`ApiResponse`] values instead of calling a server.

pub mod client;
pub mod error;
pub mod models;
pub mod response;
pub mod traits;

// Re-export main types at crate root
pub use client::{ClientConfig, LoanTransactionsClient, TENANT_HEADER};
pub use error::{ClientError, Result};
pub use response::ApiResponse;
pub use traits::LoanTransactionsApi;
