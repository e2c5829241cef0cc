//! Fineract end-to-end step definitions.
//!
//! Step handlers build request payloads from Gherkin data tables, call the
//! loan transactions API and assert on responses and business events.
//!
//! Mandatory table fields are resolved by header name with a column
//! position fallback ([`table`]). Remaining columns are applied to the
//! request by name through a per-payload setter registry ([`mapper`]), with
//! each raw cell converted to the setter's type ([`coercion`]). Adding an
//! optional column to a feature file needs no code change.

pub mod coercion;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod factory;
pub mod helpers;
pub mod mapper;
pub mod payload;
pub mod steps;
pub mod table;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use crate::config::E2eConfig;
pub use context::{TestContext, TestContextKey};
pub use error::{Result, StepError};
pub use events::{EventAssertion, EventLog};
pub use mapper::{apply_additional_fields, MappingReport, Settable};
pub use steps::ReAgingSteps;
pub use table::{FieldMap, RowTable, ValueResolver};
