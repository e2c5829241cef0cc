//! Request builders with the defaults every scenario relies on.

use fineract_client::models::PostLoansLoanIdTransactionsRequest;
use uuid::Uuid;

use crate::table::{TableError, ValueResolver};

pub const DATE_FORMAT: &str = "dd MMMM yyyy";
pub const DEFAULT_LOCALE: &str = "en";

/// Table columns consumed by [`ReAgingTerms`]; never handed to the mapper.
pub const RE_AGING_TERM_FIELDS: [&str; 4] = [
    "frequencyNumber",
    "frequencyType",
    "startDate",
    "numberOfInstallments",
];

pub struct LoanRequestFactory;

impl LoanRequestFactory {
    /// Base re-age request: date format, locale and a fresh external id.
    pub fn default_re_aging_request() -> PostLoansLoanIdTransactionsRequest {
        PostLoansLoanIdTransactionsRequest::new()
            .date_format(DATE_FORMAT)
            .locale(DEFAULT_LOCALE)
            .external_id(Uuid::new_v4().to_string())
    }
}

/// The four mandatory terms of a re-age.
///
/// Column order is frequencyNumber, frequencyType, startDate,
/// numberOfInstallments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReAgingTerms {
    pub frequency_number: i32,
    pub frequency_type: String,
    pub start_date: String,
    pub number_of_installments: i32,
}

impl ReAgingTerms {
    pub fn resolve(resolver: &ValueResolver<'_>) -> Result<Self, TableError> {
        let [number, kind, start, installments] = RE_AGING_TERM_FIELDS;
        Ok(Self {
            frequency_number: resolver.require_parsed(0, number)?,
            frequency_type: resolver.require(1, kind)?.to_string(),
            start_date: resolver.require(2, start)?.to_string(),
            number_of_installments: resolver.require_parsed(3, installments)?,
        })
    }

    pub fn apply(
        &self,
        request: PostLoansLoanIdTransactionsRequest,
    ) -> PostLoansLoanIdTransactionsRequest {
        request
            .frequency_number(self.frequency_number)
            .frequency_type(self.frequency_type.clone())
            .start_date(self.start_date.clone())
            .number_of_installments(self.number_of_installments)
    }

    /// Default re-age request carrying these terms.
    pub fn to_request(&self) -> PostLoansLoanIdTransactionsRequest {
        self.apply(LoanRequestFactory::default_re_aging_request())
    }
}
