//! Expected rejection messages.

use std::sync::LazyLock;

use regex::Regex;

/// Description used when a rejection carries the wrong status code.
pub const STATUS_CODE_MISMATCH: &str = "HTTP status code of the rejection is not as expected";

static RE_AGE_CHARGED_OFF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^Loan re-?aging is not allowed on (a )?charged-off loan\.?$")
        .unwrap_or_else(|e| panic!("invalid charged-off pattern: {e}"))
});

static RE_AGE_CONTRACT_TERMINATED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^Loan re-?aging is not allowed on (a )?contract terminated loan\.?$")
        .unwrap_or_else(|e| panic!("invalid contract-terminated pattern: {e}"))
});

/// Developer message for re-aging a charged-off loan.
pub fn re_age_charged_off_loan_failure() -> &'static Regex {
    &RE_AGE_CHARGED_OFF
}

/// Developer message for re-aging a loan whose contract was terminated.
pub fn re_age_contract_terminated_loan_failure() -> &'static Regex {
    &RE_AGE_CONTRACT_TERMINATED
}
