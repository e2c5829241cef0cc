//! Assertions over API responses.

pub mod messages;

use fineract_client::ApiResponse;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::error::{Result, StepError};

/// Fail unless the call returned a 2xx status.
pub fn check_successful_api_call<T>(response: &ApiResponse<T>) -> Result<()> {
    if response.is_successful() {
        return Ok(());
    }
    Err(StepError::UnexpectedResponse(format!(
        "status {}: {}",
        response.code(),
        response.error_body().unwrap_or("<empty body>")
    )))
}

/// Fail unless the call was rejected with `expected_status`.
pub fn check_failed_api_call<T>(response: &ApiResponse<T>, expected_status: u16) -> Result<()> {
    if response.is_successful() {
        return Err(StepError::UnexpectedResponse(format!(
            "expected status {} but the call succeeded with {}",
            expected_status,
            response.code()
        )));
    }
    if response.code() != expected_status {
        return Err(StepError::assertion(format!(
            "{}: expected {}, got {}",
            messages::STATUS_CODE_MISMATCH,
            expected_status,
            response.code()
        )));
    }
    Ok(())
}

/// Fail unless the raw error body contains `expected`.
pub fn check_error_body_contains<T>(response: &ApiResponse<T>, expected: &str) -> Result<()> {
    let body = response
        .error_body()
        .ok_or_else(|| StepError::assertion("response has no error body"))?;
    if body.contains(expected) {
        Ok(())
    } else {
        Err(StepError::assertion(format!(
            "error body does not contain '{}': {}",
            expected, body
        )))
    }
}

/// Error document returned by the platform for rejected calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorResponse {
    #[serde(deserialize_with = "status_code")]
    pub http_status_code: Option<u16>,
    pub developer_message: Option<String>,
    pub default_user_message: Option<String>,
    pub user_message_globalisation_code: Option<String>,
    pub errors: Vec<ErrorDetail>,
}

/// One validation or domain-rule error inside an [`ErrorResponse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorDetail {
    pub developer_message: Option<String>,
    pub default_user_message: Option<String>,
    pub user_message_globalisation_code: Option<String>,
    pub parameter_name: Option<String>,
}

impl ErrorResponse {
    pub fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| StepError::InvalidErrorBody(e.to_string()))
    }

    /// Parse the error body of a failed call.
    ///
    /// The status falls back to the transport status when the body omits it.
    pub fn from_response<T>(response: &ApiResponse<T>) -> Result<Self> {
        if response.is_successful() {
            return Err(StepError::UnexpectedResponse(format!(
                "expected an error response, got status {}",
                response.code()
            )));
        }
        let body = response
            .error_body()
            .ok_or_else(|| StepError::InvalidErrorBody("empty error body".to_string()))?;

        let mut parsed = Self::parse(body)?;
        parsed.http_status_code.get_or_insert(response.code());
        debug!(status = ?parsed.http_status_code, errors = parsed.errors.len(), "Parsed error response");
        Ok(parsed)
    }

    /// The only nested error; fails when there are none or several.
    pub fn single_error(&self) -> Result<&ErrorDetail> {
        match self.errors.as_slice() {
            [only] => Ok(only),
            other => Err(StepError::assertion(format!(
                "expected exactly one error, found {}",
                other.len()
            ))),
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.http_status_code
    }
}

impl ErrorDetail {
    pub fn developer_message(&self) -> &str {
        self.developer_message.as_deref().unwrap_or_default()
    }
}

// The platform sends the status as a string ("403"); some proxies send a number.
fn status_code<'de, D>(deserializer: D) -> std::result::Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u16),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(code)) => Ok(Some(code)),
        Some(Raw::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
