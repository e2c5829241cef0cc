//! Default client implementation over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{ClientError, Result};
use crate::models::{PostLoansLoanIdTransactionsRequest, PostLoansLoanIdTransactionsResponse};
use crate::response::ApiResponse;
use crate::traits;

/// Header carrying the tenant identifier on every request.
pub const TENANT_HEADER: &str = "Fineract-Platform-TenantId";

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, e.g. `https://localhost:8443/fineract-provider/api/v1`.
    pub base_url: String,

    /// Tenant identifier sent in [`TENANT_HEADER`].
    pub tenant_id: String,

    /// Basic auth user; no auth header is sent when unset.
    pub username: Option<String>,

    /// Basic auth password.
    pub password: Option<String>,

    /// Request timeout.
    pub timeout: Duration,

    /// Accept self-signed certificates (local test servers).
    pub accept_invalid_certs: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://localhost:8443/fineract-provider/api/v1".to_string(),
            tenant_id: "default".to_string(),
            username: None,
            password: None,
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }
}

impl ClientConfig {
    /// Set the API root URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the tenant identifier.
    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = tenant_id.into();
        self
    }

    /// Set basic auth credentials.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Accept invalid TLS certificates.
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}

/// Loan transactions client over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct LoanTransactionsClient {
    client: Client,
    base_url: Url,
    config: ClientConfig,
}

impl LoanTransactionsClient {
    /// Create a client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidArgument(format!("base url {}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidArgument(format!(
                "base url {} cannot carry a path",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            TENANT_HEADER,
            HeaderValue::from_str(&config.tenant_id)
                .map_err(|e| ClientError::InvalidArgument(format!("tenant id: {}", e)))?,
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Build the URL for `segments` below the API root.
    ///
    /// Segments are percent-encoded, so external ids may contain any text.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidArgument("base url cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn post_command<T>(
        &self,
        url: Url,
        request: &PostLoansLoanIdTransactionsRequest,
        command: &str,
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned + Default,
    {
        if command.trim().is_empty() {
            return Err(ClientError::InvalidArgument(
                "transaction command must not be empty".to_string(),
            ));
        }

        let mut builder = self
            .client
            .post(url.clone())
            .query(&[("command", command)])
            .json(request);

        if let Some(username) = &self.config.username {
            builder = builder.basic_auth(username, self.config.password.as_deref());
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            debug!(url = %url, command, status = %status, "Loan transaction command succeeded");
            let body = if text.trim().is_empty() {
                T::default()
            } else {
                serde_json::from_str(&text)?
            };
            Ok(ApiResponse::success(status.as_u16(), body))
        } else {
            warn!(url = %url, command, status = %status, body = %text, "Loan transaction command failed");
            Ok(ApiResponse::failure(status.as_u16(), text))
        }
    }
}

#[async_trait]
impl traits::LoanTransactionsApi for LoanTransactionsClient {
    async fn execute_loan_transaction(
        &self,
        loan_id: i64,
        request: &PostLoansLoanIdTransactionsRequest,
        command: &str,
    ) -> Result<ApiResponse<PostLoansLoanIdTransactionsResponse>> {
        let id = loan_id.to_string();
        let url = self.endpoint(&["loans", &id, "transactions"])?;
        self.post_command(url, request, command).await
    }

    async fn execute_loan_transaction_by_external_id(
        &self,
        loan_external_id: &str,
        request: &PostLoansLoanIdTransactionsRequest,
        command: &str,
    ) -> Result<ApiResponse<PostLoansLoanIdTransactionsResponse>> {
        if loan_external_id.is_empty() {
            return Err(ClientError::InvalidArgument(
                "loan external id must not be empty".to_string(),
            ));
        }
        let url = self.endpoint(&["loans", "external-id", loan_external_id, "transactions"])?;
        self.post_command(url, request, command).await
    }
}
