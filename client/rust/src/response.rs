//! HTTP response wrapper that keeps failed calls inspectable.

/// Outcome of an API call that reached the server.
///
/// Successful calls carry a decoded body; failed calls carry the raw error
/// body so callers can assert on it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    status: u16,
    body: Option<T>,
    error_body: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Build a 2xx response with a decoded body.
    pub fn success(status: u16, body: T) -> Self {
        Self {
            status,
            body: Some(body),
            error_body: None,
        }
    }

    /// Build a non-2xx response with its raw body.
    pub fn failure(status: u16, error_body: impl Into<String>) -> Self {
        Self {
            status,
            body: None,
            error_body: Some(error_body.into()),
        }
    }

    /// HTTP status code.
    pub fn code(&self) -> u16 {
        self.status
    }

    /// True for 2xx status codes.
    pub fn is_successful(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decoded body of a successful call.
    pub fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }

    /// Raw body of a failed call.
    pub fn error_body(&self) -> Option<&str> {
        self.error_body.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response() {
        let response = ApiResponse::success(200, 5_i64);
        assert!(response.is_successful());
        assert_eq!(response.code(), 200);
        assert_eq!(response.body(), Some(&5));
        assert!(response.error_body().is_none());
    }

    #[test]
    fn test_failure_response() {
        let response: ApiResponse<i64> = ApiResponse::failure(403, "{\"httpStatusCode\":\"403\"}");
        assert!(!response.is_successful());
        assert_eq!(response.code(), 403);
        assert!(response.body().is_none());
        assert!(response.error_body().unwrap().contains("403"));
    }

    #[test]
    fn test_boundary_status_codes() {
        assert!(ApiResponse::success(204, ()).is_successful());
        assert!(!ApiResponse::<()>::failure(300, "").is_successful());
        assert!(!ApiResponse::<()>::failure(199, "").is_successful());
    }
}
