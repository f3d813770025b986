//! Common error types for the upload backend

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommonError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("External service error: {0}")]
    ExternalService(String),
}

impl CommonError {
    pub fn http_status_code(&self) -> u16 {
        match self {
            CommonError::InvalidInput(_) => 400,
            CommonError::ServiceUnavailable(_) => 503,
            CommonError::ExternalService(_) => 502,
        }
    }

    /// Whether the same request may succeed if sent again unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CommonError::ExternalService(_))
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            success: false,
            error: self.to_string(),
        }
    }
}

/// JSON body returned to clients for any failed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_http_status_codes() {
        assert_eq!(CommonError::InvalidInput("test".to_string()).http_status_code(), 400);
        assert_eq!(CommonError::ServiceUnavailable("test".to_string()).http_status_code(), 503);
        assert_eq!(CommonError::ExternalService("test".to_string()).http_status_code(), 502);
    }

    #[test]
    fn test_retryable() {
        assert!(CommonError::ExternalService("test".to_string()).is_retryable());
        assert!(!CommonError::ServiceUnavailable("test".to_string()).is_retryable());
        assert!(!CommonError::InvalidInput("test".to_string()).is_retryable());
    }

    #[test]
    fn test_error_body() {
        let body = CommonError::InvalidInput("no file field".to_string()).to_body();
        assert_eq!(
            body,
            ErrorBody {
                success: false,
                error: "Invalid input: no file field".to_string(),
            }
        );

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Invalid input: no file field");
    }
}
