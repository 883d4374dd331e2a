//! API Error Types
//!
//! Failures of a single backend call. Transport failures and backend
//! `success: false` answers end up here alike; callers turn them into
//! notifications.

use thiserror::Error;

/// Backend call errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Could not connect to the backend
    #[error("Backend unavailable at {0}")]
    Unavailable(String),

    /// The fixed request timeout elapsed
    #[error("Request timeout")]
    Timeout,

    /// Any other transport failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx HTTP status
    #[error("Backend returned {status}: {body}")]
    Status {
        status: u16,
        /// `error` field of the envelope, when the body was one
        error: Option<String>,
        body: String,
    },

    /// 2xx response carrying `success: false`
    #[error("Backend rejected request: {message}")]
    Rejected { message: String },

    /// Body did not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message the backend supplied for this failure, if any
    ///
    /// For non-2xx answers this is the envelope's `error`, else the raw body
    /// (field-error maps are shown verbatim).
    pub fn backend_message(&self) -> Option<&str> {
        let message = match self {
            ApiError::Rejected { message } => Some(message.as_str()),
            ApiError::Status { error, body, .. } => {
                Some(error.as_deref().unwrap_or(body.as_str()).trim())
            }
            _ => None,
        };
        message.filter(|m| !m.trim().is_empty())
    }

    /// Map a reqwest transport error the way the call site needs to see it
    pub(crate) fn from_transport(error: reqwest::Error, url: &str) -> Self {
        if error.is_timeout() {
            ApiError::Timeout
        } else if error.is_connect() {
            ApiError::Unavailable(url.to_string())
        } else {
            ApiError::Request(error)
        }
    }
}

/// Result type for backend calls
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message() {
        let rejected = ApiError::Rejected {
            message: "Template not approved".to_string(),
        };
        assert_eq!(rejected.backend_message(), Some("Template not approved"));

        let blank = ApiError::Rejected {
            message: "  ".to_string(),
        };
        assert_eq!(blank.backend_message(), None);

        let status = ApiError::Status {
            status: 404,
            error: Some("Campaign not found".to_string()),
            body: r#"{"success":false,"error":"Campaign not found"}"#.to_string(),
        };
        assert_eq!(status.backend_message(), Some("Campaign not found"));

        let field_errors = ApiError::Status {
            status: 400,
            error: None,
            body: r#"{"recipients":["Invalid email address: x"]}"#.to_string(),
        };
        assert_eq!(
            field_errors.backend_message(),
            Some(r#"{"recipients":["Invalid email address: x"]}"#)
        );

        let empty = ApiError::Status {
            status: 502,
            error: None,
            body: String::new(),
        };
        assert_eq!(empty.backend_message(), None);

        assert_eq!(ApiError::Timeout.backend_message(), None);
    }
}
