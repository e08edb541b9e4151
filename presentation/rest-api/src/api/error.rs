use chrono::{DateTime, Utc};
use poem::http::StatusCode;
use poem_openapi::{Object, payload::Json};

/// Error body shared by every endpoint.
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// VALIDATION_ERROR, BUSINESS_ERROR, RESOURCE_NOT_FOUND or INTERNAL_ERROR
    pub code: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Request path that produced the error
    pub path: String,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>, path: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            timestamp: Utc::now(),
            path: path.to_string(),
        }
    }
}

pub trait IntoErrorResponse {
    fn into_error_response(self, path: &str) -> (StatusCode, Json<ErrorResponse>);
}
