use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::franchise::errors::{ErrorKind, FranchiseError};

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for FranchiseError {
    fn into_error_response(self, path: &str) -> (StatusCode, Json<ErrorResponse>) {
        let status = match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Business => StatusCode::CONFLICT,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Generic => {
                tracing::error!(path, error = ?self, "unexpected failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorResponse::new(self.code(), self.to_string(), path)),
        )
    }
}
