//! Mapping of crate errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{debug, error};

use crate::error::Error;

/// Error returned by request handlers.
///
/// Client errors become `400 Bad Request` with a short plain-text reason;
/// anything else is logged and reported as `500 Internal Server Error`.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// The status code this error is reported with.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_client_error() {
            debug!(error = %self.0, "Rejected request");
        } else {
            error!(error = %self.0, "Request failed");
        }
        (status, self.0.reason()).into_response()
    }
}
