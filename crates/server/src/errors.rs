use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Plain-text API error. The product endpoints speak text bodies for both
/// validation and lookup failures, not JSON envelopes.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}
