//! `IntoResponse` impls for the envelope and failure types.

use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::envelope::ApiResponse;
use crate::error::ValidationError;
use crate::failure::{process_failure, Failure, FailureContext};

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let (status, body) = self.into_parts();
        (status, Json(body)).into_response()
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        process_failure(self, &FailureContext::default()).into_response()
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        Failure::from(self).into_response()
    }
}
