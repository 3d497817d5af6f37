//! The uniform response envelope returned by every endpoint.

use http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::validation::ValidationErrors;

/// Message used for every validation failure response.
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed. Please check the following errors:";

/// JSON body shared by all responses.
///
/// Serializes as `{"status": "success", "message": ..., "data": ...}` or
/// `{"status": "error", "message": ..., "errors": ...}`. The `data` and
/// `errors` keys are always present and serialize as `null` when empty.
///
/// # Examples
///
/// ```
/// use api_guard::Envelope;
///
/// let body = Envelope::Error { message: "Malformed request.".to_string(), errors: None };
/// let json = serde_json::to_value(&body).unwrap();
///
/// assert_eq!(json["status"], "error");
/// assert!(json["errors"].is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope {
    /// The request succeeded.
    Success {
        /// Human-readable outcome
        message: String,
        /// Response payload
        data: Option<Value>,
    },
    /// The request failed.
    Error {
        /// Human-readable reason
        message: String,
        /// Structured error details: a list of messages or the raw payload
        errors: Option<Value>,
    },
}

impl Envelope {
    /// Returns the envelope's message.
    pub fn message(&self) -> &str {
        match self {
            Self::Success { message, .. } | Self::Error { message, .. } => message,
        }
    }

    /// Returns `true` for an error envelope.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// An envelope paired with the HTTP status code it is sent with.
///
/// The constructors keep the status class consistent with the envelope:
/// error bodies always carry a status of 400 or above and success bodies
/// always carry one below 400.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    status: StatusCode,
    body: Envelope,
}

impl ApiResponse {
    /// Builds a success response.
    ///
    /// A status of 400 or above is replaced by `200 OK`.
    ///
    /// # Examples
    ///
    /// ```
    /// use api_guard::ApiResponse;
    /// use http::StatusCode;
    /// use serde_json::json;
    ///
    /// let response = ApiResponse::success("Profile created", Some(json!({"id": 7})), StatusCode::CREATED);
    /// assert_eq!(response.status(), StatusCode::CREATED);
    /// assert!(!response.body().is_error());
    /// ```
    pub fn success(message: impl Into<String>, data: Option<Value>, status: StatusCode) -> Self {
        let status = if status.as_u16() >= 400 {
            tracing::debug!(%status, "success envelope with error status, using 200");
            StatusCode::OK
        } else {
            status
        };
        Self {
            status,
            body: Envelope::Success {
                message: message.into(),
                data,
            },
        }
    }

    /// Builds a success response with `200 OK`.
    pub fn ok(message: impl Into<String>, data: Option<Value>) -> Self {
        Self::success(message, data, StatusCode::OK)
    }

    /// Builds an error response.
    ///
    /// A status below 400 is replaced by `500 Internal Server Error`.
    pub fn error(message: impl Into<String>, errors: Option<Value>, status: StatusCode) -> Self {
        let status = if status.as_u16() < 400 {
            tracing::debug!(%status, "error envelope with non-error status, using 500");
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            status
        };
        Self {
            status,
            body: Envelope::Error {
                message: message.into(),
                errors,
            },
        }
    }

    /// Builds a `400 Bad Request` validation response with flattened messages.
    ///
    /// # Examples
    ///
    /// ```
    /// use api_guard::{ApiResponse, ValidationErrors};
    ///
    /// let response = ApiResponse::validation_error(&ValidationErrors::Scalar("Bad input".to_string()));
    /// assert_eq!(response.status().as_u16(), 400);
    /// ```
    pub fn validation_error(errors: &ValidationErrors) -> Self {
        let messages = errors.messages().into_iter().map(Value::String).collect();
        Self::error(
            VALIDATION_FAILED_MESSAGE,
            Some(Value::Array(messages)),
            StatusCode::BAD_REQUEST,
        )
    }

    /// Returns the HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the envelope body.
    pub fn body(&self) -> &Envelope {
        &self.body
    }

    /// Splits the response into its status and body.
    pub fn into_parts(self) -> (StatusCode, Envelope) {
        (self.status, self.body)
    }

    /// Serializes the body to a JSON value.
    pub fn to_json(&self) -> Value {
        // Envelope holds only strings and JSON values, so serialization cannot fail.
        serde_json::to_value(&self.body).unwrap_or(Value::Null)
    }
}
