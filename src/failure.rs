//! Failure kinds and their normalization into [`ApiResponse`]s.

use std::fmt;

use http::StatusCode;
use serde_json::Value;

use crate::envelope::ApiResponse;
use crate::error::ValidationError;
use crate::validation::ValidationErrors;

/// Message used when a fallback response has no `detail` string.
pub const FALLBACK_MESSAGE: &str = "An error occurred.";

/// A failure raised while handling a request.
///
/// Variants are listed in resolution order. Upstream errors are classified
/// into exactly one variant at the boundary; [`process_failure`] then maps
/// each variant to a fixed status code and message.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// A call to an upstream HTTP service failed.
    UpstreamHttp(String),
    /// Credentials were supplied but rejected.
    AuthenticationFailed,
    /// No credentials were supplied.
    NotAuthenticated,
    /// The caller is authenticated but not allowed to perform the action.
    PermissionDenied,
    /// Input failed validation.
    Validation(ValidationErrors),
    /// The request body could not be parsed.
    ParseError,
    /// The requested resource does not exist.
    NotFound,
    /// The endpoint does not support the request method.
    MethodNotAllowed,
    /// The caller exceeded its rate limit.
    Throttled {
        /// Seconds until the next request is allowed, when known
        wait: Option<u64>,
    },
    /// A contract or attribute violation inside the handler.
    Programming(String),
    /// Any other failure.
    Unhandled {
        /// Text of the failure
        message: String,
        /// Response the framework already prepared for it, if any
        fallback: Option<FallbackResponse>,
    },
}

impl Failure {
    /// Builds an [`Unhandled`](Self::Unhandled) failure with no fallback response.
    pub fn unhandled(message: impl Into<String>) -> Self {
        Self::Unhandled {
            message: message.into(),
            fallback: None,
        }
    }

    /// Builds a [`Validation`](Self::Validation) failure from any payload shape.
    pub fn validation(errors: impl Into<ValidationErrors>) -> Self {
        Self::Validation(errors.into())
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpstreamHttp(detail) => write!(f, "upstream http error: {}", detail),
            Self::AuthenticationFailed => write!(f, "authentication failed"),
            Self::NotAuthenticated => write!(f, "not authenticated"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::Validation(errors) => {
                write!(f, "validation failed: {}", errors.messages().join("; "))
            }
            Self::ParseError => write!(f, "malformed request"),
            Self::NotFound => write!(f, "not found"),
            Self::MethodNotAllowed => write!(f, "method not allowed"),
            Self::Throttled { wait: Some(wait) } => write!(f, "throttled for {}s", wait),
            Self::Throttled { wait: None } => write!(f, "throttled"),
            Self::Programming(text) => write!(f, "programming error: {}", text),
            Self::Unhandled { message, .. } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for Failure {}

impl From<ValidationError> for Failure {
    fn from(error: ValidationError) -> Self {
        Self::Validation(error.into())
    }
}

/// A response the web framework prepared before the failure reached us.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackResponse {
    /// Status code chosen by the framework
    pub status: StatusCode,
    /// Raw error payload, usually an object with a `detail` key
    pub data: Value,
}

/// The invocation context a failure was raised in.
///
/// Carried for parity with framework failure hooks; normalization does not
/// depend on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureContext {
    /// Name of the view or handler that raised the failure
    pub view: Option<String>,
    /// Identifier of the request being handled
    pub request_id: Option<String>,
}

/// Maps a failure into a uniform error response.
///
/// Resolution follows the variant order of [`Failure`]. Recognized kinds get
/// fixed status codes and messages; auth failures never echo their payload.
/// Unrecognized failures become a 500 echoing their text, unless the
/// framework already prepared a fallback response, in which case its status
/// code and `detail` are passed through.
///
/// # Examples
///
/// ```
/// use api_guard::{process_failure, Failure, FailureContext};
///
/// let response = process_failure(Failure::Throttled { wait: Some(5) }, &FailureContext::default());
///
/// assert_eq!(response.status().as_u16(), 429);
/// assert_eq!(response.body().message(), "Request was throttled. Try again in 5 seconds.");
/// ```
pub fn process_failure(failure: Failure, _context: &FailureContext) -> ApiResponse {
    match failure {
        Failure::UpstreamHttp(detail) => ApiResponse::error(
            format!("HTTP error occurred: {}", detail),
            None,
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
        Failure::AuthenticationFailed => ApiResponse::error(
            "Invalid authentication credentials.",
            None,
            StatusCode::UNAUTHORIZED,
        ),
        Failure::NotAuthenticated => ApiResponse::error(
            "Authentication credentials were not provided.",
            None,
            StatusCode::UNAUTHORIZED,
        ),
        Failure::PermissionDenied => ApiResponse::error(
            "You do not have permission to perform this action.",
            None,
            StatusCode::FORBIDDEN,
        ),
        Failure::Validation(errors) => ApiResponse::validation_error(&errors),
        Failure::ParseError => {
            ApiResponse::error("Malformed request.", None, StatusCode::BAD_REQUEST)
        }
        Failure::NotFound => ApiResponse::error(
            "The requested resource was not found.",
            None,
            StatusCode::NOT_FOUND,
        ),
        Failure::MethodNotAllowed => ApiResponse::error(
            "Method not allowed for this endpoint.",
            None,
            StatusCode::METHOD_NOT_ALLOWED,
        ),
        Failure::Throttled { wait } => {
            let message = match wait {
                Some(wait) => format!("Request was throttled. Try again in {} seconds.", wait),
                None => "Request was throttled.".to_string(),
            };
            ApiResponse::error(message, None, StatusCode::TOO_MANY_REQUESTS)
        }
        Failure::Programming(text) => {
            ApiResponse::error(text, None, StatusCode::INTERNAL_SERVER_ERROR)
        }
        Failure::Unhandled {
            message,
            fallback: None,
        } => ApiResponse::error(message, None, StatusCode::INTERNAL_SERVER_ERROR),
        Failure::Unhandled {
            fallback: Some(fallback),
            ..
        } => {
            let message = fallback
                .data
                .get("detail")
                .and_then(Value::as_str)
                .unwrap_or(FALLBACK_MESSAGE)
                .to_string();
            ApiResponse::error(message, Some(fallback.data), fallback.status)
        }
    }
}
