//! Classification of axum extractor rejections.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde_json::json;

use crate::failure::{Failure, FallbackResponse};

impl From<JsonRejection> for Failure {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonSyntaxError(_) | JsonRejection::BytesRejection(_) => {
                Failure::ParseError
            }
            JsonRejection::JsonDataError(e) => Failure::validation(e.body_text()),
            other => Failure::Unhandled {
                message: other.body_text(),
                fallback: Some(FallbackResponse {
                    status: other.status(),
                    data: json!({ "detail": other.body_text() }),
                }),
            },
        }
    }
}

impl From<PathRejection> for Failure {
    fn from(_: PathRejection) -> Self {
        // A path that does not deserialize names no resource.
        Failure::NotFound
    }
}

impl From<QueryRejection> for Failure {
    fn from(rejection: QueryRejection) -> Self {
        Failure::validation(rejection.body_text())
    }
}

/// JSON body extractor whose rejections are normalized failures.
///
/// Syntax errors become `Malformed request.` (400), type mismatches become
/// validation failures, and a missing `Content-Type` keeps axum's 415.
///
/// # Examples
///
/// ```
/// use api_guard::{ApiResponse, Failure, web::Payload};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Rename {
///     full_name: String,
/// }
///
/// async fn rename(Payload(body): Payload<Rename>) -> Result<ApiResponse, Failure> {
///     Ok(ApiResponse::ok("Profile updated", Some(body.full_name.into())))
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Failure;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Payload(value))
    }
}
