//! Example handlers wiring the gates and the normalizer into axum.
//!
//! These handlers show the intended flow for endpoints that accept
//! user-submitted links and text. They persist nothing.

use axum::routing::{post, put};
use axum::Router;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::Payload;
use crate::envelope::ApiResponse;
use crate::failure::Failure;
use crate::sanitizer::{LinkSanitizer, Sanitizer, SubmissionSanitizer};
use crate::validators::{validate_image_file, validate_phone_number};
use crate::Tainted;

/// Body of a content link submission.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentLinkRequest {
    /// Display title
    pub title: String,
    /// Submitted URL
    pub link: String,
    /// Optional free-text description
    #[serde(default)]
    pub description: Option<String>,
}

/// A content link that passed both gates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentLink {
    /// Display title
    pub title: String,
    /// Link with trailing slash
    pub link: String,
    /// Description, if one was submitted
    pub description: Option<String>,
}

/// Accepts a content link after running the link and its description
/// through the safety gates.
///
/// Blocked input is reported against its field (`Link: ...`,
/// `Description: ...`) with status 400.
pub async fn submit_content_link(
    Payload(request): Payload<ContentLinkRequest>,
) -> Result<ApiResponse, Failure> {
    let link = LinkSanitizer::builtin()
        .for_field("link")
        .sanitize(Tainted::new(request.link))?;

    let description = match request.description {
        Some(text) => Some(
            SubmissionSanitizer::builtin()
                .for_field("description")
                .sanitize(Tainted::new(text))?
                .into_inner(),
        ),
        None => None,
    };

    let accepted = ContentLink {
        title: request.title,
        link: link.into_inner(),
        description,
    };
    Ok(ApiResponse::success(
        "Content link submitted successfully",
        Some(json!(accepted)),
        StatusCode::CREATED,
    ))
}

/// Body of a contact details update.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactRequest {
    /// Phone number with country code
    pub phone_number: String,
    /// File name of a new avatar upload, if any
    #[serde(default)]
    pub avatar_file_name: Option<String>,
}

/// Validates contact details.
pub async fn update_contact(
    Payload(request): Payload<ContactRequest>,
) -> Result<ApiResponse, Failure> {
    validate_phone_number(&request.phone_number)
        .map_err(|e| e.for_field("phone_number"))?;
    if let Some(name) = &request.avatar_file_name {
        validate_image_file(name).map_err(|e| e.for_field("avatar"))?;
    }

    Ok(ApiResponse::ok(
        "Contact details updated successfully",
        Some(json!({ "phone_number": request.phone_number })),
    ))
}

async fn not_found() -> Failure {
    Failure::NotFound
}

async fn method_not_allowed() -> Failure {
    Failure::MethodNotAllowed
}

/// Builds a router serving the example handlers.
///
/// Unknown paths answer with the normalized 404 and unsupported methods with
/// the normalized 405.
pub fn router() -> Router {
    Router::new()
        .route(
            "/links",
            post(submit_content_link).fallback(method_not_allowed),
        )
        .route(
            "/profile/contact",
            put(update_contact).fallback(method_not_allowed),
        )
        .fallback(not_found)
}
