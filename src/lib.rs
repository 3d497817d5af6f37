//! Request-boundary guards for REST services.
//!
//! This crate provides two independent pieces of boundary machinery:
//! - **Response normalization**: every failure raised while handling a
//!   request becomes one uniform envelope (`{status, message, errors}`) with
//!   a fixed HTTP status code
//! - **Content safety gating**: submitted links and text are checked against
//!   allowlists and blocklists before they are persisted
//!
//! # Core Types
//!
//! - [`ApiResponse`] / [`Envelope`]: status code plus JSON body
//! - [`Failure`]: one variant per failure kind, mapped by [`process_failure`]
//! - [`ValidationErrors`]: validation payload flattened into readable messages
//! - [`safety::UrlGate`] / [`safety::ContentGate`]: evaluators producing a [`safety::Verdict`]
//! - [`Tainted<T>`] / [`Verified<T>`]: submitted values before and after a [`Sanitizer`]
//!
//! # Examples
//!
//! ```
//! use api_guard::{process_failure, Failure, FailureContext, LinkSanitizer, Sanitizer, Tainted};
//!
//! let submitted = Tainted::new("https://casino-bonus.example".to_string());
//! let failure: Failure = LinkSanitizer::builtin()
//!     .for_field("link")
//!     .sanitize(submitted)
//!     .unwrap_err()
//!     .into();
//!
//! let response = process_failure(failure, &FailureContext::default());
//! assert_eq!(response.status().as_u16(), 400);
//! assert_eq!(
//!     response.to_json()["errors"][0],
//!     "Link: URL blocked for security reasons: Blocked keyword detected: casino"
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod envelope;
mod error;
mod failure;
mod sanitizer;
mod tainted;
mod validation;
mod verified;

pub mod safety;
pub mod validators;

#[cfg(feature = "axum")]
#[cfg_attr(docsrs, doc(cfg(feature = "axum")))]
pub mod web;

pub use config::{
    load_default, load_from_file, ContentConfig, GuardConfig, UrlConfig, CONFIG_PATH_ENV,
    DEFAULT_CONFIG_PATH,
};
pub use envelope::{ApiResponse, Envelope, VALIDATION_FAILED_MESSAGE};
pub use error::{ConfigError, ValidationError, ValidationErrorKind};
pub use failure::{process_failure, Failure, FailureContext, FallbackResponse, FALLBACK_MESSAGE};
pub use sanitizer::{LinkSanitizer, Sanitizer, SubmissionSanitizer};
pub use tainted::Tainted;
pub use validation::{title_case_field, ValidationErrors, NON_FIELD_ERRORS};
pub use verified::Verified;
