//! Content safety gating for submitted links and text.
//!
//! This module provides:
//! - `Verdict`: outcome of one evaluation (safe, warnings, blocked reasons)
//! - `SafetyTables`: compiled allowlists, blocklists and limits
//! - `UrlGate`: evaluator and entry point for submitted URLs
//! - `ContentGate`: evaluator and entry point for free text
//!
//! Evaluators never fail on malformed input; the worst outcome is an extra
//! warning. Entry points fail with a [`ValidationError`] only when the caller
//! asks for enforcement and the input is blocked.

mod content_gate;
mod tables;
mod url_gate;
mod verdict;

pub use content_gate::{ContentGate, CONTENT_BLOCKED_MESSAGE, CONTENT_BLOCKED_REASON};
pub use tables::{default_tables, SafetyTables, UrlLimits};
pub use url_gate::{UrlGate, INCOMPLETE_VALIDATION_WARNING};
pub use verdict::Verdict;

use crate::error::ValidationError;

/// Validates a submitted link against the built-in tables, rejecting blocked URLs.
///
/// Returns the link with a trailing slash guaranteed.
///
/// # Examples
///
/// ```
/// use api_guard::safety::validate_url_security;
///
/// assert_eq!(validate_url_security("https://example.com/menu").unwrap(), "https://example.com/menu/");
/// assert!(validate_url_security("https://casino-royale.example").is_err());
/// ```
pub fn validate_url_security(url: &str) -> Result<String, ValidationError> {
    UrlGate::builtin().validate_content_link(url, true)
}

/// Validates submitted text against the built-in tables, rejecting blocked content.
///
/// # Examples
///
/// ```
/// use api_guard::safety::validate_content_security;
///
/// assert_eq!(validate_content_security(Some("Weekly laundry pickup")), Ok(true));
/// assert_eq!(validate_content_security(None), Ok(true));
/// assert!(validate_content_security(Some("Best casino deals")).is_err());
/// ```
pub fn validate_content_security(text: Option<&str>) -> Result<bool, ValidationError> {
    ContentGate::builtin().validate_submission_content(text, true)
}
