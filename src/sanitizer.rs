use crate::error::ValidationError;
use crate::safety::{ContentGate, SafetyTables, UrlGate};
use crate::{Tainted, Verified};

/// Promotes submitted values into checked values.
///
/// # Invariants
///
/// Implementations MUST:
/// - Run the input through their gate in enforcing mode
/// - Only call `Verified::new_unchecked` after the gate accepted the input
/// - Return `Err(ValidationError)` otherwise
pub trait Sanitizer<T> {
    /// Checks a submitted value, returning it as verified on success.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when the gate blocks the input.
    fn sanitize(&self, input: Tainted<T>) -> Result<Verified<T>, ValidationError>;
}

/// Sanitizer for submitted links.
///
/// Accepted links are returned with a trailing slash. Rejections carry the
/// configured field name so the normalizer can prefix the message.
///
/// # Examples
///
/// ```
/// use api_guard::{LinkSanitizer, Sanitizer, Tainted};
///
/// let sanitizer = LinkSanitizer::builtin().for_field("website");
///
/// let err = sanitizer
///     .sanitize(Tainted::new("https://warez-mirror.example".to_string()))
///     .unwrap_err();
/// assert_eq!(err.field(), Some("website"));
/// ```
#[derive(Debug, Clone)]
pub struct LinkSanitizer<'t> {
    gate: UrlGate<'t>,
    field: Option<String>,
}

impl LinkSanitizer<'static> {
    /// Creates a sanitizer over the built-in tables.
    pub fn builtin() -> Self {
        Self {
            gate: UrlGate::builtin(),
            field: None,
        }
    }
}

impl<'t> LinkSanitizer<'t> {
    /// Creates a sanitizer over the given tables.
    pub fn new(tables: &'t SafetyTables) -> Self {
        Self {
            gate: UrlGate::new(tables),
            field: None,
        }
    }

    /// Names the input field rejections are reported against.
    pub fn for_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl Sanitizer<String> for LinkSanitizer<'_> {
    fn sanitize(&self, input: Tainted<String>) -> Result<Verified<String>, ValidationError> {
        let raw = input.into_inner();
        let link = self
            .gate
            .validate_content_link(&raw, true)
            .map_err(|e| attach_field(e, self.field.as_deref()))?;
        Ok(Verified::new_unchecked(link))
    }
}

/// Sanitizer for free-text submissions.
///
/// Empty text is accepted unchanged.
///
/// # Examples
///
/// ```
/// use api_guard::{Sanitizer, SubmissionSanitizer, Tainted};
///
/// let sanitizer = SubmissionSanitizer::builtin();
///
/// let ok = sanitizer.sanitize(Tainted::new("Pickup after 6pm".to_string())).unwrap();
/// assert_eq!(ok.as_ref(), "Pickup after 6pm");
///
/// assert!(sanitizer.sanitize(Tainted::new("cheap drugs".to_string())).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct SubmissionSanitizer<'t> {
    gate: ContentGate<'t>,
    field: Option<String>,
}

impl SubmissionSanitizer<'static> {
    /// Creates a sanitizer over the built-in tables.
    pub fn builtin() -> Self {
        Self {
            gate: ContentGate::builtin(),
            field: None,
        }
    }
}

impl<'t> SubmissionSanitizer<'t> {
    /// Creates a sanitizer over the given tables.
    pub fn new(tables: &'t SafetyTables) -> Self {
        Self {
            gate: ContentGate::new(tables),
            field: None,
        }
    }

    /// Names the input field rejections are reported against.
    pub fn for_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl Sanitizer<String> for SubmissionSanitizer<'_> {
    fn sanitize(&self, input: Tainted<String>) -> Result<Verified<String>, ValidationError> {
        let text = input.into_inner();
        self.gate
            .validate_submission_content(Some(&text), true)
            .map_err(|e| attach_field(e, self.field.as_deref()))?;
        Ok(Verified::new_unchecked(text))
    }
}

fn attach_field(error: ValidationError, field: Option<&str>) -> ValidationError {
    match field {
        Some(field) => error.for_field(field),
        None => error,
    }
}
