use super::tables::{default_tables, SafetyTables};
use super::verdict::Verdict;
use crate::error::{ValidationError, ValidationErrorKind};

/// Blocked reason recorded for each matching content pattern.
///
/// The matched term is not echoed back to the submitter.
pub const CONTENT_BLOCKED_REASON: &str = "Blocked content pattern detected";

/// Message of the validation failure raised for blocked content.
pub const CONTENT_BLOCKED_MESSAGE: &str =
    "Content contains blocked material and cannot be submitted";

/// Evaluator for free-text submissions.
///
/// # Examples
///
/// ```
/// use api_guard::safety::ContentGate;
///
/// let gate = ContentGate::builtin();
///
/// assert!(gate.evaluate(Some("Ironing and folding, same day")).is_safe());
/// assert!(!gate.evaluate(Some("Click here to claim your casino bonus")).is_safe());
/// assert!(gate.evaluate(None).is_safe());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ContentGate<'t> {
    tables: &'t SafetyTables,
}

impl ContentGate<'static> {
    /// Creates a gate over the process-wide built-in tables.
    pub fn builtin() -> Self {
        Self::new(default_tables())
    }
}

impl Default for ContentGate<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'t> ContentGate<'t> {
    /// Creates a gate over the given tables.
    pub fn new(tables: &'t SafetyTables) -> Self {
        Self { tables }
    }

    /// Evaluates text against the blocked content patterns.
    ///
    /// Absent or empty text is safe. Each matching pattern adds one blocked
    /// reason; patterns match whole words, ignoring case.
    pub fn evaluate(&self, text: Option<&str>) -> Verdict {
        let mut verdict = Verdict::safe();
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return verdict;
        };

        for pattern in &self.tables.content_patterns {
            if pattern.is_match(text) {
                verdict.block(CONTENT_BLOCKED_REASON);
            }
        }
        verdict
    }

    /// Validates a text submission.
    ///
    /// Absent or empty text is accepted without evaluation. When `raise` is
    /// set, blocked text fails with [`CONTENT_BLOCKED_MESSAGE`]; otherwise the
    /// safety outcome is returned.
    pub fn validate_submission_content(
        &self,
        text: Option<&str>,
        raise: bool,
    ) -> Result<bool, ValidationError> {
        if text.map_or(true, str::is_empty) {
            return Ok(true);
        }

        let verdict = self.evaluate(text);
        if raise && !verdict.is_safe() {
            return Err(ValidationError::new(
                ValidationErrorKind::Blocked,
                CONTENT_BLOCKED_MESSAGE,
            ));
        }
        Ok(verdict.is_safe())
    }
}
