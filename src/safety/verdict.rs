use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Outcome of evaluating a URL or a piece of text.
///
/// A verdict is safe exactly when it carries no blocked reasons. Warnings
/// never make a verdict unsafe.
///
/// # Examples
///
/// ```
/// use api_guard::safety::Verdict;
///
/// let mut verdict = Verdict::safe();
/// verdict.warn("Unusually deep URL path");
/// assert!(verdict.is_safe());
///
/// verdict.block("Blocked keyword detected: scam");
/// assert!(!verdict.is_safe());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verdict {
    warnings: Vec<String>,
    blocked_reasons: Vec<String>,
}

impl Verdict {
    /// Creates a safe verdict with no warnings.
    pub fn safe() -> Self {
        Self::default()
    }

    /// Returns `true` when nothing blocked the input.
    pub fn is_safe(&self) -> bool {
        self.blocked_reasons.is_empty()
    }

    /// Returns the non-fatal warnings, in the order they were raised.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Returns the blocking reasons, in the order they were raised.
    pub fn blocked_reasons(&self) -> &[String] {
        &self.blocked_reasons
    }

    /// Records a non-fatal warning.
    pub fn warn(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Records a blocking reason, making the verdict unsafe.
    pub fn block(&mut self, reason: impl Into<String>) {
        self.blocked_reasons.push(reason.into());
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Verdict", 3)?;
        state.serialize_field("is_safe", &self.is_safe())?;
        state.serialize_field("warnings", &self.warnings)?;
        state.serialize_field("blocked_reasons", &self.blocked_reasons)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn safe_verdict_is_empty() {
        let verdict = Verdict::safe();

        assert!(verdict.is_safe());
        assert!(verdict.warnings().is_empty());
        assert!(verdict.blocked_reasons().is_empty());
    }

    #[test]
    fn warnings_keep_verdict_safe() {
        let mut verdict = Verdict::safe();
        verdict.warn("a");
        verdict.warn("b");

        assert!(verdict.is_safe());
        assert_eq!(verdict.warnings(), ["a", "b"]);
    }

    #[test]
    fn serializes_is_safe() {
        let mut verdict = Verdict::safe();
        verdict.block("x");

        assert_eq!(
            serde_json::to_value(&verdict).unwrap(),
            json!({"is_safe": false, "warnings": [], "blocked_reasons": ["x"]})
        );
    }
}
