use std::fmt;

/// A field-level validation failure.
///
/// Raised by the safety gates when enforcement is requested and a block
/// condition holds, and by the field validators in [`crate::validators`].
/// The normalizer formats it like any other validation payload once it is
/// converted into [`Failure::Validation`](crate::Failure::Validation).
///
/// # Examples
///
/// ```
/// use api_guard::{ValidationError, ValidationErrorKind};
///
/// let error = ValidationError::new(ValidationErrorKind::Blocked, "URL blocked")
///     .for_field("website");
/// assert_eq!(error.field(), Some("website"));
/// assert_eq!(error.message(), "URL blocked");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    kind: ValidationErrorKind,
    field: Option<String>,
    message: String,
}

impl ValidationError {
    /// Creates a new validation error that is not attached to any field.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            message: message.into(),
        }
    }

    /// Attaches the error to a named input field.
    pub fn for_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ValidationErrorKind {
        self.kind
    }

    /// Returns the field the error is attached to, if any.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(
                f,
                "validation failed ({}) on {}: {}",
                self.kind, field, self.message
            ),
            None => write!(f, "validation failed ({}): {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Kind of validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Input matched a blocklist and was rejected.
    Blocked,
    /// Input does not have the required format.
    InvalidFormat,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocked => write!(f, "blocked"),
            Self::InvalidFormat => write!(f, "invalid format"),
        }
    }
}

/// Errors raised while loading configuration or compiling safety tables.
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io {
        /// Path that was being read
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML for [`GuardConfig`](crate::GuardConfig).
    Parse(toml::de::Error),
    /// A configured pattern is not a valid regular expression.
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Underlying regex error
        source: regex::Error,
    },
    /// A configured limit is out of range.
    InvalidLimit {
        /// Name of the limit
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read config {}: {}", path, source),
            Self::Parse(e) => write!(f, "invalid config: {}", e),
            Self::InvalidPattern { pattern, source } => {
                write!(f, "invalid pattern '{}': {}", pattern, source)
            }
            Self::InvalidLimit { name, reason } => write!(f, "invalid limit {}: {}", name, reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
            Self::InvalidPattern { source, .. } => Some(source),
            Self::InvalidLimit { .. } => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e)
    }
}
