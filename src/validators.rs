//! Field validators shared by request payloads.

use std::path::Path;

use crate::error::{ValidationError, ValidationErrorKind};

/// File extensions accepted for uploaded images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Checks that a phone number carries a country code and only digits.
///
/// # Examples
///
/// ```
/// use api_guard::validators::validate_phone_number;
///
/// assert!(validate_phone_number("+447911123456").is_ok());
/// assert!(validate_phone_number("07911123456").is_err());
/// ```
pub fn validate_phone_number(value: &str) -> Result<(), ValidationError> {
    let Some(digits) = value.strip_prefix('+') else {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidFormat,
            "Phone number must start with country code e.g. (+44).",
        ));
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidFormat,
            "Phone number must be digits.",
        ));
    }
    Ok(())
}

/// Checks that an uploaded file name has an image extension.
///
/// The comparison ignores case; PDFs and other documents are rejected.
pub fn validate_image_file(file_name: &str) -> Result<(), ValidationError> {
    let accepted = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        });

    if accepted {
        Ok(())
    } else {
        Err(ValidationError::new(
            ValidationErrorKind::InvalidFormat,
            "Only image files are allowed. Supported formats: JPG, JPEG, PNG, GIF, WEBP",
        ))
    }
}
