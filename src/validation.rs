//! Validation payloads and their flattening into human-readable messages.

use serde_json::Value;

use crate::error::ValidationError;

/// Pseudo-field carrying errors that apply to the whole object.
///
/// Messages under this key are emitted without a field prefix.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// A validation payload captured at the request boundary.
///
/// The shape is resolved once, when the upstream failure is captured, so the
/// formatter never has to inspect it again.
///
/// # Examples
///
/// ```
/// use api_guard::ValidationErrors;
///
/// let errors = ValidationErrors::FieldErrors(vec![
///     ("non_field_errors".to_string(), vec!["A".to_string()]),
///     ("full_name".to_string(), vec!["B".to_string()]),
/// ]);
///
/// assert_eq!(errors.messages(), vec!["A", "Full Name: B"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrors {
    /// Messages keyed by field name, in the order they were reported.
    FieldErrors(Vec<(String, Vec<String>)>),
    /// A flat list of messages.
    FlatList(Vec<String>),
    /// A single message.
    Scalar(String),
}

impl ValidationErrors {
    /// Flattens the payload into an ordered list of messages.
    ///
    /// Field messages are prefixed with the field name in Title Case, except
    /// for [`NON_FIELD_ERRORS`], which is emitted as-is.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::FieldErrors(fields) => {
                let mut out = Vec::new();
                for (field, messages) in fields {
                    if field == NON_FIELD_ERRORS {
                        out.extend(messages.iter().cloned());
                    } else {
                        let label = title_case_field(field);
                        out.extend(messages.iter().map(|m| format!("{}: {}", label, m)));
                    }
                }
                out
            }
            Self::FlatList(messages) => messages.clone(),
            Self::Scalar(message) => vec![message.clone()],
        }
    }
}

impl From<Value> for ValidationErrors {
    /// Resolves a JSON validation payload into its tagged shape.
    ///
    /// Objects become [`FieldErrors`](Self::FieldErrors) with their key order
    /// preserved, arrays become [`FlatList`](Self::FlatList), and anything else
    /// becomes a [`Scalar`](Self::Scalar).
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::FieldErrors(
                map.into_iter()
                    .map(|(field, messages)| {
                        let messages = match messages {
                            Value::Array(items) => items.into_iter().map(stringify).collect(),
                            other => vec![stringify(other)],
                        };
                        (field, messages)
                    })
                    .collect(),
            ),
            Value::Array(items) => Self::FlatList(items.into_iter().map(stringify).collect()),
            other => Self::Scalar(stringify(other)),
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        let message = error.message().to_string();
        match error.field() {
            Some(field) => Self::FieldErrors(vec![(field.to_string(), vec![message])]),
            None => Self::Scalar(message),
        }
    }
}

impl From<Vec<String>> for ValidationErrors {
    fn from(messages: Vec<String>) -> Self {
        Self::FlatList(messages)
    }
}

impl From<String> for ValidationErrors {
    fn from(message: String) -> Self {
        Self::Scalar(message)
    }
}

impl From<&str> for ValidationErrors {
    fn from(message: &str) -> Self {
        Self::Scalar(message.to_string())
    }
}

/// Converts a snake_case field name into Title Case words.
///
/// `full_name` becomes `Full Name`. Each word keeps its first character
/// upper-cased and the rest lower-cased.
pub fn title_case_field(field: &str) -> String {
    field
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

// JSON strings are emitted without their quotes.
fn stringify(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;
    use serde_json::json;

    #[test]
    fn title_case_converts_snake_case() {
        assert_eq!(title_case_field("full_name"), "Full Name");
        assert_eq!(title_case_field("email"), "Email");
        assert_eq!(title_case_field("PHONE_number"), "Phone Number");
    }

    #[test]
    fn non_field_errors_are_unprefixed() {
        let errors = ValidationErrors::from(json!({
            "non_field_errors": ["A"],
            "full_name": ["B"],
        }));

        assert_eq!(errors.messages(), vec!["A", "Full Name: B"]);
    }

    #[test]
    fn field_with_single_message_is_prefixed() {
        let errors = ValidationErrors::from(json!({ "email": "Enter a valid email." }));

        assert_eq!(errors.messages(), vec!["Email: Enter a valid email."]);
    }

    #[test]
    fn field_order_follows_payload() {
        let errors = ValidationErrors::from(json!({
            "zip_code": ["required"],
            "address_line": ["required"],
        }));

        assert_eq!(
            errors.messages(),
            vec!["Zip Code: required", "Address Line: required"]
        );
    }

    #[test]
    fn flat_list_is_stringified_elementwise() {
        let errors = ValidationErrors::from(json!(["first", 2, true]));

        assert_eq!(errors.messages(), vec!["first", "2", "true"]);
    }

    #[test]
    fn scalar_becomes_single_message() {
        let errors = ValidationErrors::from(json!("Invalid input."));

        assert_eq!(errors.messages(), vec!["Invalid input."]);
    }

    #[test]
    fn nested_object_is_stringified() {
        let errors = ValidationErrors::from(json!({ "address": { "city": ["required"] } }));

        assert_eq!(
            errors.messages(),
            vec![r#"Address: {"city":["required"]}"#]
        );
    }

    #[test]
    fn validation_error_with_field_maps_to_field_errors() {
        let error =
            ValidationError::new(ValidationErrorKind::InvalidFormat, "bad").for_field("full_name");

        assert_eq!(
            ValidationErrors::from(error).messages(),
            vec!["Full Name: bad"]
        );
    }

    #[test]
    fn validation_error_without_field_maps_to_scalar() {
        let error = ValidationError::new(ValidationErrorKind::Blocked, "blocked");

        assert_eq!(
            ValidationErrors::from(error),
            ValidationErrors::Scalar("blocked".to_string())
        );
    }
}
