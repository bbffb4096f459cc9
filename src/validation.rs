//! Field validation engine.
//!
//! [`validate`] is a pure function of a field descriptor and its current raw
//! value. Checks run in a fixed order and short-circuit on the first
//! failure: required-ness, then the type's built-in check, then the
//! user-declared pattern. Required-ness and pattern checks are independent
//! axes: an empty optional field passes even when a pattern is declared.

use std::sync::LazyLock;

use regex::Regex;

use crate::registry::{describe_field, BuiltinCheck};
use crate::schema::FieldDescriptor;

/// Loose address-shape check for email fields: something before the `@`,
/// something after it, and a dot in the domain part.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Outcome of validating one field: `Ok` or a human-readable message.
pub type ValidationResult = Result<(), String>;

/// Validate a raw input value against a field's declared rules.
///
/// `raw_value` of `None` means the field was never touched (e.g. an
/// unselected radio group); it is treated the same as an empty string.
pub fn validate(field: &FieldDescriptor, raw_value: Option<&str>) -> ValidationResult {
    let value = raw_value.unwrap_or("");

    if field.required && value.is_empty() {
        return Err(custom_message(field)
            .unwrap_or_else(|| format!("{} is required", field.label)));
    }

    // Shape and pattern checks apply only to non-empty values.
    if value.is_empty() {
        return Ok(());
    }

    let behavior = describe_field(field.field_type);
    if behavior.builtin_check == Some(BuiltinCheck::EmailShape) && !EMAIL_SHAPE.is_match(value) {
        return Err(invalid_message(field));
    }

    if let Some(pattern) = field.validation.as_ref().and_then(|v| v.pattern.as_ref()) {
        if !pattern.is_full_match(value) {
            return Err(invalid_message(field));
        }
    }

    Ok(())
}

fn custom_message(field: &FieldDescriptor) -> Option<String> {
    field
        .validation
        .as_ref()
        .and_then(|v| v.message.as_ref())
        .cloned()
}

fn invalid_message(field: &FieldDescriptor) -> String {
    custom_message(field).unwrap_or_else(|| format!("{} is not valid", field.label))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldPattern, FieldType, FieldValidation};

    fn field(field_type: FieldType, required: bool) -> FieldDescriptor {
        FieldDescriptor {
            id: "f".to_string(),
            field_type,
            label: "Field".to_string(),
            required,
            placeholder: None,
            options: vec![],
            validation: None,
        }
    }

    fn with_pattern(mut descriptor: FieldDescriptor, pattern: &str) -> FieldDescriptor {
        descriptor.validation = Some(FieldValidation {
            pattern: Some(FieldPattern::compile(pattern).unwrap()),
            message: None,
        });
        descriptor
    }

    #[test]
    fn test_required_empty_fails_with_label() {
        let descriptor = field(FieldType::Text, true);
        let err = validate(&descriptor, Some("")).unwrap_err();
        assert_eq!(err, "Field is required");

        let err = validate(&descriptor, None).unwrap_err();
        assert_eq!(err, "Field is required");
    }

    #[test]
    fn test_optional_empty_passes_even_with_pattern() {
        let descriptor = with_pattern(field(FieldType::Text, false), "[0-9]+");
        assert!(validate(&descriptor, Some("")).is_ok());
        assert!(validate(&descriptor, None).is_ok());
    }

    #[test]
    fn test_pattern_requires_full_match() {
        let descriptor = with_pattern(field(FieldType::Text, false), "[0-9]{3}");
        assert!(validate(&descriptor, Some("123")).is_ok());
        // A substring match is not enough.
        assert!(validate(&descriptor, Some("1234")).is_err());
        assert!(validate(&descriptor, Some("x123")).is_err());
    }

    #[test]
    fn test_email_builtin_check() {
        let descriptor = field(FieldType::Email, false);
        assert!(validate(&descriptor, Some("a@b.co")).is_ok());
        let err = validate(&descriptor, Some("not-an-email")).unwrap_err();
        assert_eq!(err, "Field is not valid");
    }

    #[test]
    fn test_email_builtin_runs_before_user_pattern() {
        // The user pattern would accept this value; the built-in shape
        // check still rejects it.
        let descriptor = with_pattern(field(FieldType::Email, false), ".*");
        assert!(validate(&descriptor, Some("no-at-sign")).is_err());
        assert!(validate(&descriptor, Some("a@b.co")).is_ok());
    }

    #[test]
    fn test_custom_message_overrides_builtin_text() {
        let mut descriptor = field(FieldType::Email, true);
        descriptor.validation = Some(FieldValidation {
            pattern: None,
            message: Some("Please enter a real address".to_string()),
        });

        let err = validate(&descriptor, Some("nope")).unwrap_err();
        assert_eq!(err, "Please enter a real address");

        let err = validate(&descriptor, Some("")).unwrap_err();
        assert_eq!(err, "Please enter a real address");
    }

    #[test]
    fn test_required_select_without_selection() {
        let descriptor = field(FieldType::Select, true);
        assert!(validate(&descriptor, None).is_err());
        assert!(validate(&descriptor, Some("red")).is_ok());
    }
}
