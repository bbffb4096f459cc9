//! Field behavior registry.
//!
//! Maps each [`FieldType`] to the static description of how it renders and
//! validates. A closed lookup table shared by the renderer and the
//! validation engine: one entry per variant, no runtime registration.

use crate::schema::FieldType;

/// How a field's input control is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKind {
    /// Single-line `<input>`.
    SingleLine,
    /// Multi-line `<textarea>`.
    MultiLine,
    /// `<select>` dropdown over the declared options.
    Dropdown,
    /// One radio button per declared option.
    ButtonGroup,
}

/// Built-in checks that run before any user-declared pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuiltinCheck {
    /// Loose address-shape check for email fields.
    EmailShape,
}

/// Static rendering/validation behavior for one field type.
#[derive(Clone, Copy, Debug)]
pub struct FieldBehavior {
    pub control: ControlKind,
    /// HTML `type` attribute for single-line controls.
    pub input_type: &'static str,
    /// Whether the schema must declare a non-empty `options` list.
    pub requires_options: bool,
    /// Whether a `placeholder` is rendered.
    pub accepts_placeholder: bool,
    /// Whether user-declared `validation.pattern` rules apply.
    pub supports_pattern: bool,
    pub builtin_check: Option<BuiltinCheck>,
}

/// Look up the behavior for a field type.
pub fn describe_field(field_type: FieldType) -> FieldBehavior {
    match field_type {
        FieldType::Text => FieldBehavior {
            control: ControlKind::SingleLine,
            input_type: "text",
            requires_options: false,
            accepts_placeholder: true,
            supports_pattern: true,
            builtin_check: None,
        },
        FieldType::Email => FieldBehavior {
            control: ControlKind::SingleLine,
            input_type: "email",
            requires_options: false,
            accepts_placeholder: true,
            supports_pattern: true,
            builtin_check: Some(BuiltinCheck::EmailShape),
        },
        FieldType::Select => FieldBehavior {
            control: ControlKind::Dropdown,
            input_type: "text",
            requires_options: true,
            accepts_placeholder: false,
            supports_pattern: false,
            builtin_check: None,
        },
        FieldType::Radio => FieldBehavior {
            control: ControlKind::ButtonGroup,
            input_type: "radio",
            requires_options: true,
            accepts_placeholder: false,
            supports_pattern: false,
            builtin_check: None,
        },
        FieldType::Textarea => FieldBehavior {
            control: ControlKind::MultiLine,
            input_type: "text",
            requires_options: false,
            accepts_placeholder: true,
            supports_pattern: false,
            builtin_check: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_fields_require_options() {
        assert!(describe_field(FieldType::Select).requires_options);
        assert!(describe_field(FieldType::Radio).requires_options);
        assert!(!describe_field(FieldType::Text).requires_options);
    }

    #[test]
    fn test_email_carries_builtin_check() {
        let behavior = describe_field(FieldType::Email);
        assert_eq!(behavior.builtin_check, Some(BuiltinCheck::EmailShape));
        assert!(behavior.supports_pattern);
    }

    #[test]
    fn test_pattern_support_is_limited_to_text_like_fields() {
        assert!(describe_field(FieldType::Text).supports_pattern);
        assert!(!describe_field(FieldType::Textarea).supports_pattern);
        assert!(!describe_field(FieldType::Select).supports_pattern);
    }
}
