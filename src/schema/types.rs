//! Core types for the parsed form schema.
//!
//! A [`FormSchema`] is the validated, immutable description of one form:
//! title, description, and an ordered list of field descriptors. Instances
//! are only produced by [`crate::schema::parse`]; nothing mutates them
//! afterwards.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Field Type
// ============================================================================

/// The closed set of supported field types.
///
/// Adding a type means adding a variant here plus one entry in
/// [`crate::registry::describe_field`]; there is no open-ended plugin
/// mechanism.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    Email,
    Select,
    Radio,
    Textarea,
}

impl FieldType {
    /// Parse a schema `type` tag. Unknown tags return `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "text" => Some(FieldType::Text),
            "email" => Some(FieldType::Email),
            "select" => Some(FieldType::Select),
            "radio" => Some(FieldType::Radio),
            "textarea" => Some(FieldType::Textarea),
            _ => None,
        }
    }

    /// The tag used in the JSON schema surface.
    pub fn as_tag(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Textarea => "textarea",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

// ============================================================================
// Field Pattern
// ============================================================================

/// A user-declared validation pattern, kept together with its compiled form.
///
/// The regex is anchored at compile time so matching is always against the
/// full value, never a substring. Equality and serialization go through the
/// raw pattern string, which keeps schema round-trips exact.
#[derive(Clone)]
pub struct FieldPattern {
    raw: String,
    regex: Regex,
}

impl FieldPattern {
    /// Compile a raw pattern string. Fails if the pattern is not a valid
    /// regular expression.
    pub fn compile(raw: &str) -> Result<Self, regex::Error> {
        // Check the pattern as written first, so error spans refer to it
        // rather than to the anchored wrapper.
        Regex::new(raw)?;
        let regex = Regex::new(&format!("^(?:{})$", raw))?;
        Ok(Self {
            raw: raw.to_string(),
            regex,
        })
    }

    /// The pattern as written in the schema.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether `value` matches the pattern in full.
    pub fn is_full_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl PartialEq for FieldPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl fmt::Debug for FieldPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldPattern").field(&self.raw).finish()
    }
}

// ============================================================================
// Descriptors
// ============================================================================

/// One option of a select or radio field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

/// User-declared validation rules for a text or email field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldValidation {
    /// Pattern the full value must match, if present.
    pub pattern: Option<FieldPattern>,
    /// Message overriding the built-in error texts.
    pub message: Option<String>,
}

/// The typed specification of one input control and its validation rules.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    /// Stable key identifying this field's value in the submission record.
    pub id: String,
    pub field_type: FieldType,
    /// Display name, also used in generated error messages.
    pub label: String,
    pub required: bool,
    /// Placeholder text; rendered only for text/email/textarea controls.
    pub placeholder: Option<String>,
    /// Options for select/radio fields; empty for all other types.
    pub options: Vec<FieldOption>,
    pub validation: Option<FieldValidation>,
}

/// The parsed, validated in-memory representation of a form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormSchema {
    pub title: String,
    pub description: String,
    /// Fields in rendering order.
    pub fields: Vec<FieldDescriptor>,
}

impl FormSchema {
    /// Look up a field by id.
    pub fn field(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Serialize back to the JSON schema surface accepted by the parser.
    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("formTitle".to_string(), Value::String(self.title.clone()));
        obj.insert(
            "formDescription".to_string(),
            Value::String(self.description.clone()),
        );
        obj.insert(
            "fields".to_string(),
            Value::Array(self.fields.iter().map(field_to_json).collect()),
        );
        Value::Object(obj)
    }

    /// Pretty-printed form of [`Self::to_json`].
    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(&self.to_json()).unwrap_or_default()
    }
}

fn field_to_json(field: &FieldDescriptor) -> Value {
    let mut obj = Map::new();
    obj.insert("id".to_string(), Value::String(field.id.clone()));
    obj.insert(
        "type".to_string(),
        Value::String(field.field_type.as_tag().to_string()),
    );
    obj.insert("label".to_string(), Value::String(field.label.clone()));
    if field.required {
        obj.insert("required".to_string(), Value::Bool(true));
    }
    if let Some(placeholder) = &field.placeholder {
        obj.insert(
            "placeholder".to_string(),
            Value::String(placeholder.clone()),
        );
    }
    if !field.options.is_empty() {
        let options = field
            .options
            .iter()
            .map(|opt| serde_json::to_value(opt).unwrap_or(Value::Null))
            .collect();
        obj.insert("options".to_string(), Value::Array(options));
    }
    if let Some(validation) = &field.validation {
        let mut rules = Map::new();
        if let Some(pattern) = &validation.pattern {
            rules.insert(
                "pattern".to_string(),
                Value::String(pattern.as_str().to_string()),
            );
        }
        if let Some(message) = &validation.message {
            rules.insert("message".to_string(), Value::String(message.clone()));
        }
        obj.insert("validation".to_string(), Value::Object(rules));
    }
    Value::Object(obj)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_tags() {
        assert_eq!(FieldType::from_tag("email"), Some(FieldType::Email));
        assert_eq!(FieldType::from_tag("checkbox"), None);
        assert_eq!(FieldType::Radio.as_tag(), "radio");
    }

    #[test]
    fn test_pattern_full_match() {
        let pattern = FieldPattern::compile("[a-z]+").unwrap();
        assert!(pattern.is_full_match("abc"));
        assert!(!pattern.is_full_match("abc1"));
        assert!(!pattern.is_full_match("1abc"));
    }

    #[test]
    fn test_pattern_equality_ignores_compiled_form() {
        let a = FieldPattern::compile("^a+$").unwrap();
        let b = FieldPattern::compile("^a+$").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "^a+$");
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        assert!(FieldPattern::compile("[unclosed").is_err());
    }

    #[test]
    fn test_field_lookup() {
        let schema = FormSchema {
            title: "T".to_string(),
            description: "D".to_string(),
            fields: vec![FieldDescriptor {
                id: "name".to_string(),
                field_type: FieldType::Text,
                label: "Name".to_string(),
                required: false,
                placeholder: None,
                options: vec![],
                validation: None,
            }],
        };

        assert!(schema.field("name").is_some());
        assert!(schema.field("missing").is_none());
    }
}
