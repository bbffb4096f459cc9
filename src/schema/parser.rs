//! Schema parsing and validation.
//!
//! Turns untrusted schema text into a validated [`FormSchema`] or a
//! discriminated [`SchemaError`]. Decoding is explicit, field by field, so
//! every semantic problem in the document is reported as a typed error
//! instead of surfacing later as a broken render.

use std::collections::HashMap;

use log::debug;
use serde_json::{Map, Value};
use thiserror::Error;

use super::types::{
    FieldDescriptor, FieldOption, FieldPattern, FieldType, FieldValidation, FormSchema,
};
use crate::registry::describe_field;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema is not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Unknown field type: {0}")]
    UnknownFieldType(String),

    #[error("Duplicate field id: {0}")]
    DuplicateFieldId(String),

    #[error("Field '{0}' needs at least one option")]
    MissingOptions(String),

    #[error("Invalid pattern on field '{field_id}': {source}")]
    InvalidPattern {
        field_id: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl SchemaError {
    /// Whether the text failed to parse as JSON at all, as opposed to being
    /// well-formed JSON with a semantically invalid schema.
    pub fn is_syntax(&self) -> bool {
        matches!(self, SchemaError::Syntax(_))
    }
}

/// Parse schema text into a validated [`FormSchema`].
///
/// Pure transform: no side effects on failure, and the returned schema is
/// never partially constructed.
pub fn parse(text: &str) -> Result<FormSchema, SchemaError> {
    let root: Value = serde_json::from_str(text)?;

    let title = string_or_default(&root, "formTitle");
    let description = string_or_default(&root, "formDescription");

    let fields_value = root
        .get("fields")
        .ok_or_else(|| SchemaError::MissingField("fields".to_string()))?;
    let raw_fields = fields_value
        .as_array()
        .ok_or_else(|| SchemaError::InvalidValue {
            field: "fields".to_string(),
            reason: "expected an array".to_string(),
        })?;

    let mut fields = Vec::with_capacity(raw_fields.len());
    let mut seen_ids: HashMap<String, usize> = HashMap::new();

    for (idx, raw_field) in raw_fields.iter().enumerate() {
        let field = parse_field(raw_field, idx)?;
        if seen_ids.insert(field.id.clone(), idx).is_some() {
            return Err(SchemaError::DuplicateFieldId(field.id));
        }
        fields.push(field);
    }

    debug!("parsed schema '{}' with {} fields", title, fields.len());

    Ok(FormSchema {
        title,
        description,
        fields,
    })
}

fn parse_field(value: &Value, idx: usize) -> Result<FieldDescriptor, SchemaError> {
    let obj = value.as_object().ok_or_else(|| SchemaError::InvalidValue {
        field: format!("fields[{}]", idx),
        reason: "expected an object".to_string(),
    })?;

    let id = required_string(obj, "id", idx)?;
    let type_tag = required_string(obj, "type", idx)?;
    let field_type = FieldType::from_tag(&type_tag)
        .ok_or_else(|| SchemaError::UnknownFieldType(type_tag.clone()))?;
    let label = required_string(obj, "label", idx)?;

    let required = obj
        .get("required")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let placeholder = obj
        .get("placeholder")
        .and_then(Value::as_str)
        .map(String::from);

    let behavior = describe_field(field_type);

    let options = if behavior.requires_options {
        let parsed = parse_options(obj.get("options"), &id, idx)?;
        if parsed.is_empty() {
            return Err(SchemaError::MissingOptions(id));
        }
        parsed
    } else {
        // Options on non-choice fields are ignored, not an error.
        Vec::new()
    };

    let validation = if behavior.supports_pattern {
        parse_validation(obj.get("validation"), &id)?
    } else {
        None
    };

    Ok(FieldDescriptor {
        id,
        field_type,
        label,
        required,
        placeholder,
        options,
        validation,
    })
}

fn parse_options(
    value: Option<&Value>,
    field_id: &str,
    idx: usize,
) -> Result<Vec<FieldOption>, SchemaError> {
    let raw = match value {
        Some(Value::Array(raw)) => raw,
        Some(_) => {
            return Err(SchemaError::InvalidValue {
                field: format!("fields[{}].options", idx),
                reason: "expected an array".to_string(),
            })
        }
        None => return Err(SchemaError::MissingOptions(field_id.to_string())),
    };

    let mut options = Vec::with_capacity(raw.len());
    for (opt_idx, raw_option) in raw.iter().enumerate() {
        let obj = raw_option
            .as_object()
            .ok_or_else(|| SchemaError::InvalidValue {
                field: format!("fields[{}].options[{}]", idx, opt_idx),
                reason: "expected an object".to_string(),
            })?;
        let value = obj
            .get("value")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                SchemaError::MissingField(format!("fields[{}].options[{}].value", idx, opt_idx))
            })?
            .to_string();
        let label = obj
            .get("label")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                SchemaError::MissingField(format!("fields[{}].options[{}].label", idx, opt_idx))
            })?
            .to_string();
        options.push(FieldOption { value, label });
    }

    Ok(options)
}

fn parse_validation(
    value: Option<&Value>,
    field_id: &str,
) -> Result<Option<FieldValidation>, SchemaError> {
    let obj = match value {
        Some(Value::Object(obj)) => obj,
        Some(_) => {
            return Err(SchemaError::InvalidValue {
                field: format!("{}.validation", field_id),
                reason: "expected an object".to_string(),
            })
        }
        None => return Ok(None),
    };

    let pattern = obj
        .get("pattern")
        .and_then(Value::as_str)
        .map(|raw| {
            FieldPattern::compile(raw).map_err(|source| SchemaError::InvalidPattern {
                field_id: field_id.to_string(),
                source,
            })
        })
        .transpose()?;
    let message = obj.get("message").and_then(Value::as_str).map(String::from);

    Ok(Some(FieldValidation { pattern, message }))
}

fn string_or_default(root: &Value, key: &str) -> String {
    root.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn required_string(
    obj: &Map<String, Value>,
    key: &str,
    idx: usize,
) -> Result<String, SchemaError> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .ok_or_else(|| SchemaError::MissingField(format!("fields[{}].{}", idx, key)))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse_value(value: Value) -> Result<FormSchema, SchemaError> {
        parse(&value.to_string())
    }

    #[test]
    fn test_parse_minimal_schema() {
        let schema = parse_value(json!({
            "formTitle": "Contact",
            "formDescription": "Reach out",
            "fields": [
                { "id": "name", "type": "text", "label": "Name", "required": true }
            ]
        }))
        .unwrap();

        assert_eq!(schema.title, "Contact");
        assert_eq!(schema.fields.len(), 1);
        assert_eq!(schema.fields[0].field_type, FieldType::Text);
        assert!(schema.fields[0].required);
    }

    #[test]
    fn test_empty_fields_is_valid() {
        let schema = parse_value(json!({
            "formTitle": "T",
            "formDescription": "D",
            "fields": []
        }))
        .unwrap();
        assert!(schema.fields.is_empty());
    }

    #[test]
    fn test_malformed_text_is_syntax_error() {
        let err = parse("{not json").unwrap_err();
        assert!(err.is_syntax());
    }

    #[test]
    fn test_missing_fields_key() {
        let err = parse_value(json!({ "formTitle": "T" })).unwrap_err();
        assert!(matches!(err, SchemaError::MissingField(name) if name == "fields"));
    }

    #[test]
    fn test_missing_label() {
        let err = parse_value(json!({
            "fields": [{ "id": "a", "type": "text" }]
        }))
        .unwrap_err();
        assert!(matches!(err, SchemaError::MissingField(name) if name == "fields[0].label"));
    }

    #[test]
    fn test_unknown_field_type() {
        let err = parse_value(json!({
            "fields": [{ "id": "a", "type": "checkbox", "label": "A" }]
        }))
        .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownFieldType(tag) if tag == "checkbox"));
    }

    #[test]
    fn test_duplicate_field_id() {
        let err = parse_value(json!({
            "fields": [
                { "id": "a", "type": "text", "label": "First" },
                { "id": "a", "type": "text", "label": "Second" }
            ]
        }))
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateFieldId(id) if id == "a"));
    }

    #[test]
    fn test_select_requires_options() {
        let err = parse_value(json!({
            "fields": [{ "id": "a", "type": "select", "label": "A", "options": [] }]
        }))
        .unwrap_err();
        assert!(matches!(err, SchemaError::MissingOptions(id) if id == "a"));

        let err = parse_value(json!({
            "fields": [{ "id": "b", "type": "radio", "label": "B" }]
        }))
        .unwrap_err();
        assert!(matches!(err, SchemaError::MissingOptions(id) if id == "b"));
    }

    #[test]
    fn test_options_ignored_on_text_fields() {
        let schema = parse_value(json!({
            "fields": [{
                "id": "a", "type": "text", "label": "A",
                "options": [{ "value": "x", "label": "X" }]
            }]
        }))
        .unwrap();
        assert!(schema.fields[0].options.is_empty());
    }

    #[test]
    fn test_invalid_pattern_surfaces_at_parse_time() {
        let err = parse_value(json!({
            "fields": [{
                "id": "a", "type": "text", "label": "A",
                "validation": { "pattern": "[unclosed" }
            }]
        }))
        .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPattern { field_id, .. } if field_id == "a"));
    }

    #[test]
    fn test_valid_pattern_compiles() {
        let schema = parse_value(json!({
            "fields": [{
                "id": "em", "type": "email", "label": "Email",
                "validation": { "pattern": "^.+@.+\\..+$", "message": "Bad address" }
            }]
        }))
        .unwrap();

        let validation = schema.fields[0].validation.as_ref().unwrap();
        assert_eq!(validation.message.as_deref(), Some("Bad address"));
        assert!(validation.pattern.as_ref().unwrap().is_full_match("a@b.co"));
    }

    #[test]
    fn test_roundtrip_through_serialization() {
        let schema = parse_value(json!({
            "formTitle": "Survey",
            "formDescription": "Tell us",
            "fields": [
                {
                    "id": "name", "type": "text", "label": "Name",
                    "required": true, "placeholder": "Ada"
                },
                {
                    "id": "em", "type": "email", "label": "Email",
                    "validation": { "pattern": "^.+@.+$", "message": "Bad" }
                },
                {
                    "id": "color", "type": "select", "label": "Color",
                    "options": [
                        { "value": "r", "label": "Red" },
                        { "value": "g", "label": "Green" }
                    ]
                }
            ]
        }))
        .unwrap();

        let reparsed = parse(&schema.to_json_string()).unwrap();
        assert_eq!(schema, reparsed);
    }
}
