//! Form session state machine.
//!
//! A [`FormSession`] owns the mutable runtime state for one rendered form:
//! current values, per-field errors, submission status, and the frozen
//! submission record. Its lifetime is bound to one successfully parsed
//! schema; a re-parse discards the session and starts fresh.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::schema::FormSchema;
use crate::validation::validate;

/// Mutable runtime state for one instance of a rendered form.
///
/// State machine: `Editing` loops on every [`Self::set_value`], revalidating
/// just that field; [`Self::submit`] sweeps the whole form and either
/// freezes the submission record or returns to editing with the accumulated
/// errors. Once submitted, the session is terminal until [`Self::reset`].
#[derive(Clone, Debug)]
pub struct FormSession {
    schema: Arc<FormSchema>,
    values: HashMap<String, String>,
    errors: HashMap<String, String>,
    submitted: bool,
    submission_record: Option<Map<String, Value>>,
}

impl FormSession {
    /// Create a pristine session over a parsed schema.
    pub fn new(schema: Arc<FormSchema>) -> Self {
        Self {
            schema,
            values: HashMap::new(),
            errors: HashMap::new(),
            submitted: false,
            submission_record: None,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// A shareable handle to the (immutable) schema, e.g. for a renderer
    /// that outlives a borrow of the session.
    pub fn schema_handle(&self) -> Arc<FormSchema> {
        Arc::clone(&self.schema)
    }

    /// The current raw value of a field, if one has been entered.
    pub fn value(&self, field_id: &str) -> Option<&str> {
        self.values.get(field_id).map(String::as_str)
    }

    /// The current validation error of a field, if any.
    pub fn error(&self, field_id: &str) -> Option<&str> {
        self.errors.get(field_id).map(String::as_str)
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }

    /// The frozen submission record; present only after a passing submit.
    pub fn submission_record(&self) -> Option<&Map<String, Value>> {
        self.submission_record.as_ref()
    }

    /// Pretty-printed JSON form of the submission record, for export.
    pub fn submission_json(&self) -> Option<String> {
        self.submission_record
            .as_ref()
            .and_then(|record| serde_json::to_string_pretty(record).ok())
    }

    /// Commit an edit to one field and revalidate it.
    ///
    /// Unknown field ids are ignored. Edits after a successful submit are
    /// ignored too: the session is terminal and its record stays frozen.
    pub fn set_value(&mut self, field_id: &str, raw: impl Into<String>) {
        if self.submitted {
            return;
        }
        let Some(field) = self.schema.field(field_id) else {
            warn!("set_value on unknown field id '{}'", field_id);
            return;
        };

        let raw = raw.into();
        match validate(field, Some(&raw)) {
            Ok(()) => {
                self.errors.remove(field_id);
            }
            Err(message) => {
                self.errors.insert(field_id.to_string(), message);
            }
        }
        self.values.insert(field_id.to_string(), raw);
    }

    /// Attempt to submit the form.
    ///
    /// Unlike per-edit validation, this sweeps every field in the schema so
    /// never-touched required fields are caught. On success the submission
    /// record is frozen as a snapshot of the current values, in schema
    /// field order. Idempotent once submitted.
    pub fn submit(&mut self) -> bool {
        if self.submitted {
            return true;
        }

        let mut errors = HashMap::new();
        for field in &self.schema.fields {
            if let Err(message) = validate(field, self.value(&field.id)) {
                errors.insert(field.id.clone(), message);
            }
        }

        if errors.is_empty() {
            let mut record = Map::new();
            for field in &self.schema.fields {
                let value = self.value(&field.id).unwrap_or_default();
                record.insert(field.id.clone(), Value::String(value.to_string()));
            }
            self.errors.clear();
            self.submission_record = Some(record);
            self.submitted = true;
            debug!("form '{}' submitted", self.schema.title);
            true
        } else {
            debug!(
                "submit of form '{}' rejected with {} invalid fields",
                self.schema.title,
                errors.len()
            );
            self.errors = errors;
            false
        }
    }

    /// Discard all session state and return to pristine editing.
    pub fn reset(&mut self) {
        self.values.clear();
        self.errors.clear();
        self.submitted = false;
        self.submission_record = None;
    }
}

// ============================================================================
// Tests
// ============================================================================
