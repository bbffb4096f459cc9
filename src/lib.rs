//! # Dynaform - Schema-Driven Form Engine
//!
//! Dynaform compiles a declarative JSON document into a typed form
//! description, validates user input against per-field rules, and produces
//! a submission record once every field passes.
//!
//! ## Components
//!
//! - **Schema Parser**: untrusted text in, validated [`FormSchema`] or a
//!   discriminated [`SchemaError`] out
//! - **Field Registry**: static lookup from field type to rendering and
//!   validation behavior
//! - **Validation Engine**: pure per-field checks (required, built-in
//!   email shape, user patterns)
//! - **Form Session**: live values, per-field errors, and the frozen
//!   submission record
//!
//! Presentation and export are deliberately outside this crate; the
//! `dynaform-ui` member renders the schema and ships the record.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use dynaform::{parse, FormSession};
//!
//! let schema = parse(r#"{
//!     "formTitle": "Contact",
//!     "formDescription": "Say hello",
//!     "fields": [
//!         { "id": "name", "type": "text", "label": "Name", "required": true }
//!     ]
//! }"#)?;
//!
//! let mut session = FormSession::new(Arc::new(schema));
//! session.set_value("name", "Ada");
//! assert!(session.submit());
//! # Ok::<(), dynaform::SchemaError>(())
//! ```

pub mod registry;
pub mod schema;
pub mod session;
pub mod validation;

pub use registry::{describe_field, BuiltinCheck, ControlKind, FieldBehavior};
pub use schema::{
    parse, FieldDescriptor, FieldOption, FieldPattern, FieldType, FieldValidation, FormSchema,
    SchemaError,
};
pub use session::FormSession;
pub use validation::{validate, ValidationResult};
