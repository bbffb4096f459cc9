pub mod export;
pub mod form_preview;
pub mod schema_editor;
