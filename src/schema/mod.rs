//! Form schema model and parser.

pub mod parser;
pub mod types;

pub use parser::{parse, SchemaError};
pub use types::*;
