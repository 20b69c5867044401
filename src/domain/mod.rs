//! I/O-free core types: the document, its decoded values, the value
//! codec and the editing schema.

pub mod codec;
pub mod document;
pub mod schema;
pub mod value;

pub use document::Document;
pub use value::{Literal, Value};
