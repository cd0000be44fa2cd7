/// Constants for the OLE object field format
pub mod consts;

/// OLE object field header and embedded object iterator
pub mod field;

// Re-export public types for convenient access
pub use field::{EmbeddedObject, ObjectKind, Objects, OleField, OleFieldHeader, objects};
