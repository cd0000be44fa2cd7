//! Error types for olefield.
//!
//! Data errors (truncation, structural corruption, unsupported variants) are
//! kept apart from [`SpecError`], which signals a malformed field spec and is
//! always a programming error.

// Submodule declarations
pub mod types;
pub mod conversions;

// Re-exports
pub use types::{Error, Result, SpecError};
