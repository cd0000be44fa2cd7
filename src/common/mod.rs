//! Shared low-level utilities: binary readers and the error types.

pub mod binary;
pub mod error;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::{Error, Result};
