//! Invoice value types, code tables, and monetary validation.
//!
//! The types here are plain records: the caller constructs them once with
//! all fields set, and validation is computed on demand rather than cached
//! on the entity.

mod error;
mod tables;
mod types;
mod validation;

pub use error::*;
pub use tables::*;
pub use types::*;
pub use validation::*;
