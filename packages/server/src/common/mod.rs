// Common types and utilities shared across the application

pub mod entity_ids;
pub mod errors;
pub mod id;
pub mod types;
pub mod utils;
pub mod validation;

pub use entity_ids::*;
pub use errors::DomainError;
pub use id::Id;
pub use types::*;
pub use validation::{FieldError, Validator};
