//! Core module containing the entity abstraction, typed errors and
//! payload validation helpers

pub mod entity;
pub mod error;
pub mod validation;

pub use entity::Entity;
pub use error::{ApiError, ApiResult, EntityError, ErrorResponse, ValidationError};
