//! Typed error handling for the casabook backend
//!
//! This module provides the error hierarchy surfaced by the REST layer.
//! Every error is a deterministic consequence of the supplied data: nothing
//! here is transient or retryable.
//!
//! # Error Categories
//!
//! - [`EntityError`]: lookup misses and unique-constraint violations
//! - [`ValidationError`]: rejected writes (date ordering, enumerated
//!   choices, missing or malformed fields, dangling references)
//!
//! # Example
//!
//! ```rust,ignore
//! use casabook::prelude::*;
//!
//! match store.get_property(&id).await {
//!     Err(ApiError::Entity(EntityError::NotFound { id, .. })) => {
//!         println!("property {} not found", id);
//!     }
//!     other => { /* ... */ }
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// The main error type for the casabook backend
#[derive(Debug)]
pub enum ApiError {
    /// Entity-level errors (lookup miss, duplicate code)
    Entity(EntityError),

    /// Rejected writes
    Validation(ValidationError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Entity(e) => write!(f, "{}", e),
            ApiError::Validation(e) => write!(f, "{}", e),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Entity(e) => Some(e),
            ApiError::Validation(e) => Some(e),
            ApiError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Entity(e) => e.status_code(),
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Entity(e) => e.error_code(),
            ApiError::Validation(e) => e.error_code(),
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id.to_string()
                }))
            }
            ApiError::Entity(EntityError::DuplicateCode { entity_type, code }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "code": code
                }))
            }
            ApiError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            ApiError::Validation(ValidationError::InvalidChoice { field, allowed, .. }) => {
                Some(serde_json::json!({
                    "field": field,
                    "allowed": allowed
                }))
            }
            ApiError::Validation(ValidationError::UnknownReference { field, id }) => {
                Some(serde_json::json!({
                    "field": field,
                    "id": id.to_string()
                }))
            }
            _ => None,
        }
    }

    /// Shorthand for internal errors from lock poisoning and the like
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity lookups and storage-level constraints
#[derive(Debug)]
pub enum EntityError {
    /// No entity at the given identifier
    NotFound { entity_type: String, id: Uuid },

    /// A unique code column already holds this value
    DuplicateCode { entity_type: String, code: String },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { entity_type, id } => {
                write!(f, "{} with id '{}' not found", entity_type, id)
            }
            EntityError::DuplicateCode { entity_type, code } => {
                write!(f, "{} with code '{}' already exists", entity_type, code)
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl EntityError {
    /// Build a NotFound error for a given entity type
    pub fn not_found<E: crate::core::Entity>(id: Uuid) -> Self {
        EntityError::NotFound {
            entity_type: E::resource_name_singular().to_string(),
            id,
        }
    }

    /// Build a DuplicateCode error for a given entity type
    pub fn duplicate_code<E: crate::core::Entity>(code: impl Into<String>) -> Self {
        EntityError::DuplicateCode {
            entity_type: E::resource_name_singular().to_string(),
            code: code.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::DuplicateCode { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::DuplicateCode { .. } => "UNIQUE_CONSTRAINT_VIOLATION",
        }
    }
}

impl From<EntityError> for ApiError {
    fn from(err: EntityError) -> Self {
        ApiError::Entity(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to rejected writes
#[derive(Debug)]
pub enum ValidationError {
    /// Reservation date ordering violated
    DateRange { message: String },

    /// Value outside an enumerated set
    InvalidChoice {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    /// Multiple field validation errors
    FieldErrors(Vec<FieldValidationError>),

    /// Reference to a parent entity that does not exist
    UnknownReference { field: String, id: Uuid },

    /// Invalid JSON payload
    InvalidJson { message: String },

    /// Invalid UUID in a path segment or reference field
    InvalidUuid { value: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    /// The reservation date-ordering rejection with its canonical message
    pub fn date_range() -> Self {
        ValidationError::DateRange {
            message: "check-in date must precede check-out date".to_string(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::DateRange { .. } => "DATE_RANGE_ERROR",
            ValidationError::InvalidChoice { .. } => "INVALID_CHOICE_ERROR",
            ValidationError::FieldErrors(_) => "FIELD_VALIDATION_ERROR",
            ValidationError::UnknownReference { .. } => "UNKNOWN_REFERENCE",
            ValidationError::InvalidJson { .. } => "INVALID_JSON",
            ValidationError::InvalidUuid { .. } => "INVALID_UUID",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DateRange { message } => write!(f, "{}", message),
            ValidationError::InvalidChoice {
                field,
                value,
                allowed,
            } => {
                write!(
                    f,
                    "'{}' is not a valid choice for '{}' (allowed: {})",
                    value,
                    field,
                    allowed.join(", ")
                )
            }
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::UnknownReference { field, id } => {
                write!(f, "'{}' references id '{}' which does not exist", field, id)
            }
            ValidationError::InvalidJson { message } => {
                write!(f, "Invalid JSON: {}", message)
            }
            ValidationError::InvalidUuid { value } => {
                write!(f, "Invalid UUID format: {}", value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<uuid::Error> for ApiError {
    fn from(err: uuid::Error) -> Self {
        ApiError::Validation(ValidationError::InvalidUuid {
            value: err.to_string(),
        })
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for casabook operations
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Tests
// =============================================================================
