//! # Casabook
//!
//! A property-rental management backend exposing three related entities
//! (Property, Advertisement, Reservation) through a REST API.
//!
//! ## Features
//!
//! - **Typed Entities**: Property → Advertisement → Reservation dependent chain
//! - **Availability Lens**: public reads only see properties flagged available
//! - **Save-time Validation**: reservation date ordering enforced on every write path
//! - **Cascade Delete**: removing a parent removes its dependents in one step
//! - **Typed Errors**: structured `{code, message, details}` rejections
//! - **Pluggable Storage**: trait seams with an in-memory reference store
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use casabook::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     tracing_subscriber::fmt::init();
//!
//!     let store = InMemoryStore::new();
//!     ServerBuilder::new()
//!         .with_store(store)
//!         .with_config(AppConfig::default())
//!         .serve()
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        entity::Entity,
        error::{ApiError, ApiResult, EntityError, ErrorResponse, ValidationError},
        validation::PayloadFields,
    };

    // === Entities ===
    pub use crate::entities::{Advertisement, Platform, Property, Reservation};

    // === Storage ===
    pub use crate::storage::{
        AdvertisementStore, InMemoryStore, PropertyStore, ReservationStore,
    };

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use rust_decimal::Decimal;
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
