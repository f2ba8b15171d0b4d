//! HTTP server: shared state, route table and builder

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use router::build_routes;

use crate::storage::{AdvertisementStore, PropertyStore, ReservationStore};
use std::sync::Arc;

/// Shared state handed to every handler.
///
/// The three fields usually point at the same store instance; keeping
/// them as separate trait objects keeps the handlers ignorant of the
/// backing engine.
#[derive(Clone)]
pub struct AppState {
    pub properties: Arc<dyn PropertyStore>,
    pub advertisements: Arc<dyn AdvertisementStore>,
    pub reservations: Arc<dyn ReservationStore>,
}

impl AppState {
    /// Build state from a single store implementing all three seams
    pub fn from_store<S>(store: S) -> Self
    where
        S: PropertyStore + AdvertisementStore + ReservationStore + 'static,
    {
        let store = Arc::new(store);
        Self {
            properties: store.clone(),
            advertisements: store.clone(),
            reservations: store,
        }
    }
}
