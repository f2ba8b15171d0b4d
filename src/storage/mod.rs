//! Storage seams for the three entity types
//!
//! The HTTP layer only sees these traits; the backing engine is an
//! implementation detail. [`InMemoryStore`] is the reference
//! implementation.
//!
//! Store implementations own the write-time guarantees:
//! - unique `property_code` / `reservation_code`
//! - referential integrity of `property_id` / `advertisement_id`
//! - the reservation date-ordering invariant, checked on every insert
//!   and update via [`Reservation::validate`]
//! - cascade delete down the Property → Advertisement → Reservation chain

mod in_memory;

pub use in_memory::InMemoryStore;

use crate::core::error::ApiResult;
use crate::entities::{Advertisement, Property, Reservation};
use async_trait::async_trait;
use uuid::Uuid;

/// Store operations for [`Property`]
///
/// The two list modes are explicit: `list_available_properties` is the
/// lens every public read goes through, `list_properties` is the
/// unrestricted administrative view.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Insert a new property; rejects a duplicate `property_code`
    async fn insert_property(&self, property: Property) -> ApiResult<Property>;

    /// Fetch by id regardless of availability
    async fn get_property(&self, id: &Uuid) -> ApiResult<Option<Property>>;

    /// All properties, including unavailable ones
    async fn list_properties(&self) -> ApiResult<Vec<Property>>;

    /// Only properties with `is_available == true`
    async fn list_available_properties(&self) -> ApiResult<Vec<Property>>;

    /// Replace an existing property; rejects a duplicate `property_code`
    async fn update_property(&self, id: &Uuid, property: Property) -> ApiResult<Property>;

    /// Delete a property and cascade to its advertisements and their
    /// reservations
    async fn delete_property(&self, id: &Uuid) -> ApiResult<()>;
}

/// Store operations for [`Advertisement`]
#[async_trait]
pub trait AdvertisementStore: Send + Sync {
    /// Insert a new advertisement; `property_id` must exist
    async fn insert_advertisement(&self, advertisement: Advertisement)
    -> ApiResult<Advertisement>;

    async fn get_advertisement(&self, id: &Uuid) -> ApiResult<Option<Advertisement>>;

    /// All advertisements, ordered by platform
    async fn list_advertisements(&self) -> ApiResult<Vec<Advertisement>>;

    /// Replace an existing advertisement; `property_id` must exist
    async fn update_advertisement(
        &self,
        id: &Uuid,
        advertisement: Advertisement,
    ) -> ApiResult<Advertisement>;

    /// Delete an advertisement and cascade to its reservations
    async fn delete_advertisement(&self, id: &Uuid) -> ApiResult<()>;
}

/// Store operations for [`Reservation`]
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Insert a new reservation; validates date ordering, rejects a
    /// duplicate `reservation_code`, `advertisement_id` must exist
    async fn insert_reservation(&self, reservation: Reservation) -> ApiResult<Reservation>;

    async fn get_reservation(&self, id: &Uuid) -> ApiResult<Option<Reservation>>;

    async fn list_reservations(&self) -> ApiResult<Vec<Reservation>>;

    /// Replace an existing reservation under the same checks as insert
    async fn update_reservation(
        &self,
        id: &Uuid,
        reservation: Reservation,
    ) -> ApiResult<Reservation>;

    async fn delete_reservation(&self, id: &Uuid) -> ApiResult<()>;
}
