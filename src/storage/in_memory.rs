//! In-memory store implementation for testing and development
//!
//! All three tables sit behind one `RwLock`, so every write — including
//! the two-phase cascade deletes — happens inside a single lock
//! acquisition, which stands in for the ambient transaction a database
//! backend would supply.

use crate::core::error::{ApiError, ApiResult, EntityError, ValidationError};
use crate::entities::{Advertisement, Property, Reservation};
use crate::storage::{AdvertisementStore, PropertyStore, ReservationStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    properties: HashMap<Uuid, Property>,
    advertisements: HashMap<Uuid, Advertisement>,
    reservations: HashMap<Uuid, Reservation>,
}

/// In-memory store backing all three entity types.
///
/// Cloning is cheap and clones share the same tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ApiResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|e| ApiError::internal(format!("failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> ApiResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|e| ApiError::internal(format!("failed to acquire write lock: {}", e)))
    }
}

/// Unique `property_code` across all properties except `exclude`
fn property_code_taken(tables: &Tables, code: &str, exclude: Option<&Uuid>) -> bool {
    tables
        .properties
        .values()
        .any(|p| p.property_code == code && Some(&p.id) != exclude)
}

/// Unique `reservation_code` across all reservations except `exclude`
fn reservation_code_taken(tables: &Tables, code: &str, exclude: Option<&Uuid>) -> bool {
    tables
        .reservations
        .values()
        .any(|r| r.reservation_code == code && Some(&r.id) != exclude)
}

fn check_property_exists(tables: &Tables, property_id: &Uuid) -> Result<(), ApiError> {
    if tables.properties.contains_key(property_id) {
        Ok(())
    } else {
        Err(ValidationError::UnknownReference {
            field: "property_id".to_string(),
            id: *property_id,
        }
        .into())
    }
}

fn check_advertisement_exists(tables: &Tables, advertisement_id: &Uuid) -> Result<(), ApiError> {
    if tables.advertisements.contains_key(advertisement_id) {
        Ok(())
    } else {
        Err(ValidationError::UnknownReference {
            field: "advertisement_id".to_string(),
            id: *advertisement_id,
        }
        .into())
    }
}

#[async_trait]
impl PropertyStore for InMemoryStore {
    async fn insert_property(&self, property: Property) -> ApiResult<Property> {
        let mut tables = self.write()?;

        if property_code_taken(&tables, &property.property_code, None) {
            return Err(EntityError::duplicate_code::<Property>(&property.property_code).into());
        }

        tables.properties.insert(property.id, property.clone());
        Ok(property)
    }

    async fn get_property(&self, id: &Uuid) -> ApiResult<Option<Property>> {
        Ok(self.read()?.properties.get(id).cloned())
    }

    async fn list_properties(&self) -> ApiResult<Vec<Property>> {
        Ok(self.read()?.properties.values().cloned().collect())
    }

    async fn list_available_properties(&self) -> ApiResult<Vec<Property>> {
        Ok(self
            .read()?
            .properties
            .values()
            .filter(|p| p.is_available)
            .cloned()
            .collect())
    }

    async fn update_property(&self, id: &Uuid, property: Property) -> ApiResult<Property> {
        let mut tables = self.write()?;

        if !tables.properties.contains_key(id) {
            return Err(EntityError::not_found::<Property>(*id).into());
        }
        if property_code_taken(&tables, &property.property_code, Some(id)) {
            return Err(EntityError::duplicate_code::<Property>(&property.property_code).into());
        }

        tables.properties.insert(*id, property.clone());
        Ok(property)
    }

    async fn delete_property(&self, id: &Uuid) -> ApiResult<()> {
        let mut tables = self.write()?;

        if tables.properties.remove(id).is_none() {
            return Err(EntityError::not_found::<Property>(*id).into());
        }

        // Two-phase cascade: reservations of the dependent advertisements
        // first, then the advertisements themselves.
        let advertisement_ids: Vec<Uuid> = tables
            .advertisements
            .values()
            .filter(|a| a.property_id == *id)
            .map(|a| a.id)
            .collect();
        tables
            .reservations
            .retain(|_, r| !advertisement_ids.contains(&r.advertisement_id));
        tables.advertisements.retain(|_, a| a.property_id != *id);

        Ok(())
    }
}

#[async_trait]
impl AdvertisementStore for InMemoryStore {
    async fn insert_advertisement(
        &self,
        advertisement: Advertisement,
    ) -> ApiResult<Advertisement> {
        let mut tables = self.write()?;

        check_property_exists(&tables, &advertisement.property_id)?;

        tables
            .advertisements
            .insert(advertisement.id, advertisement.clone());
        Ok(advertisement)
    }

    async fn get_advertisement(&self, id: &Uuid) -> ApiResult<Option<Advertisement>> {
        Ok(self.read()?.advertisements.get(id).cloned())
    }

    async fn list_advertisements(&self) -> ApiResult<Vec<Advertisement>> {
        let mut advertisements: Vec<Advertisement> =
            self.read()?.advertisements.values().cloned().collect();
        advertisements.sort_by_key(|a| a.platform);
        Ok(advertisements)
    }

    async fn update_advertisement(
        &self,
        id: &Uuid,
        advertisement: Advertisement,
    ) -> ApiResult<Advertisement> {
        let mut tables = self.write()?;

        if !tables.advertisements.contains_key(id) {
            return Err(EntityError::not_found::<Advertisement>(*id).into());
        }
        check_property_exists(&tables, &advertisement.property_id)?;

        tables.advertisements.insert(*id, advertisement.clone());
        Ok(advertisement)
    }

    async fn delete_advertisement(&self, id: &Uuid) -> ApiResult<()> {
        let mut tables = self.write()?;

        if tables.advertisements.remove(id).is_none() {
            return Err(EntityError::not_found::<Advertisement>(*id).into());
        }
        tables.reservations.retain(|_, r| r.advertisement_id != *id);

        Ok(())
    }
}

#[async_trait]
impl ReservationStore for InMemoryStore {
    async fn insert_reservation(&self, reservation: Reservation) -> ApiResult<Reservation> {
        let mut tables = self.write()?;

        reservation.validate()?;
        check_advertisement_exists(&tables, &reservation.advertisement_id)?;
        if reservation_code_taken(&tables, &reservation.reservation_code, None) {
            return Err(
                EntityError::duplicate_code::<Reservation>(&reservation.reservation_code).into(),
            );
        }

        tables
            .reservations
            .insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn get_reservation(&self, id: &Uuid) -> ApiResult<Option<Reservation>> {
        Ok(self.read()?.reservations.get(id).cloned())
    }

    async fn list_reservations(&self) -> ApiResult<Vec<Reservation>> {
        Ok(self.read()?.reservations.values().cloned().collect())
    }

    async fn update_reservation(
        &self,
        id: &Uuid,
        reservation: Reservation,
    ) -> ApiResult<Reservation> {
        let mut tables = self.write()?;

        if !tables.reservations.contains_key(id) {
            return Err(EntityError::not_found::<Reservation>(*id).into());
        }
        reservation.validate()?;
        check_advertisement_exists(&tables, &reservation.advertisement_id)?;
        if reservation_code_taken(&tables, &reservation.reservation_code, Some(id)) {
            return Err(
                EntityError::duplicate_code::<Reservation>(&reservation.reservation_code).into(),
            );
        }

        tables.reservations.insert(*id, reservation.clone());
        Ok(reservation)
    }

    async fn delete_reservation(&self, id: &Uuid) -> ApiResult<()> {
        let mut tables = self.write()?;

        if tables.reservations.remove(id).is_none() {
            return Err(EntityError::not_found::<Reservation>(*id).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_property(code: &str, available: bool) -> Property {
        Property::new(
            code.to_string(),
            4,
            2,
            true,
            Decimal::new(12050, 2),
            date(2024, 1, 15),
            available,
        )
    }

    fn sample_advertisement(
        platform: crate::entities::Platform,
        property_id: Uuid,
    ) -> Advertisement {
        Advertisement::new(platform, Decimal::new(3500, 2), property_id)
    }

    fn sample_reservation(code: &str, advertisement_id: Uuid) -> Reservation {
        Reservation::new(
            code.to_string(),
            date(2024, 5, 5),
            date(2024, 5, 10),
            Decimal::new(45000, 2),
            String::new(),
            2,
            advertisement_id,
        )
    }

    #[tokio::test]
    async fn test_insert_and_get_property() {
        let store = InMemoryStore::new();
        let property = store
            .insert_property(sample_property("A100", true))
            .await
            .unwrap();

        let fetched = store.get_property(&property.id).await.unwrap();
        assert_eq!(fetched, Some(property));
    }

    #[tokio::test]
    async fn test_duplicate_property_code_rejected() {
        let store = InMemoryStore::new();
        store
            .insert_property(sample_property("A100", true))
            .await
            .unwrap();

        let err = store
            .insert_property(sample_property("A100", true))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Entity(EntityError::DuplicateCode { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_into_code_collision_rejected() {
        let store = InMemoryStore::new();
        store
            .insert_property(sample_property("A100", true))
            .await
            .unwrap();
        let second = store
            .insert_property(sample_property("B200", true))
            .await
            .unwrap();

        let mut renamed = second.clone();
        renamed.property_code = "A100".to_string();
        let err = store
            .update_property(&second.id, renamed)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Entity(EntityError::DuplicateCode { .. })
        ));

        // Keeping its own code is not a collision
        let unchanged = store.update_property(&second.id, second.clone()).await;
        assert!(unchanged.is_ok());
    }

    #[tokio::test]
    async fn test_available_lens() {
        let store = InMemoryStore::new();
        store
            .insert_property(sample_property("A100", true))
            .await
            .unwrap();
        let hidden = store
            .insert_property(sample_property("B200", false))
            .await
            .unwrap();

        assert_eq!(store.list_properties().await.unwrap().len(), 2);
        let available = store.list_available_properties().await.unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].property_code, "A100");

        // The unrestricted getter still sees it
        assert!(store.get_property(&hidden.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_availability_flip_is_visible_immediately() {
        let store = InMemoryStore::new();
        let property = store
            .insert_property(sample_property("A100", true))
            .await
            .unwrap();
        assert_eq!(store.list_available_properties().await.unwrap().len(), 1);

        let mut flipped = property.clone();
        flipped.is_available = false;
        store.update_property(&property.id, flipped).await.unwrap();

        assert!(store.list_available_properties().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_advertisement_requires_existing_property() {
        let store = InMemoryStore::new();
        let err = store
            .insert_advertisement(sample_advertisement(
                crate::entities::Platform::AirBnb,
                Uuid::new_v4(),
            ))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::UnknownReference { .. })
        ));
    }

    #[tokio::test]
    async fn test_advertisements_listed_by_platform() {
        use crate::entities::Platform;

        let store = InMemoryStore::new();
        let property = store
            .insert_property(sample_property("A100", true))
            .await
            .unwrap();

        for platform in [Platform::Skyscanner, Platform::AirBnb, Platform::BookingCom] {
            store
                .insert_advertisement(sample_advertisement(platform, property.id))
                .await
                .unwrap();
        }

        let platforms: Vec<Platform> = store
            .list_advertisements()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.platform)
            .collect();
        assert_eq!(
            platforms,
            vec![Platform::AirBnb, Platform::BookingCom, Platform::Skyscanner]
        );
    }

    #[tokio::test]
    async fn test_reservation_date_invariant_on_insert_and_update() {
        let store = InMemoryStore::new();
        let property = store
            .insert_property(sample_property("A100", true))
            .await
            .unwrap();
        let advertisement = store
            .insert_advertisement(sample_advertisement(
                crate::entities::Platform::AirBnb,
                property.id,
            ))
            .await
            .unwrap();

        let mut inverted = sample_reservation("RES-001", advertisement.id);
        inverted.check_in_date = date(2024, 5, 10);
        inverted.check_out_date = date(2024, 5, 5);
        let err = store.insert_reservation(inverted.clone()).await.unwrap_err();
        assert_eq!(err.error_code(), "DATE_RANGE_ERROR");
        // Rejection left no partial state behind
        assert!(store.list_reservations().await.unwrap().is_empty());

        // Retrying the same invalid payload rejects identically
        let err = store.insert_reservation(inverted).await.unwrap_err();
        assert_eq!(err.error_code(), "DATE_RANGE_ERROR");
        assert!(store.list_reservations().await.unwrap().is_empty());

        // A valid insert, then an update that would invert the dates
        let stored = store
            .insert_reservation(sample_reservation("RES-001", advertisement.id))
            .await
            .unwrap();
        let mut bad_update = stored.clone();
        bad_update.check_out_date = date(2024, 5, 1);
        let err = store
            .update_reservation(&stored.id, bad_update)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "DATE_RANGE_ERROR");

        let kept = store.get_reservation(&stored.id).await.unwrap().unwrap();
        assert_eq!(kept.check_out_date, date(2024, 5, 10));
    }

    #[tokio::test]
    async fn test_duplicate_reservation_code_rejected() {
        let store = InMemoryStore::new();
        let property = store
            .insert_property(sample_property("A100", true))
            .await
            .unwrap();
        let advertisement = store
            .insert_advertisement(sample_advertisement(
                crate::entities::Platform::AirBnb,
                property.id,
            ))
            .await
            .unwrap();

        store
            .insert_reservation(sample_reservation("RES-001", advertisement.id))
            .await
            .unwrap();
        let err = store
            .insert_reservation(sample_reservation("RES-001", advertisement.id))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Entity(EntityError::DuplicateCode { .. })
        ));
    }

    #[tokio::test]
    async fn test_cascade_closure() {
        use crate::entities::Platform;

        let store = InMemoryStore::new();
        let property = store
            .insert_property(sample_property("A100", true))
            .await
            .unwrap();
        let other = store
            .insert_property(sample_property("B200", true))
            .await
            .unwrap();

        let ad1 = store
            .insert_advertisement(sample_advertisement(Platform::AirBnb, property.id))
            .await
            .unwrap();
        let ad2 = store
            .insert_advertisement(sample_advertisement(Platform::BookingCom, property.id))
            .await
            .unwrap();
        let unrelated = store
            .insert_advertisement(sample_advertisement(Platform::Skyscanner, other.id))
            .await
            .unwrap();

        store
            .insert_reservation(sample_reservation("RES-001", ad1.id))
            .await
            .unwrap();
        store
            .insert_reservation(sample_reservation("RES-002", ad2.id))
            .await
            .unwrap();
        store
            .insert_reservation(sample_reservation("RES-003", unrelated.id))
            .await
            .unwrap();

        store.delete_property(&property.id).await.unwrap();

        let advertisements = store.list_advertisements().await.unwrap();
        assert_eq!(advertisements.len(), 1);
        assert_eq!(advertisements[0].id, unrelated.id);

        let reservations = store.list_reservations().await.unwrap();
        assert_eq!(reservations.len(), 1);
        assert_eq!(reservations[0].reservation_code, "RES-003");
    }

    #[tokio::test]
    async fn test_delete_advertisement_cascades_reservations() {
        use crate::entities::Platform;

        let store = InMemoryStore::new();
        let property = store
            .insert_property(sample_property("A100", true))
            .await
            .unwrap();
        let advertisement = store
            .insert_advertisement(sample_advertisement(Platform::AirBnb, property.id))
            .await
            .unwrap();
        store
            .insert_reservation(sample_reservation("RES-001", advertisement.id))
            .await
            .unwrap();

        store.delete_advertisement(&advertisement.id).await.unwrap();

        assert!(store.list_reservations().await.unwrap().is_empty());
        // The parent property is untouched
        assert!(store.get_property(&property.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_missing_property_is_not_found() {
        let store = InMemoryStore::new();
        let err = store.delete_property(&Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Entity(EntityError::NotFound { .. })
        ));
    }
}
