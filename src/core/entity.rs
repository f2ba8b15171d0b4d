//! Entity trait defining the core abstraction for all persisted types

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Base trait for all entities in the system.
///
/// All entities have:
/// - id: Unique identifier
/// - created_at: Creation timestamp
/// - updated_at: Last modification timestamp
///
/// Storage access is handled separately via the store traits in
/// [`crate::storage`] so the entity types stay plain data.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs and list envelopes
    /// (e.g., "properties", "reservations")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "property", "reservation")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Refresh the update timestamp after a mutation
    fn touch(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, Serialize, Deserialize)]
    struct TestEntity {
        id: Uuid,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }

    impl Entity for TestEntity {
        fn resource_name() -> &'static str {
            "test_entities"
        }

        fn resource_name_singular() -> &'static str {
            "test_entity"
        }

        fn id(&self) -> Uuid {
            self.id
        }

        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }

        fn updated_at(&self) -> DateTime<Utc> {
            self.updated_at
        }

        fn touch(&mut self) {
            self.updated_at = Utc::now();
        }
    }

    #[test]
    fn test_entity_metadata() {
        assert_eq!(TestEntity::resource_name(), "test_entities");
        assert_eq!(TestEntity::resource_name_singular(), "test_entity");
    }

    #[test]
    fn test_touch_advances_updated_at() {
        let created = Utc::now();
        let mut entity = TestEntity {
            id: Uuid::new_v4(),
            created_at: created,
            updated_at: created,
        };

        entity.touch();
        assert!(entity.updated_at >= created);
        assert_eq!(entity.created_at, created);
    }
}
