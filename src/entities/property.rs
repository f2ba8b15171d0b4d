//! Property entity: a rentable unit
//!
//! `property_code` is globally unique (enforced by the storage layer) and
//! `is_available` gates visibility through the public API: lists and
//! retrievals only surface available properties.

use crate::core::entity::Entity;
use crate::core::error::ApiError;
use crate::core::validation::PayloadFields;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Maximum length of `property_code`
pub const CODE_MAX_LEN: usize = 30;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Unique identifier for this entity
    pub id: Uuid,

    /// Globally unique short code (e.g. "A100")
    pub property_code: String,

    /// Maximum number of guests
    pub guest_limit: u32,

    /// Bathroom count
    pub number_of_bathrooms: u32,

    /// Pet policy
    pub accepts_animals: bool,

    /// Cleaning fee, 2 fractional digits
    pub cleaning_fee: Decimal,

    /// Date the unit entered operation
    pub activation_date: NaiveDate,

    /// Visibility flag for the public API
    pub is_available: bool,

    /// When this entity was created
    pub created_at: DateTime<Utc>,

    /// When this entity was last updated
    pub updated_at: DateTime<Utc>,
}

impl Property {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        property_code: String,
        guest_limit: u32,
        number_of_bathrooms: u32,
        accepts_animals: bool,
        cleaning_fee: Decimal,
        activation_date: NaiveDate,
        is_available: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            property_code,
            guest_limit,
            number_of_bathrooms,
            accepts_animals,
            cleaning_fee,
            activation_date,
            is_available,
            created_at: now,
            updated_at: now,
        }
    }

    /// Build a new Property from a create payload.
    ///
    /// Every missing or malformed field is reported; `is_available`
    /// defaults to `true` when omitted.
    pub fn from_payload(body: &Value) -> Result<Self, ApiError> {
        let mut fields = PayloadFields::new(body)?;

        let property_code = fields.required_string("property_code", CODE_MAX_LEN);
        let guest_limit = fields.required_positive_integer("guest_limit");
        let number_of_bathrooms = fields.required_positive_integer("number_of_bathrooms");
        let accepts_animals = fields.required_boolean("accepts_animals");
        let cleaning_fee = fields.required_decimal("cleaning_fee", 6, 2);
        let activation_date = fields.required_date("activation_date");
        let is_available = fields.boolean("is_available");

        fields.finish()?;

        Ok(Self::new(
            property_code.expect("validated"),
            guest_limit.expect("validated"),
            number_of_bathrooms.expect("validated"),
            accepts_animals.expect("validated"),
            cleaning_fee.expect("validated"),
            activation_date.expect("validated"),
            is_available.unwrap_or(true),
        ))
    }

    /// Merge an update payload into this Property, field by field.
    pub fn merge_payload(&mut self, body: &Value) -> Result<(), ApiError> {
        let mut fields = PayloadFields::new(body)?;

        let property_code = fields.string("property_code", CODE_MAX_LEN);
        let guest_limit = fields.positive_integer("guest_limit");
        let number_of_bathrooms = fields.positive_integer("number_of_bathrooms");
        let accepts_animals = fields.boolean("accepts_animals");
        let cleaning_fee = fields.decimal("cleaning_fee", 6, 2);
        let activation_date = fields.date("activation_date");
        let is_available = fields.boolean("is_available");

        fields.finish()?;

        if let Some(code) = property_code {
            self.property_code = code;
        }
        if let Some(limit) = guest_limit {
            self.guest_limit = limit;
        }
        if let Some(bathrooms) = number_of_bathrooms {
            self.number_of_bathrooms = bathrooms;
        }
        if let Some(animals) = accepts_animals {
            self.accepts_animals = animals;
        }
        if let Some(fee) = cleaning_fee {
            self.cleaning_fee = fee;
        }
        if let Some(date) = activation_date {
            self.activation_date = date;
        }
        if let Some(available) = is_available {
            self.is_available = available;
        }
        Ok(())
    }
}

impl Entity for Property {
    fn resource_name() -> &'static str {
        "properties"
    }

    fn resource_name_singular() -> &'static str {
        "property"
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
