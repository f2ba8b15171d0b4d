//! Advertisement entity: a Property listed on an external platform

use crate::core::entity::Entity;
use crate::core::error::{ApiError, ValidationError};
use crate::core::validation::PayloadFields;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// The platforms a property can be advertised on.
///
/// The wire format is the two-letter code; `label()` carries the
/// human-readable platform name. Variant order drives the default
/// listing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "Ab")]
    AirBnb,
    #[serde(rename = "Bk")]
    BookingCom,
    #[serde(rename = "Ss")]
    Skyscanner,
}

impl Platform {
    /// The accepted wire codes, in listing order
    pub const CODES: [&'static str; 3] = ["Ab", "Bk", "Ss"];

    pub fn code(&self) -> &'static str {
        match self {
            Platform::AirBnb => "Ab",
            Platform::BookingCom => "Bk",
            Platform::Skyscanner => "Ss",
        }
    }

    /// Human-readable platform name
    pub fn label(&self) -> &'static str {
        match self {
            Platform::AirBnb => "AirBnb",
            Platform::BookingCom => "Booking.com",
            Platform::Skyscanner => "Skyscanner",
        }
    }

    /// Parse a wire code, rejecting anything outside the enumerated set.
    pub fn from_code(code: &str) -> Result<Self, ValidationError> {
        match code {
            "Ab" => Ok(Platform::AirBnb),
            "Bk" => Ok(Platform::BookingCom),
            "Ss" => Ok(Platform::Skyscanner),
            other => Err(ValidationError::InvalidChoice {
                field: "platform".to_string(),
                value: other.to_string(),
                allowed: Self::CODES.iter().map(|c| c.to_string()).collect(),
            }),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Advertisement {
    /// Unique identifier for this entity
    pub id: Uuid,

    /// Platform the property is listed on
    pub platform: Platform,

    /// Fee charged by the platform, 2 fractional digits
    pub platform_fee: Decimal,

    /// Owning property; deleting the property deletes this advertisement
    pub property_id: Uuid,

    /// When this entity was created
    pub created_at: DateTime<Utc>,

    /// When this entity was last updated
    pub updated_at: DateTime<Utc>,
}

impl Advertisement {
    pub fn new(platform: Platform, platform_fee: Decimal, property_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            platform,
            platform_fee,
            property_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Build a new Advertisement from a create payload.
    pub fn from_payload(body: &Value) -> Result<Self, ApiError> {
        let mut fields = PayloadFields::new(body)?;

        let platform = fields.required_string("platform", 100);
        let platform_fee = fields.required_decimal("platform_fee", 8, 2);
        let property_id = fields.required_uuid("property_id");

        fields.finish()?;

        let platform = Platform::from_code(&platform.expect("validated"))?;
        Ok(Self::new(
            platform,
            platform_fee.expect("validated"),
            property_id.expect("validated"),
        ))
    }

    /// Merge an update payload into this Advertisement, field by field.
    pub fn merge_payload(&mut self, body: &Value) -> Result<(), ApiError> {
        let mut fields = PayloadFields::new(body)?;

        let platform = fields.string("platform", 100);
        let platform_fee = fields.decimal("platform_fee", 8, 2);
        let property_id = fields.uuid("property_id");

        fields.finish()?;

        if let Some(code) = platform {
            self.platform = Platform::from_code(&code)?;
        }
        if let Some(fee) = platform_fee {
            self.platform_fee = fee;
        }
        if let Some(id) = property_id {
            self.property_id = id;
        }
        Ok(())
    }
}

impl Entity for Advertisement {
    fn resource_name() -> &'static str {
        "advertisements"
    }

    fn resource_name_singular() -> &'static str {
        "advertisement"
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
