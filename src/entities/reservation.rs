//! Reservation entity: a booking against an Advertisement
//!
//! The date-ordering invariant (`check_in_date < check_out_date`) is the
//! one domain rule in the system. [`Reservation::validate`] is invoked by
//! the storage layer before every insert and update, so no write path can
//! store a reservation with inconsistent dates.

use crate::core::entity::Entity;
use crate::core::error::{ApiError, ValidationError};
use crate::core::validation::PayloadFields;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Maximum length of `reservation_code`
pub const CODE_MAX_LEN: usize = 100;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    /// Unique identifier for this entity
    pub id: Uuid,

    /// Globally unique booking code
    pub reservation_code: String,

    pub check_in_date: NaiveDate,

    pub check_out_date: NaiveDate,

    /// Total booking price, 2 fractional digits
    pub total_price: Decimal,

    /// Free-text note from the guest, may be empty
    pub comment: String,

    /// Number of guests
    pub guest_count: u32,

    /// Owning advertisement; deleting it deletes this reservation
    pub advertisement_id: Uuid,

    /// When this entity was created
    pub created_at: DateTime<Utc>,

    /// When this entity was last updated
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        reservation_code: String,
        check_in_date: NaiveDate,
        check_out_date: NaiveDate,
        total_price: Decimal,
        comment: String,
        guest_count: u32,
        advertisement_id: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            reservation_code,
            check_in_date,
            check_out_date,
            total_price,
            comment,
            guest_count,
            advertisement_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Build a new Reservation from a create payload.
    ///
    /// `comment` defaults to the empty string when omitted. Date ordering
    /// is not checked here; the storage layer runs [`Self::validate`]
    /// before persisting.
    pub fn from_payload(body: &Value) -> Result<Self, ApiError> {
        let mut fields = PayloadFields::new(body)?;

        let reservation_code = fields.required_string("reservation_code", CODE_MAX_LEN);
        let check_in_date = fields.required_date("check_in_date");
        let check_out_date = fields.required_date("check_out_date");
        let total_price = fields.required_decimal("total_price", 8, 2);
        let comment = fields.text("comment");
        let guest_count = fields.required_positive_integer("guest_count");
        let advertisement_id = fields.required_uuid("advertisement_id");

        fields.finish()?;

        Ok(Self::new(
            reservation_code.expect("validated"),
            check_in_date.expect("validated"),
            check_out_date.expect("validated"),
            total_price.expect("validated"),
            comment.unwrap_or_default(),
            guest_count.expect("validated"),
            advertisement_id.expect("validated"),
        ))
    }

    /// Merge an update payload into this Reservation, field by field.
    pub fn merge_payload(&mut self, body: &Value) -> Result<(), ApiError> {
        let mut fields = PayloadFields::new(body)?;

        let reservation_code = fields.string("reservation_code", CODE_MAX_LEN);
        let check_in_date = fields.date("check_in_date");
        let check_out_date = fields.date("check_out_date");
        let total_price = fields.decimal("total_price", 8, 2);
        let comment = fields.text("comment");
        let guest_count = fields.positive_integer("guest_count");
        let advertisement_id = fields.uuid("advertisement_id");

        fields.finish()?;

        if let Some(code) = reservation_code {
            self.reservation_code = code;
        }
        if let Some(date) = check_in_date {
            self.check_in_date = date;
        }
        if let Some(date) = check_out_date {
            self.check_out_date = date;
        }
        if let Some(price) = total_price {
            self.total_price = price;
        }
        if let Some(text) = comment {
            self.comment = text;
        }
        if let Some(count) = guest_count {
            self.guest_count = count;
        }
        if let Some(id) = advertisement_id {
            self.advertisement_id = id;
        }
        Ok(())
    }

    /// Check the date-ordering invariant.
    ///
    /// Returns a rejection rather than raising, so every caller has to
    /// handle the failure explicitly before persisting.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.check_in_date >= self.check_out_date {
            return Err(ValidationError::date_range());
        }
        Ok(())
    }
}

impl Entity for Reservation {
    fn resource_name() -> &'static str {
        "reservations"
    }

    fn resource_name_singular() -> &'static str {
        "reservation"
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample(check_in: NaiveDate, check_out: NaiveDate) -> Reservation {
        Reservation::new(
            "RES-001".to_string(),
            check_in,
            check_out,
            Decimal::new(45000, 2),
            String::new(),
            2,
            Uuid::new_v4(),
        )
    }

    #[test]
    fn test_validate_accepts_ordered_dates() {
        let reservation = sample(date(2024, 5, 5), date(2024, 5, 10));
        assert!(reservation.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_dates() {
        let reservation = sample(date(2024, 5, 10), date(2024, 5, 5));
        let err = reservation.validate().unwrap_err();
        assert_eq!(err.error_code(), "DATE_RANGE_ERROR");
        assert_eq!(err.to_string(), "check-in date must precede check-out date");
    }

    #[test]
    fn test_validate_rejects_equal_dates() {
        let reservation = sample(date(2024, 5, 5), date(2024, 5, 5));
        assert!(reservation.validate().is_err());
    }

    #[test]
    fn test_from_payload_defaults_comment() {
        let reservation = Reservation::from_payload(&json!({
            "reservation_code": "RES-001",
            "check_in_date": "2024-05-05",
            "check_out_date": "2024-05-10",
            "total_price": "450.00",
            "guest_count": 2,
            "advertisement_id": Uuid::new_v4().to_string()
        }))
        .unwrap();
        assert_eq!(reservation.comment, "");
        assert_eq!(reservation.check_in_date, date(2024, 5, 5));
    }

    #[test]
    fn test_merge_payload_can_invert_dates_for_later_validation() {
        let mut reservation = sample(date(2024, 5, 5), date(2024, 5, 10));
        reservation
            .merge_payload(&json!({"check_out_date": "2024-05-01"}))
            .unwrap();
        assert!(reservation.validate().is_err());
    }
}
