//! Payload validation helpers
//!
//! [`PayloadFields`] walks a raw JSON object and reads typed fields while
//! collecting one [`FieldValidationError`] per offending field, so a bad
//! payload is rejected with every problem listed at once instead of the
//! first one found.

use crate::core::error::{FieldValidationError, ValidationError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;
use uuid::Uuid;

/// Typed reader over a JSON object payload.
///
/// Readers come in two flavors: plain readers return `None` when the field
/// is absent (used for partial updates), `required_*` readers record an
/// "is required" error instead. A `null` value counts as absent, matching
/// how the HTTP layer treats omitted fields.
pub struct PayloadFields<'a> {
    body: &'a Map<String, Value>,
    errors: Vec<FieldValidationError>,
}

impl<'a> PayloadFields<'a> {
    /// Wrap a payload; rejects anything that is not a JSON object.
    pub fn new(body: &'a Value) -> Result<Self, ValidationError> {
        let Some(object) = body.as_object() else {
            return Err(ValidationError::InvalidJson {
                message: "expected a JSON object".to_string(),
            });
        };
        Ok(Self {
            body: object,
            errors: Vec::new(),
        })
    }

    /// Whether the field is present (and not `null`)
    pub fn has(&self, field: &str) -> bool {
        self.raw(field).is_some()
    }

    fn raw(&self, field: &str) -> Option<&Value> {
        self.body.get(field).filter(|v| !v.is_null())
    }

    fn error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldValidationError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    fn require(&mut self, field: &str) -> bool {
        if self.has(field) {
            true
        } else {
            self.error(field, "is required");
            false
        }
    }

    // === Plain readers (absent field -> None, no error) ===

    pub fn string(&mut self, field: &str, max_len: usize) -> Option<String> {
        let value = self.raw(field)?.clone();
        match value.as_str() {
            Some(s) if s.chars().count() <= max_len => Some(s.to_string()),
            Some(_) => {
                self.error(field, format!("must be at most {} characters", max_len));
                None
            }
            None => {
                self.error(field, "must be a string");
                None
            }
        }
    }

    /// Free-text field without a length bound
    pub fn text(&mut self, field: &str) -> Option<String> {
        let value = self.raw(field)?.clone();
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.error(field, "must be a string");
                None
            }
        }
    }

    pub fn positive_integer(&mut self, field: &str) -> Option<u32> {
        let value = self.raw(field)?.clone();
        match value.as_u64() {
            Some(n) if n >= 1 && n <= u32::MAX as u64 => Some(n as u32),
            _ => {
                self.error(field, "must be a positive integer");
                None
            }
        }
    }

    pub fn boolean(&mut self, field: &str) -> Option<bool> {
        let value = self.raw(field)?.clone();
        match value.as_bool() {
            Some(b) => Some(b),
            None => {
                self.error(field, "must be a boolean");
                None
            }
        }
    }

    /// Decimal with column-style digit bounds: `max_digits` total digits,
    /// `scale` of them fractional. Accepts a JSON string ("120.50") or a
    /// bare number.
    pub fn decimal(&mut self, field: &str, max_digits: u32, scale: u32) -> Option<Decimal> {
        let value = self.raw(field)?.clone();
        let parsed = match &value {
            Value::String(s) => Decimal::from_str(s).ok(),
            Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
            _ => None,
        };
        let Some(decimal) = parsed else {
            self.error(field, "must be a decimal number");
            return None;
        };
        if decimal.scale() > scale {
            self.error(field, format!("must have at most {} decimal places", scale));
            return None;
        }
        let integer_digits = decimal.abs().trunc().to_string().len() as u32;
        if integer_digits > max_digits - scale {
            self.error(
                field,
                format!("must have at most {} digits in total", max_digits),
            );
            return None;
        }
        Some(decimal)
    }

    pub fn date(&mut self, field: &str) -> Option<NaiveDate> {
        let value = self.raw(field)?.clone();
        match value.as_str().map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d")) {
            Some(Ok(date)) => Some(date),
            _ => {
                self.error(field, "must be a date in YYYY-MM-DD format");
                None
            }
        }
    }

    pub fn uuid(&mut self, field: &str) -> Option<Uuid> {
        let value = self.raw(field)?.clone();
        match value.as_str().map(Uuid::parse_str) {
            Some(Ok(id)) => Some(id),
            _ => {
                self.error(field, "must be a valid UUID");
                None
            }
        }
    }

    // === Required readers (absent field -> "is required" error) ===

    pub fn required_string(&mut self, field: &str, max_len: usize) -> Option<String> {
        if !self.require(field) {
            return None;
        }
        self.string(field, max_len)
    }

    pub fn required_positive_integer(&mut self, field: &str) -> Option<u32> {
        if !self.require(field) {
            return None;
        }
        self.positive_integer(field)
    }

    pub fn required_boolean(&mut self, field: &str) -> Option<bool> {
        if !self.require(field) {
            return None;
        }
        self.boolean(field)
    }

    pub fn required_decimal(&mut self, field: &str, max_digits: u32, scale: u32) -> Option<Decimal> {
        if !self.require(field) {
            return None;
        }
        self.decimal(field, max_digits, scale)
    }

    pub fn required_date(&mut self, field: &str) -> Option<NaiveDate> {
        if !self.require(field) {
            return None;
        }
        self.date(field)
    }

    pub fn required_uuid(&mut self, field: &str) -> Option<Uuid> {
        if !self.require(field) {
            return None;
        }
        self.uuid(field)
    }

    /// Resolve the accumulated per-field errors.
    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::FieldErrors(self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_non_object_payload() {
        let body = json!([1, 2, 3]);
        assert!(matches!(
            PayloadFields::new(&body),
            Err(ValidationError::InvalidJson { .. })
        ));
    }

    #[test]
    fn test_missing_required_fields_all_enumerated() {
        let body = json!({"property_code": "A100"});
        let mut fields = PayloadFields::new(&body).unwrap();
        fields.required_string("property_code", 30);
        fields.required_positive_integer("guest_limit");
        fields.required_decimal("cleaning_fee", 6, 2);

        let err = fields.finish().unwrap_err();
        let ValidationError::FieldErrors(errors) = err else {
            panic!("expected field errors");
        };
        let names: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(names, vec!["guest_limit", "cleaning_fee"]);
    }

    #[test]
    fn test_positive_integer_rejects_zero_and_negative() {
        let body = json!({"zero": 0, "negative": -3, "ok": 4});
        let mut fields = PayloadFields::new(&body).unwrap();
        assert_eq!(fields.positive_integer("zero"), None);
        assert_eq!(fields.positive_integer("negative"), None);
        assert_eq!(fields.positive_integer("ok"), Some(4));
        assert!(fields.finish().is_err());
    }

    #[test]
    fn test_decimal_accepts_string_and_number() {
        let body = json!({"from_string": "120.50", "from_number": 85.5});
        let mut fields = PayloadFields::new(&body).unwrap();
        assert_eq!(
            fields.decimal("from_string", 6, 2),
            Some(Decimal::new(12050, 2))
        );
        assert_eq!(
            fields.decimal("from_number", 6, 2),
            Some(Decimal::new(855, 1))
        );
        assert!(fields.finish().is_ok());
    }

    #[test]
    fn test_decimal_digit_bounds() {
        let body = json!({"too_precise": "10.505", "too_big": "99999.00"});
        let mut fields = PayloadFields::new(&body).unwrap();
        assert_eq!(fields.decimal("too_precise", 6, 2), None);
        assert_eq!(fields.decimal("too_big", 6, 2), None);
        assert!(fields.finish().is_err());
    }

    #[test]
    fn test_date_parsing() {
        let body = json!({"good": "2024-05-10", "bad": "10/05/2024"});
        let mut fields = PayloadFields::new(&body).unwrap();
        assert_eq!(
            fields.date("good"),
            Some(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap())
        );
        assert_eq!(fields.date("bad"), None);
    }

    #[test]
    fn test_string_length_bound() {
        let body = json!({"code": "THIS-CODE-IS-FAR-TOO-LONG-FOR-THE-COLUMN"});
        let mut fields = PayloadFields::new(&body).unwrap();
        assert_eq!(fields.string("code", 30), None);
        assert!(fields.finish().is_err());
    }

    #[test]
    fn test_null_counts_as_absent() {
        let body = json!({"comment": null});
        let mut fields = PayloadFields::new(&body).unwrap();
        assert!(!fields.has("comment"));
        assert_eq!(fields.text("comment"), None);
        assert!(fields.finish().is_ok());
    }
}
