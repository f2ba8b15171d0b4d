//! HTTP handlers, one module per entity plus the admin read surface

pub mod admin;
pub mod advertisements;
pub mod properties;
pub mod reservations;

use crate::core::entity::Entity;
use crate::core::error::ApiResult;
use serde::Serialize;
use serde_json::{Map, Value};

/// List envelope: `{"<plural>": [...], "count": n}`
pub(crate) fn list_envelope<E>(items: &[E]) -> ApiResult<Value>
where
    E: Entity + Serialize,
{
    let mut body = Map::new();
    body.insert(E::resource_name().to_string(), serde_json::to_value(items)?);
    body.insert("count".to_string(), Value::from(items.len()));
    Ok(Value::Object(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Property;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[test]
    fn test_list_envelope_uses_resource_name() {
        let property = Property::new(
            "A100".to_string(),
            4,
            2,
            true,
            Decimal::new(12050, 2),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            true,
        );
        let envelope = list_envelope(&[property]).unwrap();
        assert_eq!(envelope["count"], 1);
        assert_eq!(envelope["properties"].as_array().unwrap().len(), 1);
    }
}
