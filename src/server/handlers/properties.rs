//! Property HTTP handlers
//!
//! Every public operation goes through the availability lens: lists only
//! return available properties, and retrieve/update/delete treat an
//! unavailable property as absent — except retrieve, which answers with
//! a substitute message when the flag flips after the property was
//! listed, so callers can tell "gone" from "temporarily withheld".

use crate::core::entity::Entity;
use crate::core::error::{ApiResult, EntityError};
use crate::entities::Property;
use crate::server::AppState;
use crate::server::handlers::list_envelope;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use uuid::Uuid;

/// Shown instead of the record when a retrieved property is unavailable
const UNAVAILABLE_MESSAGE: &str = "Property details are unavailable at this time.";

pub async fn list_properties(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let properties = state.properties.list_available_properties().await?;
    Ok(Json(list_envelope(&properties)?))
}

pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = Uuid::parse_str(&id)?;
    let property = state
        .properties
        .get_property(&id)
        .await?
        .ok_or_else(|| EntityError::not_found::<Property>(id))?;

    if !property.is_available {
        return Ok(Json(json!({ "message": UNAVAILABLE_MESSAGE })).into_response());
    }
    Ok(Json(property).into_response())
}

pub async fn create_property(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<(StatusCode, Json<Property>)> {
    let property = Property::from_payload(&payload)?;
    let property = state.properties.insert_property(property).await?;
    Ok((StatusCode::CREATED, Json(property)))
}

pub async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<Property>> {
    let id = Uuid::parse_str(&id)?;
    let mut property = state
        .properties
        .get_property(&id)
        .await?
        .filter(|p| p.is_available)
        .ok_or_else(|| EntityError::not_found::<Property>(id))?;

    property.merge_payload(&payload)?;
    property.touch();
    let property = state.properties.update_property(&id, property).await?;
    Ok(Json(property))
}

pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = Uuid::parse_str(&id)?;
    state
        .properties
        .get_property(&id)
        .await?
        .filter(|p| p.is_available)
        .ok_or_else(|| EntityError::not_found::<Property>(id))?;

    state.properties.delete_property(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
