//! Administrative read surface
//!
//! Unrestricted listings of all three tables, availability flag
//! included. This is the API counterpart of the original back-office
//! console; it bypasses the availability lens on purpose.

use crate::core::error::ApiResult;
use crate::server::AppState;
use crate::server::handlers::list_envelope;
use axum::{Json, extract::State};
use serde_json::Value;

pub async fn list_all_properties(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let properties = state.properties.list_properties().await?;
    Ok(Json(list_envelope(&properties)?))
}

pub async fn list_all_advertisements(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let advertisements = state.advertisements.list_advertisements().await?;
    Ok(Json(list_envelope(&advertisements)?))
}

pub async fn list_all_reservations(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let reservations = state.reservations.list_reservations().await?;
    Ok(Json(list_envelope(&reservations)?))
}
