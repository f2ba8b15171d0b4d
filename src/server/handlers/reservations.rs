//! Reservation HTTP handlers
//!
//! Creation goes through `Reservation::from_payload` and then the store,
//! which re-runs the date-ordering check before persisting; a violation
//! aborts the write with no partial state change.

use crate::core::error::{ApiResult, EntityError};
use crate::entities::Reservation;
use crate::server::AppState;
use crate::server::handlers::list_envelope;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;
use uuid::Uuid;

pub async fn list_reservations(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let reservations = state.reservations.list_reservations().await?;
    Ok(Json(list_envelope(&reservations)?))
}

pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Reservation>> {
    let id = Uuid::parse_str(&id)?;
    let reservation = state
        .reservations
        .get_reservation(&id)
        .await?
        .ok_or_else(|| EntityError::not_found::<Reservation>(id))?;
    Ok(Json(reservation))
}

pub async fn create_reservation(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<(StatusCode, Json<Reservation>)> {
    let reservation = Reservation::from_payload(&payload)?;
    let reservation = state.reservations.insert_reservation(reservation).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

pub async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = Uuid::parse_str(&id)?;
    state.reservations.delete_reservation(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
