//! Advertisement HTTP handlers

use crate::core::entity::Entity;
use crate::core::error::{ApiResult, EntityError};
use crate::entities::Advertisement;
use crate::server::AppState;
use crate::server::handlers::list_envelope;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;
use uuid::Uuid;

pub async fn list_advertisements(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let advertisements = state.advertisements.list_advertisements().await?;
    Ok(Json(list_envelope(&advertisements)?))
}

pub async fn get_advertisement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Advertisement>> {
    let id = Uuid::parse_str(&id)?;
    let advertisement = state
        .advertisements
        .get_advertisement(&id)
        .await?
        .ok_or_else(|| EntityError::not_found::<Advertisement>(id))?;
    Ok(Json(advertisement))
}

pub async fn create_advertisement(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<(StatusCode, Json<Advertisement>)> {
    let advertisement = Advertisement::from_payload(&payload)?;
    let advertisement = state
        .advertisements
        .insert_advertisement(advertisement)
        .await?;
    Ok((StatusCode::CREATED, Json(advertisement)))
}

pub async fn update_advertisement(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<Advertisement>> {
    let id = Uuid::parse_str(&id)?;
    let mut advertisement = state
        .advertisements
        .get_advertisement(&id)
        .await?
        .ok_or_else(|| EntityError::not_found::<Advertisement>(id))?;

    advertisement.merge_payload(&payload)?;
    advertisement.touch();
    let advertisement = state
        .advertisements
        .update_advertisement(&id, advertisement)
        .await?;
    Ok(Json(advertisement))
}
