//! Circuit record endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use validator::Validate;

use super::{error::ApiError, response::ApiResponse};
use crate::{
    controller::AppState,
    domain::{CircuitInput, CircuitRecord},
    sizing::ScenarioVariation,
};

/// List every stored record, in sequence order
pub async fn list_circuits(State(st): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let records = st.controller.list().await?;
    let count = records.len();
    Ok(ApiResponse::success(records).with_count(count))
}

/// Size a circuit and store it
pub async fn create_circuit(
    State(st): State<AppState>,
    Json(input): Json<CircuitInput>,
) -> Result<impl IntoResponse, ApiError> {
    input.validate()?;
    let start = Instant::now();
    let record = st.controller.add_circuit(&input).await?;
    let body = ApiResponse::success(record).with_duration(start.elapsed().as_millis() as u64);
    Ok((StatusCode::CREATED, body))
}

#[derive(Debug, Serialize)]
pub struct ClearedResponse {
    pub removed: usize,
}

pub async fn clear_circuits(State(st): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let removed = st.controller.clear().await?;
    Ok(ApiResponse::success(ClearedResponse { removed }))
}

pub async fn get_circuit(
    State(st): State<AppState>,
    Path(position): Path<usize>,
) -> Result<impl IntoResponse, ApiError> {
    let record = st.controller.get(position).await?;
    Ok(ApiResponse::success(record))
}

/// Remove one record; later records shift down one position
pub async fn delete_circuit(
    State(st): State<AppState>,
    Path(position): Path<usize>,
) -> Result<impl IntoResponse, ApiError> {
    let removed: CircuitRecord = st.controller.remove(position).await?;
    Ok(ApiResponse::success(removed))
}

pub async fn circuit_conformance(
    State(st): State<AppState>,
    Path(position): Path<usize>,
) -> Result<impl IntoResponse, ApiError> {
    let findings = st.controller.conformance(position).await?;
    let count = findings.len();
    Ok(ApiResponse::success(findings).with_count(count))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ScenarioRequest {
    #[validate(length(min = 1, max = 20))]
    pub variations: Vec<ScenarioVariation>,
}

/// Re-size a stored circuit under parameter variations
pub async fn circuit_scenarios(
    State(st): State<AppState>,
    Path(position): Path<usize>,
    Json(req): Json<ScenarioRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;
    for variation in &req.variations {
        variation.validate()?;
    }
    let outcomes = st.controller.scenarios(position, &req.variations).await?;
    let count = outcomes.len();
    Ok(ApiResponse::success(outcomes).with_count(count))
}
