//! Stateless sizing endpoints and the system view

use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use super::{error::ApiError, response::ApiResponse};
use crate::{
    controller::AppState,
    domain::{CircuitInput, CircuitRecord},
};

/// Size a circuit without storing it
pub async fn preview_sizing(
    State(st): State<AppState>,
    Json(input): Json<CircuitInput>,
) -> Result<impl IntoResponse, ApiError> {
    input.validate()?;
    let record = st.controller.preview(&input).await?;
    Ok(ApiResponse::success(record))
}

/// Findings for a record supplied in the body (either key set accepted)
pub async fn check_conformance(
    State(st): State<AppState>,
    Json(record): Json<CircuitRecord>,
) -> impl IntoResponse {
    let findings = st.controller.check_record(&record);
    let count = findings.len();
    ApiResponse::success(findings).with_count(count)
}

/// System aggregation over every stored record; `data` is null when empty
pub async fn system_analysis(State(st): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let response = match st.controller.analysis().await? {
        Some(analysis) => {
            let count = analysis.circuit_count;
            ApiResponse::success(analysis).with_count(count)
        }
        None => ApiResponse::empty().with_count(0),
    };
    Ok(response)
}
