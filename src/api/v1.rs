use axum::{
    routing::{get, post},
    Router,
};

use super::{analysis, circuits, health};
use crate::controller::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/health", get(health::health_check))
        .route(
            "/circuits",
            get(circuits::list_circuits)
                .post(circuits::create_circuit)
                .delete(circuits::clear_circuits),
        )
        .route(
            "/circuits/:position",
            get(circuits::get_circuit).delete(circuits::delete_circuit),
        )
        .route(
            "/circuits/:position/conformance",
            get(circuits::circuit_conformance),
        )
        .route(
            "/circuits/:position/scenarios",
            post(circuits::circuit_scenarios),
        )
        .route("/sizing/preview", post(analysis::preview_sizing))
        .route("/conformance", post(analysis::check_conformance))
        .route("/analysis", get(analysis::system_analysis))
        .with_state(state)
}
