//! HTTP API tests driving the router in-process

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use feeder_sizing::api;
use feeder_sizing::config::Config;
use feeder_sizing::controller::AppState;

async fn app() -> Router {
    let cfg = Config::in_memory();
    let state = AppState::new(cfg.clone()).await.unwrap();
    api::router(state, &cfg)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn circuit(name: &str) -> Value {
    json!({
        "name": name,
        "power_factor": 0.92,
        "demand_factor": 0.8,
        "run_length_m": 50.0,
        "phase_load_w": { "r": 10000.0, "s": 10000.0, "t": 10000.0 },
        "phase_voltage": 220
    })
}

#[tokio::test]
async fn healthz_returns_ok() {
    let app = app().await;
    let (status, _) = send(&app, Method::GET, "/api/v1/healthz", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::GET, "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["store"]["records"], 0);
}

#[tokio::test]
async fn create_and_fetch_circuit() {
    let app = app().await;

    let (status, body) = send(&app, Method::POST, "/api/v1/circuits", Some(circuit("QD Bloco A"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    let record = &body["data"];
    assert_eq!(record["sequence"], 1);
    assert_eq!(record["average_current_a"], 85.58);
    assert_eq!(record["phase_conductor"], "35");
    assert_eq!(record["ground_gauge_mm2"], 16);
    assert_eq!(record["voltage_drop_percent"], 2.61);
    assert_eq!(record["breaker_a"], 100);
    assert_eq!(record["line_voltage_v"], 127);

    let (status, body) = send(&app, Method::GET, "/api/v1/circuits/0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "QD Bloco A");

    let (status, body) = send(&app, Method::GET, "/api/v1/circuits", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metadata"]["total_count"], 1);
}

#[tokio::test]
async fn duplicate_name_is_a_conflict() {
    let app = app().await;
    send(&app, Method::POST, "/api/v1/circuits", Some(circuit("QD Bloco A"))).await;

    let (status, body) = send(&app, Method::POST, "/api/v1/circuits", Some(circuit("qd bloco a"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");
}

#[tokio::test]
async fn invalid_input_is_a_bad_request() {
    let app = app().await;

    let mut zero_length = circuit("QD Bloco A");
    zero_length["run_length_m"] = json!(0.0);
    let (status, body) = send(&app, Method::POST, "/api/v1/circuits", Some(zero_length)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let mut no_load = circuit("QD Bloco B");
    no_load["phase_load_w"] = json!({ "r": 0.0, "s": 0.0, "t": 0.0 });
    let (status, _) = send(&app, Method::POST, "/api/v1/circuits", Some(no_load)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, "/api/v1/circuits", None).await;
    assert_eq!(body["metadata"]["total_count"], 0);
}

#[tokio::test]
async fn missing_position_is_not_found() {
    let app = app().await;
    let (status, _) = send(&app, Method::GET, "/api/v1/circuits/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/circuits/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/api/v1/circuits/7/conformance", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn analysis_is_null_until_records_exist() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/v1/analysis", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].is_null());

    send(&app, Method::POST, "/api/v1/circuits", Some(circuit("QD Bloco A"))).await;
    send(&app, Method::POST, "/api/v1/circuits", Some(circuit("QD Bloco B"))).await;

    let (_, body) = send(&app, Method::GET, "/api/v1/analysis", None).await;
    let analysis = &body["data"];
    assert_eq!(analysis["circuit_count"], 2);
    assert_eq!(analysis["imbalance_percent"], 0.0);
    assert_eq!(analysis["phase_r"]["demand_w"], 16000.0);
    assert_eq!(analysis["recommended_substation_kva"], 75.0);
}

#[tokio::test]
async fn delete_and_clear_circuits() {
    let app = app().await;
    for name in ["a", "b", "c"] {
        send(&app, Method::POST, "/api/v1/circuits", Some(circuit(name))).await;
    }

    let (status, body) = send(&app, Method::DELETE, "/api/v1/circuits/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "b");

    let (_, body) = send(&app, Method::GET, "/api/v1/circuits/1", None).await;
    assert_eq!(body["data"]["name"], "c");

    let (status, body) = send(&app, Method::DELETE, "/api/v1/circuits", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["removed"], 2);
}

#[tokio::test]
async fn preview_does_not_store() {
    let app = app().await;
    let (status, body) = send(&app, Method::POST, "/api/v1/sizing/preview", Some(circuit("QD Bloco A"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["breaker_a"], 100);

    let (_, body) = send(&app, Method::GET, "/api/v1/circuits", None).await;
    assert_eq!(body["metadata"]["total_count"], 0);
}

#[tokio::test]
async fn conformance_flags_low_power_factor() {
    let app = app().await;
    let mut low_pf = circuit("Motores");
    low_pf["power_factor"] = json!(0.8);
    send(&app, Method::POST, "/api/v1/circuits", Some(low_pf)).await;

    let (status, body) = send(&app, Method::GET, "/api/v1/circuits/0/conformance", None).await;
    assert_eq!(status, StatusCode::OK);
    let findings = body["data"].as_array().unwrap();
    assert!(findings
        .iter()
        .any(|f| f["kind"] == "low_power_factor" && f["severity"] == "low"));
}

#[tokio::test]
async fn conformance_accepts_legacy_record() {
    let app = app().await;
    let legacy = json!({
        "N°": "QD-1", "DESCRIÇÃO": "Bomba",
        "ATIVA-R": 2000.0, "ATIVA-S": 2000.0, "ATIVA-T": 2000.0,
        "DEM-R": 2000.0, "DEM-S": 2000.0, "DEM-T": 2000.0,
        "R": 15.75, "S": 15.75, "T": 15.75,
        "FP": 1.0, "FD": 1.0,
        "TENSÃO FASE (V)": 220, "TENSÃO LINHA (V)": 127,
        "POT. TOTAL (W)": 6000.0, "DEM. TOTAL (VA)": 6000.0, "COR. MÉDIA (A)": 15.75,
        "DIST.(M)": 300.0, "QUEDA DE TENSÃO (%)": 3.5,
        "FA": "6", "NE": "6", "TE": 6, "DISJUNTOR": 100
    });

    let (status, body) = send(&app, Method::POST, "/api/v1/conformance", Some(legacy)).await;
    assert_eq!(status, StatusCode::OK);
    let kinds: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["excessive_voltage_drop", "oversized_breaker"]);
}

#[tokio::test]
async fn scenarios_resize_a_stored_circuit() {
    let app = app().await;
    send(&app, Method::POST, "/api/v1/circuits", Some(circuit("QD Bloco A"))).await;

    let request = json!({
        "variations": [
            { "name": "short run", "run_length_m": 10.0 },
            { "name": "broken", "power_factor": 0.0 },
            { "name": "fd 1.0", "demand_factor": 1.0 }
        ]
    });
    let (status, body) = send(&app, Method::POST, "/api/v1/circuits/0/scenarios", Some(request)).await;
    assert_eq!(status, StatusCode::OK);

    let outcomes = body["data"].as_array().unwrap();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0]["scenario"], "short run");
    assert_eq!(outcomes[0]["record"]["name"], "QD Bloco A - short run");
    assert_eq!(outcomes[1]["record"]["demand_r_w"], 10000.0);

    let (_, body) = send(&app, Method::GET, "/api/v1/circuits", None).await;
    assert_eq!(body["metadata"]["total_count"], 1);
}

#[tokio::test]
async fn empty_scenario_list_is_rejected() {
    let app = app().await;
    send(&app, Method::POST, "/api/v1/circuits", Some(circuit("QD Bloco A"))).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/circuits/0/scenarios",
        Some(json!({ "variations": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
