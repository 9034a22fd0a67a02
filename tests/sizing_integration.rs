//! End-to-end sizing through the crate's public functions

use feeder_sizing::domain::{CircuitType, ConductorSize, FindingKind, PhaseValues, PhaseVoltage};
use feeder_sizing::sizing::classify;
use feeder_sizing::{analyze_system, check_conformance, compute_sizing, CircuitInput, CircuitRecord};

fn size(name: &str, loads: PhaseValues, pf: f64, fd: f64, length: f64, prior: usize) -> CircuitRecord {
    let input = CircuitInput::new(name, pf, fd, length, loads, PhaseVoltage::V220);
    compute_sizing(&input, prior).unwrap()
}

#[test]
fn balanced_thirty_kilowatt_feeder() {
    let record = size("QD Bloco A", PhaseValues::new(10000.0, 10000.0, 10000.0), 0.92, 0.8, 50.0, 0);

    assert_eq!(classify(&record.phase_loads()), CircuitType::ThreePhase);
    assert_eq!(record.average_current_a, 85.58);
    assert_eq!(record.phase_conductor, ConductorSize::single(35));
    assert_eq!(record.ground_gauge_mm2, 16);
    assert_eq!(record.voltage_drop_percent, 2.61);
    assert_eq!(record.breaker_a, 100);
    assert!((record.total_demand_va - 26086.956_521_739_13).abs() < 1e-6);
    assert!(check_conformance(&record).is_empty());
}

#[test]
fn building_with_mixed_circuits() {
    let records = vec![
        size("Elevadores", PhaseValues::new(15000.0, 15000.0, 15000.0), 0.85, 0.7, 80.0, 0),
        size("Iluminacao", PhaseValues::new(0.0, 6000.0, 0.0), 0.95, 1.0, 35.0, 1),
        size("Bombas", PhaseValues::new(8000.0, 0.0, 8000.0), 0.9, 0.8, 20.0, 2),
    ];

    assert_eq!(records[2].sequence, 3);
    assert_eq!(classify(&records[1].phase_loads()), CircuitType::SinglePhase);
    assert_eq!(classify(&records[2].phase_loads()), CircuitType::TwoPhase);

    let analysis = analyze_system(&records).unwrap();
    assert_eq!(analysis.circuit_count, 3);
    assert_eq!(analysis.total_power_w, 67000.0);
    assert!((analysis.phase_s.demand_w - 16500.0).abs() < 1e-6);
    assert!((analysis.max_phase_demand_w - 16900.0).abs() < 1e-6);
    assert!(analysis.imbalance_percent > 0.0);
    assert_eq!(analysis.recommended_substation_kva, 75.0);

    // pf 0.85 is below the 0.92 recommendation
    let findings = check_conformance(&records[0]);
    assert!(findings.iter().any(|f| f.kind == FindingKind::LowPowerFactor));
}

#[test]
fn empty_building_has_no_analysis() {
    assert!(analyze_system(&[]).is_none());
}

#[test]
fn stored_record_round_trips_through_json() {
    let record = size("QD Bloco A", PhaseValues::new(10000.0, 10000.0, 10000.0), 0.92, 0.8, 50.0, 4);
    let json = serde_json::to_string(&vec![record.clone()]).unwrap();
    let back: Vec<CircuitRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, vec![record]);
}
