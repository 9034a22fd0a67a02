//! Circuit classification and current computation.

use serde::{Deserialize, Serialize};

use crate::domain::{CircuitType, PhaseValues};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Round half away from zero to 2 decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Classify a circuit by how many phases carry a strictly positive load
pub fn classify(loads: &PhaseValues) -> CircuitType {
    match loads.active_phases() {
        3 => CircuitType::ThreePhase,
        2 => CircuitType::TwoPhase,
        _ => CircuitType::SinglePhase,
    }
}

/// Unrounded currents of one circuit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircuitCurrents {
    pub circuit_type: CircuitType,
    /// Average current (A)
    pub average_a: f64,
    /// Current per phase (A)
    pub phase_a: PhaseValues,
}

impl CircuitCurrents {
    /// Currents rounded for output
    pub fn rounded(&self) -> (f64, PhaseValues) {
        (round2(self.average_a), self.phase_a.map(round2))
    }
}

/// Compute average and per-phase current
///
/// Three-phase: `I = P / (V·√3·pf)`, each phase scaled by its share of `P/3`.
/// Two-phase: `I = P / (V·pf)`, each phase scaled by its share of `P/2`.
/// Single-phase: `I = P / ((V·pf)/√3)`, each phase scaled by its share of `P`.
///
/// `loads` must carry a positive total; callers validate this first.
pub fn compute_currents(loads: &PhaseValues, phase_voltage_v: f64, power_factor: f64) -> CircuitCurrents {
    let circuit_type = classify(loads);
    let total_w = loads.total();

    let (average_a, share_base_w) = match circuit_type {
        CircuitType::ThreePhase => (
            total_w / (phase_voltage_v * SQRT_3 * power_factor),
            total_w / 3.0,
        ),
        CircuitType::TwoPhase => (total_w / (phase_voltage_v * power_factor), total_w / 2.0),
        CircuitType::SinglePhase => (
            total_w / ((phase_voltage_v * power_factor) / SQRT_3),
            total_w,
        ),
    };

    let phase_a = loads.map(|load_w| average_a * (load_w / share_base_w));

    CircuitCurrents {
        circuit_type,
        average_a,
        phase_a,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(PhaseValues::new(100.0, 100.0, 100.0), CircuitType::ThreePhase)]
    #[case(PhaseValues::new(100.0, 0.0, 100.0), CircuitType::TwoPhase)]
    #[case(PhaseValues::new(0.0, 100.0, 100.0), CircuitType::TwoPhase)]
    #[case(PhaseValues::new(100.0, 0.0, 0.0), CircuitType::SinglePhase)]
    #[case(PhaseValues::new(0.0, 0.0, 1.0), CircuitType::SinglePhase)]
    #[case(PhaseValues::new(0.0, 0.0, 0.0), CircuitType::SinglePhase)]
    fn test_classification(#[case] loads: PhaseValues, #[case] expected: CircuitType) {
        assert_eq!(classify(&loads), expected);
    }

    #[test]
    fn test_three_phase_balanced_current() {
        let loads = PhaseValues::new(10000.0, 10000.0, 10000.0);
        let currents = compute_currents(&loads, 220.0, 0.92);

        assert_eq!(currents.circuit_type, CircuitType::ThreePhase);
        let expected = 30000.0 / (220.0 * 3f64.sqrt() * 0.92);
        assert!((currents.average_a - expected).abs() < 1e-9);
        assert!((currents.phase_a.r - expected).abs() < 1e-9);

        let (average, phases) = currents.rounded();
        assert_eq!(average, 85.58);
        assert_eq!(phases.t, 85.58);
    }

    #[test]
    fn test_three_phase_unbalanced_split() {
        let loads = PhaseValues::new(2000.0, 1000.0, 3000.0);
        let currents = compute_currents(&loads, 127.0, 1.0);
        let average = 6000.0 / (127.0 * 3f64.sqrt());

        assert!((currents.phase_a.r - average).abs() < 1e-9);
        assert!((currents.phase_a.s - average * 0.5).abs() < 1e-9);
        assert!((currents.phase_a.t - average * 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_two_phase_current() {
        let loads = PhaseValues::new(4000.0, 0.0, 2000.0);
        let currents = compute_currents(&loads, 220.0, 0.8);
        let average = 6000.0 / (220.0 * 0.8);

        assert_eq!(currents.circuit_type, CircuitType::TwoPhase);
        assert!((currents.average_a - average).abs() < 1e-9);
        assert!((currents.phase_a.r - average * (4000.0 / 3000.0)).abs() < 1e-9);
        assert_eq!(currents.phase_a.s, 0.0);
    }

    #[test]
    fn test_single_phase_current_uses_sqrt3_in_numerator() {
        let loads = PhaseValues::new(0.0, 5000.0, 0.0);
        let currents = compute_currents(&loads, 127.0, 0.9);
        let average = 5000.0 / ((127.0 * 0.9) / 3f64.sqrt());

        assert_eq!(currents.circuit_type, CircuitType::SinglePhase);
        assert!((currents.average_a - average).abs() < 1e-9);
        assert!((currents.phase_a.s - average).abs() < 1e-9);
        assert_eq!(currents.phase_a.r, 0.0);
    }

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_eq!(round2(1.005_000_1), 1.01);
        assert_eq!(round2(2.344), 2.34);
        assert_eq!(round2(2.345_000_1), 2.35);
        assert_eq!(round2(-1.235_000_1), -1.24);
    }

    proptest! {
        #[test]
        fn prop_round2_is_idempotent(value in 0.0f64..1.0e6) {
            let once = round2(value);
            prop_assert_eq!(round2(once), once);
        }
    }
}
