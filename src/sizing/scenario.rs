//! What-if sizing of a circuit under varied parameters.

use serde::{Deserialize, Serialize};
use tracing::warn;
use validator::Validate;

use super::SizingEngine;
use crate::domain::{CircuitInput, CircuitRecord};

/// Parameter overrides for one scenario; unset fields keep the base value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ScenarioVariation {
    #[validate(length(min = 1, max = 60))]
    pub name: String,
    #[serde(default)]
    pub demand_factor: Option<f64>,
    #[serde(default)]
    pub power_factor: Option<f64>,
    #[serde(default)]
    pub run_length_m: Option<f64>,
}

impl ScenarioVariation {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            demand_factor: None,
            power_factor: None,
            run_length_m: None,
        }
    }

    pub fn with_demand_factor(mut self, demand_factor: f64) -> Self {
        self.demand_factor = Some(demand_factor);
        self
    }

    pub fn with_power_factor(mut self, power_factor: f64) -> Self {
        self.power_factor = Some(power_factor);
        self
    }

    pub fn with_run_length(mut self, run_length_m: f64) -> Self {
        self.run_length_m = Some(run_length_m);
        self
    }

    /// Base input with this variation's overrides applied
    pub fn apply(&self, base: &CircuitInput) -> CircuitInput {
        CircuitInput {
            name: format!("{} - {}", base.name.trim(), self.name),
            power_factor: self.power_factor.unwrap_or(base.power_factor),
            demand_factor: self.demand_factor.unwrap_or(base.demand_factor),
            run_length_m: self.run_length_m.unwrap_or(base.run_length_m),
            phase_load_w: base.phase_load_w,
            phase_voltage: base.phase_voltage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub scenario: String,
    pub record: CircuitRecord,
    pub variation: ScenarioVariation,
}

/// Size the base circuit once per variation
///
/// Variations that fail to size are logged and left out; the others are
/// returned in input order. Nothing is stored.
pub fn simulate_scenarios(
    engine: &SizingEngine,
    base: &CircuitInput,
    variations: &[ScenarioVariation],
    prior_record_count: usize,
) -> Vec<ScenarioOutcome> {
    variations
        .iter()
        .filter_map(|variation| {
            let input = variation.apply(base);
            match engine.compute_sizing(&input, prior_record_count) {
                Ok(record) => Some(ScenarioOutcome {
                    scenario: variation.name.clone(),
                    record,
                    variation: variation.clone(),
                }),
                Err(e) => {
                    warn!(scenario = %variation.name, error = %e, "scenario skipped");
                    None
                }
            }
        })
        .collect()
}
