use serde::{Deserialize, Serialize};

/// Aggregated figures for one phase across all circuits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PhaseTotals {
    /// Connected active power (W)
    pub connected_power_w: f64,
    /// Demand (W)
    pub demand_w: f64,
    /// Current (A)
    pub current_a: f64,
}

/// System-wide view over a set of sized circuits
///
/// Derived on demand from the record sequence, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemAnalysis {
    pub circuit_count: usize,

    pub phase_r: PhaseTotals,
    pub phase_s: PhaseTotals,
    pub phase_t: PhaseTotals,

    /// Sum of connected power over all circuits (W)
    pub total_power_w: f64,
    /// Sum of apparent demand over all circuits (VA)
    pub total_demand_va: f64,
    /// Arithmetic mean of the per-circuit average current (A)
    pub mean_average_current_a: f64,

    /// Total demand in kVA, rounded to 2 decimals
    pub demand_kva: f64,
    /// Largest of the three phase demand totals (W)
    pub max_phase_demand_w: f64,
    /// Phase demand imbalance (%), rounded to 2 decimals
    pub imbalance_percent: f64,
    /// Smallest standard transformer covering the total demand (kVA)
    pub recommended_substation_kva: f64,
}
