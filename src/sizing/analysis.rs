//! System aggregation and substation recommendation.

use super::current::round2;
use super::tables::SubstationTable;
use crate::domain::{CircuitRecord, PhaseTotals, PhaseValues, SystemAnalysis};

/// Phase demand imbalance (%)
///
/// `(max − mean) / mean · 100`, rounded to 2 decimals. All-zero demands
/// report 0 %.
pub fn imbalance_percent(demands: &PhaseValues) -> f64 {
    let mean = demands.mean();
    if mean == 0.0 {
        return 0.0;
    }
    round2((demands.max_phase() - mean) / mean * 100.0)
}

/// Aggregate records into a system view; `None` when there are no records
pub fn aggregate(substations: &SubstationTable, records: &[CircuitRecord]) -> Option<SystemAnalysis> {
    if records.is_empty() {
        return None;
    }

    let mut power = PhaseValues::default();
    let mut demand = PhaseValues::default();
    let mut current = PhaseValues::default();
    let mut total_power_w = 0.0;
    let mut total_demand_va = 0.0;
    let mut average_current_sum_a = 0.0;

    for record in records {
        power = power.add(&record.phase_loads());
        demand = demand.add(&record.phase_demands());
        current = current.add(&record.phase_currents());
        total_power_w += record.total_power_w;
        total_demand_va += record.total_demand_va;
        average_current_sum_a += record.average_current_a;
    }

    let phase_totals = |connected_power_w, demand_w, current_a| PhaseTotals {
        connected_power_w,
        demand_w,
        current_a,
    };

    let demand_kva = total_demand_va / 1000.0;

    Some(SystemAnalysis {
        circuit_count: records.len(),
        phase_r: phase_totals(power.r, demand.r, current.r),
        phase_s: phase_totals(power.s, demand.s, current.s),
        phase_t: phase_totals(power.t, demand.t, current.t),
        total_power_w,
        total_demand_va,
        mean_average_current_a: average_current_sum_a / records.len() as f64,
        demand_kva: round2(demand_kva),
        max_phase_demand_w: demand.max_phase(),
        imbalance_percent: imbalance_percent(&demand),
        recommended_substation_kva: substations.recommend(demand_kva),
    })
}
