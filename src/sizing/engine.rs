use serde::Serialize;
use tracing::debug;

use super::analysis::aggregate;
use super::conformance::findings_for;
use super::current::compute_currents;
use super::limits::SizingLimits;
use super::selection::{select_breaker, select_conductor, voltage_drops};
use super::tables::{ReferenceTables, STANDARD_TABLES};
use super::SizingError;
use crate::domain::{CircuitInput, CircuitRecord, Finding, PhaseValues, SystemAnalysis};

/// Per-phase demand: connected load scaled by the demand factor (W)
pub fn phase_demand(load_w: f64, demand_factor: f64) -> f64 {
    load_w * demand_factor
}

/// Total apparent demand: `P · fd / pf` (VA)
pub fn total_demand_va(total_power_w: f64, demand_factor: f64, power_factor: f64) -> f64 {
    (total_power_w * demand_factor) / power_factor
}

/// Feeder sizing engine
///
/// Holds only immutable tables and limits; every method is a pure
/// computation and the engine can be shared freely across threads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizingEngine {
    tables: ReferenceTables,
    limits: SizingLimits,
}

impl Default for SizingEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl SizingEngine {
    /// Engine over the given tables and limits
    pub fn new(tables: ReferenceTables, limits: SizingLimits) -> Result<Self, SizingError> {
        limits.validate()?;
        Ok(Self { tables, limits })
    }

    /// Engine over the standard tables with default limits
    pub fn standard() -> Self {
        Self {
            tables: STANDARD_TABLES.clone(),
            limits: SizingLimits::default(),
        }
    }

    /// Engine over the standard tables with custom limits
    pub fn with_limits(limits: SizingLimits) -> Result<Self, SizingError> {
        Self::new(STANDARD_TABLES.clone(), limits)
    }

    /// Size one circuit
    ///
    /// `prior_record_count` only feeds the sequence number (`prior + 1`).
    pub fn compute_sizing(
        &self,
        input: &CircuitInput,
        prior_record_count: usize,
    ) -> Result<CircuitRecord, SizingError> {
        validate_input(input)?;

        let loads = input.phase_load_w;
        let voltage_v = input.phase_voltage.as_f64();
        let total_power_w = loads.total();

        let currents = compute_currents(&loads, voltage_v, input.power_factor);
        debug!(
            circuit = %input.name,
            circuit_type = %currents.circuit_type,
            average_current_a = currents.average_a,
            "circuit classified"
        );

        let drops = voltage_drops(
            &self.tables.conductors,
            input.run_length_m,
            currents.average_a,
            voltage_v,
        );
        let conductor = select_conductor(
            &self.tables.conductors,
            &self.limits,
            currents.average_a,
            &drops,
        );
        let breaker_a = select_breaker(&self.tables.breakers, currents.average_a);

        let demands = loads.map(|load_w| phase_demand(load_w, input.demand_factor));
        let (average_current_a, phase_currents) = currents.rounded();

        let sequence = prior_record_count
            .checked_add(1)
            .and_then(|next| u32::try_from(next).ok())
            .ok_or_else(|| {
                SizingError::InvalidInput(format!(
                    "record count {} exceeds the sequence range",
                    prior_record_count
                ))
            })?;

        let record = CircuitRecord {
            sequence,
            name: input.name.trim().to_string(),
            load_r_w: loads.r,
            load_s_w: loads.s,
            load_t_w: loads.t,
            demand_r_w: demands.r,
            demand_s_w: demands.s,
            demand_t_w: demands.t,
            current_r_a: phase_currents.r,
            current_s_a: phase_currents.s,
            current_t_a: phase_currents.t,
            power_factor: input.power_factor,
            demand_factor: input.demand_factor,
            phase_voltage_v: input.phase_voltage,
            line_voltage_v: input.phase_voltage.paired_line_voltage(),
            total_power_w,
            total_demand_va: total_demand_va(
                total_power_w,
                input.demand_factor,
                input.power_factor,
            ),
            average_current_a,
            run_length_m: input.run_length_m,
            voltage_drop_percent: conductor.voltage_drop_percent,
            phase_conductor: conductor.conductor,
            neutral_conductor: conductor.conductor,
            ground_gauge_mm2: conductor.ground_gauge_mm2,
            breaker_a,
        };

        if let Some(field) = record.first_non_finite() {
            return Err(SizingError::InvalidInput(format!(
                "inputs too large to size: {} is not finite",
                field
            )));
        }
        Ok(record)
    }

    /// Aggregate a record sequence; `None` for an empty sequence
    pub fn analyze_system(&self, records: &[CircuitRecord]) -> Option<SystemAnalysis> {
        aggregate(&self.tables.substations, records)
    }

    /// Advisory checks over one record
    pub fn check_conformance(&self, record: &CircuitRecord) -> Vec<Finding> {
        findings_for(&self.tables.conductors, &self.limits, record)
    }
}

/// Reject inputs the engine cannot size
fn validate_input(input: &CircuitInput) -> Result<(), SizingError> {
    if input.name.trim().is_empty() {
        return Err(SizingError::InvalidInput("circuit name must not be empty".to_string()));
    }

    let loads: PhaseValues = input.phase_load_w;
    for (label, value) in [("R", loads.r), ("S", loads.s), ("T", loads.t)] {
        if !value.is_finite() {
            return Err(SizingError::InvalidInput(format!(
                "load on phase {} is not finite: {}",
                label, value
            )));
        }
        if value < 0.0 {
            return Err(SizingError::InvalidInput(format!(
                "load on phase {} cannot be negative: {}",
                label, value
            )));
        }
    }

    if !loads.total().is_finite() {
        return Err(SizingError::InvalidInput(
            "total load is too large to size".to_string(),
        ));
    }

    if loads.total() <= 0.0 {
        return Err(SizingError::InvalidInput(
            "at least one phase (R, S or T) must carry load".to_string(),
        ));
    }

    if !input.run_length_m.is_finite() || input.run_length_m <= 0.0 {
        return Err(SizingError::InvalidInput(format!(
            "run_length_m must be positive: {}",
            input.run_length_m
        )));
    }

    if !input.power_factor.is_finite() || input.power_factor <= 0.0 || input.power_factor > 1.0 {
        return Err(SizingError::InvalidInput(format!(
            "power_factor must be in (0, 1]: {}",
            input.power_factor
        )));
    }

    if !input.demand_factor.is_finite() || input.demand_factor <= 0.0 {
        return Err(SizingError::InvalidInput(format!(
            "demand_factor must be positive: {}",
            input.demand_factor
        )));
    }

    Ok(())
}
