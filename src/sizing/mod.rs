//! Feeder sizing engine.
//!
//! Pipeline for one circuit: classify by loaded phases, compute average and
//! per-phase current, estimate voltage drop per gauge, search (parallel
//! count, gauge) for the cheapest conductor, pick the breaker. Records can
//! then be aggregated into a system view or checked for conformance.

pub mod analysis;
pub mod conformance;
pub mod current;
pub mod engine;
pub mod error;
pub mod limits;
pub mod scenario;
pub mod selection;
pub mod tables;

pub use current::{classify, compute_currents, round2, CircuitCurrents};
pub use engine::{phase_demand, total_demand_va, SizingEngine};
pub use error::SizingError;
pub use limits::SizingLimits;
pub use scenario::{simulate_scenarios, ScenarioOutcome, ScenarioVariation};
pub use selection::{select_breaker, select_conductor, voltage_drops, ConductorSelection};
pub use tables::{BreakerTable, ConductorTable, ReferenceTables, SubstationTable, STANDARD_TABLES};

use once_cell::sync::Lazy;

use crate::domain::{CircuitInput, CircuitRecord, Finding, SystemAnalysis};

static STANDARD_ENGINE: Lazy<SizingEngine> = Lazy::new(SizingEngine::standard);

/// Size one circuit against the standard tables and default limits
pub fn compute_sizing(
    input: &CircuitInput,
    prior_record_count: usize,
) -> Result<CircuitRecord, SizingError> {
    STANDARD_ENGINE.compute_sizing(input, prior_record_count)
}

/// Aggregate records using the standard substation table
pub fn analyze_system(records: &[CircuitRecord]) -> Option<SystemAnalysis> {
    STANDARD_ENGINE.analyze_system(records)
}

/// Conformance findings against the standard tables and default limits
pub fn check_conformance(record: &CircuitRecord) -> Vec<Finding> {
    STANDARD_ENGINE.check_conformance(record)
}
