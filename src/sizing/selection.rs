//! Conductor and breaker selection.
//!
//! Conductor selection searches parallel-conductor count first and gauge
//! second, so the result always uses the fewest conductors that satisfy
//! both the ampacity and the voltage-drop constraint, then the smallest
//! gauge at that count.

use itertools::iproduct;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::current::round2;
use super::limits::SizingLimits;
use super::tables::{BreakerTable, ConductorTable};
use crate::domain::ConductorSize;

/// Outcome of the conductor search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConductorSelection {
    /// Phase conductor (neutral uses the same size)
    pub conductor: ConductorSize,
    /// Ground conductor (not scaled by the parallel count)
    pub ground_gauge_mm2: u32,
    /// Index of the chosen gauge in the conductor table
    pub gauge_index: usize,
    /// Resulting voltage drop (%), rounded to 2 decimals
    pub voltage_drop_percent: f64,
    /// True when no combination met both constraints and the largest
    /// single conductor was returned instead
    pub fallback: bool,
}

/// Voltage drop (%) per table gauge for a single conductor
///
/// `drop_i = (L · k_i · I) / (10 · V)`
pub fn voltage_drops(
    table: &ConductorTable,
    run_length_m: f64,
    average_current_a: f64,
    phase_voltage_v: f64,
) -> Vec<f64> {
    table
        .entries()
        .iter()
        .map(|entry| {
            (run_length_m * entry.drop_coefficient * average_current_a) / (10.0 * phase_voltage_v)
        })
        .collect()
}

/// Find the cheapest (parallel count, gauge) pair meeting both constraints
///
/// A pair `(n, i)` qualifies when `I < ampacity_i · n` and
/// `drop_i / n < max_voltage_drop_percent`. Never fails: with no qualifying
/// pair the largest gauge with one conductor is returned, whatever its drop.
pub fn select_conductor(
    table: &ConductorTable,
    limits: &SizingLimits,
    average_current_a: f64,
    drops: &[f64],
) -> ConductorSelection {
    let entries = table.entries();

    let found = iproduct!(1..=limits.max_parallel_conductors, 0..entries.len()).find(|&(n, i)| {
        let n = f64::from(n);
        average_current_a < entries[i].ampacity_a * n
            && drops[i] / n < limits.max_voltage_drop_percent
    });

    match found {
        Some((n, i)) => {
            let entry = &entries[i];
            debug!(
                parallel = n,
                gauge_mm2 = entry.gauge_mm2,
                average_current_a,
                "conductor selected"
            );
            ConductorSelection {
                conductor: ConductorSize::parallel(entry.gauge_mm2, n),
                ground_gauge_mm2: entry.ground_gauge_mm2,
                gauge_index: i,
                voltage_drop_percent: round2(drops[i] / f64::from(n)),
                fallback: false,
            }
        }
        None => {
            let i = table.largest_index();
            let entry = &entries[i];
            warn!(
                average_current_a,
                gauge_mm2 = entry.gauge_mm2,
                voltage_drop_percent = drops[i],
                "no conductor combination meets ampacity and voltage drop limits, using largest gauge"
            );
            ConductorSelection {
                conductor: ConductorSize::single(entry.gauge_mm2),
                ground_gauge_mm2: entry.ground_gauge_mm2,
                gauge_index: i,
                voltage_drop_percent: round2(drops[i]),
                fallback: true,
            }
        }
    }
}

/// Smallest breaker rating strictly above the average current
///
/// Currents below the first rating get that floor rating; currents above
/// every rating get the largest one.
pub fn select_breaker(table: &BreakerTable, average_current_a: f64) -> u32 {
    if average_current_a < f64::from(table.floor()) {
        return table.floor();
    }
    table
        .ratings()
        .iter()
        .copied()
        .find(|rating| average_current_a < f64::from(*rating))
        .unwrap_or_else(|| table.max_rating())
}
