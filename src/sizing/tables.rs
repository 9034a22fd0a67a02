//! Reference tables used by the sizing engine.
//!
//! Tables are immutable once built. The standard set covers Voltenax
//! 0.6/1 kV copper cable (drop coefficients at PF 0.95), molded-case
//! breakers and standard distribution transformer capacities.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::SizingError;

/// Standard reference tables, built once on first use
pub static STANDARD_TABLES: Lazy<ReferenceTables> = Lazy::new(ReferenceTables::standard);

const STANDARD_GAUGES_MM2: [u32; 10] = [6, 10, 16, 25, 35, 50, 70, 95, 120, 150];
const STANDARD_AMPACITY_A: [f64; 10] = [
    54.0, 75.0, 100.0, 133.0, 164.0, 198.0, 253.0, 306.0, 354.0, 407.0,
];
const STANDARD_GROUND_MM2: [u32; 10] = [6, 10, 16, 16, 16, 25, 35, 50, 70, 95];
const STANDARD_DROP_COEFFICIENTS: [f64; 10] =
    [7.54, 4.5, 2.86, 1.83, 1.34, 1.0, 0.71, 0.53, 0.43, 0.36];

const STANDARD_BREAKERS_A: [u32; 20] = [
    32, 40, 50, 63, 100, 125, 150, 160, 200, 250, 320, 400, 500, 630, 700, 800, 1000, 1600,
    2000, 2500,
];

const STANDARD_SUBSTATIONS_KVA: [f64; 11] = [
    75.0, 112.5, 225.0, 300.0, 500.0, 750.0, 1000.0, 1250.0, 1500.0, 1750.0, 2000.0,
];

/// One conductor gauge with its ratings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConductorTableEntry {
    /// Cross-section (mm²)
    pub gauge_mm2: u32,
    /// Continuous current rating (A)
    pub ampacity_a: f64,
    /// Ground conductor paired with this gauge (mm²)
    pub ground_gauge_mm2: u32,
    /// Voltage drop coefficient (per 100 m per A)
    pub drop_coefficient: f64,
}

/// Conductor gauges in ascending order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ConductorTableEntry>", into = "Vec<ConductorTableEntry>")]
pub struct ConductorTable {
    entries: Vec<ConductorTableEntry>,
}

impl ConductorTable {
    /// Build a table, checking it is non-empty and ascending in gauge and ampacity
    pub fn new(entries: Vec<ConductorTableEntry>) -> Result<Self, SizingError> {
        if entries.is_empty() {
            return Err(SizingError::InvalidInput(
                "conductor table must not be empty".to_string(),
            ));
        }

        for entry in &entries {
            if !entry.ampacity_a.is_finite() || entry.ampacity_a <= 0.0 {
                return Err(SizingError::InvalidInput(format!(
                    "ampacity of {} mm² must be positive and finite",
                    entry.gauge_mm2
                )));
            }
            if !entry.drop_coefficient.is_finite() || entry.drop_coefficient <= 0.0 {
                return Err(SizingError::InvalidInput(format!(
                    "drop coefficient of {} mm² must be positive and finite",
                    entry.gauge_mm2
                )));
            }
        }

        for pair in entries.windows(2) {
            if pair[1].gauge_mm2 <= pair[0].gauge_mm2 {
                return Err(SizingError::InvalidInput(format!(
                    "conductor gauges must ascend: {} mm² follows {} mm²",
                    pair[1].gauge_mm2, pair[0].gauge_mm2
                )));
            }
            if pair[1].ampacity_a < pair[0].ampacity_a {
                return Err(SizingError::InvalidInput(format!(
                    "conductor ampacity must ascend: {} mm² is rated below {} mm²",
                    pair[1].gauge_mm2, pair[0].gauge_mm2
                )));
            }
        }

        Ok(Self { entries })
    }

    /// Voltenax 0.6/1 kV copper, 6 to 150 mm²
    pub fn standard() -> Self {
        let entries = STANDARD_GAUGES_MM2
            .iter()
            .zip(STANDARD_AMPACITY_A)
            .zip(STANDARD_GROUND_MM2)
            .zip(STANDARD_DROP_COEFFICIENTS)
            .map(
                |(((gauge_mm2, ampacity_a), ground_gauge_mm2), drop_coefficient)| {
                    ConductorTableEntry {
                        gauge_mm2: *gauge_mm2,
                        ampacity_a,
                        ground_gauge_mm2,
                        drop_coefficient,
                    }
                },
            )
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ConductorTableEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the largest gauge
    pub fn largest_index(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    /// Ampacity of a single conductor of the given gauge
    pub fn ampacity_for_gauge(&self, gauge_mm2: u32) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.gauge_mm2 == gauge_mm2)
            .map(|e| e.ampacity_a)
    }
}

/// Standard breaker trip ratings, strictly ascending
///
/// The first rating is the floor returned for very small loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct BreakerTable {
    ratings_a: Vec<u32>,
}

impl BreakerTable {
    pub fn new(ratings_a: Vec<u32>) -> Result<Self, SizingError> {
        if ratings_a.is_empty() {
            return Err(SizingError::InvalidInput(
                "breaker table must not be empty".to_string(),
            ));
        }
        if ratings_a.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(SizingError::InvalidInput(
                "breaker ratings must be strictly ascending".to_string(),
            ));
        }
        Ok(Self { ratings_a })
    }

    /// Molded-case breakers, 32 A to 2500 A
    pub fn standard() -> Self {
        Self {
            ratings_a: STANDARD_BREAKERS_A.to_vec(),
        }
    }

    pub fn ratings(&self) -> &[u32] {
        &self.ratings_a
    }

    /// Rating used for loads below every threshold
    pub fn floor(&self) -> u32 {
        self.ratings_a[0]
    }

    pub fn max_rating(&self) -> u32 {
        self.ratings_a[self.ratings_a.len() - 1]
    }
}

/// Standard transformer capacities (kVA), ascending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct SubstationTable {
    capacities_kva: Vec<f64>,
}

impl SubstationTable {
    pub fn new(capacities_kva: Vec<f64>) -> Result<Self, SizingError> {
        if capacities_kva.is_empty() {
            return Err(SizingError::InvalidInput(
                "substation table must not be empty".to_string(),
            ));
        }
        if capacities_kva.iter().any(|c| !c.is_finite() || *c <= 0.0) {
            return Err(SizingError::InvalidInput(
                "substation capacities must be positive and finite".to_string(),
            ));
        }
        if capacities_kva.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(SizingError::InvalidInput(
                "substation capacities must be strictly ascending".to_string(),
            ));
        }
        Ok(Self { capacities_kva })
    }

    /// 75 kVA to 2000 kVA
    pub fn standard() -> Self {
        Self {
            capacities_kva: STANDARD_SUBSTATIONS_KVA.to_vec(),
        }
    }

    /// Smallest capacity covering `demand_kva`, or the largest available
    pub fn recommend(&self, demand_kva: f64) -> f64 {
        self.capacities_kva
            .iter()
            .copied()
            .find(|capacity| *capacity >= demand_kva)
            .unwrap_or(self.capacities_kva[self.capacities_kva.len() - 1])
    }
}

impl TryFrom<Vec<ConductorTableEntry>> for ConductorTable {
    type Error = SizingError;

    fn try_from(entries: Vec<ConductorTableEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<ConductorTable> for Vec<ConductorTableEntry> {
    fn from(table: ConductorTable) -> Self {
        table.entries
    }
}

impl TryFrom<Vec<u32>> for BreakerTable {
    type Error = SizingError;

    fn try_from(ratings_a: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(ratings_a)
    }
}

impl From<BreakerTable> for Vec<u32> {
    fn from(table: BreakerTable) -> Self {
        table.ratings_a
    }
}

impl TryFrom<Vec<f64>> for SubstationTable {
    type Error = SizingError;

    fn try_from(capacities_kva: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(capacities_kva)
    }
}

impl From<SubstationTable> for Vec<f64> {
    fn from(table: SubstationTable) -> Self {
        table.capacities_kva
    }
}

/// All tables the engine consults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTables {
    pub conductors: ConductorTable,
    pub breakers: BreakerTable,
    pub substations: SubstationTable,
}

impl ReferenceTables {
    pub fn standard() -> Self {
        Self {
            conductors: ConductorTable::standard(),
            breakers: BreakerTable::standard(),
            substations: SubstationTable::standard(),
        }
    }
}
