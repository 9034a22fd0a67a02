use serde::{Deserialize, Serialize};

use super::SizingError;

/// Design limits applied by conductor selection and conformance checks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SizingLimits {
    /// Largest number of conductors the selection search may run in parallel
    pub max_parallel_conductors: u8,

    /// Maximum admissible voltage drop (%)
    pub max_voltage_drop_percent: f64,

    /// Power factor below which a correction is recommended
    pub min_power_factor: f64,

    /// Breaker rating allowed relative to the selected gauge's ampacity
    pub breaker_ampacity_ratio: f64,
}

impl Default for SizingLimits {
    fn default() -> Self {
        Self {
            max_parallel_conductors: 5,
            max_voltage_drop_percent: 3.0,
            min_power_factor: 0.92,
            breaker_ampacity_ratio: 1.25,
        }
    }
}

impl SizingLimits {
    /// Validate limits for consistency
    pub fn validate(&self) -> Result<(), SizingError> {
        if self.max_parallel_conductors == 0 {
            return Err(SizingError::InvalidInput(
                "max_parallel_conductors must be at least 1".to_string(),
            ));
        }

        if !self.max_voltage_drop_percent.is_finite() || self.max_voltage_drop_percent <= 0.0 {
            return Err(SizingError::InvalidInput(format!(
                "max_voltage_drop_percent must be positive and finite: {}",
                self.max_voltage_drop_percent
            )));
        }

        if !self.min_power_factor.is_finite()
            || self.min_power_factor <= 0.0
            || self.min_power_factor > 1.0
        {
            return Err(SizingError::InvalidInput(format!(
                "min_power_factor must be in (0, 1]: {}",
                self.min_power_factor
            )));
        }

        if !self.breaker_ampacity_ratio.is_finite() || self.breaker_ampacity_ratio <= 0.0 {
            return Err(SizingError::InvalidInput(format!(
                "breaker_ampacity_ratio must be positive and finite: {}",
                self.breaker_ampacity_ratio
            )));
        }

        Ok(())
    }
}
