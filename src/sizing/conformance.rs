//! Advisory conformance checks over a sized circuit.

use super::limits::SizingLimits;
use super::tables::ConductorTable;
use crate::domain::{CircuitRecord, Finding, FindingCategory, FindingKind, Severity};

/// Classify one record against the design limits
///
/// Never fails. A conductor gauge missing from the table (records read from
/// older data) skips the breaker-to-conductor check.
pub fn findings_for(
    conductors: &ConductorTable,
    limits: &SizingLimits,
    record: &CircuitRecord,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    if record.voltage_drop_percent > limits.max_voltage_drop_percent {
        findings.push(Finding {
            kind: FindingKind::ExcessiveVoltageDrop,
            category: FindingCategory::Warning,
            severity: Severity::Medium,
            message: format!(
                "Voltage drop ({}%) above the recommended limit ({}%)",
                record.voltage_drop_percent, limits.max_voltage_drop_percent
            ),
        });
    }

    if record.power_factor < limits.min_power_factor {
        findings.push(Finding {
            kind: FindingKind::LowPowerFactor,
            category: FindingCategory::Recommendation,
            severity: Severity::Low,
            message: format!(
                "Power factor ({}) below {}; consider power factor correction",
                record.power_factor, limits.min_power_factor
            ),
        });
    }

    // Single-conductor ampacity, independent of the parallel count
    if let Some(ampacity_a) = conductors.ampacity_for_gauge(record.phase_conductor.gauge_mm2) {
        if f64::from(record.breaker_a) > ampacity_a * limits.breaker_ampacity_ratio {
            findings.push(Finding {
                kind: FindingKind::OversizedBreaker,
                category: FindingCategory::Warning,
                severity: Severity::High,
                message: format!(
                    "Breaker ({} A) too large for the {} mm² conductor ({} A)",
                    record.breaker_a, record.phase_conductor.gauge_mm2, ampacity_a
                ),
            });
        }
    }

    findings
}
