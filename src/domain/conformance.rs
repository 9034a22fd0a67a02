use serde::{Deserialize, Serialize};
use strum::Display;

/// Severity of a conformance finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Whether the finding flags a problem or suggests an improvement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FindingCategory {
    Warning,
    Recommendation,
}

/// Which check produced the finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FindingKind {
    /// Voltage drop above the allowed percentage
    ExcessiveVoltageDrop,
    /// Power factor below the recommended minimum
    LowPowerFactor,
    /// Breaker rating too large for the selected conductor
    OversizedBreaker,
}

/// Advisory result of checking one sized circuit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub category: FindingCategory,
    pub severity: Severity,
    pub message: String,
}
