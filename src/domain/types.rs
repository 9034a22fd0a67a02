use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};

// ============================================================================
// Phases
// ============================================================================

/// One value per phase, in R, S, T order (W, VA or A depending on context)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PhaseValues {
    pub r: f64,
    pub s: f64,
    pub t: f64,
}

impl PhaseValues {
    pub fn new(r: f64, s: f64, t: f64) -> Self {
        Self { r, s, t }
    }

    /// Sum across all phases
    pub fn total(&self) -> f64 {
        self.r + self.s + self.t
    }

    /// Largest single-phase value
    pub fn max_phase(&self) -> f64 {
        self.r.max(self.s).max(self.t)
    }

    /// Arithmetic mean of the three phases
    pub fn mean(&self) -> f64 {
        self.total() / 3.0
    }

    /// Number of phases carrying a strictly positive value
    pub fn active_phases(&self) -> usize {
        self.as_array().iter().filter(|v| **v > 0.0).count()
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.r, self.s, self.t]
    }

    /// Apply `f` to every phase
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            r: f(self.r),
            s: f(self.s),
            t: f(self.t),
        }
    }

    /// Phase-wise sum
    pub fn add(&self, other: &PhaseValues) -> Self {
        Self {
            r: self.r + other.r,
            s: self.s + other.s,
            t: self.t + other.t,
        }
    }
}

// ============================================================================
// Circuit classification
// ============================================================================

/// Circuit type, derived from how many phases carry load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CircuitType {
    ThreePhase,
    TwoPhase,
    SinglePhase,
}

// ============================================================================
// Nominal voltage
// ============================================================================

/// Nominal phase voltage of a circuit
///
/// Each phase voltage is paired with a line voltage: 220 V phase reports
/// 127 V line and 127 V phase reports 220 V line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PhaseVoltage {
    V220,
    V127,
}

impl PhaseVoltage {
    pub fn volts(&self) -> u32 {
        match self {
            PhaseVoltage::V220 => 220,
            PhaseVoltage::V127 => 127,
        }
    }

    pub fn as_f64(&self) -> f64 {
        self.volts() as f64
    }

    /// Line voltage reported alongside this phase voltage
    pub fn paired_line_voltage(&self) -> u32 {
        match self {
            PhaseVoltage::V220 => 127,
            PhaseVoltage::V127 => 220,
        }
    }
}

impl TryFrom<u32> for PhaseVoltage {
    type Error = String;

    fn try_from(volts: u32) -> Result<Self, Self::Error> {
        match volts {
            220 => Ok(PhaseVoltage::V220),
            127 => Ok(PhaseVoltage::V127),
            other => Err(format!("unsupported phase voltage {} V (expected 220 or 127)", other)),
        }
    }
}

impl From<PhaseVoltage> for u32 {
    fn from(v: PhaseVoltage) -> Self {
        v.volts()
    }
}

impl fmt::Display for PhaseVoltage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} V", self.volts())
    }
}

// ============================================================================
// Conductor descriptor
// ============================================================================

/// Conductor cross-section with the number of conductors run in parallel
///
/// Text form is the plain gauge for a single conductor (`"70"`) and
/// `"{n}x{gauge}"` for parallel runs (`"2x70"`). The legacy `"1x70"` form
/// parses to a single conductor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConductorSize {
    pub gauge_mm2: u32,
    pub parallel: u8,
}

impl ConductorSize {
    pub fn single(gauge_mm2: u32) -> Self {
        Self {
            gauge_mm2,
            parallel: 1,
        }
    }

    pub fn parallel(gauge_mm2: u32, parallel: u8) -> Self {
        Self {
            gauge_mm2,
            parallel,
        }
    }
}

impl fmt::Display for ConductorSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parallel > 1 {
            write!(f, "{}x{}", self.parallel, self.gauge_mm2)
        } else {
            write!(f, "{}", self.gauge_mm2)
        }
    }
}

impl FromStr for ConductorSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches("mm²").trim();
        let (count, gauge) = match trimmed.split_once(['x', 'X']) {
            Some((n, g)) => (n.trim(), g.trim()),
            None => ("1", trimmed),
        };

        let parallel: u8 = count
            .parse()
            .map_err(|_| format!("invalid parallel conductor count in '{}'", s))?;
        let gauge_mm2: u32 = gauge
            .parse()
            .map_err(|_| format!("invalid conductor gauge in '{}'", s))?;

        if parallel == 0 {
            return Err(format!("parallel conductor count must be positive in '{}'", s));
        }

        Ok(Self {
            gauge_mm2,
            parallel,
        })
    }
}

impl TryFrom<String> for ConductorSize {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ConductorSize> for String {
    fn from(c: ConductorSize) -> Self {
        c.to_string()
    }
}
