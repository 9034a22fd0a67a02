use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use super::types::{ConductorSize, PhaseValues, PhaseVoltage};

/// Circuit definition as captured from the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CircuitInput {
    /// Panel name, unique case-insensitively within a record store
    #[validate(length(min = 1, max = 120))]
    pub name: String,

    /// Power factor, in (0, 1]
    #[validate(range(exclusive_min = 0.0, max = 1.0))]
    pub power_factor: f64,

    /// Demand factor (fraction of connected load simultaneously active)
    #[validate(range(exclusive_min = 0.0))]
    pub demand_factor: f64,

    /// Cable run length (m)
    #[validate(range(exclusive_min = 0.0))]
    pub run_length_m: f64,

    /// Connected active power per phase (W)
    pub phase_load_w: PhaseValues,

    /// Nominal phase voltage
    pub phase_voltage: PhaseVoltage,
}

impl CircuitInput {
    pub fn new(
        name: impl Into<String>,
        power_factor: f64,
        demand_factor: f64,
        run_length_m: f64,
        phase_load_w: PhaseValues,
        phase_voltage: PhaseVoltage,
    ) -> Self {
        Self {
            name: name.into(),
            power_factor,
            demand_factor,
            run_length_m,
            phase_load_w,
            phase_voltage,
        }
    }
}

/// Sized circuit, as produced by the engine and kept by the record store
///
/// Serialized as one flat object. Deserialization also accepts the two
/// historical key sets (short symbolic keys and verbose labelled keys).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitRecord {
    #[serde(alias = "N", alias = "N°", deserialize_with = "deserialize_sequence")]
    pub sequence: u32,
    #[serde(alias = "DESCRICAO", alias = "DESCRIÇÃO")]
    pub name: String,

    #[serde(alias = "ATIVA_R", alias = "ATIVA-R")]
    pub load_r_w: f64,
    #[serde(alias = "ATIVA_S", alias = "ATIVA-S")]
    pub load_s_w: f64,
    #[serde(alias = "ATIVA_T", alias = "ATIVA-T")]
    pub load_t_w: f64,

    #[serde(alias = "DEM_R", alias = "DEM-R")]
    pub demand_r_w: f64,
    #[serde(alias = "DEM_S", alias = "DEM-S")]
    pub demand_s_w: f64,
    #[serde(alias = "DEM_T", alias = "DEM-T")]
    pub demand_t_w: f64,

    #[serde(alias = "R")]
    pub current_r_a: f64,
    #[serde(alias = "S")]
    pub current_s_a: f64,
    #[serde(alias = "T")]
    pub current_t_a: f64,

    #[serde(alias = "FP")]
    pub power_factor: f64,
    #[serde(alias = "FD")]
    pub demand_factor: f64,

    #[serde(alias = "TENSAO_FASE_V", alias = "TENSÃO FASE (V)")]
    pub phase_voltage_v: PhaseVoltage,
    #[serde(alias = "TENSAO_LINHA_V", alias = "TENSÃO LINHA (V)")]
    pub line_voltage_v: u32,

    #[serde(alias = "POT_TOTAL_W", alias = "POT. TOTAL (W)")]
    pub total_power_w: f64,
    #[serde(alias = "DEM_TOTAL_VA", alias = "DEM. TOTAL (VA)")]
    pub total_demand_va: f64,
    #[serde(alias = "COR_MEDIA_A", alias = "COR. MÉDIA (A)")]
    pub average_current_a: f64,

    #[serde(alias = "DIST_M", alias = "DIST.(M)")]
    pub run_length_m: f64,
    #[serde(alias = "QUEDA_TENSAO_PERC", alias = "QUEDA DE TENSÃO (%)")]
    pub voltage_drop_percent: f64,

    #[serde(alias = "FA")]
    pub phase_conductor: ConductorSize,
    #[serde(alias = "NE")]
    pub neutral_conductor: ConductorSize,
    #[serde(alias = "TE")]
    pub ground_gauge_mm2: u32,
    #[serde(alias = "DISJUNTOR")]
    pub breaker_a: u32,
}

impl CircuitRecord {
    /// Display identifier, e.g. `QD-3`
    pub fn display_id(&self) -> String {
        format!("QD-{}", self.sequence)
    }

    pub fn phase_loads(&self) -> PhaseValues {
        PhaseValues::new(self.load_r_w, self.load_s_w, self.load_t_w)
    }

    pub fn phase_demands(&self) -> PhaseValues {
        PhaseValues::new(self.demand_r_w, self.demand_s_w, self.demand_t_w)
    }

    pub fn phase_currents(&self) -> PhaseValues {
        PhaseValues::new(self.current_r_a, self.current_s_a, self.current_t_a)
    }

    /// Name of the first numeric field that is NaN or infinite
    ///
    /// JSON has no representation for these, so such a record cannot be
    /// persisted and read back.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        [
            ("load_r_w", self.load_r_w),
            ("load_s_w", self.load_s_w),
            ("load_t_w", self.load_t_w),
            ("demand_r_w", self.demand_r_w),
            ("demand_s_w", self.demand_s_w),
            ("demand_t_w", self.demand_t_w),
            ("current_r_a", self.current_r_a),
            ("current_s_a", self.current_s_a),
            ("current_t_a", self.current_t_a),
            ("power_factor", self.power_factor),
            ("demand_factor", self.demand_factor),
            ("total_power_w", self.total_power_w),
            ("total_demand_va", self.total_demand_va),
            ("average_current_a", self.average_current_a),
            ("run_length_m", self.run_length_m),
            ("voltage_drop_percent", self.voltage_drop_percent),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map(|(field, _)| field)
    }

    /// Rebuild the input this record was sized from
    pub fn to_input(&self) -> CircuitInput {
        CircuitInput {
            name: self.name.clone(),
            power_factor: self.power_factor,
            demand_factor: self.demand_factor,
            run_length_m: self.run_length_m,
            phase_load_w: self.phase_loads(),
            phase_voltage: self.phase_voltage_v,
        }
    }
}

/// Accepts a plain number or the legacy `"QD-{n}"` label
fn deserialize_sequence<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Sequence {
        Number(u32),
        Label(String),
    }

    match Sequence::deserialize(deserializer)? {
        Sequence::Number(n) => Ok(n),
        Sequence::Label(label) => {
            let digits = label.trim().trim_start_matches("QD-");
            digits
                .parse()
                .map_err(|_| serde::de::Error::custom(format!("invalid sequence label '{}'", label)))
        }
    }
}
