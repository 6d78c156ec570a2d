//! The `Mas` document: the top-level JSON structure exchanged over the
//! HTTP surface and read/written by the CLI. Inputs describe what was
//! asked for, the magnetic describes the concrete design, outputs hold
//! whatever the pipeline has computed so far.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::coil::Coil;
use crate::core_data::Core;
use crate::wire::Wire;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub frequency: f64,
    pub peak: f64,
    pub offset: f64,
    pub duty_cycle: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Harmonics {
    pub frequencies: Vec<f64>,
    pub amplitudes: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Excitation {
    pub current: Signal,
    pub voltage: Option<Signal>,
    pub current_harmonics: Option<Harmonics>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Processed {
    pub rms: f64,
    pub peak_to_peak: f64,
    pub effective_frequency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    pub name: String,
    pub ambient_temperature: f64,
    /// Excitation per winding, indexed the same as `Coil::functional`.
    pub excitations: Vec<Excitation>,
    pub processed: Option<Vec<Processed>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRequirements {
    pub magnetizing_inductance: DimensionedTarget,
    pub turns_ratios: Vec<f64>,
    pub maximum_dimensions: Option<(f64, f64, f64)>,
    pub maximum_weight: Option<f64>,
    pub insulation: Option<crate::insulation::InsulationRequirement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionedTarget {
    pub nominal: f64,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inputs {
    pub design_requirements: DesignRequirements,
    pub operating_points: Vec<OperatingPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarMatrixAtFrequency {
    pub frequency: f64,
    pub values: Vec<Vec<f64>>,
}

impl ScalarMatrixAtFrequency {
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        let n = self.values.len();
        for i in 0..n {
            for j in 0..n {
                if (self.values[i][j] - self.values[j][i]).abs() > tolerance {
                    return false;
                }
            }
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MagneticOutputs {
    pub inductance_matrix: Vec<ScalarMatrixAtFrequency>,
    pub resistance_matrix: Vec<ScalarMatrixAtFrequency>,
    pub coupling_coefficients: HashMap<String, f64>,
    pub winding_losses: HashMap<String, f64>,
    pub core_losses: Option<f64>,
    pub numerical_issues: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Magnetic {
    pub name: String,
    pub core: Core,
    pub coil: Coil,
    pub wires: Vec<Wire>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mas {
    pub inputs: Inputs,
    pub magnetic: Magnetic,
    pub outputs: Option<MagneticOutputs>,
}
