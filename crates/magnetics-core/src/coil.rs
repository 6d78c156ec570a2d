use serde::{Deserialize, Serialize};

use crate::error::MagneticsError;
use crate::geometry::Point2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IsolationSide {
    Primary,
    Secondary,
    Tertiary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindingFunctionalDescription {
    pub name: String,
    pub number_turns: u32,
    pub number_parallels: u32,
    pub isolation_side: IsolationSide,
    pub wire_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionAlignment {
    Centered,
    Inner,
    Outer,
    Spread,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnsAlignment {
    Centered,
    Inner,
    Outer,
    Spread,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayersOrientation {
    Overlapping,
    Contiguous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WiringTechnology {
    Wound,
    Printed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub winding_index: usize,
    /// Offset from the start of the winding window, meters.
    pub offset: f64,
    pub length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub section_index: usize,
    pub layer_index_in_section: usize,
    pub offset: f64,
    pub length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub winding_index: usize,
    pub layer_index: usize,
    pub position: Point2,
    /// Length of this single turn, meters (circumference at its radius
    /// for a round core, perimeter of the bobbin cross-section otherwise).
    pub length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coil {
    pub functional: Vec<WindingFunctionalDescription>,
    pub sections: Vec<Section>,
    pub layers: Vec<Layer>,
    pub turns: Vec<Turn>,
    pub overflow: bool,
}

impl Coil {
    pub fn turns_for_winding(&self, winding_index: usize) -> impl Iterator<Item = &Turn> {
        self.turns
            .iter()
            .filter(move |t| t.winding_index == winding_index)
    }

    pub fn validate(&self) -> Result<(), MagneticsError> {
        for (index, winding) in self.functional.iter().enumerate() {
            let expected = winding.number_turns as usize * winding.number_parallels.max(1) as usize;
            let actual = self.turns_for_winding(index).count();
            if actual != expected {
                return Err(MagneticsError::InvalidGeometry(format!(
                    "winding {} expected {} physical turns, coil has {}",
                    winding.name, expected, actual
                )));
            }
        }
        Ok(())
    }
}
