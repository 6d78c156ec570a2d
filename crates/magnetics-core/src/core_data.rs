use serde::{Deserialize, Serialize};

use crate::geometry::WindingWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapType {
    Subtractive,
    Additive,
    Residual,
    Distributed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    pub kind: GapType,
    /// Physical gap length, meters.
    pub length: f64,
    /// For `GapType::Distributed`, the number of equal sub-gaps the
    /// column is split into.
    pub distributed_count: Option<u32>,
    /// Index of the core column this gap sits on.
    pub column_index: usize,
}

impl Gap {
    /// Gap length below this is treated as a manufacturing residual
    /// for reluctance purposes, regardless of the reported `kind`.
    pub const RESIDUAL_FLOOR: f64 = 5e-6;

    pub fn is_effectively_residual(&self) -> bool {
        self.length < Self::RESIDUAL_FLOOR
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreColumn {
    pub height: f64,
    pub area: f64,
    /// Width/depth used for fringing corrections on a rectangular
    /// column; for round columns this is the diameter.
    pub width: f64,
    pub depth: f64,
    pub is_round: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoreShapeFamily {
    Toroidal,
    Concentric,
    Planar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreMaterial {
    pub name: String,
    /// Relative permeability at a reference operating point; the
    /// reluctance kernels may refine this with frequency/temperature
    /// corrections, this is the DC/low-frequency anchor.
    pub initial_permeability: f64,
    /// Saturation flux density, Tesla.
    pub saturation_flux_density: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Core {
    pub shape_family: CoreShapeFamily,
    pub material: CoreMaterial,
    pub columns: Vec<CoreColumn>,
    pub gaps: Vec<Gap>,
    pub winding_window: WindingWindow,
    pub number_stacks: u32,
    pub in_stock: bool,
}

impl Core {
    /// Effective magnetic path length across all columns, meters.
    pub fn effective_length(&self) -> f64 {
        self.columns.iter().map(|c| c.height).sum()
    }

    /// Effective cross-sectional area, the minimum column area scaled
    /// by stack count (the bottleneck for flux density).
    pub fn effective_area(&self) -> f64 {
        let min_area = self
            .columns
            .iter()
            .map(|c| c.area)
            .fold(f64::INFINITY, f64::min);
        if min_area.is_finite() {
            min_area * self.number_stacks as f64
        } else {
            0.0
        }
    }

    pub fn effective_volume(&self) -> f64 {
        self.effective_length() * self.effective_area()
    }

    pub fn gaps_on_column(&self, column_index: usize) -> impl Iterator<Item = &Gap> {
        self.gaps
            .iter()
            .filter(move |g| g.column_index == column_index)
    }

    /// `InvalidGeometry` when a column's gap lengths exceed its height.
    pub fn validate_gaps(&self) -> Result<(), crate::error::MagneticsError> {
        for (index, column) in self.columns.iter().enumerate() {
            let total: f64 = self.gaps_on_column(index).map(|g| g.length).sum();
            if total > column.height {
                return Err(crate::error::MagneticsError::InvalidGeometry(format!(
                    "column {index} gap length {total} exceeds column height {}",
                    column.height
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bobbin {
    pub winding_window: WindingWindow,
    pub wall_thickness: f64,
}
