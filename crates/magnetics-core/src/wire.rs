use serde::{Deserialize, Serialize};

use crate::error::MagneticsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireMaterial {
    Copper,
    Aluminum,
}

impl WireMaterial {
    /// Resistivity at 20C, ohm-meter.
    pub fn resistivity_20c(&self) -> f64 {
        match self {
            WireMaterial::Copper => 1.68e-8,
            WireMaterial::Aluminum => 2.82e-8,
        }
    }

    /// Temperature coefficient of resistivity, per Kelvin.
    pub fn temperature_coefficient(&self) -> f64 {
        match self {
            WireMaterial::Copper => 0.00393,
            WireMaterial::Aluminum => 0.00403,
        }
    }

    pub fn resistivity_at(&self, temperature_celsius: f64) -> f64 {
        self.resistivity_20c()
            * (1.0 + self.temperature_coefficient() * (temperature_celsius - 20.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoatingMaterial {
    Polyurethane,
    Polyester,
    Polyamide,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Coating {
    Thickness {
        material: CoatingMaterial,
        thickness: f64,
    },
    Grade {
        grade: u8,
    },
}

impl Coating {
    /// Minimum breakdown voltage implied by an IEC 60317 insulation
    /// grade; `Thickness` coatings are not graded and return `None`.
    pub fn grade_breakdown_voltage(&self) -> Option<f64> {
        match self {
            Coating::Grade { grade: 1 } => Some(1500.0),
            Coating::Grade { grade: 2 } => Some(3000.0),
            Coating::Grade { grade: 3 } => Some(6000.0),
            Coating::Grade { .. } => None,
            Coating::Thickness { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Wire {
    Round {
        conducting_diameter: f64,
        outer_diameter: f64,
        material: WireMaterial,
        coating: Coating,
    },
    Litz {
        strand_diameter: f64,
        num_strands: u32,
        outer_diameter: f64,
        filling_factor: f64,
        material: WireMaterial,
        coating: Coating,
    },
    Rectangular {
        conducting_width: f64,
        conducting_height: f64,
        outer_width: f64,
        outer_height: f64,
        material: WireMaterial,
        coating: Coating,
    },
    Foil {
        conducting_width: f64,
        conducting_height: f64,
        material: WireMaterial,
        coating: Coating,
    },
    Planar {
        conducting_width: f64,
        copper_thickness: f64,
        material: WireMaterial,
        coating: Coating,
    },
}

impl Wire {
    pub fn round(conducting_diameter: f64) -> Result<Self, MagneticsError> {
        if conducting_diameter <= 0.0 {
            return Err(MagneticsError::InvalidInput(
                "conducting diameter must be positive".into(),
            ));
        }
        let coating_thickness = conducting_diameter * 0.02;
        Ok(Wire::Round {
            conducting_diameter,
            outer_diameter: conducting_diameter + 2.0 * coating_thickness,
            material: WireMaterial::Copper,
            coating: Coating::Grade { grade: 1 },
        })
    }

    /// Build a litz wire from strand diameter and count; outer diameter
    /// and filling factor are derived from a hexagonal-packing estimate.
    pub fn quick_litz(strand_diameter: f64, num_strands: u32) -> Result<Self, MagneticsError> {
        if strand_diameter <= 0.0 || num_strands == 0 {
            return Err(MagneticsError::InvalidInput(
                "strand diameter and count must be positive".into(),
            ));
        }
        let packing = packing_filling_factor(num_strands);
        let bundle_area = (num_strands as f64) * std::f64::consts::PI
            * (strand_diameter / 2.0).powi(2)
            / packing;
        let outer_diameter = 2.0 * (bundle_area / std::f64::consts::PI).sqrt();
        Ok(Wire::Litz {
            strand_diameter,
            num_strands,
            outer_diameter,
            filling_factor: packing,
            material: WireMaterial::Copper,
            coating: Coating::Grade { grade: 1 },
        })
    }

    pub fn rectangular(width: f64, height: f64) -> Result<Self, MagneticsError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(MagneticsError::InvalidInput(
                "rectangular wire dimensions must be positive".into(),
            ));
        }
        let margin = (width.min(height)) * 0.02;
        Ok(Wire::Rectangular {
            conducting_width: width,
            conducting_height: height,
            outer_width: width + 2.0 * margin,
            outer_height: height + 2.0 * margin,
            material: WireMaterial::Copper,
            coating: Coating::Grade { grade: 1 },
        })
    }

    pub fn foil(width: f64, window_height: f64) -> Result<Self, MagneticsError> {
        if width <= 0.0 || window_height <= 0.0 {
            return Err(MagneticsError::InvalidInput(
                "foil dimensions must be positive".into(),
            ));
        }
        Ok(Wire::Foil {
            conducting_width: window_height,
            conducting_height: width,
            material: WireMaterial::Copper,
            coating: Coating::Grade { grade: 1 },
        })
    }

    pub fn planar(width: f64, copper_thickness: f64) -> Result<Self, MagneticsError> {
        if width <= 0.0 || copper_thickness <= 0.0 {
            return Err(MagneticsError::InvalidInput(
                "planar wire dimensions must be positive".into(),
            ));
        }
        Ok(Wire::Planar {
            conducting_width: width,
            copper_thickness,
            material: WireMaterial::Copper,
            coating: Coating::Grade { grade: 1 },
        })
    }

    pub fn material(&self) -> WireMaterial {
        match self {
            Wire::Round { material, .. }
            | Wire::Litz { material, .. }
            | Wire::Rectangular { material, .. }
            | Wire::Foil { material, .. }
            | Wire::Planar { material, .. } => *material,
        }
    }

    pub fn conducting_area(&self) -> f64 {
        match self {
            Wire::Round {
                conducting_diameter, ..
            } => std::f64::consts::PI * (conducting_diameter / 2.0).powi(2),
            Wire::Litz {
                strand_diameter,
                num_strands,
                ..
            } => {
                (*num_strands as f64) * std::f64::consts::PI * (strand_diameter / 2.0).powi(2)
            }
            Wire::Rectangular {
                conducting_width,
                conducting_height,
                ..
            } => conducting_width * conducting_height,
            Wire::Foil {
                conducting_width,
                conducting_height,
                ..
            } => conducting_width * conducting_height,
            Wire::Planar {
                conducting_width,
                copper_thickness,
                ..
            } => conducting_width * copper_thickness,
        }
    }

    pub fn outer_area(&self) -> f64 {
        match self {
            Wire::Round { outer_diameter, .. } => {
                std::f64::consts::PI * (outer_diameter / 2.0).powi(2)
            }
            Wire::Litz { outer_diameter, .. } => {
                std::f64::consts::PI * (outer_diameter / 2.0).powi(2)
            }
            Wire::Rectangular {
                outer_width,
                outer_height,
                ..
            } => outer_width * outer_height,
            Wire::Foil { .. } | Wire::Planar { .. } => self.conducting_area(),
        }
    }

    pub fn resistance_per_meter(&self, temperature_celsius: f64) -> f64 {
        self.material().resistivity_at(temperature_celsius) / self.conducting_area()
    }

    /// Standard Dowell-style skin-effect resistance factor, valid over
    /// the `d/delta` range a round/litz conductor normally operates in.
    pub fn skin_effect_loss_factor(&self, frequency: f64, temperature_celsius: f64) -> f64 {
        let diameter = match self {
            Wire::Round {
                conducting_diameter,
                ..
            } => *conducting_diameter,
            Wire::Litz {
                strand_diameter, ..
            } => *strand_diameter,
            _ => return 1.0,
        };
        if frequency <= 0.0 {
            return 1.0;
        }
        let delta = skin_depth(self.material(), frequency, temperature_celsius);
        let x = diameter / delta;
        skin_effect_factor_from_ratio(x)
    }
}

/// Hexagonal-packing-derived filling factor for a round-strand bundle.
pub fn packing_filling_factor(num_strands: u32) -> f64 {
    if num_strands <= 1 {
        0.91
    } else {
        0.75
    }
}

pub fn skin_depth(material: WireMaterial, frequency: f64, temperature_celsius: f64) -> f64 {
    const MU0: f64 = 4.0 * std::f64::consts::PI * 1e-7;
    let rho = material.resistivity_at(temperature_celsius);
    (rho / (std::f64::consts::PI * frequency * MU0)).sqrt()
}

/// Rational approximation of the Bessel-function skin-effect resistance
/// ratio `Rac/Rdc` as a function of `d/delta`.
pub fn skin_effect_factor_from_ratio(x: f64) -> f64 {
    if x <= 0.0 {
        return 1.0;
    }
    let x4 = x.powi(4);
    1.0 + x4 / (48.0 + 0.8 * x4)
}
