use magnetics_devices::reluctance::{self, ColumnGeometry, GapGeometry, ReluctanceModel};

use crate::core_data::Core;
use crate::error::MagneticsError;
use crate::mas::Signal;
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnetizingInductanceOutput {
    pub total_reluctance: f64,
    /// Magnetizing inductance referred to winding 0.
    pub lm0: f64,
}

/// Total reluctance of the magnetic circuit: series core-column
/// reluctance plus series gap reluctance for every column.
pub fn total_reluctance(core: &Core, settings: &Settings) -> Result<f64, MagneticsError> {
    core.validate_gaps()?;
    let model = settings.reluctance_model;
    let mu_r = core.material.initial_permeability;
    let mut total = 0.0;
    for (index, column) in core.columns.iter().enumerate() {
        let geometry = ColumnGeometry {
            height: column.height,
            area: column.area,
            width: column.width,
            depth: column.depth,
        };
        total += reluctance::core_reluctance(model, geometry, mu_r);
        for gap in core.gaps_on_column(index) {
            let effective_length = effective_gap_length(gap.length);
            let gap_geometry = GapGeometry {
                length: effective_length,
                adjacent_distance: column.width,
            };
            if let Some(count) = gap.distributed_count.filter(|&c| c > 1) {
                let sub_length = effective_length / count as f64;
                let sub_geometry = GapGeometry {
                    length: sub_length,
                    adjacent_distance: column.width,
                };
                total += count as f64 * reluctance::gap_reluctance(model, sub_geometry, geometry);
            } else {
                total += reluctance::gap_reluctance(model, gap_geometry, geometry);
            }
        }
    }
    if total <= 0.0 || !total.is_finite() {
        return Err(MagneticsError::NumericalInstability(
            "total reluctance is non-positive or non-finite".into(),
        ));
    }
    Ok(total)
}

/// Gap lengths below the residual floor are treated as residual for
/// reluctance purposes only; the `Gap.kind` field itself is untouched.
fn effective_gap_length(length: f64) -> f64 {
    if length < crate::core_data::Gap::RESIDUAL_FLOOR {
        crate::core_data::Gap::RESIDUAL_FLOOR
    } else {
        length
    }
}

pub fn magnetizing_inductance(
    core: &Core,
    number_turns_winding0: u32,
    settings: &Settings,
) -> Result<MagnetizingInductanceOutput, MagneticsError> {
    let reluctance_total = total_reluctance(core, settings)?;
    let n0 = number_turns_winding0 as f64;
    if n0 <= 0.0 {
        return Err(MagneticsError::InvalidInput(
            "winding 0 must have at least one turn".into(),
        ));
    }
    let lm0 = n0 * n0 / reluctance_total;
    Ok(MagnetizingInductanceOutput {
        total_reluctance: reluctance_total,
        lm0,
    })
}

pub fn magnetizing_inductance_referred_to_winding(
    lm0: f64,
    turns_winding0: u32,
    turns_winding_i: u32,
) -> f64 {
    let ratio = turns_winding_i as f64 / turns_winding0 as f64;
    lm0 * ratio * ratio
}

/// Peak flux density from the volt-time integral of winding 0's
/// excitation: `B_peak = integral(v dt) / (N0 * Ae)`.
pub fn flux_density(voltage: Signal, turns_winding0: u32, effective_area: f64) -> f64 {
    if voltage.frequency <= 0.0 || effective_area <= 0.0 || turns_winding0 == 0 {
        return f64::NAN;
    }
    let volt_seconds = voltage.peak / (2.0 * voltage.frequency);
    volt_seconds / (turns_winding0 as f64 * effective_area)
}

pub fn check_saturation(b_peak: f64, saturation_flux_density: f64, safety_margin: f64) -> bool {
    b_peak.abs() >= saturation_flux_density * (1.0 - safety_margin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_data::{Core, CoreColumn, CoreMaterial, CoreShapeFamily};
    use crate::geometry::WindingWindow;

    fn core() -> Core {
        Core {
            shape_family: CoreShapeFamily::Concentric,
            material: CoreMaterial {
                name: "N87".into(),
                initial_permeability: 2200.0,
                saturation_flux_density: 0.39,
            },
            columns: vec![CoreColumn {
                height: 0.04,
                area: 0.0001,
                width: 0.01,
                depth: 0.01,
                is_round: false,
            }],
            gaps: vec![],
            winding_window: WindingWindow {
                height: 0.02,
                width: 0.01,
            },
            number_stacks: 1,
            in_stock: true,
        }
    }

    #[test]
    fn magnetizing_inductance_scales_with_turns_squared() {
        let settings = Settings::default();
        let out10 = magnetizing_inductance(&core(), 10, &settings).unwrap();
        let out20 = magnetizing_inductance(&core(), 20, &settings).unwrap();
        assert!((out20.lm0 / out10.lm0 - 4.0).abs() < 1e-9);
    }

    #[test]
    fn referred_inductance_scales_with_turns_ratio_squared() {
        let lm0 = 1e-3;
        let lm_i = magnetizing_inductance_referred_to_winding(lm0, 10, 20);
        assert!((lm_i / lm0 - 4.0).abs() < 1e-9);
    }

    #[test]
    fn saturation_flags_near_limit() {
        assert!(check_saturation(0.38, 0.39, 0.02));
        assert!(!check_saturation(0.2, 0.39, 0.02));
    }
}
