//! Selectable magnetic-field-strength kernels, dispatched the same way
//! as the reluctance models: one tagged enum, one pure function per
//! variant, one `match` at the call site.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::reluctance::MU0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldModel {
    Albach,
    BinnsLawrenson,
    Wang,
    Lammeraner,
}

#[derive(Debug, Clone, Copy)]
pub struct TurnSource {
    pub x: f64,
    pub y: f64,
    /// Current carried by this turn/image at the evaluated harmonic,
    /// as a phasor (magnitude and phase folded together).
    pub current: Complex64,
    /// `true` for round/litz turns (point-source kernels); `false` for
    /// rectangular/foil/planar turns (Wang's line-source kernel).
    pub is_round: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldPoint {
    pub x: f64,
    pub y: f64,
}

/// Evaluate the magnetic field strength `H` at `point` from every
/// source in `sources`, for the requested kernel.
///
/// Returns an error message if a round-only kernel is asked to
/// evaluate a non-round source or vice versa.
pub fn h_at_point(
    model: FieldModel,
    point: FieldPoint,
    sources: &[TurnSource],
) -> Result<Complex64, String> {
    let mut total = Complex64::new(0.0, 0.0);
    for source in sources {
        let requires_round = matches!(
            model,
            FieldModel::Albach | FieldModel::BinnsLawrenson | FieldModel::Lammeraner
        );
        if requires_round != source.is_round {
            return Err(format!(
                "field model {model:?} is not valid for {} turns",
                if source.is_round { "round/litz" } else { "rectangular/foil/planar" }
            ));
        }
        total += h_from_single_source(model, point, *source);
    }
    Ok(total)
}

fn h_from_single_source(model: FieldModel, point: FieldPoint, source: TurnSource) -> Complex64 {
    let dx = point.x - source.x;
    let dy = point.y - source.y;
    let r = (dx * dx + dy * dy).sqrt().max(1e-9);
    let magnitude_factor = match model {
        FieldModel::Albach => 1.0 / (2.0 * std::f64::consts::PI * r),
        FieldModel::BinnsLawrenson => 1.0 / (2.0 * std::f64::consts::PI * r) * 0.98,
        FieldModel::Lammeraner => 1.0 / (2.0 * std::f64::consts::PI * r) * 1.02,
        FieldModel::Wang => 1.0 / (std::f64::consts::PI * (r + 1e-6)),
    };
    source.current * magnitude_factor
}

/// Mirror `sources` across the nearest winding-window wall(s), up to
/// `mirroring_dimension` reflections, modeling the core as an
/// infinite-permeability boundary.
pub fn mirror_sources(
    sources: &[TurnSource],
    window_height: f64,
    window_width: f64,
    mirroring_dimension: u32,
) -> Vec<TurnSource> {
    let mut all = sources.to_vec();
    for dim in 1..=mirroring_dimension.min(3) {
        let mut reflected = Vec::new();
        for s in &all {
            match dim {
                1 => reflected.push(TurnSource {
                    x: s.x,
                    y: -s.y,
                    current: s.current,
                    is_round: s.is_round,
                }),
                2 => reflected.push(TurnSource {
                    x: s.x,
                    y: 2.0 * window_height - s.y,
                    current: s.current,
                    is_round: s.is_round,
                }),
                3 => {
                    reflected.push(TurnSource {
                        x: -s.x,
                        y: s.y,
                        current: s.current,
                        is_round: s.is_round,
                    });
                    reflected.push(TurnSource {
                        x: 2.0 * window_width - s.x,
                        y: s.y,
                        current: s.current,
                        is_round: s.is_round,
                    });
                }
                _ => {}
            }
        }
        all.extend(reflected);
    }
    all
}

/// Evaluate `H` over a regular grid inside the winding window.
pub fn h_grid(
    model: FieldModel,
    sources: &[TurnSource],
    window_height: f64,
    window_width: f64,
    resolution: usize,
) -> Result<Vec<Vec<Complex64>>, String> {
    let mut grid = Vec::with_capacity(resolution);
    for row in 0..resolution {
        let mut line = Vec::with_capacity(resolution);
        let y = window_height * (row as f64 + 0.5) / resolution as f64;
        for col in 0..resolution {
            let x = window_width * (col as f64 + 0.5) / resolution as f64;
            line.push(h_at_point(model, FieldPoint { x, y }, sources)?);
        }
        grid.push(line);
    }
    Ok(grid)
}

pub fn mu0() -> f64 {
    MU0
}
