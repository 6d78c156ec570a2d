//! Leakage inductance between a pair of windings, built from the
//! piecewise-linear ampere-turn (MMF) profile across the winding
//! window: sections carrying the reference winding's current ramp the
//! MMF up, sections carrying the paired winding's return current ramp
//! it back down, everything else holds it flat.

use magnetics_devices::reluctance::MU0;

use crate::coil::Coil;
use crate::error::MagneticsError;
use crate::wire::skin_depth;
use crate::wire::WireMaterial;

#[derive(Debug, Clone, Copy)]
struct MmfSegment {
    start: f64,
    end: f64,
    mmf_start: f64,
    mmf_end: f64,
}

fn mmf_profile(coil: &Coil, winding_i: usize, winding_j: usize) -> Vec<MmfSegment> {
    let mut sections: Vec<_> = coil.sections.iter().enumerate().collect();
    sections.sort_by(|a, b| a.1.offset.partial_cmp(&b.1.offset).unwrap());

    let mut segments = Vec::with_capacity(sections.len());
    let mut mmf = 0.0;
    for (section_index, section) in sections {
        let turns_in_section: usize = coil
            .layers
            .iter()
            .enumerate()
            .filter(|(_, l)| l.section_index == section_index)
            .map(|(layer_idx, _)| {
                coil.turns
                    .iter()
                    .filter(|t| t.layer_index == layer_idx)
                    .count()
            })
            .sum();
        let sign: f64 = if section.winding_index == winding_i {
            1.0
        } else if section.winding_index == winding_j {
            -1.0
        } else {
            0.0
        };
        let contribution = sign * turns_in_section as f64;
        let mmf_start = mmf;
        mmf += contribution;
        segments.push(MmfSegment {
            start: section.offset,
            end: section.offset + section.length,
            mmf_start,
            mmf_end: mmf,
        });
    }
    segments
}

fn integrate_mmf_squared(segments: &[MmfSegment], effective_height_scale: f64) -> f64 {
    let mut total = 0.0;
    for seg in segments {
        let length = (seg.end - seg.start).max(0.0) * effective_height_scale;
        // Trapezoid on mmf(x)^2 across a linear ramp from mmf_start to mmf_end.
        let a = seg.mmf_start;
        let b = seg.mmf_end;
        total += length * (a * a + a * b + b * b) / 3.0;
    }
    total
}

/// `skin_depth(frequency) / section_height` clamped to `[~0, 1]`, used
/// to shrink the effective MMF-carrying height at high frequency.
fn frequency_height_scale(frequency: f64, representative_height: f64) -> f64 {
    if frequency <= 0.0 || representative_height <= 0.0 {
        return 1.0;
    }
    let delta = skin_depth(WireMaterial::Copper, frequency, 20.0);
    (delta / representative_height).min(1.0).max(1e-6)
}

pub fn leakage_inductance(
    coil: &Coil,
    frequency: f64,
    winding_i: usize,
    winding_j: usize,
    mean_turn_length: f64,
    bobbin_window_width: f64,
) -> Result<f64, MagneticsError> {
    if winding_i == winding_j {
        return Ok(0.0);
    }
    if winding_i >= coil.functional.len() || winding_j >= coil.functional.len() {
        return Err(MagneticsError::InvalidInput(
            "winding index out of range".into(),
        ));
    }
    if bobbin_window_width <= 0.0 {
        return Err(MagneticsError::InvalidGeometry(
            "bobbin window width must be positive".into(),
        ));
    }
    let segments = mmf_profile(coil, winding_i, winding_j);
    let representative_height = segments
        .iter()
        .map(|s| s.end - s.start)
        .fold(f64::INFINITY, f64::min)
        .max(1e-6);
    let scale = frequency_height_scale(frequency, representative_height);
    let integral = integrate_mmf_squared(&segments, scale);
    let inductance = MU0 * mean_turn_length / bobbin_window_width * integral;
    Ok(inductance)
}

pub fn leakage_inductance_all_windings(
    coil: &Coil,
    frequency: f64,
    winding_i: usize,
    mean_turn_length: f64,
    bobbin_window_width: f64,
) -> Result<Vec<f64>, MagneticsError> {
    (0..coil.functional.len())
        .map(|j| {
            if j == winding_i {
                Ok(0.0)
            } else {
                leakage_inductance(
                    coil,
                    frequency,
                    winding_i,
                    j,
                    mean_turn_length,
                    bobbin_window_width,
                )
            }
        })
        .collect()
}
