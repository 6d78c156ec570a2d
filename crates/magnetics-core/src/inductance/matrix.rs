//! Inductance matrix assembly: the diagonal combines magnetizing and
//! leakage inductance, the off-diagonal is turns-ratio-scaled
//! magnetizing inductance, and both are written symmetrically in one
//! pass rather than produced independently and checked for symmetry
//! afterward.

use crate::coil::Coil;
use crate::error::MagneticsError;
use crate::mas::ScalarMatrixAtFrequency;
use crate::safe_math::clamp_unit;

use super::leakage::leakage_inductance_all_windings;

/// Diagonal self-inductance policy: `Lm_i + leakage_inductance(i, j)` for
/// the first other winding `j` found, not a true max over every other
/// winding. Kept as a one-comparison lookup rather than generalized to
/// more than two windings (see DESIGN.md).
pub fn diagonal_self_inductance(lm_i: f64, leakages_from_i: &[f64], winding_i: usize) -> f64 {
    let max_leakage = leakages_from_i
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != winding_i)
        .map(|(_, &l)| l)
        .next()
        .unwrap_or(0.0);
    lm_i + max_leakage
}

pub fn inductance_matrix(
    coil: &Coil,
    frequency: f64,
    lm0: f64,
    turns_winding0: u32,
    mean_turn_length: f64,
    bobbin_window_width: f64,
) -> Result<ScalarMatrixAtFrequency, MagneticsError> {
    let n = coil.functional.len();
    if n == 0 {
        return Err(MagneticsError::InvalidInput(
            "coil has no windings".into(),
        ));
    }
    let turns: Vec<f64> = coil
        .functional
        .iter()
        .map(|w| w.number_turns as f64)
        .collect();

    let mut values = vec![vec![0.0; n]; n];

    for i in 0..n {
        let lm_i = lm0 * (turns[i] / turns_winding0 as f64).powi(2);
        let leakages = leakage_inductance_all_windings(
            coil,
            frequency,
            i,
            mean_turn_length,
            bobbin_window_width,
        )?;
        values[i][i] = diagonal_self_inductance(lm_i, &leakages, i);
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let mutual = lm0 * (turns[i] / turns_winding0 as f64) * (turns[j] / turns_winding0 as f64);
            values[i][j] = mutual;
            values[j][i] = mutual;
        }
    }

    Ok(ScalarMatrixAtFrequency { frequency, values })
}

pub fn coupling_coefficient(matrix: &ScalarMatrixAtFrequency, i: usize, j: usize) -> f64 {
    let l_ii = matrix.values[i][i];
    let l_jj = matrix.values[j][j];
    let l_ij = matrix.values[i][j];
    if l_ii <= 0.0 || l_jj <= 0.0 {
        return 0.0;
    }
    clamp_unit(l_ij / (l_ii * l_jj).sqrt())
}

pub fn inductance_matrix_per_frequency(
    coil: &Coil,
    frequencies: &[f64],
    lm0: f64,
    turns_winding0: u32,
    mean_turn_length: f64,
    bobbin_window_width: f64,
) -> Result<Vec<ScalarMatrixAtFrequency>, MagneticsError> {
    frequencies
        .iter()
        .map(|&f| {
            inductance_matrix(
                coil,
                f,
                lm0,
                turns_winding0,
                mean_turn_length,
                bobbin_window_width,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coil::{IsolationSide, WindingFunctionalDescription};
    use crate::coil_builder::{CoilBuilder, CoilBuilderConfig};
    use crate::core_data::Bobbin;
    use crate::geometry::WindingWindow;
    use crate::wire::Wire;

    fn coil() -> Coil {
        let wire = Wire::round(0.0005).unwrap();
        let functional = vec![
            WindingFunctionalDescription {
                name: "primary".into(),
                number_turns: 10,
                number_parallels: 1,
                isolation_side: IsolationSide::Primary,
                wire_index: 0,
            },
            WindingFunctionalDescription {
                name: "secondary".into(),
                number_turns: 5,
                number_parallels: 1,
                isolation_side: IsolationSide::Secondary,
                wire_index: 0,
            },
        ];
        let bobbin = Bobbin {
            winding_window: WindingWindow {
                height: 0.04,
                width: 0.01,
            },
            wall_thickness: 0.0005,
        };
        CoilBuilder::build(&functional, &bobbin, &[wire], &CoilBuilderConfig::default()).unwrap()
    }

    #[test]
    fn matrix_is_symmetric() {
        let matrix = inductance_matrix(&coil(), 100_000.0, 1e-3, 10, 0.05, 0.01).unwrap();
        assert!(matrix.is_symmetric(1e-15));
    }

    #[test]
    fn off_diagonal_scales_with_turns_ratio() {
        let matrix = inductance_matrix(&coil(), 100_000.0, 1e-3, 10, 0.05, 0.01).unwrap();
        let expected = 1e-3 * (10.0 / 10.0) * (5.0 / 10.0);
        assert!((matrix.values[0][1] - expected).abs() / expected < 1e-9);
    }

    #[test]
    fn coupling_coefficient_is_bounded() {
        let matrix = inductance_matrix(&coil(), 100_000.0, 1e-3, 10, 0.05, 0.01).unwrap();
        let k = coupling_coefficient(&matrix, 0, 1);
        assert!((0.0..=1.0).contains(&k));
    }
}
