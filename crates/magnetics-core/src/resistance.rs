//! Resistance matrix: each entry is extracted by powering one or two
//! windings with unit current and reading back the resulting ohmic
//! loss, the same two-port extraction idiom `inductance::matrix` uses
//! for inductance. Symmetric by construction.

use crate::coil::Coil;
use crate::error::MagneticsError;
use crate::losses::winding_losses;
use crate::mas::{Excitation, OperatingPoint, ScalarMatrixAtFrequency, Signal};
use crate::settings::Settings;
use crate::wire::Wire;

fn unit_excitation(frequency: f64) -> Excitation {
    Excitation {
        current: Signal {
            frequency,
            peak: std::f64::consts::SQRT_2,
            offset: 0.0,
            duty_cycle: None,
        },
        voltage: None,
        current_harmonics: None,
    }
}

fn zero_excitation(frequency: f64) -> Excitation {
    Excitation {
        current: Signal {
            frequency,
            peak: 0.0,
            offset: 0.0,
            duty_cycle: None,
        },
        voltage: None,
        current_harmonics: None,
    }
}

fn loss_with_unit_current(
    coil: &Coil,
    wires: &[Wire],
    settings: &Settings,
    frequency: f64,
    temperature: f64,
    active: &[usize],
) -> Result<f64, MagneticsError> {
    let excitations = (0..coil.functional.len())
        .map(|i| {
            if active.contains(&i) {
                unit_excitation(frequency)
            } else {
                zero_excitation(frequency)
            }
        })
        .collect();
    let op = OperatingPoint {
        name: "resistance-extraction".into(),
        ambient_temperature: temperature,
        excitations,
        processed: None,
    };
    Ok(winding_losses(coil, wires, settings, &op)?.total)
}

pub fn resistance_matrix(
    coil: &Coil,
    wires: &[Wire],
    settings: &Settings,
    frequency: f64,
    temperature: f64,
) -> Result<ScalarMatrixAtFrequency, MagneticsError> {
    let n = coil.functional.len();
    if n == 0 {
        return Err(MagneticsError::InvalidInput("coil has no windings".into()));
    }

    let mut diagonal_loss = vec![0.0; n];
    for i in 0..n {
        diagonal_loss[i] = loss_with_unit_current(coil, wires, settings, frequency, temperature, &[i])?;
    }

    let mut values = vec![vec![0.0; n]; n];
    for i in 0..n {
        values[i][i] = diagonal_loss[i];
        if !values[i][i].is_finite() || values[i][i] < 0.0 {
            return Err(MagneticsError::NumericalInstability(format!(
                "resistance diagonal {i} is non-finite or negative"
            )));
        }
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let combined_loss = loss_with_unit_current(coil, wires, settings, frequency, temperature, &[i, j])?;
            let mutual = combined_loss - diagonal_loss[i] - diagonal_loss[j];
            values[i][j] = mutual;
            values[j][i] = mutual;
        }
    }

    Ok(ScalarMatrixAtFrequency { frequency, values })
}
