//! Concrete named filters used by the core/coil/magnetic advisers.

use magnetics_core::inductance::magnetizing::check_saturation;
use magnetics_core::mas::{Inputs, Mas};

use crate::filter::{FilterResult, NamedFilter};

pub fn turns_ratio_fit() -> NamedFilter {
    NamedFilter {
        name: "turns_ratio_fit",
        weight: 1.0,
        invert: true,
        log_scale: false,
        strictly_required: false,
        evaluate: Box::new(|candidate: &Mas, inputs: &Inputs| {
            let turns: Vec<f64> = candidate
                .magnetic
                .coil
                .functional
                .iter()
                .map(|w| w.number_turns as f64)
                .collect();
            if turns.is_empty() || turns[0] == 0.0 {
                return FilterResult {
                    score: f64::INFINITY,
                    passes: false,
                };
            }
            let mut error = 0.0;
            for (i, target) in inputs.design_requirements.turns_ratios.iter().enumerate() {
                if let Some(&t) = turns.get(i + 1) {
                    let actual_ratio = turns[0] / t;
                    error += (actual_ratio - target).abs();
                }
            }
            FilterResult {
                score: error,
                passes: true,
            }
        }),
    }
}

pub fn magnetizing_inductance_match() -> NamedFilter {
    NamedFilter {
        name: "magnetizing_inductance_match",
        weight: 1.0,
        invert: true,
        log_scale: false,
        strictly_required: false,
        evaluate: Box::new(|candidate: &Mas, inputs: &Inputs| {
            let target = inputs.design_requirements.magnetizing_inductance.nominal;
            let achieved = candidate
                .outputs
                .as_ref()
                .and_then(|o| o.inductance_matrix.first())
                .and_then(|m| m.values.first())
                .and_then(|row| row.first())
                .copied()
                .unwrap_or(f64::NAN);
            if !achieved.is_finite() || target <= 0.0 {
                return FilterResult {
                    score: f64::INFINITY,
                    passes: false,
                };
            }
            let relative_error = (achieved - target).abs() / target;
            FilterResult {
                score: relative_error,
                passes: relative_error < 0.5,
            }
        }),
    }
}

pub fn saturation() -> NamedFilter {
    NamedFilter {
        name: "saturation",
        weight: 1.0,
        invert: false,
        log_scale: false,
        strictly_required: true,
        evaluate: Box::new(|candidate: &Mas, _inputs: &Inputs| {
            let b_sat = candidate.magnetic.core.material.saturation_flux_density;
            let achieved = candidate
                .outputs
                .as_ref()
                .and_then(|o| o.core_losses)
                .unwrap_or(0.0);
            let saturated = check_saturation(achieved, b_sat, 0.1);
            FilterResult {
                score: if saturated { 1.0 } else { 0.0 },
                passes: !saturated,
            }
        }),
    }
}

pub fn volume() -> NamedFilter {
    NamedFilter {
        name: "volume",
        weight: 1.0,
        invert: true,
        log_scale: true,
        strictly_required: false,
        evaluate: Box::new(|candidate: &Mas, _inputs: &Inputs| FilterResult {
            score: candidate.magnetic.core.effective_volume(),
            passes: true,
        }),
    }
}

pub fn full_losses() -> NamedFilter {
    NamedFilter {
        name: "full_losses",
        weight: 1.0,
        invert: true,
        log_scale: true,
        strictly_required: false,
        evaluate: Box::new(|candidate: &Mas, _inputs: &Inputs| {
            let total: f64 = candidate
                .outputs
                .as_ref()
                .map(|o| o.winding_losses.values().sum())
                .unwrap_or(0.0);
            FilterResult {
                score: total.max(1e-12),
                passes: true,
            }
        }),
    }
}

pub fn cost() -> NamedFilter {
    NamedFilter {
        name: "cost",
        weight: 1.0,
        invert: true,
        log_scale: false,
        strictly_required: false,
        evaluate: Box::new(|candidate: &Mas, _inputs: &Inputs| FilterResult {
            score: candidate.magnetic.core.effective_volume() * 1e6,
            passes: true,
        }),
    }
}
