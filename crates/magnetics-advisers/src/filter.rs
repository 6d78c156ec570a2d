//! Filter pipeline: a sequence of named, independently weighted scoring
//! functions evaluated against a candidate `Mas` + its `Inputs`. Each
//! filter is a plain struct of knobs plus a closure, not a trait
//! hierarchy of "filter strategies".

use magnetics_core::mas::{Inputs, Mas};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterResult {
    pub score: f64,
    pub passes: bool,
}

pub struct NamedFilter {
    pub name: &'static str,
    pub weight: f64,
    pub invert: bool,
    pub log_scale: bool,
    pub strictly_required: bool,
    pub evaluate: Box<dyn Fn(&Mas, &Inputs) -> FilterResult + Send + Sync>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResult {
    pub per_filter: Vec<(String, FilterResult)>,
    pub aggregate: Option<f64>,
    pub passed: bool,
}

fn transform_score(filter: &NamedFilter, raw: f64) -> f64 {
    let mut score = raw;
    if filter.log_scale {
        score = (score.max(1e-12)).ln();
    }
    if filter.invert {
        score = -score;
    }
    score
}

pub fn evaluate(candidate: &Mas, inputs: &Inputs, filters: &[NamedFilter]) -> PipelineResult {
    let mut per_filter = Vec::with_capacity(filters.len());
    let mut passed = true;
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    let mut any_non_strict_ran = false;

    for filter in filters {
        let result = (filter.evaluate)(candidate, inputs);
        per_filter.push((filter.name.to_string(), result));

        if filter.strictly_required && !result.passes {
            passed = false;
            break;
        }

        if !filter.strictly_required {
            any_non_strict_ran = true;
            let transformed = transform_score(filter, result.score);
            weighted_sum += filter.weight * transformed;
            weight_total += filter.weight;
        }
    }

    let aggregate = if any_non_strict_ran && weight_total > 0.0 {
        Some(weighted_sum / weight_total)
    } else {
        None
    };

    PipelineResult {
        per_filter,
        aggregate,
        passed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magnetics_core::coil::{Coil, IsolationSide, WindingFunctionalDescription};
    use magnetics_core::core_data::{Core, CoreColumn, CoreMaterial, CoreShapeFamily};
    use magnetics_core::geometry::WindingWindow;
    use magnetics_core::mas::{DesignRequirements, DimensionedTarget, Mas, Magnetic};
    use magnetics_core::wire::Wire;

    fn mas() -> Mas {
        Mas {
            inputs: Inputs {
                design_requirements: DesignRequirements {
                    magnetizing_inductance: DimensionedTarget {
                        nominal: 1e-3,
                        minimum: None,
                        maximum: None,
                    },
                    turns_ratios: vec![1.0],
                    maximum_dimensions: None,
                    maximum_weight: None,
                    insulation: None,
                },
                operating_points: vec![],
            },
            magnetic: Magnetic {
                name: "candidate".into(),
                core: Core {
                    shape_family: CoreShapeFamily::Concentric,
                    material: CoreMaterial {
                        name: "N87".into(),
                        initial_permeability: 2200.0,
                        saturation_flux_density: 0.39,
                    },
                    columns: vec![CoreColumn {
                        height: 0.02,
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
                },
                coil: Coil {
                    functional: vec![WindingFunctionalDescription {
                        name: "primary".into(),
                        number_turns: 10,
                        number_parallels: 1,
                        isolation_side: IsolationSide::Primary,
                        wire_index: 0,
                    }],
                    sections: vec![],
                    layers: vec![],
                    turns: vec![],
                    overflow: false,
                },
                wires: vec![Wire::round(0.0005).unwrap()],
            },
            outputs: None,
        }
    }

    #[test]
    fn strictly_required_failure_short_circuits() {
        let filters = vec![
            NamedFilter {
                name: "always_fails",
                weight: 1.0,
                invert: false,
                log_scale: false,
                strictly_required: true,
                evaluate: Box::new(|_, _| FilterResult {
                    score: 0.0,
                    passes: false,
                }),
            },
            NamedFilter {
                name: "never_reached",
                weight: 1.0,
                invert: false,
                log_scale: false,
                strictly_required: false,
                evaluate: Box::new(|_, _| FilterResult {
                    score: 1.0,
                    passes: true,
                }),
            },
        ];
        let m = mas();
        let result = evaluate(&m, &m.inputs, &filters);
        assert!(!result.passed);
        assert_eq!(result.per_filter.len(), 1);
    }

    #[test]
    fn aggregate_is_weighted_average_of_non_strict_filters() {
        let filters = vec![
            NamedFilter {
                name: "a",
                weight: 1.0,
                invert: false,
                log_scale: false,
                strictly_required: false,
                evaluate: Box::new(|_, _| FilterResult {
                    score: 1.0,
                    passes: true,
                }),
            },
            NamedFilter {
                name: "b",
                weight: 3.0,
                invert: false,
                log_scale: false,
                strictly_required: false,
                evaluate: Box::new(|_, _| FilterResult {
                    score: 0.0,
                    passes: true,
                }),
            },
        ];
        let m = mas();
        let result = evaluate(&m, &m.inputs, &filters);
        assert!(result.passed);
        assert_eq!(result.aggregate, Some(0.25));
    }
}
