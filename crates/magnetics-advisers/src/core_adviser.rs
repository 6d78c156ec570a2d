use magnetics_core::core_data::Core;
use magnetics_core::mas::Inputs;
use magnetics_core::registry::Registry;
use magnetics_core::settings::Settings;

#[derive(Debug, Clone)]
pub struct ScoredCandidate<T> {
    pub candidate: T,
    pub score: f64,
}

/// Filters the registry's core inventory down to the candidates worth
/// handing to the coil adviser, ranked by effective volume (a cheap
/// proxy used before the full physics pipeline runs).
pub fn rank(
    _inputs: &Inputs,
    registry: &Registry,
    settings: &Settings,
    top_k: usize,
) -> Vec<ScoredCandidate<Core>> {
    let mut candidates: Vec<ScoredCandidate<Core>> = registry
        .cores
        .iter()
        .filter(|c| !settings.use_only_cores_in_stock || c.in_stock)
        .map(|c| ScoredCandidate {
            candidate: c.clone(),
            score: c.effective_volume(),
        })
        .collect();
    candidates.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap());
    candidates.truncate(top_k);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use magnetics_core::core_data::{CoreColumn, CoreMaterial, CoreShapeFamily};
    use magnetics_core::geometry::WindingWindow;
    use magnetics_core::mas::{DesignRequirements, DimensionedTarget};

    fn core(volume_scale: f64, in_stock: bool) -> Core {
        Core {
            shape_family: CoreShapeFamily::Concentric,
            material: CoreMaterial {
                name: "N87".into(),
                initial_permeability: 2200.0,
                saturation_flux_density: 0.39,
            },
            columns: vec![CoreColumn {
                height: 0.02 * volume_scale,
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
            in_stock,
        }
    }

    fn inputs() -> Inputs {
        Inputs {
            design_requirements: DesignRequirements {
                magnetizing_inductance: DimensionedTarget {
                    nominal: 1e-3,
                    minimum: None,
                    maximum: None,
                },
                turns_ratios: vec![],
                maximum_dimensions: None,
                maximum_weight: None,
                insulation: None,
            },
            operating_points: vec![],
        }
    }

    #[test]
    fn excludes_out_of_stock_cores_by_default() {
        let mut registry = Registry::new();
        registry.cores.push(core(1.0, true));
        registry.cores.push(core(2.0, false));
        let settings = Settings::default();
        let ranked = rank(&inputs(), &registry, &settings, 10);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn ranks_smaller_volume_first() {
        let mut registry = Registry::new();
        registry.cores.push(core(3.0, true));
        registry.cores.push(core(1.0, true));
        let settings = Settings::default();
        let ranked = rank(&inputs(), &registry, &settings, 10);
        assert!(ranked[0].score < ranked[1].score);
    }
}
