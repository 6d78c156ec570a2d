use magnetics_advisers::{filters, magnetic_adviser};
use magnetics_core::coil::{IsolationSide, WindingFunctionalDescription};
use magnetics_core::core_data::{Core, CoreColumn, CoreMaterial, CoreShapeFamily};
use magnetics_core::geometry::WindingWindow;
use magnetics_core::mas::{DesignRequirements, DimensionedTarget, Excitation, Inputs, OperatingPoint, Signal};
use magnetics_core::registry::Registry;
use magnetics_core::settings::Settings;

fn core(in_stock: bool) -> Core {
    Core {
        shape_family: CoreShapeFamily::Concentric,
        material: CoreMaterial {
            name: "N87".into(),
            initial_permeability: 2200.0,
            saturation_flux_density: 0.39,
        },
        columns: vec![CoreColumn {
            height: 0.03,
            area: 0.0001,
            width: 0.01,
            depth: 0.01,
            is_round: false,
        }],
        gaps: vec![],
        winding_window: WindingWindow {
            height: 0.03,
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
                nominal: 1e-4,
                minimum: None,
                maximum: None,
            },
            turns_ratios: vec![2.0],
            maximum_dimensions: None,
            maximum_weight: None,
            insulation: None,
        },
        operating_points: vec![OperatingPoint {
            name: "nominal".into(),
            ambient_temperature: 25.0,
            excitations: vec![
                Excitation {
                    current: Signal {
                        frequency: 100_000.0,
                        peak: 2.0,
                        offset: 0.0,
                        duty_cycle: None,
                    },
                    voltage: None,
                    current_harmonics: None,
                },
                Excitation {
                    current: Signal {
                        frequency: 100_000.0,
                        peak: 1.0,
                        offset: 0.0,
                        duty_cycle: None,
                    },
                    voltage: None,
                    current_harmonics: None,
                },
            ],
            processed: None,
        }],
    }
}

#[test]
fn search_returns_at_most_top_k_candidates_ranked_by_aggregate() {
    let mut registry = Registry::new();
    registry.cores.push(core(true));
    registry.cores.push(core(true));

    let functional = vec![
        WindingFunctionalDescription {
            name: "primary".into(),
            number_turns: 20,
            number_parallels: 1,
            isolation_side: IsolationSide::Primary,
            wire_index: 0,
        },
        WindingFunctionalDescription {
            name: "secondary".into(),
            number_turns: 10,
            number_parallels: 1,
            isolation_side: IsolationSide::Secondary,
            wire_index: 0,
        },
    ];

    let settings = Settings::default();
    let active_filters = vec![
        filters::turns_ratio_fit(),
        filters::volume(),
        filters::full_losses(),
    ];

    let outcome = magnetic_adviser::search(
        &functional,
        &inputs(),
        &registry,
        &settings,
        &active_filters,
        3,
        &|| false,
    );

    assert!(outcome.candidates.len() <= 3);
    for (mas, pipeline) in &outcome.candidates {
        assert!(mas.outputs.is_some());
        assert!(pipeline.aggregate.is_some());
    }
}

#[test]
fn cancel_callback_stops_search_early() {
    let mut registry = Registry::new();
    registry.cores.push(core(true));
    registry.cores.push(core(true));

    let functional = vec![WindingFunctionalDescription {
        name: "primary".into(),
        number_turns: 10,
        number_parallels: 1,
        isolation_side: IsolationSide::Primary,
        wire_index: 0,
    }];

    let settings = Settings::default();
    let filters = vec![];
    let outcome = magnetic_adviser::search(
        &functional,
        &inputs(),
        &registry,
        &settings,
        &filters,
        5,
        &|| true,
    );
    assert!(outcome.candidates.is_empty());
}
