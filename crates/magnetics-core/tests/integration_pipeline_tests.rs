//! End-to-end pipeline scenarios: build a coil, assemble the
//! inductance and resistance matrices, compute losses, and check the
//! cross-module invariants a caller actually depends on.

use magnetics_core::coil::{IsolationSide, WindingFunctionalDescription};
use magnetics_core::coil_builder::{CoilBuilder, CoilBuilderConfig};
use magnetics_core::core_data::{Bobbin, Core, CoreColumn, CoreMaterial, CoreShapeFamily};
use magnetics_core::geometry::WindingWindow;
use magnetics_core::inductance::magnetizing::magnetizing_inductance;
use magnetics_core::inductance::matrix::{coupling_coefficient, inductance_matrix};
use magnetics_core::losses::winding_losses;
use magnetics_core::mas::{Excitation, OperatingPoint, Signal};
use magnetics_core::resistance::resistance_matrix;
use magnetics_core::settings::Settings;
use magnetics_core::wire::Wire;

fn two_winding_setup() -> (Core, magnetics_core::coil::Coil, Vec<Wire>) {
    let core = Core {
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
            height: 0.04,
            width: 0.01,
        },
        number_stacks: 1,
        in_stock: true,
    };

    let wire = Wire::round(0.0004).unwrap();
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
    let bobbin = Bobbin {
        winding_window: core.winding_window,
        wall_thickness: 0.0005,
    };
    let coil = CoilBuilder::build(&functional, &bobbin, &[wire], &CoilBuilderConfig::default()).unwrap();
    (core, coil, vec![wire])
}

fn operating_point() -> OperatingPoint {
    OperatingPoint {
        name: "nominal".into(),
        ambient_temperature: 25.0,
        excitations: vec![
            Excitation {
                current: Signal {
                    frequency: 100_000.0,
                    peak: 3.0,
                    offset: 0.0,
                    duty_cycle: None,
                },
                voltage: None,
                current_harmonics: None,
            },
            Excitation {
                current: Signal {
                    frequency: 100_000.0,
                    peak: 1.5,
                    offset: 0.0,
                    duty_cycle: None,
                },
                voltage: None,
                current_harmonics: None,
            },
        ],
        processed: None,
    }
}

#[test]
fn full_pipeline_produces_symmetric_matrices_and_bounded_coupling() {
    let (core, coil, wires) = two_winding_setup();
    let settings = Settings::default();

    let mag = magnetizing_inductance(&core, 20, &settings).unwrap();
    let mean_turn_length = coil.turns[0].length;
    let l_matrix = inductance_matrix(&coil, 100_000.0, mag.lm0, 20, mean_turn_length, core.winding_window.width).unwrap();
    assert!(l_matrix.is_symmetric(1e-12));

    let k = coupling_coefficient(&l_matrix, 0, 1);
    assert!((0.0..=1.0).contains(&k));

    let r_matrix = resistance_matrix(&coil, &wires, &settings, 100_000.0, 25.0).unwrap();
    assert!(r_matrix.is_symmetric(1e-9));
    for i in 0..r_matrix.values.len() {
        assert!(r_matrix.values[i][i] > 0.0);
    }

    let op = operating_point();
    let losses = winding_losses(&coil, &wires, &settings, &op).unwrap();
    assert!(losses.total.is_finite());
    assert!(!losses.numerical_issues);
}

#[test]
fn turns_count_invariant_holds_after_build() {
    let (_core, coil, _wires) = two_winding_setup();
    assert!(coil.validate().is_ok());
    assert_eq!(coil.turns_for_winding(0).count(), 20);
    assert_eq!(coil.turns_for_winding(1).count(), 10);
}

#[test]
fn nan_excitation_does_not_propagate_to_total_loss() {
    let (_core, coil, wires) = two_winding_setup();
    let mut op = operating_point();
    op.excitations[1].current.peak = f64::NAN;
    let losses = winding_losses(&coil, &wires, &Settings::default(), &op).unwrap();
    assert!(losses.total.is_finite(), "NaN term must not poison the aggregate");
    assert!(losses.numerical_issues);
}

#[test]
fn zero_turns_winding_is_rejected() {
    let core = two_winding_setup().0;
    let settings = Settings::default();
    let result = magnetizing_inductance(&core, 0, &settings);
    assert!(result.is_err());
}
