use magnetics_core::coil::{Coil, LayersOrientation, SectionAlignment, TurnsAlignment, WindingFunctionalDescription, WiringTechnology};
use magnetics_core::coil_builder::{CoilBuilder, CoilBuilderConfig};
use magnetics_core::core_data::{Bobbin, Core};
use magnetics_core::mas::Inputs;
use magnetics_core::registry::Registry;
use magnetics_core::settings::Settings;
use magnetics_core::wire::Wire;

/// Synthesizes candidate coils for one core by varying wire choice and
/// interleaving level, discarding any layout the builder rejects as
/// `InvalidGeometry` rather than propagating it.
pub fn synthesize(
    core: &Core,
    functional: &[WindingFunctionalDescription],
    registry: &Registry,
    settings: &Settings,
    _inputs: &Inputs,
) -> Vec<Coil> {
    let bobbin = Bobbin {
        winding_window: core.winding_window,
        wall_thickness: 0.0005,
    };

    let wire_candidates: Vec<&Wire> = registry
        .wires
        .iter()
        .take(settings.coil_adviser_maximum_number_wires as usize)
        .collect();
    let wire_candidates: Vec<Wire> = if wire_candidates.is_empty() {
        vec![Wire::round(0.0005).unwrap()]
    } else {
        wire_candidates.into_iter().copied().collect()
    };

    let mut coils = Vec::new();
    for wire in &wire_candidates {
        for interleaving_level in 1..=2u32 {
            let mut functional_with_wire = functional.to_vec();
            for w in &mut functional_with_wire {
                w.wire_index = 0;
            }
            let config = CoilBuilderConfig {
                layers_orientation: LayersOrientation::Overlapping,
                turns_alignment: TurnsAlignment::Centered,
                sections_alignment: SectionAlignment::Centered,
                interleaving_level,
                wiring_technology: WiringTechnology::Wound,
                allow_overflow: false,
                margins: Default::default(),
                maximum_layers_planar: settings.coil_maximum_layers_planar,
            };
            if let Ok(coil) = CoilBuilder::build(&functional_with_wire, &bobbin, &[*wire], &config) {
                coils.push(coil);
            }
        }
    }
    coils
}
