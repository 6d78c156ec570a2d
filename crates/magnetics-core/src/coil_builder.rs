//! Turns the functional description of a coil (how many turns, how many
//! parallels, which wire) into a concrete physical layout: sections
//! along the winding window, layers within each section, and individual
//! turn placements. Mirrors the fit/retry shape of a stepping solver: try
//! the requested layout, shrink or reject it on overflow, never return a
//! half-built `Coil`.

use crate::coil::{
    Coil, Layer, LayersOrientation, Section, SectionAlignment, Turn, TurnsAlignment,
    WindingFunctionalDescription, WiringTechnology,
};
use crate::core_data::Bobbin;
use crate::error::MagneticsError;
use crate::geometry::{Margins, Point2};
use crate::wire::Wire;

#[derive(Debug, Clone)]
pub struct CoilBuilderConfig {
    pub layers_orientation: LayersOrientation,
    pub turns_alignment: TurnsAlignment,
    pub sections_alignment: SectionAlignment,
    pub interleaving_level: u32,
    pub wiring_technology: WiringTechnology,
    pub allow_overflow: bool,
    pub margins: Margins,
    pub maximum_layers_planar: u32,
}

impl Default for CoilBuilderConfig {
    fn default() -> Self {
        CoilBuilderConfig {
            layers_orientation: LayersOrientation::Overlapping,
            turns_alignment: TurnsAlignment::Centered,
            sections_alignment: SectionAlignment::Centered,
            interleaving_level: 1,
            wiring_technology: WiringTechnology::Wound,
            allow_overflow: false,
            margins: Margins::default(),
            maximum_layers_planar: 4,
        }
    }
}

/// Round-robin interleaving sequence over winding declaration order.
/// For `num_windings == 2` and `level == 2` this produces `[0,1,0,1,...]`
/// repeated `level` times; for more than two windings the same
/// round-robin-over-declaration-order rule is applied, which is the one
/// behavior this builder implements (no per-winding weighting).
pub fn interleaving_pattern(num_windings: usize, level: u32) -> Vec<usize> {
    if num_windings == 0 {
        return Vec::new();
    }
    let repeats = level.max(1) as usize;
    let mut pattern = Vec::with_capacity(num_windings * repeats);
    for _ in 0..repeats {
        for w in 0..num_windings {
            pattern.push(w);
        }
    }
    pattern
}

pub struct CoilBuilder;

impl CoilBuilder {
    pub fn build(
        functional: &[WindingFunctionalDescription],
        bobbin: &Bobbin,
        wires: &[Wire],
        config: &CoilBuilderConfig,
    ) -> Result<Coil, MagneticsError> {
        if functional.is_empty() {
            return Err(MagneticsError::InvalidInput(
                "coil requires at least one winding".into(),
            ));
        }

        let window = bobbin.winding_window;
        let usable_length = config.margins.usable_height(window);
        let usable_width = config.margins.usable_width(window);
        let pattern = interleaving_pattern(functional.len(), config.interleaving_level);

        let mut sections = Vec::new();
        let section_length = usable_length / pattern.len().max(1) as f64;
        let mut overflow = false;

        let total_needed: f64 = section_length * pattern.len() as f64;
        let slack = (usable_length - total_needed).max(0.0);
        let spread_gap = if pattern.len() > 1 {
            slack / (pattern.len() as f64 - 1.0)
        } else {
            0.0
        };

        let mut cursor = match config.sections_alignment {
            SectionAlignment::Inner => config.margins.top,
            SectionAlignment::Outer => config.margins.top + slack,
            SectionAlignment::Centered => config.margins.top + slack / 2.0,
            SectionAlignment::Spread => config.margins.top,
        };

        for &winding_index in &pattern {
            sections.push(Section {
                winding_index,
                offset: cursor,
                length: section_length,
            });
            cursor += section_length;
            if matches!(config.sections_alignment, SectionAlignment::Spread) {
                cursor += spread_gap;
            }
        }

        let mut layers = Vec::new();
        let mut turns = Vec::new();

        for (section_index, section) in sections.iter().enumerate() {
            let winding = &functional[section.winding_index];
            let wire = wires.get(winding.wire_index).ok_or_else(|| {
                MagneticsError::InvalidInput(format!(
                    "winding {} references unknown wire index {}",
                    winding.name, winding.wire_index
                ))
            })?;

            let turn_pitch = wire_cross_dimension(wire);
            if turn_pitch <= 0.0 {
                return Err(MagneticsError::InvalidGeometry(
                    "wire has non-positive cross dimension".into(),
                ));
            }

            let layer_count = match config.wiring_technology {
                WiringTechnology::Printed => {
                    winding.number_parallels.min(config.maximum_layers_planar).max(1)
                }
                WiringTechnology::Wound => {
                    let turns_per_layer = (section.length / turn_pitch).floor().max(1.0) as u32;
                    let total_turns = winding.number_turns * winding.number_parallels.max(1);
                    ((total_turns as f64) / (turns_per_layer as f64)).ceil().max(1.0) as u32
                }
            };

            let turns_per_layer_target = {
                let total_turns = winding.number_turns * winding.number_parallels.max(1);
                ((total_turns as f64) / (layer_count as f64)).ceil() as u32
            };

            let mut remaining_turns = winding.number_turns * winding.number_parallels.max(1);

            let radial_depth = layer_count as f64 * turn_pitch;
            if radial_depth > usable_width + 1e-9 {
                overflow = true;
            }

            for layer_in_section in 0..layer_count {
                let layer_index = layers.len();
                layers.push(Layer {
                    section_index,
                    layer_index_in_section: layer_in_section as usize,
                    offset: section.offset,
                    length: section.length,
                });

                let this_layer_turns = remaining_turns.min(turns_per_layer_target);
                remaining_turns = remaining_turns.saturating_sub(this_layer_turns);

                let needed_length = this_layer_turns as f64 * turn_pitch;
                if needed_length > section.length + 1e-9 {
                    overflow = true;
                }

                let placements = place_turns_in_layer(
                    this_layer_turns,
                    section.length,
                    turn_pitch,
                    config.turns_alignment,
                );
                for (i, pos) in placements.into_iter().enumerate() {
                    turns.push(Turn {
                        winding_index: section.winding_index,
                        layer_index,
                        position: Point2::new(pos, layer_in_section as f64 * turn_pitch),
                        length: turn_circumference(bobbin, layer_in_section as usize, wire),
                    });
                    let _ = i;
                }
            }
        }

        if overflow && !config.allow_overflow {
            return Err(MagneticsError::InvalidGeometry(
                "coil layout does not fit the winding window".into(),
            ));
        }

        let coil = Coil {
            functional: functional.to_vec(),
            sections,
            layers,
            turns,
            overflow,
        };
        coil.validate()?;
        Ok(coil)
    }
}

fn wire_cross_dimension(wire: &Wire) -> f64 {
    match wire {
        Wire::Round { outer_diameter, .. } => *outer_diameter,
        Wire::Litz { outer_diameter, .. } => *outer_diameter,
        Wire::Rectangular { outer_height, .. } => *outer_height,
        Wire::Foil { conducting_height, .. } => *conducting_height,
        Wire::Planar { copper_thickness, .. } => *copper_thickness,
    }
}

fn place_turns_in_layer(
    count: u32,
    available_length: f64,
    pitch: f64,
    alignment: TurnsAlignment,
) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    let used = count as f64 * pitch;
    let slack = (available_length - used).max(0.0);
    let start = match alignment {
        TurnsAlignment::Inner => 0.0,
        TurnsAlignment::Outer => slack,
        TurnsAlignment::Centered => slack / 2.0,
        TurnsAlignment::Spread => 0.0,
    };
    let gap = if matches!(alignment, TurnsAlignment::Spread) && count > 1 {
        slack / (count as f64 - 1.0)
    } else {
        0.0
    };
    (0..count)
        .map(|i| start + i as f64 * (pitch + gap))
        .collect()
}

fn turn_circumference(bobbin: &Bobbin, layer_index: usize, wire: &Wire) -> f64 {
    let radius_step = wire_cross_dimension(wire);
    let base_radius = bobbin.winding_window.width / 2.0 + bobbin.wall_thickness;
    let radius = base_radius + layer_index as f64 * radius_step;
    2.0 * std::f64::consts::PI * radius
}

/// Evenly spaced angular positions for turns wound around a toroidal
/// core, accounting for the inner-circumference margin each turn needs.
pub fn toroidal_turn_angles(count: u32, inner_circumference: f64, margin: f64) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    let usable = (inner_circumference - margin * count as f64).max(0.0);
    let step = usable / count as f64 / inner_circumference * std::f64::consts::TAU;
    (0..count).map(|i| i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coil::IsolationSide;
    use crate::geometry::WindingWindow;

    fn bobbin() -> Bobbin {
        Bobbin {
            winding_window: WindingWindow {
                height: 0.02,
                width: 0.01,
            },
            wall_thickness: 0.0005,
        }
    }

    #[test]
    fn interleaving_pattern_two_windings_level_two() {
        let pattern = interleaving_pattern(2, 2);
        assert_eq!(pattern, vec![0, 1, 0, 1]);
    }

    #[test]
    fn builds_simple_single_winding_coil() {
        let wire = Wire::round(0.0005).unwrap();
        let functional = vec![WindingFunctionalDescription {
            name: "primary".into(),
            number_turns: 10,
            number_parallels: 1,
            isolation_side: IsolationSide::Primary,
            wire_index: 0,
        }];
        let config = CoilBuilderConfig::default();
        let coil = CoilBuilder::build(&functional, &bobbin(), &[wire], &config).unwrap();
        assert_eq!(coil.turns_for_winding(0).count(), 10);
        assert!(!coil.overflow);
    }

    #[test]
    fn rejects_oversized_winding_without_overflow_flag() {
        let wire = Wire::round(0.01).unwrap();
        let functional = vec![WindingFunctionalDescription {
            name: "primary".into(),
            number_turns: 1000,
            number_parallels: 1,
            isolation_side: IsolationSide::Primary,
            wire_index: 0,
        }];
        let config = CoilBuilderConfig::default();
        let result = CoilBuilder::build(&functional, &bobbin(), &[wire], &config);
        assert!(result.is_err());
    }

    #[test]
    fn allow_overflow_returns_partial_coil() {
        let wire = Wire::round(0.01).unwrap();
        let functional = vec![WindingFunctionalDescription {
            name: "primary".into(),
            number_turns: 1000,
            number_parallels: 1,
            isolation_side: IsolationSide::Primary,
            wire_index: 0,
        }];
        let config = CoilBuilderConfig {
            allow_overflow: true,
            ..CoilBuilderConfig::default()
        };
        let coil = CoilBuilder::build(&functional, &bobbin(), &[wire], &config).unwrap();
        assert!(coil.overflow);
    }
}
