use serde::{Deserialize, Serialize};

use magnetics_devices::field::FieldModel;
use magnetics_devices::fringing::FringingModel;
use magnetics_devices::reluctance::ReluctanceModel;

/// Explicit configuration struct in place of a process-wide mutable
/// singleton. Every physics/adviser function takes `&Settings`;
/// nothing inside this crate mutates one behind a caller's back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub use_only_cores_in_stock: bool,
    pub use_toroidal_cores: bool,
    pub use_concentric_cores: bool,
    pub coil_allow_margin_tape: bool,
    pub coil_allow_insulated_wire: bool,
    pub coil_try_rewind: bool,
    pub coil_fill_sections_with_margin_tape: bool,
    pub coil_maximum_layers_planar: u32,
    pub coil_adviser_maximum_number_wires: u32,
    pub reluctance_model: ReluctanceModel,
    pub magnetic_field_strength_model: FieldModel,
    pub magnetic_field_strength_fringing_effect_model: FringingModel,
    pub magnetic_field_mirroring_dimension: u32,
    pub magnetic_field_include_fringing: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            use_only_cores_in_stock: true,
            use_toroidal_cores: true,
            use_concentric_cores: true,
            coil_allow_margin_tape: true,
            coil_allow_insulated_wire: false,
            coil_try_rewind: true,
            coil_fill_sections_with_margin_tape: false,
            coil_maximum_layers_planar: 4,
            coil_adviser_maximum_number_wires: 10,
            reluctance_model: ReluctanceModel::Zhang,
            magnetic_field_strength_model: FieldModel::Albach,
            magnetic_field_strength_fringing_effect_model: FringingModel::Albach,
            magnetic_field_mirroring_dimension: 1,
            magnetic_field_include_fringing: true,
        }
    }
}

impl Settings {
    pub fn reset(&mut self) {
        *self = Settings::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_restores_defaults_after_mutation() {
        let mut settings = Settings::default();
        settings.use_toroidal_cores = false;
        settings.coil_maximum_layers_planar = 99;
        settings.reset();
        assert_eq!(settings, Settings::default());
    }
}
