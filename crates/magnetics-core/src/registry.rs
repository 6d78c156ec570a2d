//! Explicit, injectable catalogue registry. Replaces a module-level
//! singleton: callers own a `Registry`, pass `&Registry` into every
//! lookup, and may hold several independent registries at once.

use std::collections::HashMap;

use crate::core_data::{Core, CoreMaterial};
use crate::error::MagneticsError;
use crate::mas::Magnetic;
use crate::wire::Wire;

#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub cores: Vec<Core>,
    pub core_materials: Vec<CoreMaterial>,
    pub wires: Vec<Wire>,
    pub magnetics: Vec<Magnetic>,
    core_material_index: HashMap<String, usize>,
    magnetic_index: HashMap<String, usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogueKind {
    Core,
    CoreMaterial,
    Wire,
    Magnetic,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    pub fn clear(&mut self) {
        *self = Registry::default();
    }

    /// Parse one NDJSON line and append it to the matching catalogue.
    pub fn load_ndjson_line(
        &mut self,
        kind: CatalogueKind,
        line: &str,
    ) -> Result<(), MagneticsError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        match kind {
            CatalogueKind::Core => {
                let core: Core = serde_json::from_str(trimmed)
                    .map_err(|e| MagneticsError::InvalidInput(format!("core catalogue line: {e}")))?;
                self.cores.push(core);
            }
            CatalogueKind::CoreMaterial => {
                let material: CoreMaterial = serde_json::from_str(trimmed).map_err(|e| {
                    MagneticsError::InvalidInput(format!("core material catalogue line: {e}"))
                })?;
                self.core_material_index
                    .insert(material.name.clone(), self.core_materials.len());
                self.core_materials.push(material);
            }
            CatalogueKind::Wire => {
                let wire: Wire = serde_json::from_str(trimmed)
                    .map_err(|e| MagneticsError::InvalidInput(format!("wire catalogue line: {e}")))?;
                self.wires.push(wire);
            }
            CatalogueKind::Magnetic => {
                let magnetic: Magnetic = serde_json::from_str(trimmed).map_err(|e| {
                    MagneticsError::InvalidInput(format!("magnetic catalogue line: {e}"))
                })?;
                self.magnetic_index
                    .insert(magnetic.name.clone(), self.magnetics.len());
                self.magnetics.push(magnetic);
            }
        }
        Ok(())
    }

    /// Parse a whole NDJSON document, collecting every line's error
    /// instead of stopping at the first malformed line.
    pub fn load_ndjson(&mut self, kind: CatalogueKind, text: &str) -> Vec<(usize, MagneticsError)> {
        let mut errors = Vec::new();
        for (index, line) in text.lines().enumerate() {
            if let Err(err) = self.load_ndjson_line(kind, line) {
                errors.push((index, err));
            }
        }
        errors
    }

    pub fn core_material_by_name(&self, name: &str) -> Result<&CoreMaterial, MagneticsError> {
        self.core_material_index
            .get(name)
            .and_then(|&idx| self.core_materials.get(idx))
            .ok_or_else(|| MagneticsError::CatalogueMiss(format!("core material {name} not found")))
    }

    pub fn magnetic_by_name(&self, name: &str) -> Result<&Magnetic, MagneticsError> {
        self.magnetic_index
            .get(name)
            .and_then(|&idx| self.magnetics.get(idx))
            .ok_or_else(|| MagneticsError::CatalogueMiss(format!("magnetic {name} not found")))
    }

    pub fn in_stock_cores(&self) -> impl Iterator<Item = &Core> {
        self.cores.iter().filter(|c| c.in_stock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_empties_every_catalogue() {
        let mut registry = Registry::new();
        registry.core_materials.push(CoreMaterial {
            name: "N87".into(),
            initial_permeability: 2200.0,
            saturation_flux_density: 0.39,
        });
        registry.clear();
        assert!(registry.core_materials.is_empty());
        assert!(registry.core_material_by_name("N87").is_err());
    }

    #[test]
    fn load_ndjson_collects_all_line_errors() {
        let mut registry = Registry::new();
        let text = "not json\n{\"name\":\"N87\",\"initial_permeability\":2200.0,\"saturation_flux_density\":0.39}\nalso not json";
        let errors = registry.load_ndjson(CatalogueKind::CoreMaterial, text);
        assert_eq!(errors.len(), 2);
        assert_eq!(registry.core_materials.len(), 1);
    }
}
