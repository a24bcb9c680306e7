//! Material palette.
//!
//! The palette maps each [`MaterialType`] to the description of the renderable
//! material its batch is shaded with. Entries are optional: a batch whose
//! material is missing is still presented and the host shades it with its own
//! default.

use log::error;
use serde::{Deserialize, Serialize};

use crate::voxels::block::material_type::MaterialType;

/// Color used for the unknown material so misclassified blocks stand out.
pub const UNKNOWN_MATERIAL_COLOR: [f32; 4] = [1.0, 0.0, 0.86, 1.0];

/// Description of a renderable material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescriptor {
    /// Display name.
    pub name: String,
    /// Base color, RGBA.
    pub albedo: [f32; 4],
    /// Metalness in 0.0..=1.0.
    pub metallic: f32,
    /// Whether the material is alpha blended.
    pub transparent: bool,
    /// Whether the material receives shadows.
    pub receives_shadows: bool,
}

impl MaterialDescriptor {
    /// An opaque, non-metallic material.
    pub fn opaque(name: &str, albedo: [f32; 4]) -> Self {
        MaterialDescriptor {
            name: name.to_string(),
            albedo,
            metallic: 0.0,
            transparent: false,
            receives_shadows: true,
        }
    }
}

/// Material source for chunk batches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    materials: [Option<MaterialDescriptor>; MaterialType::COUNT],
}

impl Palette {
    /// A palette with no materials assigned.
    pub fn empty() -> Self {
        Palette {
            materials: Default::default(),
        }
    }

    /// The material for a material class, if one is assigned.
    pub fn material(&self, material: MaterialType) -> Option<&MaterialDescriptor> {
        self.materials[material as usize].as_ref()
    }

    /// Looks a material up by raw index.
    ///
    /// Invalid indices are logged and resolve to the unknown material.
    pub fn material_by_index(&self, index: usize) -> Option<&MaterialDescriptor> {
        match self.materials.get(index) {
            Some(material) => material.as_ref(),
            None => {
                error!("Invalid material type: {}", index);
                self.material(MaterialType::UNKNOWN)
            }
        }
    }

    /// Assigns or clears the material for a material class.
    pub fn set_material(&mut self, material: MaterialType, descriptor: Option<MaterialDescriptor>) {
        self.materials[material as usize] = descriptor;
    }
}

impl Default for Palette {
    /// The stock palette: a magenta unknown material, white generic, half
    /// transparent glass that does not receive shadows and white metal.
    fn default() -> Self {
        let mut glass = MaterialDescriptor::opaque("Glass", [0.8, 0.8, 0.8, 0.5]);
        glass.transparent = true;
        glass.receives_shadows = false;

        let mut metal = MaterialDescriptor::opaque("Metal", [1.0, 1.0, 1.0, 1.0]);
        metal.metallic = 1.0;

        let mut palette = Palette::empty();
        palette.set_material(
            MaterialType::UNKNOWN,
            Some(MaterialDescriptor::opaque("UNKNOWN_MATERIAL", UNKNOWN_MATERIAL_COLOR)),
        );
        palette.set_material(
            MaterialType::GENERIC,
            Some(MaterialDescriptor::opaque("Generic", [1.0, 1.0, 1.0, 1.0])),
        );
        palette.set_material(MaterialType::GLASS, Some(glass));
        palette.set_material(MaterialType::METAL, Some(metal));
        palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_covers_every_material() {
        let palette = Palette::default();
        for material in MaterialType::all() {
            assert!(palette.material(material).is_some(), "{material} missing");
        }
        assert!(palette.material(MaterialType::GLASS).unwrap().transparent);
        assert_eq!(palette.material(MaterialType::METAL).unwrap().metallic, 1.0);
    }

    #[test]
    fn invalid_index_falls_back_to_unknown() {
        let palette = Palette::default();
        assert_eq!(
            palette.material_by_index(17),
            palette.material(MaterialType::UNKNOWN)
        );
    }

    #[test]
    fn cleared_material_is_absent() {
        let mut palette = Palette::default();
        palette.set_material(MaterialType::METAL, None);
        assert!(palette.material(MaterialType::METAL).is_none());
        assert!(Palette::empty().material(MaterialType::GENERIC).is_none());
    }
}
