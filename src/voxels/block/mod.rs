//! # Block Module
//!
//! This module provides the smallest unit of terrain. A block is a plain value:
//! whether it occupies space, which material class it belongs to, and which
//! atlas tile textures it.

use material_type::MaterialType;

pub mod block_side;
pub mod material_type;

/// The underlying integer type used to store a block's material in memory.
///
/// Materials are kept raw so that values written by older data or external
/// tools survive until meshing, where unknown values are coerced.
pub type MaterialTypeSize = u8;

/// Index of a tile in the texture atlas.
pub type TextureId = u16;

/// Texture id reserved for "missing texture".
pub const TEXTURE_MISSING: TextureId = 0;

/// Represents a single voxel block in a chunk.
///
/// Blocks are owned by value inside their chunk's contiguous block buffer and
/// are freely copied.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    solid: bool,
    material: MaterialTypeSize,
    texture: TextureId,
}

impl Block {
    /// A non-solid block with default material and the missing texture.
    pub const AIR: Block = Block {
        solid: false,
        material: MaterialType::GENERIC as MaterialTypeSize,
        texture: TEXTURE_MISSING,
    };

    /// Creates a solid block of the given material and texture.
    pub fn new(material: MaterialType, texture: TextureId) -> Self {
        Block {
            solid: true,
            material: material as MaterialTypeSize,
            texture,
        }
    }

    /// Creates a block from raw stored values without validating the material.
    pub fn from_raw(solid: bool, material: MaterialTypeSize, texture: TextureId) -> Self {
        Block {
            solid,
            material,
            texture,
        }
    }

    /// Whether the block occupies space.
    pub fn is_solid(&self) -> bool {
        self.solid
    }

    /// Whether the block fully hides the faces of its neighbors.
    ///
    /// Only solid blocks can be opaque, and glass never is.
    pub fn is_opaque(&self) -> bool {
        self.solid && self.material != MaterialType::GLASS as MaterialTypeSize
    }

    /// The block's material class, or `None` if the raw value is not recognized.
    pub fn material_type(&self) -> Option<MaterialType> {
        MaterialType::from_int(self.material)
    }

    /// The raw stored material value.
    pub fn raw_material(&self) -> MaterialTypeSize {
        self.material
    }

    /// The atlas tile this block is textured with.
    pub fn texture(&self) -> TextureId {
        self.texture
    }

    /// Marks the block as solid or air.
    pub fn set_solid(&mut self, solid: bool) {
        self.solid = solid;
    }

    /// Changes the block's material class.
    pub fn set_material_type(&mut self, material: MaterialType) {
        self.material = material as MaterialTypeSize;
    }

    /// Changes the block's atlas tile.
    pub fn set_texture(&mut self, texture: TextureId) {
        self.texture = texture;
    }
}

impl Default for Block {
    fn default() -> Self {
        Block::AIR
    }
}
