//! Texture atlas addressing.
//!
//! Block textures live in one shared image divided into a grid of equally sized
//! tiles. A block's texture id picks a tile; this module turns that id into UV
//! coordinates.

use cgmath::Vector2;
use serde::{Deserialize, Serialize};

use crate::voxels::block::TextureId;

/// Tiles per atlas row in the default layout.
pub const ATLAS_TILES_PER_ROW: u32 = 32;
/// Tiles per atlas column in the default layout.
pub const ATLAS_TILES_PER_COLUMN: u32 = 32;
/// Inset applied to every tile corner so filtering never samples the adjacent tile.
pub const TILE_UV_MARGIN: f32 = 0.001;

/// Layout of the block texture atlas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureAtlas {
    /// Number of tile columns.
    pub tiles_per_row: u32,
    /// Number of tile rows.
    pub tiles_per_column: u32,
    /// UV inset of each tile corner.
    pub margin: f32,
}

impl Default for TextureAtlas {
    fn default() -> Self {
        TextureAtlas {
            tiles_per_row: ATLAS_TILES_PER_ROW,
            tiles_per_column: ATLAS_TILES_PER_COLUMN,
            margin: TILE_UV_MARGIN,
        }
    }
}

impl TextureAtlas {
    /// The layout with both grid dimensions raised to at least one tile.
    pub fn clamped(self) -> Self {
        TextureAtlas {
            tiles_per_row: self.columns(),
            tiles_per_column: self.rows(),
            ..self
        }
    }

    #[inline]
    fn columns(&self) -> u32 {
        self.tiles_per_row.max(1)
    }

    #[inline]
    fn rows(&self) -> u32 {
        self.tiles_per_column.max(1)
    }

    /// Total number of tiles, saturating at `u32::MAX`.
    pub fn tile_count(&self) -> u32 {
        self.columns().saturating_mul(self.rows())
    }

    /// Size of one tile in UV space.
    pub fn tile_size(&self) -> Vector2<f32> {
        Vector2::new(1.0 / self.columns() as f32, 1.0 / self.rows() as f32)
    }

    /// The tile a texture id resolves to. Ids outside the atlas fall back to tile 0.
    pub fn tile_index(&self, texture: TextureId) -> u32 {
        let index = texture as u32;
        if index < self.tile_count() {
            index
        } else {
            0
        }
    }

    /// UV coordinate of the tile's origin corner.
    pub fn tile_origin(&self, texture: TextureId) -> Vector2<f32> {
        let index = self.tile_index(texture);
        let column = index % self.columns();
        let row = index / self.columns();
        let size = self.tile_size();
        Vector2::new(column as f32 * size.x, row as f32 * size.y)
    }

    /// The four UV corners of a face, in the same order as the face's vertices.
    pub fn face_uvs(&self, texture: TextureId) -> [Vector2<f32>; 4] {
        let origin = self.tile_origin(texture);
        let size = self.tile_size();
        let m = self.margin;
        [
            origin + Vector2::new(m, size.y - m),
            origin + Vector2::new(size.x - m, size.y - m),
            origin + Vector2::new(size.x - m, m),
            origin + Vector2::new(m, m),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_origin_uses_row_and_column() {
        let atlas = TextureAtlas::default();
        assert_eq!(atlas.tile_origin(0), Vector2::new(0.0, 0.0));
        assert_eq!(atlas.tile_origin(3), Vector2::new(3.0 / 32.0, 0.0));
        assert_eq!(atlas.tile_origin(33), Vector2::new(1.0 / 32.0, 1.0 / 32.0));
    }

    #[test]
    fn out_of_range_texture_clamps_to_tile_zero() {
        let atlas = TextureAtlas::default();
        assert_eq!(atlas.tile_index(1024), 0);
        assert_eq!(atlas.tile_index(TextureId::MAX), 0);
        assert_eq!(atlas.face_uvs(5000), atlas.face_uvs(0));
    }

    #[test]
    fn non_square_atlas() {
        let atlas = TextureAtlas {
            tiles_per_row: 4,
            tiles_per_column: 2,
            margin: 0.0,
        };
        assert_eq!(atlas.tile_count(), 8);
        assert_eq!(atlas.tile_origin(5), Vector2::new(0.25, 0.5));
        assert_eq!(atlas.tile_index(8), 0);
    }

    #[test]
    fn zero_sized_atlas_acts_as_one_tile() {
        let atlas = TextureAtlas {
            tiles_per_row: 0,
            tiles_per_column: 0,
            margin: 0.0,
        };
        assert_eq!(atlas.tile_count(), 1);
        assert_eq!(atlas.tile_size(), Vector2::new(1.0, 1.0));
        assert_eq!(atlas.tile_origin(7), Vector2::new(0.0, 0.0));
        assert_eq!(atlas.face_uvs(7), atlas.face_uvs(0));

        let clamped = atlas.clamped();
        assert_eq!(clamped.tiles_per_row, 1);
        assert_eq!(clamped.tiles_per_column, 1);
    }

    #[test]
    fn huge_atlas_tile_count_saturates() {
        let atlas = TextureAtlas {
            tiles_per_row: u32::MAX,
            tiles_per_column: u32::MAX,
            margin: 0.0,
        };
        assert_eq!(atlas.tile_count(), u32::MAX);
        assert_eq!(atlas.tile_index(TextureId::MAX), TextureId::MAX as u32);
        assert_eq!(atlas.tile_origin(1).y, 0.0);
    }

    #[test]
    fn corners_are_inset_by_margin() {
        let atlas = TextureAtlas::default();
        let uvs = atlas.face_uvs(0);
        let size = atlas.tile_size();
        assert_eq!(uvs[3], Vector2::new(TILE_UV_MARGIN, TILE_UV_MARGIN));
        assert_eq!(
            uvs[1],
            Vector2::new(size.x - TILE_UV_MARGIN, size.y - TILE_UV_MARGIN)
        );
    }
}
