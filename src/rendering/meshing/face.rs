use cgmath::Vector3;

use crate::voxels::block::block_side::BlockSide;

/// Represents a single quad face of a unit voxel.
///
/// The corners are ordered so that the triangles `0,2,1` and `0,3,2` wind
/// clockwise when viewed from outside the block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// The four corners of the face in chunk-local space
    pub corners: [Vector3<f32>; 4],
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates the face on `block_side` of the voxel whose minimum corner is at
    /// `(i, j, k)`.
    pub fn new(i: usize, j: usize, k: usize, block_side: BlockSide) -> Self {
        let o = Vector3::new(i as f32, j as f32, k as f32);
        let p = |x: f32, y: f32, z: f32| o + Vector3::new(x, y, z);

        let corners = match block_side {
            BlockSide::FRONT => [
                p(0.0, 0.0, 1.0),
                p(1.0, 0.0, 1.0),
                p(1.0, 1.0, 1.0),
                p(0.0, 1.0, 1.0),
            ],
            BlockSide::BACK => [
                p(1.0, 0.0, 0.0),
                p(0.0, 0.0, 0.0),
                p(0.0, 1.0, 0.0),
                p(1.0, 1.0, 0.0),
            ],
            BlockSide::RIGHT => [
                p(1.0, 0.0, 1.0),
                p(1.0, 0.0, 0.0),
                p(1.0, 1.0, 0.0),
                p(1.0, 1.0, 1.0),
            ],
            BlockSide::LEFT => [
                p(0.0, 0.0, 0.0),
                p(0.0, 0.0, 1.0),
                p(0.0, 1.0, 1.0),
                p(0.0, 1.0, 0.0),
            ],
            BlockSide::TOP => [
                p(0.0, 1.0, 1.0),
                p(1.0, 1.0, 1.0),
                p(1.0, 1.0, 0.0),
                p(0.0, 1.0, 0.0),
            ],
            BlockSide::BOTTOM => [
                p(0.0, 0.0, 0.0),
                p(1.0, 0.0, 0.0),
                p(1.0, 0.0, 1.0),
                p(0.0, 0.0, 1.0),
            ],
        };

        Face {
            corners,
            block_side,
        }
    }
}
