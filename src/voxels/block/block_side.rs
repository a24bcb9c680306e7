//! # Block Side Module
//!
//! This module defines the six faces of a voxel block together with the
//! direction each one points in. Face culling walks these sides to find the
//! neighboring voxel a face would be hidden behind.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// Unit step from a block to the neighbor this side faces.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
        }
    }

    /// Outward facing normal of this side.
    pub fn normal(self) -> Vector3<f32> {
        self.offset().cast::<f32>().unwrap_or(Vector3::new(0.0, 0.0, 0.0))
    }

    /// Whether this side crosses into a horizontally adjacent chunk when the
    /// block sits on the chunk border.
    pub fn is_horizontal(self) -> bool {
        !matches!(self, BlockSide::TOP | BlockSide::BOTTOM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_unit_and_distinct() {
        let sides = BlockSide::all();
        for (i, a) in sides.iter().enumerate() {
            let o = a.offset();
            assert_eq!(o.x.abs() + o.y.abs() + o.z.abs(), 1);
            for b in &sides[i + 1..] {
                assert_ne!(o, b.offset());
            }
        }
    }

    #[test]
    fn only_vertical_sides_are_not_horizontal() {
        let vertical: Vec<_> = BlockSide::all()
            .into_iter()
            .filter(|side| !side.is_horizontal())
            .collect();
        assert_eq!(vertical, vec![BlockSide::BOTTOM, BlockSide::TOP]);
    }
}
