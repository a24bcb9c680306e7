//! # Chunk Coordinates
//!
//! Chunks are addressed by an integer grid coordinate on the horizontal plane.
//! A grid coordinate is never a world-space position: the world placement of a
//! chunk is always its coordinate multiplied by the chunk axis length.

use std::fmt;

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

use super::CHUNK_AXIS_LENGTH;

/// Integer (x, z) address of a chunk in the chunk grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct ChunkCoord {
    /// Grid x
    pub x: i32,
    /// Grid z
    pub z: i32,
}

impl ChunkCoord {
    /// Creates a new grid coordinate.
    pub const fn new(x: i32, z: i32) -> Self {
        ChunkCoord { x, z }
    }

    /// Packs the coordinate into the registry key.
    ///
    /// The high word holds `x` and the low word holds `z`, both as their 32-bit
    /// two's complement pattern so negative components never overlap.
    pub fn key(self) -> u64 {
        ((self.x as u32 as u64) << 32) | (self.z as u32 as u64)
    }

    /// Recovers a coordinate from a registry key.
    pub fn from_key(key: u64) -> Self {
        ChunkCoord {
            x: (key >> 32) as u32 as i32,
            z: key as u32 as i32,
        }
    }

    /// The coordinate shifted by the given number of chunks.
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        ChunkCoord {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// The four horizontally adjacent coordinates in +X, -X, +Z, -Z order.
    pub fn neighbors(self) -> [ChunkCoord; 4] {
        [
            self.offset(1, 0),
            self.offset(-1, 0),
            self.offset(0, 1),
            self.offset(0, -1),
        ]
    }

    /// World-space placement of the chunk's origin corner.
    pub fn placement(self) -> Vector3<f32> {
        let length = CHUNK_AXIS_LENGTH as f32;
        Vector3::new(self.x as f32 * length, 0.0, self.z as f32 * length)
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_round_trips_negative_components() {
        for coord in [
            ChunkCoord::new(0, 0),
            ChunkCoord::new(-1, 0),
            ChunkCoord::new(0, -1),
            ChunkCoord::new(-1, -1),
            ChunkCoord::new(i32::MAX, i32::MIN),
        ] {
            assert_eq!(ChunkCoord::from_key(coord.key()), coord);
        }
    }

    #[test]
    fn negative_z_does_not_clobber_x() {
        assert_ne!(ChunkCoord::new(0, -1).key(), ChunkCoord::new(-1, -1).key());
        assert_eq!(ChunkCoord::new(3, -1).key() >> 32, 3);
    }

    #[test]
    fn placement_scales_by_axis_length() {
        let placement = ChunkCoord::new(2, -3).placement();
        assert_eq!(placement, Vector3::new(32.0, 0.0, -48.0));
    }

    #[test]
    fn display_formats_as_pair() {
        assert_eq!(ChunkCoord::new(5, -3).to_string(), "(5, -3)");
    }
}
