//! Vertex data layout for chunk batches.
//!
//! Batches keep positions, normals and UVs in separate arrays. Hosts that upload
//! to a GPU buffer interleave them into [`Vertex`] and cast the result to bytes.

use cgmath::{Vector2, Vector3};

/// A vertex of a chunk surface.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes)
/// - Normal: 3x f32 (12 bytes)
/// - Texture Coordinates: 2x f32 (8 bytes)
///
/// Total size: 32 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in chunk-local space
    pub position: [f32; 3],
    /// Outward face normal
    pub normal: [f32; 3],
    /// Atlas UV
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex.
    pub fn new(position: Vector3<f32>, normal: Vector3<f32>, tex_coords: Vector2<f32>) -> Self {
        Vertex {
            position: position.into(),
            normal: normal.into(),
            tex_coords: tex_coords.into(),
        }
    }
}
