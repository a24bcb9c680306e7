//! Presentation of chunk meshes.
//!
//! Building a mesh never touches rendering state. Once a chunk has a fresh mesh,
//! the world describes it as a [`ChunkPresentation`] and hands it to a
//! [`RenderTarget`], which owns whatever GPU or scene resources the host uses.

use cgmath::Vector3;

use crate::voxels::chunk::ChunkCoord;

use super::{
    meshing::{Aabb, ChunkMesh, MeshBatch},
    palette::{MaterialDescriptor, Palette},
};

/// One drawable surface of a chunk: a batch and the material it is shaded with.
#[derive(Debug, Clone, Copy)]
pub struct Surface<'a> {
    /// Surface label, the batch's material class name
    pub name: &'static str,
    /// Geometry of the surface
    pub batch: &'a MeshBatch,
    /// Palette entry for the batch, `None` if the palette has none
    pub material: Option<&'a MaterialDescriptor>,
}

/// Everything a renderer needs to show one chunk.
#[derive(Debug, Clone)]
pub struct ChunkPresentation<'a> {
    /// Grid coordinate of the chunk
    pub coord: ChunkCoord,
    /// World-space position of the chunk's origin corner
    pub placement: Vector3<f32>,
    /// Surfaces in draw order
    pub surfaces: Vec<Surface<'a>>,
    /// Combined bounds of every surface in chunk-local space
    pub bounds: Option<Aabb>,
    /// Whether the chunk has anything to draw
    pub visible: bool,
}

impl<'a> ChunkPresentation<'a> {
    /// Describes `mesh` for the chunk at `coord`, resolving materials from `palette`.
    pub fn new(coord: ChunkCoord, mesh: &'a ChunkMesh, palette: &'a Palette) -> Self {
        let surfaces = mesh
            .batches()
            .iter()
            .map(|batch| Surface {
                name: batch.name(),
                batch,
                material: palette.material(batch.material),
            })
            .collect();

        ChunkPresentation {
            coord,
            placement: coord.placement(),
            surfaces,
            bounds: mesh.bounds(),
            visible: mesh.is_visible(),
        }
    }
}

/// Receiver of chunk meshes.
pub trait RenderTarget {
    /// Replaces whatever is shown for `presentation.coord` with the new surfaces.
    fn present(&mut self, presentation: &ChunkPresentation<'_>);
}

/// A render target that discards everything. Used for headless worlds.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderTarget;

impl RenderTarget for NullRenderTarget {
    fn present(&mut self, _presentation: &ChunkPresentation<'_>) {}
}
