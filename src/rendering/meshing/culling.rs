//! Neighbor-aware face culling.
//!
//! Each solid block contributes one quad for every side whose adjacent voxel is
//! not opaque. Adjacent voxels across a horizontal chunk border are read from the
//! neighboring chunk when one is present; without a neighbor, and above or below
//! the column, the side counts as exposed.
//!
//! Opacity is resolved up front into a padded bit mask one voxel wider than the
//! chunk on every side, so the per-face test is a single lookup.

use bitvec::prelude::BitVec;
use log::{debug, warn};
use web_time::Instant;

use crate::rendering::atlas::TextureAtlas;
use crate::voxels::block::{block_side::BlockSide, material_type::MaterialType};
use crate::voxels::chunk::{Chunk, LocalPos, CHUNK_AXIS_LENGTH, CHUNK_HEIGHT};

use super::{
    face::Face,
    mesh::{ChunkMesh, MeshBatch},
};

const PADDED_AXIS: usize = CHUNK_AXIS_LENGTH + 2;
const PADDED_HEIGHT: usize = CHUNK_HEIGHT + 2;
const PADDED_PLANE: usize = PADDED_AXIS * PADDED_AXIS;
const PADDED_SIZE: usize = PADDED_PLANE * PADDED_HEIGHT;

/// The horizontally adjacent chunks a mesh build may look into.
///
/// Absent entries are treated as empty space.
#[derive(Clone, Copy, Default)]
pub struct ChunkNeighbors<'a> {
    /// Chunk at +X
    pub pos_x: Option<&'a Chunk>,
    /// Chunk at -X
    pub neg_x: Option<&'a Chunk>,
    /// Chunk at +Z
    pub pos_z: Option<&'a Chunk>,
    /// Chunk at -Z
    pub neg_z: Option<&'a Chunk>,
}

impl<'a> ChunkNeighbors<'a> {
    /// No neighbors at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// The neighbor across the given side. Vertical sides never have one.
    pub fn get(&self, side: BlockSide) -> Option<&'a Chunk> {
        match side {
            BlockSide::RIGHT => self.pos_x,
            BlockSide::LEFT => self.neg_x,
            BlockSide::FRONT => self.pos_z,
            BlockSide::BACK => self.neg_z,
            BlockSide::TOP | BlockSide::BOTTOM => None,
        }
    }

    /// Number of neighbors present.
    pub fn count(&self) -> usize {
        [self.pos_x, self.neg_x, self.pos_z, self.neg_z]
            .iter()
            .filter(|n| n.is_some())
            .count()
    }
}

/// Padded index of chunk-local coordinates, each shifted by one.
#[inline]
fn padded_index(x: usize, y: usize, z: usize) -> usize {
    x + z * PADDED_AXIS + y * PADDED_PLANE
}

/// Builds the padded opacity mask for `chunk` and the border slabs of its neighbors.
fn opacity_mask(chunk: &Chunk, neighbors: &ChunkNeighbors<'_>) -> BitVec {
    let mut mask = BitVec::repeat(false, PADDED_SIZE);
    let last = CHUNK_AXIS_LENGTH - 1;

    for (index, block) in chunk.blocks().iter().enumerate() {
        if block.is_opaque() {
            let pos = LocalPos::from_index(index);
            mask.set(padded_index(pos.x + 1, pos.y + 1, pos.z + 1), true);
        }
    }

    for y in 0..CHUNK_HEIGHT {
        for i in 0..CHUNK_AXIS_LENGTH {
            if let Some(n) = neighbors.pos_x {
                let opaque = n.block(LocalPos { x: 0, y, z: i }).is_opaque();
                mask.set(padded_index(CHUNK_AXIS_LENGTH + 1, y + 1, i + 1), opaque);
            }
            if let Some(n) = neighbors.neg_x {
                let opaque = n.block(LocalPos { x: last, y, z: i }).is_opaque();
                mask.set(padded_index(0, y + 1, i + 1), opaque);
            }
            if let Some(n) = neighbors.pos_z {
                let opaque = n.block(LocalPos { x: i, y, z: 0 }).is_opaque();
                mask.set(padded_index(i + 1, y + 1, CHUNK_AXIS_LENGTH + 1), opaque);
            }
            if let Some(n) = neighbors.neg_z {
                let opaque = n.block(LocalPos { x: i, y, z: last }).is_opaque();
                mask.set(padded_index(i + 1, y + 1, 0), opaque);
            }
        }
    }

    mask
}

/// Whether the voxel next to `pos` across `side` hides that side.
#[inline]
fn is_covered(mask: &BitVec, pos: LocalPos, side: BlockSide) -> bool {
    let offset = side.offset();
    // Shifted by one, so every neighbor coordinate lands inside the padding.
    let x = (pos.x as i32 + 1 + offset.x) as usize;
    let y = (pos.y as i32 + 1 + offset.y) as usize;
    let z = (pos.z as i32 + 1 + offset.z) as usize;
    mask[padded_index(x, y, z)]
}

/// Builds the culled surface mesh of a chunk.
///
/// Faces are grouped into one batch per material class, appended in
/// [`MaterialType::BATCH_ORDER`]; classes without faces get no batch. Blocks
/// whose stored material is not recognized are meshed into the `UNKNOWN` batch.
///
/// # Arguments
/// * `chunk` - The chunk to mesh
/// * `neighbors` - Adjacent chunks consulted for faces on the chunk border
/// * `atlas` - Atlas layout used to compute face UVs
///
/// # Returns
/// The chunk's mesh in chunk-local space
pub fn build_chunk_mesh(
    chunk: &Chunk,
    neighbors: &ChunkNeighbors<'_>,
    atlas: &TextureAtlas,
) -> ChunkMesh {
    let start = Instant::now();
    let mask = opacity_mask(chunk, neighbors);

    let mut batches: Vec<MeshBatch> = MaterialType::all()
        .into_iter()
        .map(MeshBatch::new)
        .collect();
    let mut unknown_materials = 0usize;

    for (pos, block) in chunk.solid_blocks() {
        let material = match block.material_type() {
            Some(material) => material,
            None => {
                if unknown_materials == 0 {
                    warn!(
                        "Chunk {} has a block at ({}, {}, {}) with unknown material {}; meshing it as {}.",
                        chunk.coord(),
                        pos.x,
                        pos.y,
                        pos.z,
                        block.raw_material(),
                        MaterialType::UNKNOWN
                    );
                }
                unknown_materials += 1;
                MaterialType::UNKNOWN
            }
        };

        let uvs = atlas.face_uvs(block.texture());
        let batch = &mut batches[material as usize];
        for side in BlockSide::all() {
            if !is_covered(&mask, pos, side) {
                batch.push_face(&Face::new(pos.x, pos.y, pos.z, side), uvs);
            }
        }
    }

    if unknown_materials > 1 {
        warn!(
            "Chunk {} had {} blocks with unknown materials.",
            chunk.coord(),
            unknown_materials
        );
    }

    let mut ordered = Vec::with_capacity(MaterialType::COUNT);
    for material in MaterialType::BATCH_ORDER {
        let batch = std::mem::replace(&mut batches[material as usize], MeshBatch::new(material));
        if !batch.is_empty() {
            ordered.push(batch);
        }
    }
    let mesh = ChunkMesh::new(ordered);

    debug!(
        "Meshed chunk {} with {} neighbors: {} faces in {} batches, took {:?}",
        chunk.coord(),
        neighbors.count(),
        mesh.face_count(),
        mesh.batches().len(),
        start.elapsed()
    );

    mesh
}
