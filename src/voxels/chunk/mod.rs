//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a 16x16x512 column of blocks stored
//! in one contiguous buffer, plus the bookkeeping that decides when the chunk may
//! be meshed.
//!
//! ## Memory Layout
//!
//! Blocks are stored densely, one `Block` value per slot, addressed by
//! `x + z * CHUNK_AXIS_LENGTH + y * CHUNK_PLANE_SIZE`. A chunk owns its buffer
//! exclusively and rewrites it in place when it is repopulated.
//!
//! ## Lifecycle
//!
//! ```text
//! Empty --populate--> Populated --mesh--> Meshed
//!                         ^                  |
//!                         +---- block edit --+
//! ```
//!
//! Meshing is only permitted once a chunk has been populated. Independently, a
//! chunk carries a lock that suppresses remesh requests during bulk generation so
//! that it is meshed once, after all of its neighbors hold their final data.

use log::debug;

use crate::error::VoxelError;
use crate::rendering::meshing::ChunkMesh;

use super::block::Block;

mod chunk_coord;
pub mod chunk_iteration;
pub mod population;

pub use chunk_coord::ChunkCoord;
use chunk_iteration::ChunkBlockIterator;

/// The width and depth of a chunk in blocks.
pub const CHUNK_AXIS_LENGTH: usize = 16;
/// The height of a chunk in blocks. Chunks are never split vertically.
pub const CHUNK_HEIGHT: usize = 512;
/// The number of blocks in a single horizontal plane of a chunk.
pub const CHUNK_PLANE_SIZE: usize = CHUNK_AXIS_LENGTH * CHUNK_AXIS_LENGTH;
/// The total number of blocks in a chunk.
pub const CHUNK_SIZE: usize = CHUNK_PLANE_SIZE * CHUNK_HEIGHT;

/// Chunk-local block position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalPos {
    /// 0..CHUNK_AXIS_LENGTH
    pub x: usize,
    /// 0..CHUNK_HEIGHT
    pub y: usize,
    /// 0..CHUNK_AXIS_LENGTH
    pub z: usize,
}

impl LocalPos {
    /// Creates a position, failing if it lies outside the chunk.
    pub fn new(x: usize, y: usize, z: usize) -> Result<Self, VoxelError> {
        if x < CHUNK_AXIS_LENGTH && y < CHUNK_HEIGHT && z < CHUNK_AXIS_LENGTH {
            Ok(LocalPos { x, y, z })
        } else {
            Err(VoxelError::OutOfRange { x, y, z })
        }
    }

    /// Linear index of this position in the block buffer.
    #[inline]
    pub fn index(self) -> usize {
        debug_assert!(self.x < CHUNK_AXIS_LENGTH);
        debug_assert!(self.y < CHUNK_HEIGHT);
        debug_assert!(self.z < CHUNK_AXIS_LENGTH);
        self.x + self.z * CHUNK_AXIS_LENGTH + self.y * CHUNK_PLANE_SIZE
    }

    /// Inverse of [`LocalPos::index`].
    #[inline]
    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < CHUNK_SIZE);
        LocalPos {
            x: index % CHUNK_AXIS_LENGTH,
            z: (index / CHUNK_AXIS_LENGTH) % CHUNK_AXIS_LENGTH,
            y: index / CHUNK_PLANE_SIZE,
        }
    }

    /// Whether the position touches one of the four vertical chunk borders.
    pub fn is_on_horizontal_border(self) -> bool {
        self.x == 0
            || self.z == 0
            || self.x == CHUNK_AXIS_LENGTH - 1
            || self.z == CHUNK_AXIS_LENGTH - 1
    }
}

/// Where a chunk is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkState {
    /// Storage allocated, contents not generated yet. Invisible to neighbor lookups.
    Empty,
    /// Contents generated or edited since the last mesh.
    Populated,
    /// The stored mesh reflects the current contents.
    Meshed,
}

/// A fixed-size column of blocks at a grid coordinate.
pub struct Chunk {
    coord: ChunkCoord,
    blocks: Vec<Block>,
    state: ChunkState,
    locked: bool,
    mesh: ChunkMesh,
}

impl Chunk {
    /// Creates a new chunk filled with air.
    ///
    /// The chunk starts `Empty` and locked so that it is not meshed before its
    /// neighbors exist.
    pub fn new(coord: ChunkCoord) -> Self {
        Chunk {
            coord,
            blocks: vec![Block::AIR; CHUNK_SIZE],
            state: ChunkState::Empty,
            locked: true,
            mesh: ChunkMesh::default(),
        }
    }

    /// The chunk's grid coordinate.
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// The chunk's lifecycle state.
    pub fn state(&self) -> ChunkState {
        self.state
    }

    /// Whether the chunk holds generated contents.
    pub fn is_populated(&self) -> bool {
        self.state != ChunkState::Empty
    }

    /// Whether remesh requests are currently suppressed.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Suppresses remesh requests until [`Chunk::unlock`] is called.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Permits remeshing again.
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Gets the block at the specified chunk-relative coordinates.
    ///
    /// # Errors
    /// [`VoxelError::OutOfRange`] if the coordinates lie outside the chunk.
    pub fn block_at(&self, x: usize, y: usize, z: usize) -> Result<&Block, VoxelError> {
        let pos = LocalPos::new(x, y, z)?;
        Ok(&self.blocks[pos.index()])
    }

    /// Gets the block at a position already known to be in range.
    #[inline]
    pub fn block(&self, pos: LocalPos) -> &Block {
        &self.blocks[pos.index()]
    }

    /// Replaces the block at the specified chunk-relative coordinates.
    ///
    /// An edit invalidates the current mesh, so a meshed chunk drops back to
    /// `Populated`.
    pub fn set_block(&mut self, x: usize, y: usize, z: usize, block: Block) -> Result<(), VoxelError> {
        let pos = LocalPos::new(x, y, z)?;
        self.blocks[pos.index()] = block;
        if self.state == ChunkState::Meshed {
            self.state = ChunkState::Populated;
        }
        Ok(())
    }

    /// Overwrites every slot with `block` and marks the chunk populated.
    pub fn fill(&mut self, block: Block) {
        self.blocks.fill(block);
        self.state = ChunkState::Populated;
    }

    /// The dense block buffer.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Mutable access to the block buffer for population.
    pub(crate) fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }

    /// Records that the contents were (re)generated.
    pub(crate) fn mark_populated(&mut self) {
        self.state = ChunkState::Populated;
        debug!("(Re)generated blocks for chunk at {}.", self.coord);
    }

    /// Iterates over every solid block with its position.
    pub fn solid_blocks(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }

    /// The most recently built mesh.
    pub fn mesh(&self) -> &ChunkMesh {
        &self.mesh
    }

    /// Stores a freshly built mesh.
    pub(crate) fn install_mesh(&mut self, mesh: ChunkMesh) {
        self.mesh = mesh;
        self.state = ChunkState::Meshed;
    }
}
