//! Property-based tests for block and chunk addressing.
//!
//! Critical invariants:
//! - Local positions and buffer indices are a bijection
//! - A block is opaque exactly when it is solid and not glass
//! - Registry keys round-trip every chunk coordinate, including negatives

use proptest::prelude::*;
use voxel_terrain::rendering::meshing::{build_chunk_mesh, ChunkNeighbors};
use voxel_terrain::voxels::chunk::{LocalPos, CHUNK_AXIS_LENGTH, CHUNK_HEIGHT, CHUNK_SIZE};
use voxel_terrain::{Block, Chunk, ChunkCoord, MaterialType, TextureAtlas};

proptest! {
    /// Property: every in-range position maps to a unique index and back
    #[test]
    fn local_index_is_a_bijection(
        x in 0..CHUNK_AXIS_LENGTH,
        y in 0..CHUNK_HEIGHT,
        z in 0..CHUNK_AXIS_LENGTH,
    ) {
        let pos = LocalPos::new(x, y, z).unwrap();
        let index = pos.index();
        prop_assert!(index < CHUNK_SIZE);
        prop_assert_eq!(LocalPos::from_index(index), pos);
    }

    /// Property: every index maps to an in-range position and back
    #[test]
    fn index_round_trips(index in 0..CHUNK_SIZE) {
        let pos = LocalPos::from_index(index);
        prop_assert!(LocalPos::new(pos.x, pos.y, pos.z).is_ok());
        prop_assert_eq!(pos.index(), index);
    }

    /// Property: opacity depends only on solidity and the glass material
    #[test]
    fn opacity_invariant(solid in any::<bool>(), material in any::<u8>(), texture in any::<u16>()) {
        let block = Block::from_raw(solid, material, texture);
        let expected = solid && material != MaterialType::GLASS as u8;
        prop_assert_eq!(block.is_opaque(), expected);
        if !solid {
            prop_assert!(!block.is_opaque());
        }
    }

    /// Property: chunk keys are unique per coordinate and reversible
    #[test]
    fn chunk_key_round_trips(x in any::<i32>(), z in any::<i32>()) {
        let coord = ChunkCoord::new(x, z);
        prop_assert_eq!(ChunkCoord::from_key(coord.key()), coord);
        if z != x {
            prop_assert_ne!(ChunkCoord::new(z, x).key(), coord.key());
        }
    }

    /// Property: a lone block always yields six faces wherever it sits
    #[test]
    fn lone_block_has_six_faces(
        x in 0..CHUNK_AXIS_LENGTH,
        y in 0..CHUNK_HEIGHT,
        z in 0..CHUNK_AXIS_LENGTH,
        material in 0u8..4,
    ) {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        chunk.fill(Block::AIR);
        chunk.set_block(x, y, z, Block::from_raw(true, material, 1)).unwrap();

        let mesh = build_chunk_mesh(&chunk, &ChunkNeighbors::none(), &TextureAtlas::default());
        prop_assert_eq!(mesh.face_count(), 6);
        prop_assert_eq!(mesh.batches().len(), 1);
        prop_assert_eq!(mesh.batches()[0].material as u8, material);
    }
}
