//! # Chunk Iteration Module
//!
//! This module provides an iterator over the solid blocks of a chunk, in storage
//! order (x fastest, then z, then y), skipping air.

use super::{Chunk, LocalPos, CHUNK_SIZE};
use crate::voxels::block::Block;

/// An iterator over all solid blocks in a chunk.
///
/// Yields each solid block together with its chunk-local position. Air blocks
/// are skipped without being yielded.
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Next slot of the block buffer to inspect
    current_offset: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` positioned before the first slot.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            current_offset: 0,
        }
    }
}

impl<'a> Iterator for ChunkBlockIterator<'a> {
    type Item = (LocalPos, &'a Block);

    fn next(&mut self) -> Option<Self::Item> {
        let blocks = self.chunk_ref.blocks();
        while self.current_offset < CHUNK_SIZE {
            let offset = self.current_offset;
            self.current_offset += 1;

            let block = &blocks[offset];
            if block.is_solid() {
                return Some((LocalPos::from_index(offset), block));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(CHUNK_SIZE - self.current_offset))
    }
}
