//! # Chunk Iteration Module
//!
//! This module provides an iterator over the non-air blocks of a chunk, in
//! storage order. The mesher walks chunks through it so air cells, which make
//! up most of a terrain chunk, cost a single comparison each.

use cgmath::Point3;

use crate::engine_state::voxels::block::block_type::BlockType;

use super::Chunk;

/// An iterator over all non-air blocks in a chunk.
///
/// Yields the local position of each block together with its type.
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Next storage index to inspect
    current_offset: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` positioned before the first block.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            current_offset: 0,
        }
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (Point3<i32>, BlockType);

    fn next(&mut self) -> Option<Self::Item> {
        let blocks = self.chunk_ref.blocks();
        while self.current_offset < blocks.len() {
            let offset = self.current_offset;
            self.current_offset += 1;
            let block_type = blocks[offset];
            if block_type != BlockType::Air {
                return Some((Chunk::position_of(offset), block_type));
            }
        }
        None
    }
}

impl Chunk {
    /// Iterates the non-air blocks of this chunk with their local positions.
    pub fn solid_blocks(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::chunk::ChunkCoord;

    #[test]
    fn skips_air() {
        let mut chunk = Chunk::empty(ChunkCoord::new(0, 0));
        chunk.set_block(1, 2, 3, BlockType::Stone);
        chunk.set_block(15, 254, 15, BlockType::Water);

        let found: Vec<_> = chunk.solid_blocks().collect();
        assert_eq!(
            found,
            vec![
                (Point3::new(1, 2, 3), BlockType::Stone),
                (Point3::new(15, 254, 15), BlockType::Water),
            ]
        );
    }
}
