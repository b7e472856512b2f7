//! # World Module
//!
//! This module provides the `World` struct, the sole owner of every loaded
//! chunk. Chunks are keyed by [`ChunkCoord`] in an LRU map: the streamer
//! promotes the chunks it needs each update, so when a retention bound is
//! configured the chunks evicted are the ones the observer left longest ago.
//!
//! ## Neighborhood Bookkeeping
//!
//! Meshes draw faces against unloaded neighbors. Inserting a chunk therefore
//! flags each meshed horizontal neighbor for re-meshing so those faces get
//! culled once the blocks behind them are known.
//!
//! ## Performance Considerations
//!
//! - Chunk lookup is O(1) using a hash map
//! - Reads through `get_chunk` do not touch LRU order; only `promote` does
//! - Unbounded retention grows memory with explored area; set a capacity to cap it

use std::num::NonZeroUsize;

use cgmath::Point3;
use log::{trace, warn};
use lru::LruCache;

use crate::engine_state::{
    rendering::{
        meshing::{resolve_local, NeighborLookup},
        ChunkMesh,
    },
    voxels::{
        block::block_type::BlockType,
        chunk::{Chunk, ChunkCoord, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH},
    },
};

/// Represents a voxel world composed of multiple chunks.
pub struct World {
    /// A mapping from chunk coordinates to chunk data, in recency order.
    chunks: LruCache<ChunkCoord, Chunk>,
    /// Meshes of evicted chunks whose buffers still need releasing.
    evicted_meshes: Vec<ChunkMesh>,
    /// Number of chunks evicted so far.
    evictions: u64,
}

impl World {
    /// Creates a new, empty world.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of chunks retained, `None` for no bound
    pub fn new(capacity: Option<NonZeroUsize>) -> Self {
        let chunks = match capacity {
            Some(capacity) => LruCache::new(capacity),
            None => LruCache::unbounded(),
        };
        World {
            chunks,
            evicted_meshes: Vec::new(),
            evictions: 0,
        }
    }

    /// Number of loaded chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether no chunk is loaded.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Total number of chunks evicted since creation.
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Whether a chunk is loaded at `coord`.
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains(&coord)
    }

    /// Retrieves the chunk at `coord` without affecting eviction order.
    pub fn get_chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.peek(&coord)
    }

    /// Mutable access to the chunk at `coord` without affecting eviction order.
    pub fn get_chunk_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.peek_mut(&coord)
    }

    /// Marks the chunk at `coord` as most recently used.
    pub fn promote(&mut self, coord: ChunkCoord) {
        self.chunks.promote(&coord);
    }

    /// Coordinates of every loaded chunk, most recently used first.
    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.iter().map(|(coord, _)| *coord)
    }

    /// Adds a chunk to the world.
    ///
    /// Meshed horizontal neighbors are flagged for re-meshing. If the world is
    /// at capacity the least recently used chunk is evicted and its mesh, if
    /// any, is queued for release (see [`World::drain_evicted_meshes`]).
    ///
    /// # Returns
    /// `false` if a chunk was already loaded at that coordinate, in which case
    /// the existing chunk is kept and `chunk` is dropped.
    pub fn insert_chunk(&mut self, chunk: Chunk) -> bool {
        let coord = chunk.coord();
        if self.chunks.contains(&coord) {
            warn!("Chunk {:?} is already loaded, dropping duplicate", coord);
            return false;
        }

        for neighbor in coord.horizontal_neighbors() {
            if let Some(neighbor_chunk) = self.chunks.peek_mut(&neighbor) {
                neighbor_chunk.mark_needs_remesh();
            }
        }

        if let Some((evicted_coord, mut evicted)) = self.chunks.push(coord, chunk) {
            self.evictions += 1;
            trace!("Evicted chunk {:?}", evicted_coord);
            if let Some(mesh) = evicted.take_mesh() {
                warn!("Evicted chunk {:?} still had a mesh", evicted_coord);
                self.evicted_meshes.push(mesh);
            }
        }

        true
    }

    /// Removes a chunk outright.
    ///
    /// The caller takes over the chunk, including any mesh it still holds.
    pub fn remove_chunk(&mut self, coord: ChunkCoord) -> Option<Chunk> {
        self.chunks.pop(&coord)
    }

    /// Hands back meshes of evicted chunks so their buffers can be released.
    pub fn drain_evicted_meshes(&mut self) -> Vec<ChunkMesh> {
        std::mem::take(&mut self.evicted_meshes)
    }

    /// Reads a block by world-space block position.
    ///
    /// # Returns
    /// `None` when the containing chunk is not loaded or `y` is outside the world.
    pub fn block_at(&self, position: Point3<i32>) -> Option<BlockType> {
        let coord = ChunkCoord::new(
            position.x.div_euclid(CHUNK_WIDTH),
            position.z.div_euclid(CHUNK_DEPTH),
        );
        self.get_chunk(coord)?.get_block(
            position.x.rem_euclid(CHUNK_WIDTH),
            position.y,
            position.z.rem_euclid(CHUNK_DEPTH),
        )
    }
}

impl NeighborLookup for World {
    fn neighbor_block(&self, origin: ChunkCoord, x: i32, y: i32, z: i32) -> Option<BlockType> {
        if !(0..CHUNK_HEIGHT).contains(&y) {
            return None;
        }
        let (coord, local_x, local_z) = resolve_local(origin, x, z);
        self.get_chunk(coord)?.get_block(local_x, y, local_z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::MeshHandle;

    fn meshed(coord: ChunkCoord, handle: u64) -> Chunk {
        let mut chunk = Chunk::filled(coord, BlockType::Stone);
        chunk.replace_mesh(ChunkMesh { handle: MeshHandle(handle), vertex_count: 6 });
        chunk
    }

    #[test]
    fn duplicate_insert_keeps_original() {
        let mut world = World::new(None);
        assert!(world.insert_chunk(Chunk::filled(ChunkCoord::new(0, 0), BlockType::Stone)));
        assert!(!world.insert_chunk(Chunk::filled(ChunkCoord::new(0, 0), BlockType::Sand)));
        assert_eq!(world.block_at(Point3::new(0, 0, 0)), Some(BlockType::Stone));
    }

    #[test]
    fn insert_flags_meshed_neighbors() {
        let mut world = World::new(None);
        world.insert_chunk(meshed(ChunkCoord::new(1, 0), 1));
        world.insert_chunk(meshed(ChunkCoord::new(1, 1), 2));
        world.insert_chunk(Chunk::empty(ChunkCoord::new(0, 0)));

        assert!(world.get_chunk(ChunkCoord::new(1, 0)).unwrap().needs_remesh());
        // Diagonal neighbors share no face.
        assert!(!world.get_chunk(ChunkCoord::new(1, 1)).unwrap().needs_remesh());
    }

    #[test]
    fn neighbor_lookup_crosses_chunks() {
        let mut world = World::new(None);
        let mut west = Chunk::empty(ChunkCoord::new(-1, 0));
        west.set_block(15, 20, 3, BlockType::Grass);
        world.insert_chunk(west);

        let origin = ChunkCoord::new(0, 0);
        assert_eq!(world.neighbor_block(origin, -1, 20, 3), Some(BlockType::Grass));
        assert_eq!(world.neighbor_block(origin, -1, 21, 3), Some(BlockType::Air));
        assert_eq!(world.neighbor_block(origin, 16, 20, 3), None);
        assert_eq!(world.neighbor_block(origin, -1, 255, 3), None);
        assert_eq!(world.block_at(Point3::new(-1, 20, 3)), Some(BlockType::Grass));
    }

    #[test]
    fn capacity_evicts_least_recently_used() {
        let mut world = World::new(NonZeroUsize::new(2));
        world.insert_chunk(Chunk::empty(ChunkCoord::new(0, 0)));
        world.insert_chunk(meshed(ChunkCoord::new(5, 5), 9));
        world.promote(ChunkCoord::new(0, 0));
        world.insert_chunk(Chunk::empty(ChunkCoord::new(1, 0)));

        assert_eq!(world.len(), 2);
        assert!(world.contains(ChunkCoord::new(0, 0)));
        assert!(!world.contains(ChunkCoord::new(5, 5)));
        assert_eq!(world.evictions(), 1);
        let released = world.drain_evicted_meshes();
        assert_eq!(released.len(), 1);
        assert_eq!(released[0].handle, MeshHandle(9));
        assert!(world.drain_evicted_meshes().is_empty());
    }
}
