//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a fixed 16×255×16 column of blocks
//! at a [`ChunkCoord`], plus the render-data cache entry for its mesh.
//!
//! ## Storage
//!
//! Blocks are stored densely, one `BlockType` per cell, in a flat vector laid
//! out `[x][y][z]` (z varies fastest). Every in-bounds cell always holds a real
//! block type; queries outside the chunk return `None` so callers can tell
//! "outside this chunk" apart from "known air".
//!
//! ## Render-Data Cache
//!
//! A chunk optionally carries the [`ChunkMesh`] uploaded for it. The mesh is
//! dropped when the chunk leaves render range and is flagged stale when the
//! chunk's blocks or a neighbor's presence change.
//!
//! ## Key Components
//! - `chunk_coord`: chunk addressing and hashing
//! - `terrain`: noise-driven terrain generation
//! - `chunk_iteration`: iteration over the non-air blocks of a chunk

use cgmath::Point3;

use super::block::block_type::BlockType;
use crate::engine_state::rendering::ChunkMesh;

pub mod chunk_coord;
pub mod chunk_iteration;
pub mod terrain;

pub use chunk_coord::ChunkCoord;

/// Width of a chunk along X, in blocks.
pub const CHUNK_WIDTH: i32 = 16;
/// Height of a chunk along Y, in blocks. Bounds all terrain vertically.
pub const CHUNK_HEIGHT: i32 = 255;
/// Depth of a chunk along Z, in blocks.
pub const CHUNK_DEPTH: i32 = 16;
/// Total number of blocks in a chunk.
pub const CHUNK_VOLUME: usize = (CHUNK_WIDTH * CHUNK_HEIGHT * CHUNK_DEPTH) as usize;
/// Edge length of a block in world units.
pub const BLOCK_LENGTH: f32 = 1.0;

/// A fixed-size column of voxel blocks.
#[derive(Debug)]
pub struct Chunk {
    /// Position of this chunk on the chunk grid.
    coord: ChunkCoord,
    /// Dense block storage in `[x][y][z]` order.
    blocks: Vec<BlockType>,
    /// The uploaded mesh for this chunk, if any.
    mesh: Option<ChunkMesh>,
    /// Set when `mesh` no longer reflects the chunk or its neighborhood.
    needs_remesh: bool,
}

impl Chunk {
    /// Creates a chunk filled entirely with air.
    pub fn empty(coord: ChunkCoord) -> Self {
        Self::filled(coord, BlockType::Air)
    }

    /// Creates a chunk where every cell holds `block_type`.
    pub fn filled(coord: ChunkCoord, block_type: BlockType) -> Self {
        Self {
            coord,
            blocks: vec![block_type; CHUNK_VOLUME],
            mesh: None,
            needs_remesh: false,
        }
    }

    /// Position of this chunk on the chunk grid.
    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Converts local block offsets into a storage index.
    ///
    /// # Returns
    /// `None` when any offset falls outside `[0, width) × [0, height) × [0, depth)`.
    #[inline]
    fn index(x: i32, y: i32, z: i32) -> Option<usize> {
        if !(0..CHUNK_WIDTH).contains(&x)
            || !(0..CHUNK_HEIGHT).contains(&y)
            || !(0..CHUNK_DEPTH).contains(&z)
        {
            return None;
        }
        Some(((x * CHUNK_HEIGHT + y) * CHUNK_DEPTH + z) as usize)
    }

    /// Inverse of the storage index, used by iteration.
    #[inline]
    pub(crate) fn position_of(index: usize) -> Point3<i32> {
        let index = index as i32;
        let z = index % CHUNK_DEPTH;
        let y = (index / CHUNK_DEPTH) % CHUNK_HEIGHT;
        let x = index / (CHUNK_DEPTH * CHUNK_HEIGHT);
        Point3::new(x, y, z)
    }

    /// Reads the block at local offsets `(x, y, z)`.
    ///
    /// # Returns
    /// The block type, or `None` when the offsets lie outside this chunk.
    #[inline]
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> Option<BlockType> {
        Self::index(x, y, z).map(|index| self.blocks[index])
    }

    /// Writes the block at local offsets `(x, y, z)`.
    ///
    /// A meshed chunk whose contents change is flagged for re-meshing.
    ///
    /// # Returns
    /// `false` when the offsets lie outside this chunk and nothing was written.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block_type: BlockType) -> bool {
        let Some(index) = Self::index(x, y, z) else {
            return false;
        };
        if self.blocks[index] != block_type {
            self.blocks[index] = block_type;
            if self.mesh.is_some() {
                self.needs_remesh = true;
            }
        }
        true
    }

    /// Overwrites every cell with `block_type`.
    pub fn fill(&mut self, block_type: BlockType) {
        self.blocks.fill(block_type);
        if self.mesh.is_some() {
            self.needs_remesh = true;
        }
    }

    /// Read-only view of the raw block storage.
    pub fn blocks(&self) -> &[BlockType] {
        &self.blocks
    }

    /// Mutable access to a single column, bottom to top.
    pub(crate) fn column_mut(&mut self, x: i32, z: i32) -> impl Iterator<Item = (i32, &mut BlockType)> {
        debug_assert!((0..CHUNK_WIDTH).contains(&x) && (0..CHUNK_DEPTH).contains(&z));
        let base = (x * CHUNK_HEIGHT * CHUNK_DEPTH + z) as usize;
        self.blocks
            .iter_mut()
            .skip(base)
            .step_by(CHUNK_DEPTH as usize)
            .take(CHUNK_HEIGHT as usize)
            .enumerate()
            .map(|(y, block)| (y as i32, block))
    }

    /// The cached mesh for this chunk.
    pub fn mesh(&self) -> Option<&ChunkMesh> {
        self.mesh.as_ref()
    }

    /// Whether a mesh is currently cached.
    pub fn has_mesh(&self) -> bool {
        self.mesh.is_some()
    }

    /// Whether the chunk has a mesh that still reflects its surroundings.
    pub fn has_current_mesh(&self) -> bool {
        self.mesh.is_some() && !self.needs_remesh
    }

    /// Whether the cached mesh is stale.
    pub fn needs_remesh(&self) -> bool {
        self.needs_remesh
    }

    /// Flags the cached mesh as stale. Has no effect on unmeshed chunks.
    pub fn mark_needs_remesh(&mut self) {
        if self.mesh.is_some() {
            self.needs_remesh = true;
        }
    }

    /// Removes the cached mesh, handing it back so its GPU buffer can be released.
    pub fn take_mesh(&mut self) -> Option<ChunkMesh> {
        self.needs_remesh = false;
        self.mesh.take()
    }

    /// Installs a freshly built mesh, returning the one it replaces.
    pub fn replace_mesh(&mut self, mesh: ChunkMesh) -> Option<ChunkMesh> {
        self.needs_remesh = false;
        self.mesh.replace(mesh)
    }
}
