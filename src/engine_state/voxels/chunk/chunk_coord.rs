//! # Chunk Coordinates
//!
//! Chunks tile the unbounded X/Z plane; the world has a fixed height so a
//! chunk is addressed by two integers. `ChunkCoord` is the key of the world's
//! chunk map and of every per-chunk table in the streamer.

use std::hash::{Hash, Hasher};

use cgmath::Point3;

use super::{BLOCK_LENGTH, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH};

/// Integer position of a chunk on the horizontal chunk grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ChunkCoord {
    /// Chunk index along X.
    pub idx: i32,
    /// Chunk index along Z.
    pub idz: i32,
}

impl ChunkCoord {
    /// Creates a coordinate from its two chunk indices.
    pub const fn new(idx: i32, idz: i32) -> Self {
        Self { idx, idz }
    }

    /// Packs both components into a single `u64`.
    ///
    /// The packing is a bijection over the whole `i32 × i32` range, so two
    /// distinct coordinates never share a key.
    #[inline]
    pub fn key(self) -> u64 {
        ((self.idx as u32 as u64) << 32) | self.idz as u32 as u64
    }

    /// Inverse of [`ChunkCoord::key`].
    #[inline]
    pub fn from_key(key: u64) -> Self {
        Self {
            idx: (key >> 32) as u32 as i32,
            idz: key as u32 as i32,
        }
    }

    /// The chunk containing a world-space position.
    ///
    /// Each axis is floored, so positions just below zero land in chunk `-1`.
    pub fn containing(position: Point3<f32>) -> Self {
        let chunk_width = BLOCK_LENGTH * CHUNK_WIDTH as f32;
        let chunk_depth = BLOCK_LENGTH * CHUNK_DEPTH as f32;
        Self {
            idx: (position.x / chunk_width).floor() as i32,
            idz: (position.z / chunk_depth).floor() as i32,
        }
    }

    /// The coordinate `(dx, dz)` chunks away from this one.
    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            idx: self.idx.wrapping_add(dx),
            idz: self.idz.wrapping_add(dz),
        }
    }

    /// Chessboard distance between two chunk coordinates.
    pub fn chebyshev_distance(self, other: ChunkCoord) -> u32 {
        self.idx.abs_diff(other.idx).max(self.idz.abs_diff(other.idz))
    }

    /// The four chunks sharing an edge with this one: -X, +X, -Z, +Z.
    pub fn horizontal_neighbors(self) -> [ChunkCoord; 4] {
        [
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(0, 1),
        ]
    }

    /// World-space position of the chunk's minimum corner.
    pub fn world_origin(self) -> Point3<f32> {
        Point3::new(
            self.idx as f32 * CHUNK_WIDTH as f32 * BLOCK_LENGTH,
            0.0,
            self.idz as f32 * CHUNK_DEPTH as f32 * BLOCK_LENGTH,
        )
    }

    /// World-space axis-aligned bounding box covering the full chunk column.
    ///
    /// # Returns
    /// `(min, max)` corners of the box.
    pub fn bounds(self) -> (Point3<f32>, Point3<f32>) {
        let min = self.world_origin();
        let max = Point3::new(
            min.x + CHUNK_WIDTH as f32 * BLOCK_LENGTH,
            CHUNK_HEIGHT as f32 * BLOCK_LENGTH,
            min.z + CHUNK_DEPTH as f32 * BLOCK_LENGTH,
        );
        (min, max)
    }

    /// Every coordinate within `radius` chunks of this one, nearest first.
    ///
    /// Ties are broken by coordinate order so the sequence is deterministic.
    pub fn square_around(self, radius: u32) -> Vec<ChunkCoord> {
        let radius = radius as i32;
        let side = (2 * radius + 1) as usize;
        let mut coords = Vec::with_capacity(side * side);
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                coords.push(self.offset(dx, dz));
            }
        }
        coords.sort_by_key(|coord| (self.chebyshev_distance(*coord), *coord));
        coords
    }
}

impl Hash for ChunkCoord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from((idx, idz): (i32, i32)) -> Self {
        Self { idx, idz }
    }
}
