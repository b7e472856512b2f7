//! Mesh generation for voxel rendering.
//!
//! This module turns a chunk's blocks into a flat triangle list. Every exposed
//! block face becomes its own quad (two unindexed triangles, six vertices);
//! faces are not merged. A face is exposed when the block is drawn at all and
//! the block across the face does not occlude it (see
//! [`is_face_exposed`](crate::engine_state::voxels::block::is_face_exposed)).
//!
//! # Chunk Boundaries
//! Faces on the chunk's edge ask a [`NeighborLookup`] for the block across the
//! boundary. An unloaded neighbor answers `None` and the face is drawn; the
//! streamer re-meshes the chunk once that neighbor arrives.
//!
//! # Performance Considerations
//! - Work is linear in chunk volume; air cells are skipped by the block iterator
//! - Lookups only leave the chunk for faces on its outer shell
//! - The output holds no GPU resource; uploading is the backend's job

use cgmath::Point3;

use crate::engine_state::{
    rendering::{texture::AtlasLayout, vertex::Vertex},
    voxels::{
        block::{block_type::BlockType, exposed_sides},
        chunk::{Chunk, ChunkCoord, BLOCK_LENGTH, CHUNK_DEPTH, CHUNK_WIDTH},
    },
};

mod face;

pub use face::{Face, VERTICES_PER_FACE};

/// Resolves blocks that lie outside the chunk being meshed.
pub trait NeighborLookup {
    /// Looks up the block at local offsets `(x, y, z)` relative to the chunk at `origin`.
    ///
    /// Offsets may fall outside `origin`'s bounds; the implementation translates
    /// them into the neighboring chunk.
    ///
    /// # Returns
    /// `None` when the containing chunk is not loaded or `y` is outside the world.
    fn neighbor_block(&self, origin: ChunkCoord, x: i32, y: i32, z: i32) -> Option<BlockType>;
}

/// A lookup for a chunk with nothing loaded around it.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoNeighbors;

impl NeighborLookup for NoNeighbors {
    fn neighbor_block(&self, _origin: ChunkCoord, _x: i32, _y: i32, _z: i32) -> Option<BlockType> {
        None
    }
}

/// Builds the vertex list for a chunk.
///
/// # Arguments
/// * `chunk` - The chunk to mesh
/// * `neighbors` - Source of blocks across the chunk's boundary
/// * `layout` - Atlas geometry used to compute UVs
///
/// # Returns
/// Six vertices per exposed face, in world space.
pub fn generate_mesh(chunk: &Chunk, neighbors: &dyn NeighborLookup, layout: &AtlasLayout) -> Vec<Vertex> {
    let coord = chunk.coord();
    let origin = coord.world_origin();
    let mut vertices = Vec::new();

    for (position, block_type) in chunk.solid_blocks() {
        let block_origin = Point3::new(
            origin.x + position.x as f32 * BLOCK_LENGTH,
            position.y as f32 * BLOCK_LENGTH,
            origin.z + position.z as f32 * BLOCK_LENGTH,
        );

        let sides = exposed_sides(block_type, |side| {
            let n = position + side.offset();
            chunk
                .get_block(n.x, n.y, n.z)
                .or_else(|| neighbors.neighbor_block(coord, n.x, n.y, n.z))
        });

        for side in sides {
            let Some(uv) = layout.uv_rect(block_type, side) else {
                continue;
            };
            Face::new(block_origin, side).push_vertices(&mut vertices, uv);
        }
    }

    log::trace!(
        "Meshed chunk {:?}: {} faces",
        coord,
        vertices.len() / VERTICES_PER_FACE
    );
    vertices
}

/// Splits local offsets that may leave a chunk into the containing chunk and
/// the offsets within it.
pub fn resolve_local(origin: ChunkCoord, x: i32, z: i32) -> (ChunkCoord, i32, i32) {
    let coord = origin.offset(x.div_euclid(CHUNK_WIDTH), z.div_euclid(CHUNK_DEPTH));
    (coord, x.rem_euclid(CHUNK_WIDTH), z.rem_euclid(CHUNK_DEPTH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_side::BlockSide;

    #[test]
    fn resolve_local_crosses_boundaries() {
        let origin = ChunkCoord::new(2, -1);
        assert_eq!(resolve_local(origin, 5, 7), (origin, 5, 7));
        assert_eq!(resolve_local(origin, -1, 0), (ChunkCoord::new(1, -1), 15, 0));
        assert_eq!(resolve_local(origin, 16, -1), (ChunkCoord::new(3, -2), 0, 15));
        assert_eq!(resolve_local(origin, -17, 33), (ChunkCoord::new(0, 1), 15, 1));
    }

    #[test]
    fn lone_block_emits_all_six_faces() {
        let mut chunk = Chunk::empty(ChunkCoord::new(1, 0));
        chunk.set_block(4, 10, 6, BlockType::Dirt);
        let vertices = generate_mesh(&chunk, &NoNeighbors, &AtlasLayout::default());
        assert_eq!(vertices.len(), 6 * VERTICES_PER_FACE);
        assert!(vertices.iter().all(|v| v.position[3] == 1.0));
        assert!(vertices.iter().all(|v| v.point().x >= 20.0 && v.point().x <= 21.0));
    }

    #[test]
    fn shared_faces_are_culled() {
        let mut chunk = Chunk::empty(ChunkCoord::new(0, 0));
        chunk.set_block(4, 10, 6, BlockType::Stone);
        chunk.set_block(5, 10, 6, BlockType::Stone);
        let vertices = generate_mesh(&chunk, &NoNeighbors, &AtlasLayout::default());
        assert_eq!(vertices.len(), 10 * VERTICES_PER_FACE);
    }

    #[test]
    fn water_surface_against_stone() {
        let mut chunk = Chunk::empty(ChunkCoord::new(0, 0));
        chunk.set_block(4, 10, 6, BlockType::Water);
        chunk.set_block(4, 11, 6, BlockType::Water);
        chunk.set_block(4, 9, 6, BlockType::Stone);
        let vertices = generate_mesh(&chunk, &NoNeighbors, &AtlasLayout::default());
        // Two water blocks: 4 sides each plus the top of the upper one.
        // Stone: 5 sides plus its top, which water does not hide.
        assert_eq!(vertices.len() / VERTICES_PER_FACE, 9 + 6);
    }

    #[test]
    fn face_lighting_and_uvs_come_from_tables() {
        let mut chunk = Chunk::empty(ChunkCoord::new(0, 0));
        chunk.set_block(0, 0, 0, BlockType::Grass);
        let layout = AtlasLayout::default();
        let vertices = generate_mesh(&chunk, &NoNeighbors, &layout);

        for (face_index, face) in vertices.chunks(VERTICES_PER_FACE).enumerate() {
            let side = BlockSide::all()[face_index];
            let rect = layout.uv_rect(BlockType::Grass, side).unwrap();
            assert!(face.iter().all(|v| v.lighting == side.lighting()));
            assert_eq!(face[0].uv, [rect.u, rect.v]);
        }
    }

    struct SolidWorld;

    impl NeighborLookup for SolidWorld {
        fn neighbor_block(&self, _origin: ChunkCoord, _x: i32, y: i32, _z: i32) -> Option<BlockType> {
            (0..255).contains(&y).then_some(BlockType::Stone)
        }
    }

    #[test]
    fn known_opaque_neighbors_hide_side_faces() {
        let chunk = Chunk::filled(ChunkCoord::new(0, 0), BlockType::Stone);
        let vertices = generate_mesh(&chunk, &SolidWorld, &AtlasLayout::default());
        // Only the top and bottom shells face outside the world column.
        assert_eq!(vertices.len() / VERTICES_PER_FACE, 2 * 16 * 16);
    }
}
