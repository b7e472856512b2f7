use cgmath::{Point3, Vector3};

use crate::engine_state::{
    rendering::{texture::UvRect, vertex::Vertex},
    voxels::{block::block_side::BlockSide, chunk::BLOCK_LENGTH},
};

/// Number of vertices emitted per face: two unindexed triangles.
pub const VERTICES_PER_FACE: usize = 6;

/// A single quad face of a voxel, ready to be split into triangles.
///
/// Corners are listed starting at a fixed corner and walking counter-clockwise
/// as seen from outside the block, in the right-handed world frame. The quad is
/// emitted as triangles `(a, b, c)` and `(a, c, d)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// The four corners in winding order
    pub corners: [Point3<f32>; 4],
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Builds the face of the block whose minimum corner is `block_origin`.
    ///
    /// # Arguments
    /// * `block_origin` - World-space minimum corner of the block
    /// * `block_side` - Which side to build
    pub fn new(block_origin: Point3<f32>, block_side: BlockSide) -> Self {
        // Every corner is expressed relative to the block's top-front-left corner.
        let base = block_origin + Vector3::new(0.0, BLOCK_LENGTH, 0.0);
        let l = BLOCK_LENGTH;
        let corner = |x: f32, y: f32, z: f32| base + Vector3::new(x * l, y * l, z * l);

        let corners = match block_side {
            BlockSide::Front => [
                corner(0.0, 0.0, 0.0),
                corner(1.0, 0.0, 0.0),
                corner(1.0, -1.0, 0.0),
                corner(0.0, -1.0, 0.0),
            ],
            BlockSide::Back => [
                corner(1.0, 0.0, 1.0),
                corner(0.0, 0.0, 1.0),
                corner(0.0, -1.0, 1.0),
                corner(1.0, -1.0, 1.0),
            ],
            BlockSide::Left => [
                corner(0.0, 0.0, 1.0),
                corner(0.0, 0.0, 0.0),
                corner(0.0, -1.0, 0.0),
                corner(0.0, -1.0, 1.0),
            ],
            BlockSide::Right => [
                corner(1.0, 0.0, 0.0),
                corner(1.0, 0.0, 1.0),
                corner(1.0, -1.0, 1.0),
                corner(1.0, -1.0, 0.0),
            ],
            BlockSide::Top => [
                corner(0.0, 0.0, 1.0),
                corner(1.0, 0.0, 1.0),
                corner(1.0, 0.0, 0.0),
                corner(0.0, 0.0, 0.0),
            ],
            BlockSide::Bottom => [
                corner(1.0, -1.0, 1.0),
                corner(0.0, -1.0, 1.0),
                corner(0.0, -1.0, 0.0),
                corner(1.0, -1.0, 0.0),
            ],
        };

        Face { corners, block_side }
    }

    /// Appends the two triangles of this face to `vertices`.
    ///
    /// The first corner maps to the atlas cell's `(u, v)` origin and the rest
    /// follow the cell's edges in the same order as the corners.
    pub fn push_vertices(&self, vertices: &mut Vec<Vertex>, uv: UvRect) {
        let [a, b, c, d] = self.corners;
        let lighting = self.block_side.lighting();
        let uv_a = [uv.u, uv.v];
        let uv_b = [uv.u + uv.du, uv.v];
        let uv_c = [uv.u + uv.du, uv.v + uv.dv];
        let uv_d = [uv.u, uv.v + uv.dv];

        vertices.extend_from_slice(&[
            Vertex::new(a, uv_a, lighting),
            Vertex::new(b, uv_b, lighting),
            Vertex::new(c, uv_c, lighting),
            Vertex::new(a, uv_a, lighting),
            Vertex::new(c, uv_c, lighting),
            Vertex::new(d, uv_d, lighting),
        ]);
    }
}
