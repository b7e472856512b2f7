//! Vertex data structures and layouts for voxel rendering.
//!
//! This module defines the vertex format the mesher emits and render backends
//! consume, along with a backend-neutral description of its attributes.

use std::mem::{offset_of, size_of};

use cgmath::Point3;

/// A vertex in the voxel rendering pipeline.
///
/// # Memory Layout
/// - Position: [f32; 4] (16 bytes), `w` is always 1
/// - Texture Coordinates: [f32; 2] (8 bytes)
/// - Lighting: f32 (4 bytes)
///
/// Total size: 28 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Homogeneous world-space position
    pub position: [f32; 4],
    /// UV coordinates into the texture atlas
    pub uv: [f32; 2],
    /// Directional shading factor baked per face
    pub lighting: f32,
}

/// One attribute of the vertex layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader-facing attribute name
    pub name: &'static str,
    /// Byte offset from the start of the vertex
    pub offset: usize,
    /// Number of `f32` components
    pub components: usize,
}

impl Vertex {
    /// Size of one vertex in bytes.
    pub const STRIDE: usize = size_of::<Vertex>();

    /// Attribute layout, in shader location order.
    pub const ATTRIBUTES: [VertexAttribute; 3] = [
        VertexAttribute { name: "position", offset: offset_of!(Vertex, position), components: 4 },
        VertexAttribute { name: "uv", offset: offset_of!(Vertex, uv), components: 2 },
        VertexAttribute { name: "lighting", offset: offset_of!(Vertex, lighting), components: 1 },
    ];

    /// Creates a vertex at a world-space point.
    ///
    /// # Arguments
    /// * `position` - World-space position of the vertex
    /// * `uv` - Atlas texture coordinates
    /// * `lighting` - Face shading factor
    pub fn new(position: Point3<f32>, uv: [f32; 2], lighting: f32) -> Self {
        Vertex {
            position: [position.x, position.y, position.z, 1.0],
            uv,
            lighting,
        }
    }

    /// The position without its homogeneous component.
    pub fn point(&self) -> Point3<f32> {
        Point3::new(self.position[0], self.position[1], self.position[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_tightly_packed() {
        assert_eq!(Vertex::STRIDE, 28);
        let offsets: Vec<_> = Vertex::ATTRIBUTES.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 16, 24]);
        let binding = [Vertex::new(Point3::new(1.0, 2.0, 3.0), [0.5, 0.25], 0.9)];
        let bytes: &[u8] = bytemuck::cast_slice(&binding);
        assert_eq!(bytes.len(), Vertex::STRIDE);
    }
}
