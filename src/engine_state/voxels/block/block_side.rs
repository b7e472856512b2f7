//! # Block Side Module
//!
//! This module defines the six faces of a voxel block, the direction each one
//! faces, and the fixed directional shading baked into its vertices.

use cgmath::Vector3;
use num_derive::FromPrimitive;

/// Represents the six possible faces of a voxel block.
///
/// The discriminants double as the row index into the texture atlas and as
/// the index into [`SIDE_LIGHTING`].
///
/// The order is: [TOP, FRONT, LEFT, RIGHT, BACK, BOTTOM]
#[repr(u8)]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug, FromPrimitive)]
pub enum BlockSide {
    /// The top face (facing positive Y)
    Top = 0,

    /// The front face (facing negative Z)
    Front = 1,

    /// The left face (facing negative X)
    Left = 2,

    /// The right face (facing positive X)
    Right = 3,

    /// The back face (facing positive Z)
    Back = 4,

    /// The bottom face (facing negative Y)
    Bottom = 5,
}

/// Per-face shading, indexed by `BlockSide`.
///
/// Top is brightest, bottom darkest, sides in between.
pub static SIDE_LIGHTING: [f32; 6] = [1.0, 0.9, 0.5, 0.9, 0.5, 0.25];

impl BlockSide {
    /// Number of block faces.
    pub const COUNT: usize = 6;

    /// Returns an array containing all six block faces in discriminant order.
    pub fn all() -> [BlockSide; Self::COUNT] {
        [
            BlockSide::Top,
            BlockSide::Front,
            BlockSide::Left,
            BlockSide::Right,
            BlockSide::Back,
            BlockSide::Bottom,
        ]
    }

    /// The discriminant of this side as a table index.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Converts an atlas row back into a `BlockSide`.
    pub fn from_int(value: u8) -> Option<Self> {
        num_traits::FromPrimitive::from_u8(value)
    }

    /// Offset from a block to the neighbor this face touches.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            BlockSide::Top => Vector3::new(0, 1, 0),
            BlockSide::Bottom => Vector3::new(0, -1, 0),
            BlockSide::Front => Vector3::new(0, 0, -1),
            BlockSide::Back => Vector3::new(0, 0, 1),
            BlockSide::Left => Vector3::new(-1, 0, 0),
            BlockSide::Right => Vector3::new(1, 0, 0),
        }
    }

    /// Outward unit normal of this face.
    pub fn normal(self) -> Vector3<f32> {
        let offset = self.offset();
        Vector3::new(offset.x as f32, offset.y as f32, offset.z as f32)
    }

    /// Lighting value baked into every vertex of this face.
    #[inline]
    pub fn lighting(self) -> f32 {
        SIDE_LIGHTING[self.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_faces_cancel() {
        let pairs = [
            (BlockSide::Top, BlockSide::Bottom),
            (BlockSide::Front, BlockSide::Back),
            (BlockSide::Left, BlockSide::Right),
        ];
        for (a, b) in pairs {
            assert_eq!(a.offset() + b.offset(), Vector3::new(0, 0, 0));
        }
    }

    #[test]
    fn top_is_brightest_and_bottom_darkest() {
        for side in BlockSide::all() {
            assert!(side.lighting() <= BlockSide::Top.lighting());
            assert!(side.lighting() >= BlockSide::Bottom.lighting());
        }
    }
}
