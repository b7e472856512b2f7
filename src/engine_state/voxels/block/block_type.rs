//! # Block Type Module
//!
//! This module defines the closed set of block kinds that make up the voxel world.
//! The discriminant order is load-bearing: the texture atlas is laid out with one
//! column per non-air kind, so reordering variants silently changes texturing.

use num_derive::FromPrimitive;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Enumerates all possible block types in the voxel world.
///
/// The `FromPrimitive` derive allows conversion from atlas indices back into
/// block types, which the procedural atlas uses when painting its cells.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// Empty space. Never rendered and never occludes a neighbor.
    Air = 0,
    /// Bulk terrain below the dirt band.
    Stone,
    /// The thin band directly under the surface block.
    Dirt,
    /// Surface block for columns above the sand threshold.
    Grass,
    /// Surface block for low columns.
    Sand,
    /// Liquid. Rendered, but does not hide its neighbors.
    Water,
}

impl BlockType {
    /// Number of block types in the catalog.
    pub const COUNT: usize = 6;

    /// Returns every block type in discriminant order.
    pub fn all() -> [BlockType; Self::COUNT] {
        [
            BlockType::Air,
            BlockType::Stone,
            BlockType::Dirt,
            BlockType::Grass,
            BlockType::Sand,
            BlockType::Water,
        ]
    }

    /// The discriminant of this block type as a table index.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Converts a compact integer back into a `BlockType`.
    ///
    /// # Returns
    /// `None` when `value` does not name a block type.
    pub fn from_int(value: BlockTypeSize) -> Option<Self> {
        num_traits::FromPrimitive::from_u8(value)
    }

    /// Picks a random non-air, non-liquid block type.
    ///
    /// Used for scattering solid blocks in tests and demo scenes.
    pub fn random_solid() -> Self {
        Self::from_int(fastrand::u8(1..=4)).unwrap_or(BlockType::Stone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_int_matches_discriminants() {
        for block_type in BlockType::all() {
            assert_eq!(
                BlockType::from_int(block_type as BlockTypeSize),
                Some(block_type)
            );
        }
        assert_eq!(BlockType::from_int(BlockType::COUNT as u8), None);
    }

    #[test]
    fn random_solid_is_never_air_or_water() {
        for _ in 0..64 {
            let block_type = BlockType::random_solid();
            assert_ne!(block_type, BlockType::Air);
            assert_ne!(block_type, BlockType::Water);
        }
    }
}
