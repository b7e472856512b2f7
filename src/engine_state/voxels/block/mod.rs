//! # Block Module
//!
//! This module provides the block catalog: block type definitions, block faces,
//! and the static property table that classifies every type by how it interacts
//! with light and with its neighbors.
//!
//! ## Visibility Classes
//!
//! * `Opaque` - rendered, and hides the faces of neighbors touching it
//! * `Transparent` - never rendered, never hides anything (air)
//! * `Translucent` - rendered, but neighbors behind it stay visible (liquids)
//!
//! The property table is a `static` and is never mutated, so it can be read
//! from worker threads without synchronization.

use block_side::BlockSide;
use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// How a block type interacts with its neighbors during meshing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Visibility {
    /// Rendered and occludes neighbors.
    Opaque,
    /// Not rendered and does not occlude.
    Transparent,
    /// Rendered but does not occlude.
    Translucent,
}

/// Static properties shared by every block of a given type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlockProperties {
    /// Visibility class of the block type.
    pub visibility: Visibility,
    /// Column of this block type in the texture atlas, `None` for types that are never drawn.
    pub atlas_column: Option<u32>,
}

/// Maps each block type to its properties.
///
/// Indexed by `BlockType` as a `usize`. The atlas column of a drawn type is its
/// discriminant minus one because air owns no column.
pub static BLOCK_PROPERTIES: [BlockProperties; BlockType::COUNT] = [
    BlockProperties { visibility: Visibility::Transparent, atlas_column: None }, // Air
    BlockProperties { visibility: Visibility::Opaque, atlas_column: Some(0) },   // Stone
    BlockProperties { visibility: Visibility::Opaque, atlas_column: Some(1) },   // Dirt
    BlockProperties { visibility: Visibility::Opaque, atlas_column: Some(2) },   // Grass
    BlockProperties { visibility: Visibility::Opaque, atlas_column: Some(3) },   // Sand
    BlockProperties { visibility: Visibility::Translucent, atlas_column: Some(4) }, // Water
];

/// Number of atlas columns occupied by drawn block types.
pub const ATLAS_COLUMNS: u32 = (BlockType::COUNT - 1) as u32;

impl BlockType {
    /// Looks up the static properties of this block type.
    #[inline]
    pub fn properties(self) -> &'static BlockProperties {
        &BLOCK_PROPERTIES[self.index()]
    }

    /// The visibility class of this block type.
    #[inline]
    pub fn visibility(self) -> Visibility {
        self.properties().visibility
    }

    /// Whether this block type hides the faces of neighbors touching it.
    #[inline]
    pub fn is_opaque(self) -> bool {
        self.visibility() == Visibility::Opaque
    }

    /// Whether this block type is skipped entirely by the mesher.
    #[inline]
    pub fn is_transparent(self) -> bool {
        self.visibility() == Visibility::Transparent
    }

    /// Whether this block type is drawn without hiding its neighbors.
    #[inline]
    pub fn is_translucent(self) -> bool {
        self.visibility() == Visibility::Translucent
    }

    /// Atlas column holding this block type's face textures.
    #[inline]
    pub fn atlas_column(self) -> Option<u32> {
        self.properties().atlas_column
    }
}

/// Decides whether the face of `block` that touches `neighbor` must be drawn.
///
/// A face is drawn when the block itself is not transparent and the neighbor is
/// absent or does not occlude. An absent neighbor (chunk boundary with nothing
/// loaded behind it) behaves like air. Two touching blocks of the same
/// translucent type share no visible face, so water bodies have no inner walls.
///
/// # Arguments
/// * `block` - The block owning the face
/// * `neighbor` - The block across the face, or `None` when unknown
pub fn is_face_exposed(block: BlockType, neighbor: Option<BlockType>) -> bool {
    if block.is_transparent() {
        return false;
    }

    match neighbor {
        None => true,
        Some(neighbor) if neighbor.is_opaque() => false,
        Some(neighbor) => !(block.is_translucent() && neighbor == block),
    }
}

/// Iterates the sides of `block` that must be drawn, asking `neighbor_of` for the block across each side.
pub fn exposed_sides(
    block: BlockType,
    mut neighbor_of: impl FnMut(BlockSide) -> Option<BlockType>,
) -> impl Iterator<Item = BlockSide> {
    BlockSide::all()
        .into_iter()
        .filter(move |side| is_face_exposed(block, neighbor_of(*side)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_has_a_property_entry() {
        assert_eq!(BLOCK_PROPERTIES.len(), BlockType::COUNT);
        assert_eq!(BlockType::Air.visibility(), Visibility::Transparent);
        assert_eq!(BlockType::Water.visibility(), Visibility::Translucent);
        for block_type in [BlockType::Stone, BlockType::Dirt, BlockType::Grass, BlockType::Sand] {
            assert!(block_type.is_opaque());
        }
    }

    #[test]
    fn atlas_columns_skip_air() {
        assert_eq!(BlockType::Air.atlas_column(), None);
        for block_type in BlockType::all().into_iter().skip(1) {
            assert_eq!(block_type.atlas_column(), Some(block_type as u32 - 1));
        }
    }

    #[test]
    fn face_exposure_rules() {
        assert!(!is_face_exposed(BlockType::Air, None));
        assert!(is_face_exposed(BlockType::Stone, None));
        assert!(is_face_exposed(BlockType::Stone, Some(BlockType::Air)));
        assert!(is_face_exposed(BlockType::Stone, Some(BlockType::Water)));
        assert!(!is_face_exposed(BlockType::Stone, Some(BlockType::Dirt)));
        assert!(is_face_exposed(BlockType::Water, Some(BlockType::Air)));
        assert!(!is_face_exposed(BlockType::Water, Some(BlockType::Water)));
        assert!(!is_face_exposed(BlockType::Water, Some(BlockType::Sand)));
    }

    #[test]
    fn exposed_sides_filters_occluded_faces() {
        let sides: Vec<_> = exposed_sides(BlockType::Grass, |side| match side {
            BlockSide::Top => Some(BlockType::Air),
            BlockSide::Bottom => None,
            _ => Some(BlockType::Stone),
        })
        .collect();
        assert_eq!(sides, vec![BlockSide::Top, BlockSide::Bottom]);
    }
}
