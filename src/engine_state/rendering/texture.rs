//! Texture atlas handling for the rendering pipeline.
//!
//! The atlas is a single image holding every block face texture on a fixed grid:
//! one column per drawn block type and one row per block side, each cell
//! [`TEXTURE_SIDE_LENGTH`] pixels square. The core only needs the atlas
//! dimensions to compute UV fractions; pixel data is passed through to the
//! render backend untouched.

use crate::engine_state::voxels::block::{block_side::BlockSide, block_type::BlockType, ATLAS_COLUMNS};

/// Edge length of one atlas cell, in pixels.
pub const TEXTURE_SIDE_LENGTH: u32 = 16;

/// Supplies the texture atlas image.
pub trait TextureAtlas {
    /// Atlas width in pixels.
    fn width(&self) -> u32;
    /// Atlas height in pixels.
    fn height(&self) -> u32;
    /// Raw RGBA8 pixel data, row-major.
    fn rgba(&self) -> &[u8];
}

/// A rectangle in UV space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UvRect {
    /// Left edge
    pub u: f32,
    /// Top edge
    pub v: f32,
    /// Width
    pub du: f32,
    /// Height
    pub dv: f32,
}

/// UV geometry of an atlas, derived from its pixel size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AtlasLayout {
    /// Width of one cell as a fraction of the atlas width
    pub cell_u: f32,
    /// Height of one cell as a fraction of the atlas height
    pub cell_v: f32,
}

impl AtlasLayout {
    /// Computes the layout for an atlas of `width × height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height > 0, "atlas must not be empty");
        Self {
            cell_u: TEXTURE_SIDE_LENGTH as f32 / width as f32,
            cell_v: TEXTURE_SIDE_LENGTH as f32 / height as f32,
        }
    }

    /// Computes the layout for an atlas image.
    pub fn from_atlas(atlas: &dyn TextureAtlas) -> Self {
        Self::new(atlas.width(), atlas.height())
    }

    /// The atlas cell of one face of one block type.
    ///
    /// # Returns
    /// `None` for block types that own no atlas column.
    pub fn uv_rect(&self, block_type: BlockType, side: BlockSide) -> Option<UvRect> {
        let column = block_type.atlas_column()?;
        Some(UvRect {
            u: self.cell_u * column as f32,
            v: self.cell_v * side.index() as f32,
            du: self.cell_u,
            dv: self.cell_v,
        })
    }
}

impl Default for AtlasLayout {
    fn default() -> Self {
        Self::new(
            ATLAS_COLUMNS * TEXTURE_SIDE_LENGTH,
            BlockSide::COUNT as u32 * TEXTURE_SIDE_LENGTH,
        )
    }
}

/// A procedurally painted atlas with the standard grid.
///
/// Each cell gets a base color for its block type, darkened per side and
/// speckled with seeded noise, which is enough to tell faces apart without an
/// image decoder.
#[derive(Clone, Debug)]
pub struct GeneratedAtlas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl GeneratedAtlas {
    /// Paints a full atlas. The same `seed` always yields the same pixels.
    pub fn new(seed: u64) -> Self {
        let width = ATLAS_COLUMNS * TEXTURE_SIDE_LENGTH;
        let height = BlockSide::COUNT as u32 * TEXTURE_SIDE_LENGTH;
        let mut pixels = vec![0u8; (width * height * 4) as usize];
        let mut rng = fastrand::Rng::with_seed(seed);

        for py in 0..height {
            let side = BlockSide::from_int((py / TEXTURE_SIDE_LENGTH) as u8);
            for px in 0..width {
                let block_type = BlockType::from_int((px / TEXTURE_SIDE_LENGTH + 1) as u8);
                let (Some(block_type), Some(side)) = (block_type, side) else {
                    continue;
                };
                let [r, g, b, a] = base_color(block_type, side);
                let speckle = rng.u8(0..24);
                let offset = ((py * width + px) * 4) as usize;
                pixels[offset] = r.saturating_sub(speckle);
                pixels[offset + 1] = g.saturating_sub(speckle);
                pixels[offset + 2] = b.saturating_sub(speckle);
                pixels[offset + 3] = a;
            }
        }

        Self { width, height, pixels }
    }
}

fn base_color(block_type: BlockType, side: BlockSide) -> [u8; 4] {
    match (block_type, side) {
        (BlockType::Grass, BlockSide::Top) => [96, 168, 64, 255],
        (BlockType::Grass, BlockSide::Bottom) | (BlockType::Dirt, _) => [134, 96, 67, 255],
        (BlockType::Grass, _) => [112, 132, 66, 255],
        (BlockType::Stone, _) => [128, 128, 128, 255],
        (BlockType::Sand, _) => [219, 207, 163, 255],
        (BlockType::Water, _) => [48, 92, 200, 160],
        (BlockType::Air, _) => [0, 0, 0, 0],
    }
}

impl TextureAtlas for GeneratedAtlas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn rgba(&self) -> &[u8] {
        &self.pixels
    }
}
