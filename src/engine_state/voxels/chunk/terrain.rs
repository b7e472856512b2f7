//! # Terrain Generation
//!
//! Fills a chunk from a 2-D height field. Every column is a pure function of
//! its world-space `(x, z)` and the noise seed, so a chunk can always be
//! regenerated instead of stored.
//!
//! Column layout, bottom to top:
//! - stone up to the dirt band
//! - dirt between `surface - DIRT_MARGIN` (exclusive) and the surface, clamped at the bottom of the world
//! - one surface block at the column height: grass above [`GRASS_LINE`], sand at or below it
//! - air

use crate::engine_state::voxels::{block::block_type::BlockType, noise::NoiseSource};

use super::{Chunk, ChunkCoord, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH};

/// World units per unit of noise input.
pub const HORIZONTAL_SCALE: f32 = 50.0;
/// Octaves summed when sampling the height field.
pub const TERRAIN_OCTAVES: u32 = 3;
/// Highest possible surface, reached when the height field returns 1.
pub const MAX_SURFACE_HEIGHT: f32 = CHUNK_HEIGHT as f32 / 2.0;
/// Distance below the surface where stone begins.
pub const DIRT_MARGIN: i32 = 2;
/// Surfaces strictly above this height are grass, the rest sand.
pub const GRASS_LINE: i32 = CHUNK_HEIGHT / 5;

/// Computes the surface height of a column.
///
/// # Arguments
/// * `coord` - The chunk owning the column
/// * `x`, `z` - Local column offsets within the chunk
/// * `noise` - The height field
///
/// # Returns
/// The `y` of the surface block, in `[0, MAX_SURFACE_HEIGHT]`.
pub fn column_height(coord: ChunkCoord, x: i32, z: i32, noise: &dyn NoiseSource) -> i32 {
    let world_x = (coord.idx as i64 * CHUNK_WIDTH as i64 + x as i64) as f32;
    let world_z = (coord.idz as i64 * CHUNK_DEPTH as i64 + z as i64) as f32;
    let height = noise.sample(
        world_x / HORIZONTAL_SCALE,
        world_z / HORIZONTAL_SCALE,
        TERRAIN_OCTAVES,
    );
    ((height * MAX_SURFACE_HEIGHT).floor() as i32).clamp(0, CHUNK_HEIGHT - 1)
}

/// Picks the block at height `y` in a column whose surface is at `surface`.
pub fn block_for_height(y: i32, surface: i32) -> BlockType {
    let dirt_floor = (surface - DIRT_MARGIN).max(0);
    if y > surface {
        BlockType::Air
    } else if y == surface {
        if surface > GRASS_LINE {
            BlockType::Grass
        } else {
            BlockType::Sand
        }
    } else if y > dirt_floor {
        BlockType::Dirt
    } else {
        BlockType::Stone
    }
}

impl Chunk {
    /// Creates and fills a chunk from the height field.
    pub fn generate(coord: ChunkCoord, noise: &dyn NoiseSource) -> Self {
        let mut chunk = Chunk::empty(coord);
        chunk.generate_terrain(noise);
        chunk
    }

    /// Overwrites every column of this chunk with generated terrain.
    pub fn generate_terrain(&mut self, noise: &dyn NoiseSource) {
        let coord = self.coord;
        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_DEPTH {
                let surface = column_height(coord, x, z, noise);
                for (y, block) in self.column_mut(x, z) {
                    *block = block_for_height(y, surface);
                }
            }
        }
        if self.has_mesh() {
            self.mark_needs_remesh();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::noise::{ConstantNoise, PerlinNoise};

    #[test]
    fn column_layers_follow_surface() {
        assert_eq!(block_for_height(60, 60), BlockType::Grass);
        assert_eq!(block_for_height(59, 60), BlockType::Dirt);
        assert_eq!(block_for_height(58, 60), BlockType::Stone);
        assert_eq!(block_for_height(61, 60), BlockType::Air);
        assert_eq!(block_for_height(GRASS_LINE, GRASS_LINE), BlockType::Sand);
        assert_eq!(block_for_height(GRASS_LINE + 1, GRASS_LINE + 1), BlockType::Grass);
    }

    #[test]
    fn shallow_columns_do_not_underflow() {
        assert_eq!(block_for_height(0, 0), BlockType::Sand);
        assert_eq!(block_for_height(1, 0), BlockType::Air);
        assert_eq!(block_for_height(0, 1), BlockType::Stone);
        assert_eq!(block_for_height(1, 1), BlockType::Sand);
    }

    #[test]
    fn constant_noise_gives_flat_terrain() {
        let chunk = Chunk::generate(ChunkCoord::new(-4, 9), &ConstantNoise(0.5));
        let surface = (0.5 * MAX_SURFACE_HEIGHT).floor() as i32;
        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_DEPTH {
                assert_eq!(chunk.get_block(x, surface, z), Some(BlockType::Grass));
                assert_eq!(chunk.get_block(x, surface + 1, z), Some(BlockType::Air));
                assert_eq!(chunk.get_block(x, 0, z), Some(BlockType::Stone));
            }
        }
    }

    #[test]
    fn zero_height_field_leaves_a_single_sand_layer() {
        let chunk = Chunk::generate(ChunkCoord::new(0, 0), &ConstantNoise(0.0));
        assert_eq!(chunk.get_block(8, 0, 8), Some(BlockType::Sand));
        assert_eq!(chunk.get_block(8, 1, 8), Some(BlockType::Air));
    }

    #[test]
    fn generation_is_deterministic() {
        let coord = ChunkCoord::new(3, -7);
        let a = Chunk::generate(coord, &PerlinNoise::new(1234));
        let b = Chunk::generate(coord, &PerlinNoise::new(1234));
        assert_eq!(a.blocks(), b.blocks());
    }
}
