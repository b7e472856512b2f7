use blockscape::engine_state::{
    rendering::meshing::resolve_local,
    voxels::{
        chunk::{
            terrain::{block_for_height, column_height},
            ChunkCoord, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH,
        },
        block::block_type::BlockType,
        noise::PerlinNoise,
    },
};
use cgmath::Point3;
use proptest::prelude::*;

proptest! {
    #[test]
    fn key_round_trips(idx in any::<i32>(), idz in any::<i32>()) {
        let coord = ChunkCoord::new(idx, idz);
        prop_assert_eq!(ChunkCoord::from_key(coord.key()), coord);
    }

    #[test]
    fn containing_chunk_bounds_the_point(x in -10_000.0f32..10_000.0, z in -10_000.0f32..10_000.0) {
        let coord = ChunkCoord::containing(Point3::new(x, 0.0, z));
        let (min, max) = coord.bounds();
        prop_assert!(min.x <= x && x < max.x);
        prop_assert!(min.z <= z && z < max.z);
    }

    #[test]
    fn resolve_local_lands_inside_a_chunk(
        idx in -1000i32..1000,
        idz in -1000i32..1000,
        x in -64i32..64,
        z in -64i32..64,
    ) {
        let origin = ChunkCoord::new(idx, idz);
        let (owner, local_x, local_z) = resolve_local(origin, x, z);

        prop_assert!((0..CHUNK_WIDTH).contains(&local_x));
        prop_assert!((0..CHUNK_DEPTH).contains(&local_z));
        prop_assert_eq!(
            (owner.idx - origin.idx) * CHUNK_WIDTH + local_x,
            x
        );
        prop_assert_eq!(
            (owner.idz - origin.idz) * CHUNK_DEPTH + local_z,
            z
        );
    }

    #[test]
    fn columns_are_solid_below_the_surface(
        seed in any::<u32>(),
        idx in -50i32..50,
        idz in -50i32..50,
        x in 0i32..CHUNK_WIDTH,
        z in 0i32..CHUNK_DEPTH,
    ) {
        let noise = PerlinNoise::new(seed);
        let surface = column_height(ChunkCoord::new(idx, idz), x, z, &noise);
        prop_assert!((0..CHUNK_HEIGHT).contains(&surface));

        let mut seen_air = false;
        for y in 0..CHUNK_HEIGHT {
            let block = block_for_height(y, surface);
            if block == BlockType::Air {
                seen_air = true;
            } else {
                prop_assert!(!seen_air, "solid block at {} above air", y);
            }
        }
        prop_assert!(block_for_height(surface, surface) != BlockType::Air);
    }
}
