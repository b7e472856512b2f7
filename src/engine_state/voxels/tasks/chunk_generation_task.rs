//! # Chunk Generation Task
//!
//! This module defines the `ChunkGenerationTask` which generates a chunk's
//! terrain on a worker thread. The finished chunk travels back inside the
//! task result and is inserted into the world by the main thread.

use std::sync::Arc;

use log::trace;

use crate::engine_state::{
    task_management::task::{ResultContext, Task, TaskResult},
    voxels::{
        chunk::{Chunk, ChunkCoord},
        noise::NoiseSource,
    },
};

/// A task that generates chunk data on a worker.
pub struct ChunkGenerationTask {
    /// Height field shared with the main thread
    noise: Arc<dyn NoiseSource>,
    /// The chunk to generate
    coord: ChunkCoord,
}

impl ChunkGenerationTask {
    /// Creates a new chunk generation task.
    ///
    /// # Arguments
    /// * `noise` - The height field to generate from
    /// * `coord` - The chunk to generate
    pub fn new(noise: Arc<dyn NoiseSource>, coord: ChunkCoord) -> Self {
        ChunkGenerationTask { noise, coord }
    }
}

impl Task for ChunkGenerationTask {
    fn process(&self) -> Box<dyn TaskResult + Send> {
        Box::new(ChunkGenerationTaskResult {
            chunk: Chunk::generate(self.coord, self.noise.as_ref()),
        })
    }
}

/// The result of a chunk generation task: the finished chunk.
pub struct ChunkGenerationTaskResult {
    chunk: Chunk,
}

impl TaskResult for ChunkGenerationTaskResult {
    /// Inserts the generated chunk into the world if it is still wanted.
    ///
    /// A chunk that left the wanted set while it was being generated is
    /// dropped, so it cannot evict a wanted one. A chunk that was loaded by
    /// other means in the meantime wins over the generated copy.
    fn handle_result(self: Box<Self>, context: &mut ResultContext<'_>) -> Vec<Box<dyn Task + Send>> {
        let coord = self.chunk.coord();
        context.finished.push(coord);

        if !context.wanted.contains(&coord) {
            trace!("Discarded generated chunk {:?}, no longer wanted", coord);
        } else if context.world.insert_chunk(self.chunk) {
            context.committed += 1;
            trace!("Committed generated chunk {:?}", coord);
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::engine_state::voxels::{noise::ConstantNoise, world::World};

    fn run(coord: ChunkCoord, wanted: &HashSet<ChunkCoord>, world: &mut World) -> (Vec<ChunkCoord>, usize) {
        let task = ChunkGenerationTask::new(Arc::new(ConstantNoise(0.3)), coord);
        let mut context = ResultContext::new(world, wanted);
        let follow_ups = task.process().handle_result(&mut context);
        assert!(follow_ups.is_empty());
        (context.finished, context.committed)
    }

    #[test]
    fn wanted_chunk_is_committed() {
        let coord = ChunkCoord::new(2, -1);
        let wanted = HashSet::from([coord]);
        let mut world = World::new(None);

        let (finished, committed) = run(coord, &wanted, &mut world);

        assert_eq!(finished, vec![coord]);
        assert_eq!(committed, 1);
        assert!(world.contains(coord));
    }

    #[test]
    fn unwanted_chunk_is_discarded_but_reported() {
        let coord = ChunkCoord::new(2, -1);
        let wanted = HashSet::from([ChunkCoord::new(0, 0)]);
        let mut world = World::new(None);

        let (finished, committed) = run(coord, &wanted, &mut world);

        assert_eq!(finished, vec![coord]);
        assert_eq!(committed, 0);
        assert!(world.is_empty());
    }
}
