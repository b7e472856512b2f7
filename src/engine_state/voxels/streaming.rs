//! # Chunk Streaming
//!
//! Keeps the world around a moving observer loaded and meshed. Each update:
//!
//! 1. computes the required square: every chunk within `render_distance`
//!    (chessboard distance) of the observer's chunk, nearest first
//! 2. drops the meshes of rendered chunks that left the square, keeping their blocks
//! 3. marks required chunks as most recently used so eviction never touches them
//! 4. commits chunks finished by workers that are still required, discarding the rest
//! 5. generates every missing required chunk, inline or by dispatching it to a worker
//! 6. meshes required chunks that have no mesh or a stale one, and uploads them
//! 7. releases meshes of evicted chunks
//!
//! All generation in an update happens before any meshing, so a chunk meshed
//! in the same update as its neighbors sees them.
//!
//! Without a per-update operation budget and without workers, one update is
//! enough to converge: afterwards the render set is exactly the required square.
//! With a budget or workers the same state is reached over several updates;
//! [`ChunkStreamer::is_converged`] reports when.

use std::collections::HashSet;
use std::sync::Arc;

use cgmath::Point3;
use log::{debug, info};

use super::{
    chunk::{Chunk, ChunkCoord},
    noise::NoiseSource,
    tasks::chunk_generation_task::ChunkGenerationTask,
    world::World,
};
use crate::engine_state::{
    camera_state::frustum::Frustum,
    rendering::{meshing::generate_mesh, AtlasLayout, ChunkDraw, ChunkMesh, RenderBackend},
    task_management::{task::ResultContext, TaskManager},
};

/// Knobs controlling how much work one update may do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StreamingSettings {
    /// Radius of the required square, in chunks
    pub render_distance: u32,
    /// Maximum generations plus meshings per update, `None` for no limit
    pub operations_per_update: Option<usize>,
    /// Worker threads for terrain generation; zero generates inline
    pub worker_threads: usize,
}

/// What one streaming update did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamingReport {
    /// Chunks generated inline
    pub generated: usize,
    /// Chunks handed to workers
    pub dispatched: usize,
    /// Chunks committed from workers; results for chunks no longer required are not counted
    pub committed: usize,
    /// Chunks meshed and uploaded
    pub meshed: usize,
    /// Meshes dropped because their chunk left range
    pub unloaded: usize,
    /// Meshes released because their chunk was evicted
    pub evicted: usize,
    /// Required chunks still lacking a current mesh after the update
    pub pending: usize,
}

/// Drives generation, meshing and unloading around an observer.
pub struct ChunkStreamer {
    settings: StreamingSettings,
    noise: Arc<dyn NoiseSource>,
    task_manager: Option<TaskManager>,
    /// Chunks dispatched to workers whose results have not come back
    pending_generation: HashSet<ChunkCoord>,
    /// Chunks whose meshes are currently drawn
    render_set: HashSet<ChunkCoord>,
    observer_chunk: Option<ChunkCoord>,
    converged: bool,
}

impl ChunkStreamer {
    /// Creates a streamer, spawning workers if the settings ask for them.
    pub fn new(settings: StreamingSettings, noise: Arc<dyn NoiseSource>) -> Self {
        let task_manager = (settings.worker_threads > 0).then(|| TaskManager::new(settings.worker_threads));
        Self {
            settings,
            noise,
            task_manager,
            pending_generation: HashSet::new(),
            render_set: HashSet::new(),
            observer_chunk: None,
            converged: false,
        }
    }

    /// The settings this streamer was built with.
    pub fn settings(&self) -> &StreamingSettings {
        &self.settings
    }

    /// The chunk the observer occupied at the last update.
    pub fn observer_chunk(&self) -> Option<ChunkCoord> {
        self.observer_chunk
    }

    /// Whether the last update left every required chunk meshed and nothing in flight.
    pub fn is_converged(&self) -> bool {
        self.converged
    }

    /// Whether `coord` is in the render set.
    pub fn is_rendered(&self, coord: ChunkCoord) -> bool {
        self.render_set.contains(&coord)
    }

    /// Coordinates in the render set, sorted.
    pub fn rendered_coords(&self) -> Vec<ChunkCoord> {
        let mut coords: Vec<_> = self.render_set.iter().copied().collect();
        coords.sort();
        coords
    }

    /// Runs one streaming update for an observer at `observer`.
    ///
    /// # Arguments
    /// * `world` - The chunk store
    /// * `backend` - Receives mesh uploads and releases
    /// * `layout` - Atlas geometry for the mesher
    /// * `observer` - World-space position of the observer
    pub fn update(
        &mut self,
        world: &mut World,
        backend: &mut dyn RenderBackend,
        layout: &AtlasLayout,
        observer: Point3<f32>,
    ) -> StreamingReport {
        let mut report = StreamingReport::default();
        let center = ChunkCoord::containing(observer);
        if self.observer_chunk != Some(center) {
            info!("Observer entered chunk ({}, {})", center.idx, center.idz);
            self.observer_chunk = Some(center);
        }

        let required = center.square_around(self.settings.render_distance);
        let required_set: HashSet<ChunkCoord> = required.iter().copied().collect();

        report.unloaded = self.unload_out_of_range(world, backend, &required_set);

        for coord in required.iter().rev() {
            world.promote(*coord);
        }

        if let Some(task_manager) = self.task_manager.as_mut() {
            let mut context = ResultContext::new(world, &required_set);
            task_manager.process_completed_tasks(&mut context);
            report.committed = context.committed;
            for coord in &context.finished {
                self.pending_generation.remove(coord);
            }
        }

        let mut budget = self.settings.operations_per_update.unwrap_or(usize::MAX);

        for coord in &required {
            if world.contains(*coord) || self.pending_generation.contains(coord) {
                continue;
            }
            match self.task_manager.as_mut() {
                Some(task_manager) => {
                    task_manager.publish_task(Box::new(ChunkGenerationTask::new(
                        Arc::clone(&self.noise),
                        *coord,
                    )));
                    self.pending_generation.insert(*coord);
                    report.dispatched += 1;
                }
                None => {
                    if budget == 0 {
                        break;
                    }
                    world.insert_chunk(Chunk::generate(*coord, self.noise.as_ref()));
                    report.generated += 1;
                    budget -= 1;
                }
            }
        }

        if let Some(task_manager) = self.task_manager.as_mut() {
            task_manager.process_queued_tasks();
        }

        for coord in &required {
            if budget == 0 {
                break;
            }
            if self.mesh_chunk(world, backend, layout, *coord) {
                report.meshed += 1;
                budget -= 1;
            }
        }

        for mesh in world.drain_evicted_meshes() {
            backend.release_mesh(mesh.handle);
            report.evicted += 1;
        }
        self.render_set.retain(|coord| world.contains(*coord));

        report.pending = required
            .iter()
            .filter(|coord| {
                world
                    .get_chunk(**coord)
                    .map_or(true, |chunk| !chunk.has_current_mesh())
            })
            .count();
        self.converged = report.pending == 0 && self.pending_generation.is_empty();

        debug!("Streaming update: {:?}", report);
        report
    }

    /// Drops meshes of rendered chunks outside `required`.
    fn unload_out_of_range(
        &mut self,
        world: &mut World,
        backend: &mut dyn RenderBackend,
        required: &HashSet<ChunkCoord>,
    ) -> usize {
        let leaving: Vec<ChunkCoord> = self
            .render_set
            .iter()
            .filter(|coord| !required.contains(coord))
            .copied()
            .collect();

        let mut unloaded = 0;
        for coord in leaving {
            self.render_set.remove(&coord);
            if let Some(mesh) = world.get_chunk_mut(coord).and_then(Chunk::take_mesh) {
                backend.release_mesh(mesh.handle);
                unloaded += 1;
            }
        }
        unloaded
    }

    /// Meshes and uploads the chunk at `coord` if it lacks a current mesh.
    ///
    /// # Returns
    /// `true` if a mesh was built.
    fn mesh_chunk(
        &mut self,
        world: &mut World,
        backend: &mut dyn RenderBackend,
        layout: &AtlasLayout,
        coord: ChunkCoord,
    ) -> bool {
        let vertices = match world.get_chunk(coord) {
            Some(chunk) if !chunk.has_current_mesh() => generate_mesh(chunk, &*world, layout),
            _ => return false,
        };

        let handle = backend.upload_mesh(coord, &vertices);
        let mesh = ChunkMesh {
            handle,
            vertex_count: vertices.len() as u32,
        };

        if let Some(chunk) = world.get_chunk_mut(coord) {
            if let Some(stale) = chunk.replace_mesh(mesh) {
                backend.release_mesh(stale.handle);
            }
        }
        self.render_set.insert(coord);
        true
    }

    /// Builds the frame's draw list: rendered chunks with geometry that pass the frustum test.
    pub fn draw_list(&self, world: &World, frustum: &Frustum) -> Vec<ChunkDraw> {
        let mut draws: Vec<ChunkDraw> = self
            .render_set
            .iter()
            .filter(|coord| frustum.is_chunk_visible(**coord))
            .filter_map(|coord| {
                let mesh = *world.get_chunk(*coord)?.mesh()?;
                (mesh.vertex_count > 0).then_some(ChunkDraw { coord: *coord, mesh })
            })
            .collect();
        draws.sort_by_key(|draw| draw.coord);
        draws
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::{rendering::headless::HeadlessBackend, voxels::noise::ConstantNoise};

    fn streamer(render_distance: u32, operations_per_update: Option<usize>) -> ChunkStreamer {
        ChunkStreamer::new(
            StreamingSettings {
                render_distance,
                operations_per_update,
                worker_threads: 0,
            },
            Arc::new(ConstantNoise(0.3)),
        )
    }

    #[test]
    fn budget_spreads_work_over_updates() {
        let mut streamer = streamer(1, Some(4));
        let mut world = World::new(None);
        let mut backend = HeadlessBackend::new();
        let layout = AtlasLayout::default();
        let observer = Point3::new(8.0, 60.0, 8.0);

        let first = streamer.update(&mut world, &mut backend, &layout, observer);
        assert_eq!(first.generated, 4);
        assert_eq!(first.meshed, 0);
        assert!(!streamer.is_converged());

        let mut updates = 1;
        while !streamer.is_converged() {
            let report = streamer.update(&mut world, &mut backend, &layout, observer);
            assert!(report.generated + report.meshed <= 4);
            updates += 1;
            assert!(updates < 20, "streaming never converged");
        }
        assert_eq!(streamer.rendered_coords().len(), 9);
    }

    #[test]
    fn late_neighbors_trigger_remesh() {
        let mut streamer = streamer(0, None);
        let mut world = World::new(None);
        let mut backend = HeadlessBackend::new();
        let layout = AtlasLayout::default();

        streamer.update(&mut world, &mut backend, &layout, Point3::new(8.0, 60.0, 8.0));
        let origin = ChunkCoord::new(0, 0);
        let before = world.get_chunk(origin).unwrap().mesh().unwrap().vertex_count;

        world.insert_chunk(Chunk::generate(ChunkCoord::new(1, 0), &ConstantNoise(0.3)));
        assert!(world.get_chunk(origin).unwrap().needs_remesh());

        let report = streamer.update(&mut world, &mut backend, &layout, Point3::new(8.0, 60.0, 8.0));
        assert_eq!(report.meshed, 1);
        let after = world.get_chunk(origin).unwrap().mesh().unwrap().vertex_count;
        assert!(after < before);
        assert_eq!(backend.live_meshes(), 1);
    }
}
