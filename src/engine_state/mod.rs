//! # Engine State Module
//!
//! The core engine module that manages the state and functionality of the voxel engine.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `camera_state` - Handles camera positioning, movement and the view frustum
//! * `math` - Transform helpers shared by the camera and frustum
//! * `rendering` - Vertex format, mesher, atlas layout and the render backend seam
//! * `task_management` - Manages worker threads
//! * `voxels` - Handles voxel data, chunks, world generation and streaming
//!
//! ## Frame Flow
//!
//! Input drives the camera; the camera's position drives streaming; the
//! camera's transform and frustum drive the draw list:
//!
//! ```text
//! set_input_commands -> process_input -> update -> render
//! ```

use std::sync::Arc;

use camera_state::{camera::Projection, CameraState, CameraUpdates};
use cgmath::{Deg, Point3};
use log::{debug, info};
use rendering::{AtlasLayout, RenderBackend, TextureAtlas};
use voxels::{
    chunk::ChunkCoord,
    noise::{NoiseSource, PerlinNoise},
    streaming::{ChunkStreamer, StreamingReport, StreamingSettings},
    world::World,
};

use crate::application_state::{
    config::EngineConfig,
    input_state::{Key, ProcessedInputState},
};

pub mod camera_state;
pub mod math;
pub mod rendering;
pub mod task_management;
pub mod voxels;

/// The main state container for the voxel engine
///
/// Owns the camera, the world, the streamer and the render backend, and
/// sequences them once per frame.
///
/// # Examples
///
/// ```ignore
/// let mut engine = EngineState::new(&config, HeadlessBackend::new(), &GeneratedAtlas::new(1));
///
/// loop {
///     engine.set_input_commands(input_manager.get_and_reset_processed_input());
///     engine.process_input(delta_time);
///     engine.update();
///     engine.render();
/// }
/// ```
pub struct EngineState<B: RenderBackend> {
    /// Camera state managing position, orientation and movement
    pub camera_state: CameraState,
    /// Current player actions derived from input
    pub player_actions: PlayerAction,
    /// The voxel world containing all chunk data
    pub world: World,
    /// Decides which chunks are generated, meshed and unloaded
    pub streamer: ChunkStreamer,
    /// The render backend every mesh and draw goes through
    backend: B,
    /// UV geometry of the uploaded atlas
    atlas_layout: AtlasLayout,
    /// Seed of the terrain height field
    seed: u32,
    /// Current chunk position of the player
    current_player_chunk_position: ChunkCoord,
}

impl<B: RenderBackend> EngineState<B> {
    /// Creates a new engine state with all subsystems initialized
    ///
    /// # Arguments
    ///
    /// * `config` - Validated engine configuration
    /// * `backend` - The render backend to draw with
    /// * `atlas` - Texture atlas, uploaded once here
    pub fn new(config: &EngineConfig, backend: B, atlas: &dyn TextureAtlas) -> Self {
        let seed = config.resolve_seed();
        info!("Creating engine with seed {}", seed);
        let noise: Arc<dyn NoiseSource> = Arc::new(PerlinNoise::new(seed));
        Self::with_noise_source(config, backend, atlas, noise)
    }

    /// Creates an engine over a caller-supplied height field.
    pub fn with_noise_source(
        config: &EngineConfig,
        mut backend: B,
        atlas: &dyn TextureAtlas,
        noise: Arc<dyn NoiseSource>,
    ) -> Self {
        let seed = noise.seed();
        backend.upload_atlas(atlas);

        let camera = &config.camera;
        let projection = Projection::new(
            Deg(camera.fov_degrees),
            camera.aspect_ratio,
            camera.z_near,
            camera.z_far,
        );
        let start = Point3::from(camera.start_position);
        let camera_state = CameraState::new(start, projection, camera.move_speed, camera.mouse_sensitivity);

        let streamer = ChunkStreamer::new(
            StreamingSettings {
                render_distance: config.render_distance,
                operations_per_update: config.chunk_operations_per_frame,
                worker_threads: config.worker_threads,
            },
            noise,
        );

        Self {
            camera_state,
            player_actions: PlayerAction::default(),
            world: World::new(config.retained_capacity()),
            streamer,
            backend,
            atlas_layout: AtlasLayout::from_atlas(atlas),
            seed,
            current_player_chunk_position: ChunkCoord::containing(start),
        }
    }

    /// Seed of the terrain height field.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// The render backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the render backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// The chunk the player currently occupies.
    pub fn player_chunk(&self) -> ChunkCoord {
        self.current_player_chunk_position
    }

    /// Adapts the camera to a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        debug!("Resizing viewport to {}x{}", width, height);
        self.camera_state.camera.resize(width, height);
    }

    /// Applies the current player actions to the camera.
    ///
    /// # Arguments
    ///
    /// * `dt` - The time elapsed since the last frame
    pub fn process_input(&mut self, dt: web_time::Duration) {
        self.camera_state.intake_actions(&self.player_actions);

        if let Some(CameraUpdates { new_chunk_position }) = self.camera_state.update(dt) {
            if self.current_player_chunk_position != new_chunk_position {
                debug!(
                    "Player moved from {:?} to {:?}",
                    self.current_player_chunk_position, new_chunk_position
                );
                self.current_player_chunk_position = new_chunk_position;
            }
        }
    }

    /// Streams the world around the camera.
    pub fn update(&mut self) -> StreamingReport {
        let position = self.camera_state.camera.position();
        self.streamer
            .update(&mut self.world, &mut self.backend, &self.atlas_layout, position)
    }

    /// Hands the transform and the frustum-culled draw list to the backend.
    ///
    /// # Returns
    /// The number of chunks drawn.
    pub fn render(&mut self) -> usize {
        let camera = &self.camera_state.camera;
        self.backend.set_transform(camera.transform());
        let draws = self.streamer.draw_list(&self.world, camera.frustum());
        self.backend.draw_chunks(&draws);
        draws.len()
    }

    /// Sets the input commands for the engine state.
    ///
    /// # Arguments
    /// * `input` - The processed input state to use for setting commands
    pub fn set_input_commands(&mut self, input: ProcessedInputState) {
        self.player_actions = Self::translate_processed_input(&input);
    }

    /// Translates the processed input state into player actions.
    fn translate_processed_input(input: &ProcessedInputState) -> PlayerAction {
        PlayerAction {
            move_forward: input.get_key_state(Key::W).is_active(),
            move_backward: input.get_key_state(Key::S).is_active(),
            move_left: input.get_key_state(Key::A).is_active(),
            move_right: input.get_key_state(Key::D).is_active(),
            move_up: input.get_key_state(Key::Space).is_active(),
            move_down: input.get_key_state(Key::Shift).is_active(),
            rotate_view: input.get_mouse_delta(),
        }
    }
}

/// Represents player actions derived from input
#[derive(Default, Debug, Clone, PartialEq)]
pub struct PlayerAction {
    /// Move along the view direction
    pub move_forward: bool,
    /// Move against the view direction
    pub move_backward: bool,
    /// Strafe left
    pub move_left: bool,
    /// Strafe right
    pub move_right: bool,
    /// Rise along world up
    pub move_up: bool,
    /// Sink along world up
    pub move_down: bool,

    /// Relative mouse motion this frame, if any
    pub rotate_view: Option<(f64, f64)>,
}
