//! # Application State Management
//!
//! This module handles the application's state management, including:
//! - Configuration loading
//! - Input handling
//! - Frame timing and the per-frame engine sequence

pub mod config;
pub mod input_manager;
pub mod input_state;

use config::EngineConfig;
use input_manager::InputManager;
use log::trace;
use web_time::{Duration, Instant};

use crate::engine_state::{
    rendering::{RenderBackend, TextureAtlas},
    voxels::streaming::StreamingReport,
    EngineState,
};

/// What one frame did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Streaming work performed this frame
    pub report: StreamingReport,
    /// Chunks handed to the backend after frustum culling
    pub drawn: usize,
}

/// The running application: input feeding an engine, paced by wall-clock time.
pub struct ApplicationState<B: RenderBackend> {
    /// The core engine state and logic
    pub engine_state: EngineState<B>,

    /// Manages input state and event processing
    pub input_manager: InputManager,

    /// Timestamp of the last frame for delta time calculations
    pub last_frame_time: Instant,
}

impl<B: RenderBackend> ApplicationState<B> {
    /// Builds the engine and uploads the atlas to `backend`.
    pub fn new(config: &EngineConfig, backend: B, atlas: &dyn TextureAtlas) -> Self {
        Self::from_engine(EngineState::new(config, backend, atlas))
    }

    /// Wraps an already constructed engine.
    pub fn from_engine(engine_state: EngineState<B>) -> Self {
        Self {
            engine_state,
            input_manager: InputManager::new(),
            last_frame_time: Instant::now(),
        }
    }

    /// Runs one frame using the wall-clock time since the previous one.
    pub fn frame(&mut self) -> FrameStats {
        let now = Instant::now();
        let dt = now - self.last_frame_time;
        self.last_frame_time = now;
        self.frame_with_delta(dt)
    }

    /// Runs one frame with an explicit time step.
    pub fn frame_with_delta(&mut self, dt: Duration) -> FrameStats {
        if let Some(processed_input) = self.input_manager.get_and_reset_processed_input() {
            self.engine_state.set_input_commands(processed_input);
        }

        self.engine_state.process_input(dt);
        let report = self.engine_state.update();
        let drawn = self.engine_state.render();
        trace!("Frame took {:?} of simulated time, drew {} chunks", dt, drawn);

        FrameStats { report, drawn }
    }

    /// Handles loss of window focus.
    pub fn focus_lost(&mut self) {
        self.input_manager.release_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::{headless::HeadlessBackend, texture::GeneratedAtlas};
    use input_state::Key;

    fn small_config() -> EngineConfig {
        EngineConfig {
            render_distance: 1,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn first_frame_streams_the_square() {
        let mut app = ApplicationState::new(&small_config(), HeadlessBackend::new(), &GeneratedAtlas::new(7));
        let stats = app.frame_with_delta(Duration::from_millis(16));

        assert_eq!(stats.report.generated, 9);
        assert_eq!(stats.report.pending, 0);
        assert!(stats.drawn > 0);
        assert!(app.engine_state.backend().atlas_size().is_some());
    }

    #[test]
    fn held_key_moves_camera() {
        let mut app = ApplicationState::new(&small_config(), HeadlessBackend::new(), &GeneratedAtlas::new(7));
        let start = app.engine_state.camera_state.camera.position();

        app.input_manager.intake_key(Key::Space, true);
        app.frame_with_delta(Duration::from_millis(500));
        app.frame_with_delta(Duration::from_millis(500));

        let end = app.engine_state.camera_state.camera.position();
        assert!(end.y > start.y + 5.0);
    }
}
