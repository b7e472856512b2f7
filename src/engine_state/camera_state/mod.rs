//! # Camera State Management
//!
//! This module handles all camera-related functionality including:
//! - Camera position and orientation tracking
//! - View and projection matrix calculations
//! - Player input processing for camera control
//! - View frustum extraction for chunk culling
//!
//! ## Core Components
//! - `Camera`: Represents the camera's position and orientation in 3D space
//! - `CameraController`: Handles player input and updates camera state
//! - `Projection`: Manages the camera's projection matrix
//! - `Frustum`: The six planes bounding what the camera can see

use camera::{Camera, CameraController, Projection};
use cgmath::Point3;

use super::{voxels::chunk::ChunkCoord, PlayerAction};

pub mod camera;
pub mod frustum;

/// Owns the camera and the controller that drives it.
pub struct CameraState {
    /// The current camera position and orientation
    pub camera: Camera,
    /// Handles player input and camera movement
    pub camera_controller: CameraController,
}

impl CameraState {
    /// Creates a camera at `position` with a fresh controller.
    ///
    /// # Arguments
    /// * `position` - Starting position in world space
    /// * `projection` - Projection settings
    /// * `speed` - Movement speed in world units per second
    /// * `sensitivity` - Radians of rotation per unit of mouse motion
    pub fn new(position: Point3<f32>, projection: Projection, speed: f32, sensitivity: f32) -> Self {
        CameraState {
            camera: Camera::new(position, projection),
            camera_controller: CameraController::new(speed, sensitivity),
        }
    }

    /// Processes player input actions and updates the camera controller state.
    pub fn intake_actions(&mut self, actions: &PlayerAction) {
        self.camera_controller.intake_actions(actions);
    }

    /// Applies pending controller motion and refreshes the camera.
    ///
    /// # Returns
    /// - `Some(CameraUpdates)` if the camera moved or turned
    /// - `None` if no updates were needed
    pub fn update(&mut self, dt: web_time::Duration) -> Option<CameraUpdates> {
        if !self.camera_controller.has_updates() {
            return None;
        }

        self.camera_controller.apply(&mut self.camera, dt);
        self.camera.update();

        Some(CameraUpdates {
            new_chunk_position: ChunkCoord::containing(self.camera.position()),
        })
    }
}

/// Represents updates to the camera's state that affect world streaming.
///
/// This is returned by `CameraState::update()` when the camera's position or
/// orientation has changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraUpdates {
    /// The chunk the camera now occupies
    pub new_chunk_position: ChunkCoord,
}
