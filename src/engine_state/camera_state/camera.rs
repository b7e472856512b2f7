//! # Camera Implementation
//!
//! This module contains the core camera implementation including:
//! - Camera representation and orientation
//! - Projection matrix handling
//! - Camera controller for input processing
//!
//! ## Key Components
//! - `Camera`: position, pitch and yaw, plus everything derived from them on `update`
//! - `Projection`: perspective projection settings
//! - `CameraController`: turns player actions into camera motion
//!
//! The derived state (forward/right/up vectors, view-projection transform and
//! frustum) is only refreshed by [`Camera::update`], so callers can batch any
//! number of rotations and translations per frame.

use std::f32::consts::FRAC_PI_2;

use cgmath::*;
use web_time::Duration;

use super::frustum::Frustum;
use crate::engine_state::{math, PlayerAction};

/// Represents a first-person camera in 3D space.
#[derive(Debug)]
pub struct Camera {
    /// The camera's position in world space
    position: Point3<f32>,
    /// Vertical rotation (around X axis) in radians
    pitch: Rad<f32>,
    /// Horizontal rotation (around Y axis) in radians
    yaw: Rad<f32>,
    /// Projection settings
    projection: Projection,
    /// Normalized vector pointing to the camera's forward
    forward: Vector3<f32>,
    /// Normalized vector pointing to the camera's right
    right: Vector3<f32>,
    /// Normalized vector pointing to the camera's up
    up: Vector3<f32>,
    /// View-projection transform as of the last update
    transform: Matrix4<f32>,
    /// Frustum as of the last update
    frustum: Frustum,
}

impl Camera {
    /// Creates a camera at `position` facing down negative Z.
    ///
    /// # Arguments
    /// * `position` - Initial position of the camera in world space
    /// * `projection` - Projection settings
    pub fn new<V: Into<Point3<f32>>>(position: V, projection: Projection) -> Self {
        let transform = Matrix4::identity();
        let mut camera = Self {
            position: position.into(),
            pitch: Rad(0.0),
            yaw: Rad(0.0),
            projection,
            forward: -Vector3::unit_z(),
            right: Vector3::unit_x(),
            up: Vector3::unit_y(),
            transform,
            frustum: Frustum::from_matrix(&transform),
        };
        camera.update();
        camera
    }

    /// Accumulates a rotation. Takes effect on the next [`Camera::update`].
    pub fn rotate<P: Into<Rad<f32>>, Y: Into<Rad<f32>>>(&mut self, pitch_delta: P, yaw_delta: Y) {
        self.pitch += pitch_delta.into();
        self.yaw += yaw_delta.into();
    }

    /// Moves the camera by `offset`. Takes effect on the next [`Camera::update`].
    pub fn translate(&mut self, offset: Vector3<f32>) {
        self.position += offset;
    }

    /// Teleports the camera. Takes effect on the next [`Camera::update`].
    pub fn set_position(&mut self, position: Point3<f32>) {
        self.position = position;
    }

    /// Recomputes the direction vectors, transform and frustum.
    ///
    /// Pitch is clamped to ±90° first so the view never flips over the poles.
    pub fn update(&mut self) {
        self.pitch = Rad(self.pitch.0.clamp(-FRAC_PI_2, FRAC_PI_2));

        let rotation = math::rotation(self.pitch, self.yaw);
        self.forward = (rotation * -Vector3::unit_z()).normalize();
        self.right = (rotation * Vector3::unit_x()).normalize();
        self.up = (rotation * Vector3::unit_y()).normalize();

        let view = math::look_to(Point3::origin(), self.forward, self.up);
        let to_eye = math::translation(Point3::origin() - self.position);
        self.transform = self.projection.calc_matrix() * view * to_eye;
        self.frustum = Frustum::from_matrix(&self.transform);
    }

    /// The camera's position in world space.
    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    /// Pitch after the last update's clamp.
    pub fn pitch(&self) -> Rad<f32> {
        self.pitch
    }

    /// Accumulated yaw.
    pub fn yaw(&self) -> Rad<f32> {
        self.yaw
    }

    /// Forward direction, pitch included.
    pub fn forward(&self) -> Vector3<f32> {
        self.forward
    }

    /// Right direction.
    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    /// Camera-relative up direction.
    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    /// View-projection transform.
    pub fn transform(&self) -> &Matrix4<f32> {
        &self.transform
    }

    /// View frustum.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Projection settings.
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Adapts the projection to a new viewport and refreshes the transform and frustum.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
        self.update();
    }
}

/// Represents a camera's projection matrix and related parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Aspect ratio (width / height)
    aspect: f32,
    /// Vertical field of view in radians
    fovy: Rad<f32>,
    /// Near clipping plane distance
    znear: f32,
    /// Far clipping plane distance
    zfar: f32,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `fovy` - Vertical field of view (can be any type convertible to `Rad<f32>`)
    /// * `aspect` - Aspect ratio (width / height)
    /// * `znear` - Near clipping plane distance
    /// * `zfar` - Far clipping plane distance
    pub fn new<F: Into<Rad<f32>>>(fovy: F, aspect: f32, znear: f32, zfar: f32) -> Self {
        debug_assert!(znear > 0.0 && zfar > znear);
        Self {
            aspect,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    /// Updates the projection's aspect ratio for viewport resizing.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Aspect ratio (width / height).
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Calculates the projection matrix, with depth in `[0, 1]`.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        math::perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// Handles camera movement and rotation based on user input.
///
/// This struct tracks the current state of movement keys and mouse input,
/// and applies them to the camera when updated.
#[derive(Debug)]
pub struct CameraController {
    // Movement amounts (normalized)
    amount_left: f32,
    amount_right: f32,
    amount_forward: f32,
    amount_backward: f32,
    amount_up: f32,
    amount_down: f32,

    // Rotation amounts (in radians)
    rotate_horizontal: f32,
    rotate_vertical: f32,

    // Configuration
    speed: f32,
    sensitivity: f32,
}

impl CameraController {
    /// Creates a new camera controller with the given speed and sensitivity.
    ///
    /// # Arguments
    /// * `speed` - Movement speed in world units per second
    /// * `sensitivity` - Radians of rotation per unit of mouse motion
    pub fn new(speed: f32, sensitivity: f32) -> Self {
        Self {
            amount_left: 0.0,
            amount_right: 0.0,
            amount_forward: 0.0,
            amount_backward: 0.0,
            amount_up: 0.0,
            amount_down: 0.0,
            rotate_horizontal: 0.0,
            rotate_vertical: 0.0,
            speed,
            sensitivity,
        }
    }

    /// Processes player actions and updates controller state accordingly.
    pub fn intake_actions(&mut self, actions: &PlayerAction) {
        let amount = |active: bool| if active { 1.0 } else { 0.0 };
        self.amount_forward = amount(actions.move_forward);
        self.amount_backward = amount(actions.move_backward);
        self.amount_left = amount(actions.move_left);
        self.amount_right = amount(actions.move_right);
        self.amount_up = amount(actions.move_up);
        self.amount_down = amount(actions.move_down);

        if let Some((delta_x, delta_y)) = actions.rotate_view {
            self.rotate_horizontal += delta_x as f32 * self.sensitivity;
            self.rotate_vertical += delta_y as f32 * self.sensitivity;
        }
    }

    /// Checks if there are any pending updates that would affect the camera.
    pub fn has_updates(&self) -> bool {
        self.amount_forward > 0.0
            || self.amount_backward > 0.0
            || self.amount_left > 0.0
            || self.amount_right > 0.0
            || self.amount_up > 0.0
            || self.amount_down > 0.0
            || self.rotate_horizontal != 0.0
            || self.rotate_vertical != 0.0
    }

    /// Applies pending motion to `camera` and resets the rotation accumulators.
    ///
    /// Forward movement follows the camera's pitch; up and down move along the
    /// world Y axis. Mouse motion to the right turns right and motion down
    /// looks down. The camera is not updated here.
    ///
    /// # Arguments
    /// * `camera` - The camera to move
    /// * `dt` - Time elapsed since the last update
    pub fn apply(&mut self, camera: &mut Camera, dt: Duration) {
        let step = self.speed * dt.as_secs_f32();

        let offset = camera.forward() * (self.amount_forward - self.amount_backward)
            + camera.right() * (self.amount_right - self.amount_left)
            + Vector3::unit_y() * (self.amount_up - self.amount_down);
        camera.translate(offset * step);

        camera.rotate(Rad(-self.rotate_vertical), Rad(-self.rotate_horizontal));
        self.rotate_horizontal = 0.0;
        self.rotate_vertical = 0.0;
    }
}
