//! # Transform Math
//!
//! Thin helpers over `cgmath` for the transforms the camera and frustum need.
//!
//! Conventions: right-handed world, column vectors, so a product reads right
//! to left. The projection maps depth to `[0, 1]`.

use cgmath::{Matrix3, Matrix4, Point3, Rad, Vector3, Vector4};

/// 4-component float vector, also used as a plane `(a, b, c, d)`.
pub type Vec4f = Vector4<f32>;
/// 4×4 float matrix.
pub type Mat4f = Matrix4<f32>;

/// Transformation matrix to convert from OpenGL's clip space to one with depth in `[0, 1]`.
///
/// This matrix performs two main transformations:
/// 1. Scales the Z coordinate from [-1, 1] to [-0.5, 0.5]
/// 2. Translates the Z coordinate from [-0.5, 0.5] to [0, 1]
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Mat4f = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Translation by `offset`.
pub fn translation(offset: Vector3<f32>) -> Mat4f {
    Matrix4::from_translation(offset)
}

/// Orientation from pitch (about X) then yaw (about Y). Roll is unused.
pub fn rotation(pitch: Rad<f32>, yaw: Rad<f32>) -> Matrix3<f32> {
    Matrix3::from_angle_y(yaw) * Matrix3::from_angle_x(pitch)
}

/// View matrix for an eye at `eye` looking along `direction`.
pub fn look_to(eye: Point3<f32>, direction: Vector3<f32>, up: Vector3<f32>) -> Mat4f {
    Matrix4::look_to_rh(eye, direction, up)
}

/// Perspective projection with depth mapped to `[0, 1]`.
pub fn perspective(fovy: Rad<f32>, aspect: f32, z_near: f32, z_far: f32) -> Mat4f {
    OPENGL_TO_WGPU_MATRIX * cgmath::perspective(fovy, aspect, z_near, z_far)
}

/// Dot product of the first three components of `a` with `b`.
#[inline]
pub fn dot3(a: Vec4f, b: Vector3<f32>) -> f32 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

/// Length of the first three components of `v`.
#[inline]
pub fn length3(v: Vec4f) -> f32 {
    (v.x * v.x + v.y * v.y + v.z * v.z).sqrt()
}

/// Scales a plane so its normal has unit length, making `dot3(plane, p) + plane.w`
/// a signed distance.
pub fn normalize_plane(plane: Vec4f) -> Vec4f {
    let length = length3(plane);
    debug_assert!(length > 0.0, "degenerate plane {:?}", plane);
    plane / length
}

/// Signed distance from a normalized plane to a point. Positive is inside.
#[inline]
pub fn plane_distance(plane: Vec4f, point: Point3<f32>) -> f32 {
    dot3(plane, Vector3::new(point.x, point.y, point.z)) + plane.w
}
