//! # View Frustum
//!
//! Six planes extracted from a combined view-projection matrix (Gribb and
//! Hartmann's method). Planes point inward and are normalized, so plugging a
//! point into a plane gives its signed distance from it.

use cgmath::{Matrix, Point3};

use crate::engine_state::{
    math::{normalize_plane, plane_distance, Mat4f, Vec4f},
    voxels::chunk::ChunkCoord,
};

/// Names the six frustum planes, in storage order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrustumPlane {
    /// Near clipping plane
    Near = 0,
    /// Far clipping plane
    Far,
    /// Left side
    Left,
    /// Right side
    Right,
    /// Top side
    Top,
    /// Bottom side
    Bottom,
}

/// The region of space visible through a camera.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frustum {
    planes: [Vec4f; 6],
}

impl Frustum {
    /// Extracts the frustum of a view-projection matrix whose depth range is `[0, 1]`.
    pub fn from_matrix(transform: &Mat4f) -> Self {
        let r0 = transform.row(0);
        let r1 = transform.row(1);
        let r2 = transform.row(2);
        let r3 = transform.row(3);

        let planes = [
            r2,      // near: 0 <= z
            r3 - r2, // far: z <= w
            r3 + r0, // left: -w <= x
            r3 - r0, // right: x <= w
            r3 - r1, // top: y <= w
            r3 + r1, // bottom: -w <= y
        ]
        .map(normalize_plane);

        Self { planes }
    }

    /// One of the six planes.
    pub fn plane(&self, which: FrustumPlane) -> Vec4f {
        self.planes[which as usize]
    }

    /// All six planes, in [`FrustumPlane`] order.
    pub fn planes(&self) -> &[Vec4f; 6] {
        &self.planes
    }

    /// Whether `point` is strictly inside every plane.
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        self.planes
            .iter()
            .all(|plane| plane_distance(*plane, point) > 0.0)
    }

    /// Conservative visibility test for an axis-aligned box.
    ///
    /// The box passes when, for every plane, at least one of its eight corners
    /// is on the inner side. Boxes wholly outside any single plane are always
    /// rejected; some boxes near frustum edges pass without being visible.
    pub fn is_box_visible(&self, min: Point3<f32>, max: Point3<f32>) -> bool {
        let corners = [
            Point3::new(min.x, min.y, min.z),
            Point3::new(max.x, min.y, min.z),
            Point3::new(min.x, max.y, min.z),
            Point3::new(max.x, max.y, min.z),
            Point3::new(min.x, min.y, max.z),
            Point3::new(max.x, min.y, max.z),
            Point3::new(min.x, max.y, max.z),
            Point3::new(max.x, max.y, max.z),
        ];

        self.planes.iter().all(|plane| {
            corners
                .iter()
                .any(|corner| plane_distance(*plane, *corner) >= 0.0)
        })
    }

    /// Visibility test for a chunk's full-height column.
    pub fn is_chunk_visible(&self, coord: ChunkCoord) -> bool {
        let (min, max) = coord.bounds();
        self.is_box_visible(min, max)
    }
}
