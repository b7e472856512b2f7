//! # Headless Backend
//!
//! A [`RenderBackend`] that keeps uploaded meshes in CPU memory instead of on a
//! GPU. It records everything the engine asks of it (transform, draw list,
//! buffer lifetimes) and tracks memory analytics the way a GPU buffer registry
//! would, which makes it the backend of choice for the demo binary and tests.
//!
//! ## Analytics
//!
//! * Bytes currently allocated and the high-water mark
//! * Number of uploads, releases and draw calls
//! * Releases of handles that were never issued or already freed

use std::collections::HashMap;

use cgmath::{Matrix4, SquareMatrix};

use super::{texture::TextureAtlas, ChunkDraw, MeshHandle, RenderBackend, Vertex};
use crate::engine_state::voxels::chunk::ChunkCoord;

/// Memory and call counters for a [`HeadlessBackend`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BackendAnalytics {
    /// Bytes held by live mesh buffers
    pub allocated_memory: u64,
    /// Largest value `allocated_memory` has reached
    pub peak_memory: u64,
    /// Number of mesh uploads
    pub uploads: u64,
    /// Number of mesh releases
    pub releases: u64,
    /// Number of `draw_chunks` calls
    pub frames_drawn: u64,
    /// Releases of unknown handles
    pub invalid_releases: u64,
}

/// A stored mesh buffer.
#[derive(Debug)]
struct StoredMesh {
    coord: ChunkCoord,
    vertices: Vec<Vertex>,
}

/// CPU-side render backend.
pub struct HeadlessBackend {
    meshes: HashMap<MeshHandle, StoredMesh>,
    next_handle: u64,
    atlas_size: Option<(u32, u32)>,
    transform: Matrix4<f32>,
    last_draws: Vec<ChunkDraw>,
    analytics: BackendAnalytics,
}

impl HeadlessBackend {
    /// Creates a backend with no buffers and an identity transform.
    pub fn new() -> Self {
        Self {
            meshes: HashMap::new(),
            next_handle: 1,
            atlas_size: None,
            transform: Matrix4::identity(),
            last_draws: Vec::new(),
            analytics: BackendAnalytics::default(),
        }
    }

    /// Number of mesh buffers currently alive.
    pub fn live_meshes(&self) -> usize {
        self.meshes.len()
    }

    /// Whether `handle` refers to a live buffer.
    pub fn is_live(&self, handle: MeshHandle) -> bool {
        self.meshes.contains_key(&handle)
    }

    /// The vertices stored behind `handle`.
    pub fn mesh_vertices(&self, handle: MeshHandle) -> Option<&[Vertex]> {
        self.meshes.get(&handle).map(|mesh| mesh.vertices.as_slice())
    }

    /// The chunk a live buffer was uploaded for.
    pub fn mesh_coord(&self, handle: MeshHandle) -> Option<ChunkCoord> {
        self.meshes.get(&handle).map(|mesh| mesh.coord)
    }

    /// The transform most recently set.
    pub fn transform(&self) -> &Matrix4<f32> {
        &self.transform
    }

    /// The draw list of the most recent frame.
    pub fn last_draws(&self) -> &[ChunkDraw] {
        &self.last_draws
    }

    /// Pixel size of the uploaded atlas.
    pub fn atlas_size(&self) -> Option<(u32, u32)> {
        self.atlas_size
    }

    /// Memory and call counters.
    pub fn analytics(&self) -> &BackendAnalytics {
        &self.analytics
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for HeadlessBackend {
    fn upload_atlas(&mut self, atlas: &dyn TextureAtlas) {
        debug_assert_eq!(
            atlas.rgba().len(),
            (atlas.width() * atlas.height() * 4) as usize
        );
        self.atlas_size = Some((atlas.width(), atlas.height()));
    }

    fn upload_mesh(&mut self, coord: ChunkCoord, vertices: &[Vertex]) -> MeshHandle {
        let handle = MeshHandle(self.next_handle);
        self.next_handle += 1;

        let size = bytemuck::cast_slice::<Vertex, u8>(vertices).len() as u64;
        self.analytics.allocated_memory += size;
        self.analytics.peak_memory = self.analytics.peak_memory.max(self.analytics.allocated_memory);
        self.analytics.uploads += 1;

        self.meshes.insert(
            handle,
            StoredMesh {
                coord,
                vertices: vertices.to_vec(),
            },
        );
        handle
    }

    fn release_mesh(&mut self, handle: MeshHandle) {
        match self.meshes.remove(&handle) {
            Some(mesh) => {
                let size = (mesh.vertices.len() * Vertex::STRIDE) as u64;
                self.analytics.allocated_memory -= size;
                self.analytics.releases += 1;
            }
            None => {
                log::warn!("Release of unknown mesh handle {:?}", handle);
                self.analytics.invalid_releases += 1;
            }
        }
    }

    fn set_transform(&mut self, transform: &Matrix4<f32>) {
        self.transform = *transform;
    }

    fn draw_chunks(&mut self, draws: &[ChunkDraw]) {
        debug_assert!(draws.iter().all(|draw| self.meshes.contains_key(&draw.mesh.handle)));
        self.last_draws.clear();
        self.last_draws.extend_from_slice(draws);
        self.analytics.frames_drawn += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::ChunkMesh;
    use cgmath::Point3;

    #[test]
    fn tracks_buffer_memory() {
        let mut backend = HeadlessBackend::new();
        let vertices = vec![Vertex::new(Point3::new(0.0, 0.0, 0.0), [0.0, 0.0], 1.0); 12];

        let first = backend.upload_mesh(ChunkCoord::new(0, 0), &vertices);
        let second = backend.upload_mesh(ChunkCoord::new(1, 0), &vertices[..6]);
        assert_ne!(first, second);
        assert_eq!(backend.analytics().allocated_memory, 18 * Vertex::STRIDE as u64);

        backend.release_mesh(first);
        assert!(!backend.is_live(first));
        assert_eq!(backend.analytics().allocated_memory, 6 * Vertex::STRIDE as u64);
        assert_eq!(backend.analytics().peak_memory, 18 * Vertex::STRIDE as u64);

        backend.release_mesh(first);
        assert_eq!(backend.analytics().invalid_releases, 1);
        assert_eq!(backend.mesh_coord(second), Some(ChunkCoord::new(1, 0)));
    }

    #[test]
    fn records_last_frame() {
        let mut backend = HeadlessBackend::new();
        let handle = backend.upload_mesh(ChunkCoord::new(0, 0), &[]);
        let draw = ChunkDraw {
            coord: ChunkCoord::new(0, 0),
            mesh: ChunkMesh { handle, vertex_count: 0 },
        };
        backend.draw_chunks(&[draw]);
        assert_eq!(backend.last_draws(), &[draw]);
        assert_eq!(backend.analytics().frames_drawn, 1);
    }
}
