//! Rendering system for the voxel engine.
//!
//! The engine never talks to a GPU API directly. Everything it needs from one
//! is expressed by the [`RenderBackend`] trait: upload a vertex list and get a
//! handle back, release a handle, set the view-projection transform, and draw
//! a list of chunk meshes. [`headless::HeadlessBackend`] implements it on the
//! CPU for tools and tests.
//!
//! ## Key Components
//! - `meshing`: converts chunk blocks into vertex lists
//! - `texture`: atlas collaborator and UV layout
//! - `vertex`: the vertex format shared by the mesher and backends

use cgmath::Matrix4;

use super::voxels::chunk::ChunkCoord;

pub mod headless;
pub mod meshing;
pub mod texture;
pub mod vertex;

// Re-export commonly used types
pub use texture::{AtlasLayout, TextureAtlas};
pub use vertex::Vertex;

/// Opaque handle to a vertex buffer owned by a render backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(pub u64);

/// The render-data cache entry of one chunk.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ChunkMesh {
    /// Backend buffer holding the chunk's vertices
    pub handle: MeshHandle,
    /// Number of vertices in the buffer
    pub vertex_count: u32,
}

/// One entry of a frame's draw list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ChunkDraw {
    /// The chunk being drawn
    pub coord: ChunkCoord,
    /// Its uploaded mesh
    pub mesh: ChunkMesh,
}

/// The GPU-side collaborator.
///
/// Implementations are expected to depth test and to cull back faces; the
/// mesher emits front faces counter-clockwise in the right-handed world frame.
pub trait RenderBackend {
    /// Uploads the texture atlas image.
    fn upload_atlas(&mut self, atlas: &dyn TextureAtlas);

    /// Uploads a chunk's vertex list.
    ///
    /// # Returns
    /// A handle that stays valid until passed to [`RenderBackend::release_mesh`].
    fn upload_mesh(&mut self, coord: ChunkCoord, vertices: &[Vertex]) -> MeshHandle;

    /// Frees the buffer behind `handle`.
    fn release_mesh(&mut self, handle: MeshHandle);

    /// Sets the view-projection transform used by subsequent draws.
    fn set_transform(&mut self, transform: &Matrix4<f32>);

    /// Draws one frame's worth of chunk meshes.
    fn draw_chunks(&mut self, draws: &[ChunkDraw]);
}
