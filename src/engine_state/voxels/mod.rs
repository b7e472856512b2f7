//! # Voxel World
//!
//! This module contains everything that represents and maintains the voxel
//! world itself.
//!
//! ## Architecture
//!
//! * **Block**: the closed catalog of block types and their visibility classes
//! * **Chunk**: fixed 16×255×16 block columns and their terrain generation
//! * **Noise**: the seeded height field terrain is generated from
//! * **World**: the coordinate-keyed store that owns every loaded chunk
//! * **Streaming**: decides which chunks are generated, meshed and unloaded as the observer moves
//! * **Tasks**: worker-thread chunk generation
//!
//! ## Data Flow
//!
//! 1. The streamer computes the chunks required around the observer
//! 2. Missing chunks are generated from noise, inline or on workers
//! 3. Generated chunks are committed into the world on the main thread
//! 4. Chunks lacking a current mesh are meshed and uploaded to the render backend
//! 5. Chunks that leave range lose their mesh but keep their blocks

pub mod block;
pub mod chunk;
pub mod noise;
pub mod streaming;
pub mod tasks;
pub mod world;
