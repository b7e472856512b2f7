//! # Voxel Task System
//!
//! Tasks related to voxel world generation. They run on the worker pool and
//! commit their output into the world on the main thread.

pub mod chunk_generation_task;
