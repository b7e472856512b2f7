//! # Task System Core Traits
//!
//! This module defines the fundamental building blocks of the task system.
//!
//! ## Core Components
//! - `Task`: Represents a unit of work that can be executed on a worker thread
//! - `TaskResult`: Represents the result of a completed task
//!
//! ## Task Lifecycle
//! 1. A `Task` is created and scheduled via `TaskManager::publish_task()`
//! 2. The task's `process()` method is called on a worker thread
//! 3. The task returns a boxed `TaskResult`
//! 4. The result's `handle_result()` is called on the main thread with a `ResultContext`
//! 5. The result can spawn follow-up tasks
//!
//! Results are the only way work reaches the world: workers never touch it.

use std::collections::HashSet;

use crate::engine_state::voxels::{chunk::ChunkCoord, world::World};

/// Main-thread state a batch of results is applied to.
pub struct ResultContext<'a> {
    /// The world owned by the main thread
    pub world: &'a mut World,
    /// Chunks still wanted; results for any other chunk are discarded
    pub wanted: &'a HashSet<ChunkCoord>,
    /// Chunks whose work finished in this batch, kept or discarded
    pub finished: Vec<ChunkCoord>,
    /// Chunks actually inserted into the world
    pub committed: usize,
}

impl<'a> ResultContext<'a> {
    /// Starts an empty batch over `world`.
    pub fn new(world: &'a mut World, wanted: &'a HashSet<ChunkCoord>) -> Self {
        Self {
            world,
            wanted,
            finished: Vec::new(),
            committed: 0,
        }
    }
}

/// A unit of work that can be executed on a worker thread.
///
/// Tasks should own all the data they need; they must not hold references to
/// state that the main thread may modify.
pub trait Task: Send {
    /// Processes the task and returns a result.
    ///
    /// Runs on a worker thread.
    ///
    /// # Returns
    /// A boxed `TaskResult` that will be processed on the main thread.
    fn process(&self) -> Box<dyn TaskResult + Send>;
}

/// The result of processing a `Task`.
///
/// Results are applied on the main thread, which is where all mutation of the
/// world happens.
pub trait TaskResult: Send {
    /// Commits the result.
    ///
    /// # Arguments
    /// * `context` - The world and the set of chunks still wanted
    ///
    /// # Returns
    /// Follow-up tasks to schedule (can be empty)
    fn handle_result(self: Box<Self>, context: &mut ResultContext<'_>) -> Vec<Box<dyn Task + Send>>;
}
