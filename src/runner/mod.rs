//! Sequential task execution with deadline and interrupt handling.
//!
//! The runner executes an ordered task list on a single worker thread,
//! polling a cancellation token between tasks and racing the worker's
//! completion against a deadline armed at construction.

pub mod task;

// Re-export key types from task
pub use task::{RunnerError, TaskRunner};
