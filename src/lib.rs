#![deny(warnings)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

//! # poolrun
//!
//! Two small, independent concurrency primitives for service code:
//!
//! - [`ResourcePool`]: a bounded cache of reusable, closeable resources.
//!   Resources are created lazily on a cache miss, handed out with
//!   exclusive ownership, and closed when the pool overflows or shuts down.
//! - [`TaskRunner`]: a single-shot sequential executor for an ordered task
//!   list, abandonable by a deadline and abortable between tasks through a
//!   [`CancelToken`].
//!
//! The two primitives do not depend on each other; callers wire each one
//! up directly with a factory function or a set of task closures.

/// Bounded pooling of reusable, closeable resources
pub mod pool;

/// Sequential task execution with deadline and interrupt handling
pub mod runner;

/// Synchronization primitives shared by the crate's components
pub mod sync;

// Re-export key types for easier access
pub use pool::{BoxError, PoolError, Resource, ResourcePool};
pub use runner::{RunnerError, TaskRunner};
pub use sync::CancelToken;
