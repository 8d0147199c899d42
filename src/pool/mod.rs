//! Bounded pooling of reusable, closeable resources.
//!
//! The pool caches at most a fixed number of idle resources. Acquisition
//! never blocks: a cache miss invokes the caller-supplied factory, and a
//! release into a full pool closes the resource instead of queueing it.

pub mod resource;

// Re-export key types from resource
pub use resource::{BoxError, PoolError, Resource, ResourcePool};
