//! Synchronization primitives shared by the crate's components.

pub mod cancel;

// Re-export key types from cancel
pub use cancel::CancelToken;
