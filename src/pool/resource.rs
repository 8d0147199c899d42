//! Resource pool for reusable resources like connections, buffers, etc.
//!
//! Resources are created lazily by a caller-supplied factory, handed out
//! with exclusive ownership, and retained on release only while the idle
//! store has room; overflow and shutdown close resources instead.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::{debug, info, trace, warn};
use parking_lot::Mutex;
use thiserror::Error;

/// An opaque, caller-originated failure cause carried through the pool.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error returned by pool operations
#[derive(Error, Debug)]
pub enum PoolError {
    /// The pool was constructed with a capacity of zero
    #[error("pool capacity must be greater than zero")]
    InvalidCapacity,

    /// The pool has been closed
    #[error("resource pool is closed")]
    Closed,

    /// The factory failed to create a new resource
    #[error("failed to create resource: {0}")]
    CreationFailed(#[source] BoxError),

    /// A resource failed to close; the pool itself remains usable
    #[error("failed to close resource: {0}")]
    CloseFailed(#[source] BoxError),
}

/// A trait for resources that can be pooled.
///
/// Closing is the only capability the pool depends on; validation, reset,
/// and health checks are deliberately out of its scope.
pub trait Resource: Send + 'static {
    /// Close the resource when it's no longer needed
    fn close(&mut self) -> Result<(), BoxError>;
}

/// A bounded pool of reusable resources.
///
/// At most `capacity` idle resources are retained. `acquire` and `release`
/// never block: a miss falls through to the factory and an overflow closes
/// the released resource. Ownership is exclusive from `acquire` until the
/// matching `release`.
pub struct ResourcePool<R: Resource> {
    /// Creates a new resource on a cache miss; never retried
    factory: Box<dyn Fn() -> Result<R, BoxError> + Send + Sync>,

    /// Sending half of the bounded idle store
    idle_tx: Sender<R>,

    /// Receiving half of the bounded idle store
    idle_rx: Receiver<R>,

    /// Maximum number of idle resources retained
    capacity: usize,

    /// Whether the pool has been closed; guards the ordering between
    /// observing the flag and inserting into the idle store
    closed: Mutex<bool>,
}

impl<R: Resource> ResourcePool<R> {
    /// Create a new pool with the given factory and idle capacity.
    ///
    /// No resources are created up front; the factory runs on demand.
    pub fn new<F>(factory: F, capacity: usize) -> Result<Self, PoolError>
    where
        F: Fn() -> Result<R, BoxError> + Send + Sync + 'static,
    {
        if capacity == 0 {
            return Err(PoolError::InvalidCapacity);
        }

        info!("creating resource pool with capacity {}", capacity);

        let (idle_tx, idle_rx) = bounded(capacity);

        Ok(Self {
            factory: Box::new(factory),
            idle_tx,
            idle_rx,
            capacity,
            closed: Mutex::new(false),
        })
    }

    /// Acquire a resource, reusing an idle one when possible.
    ///
    /// Never blocks. On a miss the closed flag is checked before the
    /// factory fallback, so a closed pool always reports [`PoolError::Closed`]
    /// instead of creating fresh resources. Factory failures propagate as
    /// [`PoolError::CreationFailed`] and are not retried.
    pub fn acquire(&self) -> Result<R, PoolError> {
        match self.idle_rx.try_recv() {
            Ok(resource) => {
                trace!("acquire: reusing idle resource");
                Ok(resource)
            }
            Err(_) => {
                if *self.closed.lock() {
                    return Err(PoolError::Closed);
                }

                trace!("acquire: idle store empty, invoking factory");
                (self.factory)().map_err(PoolError::CreationFailed)
            }
        }
    }

    /// Return a resource to the pool.
    ///
    /// Never blocks. If the pool is closed or the idle store is full, the
    /// resource is closed instead and that close's outcome is returned.
    /// The mutex is held across the insert so a release can never race a
    /// concurrent close into putting a resource back into a sealed store.
    pub fn release(&self, resource: R) -> Result<(), PoolError> {
        let closed = self.closed.lock();

        if *closed {
            debug!("release: pool is closed, closing resource");
            return close_resource(resource);
        }

        match self.idle_tx.try_send(resource) {
            Ok(()) => {
                trace!("release: resource returned to idle store");
                Ok(())
            }
            Err(TrySendError::Full(resource)) => {
                debug!("release: idle store full, closing resource");
                close_resource(resource)
            }
            // The pool owns the receiving half, so a disconnect cannot
            // happen while the pool is alive; treat it like overflow.
            Err(TrySendError::Disconnected(resource)) => close_resource(resource),
        }
    }

    /// Close the pool, draining and closing every idle resource.
    ///
    /// Returns [`PoolError::Closed`] if the pool was already closed. The
    /// drain is best-effort: the first close failure is returned, but all
    /// remaining idle resources are still closed.
    pub fn close(&self) -> Result<(), PoolError> {
        let mut closed = self.closed.lock();

        if *closed {
            return Err(PoolError::Closed);
        }
        *closed = true;

        info!("closing resource pool, draining idle store");

        let mut first_failure = None;
        while let Ok(mut resource) = self.idle_rx.try_recv() {
            if let Err(cause) = resource.close() {
                warn!("failed to close idle resource during shutdown: {}", cause);
                if first_failure.is_none() {
                    first_failure = Some(PoolError::CloseFailed(cause));
                }
            }
        }

        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Get the current number of idle resources
    pub fn idle_count(&self) -> usize {
        self.idle_rx.len()
    }

    /// Get the maximum number of idle resources the pool retains
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check if the pool has been closed
    pub fn is_closed(&self) -> bool {
        *self.closed.lock()
    }
}

/// Close a resource and map the failure into the pool's error space.
fn close_resource<R: Resource>(mut resource: R) -> Result<(), PoolError> {
    resource.close().map_err(PoolError::CloseFailed)
}
