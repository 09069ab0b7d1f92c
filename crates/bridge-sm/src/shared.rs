//! Serialized access to a registry shared between threads.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::{collaborators::NoopBondHook, registry::Registry};

/// A handle to a registry that runs every operation as one indivisible unit.
///
/// Clones share the same registry.
#[derive(Debug)]
pub struct SharedRegistry<O, L, H = NoopBondHook> {
    inner: Arc<Mutex<Registry<O, L, H>>>,
}

impl<O, L, H> Clone for SharedRegistry<O, L, H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<O, L, H> SharedRegistry<O, L, H> {
    /// Wraps `registry`.
    pub fn new(registry: Registry<O, L, H>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    /// Runs `f` with exclusive access to the registry.
    ///
    /// No other operation observes the registry until `f` returns.
    pub fn with<R>(&self, f: impl FnOnce(&mut Registry<O, L, H>) -> R) -> R {
        trace!("acquiring registry lock");
        let mut registry = self.inner.lock();
        trace!("acquired registry lock");

        f(&mut registry)
    }

    /// Unwraps the registry if this is the last handle.
    pub fn try_into_inner(self) -> Result<Registry<O, L, H>, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}
