//! Key derivation for node identity.
//!
//! A node's identity is the key returned by its graph's [`KeyFn`], never the
//! value's own equality. Two values that derive the same key are the same node.

use std::fmt;
use std::sync::Arc;

/// Shared, thread-safe function mapping a node value to its key.
pub struct KeyFn<V, K> {
    inner: Arc<dyn Fn(&V) -> K + Send + Sync>,
}

impl<V, K> KeyFn<V, K> {
    /// Wraps a custom key-derivation function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&V) -> K + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Derives the key of `value`.
    pub fn derive(&self, value: &V) -> K {
        (self.inner)(value)
    }
}

impl<V> KeyFn<V, V>
where
    V: Clone + 'static,
{
    /// Default strategy: the value is its own key.
    pub fn identity() -> Self {
        Self::new(V::clone)
    }
}

impl<V, K> Clone for KeyFn<V, K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V, K> fmt::Debug for KeyFn<V, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyFn").finish_non_exhaustive()
    }
}
