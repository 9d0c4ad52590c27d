use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::{PoolKey, Render};

/// The shared instance stored in the pool for one key.
///
/// Holds the key it was created for and the intrinsic state built from that key. Neither is
/// ever modified after creation.
#[derive(Debug)]
pub(crate) struct Shared<K, S> {
    key: K,
    state: S,
}

impl<K, S> Shared<K, S> {
    pub(crate) fn new(key: K, state: S) -> Self {
        Self { key, state }
    }
}

/// A handle to the shared instance that an [`InstancePool`][crate::InstancePool] holds for a key.
///
/// Handles are cheap to clone. All handles obtained for equal keys from the same pool point at
/// the same instance, which can be verified with [`Pooled::ptr_eq()`]. The intrinsic state is
/// reachable through `Deref<Target = S>` and is read-only: there is no way to mutate a pooled
/// instance through a handle.
///
/// # Example
///
/// ```rust
/// use instance_pool::{InstancePool, Pooled, Vehicle, VehicleKind};
///
/// let pool = InstancePool::<VehicleKind, Vehicle>::new();
///
/// let compact = pool.acquire(VehicleKind::Compact).unwrap();
/// let suv = pool.acquire(VehicleKind::Suv).unwrap();
///
/// assert_eq!(compact.key(), VehicleKind::Compact);
/// assert_eq!(compact.kind(), VehicleKind::Compact);
/// assert!(!Pooled::ptr_eq(&compact, &suv));
/// ```
pub struct Pooled<K, S> {
    inner: Arc<Shared<K, S>>,
}

impl<K, S> Pooled<K, S>
where
    K: PoolKey,
{
    pub(crate) fn new(inner: Arc<Shared<K, S>>) -> Self {
        Self { inner }
    }

    /// The key this instance was created for.
    #[must_use]
    #[inline]
    pub fn key(&self) -> K {
        self.inner.key
    }

    /// The intrinsic state shared by every user of this key.
    #[must_use]
    #[inline]
    pub fn state(&self) -> &S {
        &self.inner.state
    }

    /// Whether two handles refer to the same pooled instance.
    ///
    /// This is an identity comparison, not a value comparison: two instances with equal state
    /// from two different pools are not the same instance.
    #[must_use]
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Combines the shared intrinsic state with caller-supplied extrinsic state.
    ///
    /// The extrinsic state is only borrowed for the duration of the call and is never stored
    /// in the pool.
    #[must_use]
    pub fn render<E>(&self, extrinsic: &E) -> S::Output
    where
        S: Render<E>,
        E: ?Sized,
    {
        self.inner.state.render(extrinsic)
    }
}

impl<K, S> Clone for Pooled<K, S> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, S> Deref for Pooled<K, S> {
    type Target = S;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.inner.state
    }
}

impl<K, S> fmt::Debug for Pooled<K, S>
where
    K: fmt::Debug,
    S: fmt::Debug,
{
    #[cfg_attr(test, mutants::skip)] // No API contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pooled")
            .field("key", &self.inner.key)
            .field("state", &self.inner.state)
            .finish()
    }
}
