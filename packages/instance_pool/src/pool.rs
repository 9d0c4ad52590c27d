use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::{Arc, Mutex};

use foldhash::{HashMap, HashMapExt};
use tracing::{debug, trace};

use crate::{ERR_POISONED_LOCK, Error, PoolKey, Pooled, Result, Shared};

type Factory<K, S> = dyn Fn(K) -> S + Send + Sync;

struct PoolInner<K, S> {
    /// At most one shared instance per key. Entries are never replaced or removed.
    ///
    /// We use foldhash for better performance with small hash tables.
    instances: Mutex<HashMap<K, Arc<Shared<K, S>>>>,

    /// Builds the intrinsic state for a key the first time that key is acquired.
    factory: Box<Factory<K, S>>,
}

/// A pool that holds exactly one shared instance per key of a closed key set.
///
/// Instances are created lazily, the first time their key is [acquired][Self::acquire], and
/// live as long as the pool. There is no eviction.
///
/// This type acts as a cloneable handle to a shared pool. Multiple handles can exist
/// simultaneously and all of them see the same instances. There is no process-wide pool:
/// whoever needs one constructs it and passes it around.
///
/// # Construction
///
/// The intrinsic state of a new instance is built strictly from its key, either via
/// `S: From<K>` ([`new()`][Self::new]) or via a factory ([`with_factory()`][Self::with_factory]).
/// The factory runs while the pool is locked, so it must be quick and must not call back into
/// the same pool.
///
/// # Thread safety
///
/// The lookup and the insertion of a missing instance happen under one lock, so concurrent
/// callers acquiring the same key always receive the same instance.
///
/// # Example
///
/// ```rust
/// use instance_pool::{InstancePool, Pooled, Vehicle, VehicleKind};
///
/// let pool = InstancePool::<VehicleKind, Vehicle>::new();
///
/// let a1 = pool.acquire(VehicleKind::Subcompact).unwrap();
/// let _b = pool.acquire(VehicleKind::Compact).unwrap();
/// let a2 = pool.acquire(VehicleKind::Subcompact).unwrap();
///
/// assert!(Pooled::ptr_eq(&a1, &a2));
/// assert_eq!(pool.len(), 2);
/// ```
pub struct InstancePool<K, S> {
    inner: Arc<PoolInner<K, S>>,
}

impl<K, S> InstancePool<K, S>
where
    K: PoolKey,
    S: From<K> + 'static,
{
    /// Creates an empty pool that builds intrinsic state via `S::from(key)`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_factory(S::from)
    }
}

impl<K, S> InstancePool<K, S>
where
    K: PoolKey,
{
    /// Creates an empty pool that builds intrinsic state with the given factory.
    ///
    /// The factory runs while the pool is locked, so it must not call back into the same pool.
    ///
    /// # Panics
    ///
    /// The returned pool does not survive a panic in `factory`. Such a panic propagates out of
    /// [`acquire()`][Self::acquire] and poisons the pool, after which every operation on it,
    /// through any handle, panics.
    ///
    /// # Example
    ///
    /// ```rust
    /// use instance_pool::{InstancePool, PoolKey, VehicleKind};
    ///
    /// let pool = InstancePool::with_factory(|kind: VehicleKind| kind.name().len());
    ///
    /// assert_eq!(*pool.acquire(VehicleKind::Suv).unwrap(), 3);
    /// ```
    #[must_use]
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn(K) -> S + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(PoolInner {
                instances: Mutex::new(HashMap::new()),
                factory: Box::new(factory),
            }),
        }
    }

    /// Returns the shared instance for `key`, creating it if this is the first request for it.
    ///
    /// Every call with an equal key returns a handle to the same instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if `key` is not one of [`K::variants()`][PoolKey::variants].
    /// No instance is created in that case.
    ///
    /// # Panics
    ///
    /// Panics if the factory panics, or if an earlier factory panic has poisoned the pool.
    pub fn acquire(&self, key: K) -> Result<Pooled<K, S>> {
        if !key.is_valid() {
            return Err(Error::InvalidKey {
                key: format!("{key:?}"),
            });
        }

        let (shared, created) = {
            let mut instances = self.inner.instances.lock().expect(ERR_POISONED_LOCK);

            match instances.entry(key) {
                Entry::Occupied(entry) => (Arc::clone(entry.get()), false),
                Entry::Vacant(entry) => {
                    let state = (self.inner.factory)(key);
                    (Arc::clone(entry.insert(Arc::new(Shared::new(key, state)))), true)
                }
            }
        };

        // Logging may write to an output stream, so it stays outside the lock.
        if created {
            debug!(key = key.name(), "created pooled instance");
        } else {
            trace!(key = key.name(), "reusing pooled instance");
        }

        Ok(Pooled::new(shared))
    }

    /// Returns the shared instance for the key with the given canonical name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if no key carries the given name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use instance_pool::{InstancePool, Vehicle, VehicleKind};
    ///
    /// let pool = InstancePool::<VehicleKind, Vehicle>::new();
    ///
    /// assert_eq!(pool.acquire_named("suv").unwrap().kind(), VehicleKind::Suv);
    /// assert!(pool.acquire_named("tank").is_err());
    /// ```
    pub fn acquire_named(&self, name: &str) -> Result<Pooled<K, S>> {
        self.acquire(K::from_name(name)?)
    }

    /// Returns the number of distinct instances currently in the pool.
    ///
    /// Instances are only created by [`acquire()`][Self::acquire], so this is never more than
    /// the number of distinct valid keys that have been acquired.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.instances.lock().expect(ERR_POISONED_LOCK).len()
    }

    /// Returns whether the pool holds no instances yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.instances.lock().expect(ERR_POISONED_LOCK).is_empty()
    }

    /// Returns whether an instance for `key` has already been created.
    #[must_use]
    pub fn contains(&self, key: K) -> bool {
        self.inner
            .instances
            .lock()
            .expect(ERR_POISONED_LOCK)
            .contains_key(&key)
    }

    /// Returns the keys that currently have an instance, in the order of
    /// [`K::variants()`][PoolKey::variants].
    #[must_use]
    pub fn keys(&self) -> Vec<K> {
        let instances = self.inner.instances.lock().expect(ERR_POISONED_LOCK);

        K::variants()
            .iter()
            .copied()
            .filter(|key| instances.contains_key(key))
            .collect()
    }
}

impl<K, S> Clone for InstancePool<K, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, S> Default for InstancePool<K, S>
where
    K: PoolKey,
    S: From<K> + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S> fmt::Debug for InstancePool<K, S>
where
    K: PoolKey,
{
    #[cfg_attr(test, mutants::skip)] // No API contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstancePool")
            .field("keys", &self.keys())
            .finish_non_exhaustive()
    }
}
