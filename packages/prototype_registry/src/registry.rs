use std::fmt;
use std::sync::{Arc, Mutex};

use foldhash::{HashMap, HashMapExt};
use tracing::{debug, trace, warn};

use crate::{ERR_POISONED_LOCK, Error, Overrides, Prototype, Result};

/// A registry of named template objects that hands out customized deep copies.
///
/// Objects are [registered][Self::register] under a name. [`clone_entry()`][Self::clone_entry]
/// deep-copies the registered object, applies a set of attribute [`Overrides`] to the copy and
/// returns it. The registered object itself is never modified by cloning and the copy shares no
/// storage with it.
///
/// This type acts as a cloneable handle to a shared registry. Multiple handles can exist
/// simultaneously and all of them see the same entries.
///
/// # Thread safety
///
/// Every operation runs under one registry-wide lock, including the deep copy performed by
/// [`clone_entry()`][Self::clone_entry]. Overrides are applied after the lock is released,
/// because the copy is private to the caller at that point. Log events are emitted outside
/// the lock.
///
/// # Example
///
/// ```rust
/// use prototype_registry::{Overrides, PrototypeRegistry, Website};
///
/// let registry = PrototypeRegistry::new();
/// registry.register(
///     "ka-cg-1",
///     Website::new(
///         "ContentGardening",
///         "contentgardening.com",
///         "Automation and data-driven apps",
///         "Kamon Ayeva",
///     ),
/// );
///
/// let playground = registry
///     .clone_entry(
///         "ka-cg-1",
///         Overrides::new()
///             .set("name", "ContentGardeningPlayground")
///             .set("domain", "play.contentgardening.com"),
///     )
///     .unwrap();
///
/// assert_eq!(playground.name(), "ContentGardeningPlayground");
/// assert_eq!(playground.author(), "Kamon Ayeva");
/// ```
pub struct PrototypeRegistry<T> {
    /// We use foldhash for better performance with small hash tables.
    entries: Arc<Mutex<HashMap<String, T>>>,
}

impl<T> PrototypeRegistry<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Stores `object` under `name`, returning the entry it replaced, if any.
    pub fn register(&self, name: impl Into<String>, object: T) -> Option<T> {
        let name = name.into();
        debug!(name = name.as_str(), "registering prototype");

        self.entries
            .lock()
            .expect(ERR_POISONED_LOCK)
            .insert(name, object)
    }

    /// Removes the entry registered under `name` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if nothing is registered under `name`.
    pub fn unregister(&self, name: &str) -> Result<T> {
        let removed = self
            .entries
            .lock()
            .expect(ERR_POISONED_LOCK)
            .remove(name)
            .ok_or_else(|| Error::NotFound {
                name: name.to_owned(),
            })?;

        debug!(name, "unregistered prototype");
        Ok(removed)
    }

    /// Whether an entry is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .lock()
            .expect(ERR_POISONED_LOCK)
            .contains_key(name)
    }

    /// The number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().expect(ERR_POISONED_LOCK).len()
    }

    /// Whether the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().expect(ERR_POISONED_LOCK).is_empty()
    }

    /// The names of all registered entries, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .entries
            .lock()
            .expect(ERR_POISONED_LOCK)
            .keys()
            .cloned()
            .collect();
        names.sort_unstable();
        names
    }

    /// Runs `f` with read-only access to the entry registered under `name`.
    ///
    /// The registry is locked while `f` runs, so `f` must not call back into the same registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if nothing is registered under `name`.
    pub fn inspect<F, R>(&self, name: &str, f: F) -> Result<R>
    where
        F: FnOnce(&T) -> R,
    {
        let entries = self.entries.lock().expect(ERR_POISONED_LOCK);

        entries.get(name).map(f).ok_or_else(|| Error::NotFound {
            name: name.to_owned(),
        })
    }
}

impl<T> PrototypeRegistry<T>
where
    T: Prototype,
{
    /// Returns a deep copy of the entry registered under `name` with `overrides` applied.
    ///
    /// Each override sets the top-level attribute of the same name on the copy, adding the
    /// attribute if the copy did not have it. The registered entry is left untouched.
    ///
    /// # Errors
    ///
    /// * [`Error::NotFound`] if nothing is registered under `name`.
    /// * [`Error::CopyFailure`] if the entry contains something that cannot be duplicated.
    /// * [`Error::AttributeType`] if an override does not fit the attribute it targets.
    ///
    /// No partially customized copy is returned on error.
    pub fn clone_entry(&self, name: &str, overrides: Overrides) -> Result<T> {
        let copied = {
            let entries = self.entries.lock().expect(ERR_POISONED_LOCK);

            let entry = entries.get(name).ok_or_else(|| Error::NotFound {
                name: name.to_owned(),
            })?;

            entry.deep_copy()
        };

        let mut copy = copied.inspect_err(|error| {
            warn!(name, %error, "failed to deep-copy prototype");
        })?;

        trace!(name, overrides = overrides.len(), "cloned prototype");

        overrides.apply_to(&mut copy)?;
        Ok(copy)
    }
}

impl<T> Clone for PrototypeRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T> Default for PrototypeRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for PrototypeRegistry<T> {
    #[cfg_attr(test, mutants::skip)] // No API contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrototypeRegistry")
            .field("names", &self.names())
            .finish_non_exhaustive()
    }
}
