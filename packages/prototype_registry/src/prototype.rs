use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::{DeepCopy, Result, Value};

/// An object that can be registered as a template in a
/// [`PrototypeRegistry`][crate::PrototypeRegistry].
///
/// Besides being deep-copyable, a prototype exposes its top-level attributes by name so that
/// clones can be customized. The attribute set is open: setting an attribute the type does not
/// know about adds it instead of failing.
pub trait Prototype: DeepCopy {
    /// Sets or adds a top-level attribute.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AttributeType`][crate::Error::AttributeType] if the attribute only
    /// accepts a different kind of value.
    fn set_attribute(&mut self, name: &str, value: Value) -> Result<()>;
}

/// Attribute values to apply to a freshly cloned prototype.
///
/// Setting the same attribute twice keeps the last value. Overrides are consumed by the clone,
/// so their values end up owned by the new instance and nowhere else.
///
/// # Example
///
/// ```rust
/// use prototype_registry::Overrides;
///
/// let overrides = Overrides::new()
///     .set("name", "ContentGardeningPlayground")
///     .set("creation_date", "2018-08-01");
///
/// assert_eq!(overrides.len(), 2);
///
/// let same: Overrides = [("name", "ContentGardeningPlayground"), ("creation_date", "2018-08-01")]
///     .into_iter()
///     .collect();
/// assert_eq!(overrides, same);
/// ```
#[derive(Debug, Default, PartialEq)]
pub struct Overrides {
    values: BTreeMap<String, Value>,
}

impl Overrides {
    /// Creates an empty set of overrides. Cloning with it yields a plain copy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an override, replacing an earlier one for the same attribute.
    #[must_use]
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// The number of attributes that will be overridden.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no attributes will be overridden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Applies every override to `target`, in attribute name order.
    pub(crate) fn apply_to<T>(self, target: &mut T) -> Result<()>
    where
        T: Prototype,
    {
        for (name, value) in self.values {
            target.set_attribute(&name, value)?;
        }

        Ok(())
    }
}

impl<N, V> FromIterator<(N, V)> for Overrides
where
    N: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Overrides {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::Record;

    #[test]
    fn later_override_wins() {
        let overrides = Overrides::new().set("name", "first").set("name", "second");

        let collected: Vec<_> = overrides.into_iter().collect();

        assert_eq!(collected, vec![("name".to_string(), Value::from("second"))]);
    }

    #[test]
    fn empty_overrides_leave_target_alone() {
        let mut record: Record = [("name", "site-A")].into_iter().collect();

        Overrides::new().apply_to(&mut record).unwrap();

        assert_eq!(record.get("name").and_then(Value::as_text), Some("site-A"));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn apply_sets_and_adds_attributes() {
        let mut record: Record = [("name", "site-A")].into_iter().collect();

        Overrides::new()
            .set("name", "site-B")
            .set("category", "Blog")
            .apply_to(&mut record)
            .unwrap();

        assert_eq!(record.get("name").and_then(Value::as_text), Some("site-B"));
        assert_eq!(record.get("category").and_then(Value::as_text), Some("Blog"));
    }
}
