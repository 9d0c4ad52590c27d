use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::{DeepCopy, Result, Value};

/// An open set of named attributes attached to an object at construction time or later.
///
/// This is the side-table that gives a statically shaped type an extensible set of extra
/// fields. Attributes are ordered by name.
///
/// # Example
///
/// ```rust
/// use prototype_registry::{Attributes, Value};
///
/// let mut attributes = Attributes::new();
/// attributes.set("category", "Blog");
/// attributes.set("keywords", vec!["python", "data"]);
///
/// assert_eq!(attributes.get("category").and_then(Value::as_text), Some("Blog"));
/// assert_eq!(attributes.len(), 2);
/// ```
#[derive(Debug, Default, PartialEq)]
pub struct Attributes {
    entries: BTreeMap<String, Value>,
}

impl Attributes {
    /// Creates an empty attribute set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, returning the value it replaced, if any.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(name.into(), value.into())
    }

    /// The value of an attribute, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// The value of an attribute for modification, if present.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.entries.get_mut(name)
    }

    /// Removes an attribute, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.remove(name)
    }

    /// Whether an attribute with the given name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the attributes in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.entries.iter()
    }
}

impl DeepCopy for Attributes {
    fn deep_copy(&self) -> Result<Self> {
        Ok(Self {
            entries: self.entries.deep_copy()?,
        })
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<N, V> FromIterator<(N, V)> for Attributes
where
    N: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}
