use std::fmt;

use crate::{Attributes, DeepCopy, Prototype, Result, Value};

/// A schema-less prototype: an object that consists of nothing but named attributes.
///
/// Useful when templates have no fixed shape at all. Nested objects are expressed as
/// [`Value::Map`] attributes and collections as [`Value::List`] attributes.
///
/// # Example
///
/// ```rust
/// use prototype_registry::{Record, Value};
///
/// let mut record = Record::new();
/// record.set("title", "Weekly report");
/// record.set("pages", 12_i64);
///
/// assert_eq!(record.get("pages").and_then(Value::as_int), Some(12));
/// ```
#[derive(Debug, Default, PartialEq)]
pub struct Record {
    attributes: Attributes,
}

impl Record {
    /// Creates a record without attributes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, returning the value it replaced, if any.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.attributes.set(name, value)
    }

    /// The value of an attribute, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// The value of an attribute for modification, if present.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.attributes.get_mut(name)
    }

    /// The number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the record has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// All attributes of the record.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

impl DeepCopy for Record {
    fn deep_copy(&self) -> Result<Self> {
        Ok(Self {
            attributes: self.attributes.deep_copy()?,
        })
    }
}

impl Prototype for Record {
    fn set_attribute(&mut self, name: &str, value: Value) -> Result<()> {
        self.attributes.set(name, value);
        Ok(())
    }
}

impl<N, V> FromIterator<(N, V)> for Record
where
    N: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            attributes: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.attributes {
            writeln!(f, "{name}: {value}")?;
        }

        Ok(())
    }
}
