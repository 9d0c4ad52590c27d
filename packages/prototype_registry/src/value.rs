use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A dynamically typed attribute value in a prototype's object graph.
///
/// Values own everything they contain: lists and maps hold their elements by value, so
/// duplicating a value with [`DeepCopy`][crate::DeepCopy] duplicates the whole subtree.
///
/// `Value` intentionally does not implement [`Clone`]. The only way to duplicate one is a deep
/// copy, which refuses to duplicate [live handles][LiveHandle] instead of silently aliasing them.
#[derive(Debug, PartialEq)]
#[non_exhaustive]
pub enum Value {
    /// The absence of a value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Text(String),
    /// An ordered collection of owned values.
    List(Vec<Self>),
    /// A nested object: named owned values, ordered by name.
    Map(BTreeMap<String, Self>),
    /// A reference to a live resource that cannot be duplicated.
    Handle(LiveHandle),
}

impl Value {
    /// A short name of the kind of value, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Handle(_) => "handle",
        }
    }

    /// The string, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The integer, if this is an integer value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The boolean, if this is a boolean value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The elements, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The elements for modification, if this is a list.
    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Self>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The named members, if this is a map.
    #[must_use]
    pub fn as_map(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Map(members) => Some(members),
            _ => None,
        }
    }

    /// The named members for modification, if this is a map.
    pub fn as_map_mut(&mut self) -> Option<&mut BTreeMap<String, Self>> {
        match self {
            Self::Map(members) => Some(members),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
            Self::List(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(members) => {
                f.write_str("{")?;
                for (index, (name, member)) in members.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {member}")?;
                }
                f.write_str("}")
            }
            Self::Handle(handle) => write!(f, "<{}>", handle.label()),
        }
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_text() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_text() == Some(*other)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Self>,
{
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Self>> for Value {
    fn from(members: BTreeMap<String, Self>) -> Self {
        Self::Map(members)
    }
}

impl From<LiveHandle> for Value {
    fn from(handle: LiveHandle) -> Self {
        Self::Handle(handle)
    }
}

impl<T> FromIterator<T> for Value
where
    T: Into<Self>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::List(iter.into_iter().map(Into::into).collect())
    }
}

/// A reference to a live resource (an open connection, a file, a pool entry) embedded in an
/// object graph.
///
/// Such resources cannot be faithfully duplicated, so a deep copy that encounters one fails
/// with [`Error::CopyFailure`][crate::Error::CopyFailure]. Two handles are equal only if they
/// refer to the same resource.
#[derive(Clone)]
pub struct LiveHandle {
    label: String,
    resource: Arc<dyn Any + Send + Sync>,
}

impl LiveHandle {
    /// Wraps a resource, labelling it for diagnostics.
    #[must_use]
    pub fn new<R>(label: impl Into<String>, resource: R) -> Self
    where
        R: Any + Send + Sync,
    {
        Self {
            label: label.into(),
            resource: Arc::new(resource),
        }
    }

    /// The diagnostic label of the resource.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The resource, if it is of type `R`.
    #[must_use]
    pub fn downcast_ref<R: Any>(&self) -> Option<&R> {
        self.resource.downcast_ref()
    }
}

impl PartialEq for LiveHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.resource, &other.resource)
    }
}

impl fmt::Debug for LiveHandle {
    #[cfg_attr(test, mutants::skip)] // No API contract.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveHandle")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
