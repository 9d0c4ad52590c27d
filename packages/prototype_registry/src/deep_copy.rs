use std::collections::BTreeMap;

use crate::{Error, Result, Value};

/// Duplicates an object graph so that the copy shares no storage with the original.
///
/// Every owned sub-object is itself deep-copied, not referenced. Types that embed something that
/// cannot be duplicated (such as a [`LiveHandle`][crate::LiveHandle]) fail with
/// [`Error::CopyFailure`] rather than handing out an alias.
///
/// Every type stored in a [`PrototypeRegistry`][crate::PrototypeRegistry] implements this trait,
/// usually by deep-copying each of its fields.
///
/// # Example
///
/// ```rust
/// use prototype_registry::{DeepCopy, Value};
///
/// let original = Value::from(vec!["python", "data"]);
/// let mut copy = original.deep_copy().unwrap();
///
/// copy.as_list_mut().unwrap().push(Value::from("apis"));
///
/// assert_eq!(original.as_list().unwrap().len(), 2);
/// assert_eq!(copy.as_list().unwrap().len(), 3);
/// ```
pub trait DeepCopy: Sized {
    /// Returns an independent copy of `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CopyFailure`] if some part of the graph cannot be duplicated.
    fn deep_copy(&self) -> Result<Self>;
}

/// Types whose `Clone` already produces a fully independent value.
macro_rules! deep_copy_via_clone {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl DeepCopy for $ty {
                #[inline]
                fn deep_copy(&self) -> Result<Self> {
                    Ok(self.clone())
                }
            }
        )+
    };
}

deep_copy_via_clone!(bool, i64, f64, String);

impl<T> DeepCopy for Option<T>
where
    T: DeepCopy,
{
    fn deep_copy(&self) -> Result<Self> {
        self.as_ref().map(DeepCopy::deep_copy).transpose()
    }
}

impl<T> DeepCopy for Vec<T>
where
    T: DeepCopy,
{
    fn deep_copy(&self) -> Result<Self> {
        self.iter()
            .enumerate()
            .map(|(index, item)| {
                item.deep_copy()
                    .map_err(|error| error.nested_in(PathSegment::Index(index)))
            })
            .collect()
    }
}

impl<T> DeepCopy for BTreeMap<String, T>
where
    T: DeepCopy,
{
    fn deep_copy(&self) -> Result<Self> {
        self.iter()
            .map(|(name, member)| {
                let copy = member
                    .deep_copy()
                    .map_err(|error| error.nested_in(PathSegment::Attribute(name)))?;
                Ok::<_, Error>((name.clone(), copy))
            })
            .collect()
    }
}

impl DeepCopy for Value {
    fn deep_copy(&self) -> Result<Self> {
        Ok(match self {
            Self::Null => Self::Null,
            Self::Bool(value) => Self::Bool(*value),
            Self::Int(value) => Self::Int(*value),
            Self::Float(value) => Self::Float(*value),
            Self::Text(text) => Self::Text(text.clone()),
            Self::List(items) => Self::List(items.deep_copy()?),
            Self::Map(members) => Self::Map(members.deep_copy()?),
            Self::Handle(handle) => {
                return Err(Error::CopyFailure {
                    path: String::new(),
                    reason: format!("live handle '{}' cannot be duplicated", handle.label()),
                });
            }
        })
    }
}

/// One step on the way from the root of an object graph to a failed copy.
#[derive(Clone, Copy, Debug)]
pub(crate) enum PathSegment<'a> {
    Attribute(&'a str),
    Index(usize),
}

impl Error {
    /// Prefixes the path of a copy failure with the segment it was found under.
    ///
    /// Other errors pass through unchanged.
    pub(crate) fn nested_in(self, segment: PathSegment<'_>) -> Self {
        match self {
            Self::CopyFailure { path, reason } => Self::CopyFailure {
                path: prefix_path(segment, &path),
                reason,
            },
            other => other,
        }
    }
}

fn prefix_path(segment: PathSegment<'_>, rest: &str) -> String {
    let separator = if rest.is_empty() || rest.starts_with('[') {
        ""
    } else {
        "."
    };

    match segment {
        PathSegment::Attribute(name) => format!("{name}{separator}{rest}"),
        PathSegment::Index(index) => format!("[{index}]{separator}{rest}"),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::LiveHandle;

    fn failure_path(error: Error) -> String {
        match error {
            Error::CopyFailure { path, .. } => path,
            other => panic!("expected copy failure, got {other:?}"),
        }
    }

    #[test]
    fn copies_nested_collections_independently() {
        let mut inner = BTreeMap::new();
        inner.insert("tags".to_string(), Value::from(vec!["a", "b"]));
        let original = Value::Map(inner);

        let mut copy = original.deep_copy().unwrap();
        assert_eq!(copy, original);

        copy.as_map_mut()
            .and_then(|members| members.get_mut("tags"))
            .and_then(Value::as_list_mut)
            .unwrap()
            .push(Value::from("c"));

        let original_tags = original.as_map().unwrap().get("tags").unwrap();
        assert_eq!(original_tags.as_list().unwrap().len(), 2);
        assert_ne!(copy, original);
    }

    #[test]
    fn bare_handle_fails_with_empty_path() {
        let value = Value::from(LiveHandle::new("socket", ()));

        assert_eq!(failure_path(value.deep_copy().unwrap_err()), "");
    }

    #[test]
    fn handle_in_list_reports_index() {
        let value = Value::List(vec![
            Value::from(1_i64),
            Value::from(LiveHandle::new("socket", ())),
        ]);

        assert_eq!(failure_path(value.deep_copy().unwrap_err()), "[1]");
    }

    #[test]
    fn handle_deep_in_graph_reports_full_path() {
        let mut owner = BTreeMap::new();
        owner.insert(
            "sessions".to_string(),
            Value::List(vec![Value::Null, Value::from(LiveHandle::new("db", ()))]),
        );
        let mut root = BTreeMap::new();
        root.insert("owner".to_string(), Value::Map(owner));

        assert_eq!(
            failure_path(root.deep_copy().unwrap_err()),
            "owner.sessions[1]"
        );
    }

    #[test]
    fn option_copies_inner_value() {
        let original = Some(String::from("x"));

        assert_eq!(original.deep_copy().unwrap(), original);
        assert_eq!(None::<String>.deep_copy().unwrap(), None);
    }

    #[test]
    fn non_copy_errors_pass_through_nesting() {
        let error = Error::NotFound {
            name: "x".to_string(),
        }
        .nested_in(PathSegment::Index(3));

        assert!(matches!(error, Error::NotFound { name } if name == "x"));
    }
}
