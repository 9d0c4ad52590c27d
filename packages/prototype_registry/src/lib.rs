#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! This package provides [`PrototypeRegistry`], a registry of named template objects from which
//! new objects are produced by deep copy plus attribute overrides.
//!
//! A registered object acts as a prototype. Cloning it yields a structurally independent copy:
//! nested lists and maps are duplicated, so mutating the copy at any depth never affects the
//! registered object or any other copy. Named [`Overrides`] are applied to the copy before it is
//! handed out, setting existing attributes or adding new ones.
//!
//! # Features
//!
//! - **Deep copies only**: duplication goes through [`DeepCopy`], and the attribute [`Value`]
//!   type deliberately does not implement [`Clone`]. Content that cannot be duplicated, such as a
//!   [`LiveHandle`], fails the copy with [`Error::CopyFailure`] instead of being shared.
//! - **Open attribute sets**: prototypes accept attributes they were not constructed with, see
//!   [`Prototype::set_attribute()`] and [`Attributes`].
//! - **Ready-made prototypes**: [`Website`] combines fixed fields with extra attributes and
//!   [`Record`] is purely attribute-based.
//! - **Thread-safe**: the registry is a cloneable handle usable from any number of threads.
//!
//! # Example
//!
//! ```rust
//! use prototype_registry::{Overrides, PrototypeRegistry, Record, Value};
//!
//! let registry = PrototypeRegistry::new();
//!
//! let template: Record = [
//!     ("name", Value::from("site-A")),
//!     ("keywords", Value::from(vec!["python", "data"])),
//! ]
//! .into_iter()
//! .collect();
//! registry.register("site-A", template);
//!
//! let mut copy = registry
//!     .clone_entry("site-A", Overrides::new().set("name", "site-B"))
//!     .unwrap();
//!
//! assert_eq!(copy.get("name").and_then(Value::as_text), Some("site-B"));
//!
//! // The copy owns its own keyword list.
//! copy.get_mut("keywords")
//!     .and_then(Value::as_list_mut)
//!     .unwrap()
//!     .push(Value::from("apis"));
//!
//! let original_keywords = registry
//!     .inspect("site-A", |entry| {
//!         entry.get("keywords").and_then(Value::as_list).map(<[Value]>::len)
//!     })
//!     .unwrap();
//! assert_eq!(original_keywords, Some(2));
//! ```

mod attributes;
mod constants;
mod deep_copy;
mod error;
mod prototype;
mod record;
mod registry;
mod value;
mod website;

pub use attributes::*;
pub(crate) use constants::*;
pub use deep_copy::*;
pub use error::*;
pub use prototype::*;
pub use record::*;
pub use registry::*;
pub use value::*;
pub use website::*;
