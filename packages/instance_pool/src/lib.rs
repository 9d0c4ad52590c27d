#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! This package provides [`InstancePool`], a keyed store that hands out exactly one shared
//! instance per key.
//!
//! The pool is meant for situations where a large number of uses only differ in a small,
//! closed set of "kinds". Everything that is the same for a kind (the intrinsic state) lives in
//! one shared instance per key. Everything that differs between uses (the extrinsic state) is
//! passed in at the point of use via [`Render`] and is never stored in the pool.
//!
//! # Features
//!
//! - **One instance per key**: repeated [`acquire()`][InstancePool::acquire] calls with equal
//!   keys return handles to the same instance, verifiable via [`Pooled::ptr_eq()`].
//! - **Closed key sets**: keys implement [`PoolKey`], which enumerates every valid key. Anything
//!   outside that set is rejected with [`Error::InvalidKey`] instead of silently pooled.
//! - **Pluggable construction**: intrinsic state is built from the key via `From<K>` or via a
//!   factory supplied to [`InstancePool::with_factory()`].
//! - **Thread-safe**: the pool is a cloneable handle and the get-or-create sequence happens
//!   under a single lock, so concurrent callers never observe two instances for one key.
//!
//! # Example
//!
//! ```rust
//! use instance_pool::{InstancePool, Placement, Pooled, Vehicle, VehicleKind};
//!
//! let pool = InstancePool::<VehicleKind, Vehicle>::new();
//!
//! let first = pool.acquire(VehicleKind::Suv).unwrap();
//! let second = pool.acquire(VehicleKind::Suv).unwrap();
//!
//! // Both handles point at the very same shared instance.
//! assert!(Pooled::ptr_eq(&first, &second));
//! assert_eq!(pool.len(), 1);
//!
//! // The extrinsic state is supplied when the instance is used.
//! let description = first.render(&Placement::new("red", 10, 20));
//! assert_eq!(
//!     description,
//!     "render a car of type suv and color red at (10, 20)"
//! );
//! ```

mod constants;
mod error;
mod key;
mod pool;
mod pooled;
mod render;
mod vehicle;

pub(crate) use constants::*;
pub use error::*;
pub use key::*;
pub use pool::*;
pub use pooled::*;
pub use render::*;
pub use vehicle::*;
